//! Result types handed back to callers and serialized by the CLI.
//!
//! The JSON shape mirrors what `<picture>` markup consumes: a `src` for the
//! `<img>` fallback plus `<source>` entries carrying `media`, `sizes`,
//! `srcset`, and `type` attributes.

use serde::{Deserialize, Serialize};

/// One `<source>` candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// CSS media query; absent for the catch-all sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    /// CSS size expression.
    pub sizes: String,
    pub srcset: String,
    /// MIME type of the image the `srcset` points at.
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// Direct URL plus ordered responsive sources for a CDN-hosted image.
///
/// `sources` runs from most to least specific: breakpoint before catch-all,
/// and within each, webp before the original format. Browsers take the first
/// `<source>` that matches, so this order is load-bearing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PictureResult {
    pub src: String,
    pub sources: Vec<SourceDescriptor>,
}

/// What resolving a source URL produced.
///
/// Serializes untagged: either a picture object or the bare input string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Resolved {
    /// The URL belongs to a CDN origin.
    Picture(PictureResult),
    /// The URL belongs to the stock-photo origin. Stock-photo transforms are
    /// not implemented, so this carries the input unchanged.
    NotImplemented(String),
    /// Unknown origin; the input is passed through untouched.
    Unchanged(String),
}

impl Resolved {
    /// The picture data, if the URL was transformed.
    pub fn picture(&self) -> Option<&PictureResult> {
        match self {
            Self::Picture(p) => Some(p),
            _ => None,
        }
    }

    /// The URL to put in an `<img src>`: the direct CDN URL, or the input.
    pub fn src(&self) -> &str {
        match self {
            Self::Picture(p) => &p.src,
            Self::NotImplemented(s) | Self::Unchanged(s) => s,
        }
    }
}
