//! Rendering options and the CDN option segment built from them.
//!
//! The image CDN takes its transform parameters as one comma-separated path
//! segment (`<prefix>/<options>/<path>`):
//!
//! ```text
//! https://assets.example.com/cdn-cgi/image/width=400,fit=cover,quality=100/img/a.png
//!                                          ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^
//! ```
//!
//! Tokens always appear in the same order: `width`, `height`, `fit`,
//! `quality`, `format`. Unset options produce no token at all.

use serde::{Deserialize, Serialize};

/// Quality requested for lossless renders; overrides the CDN's lossy default.
pub const LOSSLESS_QUALITY: u8 = 100;

/// Caller-supplied rendering options. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Target width in pixels. `0` counts as unset.
    pub width: Option<u32>,
    /// Target height in pixels. `0` counts as unset.
    pub height: Option<u32>,
    /// CDN fit mode (`scale-down`, `contain`, `cover`, `crop`, `pad`). Empty counts as unset.
    pub fit: Option<String>,
    /// Request `quality=100` instead of the default lossy encoding.
    pub is_lossless: bool,
}

impl RenderOptions {
    /// Width if set and non-zero.
    pub fn effective_width(&self) -> Option<u32> {
        self.width.filter(|w| *w > 0)
    }

    /// Height if set and non-zero.
    pub fn effective_height(&self) -> Option<u32> {
        self.height.filter(|h| *h > 0)
    }

    /// Fit mode if set and non-empty.
    pub fn effective_fit(&self) -> Option<&str> {
        self.fit.as_deref().filter(|f| !f.is_empty())
    }
}

/// Output format requested from the CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Keep the source format; no `format` token is emitted.
    #[default]
    Original,
    WebP,
}

impl OutputFormat {
    /// Value of the `format=` token, if this format needs one.
    pub fn token(self) -> Option<&'static str> {
        match self {
            Self::Original => None,
            Self::WebP => Some("webp"),
        }
    }
}

/// Build the comma-joined CDN option segment.
///
/// - `width=400` for `{ width: 400 }`
/// - `width=400,height=300,fit=cover,quality=100` with every option set
/// - `format=webp` for empty options and [`OutputFormat::WebP`]
/// - `""` for empty options and [`OutputFormat::Original`]
pub fn option_string(options: &RenderOptions, format: OutputFormat) -> String {
    let mut tokens: Vec<String> = Vec::with_capacity(5);
    if let Some(w) = options.effective_width() {
        tokens.push(format!("width={w}"));
    }
    if let Some(h) = options.effective_height() {
        tokens.push(format!("height={h}"));
    }
    if let Some(fit) = options.effective_fit() {
        tokens.push(format!("fit={fit}"));
    }
    if options.is_lossless {
        tokens.push(format!("quality={LOSSLESS_QUALITY}"));
    }
    if let Some(fmt) = format.token() {
        tokens.push(format!("format={fmt}"));
    }
    tokens.join(",")
}
