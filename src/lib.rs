//! # Picture Sources
//!
//! Turns image URLs into CDN transform URLs and responsive `<picture>` source
//! descriptors. Images hosted on a known CDN origin get a resized direct URL
//! plus four `<source>` entries; everything else is handed back untouched.
//!
//! ```
//! use picture_sources::{RenderOptions, Resolved, resolve_sources};
//!
//! let options = RenderOptions { width: Some(400), ..Default::default() };
//! let resolved = resolve_sources("https://assets.zyrosite.com/img/photo.png", &options).unwrap();
//!
//! let Resolved::Picture(picture) = resolved else { panic!("expected a CDN match") };
//! assert_eq!(
//!     picture.src,
//!     "https://assets.zyrosite.com/cdn-cgi/image/width=400/img/photo.png"
//! );
//! assert_eq!(picture.sources.len(), 4);
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`resolver`] | Top-level dispatch: CDN match → picture data, otherwise pass-through |
//! | [`origin`] | Matches a URL against the configured CDN and stock-photo origins |
//! | [`path`] | Splits an image path into stem, extension, and MIME type |
//! | [`options`] | Render options and the comma-joined CDN option segment |
//! | [`descriptor`] | Direct URLs, the four responsive descriptors, density srcsets |
//! | [`types`] | Serializable result types (`PictureResult`, `SourceDescriptor`, `Resolved`) |
//! | [`config`] | `sources.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup for the CLI |
//!
//! # Design Decisions
//!
//! ## Pass-Through by Default
//!
//! Unknown origins are never rewritten. The resolver is safe to run over every
//! image URL on a page: worst case, a URL comes back exactly as it went in.
//!
//! ## Explicit Stock-Photo Stub
//!
//! URLs on the stock-photo origin are recognized but not transformed. They
//! resolve to [`Resolved::NotImplemented`] rather than silently falling into
//! the generic pass-through, so callers can tell the two apart.
//!
//! ## Configuration Object Over Constants
//!
//! Origins, the rewrite prefix, the breakpoint, and pixel-ratio levels live in
//! [`config::SourcesConfig`], owned by a [`Resolver`]. Tests and multiple CDN
//! profiles each get their own resolver instead of patching globals.

pub mod config;
pub mod descriptor;
pub mod logging;
pub mod options;
pub mod origin;
pub mod output;
pub mod path;
pub mod resolver;
pub mod types;

pub use config::SourcesConfig;
pub use options::{OutputFormat, RenderOptions};
pub use path::InvalidPathError;
pub use resolver::{Resolver, resolve_sources};
pub use types::{PictureResult, Resolved, SourceDescriptor};

#[cfg(test)]
pub(crate) mod test_helpers;
