//! Top-level dispatch from a source URL to a [`Resolved`] result.
//!
//! A [`Resolver`] owns an immutable [`SourcesConfig`]. It holds no other state,
//! so one instance can be shared freely across threads, and separate
//! instances can serve separate CDN profiles.

use crate::config::SourcesConfig;
use crate::descriptor;
use crate::options::{OutputFormat, RenderOptions};
use crate::origin::{OriginMatch, file_path_after_origin, match_origin};
use crate::path::InvalidPathError;
use crate::types::{PictureResult, Resolved};

/// Resolves image URLs against one CDN configuration.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: SourcesConfig,
}

impl Resolver {
    pub fn new(config: SourcesConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SourcesConfig {
        &self.config
    }

    /// Resolve `src` into picture data, or hand it back unchanged.
    ///
    /// - CDN origin → [`Resolved::Picture`]
    /// - stock-photo origin → [`Resolved::NotImplemented`] (input unchanged)
    /// - anything else → [`Resolved::Unchanged`]
    ///
    /// Only a CDN URL with a malformed file path is an error.
    pub fn resolve_sources(
        &self,
        src: &str,
        options: &RenderOptions,
    ) -> Result<Resolved, InvalidPathError> {
        match match_origin(src, &self.config) {
            OriginMatch::Cdn(origin) => {
                // match_origin found `origin` inside `src`, so this always splits
                let path = file_path_after_origin(src, origin).unwrap_or_default();
                let picture = self.picture_data(path, origin, options)?;
                tracing::debug!(%src, %origin, src_out = %picture.src, "resolved CDN image");
                Ok(Resolved::Picture(picture))
            }
            OriginMatch::Stock(origin) => {
                tracing::debug!(%src, %origin, "stock-photo source left unchanged");
                Ok(Resolved::NotImplemented(src.to_string()))
            }
            OriginMatch::Unmatched => {
                tracing::trace!(%src, "no known origin, passing through");
                Ok(Resolved::Unchanged(src.to_string()))
            }
        }
    }

    fn picture_data(
        &self,
        path: &str,
        origin: &str,
        options: &RenderOptions,
    ) -> Result<PictureResult, InvalidPathError> {
        let sources = self.build_responsive_descriptors(path, origin, options)?;
        let src = self.build_direct_url(path, origin, options)?;
        Ok(PictureResult { src, sources })
    }

    /// See [`descriptor::build_direct_url`].
    pub fn build_direct_url(
        &self,
        path: &str,
        origin: &str,
        options: &RenderOptions,
    ) -> Result<String, InvalidPathError> {
        descriptor::build_direct_url(&self.config, path, origin, options)
    }

    /// See [`descriptor::build_responsive_descriptors`].
    pub fn build_responsive_descriptors(
        &self,
        path: &str,
        origin: &str,
        options: &RenderOptions,
    ) -> Result<Vec<crate::types::SourceDescriptor>, InvalidPathError> {
        descriptor::build_responsive_descriptors(&self.config, path, origin, options)
    }

    /// Density `srcset` for a full source URL.
    ///
    /// Returns `Ok(None)` when `src` is not on a CDN origin, since only CDN
    /// images can be requested at other sizes.
    pub fn density_srcset(
        &self,
        src: &str,
        options: &RenderOptions,
        format: OutputFormat,
    ) -> Result<Option<String>, InvalidPathError> {
        let OriginMatch::Cdn(origin) = match_origin(src, &self.config) else {
            return Ok(None);
        };
        let path = file_path_after_origin(src, origin).unwrap_or_default();
        descriptor::density_srcset(&self.config, path, origin, options, format).map(Some)
    }
}

/// Resolve `src` with the stock configuration.
pub fn resolve_sources(src: &str, options: &RenderOptions) -> Result<Resolved, InvalidPathError> {
    Resolver::default().resolve_sources(src, options)
}
