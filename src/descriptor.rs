//! CDN transform URLs and responsive `<source>` descriptors.
//!
//! # URL Shape
//!
//! ```text
//! <origin>/<prefix>/<options>/<path>
//! https://assets.zyrosite.com/cdn-cgi/image/width=400/img/photo.png
//! ```
//!
//! With no options set the options segment is empty and the URL contains
//! `<prefix>//<path>`. That shape is kept as-is.
//!
//! # Descriptor Order
//!
//! [`build_responsive_descriptors`] always returns four sources:
//!
//! | # | media                | sizes           | type        |
//! |---|----------------------|-----------------|-------------|
//! | 1 | `(min-width: 920px)` | `<width>px`     | `image/webp` |
//! | 2 | `(min-width: 920px)` | `<width>px`     | original    |
//! | 3 | (none)               | default `calc()` | `image/webp` |
//! | 4 | (none)               | default `calc()` | original    |

use crate::config::SourcesConfig;
use crate::options::{OutputFormat, RenderOptions, option_string};
use crate::path::{InvalidPathError, decompose_path};
use crate::types::SourceDescriptor;

const WEBP_MIME: &str = "image/webp";

/// Build the direct CDN URL for `path`, keeping the source format.
pub fn build_direct_url(
    config: &SourcesConfig,
    path: &str,
    origin: &str,
    options: &RenderOptions,
) -> Result<String, InvalidPathError> {
    build_variant_url(config, path, origin, options, OutputFormat::Original)
}

/// Build a CDN URL for `path` in the given output format.
///
/// The path is validated first so a malformed path never reaches a URL.
pub fn build_variant_url(
    config: &SourcesConfig,
    path: &str,
    origin: &str,
    options: &RenderOptions,
    format: OutputFormat,
) -> Result<String, InvalidPathError> {
    decompose_path(path)?;
    Ok(join_url(config, origin, &option_string(options, format), path))
}

fn join_url(config: &SourcesConfig, origin: &str, options: &str, path: &str) -> String {
    let origin = origin.trim_end_matches('/');
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("{origin}/{}/{options}/{path}", config.cdn.prefix)
}

/// Build the four responsive descriptors for `path`.
pub fn build_responsive_descriptors(
    config: &SourcesConfig,
    path: &str,
    origin: &str,
    options: &RenderOptions,
) -> Result<Vec<SourceDescriptor>, InvalidPathError> {
    let parts = decompose_path(path)?;
    let webp_url = join_url(config, origin, &option_string(options, OutputFormat::WebP), path);
    let original_url = join_url(
        config,
        origin,
        &option_string(options, OutputFormat::Original),
        path,
    );

    let layout = &config.layout;
    let media = format!("(min-width: {}px)", layout.breakpoint);
    let breakpoint_sizes = options
        .effective_width()
        .map(|w| format!("{w}px"))
        .unwrap_or_else(|| layout.default_sizes.clone());

    Ok(vec![
        SourceDescriptor {
            media: Some(media.clone()),
            sizes: breakpoint_sizes.clone(),
            srcset: webp_url.clone(),
            mime_type: WEBP_MIME.to_string(),
        },
        SourceDescriptor {
            media: Some(media),
            sizes: breakpoint_sizes,
            srcset: original_url.clone(),
            mime_type: parts.mime_type.clone(),
        },
        SourceDescriptor {
            media: None,
            sizes: layout.default_sizes.clone(),
            srcset: webp_url,
            mime_type: WEBP_MIME.to_string(),
        },
        SourceDescriptor {
            media: None,
            sizes: layout.default_sizes.clone(),
            srcset: original_url,
            mime_type: parts.mime_type,
        },
    ])
}

/// Build a pixel-density `srcset` (`<url> 1x, <url> 2x, …`) from the
/// configured DPI levels.
///
/// Each level scales the requested width and height. Levels whose scaled
/// size exceeds `layout.max_width`/`layout.max_height` are dropped, except the
/// first level, which is always kept. Without a width or height there is
/// nothing to scale and the plain URL is returned.
pub fn density_srcset(
    config: &SourcesConfig,
    path: &str,
    origin: &str,
    options: &RenderOptions,
    format: OutputFormat,
) -> Result<String, InvalidPathError> {
    decompose_path(path)?;
    let width = options.effective_width();
    let height = options.effective_height();
    if width.is_none() && height.is_none() {
        return Ok(join_url(config, origin, &option_string(options, format), path));
    }

    let layout = &config.layout;
    let mut candidates = Vec::with_capacity(layout.dpi_levels.len());
    for (i, &level) in layout.dpi_levels.iter().enumerate() {
        let scaled_w = width.map(|w| w.saturating_mul(level));
        let scaled_h = height.map(|h| h.saturating_mul(level));
        let too_big = scaled_w.is_some_and(|w| w > layout.max_width)
            || scaled_h.is_some_and(|h| h > layout.max_height);
        if too_big && i > 0 {
            tracing::debug!(level, ?scaled_w, ?scaled_h, "skipping density over max size");
            continue;
        }
        let scaled = RenderOptions {
            width: scaled_w,
            height: scaled_h,
            ..options.clone()
        };
        let url = join_url(config, origin, &option_string(&scaled, format), path);
        candidates.push(format!("{url} {level}x"));
    }
    Ok(candidates.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{assert_descriptor_shape, width_options};

    const ORIGIN: &str = "https://assets.zyrosite.com";

    #[test]
    fn direct_url_with_width() {
        let config = SourcesConfig::default();
        let url = build_direct_url(&config, "img/photo.png", ORIGIN, &width_options(400)).unwrap();
        assert_eq!(url, "https://assets.zyrosite.com/cdn-cgi/image/width=400/img/photo.png");
    }

    #[test]
    fn direct_url_all_options() {
        let config = SourcesConfig::default();
        let options = RenderOptions {
            width: Some(800),
            height: Some(600),
            fit: Some("cover".to_string()),
            is_lossless: true,
        };
        let url = build_direct_url(&config, "a/b.jpg", ORIGIN, &options).unwrap();
        assert_eq!(
            url,
            "https://assets.zyrosite.com/cdn-cgi/image/width=800,height=600,fit=cover,quality=100/a/b.jpg"
        );
    }

    #[test]
    fn direct_url_empty_options_keeps_empty_segment() {
        let config = SourcesConfig::default();
        let url = build_direct_url(&config, "img/photo.png", ORIGIN, &RenderOptions::default())
            .unwrap();
        assert_eq!(url, "https://assets.zyrosite.com/cdn-cgi/image//img/photo.png");
    }

    #[test]
    fn direct_url_normalizes_joining_slashes() {
        let config = SourcesConfig::default();
        let url = build_direct_url(
            &config,
            "/img/photo.png",
            "https://assets.zyrosite.com/",
            &width_options(400),
        )
        .unwrap();
        assert_eq!(url, "https://assets.zyrosite.com/cdn-cgi/image/width=400/img/photo.png");
    }

    #[test]
    fn direct_url_preserves_query() {
        let config = SourcesConfig::default();
        let url = build_direct_url(&config, "img/photo.png?v=2", ORIGIN, &width_options(400))
            .unwrap();
        assert_eq!(
            url,
            "https://assets.zyrosite.com/cdn-cgi/image/width=400/img/photo.png?v=2"
        );
    }

    #[test]
    fn direct_url_uses_configured_prefix() {
        let mut config = SourcesConfig::default();
        config.cdn.prefix = "img-resize".to_string();
        let url = build_direct_url(&config, "a.png", ORIGIN, &width_options(10)).unwrap();
        assert_eq!(url, "https://assets.zyrosite.com/img-resize/width=10/a.png");
    }

    #[test]
    fn direct_url_rejects_bad_path() {
        let config = SourcesConfig::default();
        let result = build_direct_url(&config, "img/photo", ORIGIN, &width_options(400));
        assert!(matches!(result, Err(InvalidPathError::MissingExtension { .. })));
    }

    #[test]
    fn webp_variant_url() {
        let config = SourcesConfig::default();
        let url = build_variant_url(
            &config,
            "img/photo.png",
            ORIGIN,
            &width_options(400),
            OutputFormat::WebP,
        )
        .unwrap();
        assert_eq!(
            url,
            "https://assets.zyrosite.com/cdn-cgi/image/width=400,format=webp/img/photo.png"
        );
    }

    #[test]
    fn descriptors_order_and_shape() {
        let config = SourcesConfig::default();
        let sources =
            build_responsive_descriptors(&config, "img/photo.png", ORIGIN, &width_options(400))
                .unwrap();
        assert_descriptor_shape(&sources, 920, "image/png");

        assert_eq!(sources[0].sizes, "400px");
        assert_eq!(sources[1].sizes, "400px");
        assert_eq!(
            sources[0].srcset,
            "https://assets.zyrosite.com/cdn-cgi/image/width=400,format=webp/img/photo.png"
        );
        assert_eq!(
            sources[1].srcset,
            "https://assets.zyrosite.com/cdn-cgi/image/width=400/img/photo.png"
        );
        assert_eq!(sources[2].srcset, sources[0].srcset);
        assert_eq!(sources[3].srcset, sources[1].srcset);
    }

    #[test]
    fn descriptors_default_sizes_for_catch_all() {
        let config = SourcesConfig::default();
        let sources =
            build_responsive_descriptors(&config, "a.jpg", ORIGIN, &width_options(400)).unwrap();
        let expected = "calc(100vw - var(--m-block-padding) - var(--m-block-padding))";
        assert_eq!(sources[2].sizes, expected);
        assert_eq!(sources[3].sizes, expected);
        assert_eq!(sources[3].mime_type, "image/jpeg");
    }

    #[test]
    fn descriptors_without_width_fall_back_to_default_sizes() {
        let config = SourcesConfig::default();
        let sources =
            build_responsive_descriptors(&config, "a.png", ORIGIN, &RenderOptions::default())
                .unwrap();
        assert_eq!(sources[0].sizes, config.layout.default_sizes);
        assert_eq!(
            sources[0].srcset,
            "https://assets.zyrosite.com/cdn-cgi/image/format=webp/a.png"
        );
        assert_eq!(sources[1].srcset, "https://assets.zyrosite.com/cdn-cgi/image//a.png");
    }

    #[test]
    fn descriptors_follow_configured_breakpoint() {
        let mut config = SourcesConfig::default();
        config.layout.breakpoint = 1280;
        config.layout.default_sizes = "100vw".to_string();
        let sources =
            build_responsive_descriptors(&config, "a.gif", ORIGIN, &width_options(640)).unwrap();
        assert_descriptor_shape(&sources, 1280, "image/gif");
        assert_eq!(sources[3].sizes, "100vw");
    }

    #[test]
    fn descriptors_reject_bad_path() {
        let config = SourcesConfig::default();
        assert!(build_responsive_descriptors(&config, "img/", ORIGIN, &width_options(1)).is_err());
    }

    #[test]
    fn density_srcset_scales_width() {
        let config = SourcesConfig::default();
        let srcset = density_srcset(
            &config,
            "a.png",
            ORIGIN,
            &width_options(400),
            OutputFormat::Original,
        )
        .unwrap();
        assert_eq!(
            srcset,
            "https://assets.zyrosite.com/cdn-cgi/image/width=400/a.png 1x, \
             https://assets.zyrosite.com/cdn-cgi/image/width=800/a.png 2x, \
             https://assets.zyrosite.com/cdn-cgi/image/width=1200/a.png 3x"
        );
    }

    #[test]
    fn density_srcset_skips_levels_over_max() {
        let config = SourcesConfig::default();
        let options = RenderOptions {
            width: Some(800),
            height: Some(400),
            ..Default::default()
        };
        let srcset =
            density_srcset(&config, "a.png", ORIGIN, &options, OutputFormat::WebP).unwrap();
        // 3x → 2400x1200, over 1920x1080
        assert_eq!(
            srcset,
            "https://assets.zyrosite.com/cdn-cgi/image/width=800,height=400,format=webp/a.png 1x, \
             https://assets.zyrosite.com/cdn-cgi/image/width=1600,height=800,format=webp/a.png 2x"
        );
    }

    #[test]
    fn density_srcset_keeps_first_level_even_when_too_big() {
        let config = SourcesConfig::default();
        let srcset = density_srcset(
            &config,
            "a.png",
            ORIGIN,
            &width_options(4000),
            OutputFormat::Original,
        )
        .unwrap();
        assert_eq!(srcset, "https://assets.zyrosite.com/cdn-cgi/image/width=4000/a.png 1x");
    }

    #[test]
    fn density_srcset_without_dimensions_is_plain_url() {
        let config = SourcesConfig::default();
        let options = RenderOptions {
            is_lossless: true,
            ..Default::default()
        };
        let srcset =
            density_srcset(&config, "a.png", ORIGIN, &options, OutputFormat::Original).unwrap();
        assert_eq!(srcset, "https://assets.zyrosite.com/cdn-cgi/image/quality=100/a.png");
    }

    #[test]
    fn density_srcset_uses_configured_levels() {
        let mut config = SourcesConfig::default();
        config.layout.dpi_levels = vec![1, 2];
        let options = RenderOptions {
            height: Some(300),
            ..Default::default()
        };
        let srcset =
            density_srcset(&config, "a.png", ORIGIN, &options, OutputFormat::Original).unwrap();
        assert_eq!(
            srcset,
            "https://assets.zyrosite.com/cdn-cgi/image/height=300/a.png 1x, \
             https://assets.zyrosite.com/cdn-cgi/image/height=600/a.png 2x"
        );
    }
}
