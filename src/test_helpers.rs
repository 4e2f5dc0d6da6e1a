//! Shared test utilities for the picture-sources test suite.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let config = config_with_origins(&["https://img.example.com"]);
//! let sources = build_responsive_descriptors(&config, "a.png", "https://img.example.com", &width_options(400)).unwrap();
//! assert_descriptor_shape(&sources, 920, "image/png");
//! ```

use crate::config::SourcesConfig;
use crate::options::RenderOptions;
use crate::types::SourceDescriptor;

// =========================================================================
// Fixture setup
// =========================================================================

/// Stock config with the CDN origin list replaced.
pub fn config_with_origins(origins: &[&str]) -> SourcesConfig {
    let mut config = SourcesConfig::default();
    config.cdn.origins = origins.iter().map(|o| o.to_string()).collect();
    config
}

/// Options with only a width set.
pub fn width_options(width: u32) -> RenderOptions {
    RenderOptions {
        width: Some(width),
        ..Default::default()
    }
}

// =========================================================================
// Assertions
// =========================================================================

/// Assert the four-source layout: breakpoint webp, breakpoint original,
/// catch-all webp, catch-all original.
pub fn assert_descriptor_shape(sources: &[SourceDescriptor], breakpoint: u32, mime_type: &str) {
    assert_eq!(sources.len(), 4, "expected exactly 4 sources, got {sources:#?}");

    let media = format!("(min-width: {breakpoint}px)");
    assert_eq!(sources[0].media.as_deref(), Some(media.as_str()));
    assert_eq!(sources[1].media.as_deref(), Some(media.as_str()));
    assert_eq!(sources[2].media, None);
    assert_eq!(sources[3].media, None);

    assert_eq!(sources[0].mime_type, "image/webp");
    assert_eq!(sources[1].mime_type, mime_type);
    assert_eq!(sources[2].mime_type, "image/webp");
    assert_eq!(sources[3].mime_type, mime_type);

    assert!(sources[0].srcset.contains("format=webp"));
    assert!(!sources[1].srcset.contains("format=webp"));
}
