//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Resolve
//!
//! ```text
//! Picture
//!     src: https://assets.zyrosite.com/cdn-cgi/image/width=400/img/photo.png
//! Sources
//! 001 image/webp (min-width: 920px)
//!     sizes: 400px
//!     srcset: https://assets.zyrosite.com/cdn-cgi/image/width=400,format=webp/img/photo.png
//! 002 image/png (min-width: 920px)
//!     ...
//! ```
//!
//! Pass-through results print a single line:
//!
//! ```text
//! Unchanged: https://example.com/photo.png
//! Stock photo (not transformed): https://images.unsplash.com/photo-1
//! ```
//!
//! ## Config
//!
//! ```text
//! CDN
//!     prefix: cdn-cgi/image
//!     001 https://assets.zyrosite.space
//! Stock
//!     https://images.unsplash.com
//! Layout
//!     breakpoint: 920px
//!     ...
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::config::SourcesConfig;
use crate::types::{Resolved, SourceDescriptor};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Header line for a source: index, type, and media query when present.
///
/// ```text
/// 001 image/webp (min-width: 920px)
/// 003 image/webp
/// ```
fn source_header(index: usize, source: &SourceDescriptor) -> String {
    match &source.media {
        Some(media) => format!("{} {} {}", format_index(index), source.mime_type, media),
        None => format!("{} {}", format_index(index), source.mime_type),
    }
}

// ============================================================================
// Resolve output
// ============================================================================

/// Format a resolve result.
pub fn format_resolved(resolved: &Resolved) -> Vec<String> {
    let picture = match resolved {
        Resolved::Picture(p) => p,
        Resolved::NotImplemented(src) => return vec![format!("Stock photo (not transformed): {src}")],
        Resolved::Unchanged(src) => return vec![format!("Unchanged: {src}")],
    };

    let mut lines = vec![
        "Picture".to_string(),
        format!("{}src: {}", indent(1), picture.src),
        "Sources".to_string(),
    ];
    for (i, source) in picture.sources.iter().enumerate() {
        lines.push(source_header(i + 1, source));
        lines.push(format!("{}sizes: {}", indent(1), source.sizes));
        lines.push(format!("{}srcset: {}", indent(1), source.srcset));
    }
    lines
}

pub fn print_resolved(resolved: &Resolved) {
    for line in format_resolved(resolved) {
        println!("{}", line);
    }
}

// ============================================================================
// Config output
// ============================================================================

/// Format the effective configuration as a short inventory.
pub fn format_config(config: &SourcesConfig) -> Vec<String> {
    let mut lines = vec!["CDN".to_string()];
    lines.push(format!("{}prefix: {}", indent(1), config.cdn.prefix));
    if config.cdn.origins.is_empty() {
        lines.push(format!("{}(no origins)", indent(1)));
    }
    for (i, origin) in config.cdn.origins.iter().enumerate() {
        lines.push(format!("{}{} {}", indent(1), format_index(i + 1), origin));
    }

    lines.push("Stock".to_string());
    lines.push(format!("{}{}", indent(1), config.stock.origin));

    let layout = &config.layout;
    let dpi: Vec<String> = layout.dpi_levels.iter().map(|d| format!("{d}x")).collect();
    lines.push("Layout".to_string());
    lines.push(format!("{}breakpoint: {}px", indent(1), layout.breakpoint));
    lines.push(format!("{}dpi levels: {}", indent(1), dpi.join(", ")));
    lines.push(format!(
        "{}max size: {}x{}",
        indent(1),
        layout.max_width,
        layout.max_height
    ));
    lines.push(format!("{}default sizes: {}", indent(1), layout.default_sizes));
    lines
}

pub fn print_config(config: &SourcesConfig) {
    for line in format_config(config) {
        println!("{}", line);
    }
}
