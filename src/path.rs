//! File name, extension, and MIME type extraction from image paths.
//!
//! The CDN rewrites URLs of the form `<origin>/<prefix>/<options>/<path>`, and
//! the `<path>` part is also what tells us the original image format. This
//! module splits that path into its parts:
//!
//! ```text
//! img/2024/photo.JPG?v=3
//!          ^^^^^ ^^^
//!          stem  extension  →  image/jpeg
//! ```
//!
//! Anything that can't yield a well-formed `image/<ext>` type is rejected with
//! [`InvalidPathError`] instead of producing a broken URL or MIME type.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidPathError {
    #[error("image path is empty")]
    Empty,
    #[error("image path has an empty segment: {path}")]
    EmptySegment { path: String },
    #[error("image path has no file extension: {path}")]
    MissingExtension { path: String },
    #[error("image file name has no stem: {path}")]
    EmptyStem { path: String },
    #[error("image file extension is not alphanumeric: {path}")]
    InvalidExtension { path: String },
}

/// An image path split into the pieces the descriptor builder needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParts {
    /// Last path segment, query string removed (e.g. `photo.png`).
    pub file_name: String,
    /// File name before the last dot (e.g. `photo`).
    pub stem: String,
    /// Extension as written in the path, case preserved (e.g. `PNG`).
    pub extension: String,
    /// `image/<lowercase extension>`, with `jpg` aliased to `jpeg`.
    pub mime_type: String,
}

/// Strip the query string and fragment, if any.
fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

/// Split an image path into file name, stem, extension, and MIME type.
///
/// - `"img/photo.png"` → stem `photo`, extension `png`, `image/png`
/// - `"/a/b/shot.final.JPG?w=1"` → stem `shot.final`, extension `JPG`, `image/jpeg`
/// - `"img/"`, `"img//a.png"`, `"img/photo"`, `"img/.png"` → `Err`
pub fn decompose_path(path: &str) -> Result<PathParts, InvalidPathError> {
    let bare = strip_query(path);
    let bare = bare.strip_prefix('/').unwrap_or(bare);
    if bare.is_empty() {
        return Err(InvalidPathError::Empty);
    }
    if bare.split('/').any(str::is_empty) {
        return Err(InvalidPathError::EmptySegment {
            path: path.to_string(),
        });
    }

    // split() always yields at least one item, and empty segments are rejected above
    let file_name = bare.rsplit('/').next().unwrap_or(bare);
    let Some((stem, extension)) = file_name.rsplit_once('.') else {
        return Err(InvalidPathError::MissingExtension {
            path: path.to_string(),
        });
    };
    if extension.is_empty() {
        return Err(InvalidPathError::MissingExtension {
            path: path.to_string(),
        });
    }
    if stem.is_empty() {
        return Err(InvalidPathError::EmptyStem {
            path: path.to_string(),
        });
    }
    if !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(InvalidPathError::InvalidExtension {
            path: path.to_string(),
        });
    }

    Ok(PathParts {
        file_name: file_name.to_string(),
        stem: stem.to_string(),
        extension: extension.to_string(),
        mime_type: mime_type(extension),
    })
}

/// MIME type for an image extension: lowercased, `jpg` aliased to `jpeg`.
pub fn mime_type(extension: &str) -> String {
    let ext = extension.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" => "image/jpeg".to_string(),
        _ => format!("image/{ext}"),
    }
}
