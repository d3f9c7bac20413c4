//! Consumer-side helpers for the crawled code document.
//!
//! The browsing UI treats the output document as its read-only data source.
//! This crate implements that boundary: loading with graceful degradation,
//! resolving a navigation location to a section, and post-processing
//! captured content before display.

mod resolve;
mod rewrite;

use std::path::Path;

use tracing::warn;

use civicode_shared::CodeTree;

pub use resolve::{resolve_section, section_content};
pub use rewrite::{is_internal_link, rewrite_image_sources};

/// Load the output document from `path`.
///
/// A missing file or malformed JSON is "no data", not an error: consumers
/// render an empty state and never crash on a bad document.
pub fn load_tree(path: &Path) -> Option<CodeTree> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "no code document available");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(tree) => Some(tree),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "code document is malformed");
            None
        }
    }
}
