//! Serialization of the crawled tree to its single JSON document.
//!
//! The whole tree is materialized in memory before the write begins; there
//! is no streaming or partial write. All-or-nothing semantics come from
//! pipeline ordering: callers reach this crate only after a fully
//! successful crawl, so a failed run never disturbs a previous document.

use std::path::Path;

use tracing::info;

use civicode_shared::{CiviCodeError, CodeTree, Result};

/// Serialize `tree` as pretty-printed JSON (stable key order, two-space
/// indentation) and write it to `path`, overwriting any previous version in
/// one whole-file write. Parent directories are created as needed.
pub fn write_tree(tree: &CodeTree, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(tree)
        .map_err(|e| CiviCodeError::Serialize(e.to_string()))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| CiviCodeError::io(parent, e))?;
        }
    }

    std::fs::write(path, json).map_err(|e| CiviCodeError::io(path, e))?;

    info!(path = %path.display(), chapters = tree.chapters.len(), "wrote code tree");
    Ok(())
}
