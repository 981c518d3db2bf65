//! Persisted playlist document handling.
//!
//! The document is pretty-printed JSON at `<data-dir>/playlist.json`. Each
//! fetch run replaces it wholesale; the write goes through a sibling
//! temporary file and a rename so a failed run never leaves a partial
//! document behind.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;
use tokio::fs;

use crate::config;
use crate::domain::PlaylistDocument;

/// Errors for the persisted document
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(
        "playlist document not found at {}; run `lessonlink fetch <playlist-id>` first",
        .0.display()
    )]
    Missing(PathBuf),
}

/// Resolved path of the playlist document
pub fn document_path() -> Result<PathBuf> {
    Ok(config::config()?.data_dir.join("playlist.json"))
}

/// Write the document to `path`, creating the containing directory if absent
pub async fn save(document: &PlaylistDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(document)
        .context("Failed to serialize playlist document")?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content)
        .await
        .with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .await
        .with_context(|| format!("Failed to move document into place at {}", path.display()))?;

    Ok(())
}

/// Read the document back from `path`
pub async fn load(path: &Path) -> Result<PlaylistDocument> {
    if !path.exists() {
        return Err(StoreError::Missing(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse playlist document {}", path.display()))
}
