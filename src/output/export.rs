// JSON export of the active collection.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::posts::models::PostRecord;

/// File name the export is always written under.
pub const EXPORT_FILE_NAME: &str = "sentiment_analysis_data.json";

/// Serialize posts as a pretty-printed JSON array.
pub fn to_json(posts: &[PostRecord]) -> Result<String> {
    serde_json::to_string_pretty(posts).context("Failed to serialize posts")
}

/// Write `posts` to `<dir>/sentiment_analysis_data.json`, creating `dir`
/// if needed. Returns the path written.
pub fn write_export(posts: &[PostRecord], dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let path = dir.join(EXPORT_FILE_NAME);
    let json = to_json(posts)?;
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), posts = posts.len(), "Exported sentiment data");
    Ok(path)
}
