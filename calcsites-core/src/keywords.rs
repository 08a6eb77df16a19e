//! Keyword file reading.
//!
//! The keyword file is plain UTF-8 text with a header line followed by one
//! keyword per line.

use std::path::Path;
use tracing::{error, info};

use crate::error::Result;

/// Collect up to `max_count` keywords from file content.
///
/// The first line is always skipped, blank lines are ignored and every
/// keyword is trimmed. Order and duplicates are preserved.
pub fn parse_keywords(content: &str, max_count: usize) -> Vec<String> {
    content
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(max_count)
        .map(str::to_string)
        .collect()
}

/// Read keywords from `path`, failing when the file cannot be read
pub async fn read_keywords(path: impl AsRef<Path>, max_count: usize) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    Ok(parse_keywords(&content, max_count))
}

/// Read keywords from `path`; a read failure is logged and yields no keywords
pub async fn load_keywords(path: impl AsRef<Path>, max_count: usize) -> Vec<String> {
    let path = path.as_ref();
    info!("Reading keywords from: {}", path.display());

    match read_keywords(path, max_count).await {
        Ok(keywords) => {
            info!("✓ Read {} keyword(s)", keywords.len());
            keywords
        }
        Err(err) => {
            error!("✗ Failed to read keywords file '{}': {}", path.display(), err);
            Vec::new()
        }
    }
}
