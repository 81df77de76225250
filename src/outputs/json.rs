//! JSON Feed output.
//!
//! The feed is rendered with two-space indentation and a trailing newline,
//! keys in struct declaration order, so identical inputs always produce
//! identical bytes.
//!
//! # Atomic replace
//!
//! The document is written to a sibling `*.tmp` file and renamed over the
//! target. A failed run therefore leaves either the previous feed or nothing,
//! never a truncated file.

use crate::error::FeedError;
use crate::models::Feed;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize `feed` to its canonical byte form.
pub fn render(feed: &Feed) -> Result<Vec<u8>, FeedError> {
    let mut bytes = serde_json::to_vec_pretty(feed)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write `feed` to `path`, replacing any previous file.
///
/// Creates the parent directory if needed.
///
/// # Errors
///
/// [`FeedError::Serialize`] if rendering fails, [`FeedError::Write`] for any
/// filesystem failure. On error the temporary file is removed.
#[instrument(level = "info", skip_all, fields(path = %path.display(), items = feed.items.len()))]
pub async fn write_feed(feed: &Feed, path: &Path) -> Result<(), FeedError> {
    let bytes = render(feed)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(|source| {
            error!(dir = %parent.display(), error = %source, "Failed to create output dir");
            FeedError::Write {
                path: parent.to_path_buf(),
                source,
            }
        })?;
    }

    let tmp = temp_path(path);
    info!(tmp = %tmp.display(), bytes = bytes.len(), "Writing JSON feed");
    let result = match fs::write(&tmp, &bytes).await {
        Ok(()) => fs::rename(&tmp, path).await,
        Err(e) => Err(e),
    };

    if let Err(source) = result {
        error!(error = %source, "Failed writing JSON feed");
        let _ = fs::remove_file(&tmp).await;
        return Err(FeedError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    info!("Wrote JSON feed");
    Ok(())
}

/// `feeds/json` -> `feeds/json.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("feed"));
    name.push(".tmp");
    path.with_file_name(name)
}
