use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::Layout;
use crate::error::{Error, Result};
use crate::model::ModRecord;
use crate::util::iso_timestamp;

/// One log block: `[<timestamp>]\ndownloads=<n>\n\n`.
#[must_use]
pub fn format_analytics_block(downloads: u64, at: DateTime<Utc>) -> String {
    format!("[{}]\ndownloads={downloads}\n\n", iso_timestamp(at))
}

/// What: Append a download-count block for `m`, stamped with the current time.
///
/// # Errors
/// - See [`log_analytics_at`].
pub async fn log_analytics(layout: &Layout, m: &ModRecord) -> Result<PathBuf> {
    log_analytics_at(layout, m, Utc::now()).await
}

/// What: Append a download-count block for `m` stamped with `at`.
///
/// Inputs:
/// - `layout`: Artifact layout.
/// - `m`: Mod whose `download_count` is logged.
/// - `at`: Timestamp for the block header.
///
/// Output:
/// - Path appended to.
///
/// # Errors
/// - `DataShape` for an unusable id, `Io` when the file cannot be opened or written.
///
/// Details:
/// - Opens in append mode; existing content is never truncated.
pub async fn log_analytics_at(
    layout: &Layout,
    m: &ModRecord,
    at: DateTime<Utc>,
) -> Result<PathBuf> {
    let path = layout.analytics_path(&m.id)?;
    let block = format_analytics_block(m.download_count, at);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await
        .map_err(|e| Error::io(&path, e))?;
    file.write_all(block.as_bytes())
        .await
        .map_err(|e| Error::io(&path, e))?;
    // pending writes must land before the handle drops
    file.flush().await.map_err(|e| Error::io(&path, e))?;
    debug!(id = %m.id, downloads = m.download_count, "logged mod downloads");
    Ok(path)
}
