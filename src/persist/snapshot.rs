use std::path::PathBuf;

use tracing::debug;

use super::Layout;
use crate::error::{Error, Result};
use crate::model::{ModRecord, ModSnapshot};

/// What: Render the snapshot document for `m`.
///
/// Output:
/// - Pretty-printed JSON (two-space indent) of [`ModSnapshot`].
///
/// # Errors
/// - `DataShape` when the mod has no versions.
pub fn render_snapshot(m: &ModRecord) -> Result<String> {
    let snap = ModSnapshot::try_from(m)?;
    serde_json::to_string_pretty(&snap)
        .map_err(|e| Error::shape(format!("cannot encode snapshot for {}: {e}", m.id)))
}

/// What: Overwrite `data/<id>.json` with the current snapshot of `m`.
///
/// Inputs:
/// - `layout`: Artifact layout.
/// - `m`: Mod to persist.
///
/// Output:
/// - Path written.
///
/// # Errors
/// - `DataShape` for an unusable id or a mod without versions.
/// - `Io` when the file cannot be written.
///
/// Details:
/// - Same input always yields byte-identical output.
pub async fn persist_snapshot(layout: &Layout, m: &ModRecord) -> Result<PathBuf> {
    let path = layout.snapshot_path(&m.id)?;
    let body = render_snapshot(m)?;
    tokio::fs::write(&path, body)
        .await
        .map_err(|e| Error::io(&path, e))?;
    debug!(id = %m.id, path = %path.display(), "saved mod snapshot");
    Ok(path)
}
