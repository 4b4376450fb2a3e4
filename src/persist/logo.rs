use tracing::{debug, warn};

use super::Layout;
use crate::error::{Error, Result};
use crate::model::ModRecord;
use crate::sources::Upstream;

/// What: Download the logo for `m` and overwrite `logos/<id>.png`.
///
/// Inputs:
/// - `upstream`: Index client.
/// - `layout`: Artifact layout.
/// - `m`: Mod whose logo is fetched.
///
/// Output:
/// - Number of bytes written.
///
/// # Errors
/// - `Fetch` when the download fails; nothing is written and any previous
///   image stays in place.
/// - `DataShape` for an unusable id, `Io` when the file cannot be written.
pub async fn fetch_and_store_logo<U: Upstream>(
    upstream: &U,
    layout: &Layout,
    m: &ModRecord,
) -> Result<usize> {
    let path = layout.logo_path(&m.id)?;
    let bytes = upstream.fetch_logo(&m.id).await.map_err(|e| {
        warn!(id = %m.id, error = %e, "failed to fetch mod logo; keeping previous file");
        e
    })?;
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| Error::io(&path, e))?;
    debug!(id = %m.id, bytes = bytes.len(), "saved mod logo");
    Ok(bytes.len())
}
