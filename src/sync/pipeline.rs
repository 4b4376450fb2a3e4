use tracing::{error, info};

use super::SyncContext;
use crate::error::Result;
use crate::persist::{FanoutReport, log_all_analytics, persist_catalog};
use crate::sources::Upstream;

/// What: Fetch the catalog, publish it, then persist every mod.
///
/// Inputs:
/// - `ctx`: Shared sync context.
///
/// Output:
/// - Per-effect counts of the persistence pass.
///
/// # Errors
/// - Whatever the upstream fetch returned. The store is left untouched and no
///   file is written in that case.
///
/// Details:
/// - The store is swapped before any file is written, so queries see the new
///   catalog even while snapshots and logos are still being saved.
/// - Persistence failures are per mod and only show up in the report.
/// - Concurrent calls on the same context run one after the other.
pub async fn run_full_sync<U: Upstream>(ctx: &SyncContext<U>) -> Result<FanoutReport> {
    let _running = ctx.sync_lock.lock().await;
    info!("syncing mod catalog");
    let mods = match ctx.upstream.fetch_catalog().await {
        Ok(mods) => mods,
        Err(e) => {
            error!(kind = e.kind(), error = %e, "catalog sync failed; keeping previous catalog");
            return Err(e);
        }
    };
    let count = mods.len();
    ctx.store.replace(mods);
    info!(mods = count, "catalog replaced");
    let current = ctx.store.snapshot();
    Ok(persist_catalog(
        &ctx.upstream,
        &ctx.layout,
        &current,
        ctx.schedule.logo_concurrency,
    )
    .await)
}

/// What: Append one download-count block per mod currently in the store.
///
/// Details:
/// - Uses the last synced counts; nothing is fetched.
pub async fn record_analytics<U>(ctx: &SyncContext<U>) -> FanoutReport {
    let current = ctx.store.snapshot();
    log_all_analytics(&ctx.layout, &current).await
}

/// What: Re-download logos (and rewrite snapshots) for the current catalog.
pub async fn refresh_logos<U: Upstream>(ctx: &SyncContext<U>) -> FanoutReport {
    let current = ctx.store.snapshot();
    persist_catalog(
        &ctx.upstream,
        &ctx.layout,
        &current,
        ctx.schedule.logo_concurrency,
    )
    .await
}
