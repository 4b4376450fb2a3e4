//! Catalog synchronisation: the full sync pipeline and the periodic jobs.

mod pipeline;
mod scheduler;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::catalog::CatalogStore;
use crate::persist::Layout;
use crate::settings::ScheduleSettings;

pub use pipeline::{record_analytics, refresh_logos, run_full_sync};
pub use scheduler::{JobHandles, next_aligned_delay, spawn_jobs};

/// What: Everything a sync job needs, shared between the spawned tasks.
///
/// Details:
/// - `store` is shared with the HTTP surface; jobs only ever publish whole
///   catalogs through [`CatalogStore::replace`].
/// - Full syncs (startup and re-sync) take `sync_lock` for their whole run, so
///   an older fetch can never publish over a newer one.
pub struct SyncContext<U> {
    /// Index client.
    pub upstream: U,
    /// Live catalog.
    pub store: Arc<CatalogStore>,
    /// Where artifacts are written.
    pub layout: Layout,
    /// Job periods and logo concurrency.
    pub schedule: ScheduleSettings,
    /// Held by [`run_full_sync`] from fetch to the end of persistence.
    sync_lock: Mutex<()>,
}

impl<U> SyncContext<U> {
    /// Bundle the parts into a context.
    pub fn new(
        upstream: U,
        store: Arc<CatalogStore>,
        layout: Layout,
        schedule: ScheduleSettings,
    ) -> Self {
        Self {
            upstream,
            store,
            layout,
            schedule,
            sync_lock: Mutex::new(()),
        }
    }
}
