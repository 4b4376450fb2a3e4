//! Batch helpers running the per-mod effects over a whole catalog.

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use tracing::{info, warn};

use super::{Layout, fetch_and_store_logo, log_analytics, persist_snapshot};
use crate::error::Result;
use crate::model::ModRecord;
use crate::sources::Upstream;

/// Success/failure counter for one kind of effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    /// Effects that completed.
    pub ok: usize,
    /// Effects that returned an error.
    pub failed: usize,
}

impl Tally {
    /// Count one outcome.
    fn record<T>(&mut self, outcome: &Result<T>) {
        if outcome.is_ok() {
            self.ok += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// What: Per-effect outcome of a batch.
///
/// Details:
/// - Effects a batch does not perform stay at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FanoutReport {
    /// `data/<id>.json` writes.
    pub snapshots: Tally,
    /// `analytics/<id>.ini` appends.
    pub analytics: Tally,
    /// `logos/<id>.png` downloads.
    pub logos: Tally,
}

impl FanoutReport {
    /// Total failed effects across all kinds.
    #[must_use]
    pub const fn failures(&self) -> usize {
        self.snapshots.failed + self.analytics.failed + self.logos.failed
    }
}

/// What: Write snapshots and fetch logos for every mod in `mods`.
///
/// Inputs:
/// - `upstream`: Index client used for logos.
/// - `layout`: Artifact layout.
/// - `mods`: Catalog to persist, in order.
/// - `logo_concurrency`: Maximum logo downloads in flight (1 = strictly sequential).
///
/// Output:
/// - Counts per effect.
///
/// Details:
/// - Snapshots are written first for the whole batch, then logos are fetched.
/// - A failure for one mod never stops the remaining mods or the other effect.
pub async fn persist_catalog<U: Upstream>(
    upstream: &U,
    layout: &Layout,
    mods: &[ModRecord],
    logo_concurrency: usize,
) -> FanoutReport {
    let mut report = FanoutReport::default();
    for m in mods {
        let outcome = persist_snapshot(layout, m).await;
        if let Err(e) = &outcome {
            warn!(id = %m.id, kind = e.kind(), error = %e, "failed to save mod snapshot");
        }
        report.snapshots.record(&outcome);
    }
    report.logos = fetch_logos(upstream, layout, mods, logo_concurrency).await;
    info!(
        mods = mods.len(),
        snapshots_ok = report.snapshots.ok,
        snapshots_failed = report.snapshots.failed,
        logos_ok = report.logos.ok,
        logos_failed = report.logos.failed,
        "mod data and logos saved"
    );
    report
}

/// What: Logo pass shared by sync and refresh.
///
/// Details:
/// - Keeps at most `concurrency` downloads in flight; with 1 each download
///   finishes before the next starts.
/// - Failures are already logged by [`fetch_and_store_logo`].
async fn fetch_logos<U: Upstream>(
    upstream: &U,
    layout: &Layout,
    mods: &[ModRecord],
    concurrency: usize,
) -> Tally {
    let limit = concurrency.max(1);
    let mut queue = mods.iter();
    let mut in_flight = FuturesUnordered::new();
    let mut tally = Tally::default();
    loop {
        while in_flight.len() < limit {
            let Some(m) = queue.next() else { break };
            in_flight.push(fetch_and_store_logo(upstream, layout, m));
        }
        let Some(outcome) = in_flight.next().await else {
            break;
        };
        tally.record(&outcome);
    }
    tally
}

/// What: Append one download-count block per mod.
///
/// Output:
/// - Report with only the `analytics` tally populated.
pub async fn log_all_analytics(layout: &Layout, mods: &[ModRecord]) -> FanoutReport {
    let mut report = FanoutReport::default();
    for m in mods {
        let outcome = log_analytics(layout, m).await;
        if let Err(e) = &outcome {
            warn!(id = %m.id, kind = e.kind(), error = %e, "failed to log mod downloads");
        }
        report.analytics.record(&outcome);
    }
    info!(
        mods = mods.len(),
        ok = report.analytics.ok,
        failed = report.analytics.failed,
        "download counts logged"
    );
    report
}
