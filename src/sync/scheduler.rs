use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::{debug, info};

use super::{SyncContext, record_analytics, refresh_logos, run_full_sync};
use crate::sources::Upstream;

/// Running background jobs; dropping this does not stop them, call [`JobHandles::abort_all`].
#[derive(Debug, Default)]
pub struct JobHandles {
    handles: Vec<JoinHandle<()>>,
}

impl JobHandles {
    /// Number of spawned tasks, including the startup sync.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no task was spawned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Abort every job; in-flight passes are cancelled at their next await point.
    pub fn abort_all(self) {
        for handle in &self.handles {
            handle.abort();
        }
        info!(jobs = self.handles.len(), "background jobs stopped");
    }
}

/// What: Delay from `now` until the next multiple of `period` since the Unix epoch.
///
/// Inputs:
/// - `now`: Current wall-clock time.
/// - `period`: Job period; zero is treated as one millisecond.
///
/// Output:
/// - Zero when `now` sits exactly on a boundary, otherwise the time left to
///   the next one.
///
/// Details:
/// - A 5 minute period fires at :00, :05, :10 and so on; a 1 hour period fires
///   on the hour.
#[must_use]
pub fn next_aligned_delay(now: DateTime<Utc>, period: Duration) -> Duration {
    let period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX).max(1);
    let now_ms = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    match now_ms % period_ms {
        0 => Duration::ZERO,
        rem => Duration::from_millis(period_ms - rem),
    }
}

/// Interval for one periodic job; missed ticks are skipped so runs never queue up.
fn ticker(period: Duration, align: bool) -> Interval {
    let delay = if align {
        next_aligned_delay(Utc::now(), period)
    } else {
        period
    };
    let mut interval = interval_at(Instant::now() + delay, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// What: Start the startup sync and every periodic job.
///
/// Inputs:
/// - `ctx`: Shared context; each task holds its own `Arc`.
///
/// Output:
/// - Handles used to stop the jobs on shutdown.
///
/// Details:
/// - The startup sync runs once in its own task, so callers can start serving
///   immediately.
/// - Each periodic job is one task awaiting its own interval, so two runs of
///   the same job never overlap.
/// - The re-sync job is only spawned when `resync_interval` is set; it waits
///   for a still-running startup sync instead of racing it.
pub fn spawn_jobs<U: Upstream + 'static>(ctx: Arc<SyncContext<U>>) -> JobHandles {
    let schedule = ctx.schedule.clone();
    let align = schedule.align_to_wall_clock;
    let mut handles = Vec::new();

    let startup = Arc::clone(&ctx);
    handles.push(tokio::spawn(async move {
        // failures are logged by the pipeline
        let _ = run_full_sync(&startup).await;
    }));

    let analytics = Arc::clone(&ctx);
    let period = schedule.analytics_interval;
    handles.push(tokio::spawn(async move {
        let mut interval = ticker(period, align);
        loop {
            interval.tick().await;
            debug!("analytics job tick");
            record_analytics(&analytics).await;
        }
    }));

    let logos = Arc::clone(&ctx);
    let period = schedule.logo_interval;
    handles.push(tokio::spawn(async move {
        let mut interval = ticker(period, align);
        loop {
            interval.tick().await;
            debug!("logo refresh job tick");
            refresh_logos(&logos).await;
        }
    }));

    if let Some(period) = schedule.resync_interval {
        let resync = Arc::clone(&ctx);
        handles.push(tokio::spawn(async move {
            let mut interval = ticker(period, align);
            loop {
                interval.tick().await;
                debug!("re-sync job tick");
                let _ = run_full_sync(&resync).await;
            }
        }));
    }

    info!(
        jobs = handles.len(),
        analytics_secs = schedule.analytics_interval.as_secs(),
        logo_secs = schedule.logo_interval.as_secs(),
        resync_secs = schedule.resync_interval.map(|d| d.as_secs()),
        align_to_wall_clock = align,
        "background jobs started"
    );
    JobHandles { handles }
}
