//! Scriptable in-memory [`Upstream`] for unit tests.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::Upstream;
use crate::error::{Error, Result};
use crate::model::ModRecord;

/// Fake index: returns a scripted catalog and deterministic logo bytes.
pub struct FakeUpstream {
    /// Next catalog answer; `Err` simulates an upstream failure.
    catalog: Mutex<std::result::Result<Vec<ModRecord>, String>>,
    /// Ids whose logo download fails.
    failing_logos: HashSet<String>,
    /// How long each catalog fetch takes.
    catalog_delay: Duration,
    /// Catalog fetches currently running.
    catalog_in_flight: AtomicUsize,
    /// Highest `catalog_in_flight` seen.
    pub max_catalog_in_flight: AtomicUsize,
    /// Number of `fetch_catalog` calls.
    pub catalog_calls: AtomicUsize,
    /// Number of `fetch_logo` calls.
    pub logo_calls: AtomicUsize,
}

impl FakeUpstream {
    pub fn new(mods: Vec<ModRecord>) -> Self {
        Self {
            catalog: Mutex::new(Ok(mods)),
            failing_logos: HashSet::new(),
            catalog_delay: Duration::ZERO,
            catalog_in_flight: AtomicUsize::new(0),
            max_catalog_in_flight: AtomicUsize::new(0),
            catalog_calls: AtomicUsize::new(0),
            logo_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_logo(mut self, id: &str) -> Self {
        self.failing_logos.insert(id.to_string());
        self
    }

    pub fn with_catalog_delay(mut self, delay: Duration) -> Self {
        self.catalog_delay = delay;
        self
    }

    /// Script the next catalog answer.
    pub fn set_catalog(&self, answer: std::result::Result<Vec<ModRecord>, String>) {
        *self.catalog.lock().expect("fake lock") = answer;
    }

    pub fn logo_bytes(id: &str) -> Vec<u8> {
        format!("logo:{id}").into_bytes()
    }
}

impl Upstream for FakeUpstream {
    async fn fetch_catalog(&self) -> Result<Vec<ModRecord>> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        let running = self.catalog_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_catalog_in_flight
            .fetch_max(running, Ordering::SeqCst);
        tokio::time::sleep(self.catalog_delay).await;
        self.catalog_in_flight.fetch_sub(1, Ordering::SeqCst);
        let answer = self.catalog.lock().expect("fake lock").clone();
        answer.map_err(|reason| Error::fetch("fake://catalog", reason))
    }

    async fn fetch_logo(&self, id: &str) -> Result<Vec<u8>> {
        self.logo_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if self.failing_logos.contains(id) {
            return Err(Error::fetch(format!("fake://logo/{id}"), "HTTP 404 Not Found"));
        }
        Ok(Self::logo_bytes(id))
    }
}
