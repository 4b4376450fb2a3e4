//! On-disk artifacts derived from the catalog.
//!
//! Layout under the configured root:
//! - `data/<id>.json`: pretty-printed snapshot, overwritten in full.
//! - `analytics/<id>.ini`: append-only download-count log.
//! - `logos/<id>.png`: logo bytes, overwritten in full.
//!
//! Each effect is independent: a failure is returned to the caller for that
//! mod only, and the batch helpers in [`fanout`] count it and move on.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::validate_id;

mod analytics;
mod fanout;
mod logo;
mod snapshot;

pub use analytics::{format_analytics_block, log_analytics, log_analytics_at};
pub use fanout::{FanoutReport, Tally, log_all_analytics, persist_catalog};
pub use logo::fetch_and_store_logo;
pub use snapshot::{persist_snapshot, render_snapshot};

/// Subdirectory for JSON snapshots.
const DATA_DIR: &str = "data";
/// Subdirectory for download-count logs.
const ANALYTICS_DIR: &str = "analytics";
/// Subdirectory for logo images.
const LOGOS_DIR: &str = "logos";

/// What: Resolve per-mod file paths under a root directory.
///
/// Details:
/// - Every path accessor validates the id first, so a hostile id can never
///   escape the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Root directory (the configured `data_root`).
    root: PathBuf,
}

impl Layout {
    /// Layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/data`
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    /// `<root>/analytics`
    #[must_use]
    pub fn analytics_dir(&self) -> PathBuf {
        self.root.join(ANALYTICS_DIR)
    }

    /// `<root>/logos`
    #[must_use]
    pub fn logos_dir(&self) -> PathBuf {
        self.root.join(LOGOS_DIR)
    }

    /// `<root>/data/<id>.json`
    ///
    /// # Errors
    /// - `DataShape` for an unusable id.
    pub fn snapshot_path(&self, id: &str) -> Result<PathBuf> {
        validate_id(id)?;
        Ok(self.data_dir().join(format!("{id}.json")))
    }

    /// `<root>/analytics/<id>.ini`
    ///
    /// # Errors
    /// - `DataShape` for an unusable id.
    pub fn analytics_path(&self, id: &str) -> Result<PathBuf> {
        validate_id(id)?;
        Ok(self.analytics_dir().join(format!("{id}.ini")))
    }

    /// `<root>/logos/<id>.png`
    ///
    /// # Errors
    /// - `DataShape` for an unusable id.
    pub fn logo_path(&self, id: &str) -> Result<PathBuf> {
        validate_id(id)?;
        Ok(self.logos_dir().join(format!("{id}.png")))
    }

    /// What: Create the three artifact directories if missing.
    ///
    /// # Errors
    /// - `Io` naming the directory that could not be created.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [self.data_dir(), self.analytics_dir(), self.logos_dir()] {
            fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        }
        Ok(())
    }
}
