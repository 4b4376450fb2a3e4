//! In-memory mod catalog.
//!
//! The catalog is an ordered list of [`ModRecord`]s behind an `RwLock<Arc<..>>`.
//! A sync builds a complete new list and publishes it with [`CatalogStore::replace`],
//! which swaps the `Arc` under a short write lock; readers clone the `Arc` and
//! never observe a half-built catalog.

use std::sync::{Arc, PoisonError, RwLock};

use crate::model::ModRecord;

mod query;

pub use query::matches_query;

/// What: Process-wide view of the last successfully synced catalog.
///
/// Inputs:
/// - Populated by the sync pipeline via `replace`.
///
/// Output:
/// - Shared with the scheduler and the HTTP layer through an `Arc<CatalogStore>`.
///
/// Details:
/// - A poisoned lock is recovered rather than propagated; the guarded value is
///   only ever swapped whole, so it cannot be left inconsistent.
#[derive(Debug, Default)]
pub struct CatalogStore {
    /// Current catalog; replaced wholesale, never mutated in place.
    current: RwLock<Arc<Vec<ModRecord>>>,
}

impl CatalogStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with `mods`.
    #[must_use]
    pub fn with_mods(mods: Vec<ModRecord>) -> Self {
        Self {
            current: RwLock::new(Arc::new(mods)),
        }
    }

    /// What: Atomically publish a new catalog.
    ///
    /// Inputs:
    /// - `mods`: Complete replacement; prior contents are dropped, not merged.
    pub fn replace(&self, mods: Vec<ModRecord>) {
        let next = Arc::new(mods);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
    }

    /// Immutable view of the current catalog.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<ModRecord>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of mods in the current catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// `true` before the first successful sync (or after an empty one).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// What: Point lookup by exact id.
    ///
    /// Output:
    /// - `Some(record)` cloned out of the current catalog, or `None`.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<ModRecord> {
        self.snapshot().iter().find(|m| m.id == id).cloned()
    }

    /// What: Case-insensitive substring search over latest-version names.
    ///
    /// Inputs:
    /// - `query`: Substring to look for, taken verbatim; only the empty string matches everything.
    ///
    /// Output:
    /// - Matching records in catalog order.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<ModRecord> {
        let needle = query.to_lowercase();
        self.snapshot()
            .iter()
            .filter(|m| matches_query(m, &needle))
            .cloned()
            .collect()
    }
}
