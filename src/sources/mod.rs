//! Upstream mod index access.
//!
//! [`Upstream`] is the seam the sync pipeline talks to; [`GeodeIndex`] is the
//! production implementation over `reqwest`.

use std::future::Future;

use crate::error::Result;
use crate::model::ModRecord;

mod client;
mod mods;
#[cfg(test)]
pub(crate) mod testing;

pub use client::build_http_client;
pub use mods::{CatalogPage, GeodeIndex, parse_catalog_page};

/// What: Operations the sync pipeline needs from the upstream index.
///
/// Details:
/// - `fetch_catalog` returns the complete catalog or an error; it never yields a
///   partial list, so callers can publish the result without further checks.
/// - Futures are `Send` so jobs can run on the multi-threaded runtime.
pub trait Upstream: Send + Sync {
    /// Fetch every mod matching the configured filters.
    fn fetch_catalog(&self) -> impl Future<Output = Result<Vec<ModRecord>>> + Send;

    /// Fetch the logo image bytes for mod `id`.
    fn fetch_logo(&self, id: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}
