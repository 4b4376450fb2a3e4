//! Error taxonomy shared by the upstream client, the persistence fan-out and the scheduler.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// What: Every failure the sync pipeline can observe.
///
/// Details:
/// - `Fetch` and `DataShape` abort a full sync and leave the catalog untouched.
/// - `Io` is isolated to the mod whose file could not be written.
/// - `Server` is the only variant that ends the process.
/// - None of these ever reach an HTTP caller; jobs log them and move on.
#[derive(Debug, Error)]
pub enum Error {
    /// Network or HTTP status failure against the upstream index.
    #[error("fetch failed for {url}: {reason}")]
    Fetch {
        /// Request URL (without secrets; the index is public).
        url: String,
        /// Transport error or non-success status line.
        reason: String,
    },

    /// The upstream answered, but not with the structure we expect.
    #[error("unexpected data shape: {0}")]
    DataShape(String),

    /// Filesystem failure while writing a cached artifact.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// File or directory being written.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The HTTP listener could not be bound or stopped with an error.
    #[error("server error on {addr}: {source}")]
    Server {
        /// Listen address.
        addr: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Build a `Fetch` error from any displayable transport failure.
    pub fn fetch(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a `DataShape` error.
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::DataShape(msg.into())
    }

    /// Build an `Io` error bound to `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Short machine-friendly label used in log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "fetch",
            Self::DataShape(_) => "data_shape",
            Self::Io { .. } => "io",
            Self::Server { .. } => "server",
        }
    }
}
