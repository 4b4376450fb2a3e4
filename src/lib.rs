//! Library entry for modmirror exposing the mirror components for integration tests.

pub mod app;
pub mod args;
pub mod catalog;
pub mod error;
pub mod model;
pub mod persist;
pub mod server;
pub mod settings;
pub mod sources;
pub mod sync;
pub mod util;

pub use error::{Error, Result};
