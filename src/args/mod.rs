//! Command-line argument processing.

pub mod definition;
pub mod utils;

pub use definition::Args;
pub use utils::{apply_cli_overrides, determine_log_level};
