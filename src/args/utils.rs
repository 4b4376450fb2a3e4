//! Shared utilities for argument processing.

use super::Args;
use crate::settings::Settings;

/// What: Determine the log level based on command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level directive (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `log_level`.
#[must_use]
pub fn determine_log_level(args: &Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Apply command-line overrides on top of file and environment settings.
///
/// Details:
/// - Only flags that were given replace a value; flags win over everything else.
pub fn apply_cli_overrides(settings: &mut Settings, args: &Args) {
    if let Some(port) = args.port {
        settings.port = port;
    }
    if let Some(root) = &args.data_root {
        settings.data_root.clone_from(root);
    }
    if let Some(dir) = &args.log_dir {
        settings.log_dir = Some(dir.clone());
    }
}
