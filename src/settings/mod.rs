//! Runtime configuration: defaults, `settings.conf`, environment, and normalisation.
//!
//! Command-line overrides are applied by the caller (see `app::run`) after
//! [`load`] so that flags always win.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

mod parse;
mod paths;
mod skeleton;
mod types;

pub use parse::parse_settings;
pub use paths::{config_dir, resolve_settings_path};
pub use skeleton::SETTINGS_SKELETON_CONTENT;
pub use types::{FetchStrategy, ScheduleSettings, Settings, UpstreamSettings};

use crate::error::{Error, Result};

/// Environment variable overriding the listen port.
pub const ENV_PORT: &str = "PORT";
/// Environment variable overriding the data root.
pub const ENV_DATA_ROOT: &str = "MODMIRROR_DATA_ROOT";
/// Environment variable overriding the upstream base URL.
pub const ENV_API_BASE_URL: &str = "MODMIRROR_API_BASE_URL";
/// Environment variable overriding the log directory.
pub const ENV_LOG_DIR: &str = "MODMIRROR_LOG_DIR";

/// What: Load settings from the resolved settings file and the environment.
///
/// Inputs:
/// - `explicit`: Settings path from `--config`, if given.
///
/// Output:
/// - Normalised `Settings`; defaults when the file is missing.
///
/// Details:
/// - An unreadable (but existing) file is logged and treated as empty.
#[must_use]
pub fn load(explicit: Option<&Path>) -> Settings {
    let path = resolve_settings_path(explicit);
    let mut settings = Settings::default();
    match fs::read_to_string(&path) {
        Ok(content) => {
            parse_settings(&content, &mut settings);
            info!(path = %path.display(), "loaded settings file");
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no settings file; using defaults");
        }
        Err(e) => warn!(path = %path.display(), error = %e, "failed to read settings file"),
    }
    apply_env_overrides(&mut settings, |key| env::var(key).ok());
    normalize(&mut settings);
    settings
}

/// What: Overlay environment variables on top of file settings.
///
/// Inputs:
/// - `settings`: Settings to mutate.
/// - `lookup`: Variable lookup; `std::env::var` in production, a map in tests.
///
/// Details:
/// - Empty values are ignored; an unparsable `PORT` is logged and ignored.
pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    if let Some(port) = get(ENV_PORT) {
        match port.trim().parse::<u16>() {
            Ok(p) => settings.port = p,
            Err(e) => warn!(value = %port, error = %e, "ignoring invalid PORT"),
        }
    }
    if let Some(root) = get(ENV_DATA_ROOT) {
        settings.data_root = PathBuf::from(root);
    }
    if let Some(url) = get(ENV_API_BASE_URL) {
        settings.upstream.api_base_url = url.trim().to_string();
    }
    if let Some(dir) = get(ENV_LOG_DIR) {
        settings.log_dir = Some(PathBuf::from(dir));
    }
}

/// What: Clamp values that would make the service misbehave.
///
/// Details:
/// - Zero job intervals become one second (tokio intervals panic on zero).
/// - Zero request/connect timeouts become one second (reqwest would fail every request).
/// - `page_size` and `logo_concurrency` are at least 1.
/// - A trailing `/` on the base URL is dropped so paths join cleanly.
pub fn normalize(settings: &mut Settings) {
    let sched = &mut settings.schedule;
    for d in [&mut sched.analytics_interval, &mut sched.logo_interval] {
        if d.is_zero() {
            *d = Duration::from_secs(1);
        }
    }
    sched.logo_concurrency = sched.logo_concurrency.max(1);
    let up = &mut settings.upstream;
    for d in [&mut up.request_timeout, &mut up.connect_timeout] {
        if d.is_zero() {
            *d = Duration::from_secs(1);
        }
    }
    up.page_size = up.page_size.max(1);
    while up.api_base_url.ends_with('/') {
        up.api_base_url.pop();
    }
}

/// What: Write the commented default settings file if none exists yet.
///
/// Inputs:
/// - `path`: Destination file.
///
/// Output:
/// - `Ok(true)` when written, `Ok(false)` when a file was already there.
///
/// # Errors
/// - `Io` when the parent directory or the file cannot be created.
pub fn write_skeleton(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, SETTINGS_SKELETON_CONTENT).map_err(|e| Error::io(path, e))?;
    Ok(true)
}
