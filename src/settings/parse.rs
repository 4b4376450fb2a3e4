use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, warn};

use super::types::{FetchStrategy, Settings};
use crate::util::config::{parse_bool, parse_key_value, skip_comment_or_empty};

/// Parse `val` into `slot`, keeping the current value and warning on failure.
fn set_parsed<T: FromStr>(slot: &mut T, key: &str, val: &str) {
    match val.parse::<T>() {
        Ok(v) => *slot = v,
        Err(_) => warn!(key, value = val, "invalid setting value; keeping default"),
    }
}

/// Same as [`set_parsed`] for second-granularity durations.
fn set_secs(slot: &mut Duration, key: &str, val: &str) {
    let mut secs = slot.as_secs();
    set_parsed(&mut secs, key, val);
    *slot = Duration::from_secs(secs);
}

/// What: Parse settings from `settings.conf` content.
///
/// Inputs:
/// - `content`: Content of the settings file as a string.
/// - `settings`: Mutable reference to `Settings` to populate.
///
/// Output:
/// - None (modifies `settings` in-place).
///
/// Details:
/// - Unknown keys are ignored (logged at debug) so old files keep working.
/// - Invalid values keep whatever was already in `settings`.
/// - A few aliases are accepted for convenience.
pub fn parse_settings(content: &str, settings: &mut Settings) {
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((key, val)) = parse_key_value(line) else {
            continue;
        };
        let val = val.as_str();
        let up = &mut settings.upstream;
        let sched = &mut settings.schedule;
        match key.as_str() {
            "port" | "listen_port" => set_parsed(&mut settings.port, &key, val),
            "data_root" | "root" | "public_dir" => settings.data_root = PathBuf::from(val),
            "log_dir" => {
                settings.log_dir = if val.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(val))
                };
            }
            "api_base_url" | "api_url" => up.api_base_url = val.to_string(),
            "gd_version" | "gd" => up.gd_version = val.to_string(),
            "geode_version" | "geode" => up.geode_version = val.to_string(),
            "platform" | "platforms" => up.platform = val.to_string(),
            "sort" => up.sort = val.to_string(),
            "fetch_strategy" | "strategy" => match FetchStrategy::from_config_key(val) {
                Some(s) => up.fetch_strategy = s,
                None => warn!(key = %key, value = val, "unknown fetch strategy; keeping default"),
            },
            "page_size" | "per_page" => set_parsed(&mut up.page_size, &key, val),
            "request_timeout_secs" => set_secs(&mut up.request_timeout, &key, val),
            "connect_timeout_secs" => set_secs(&mut up.connect_timeout, &key, val),
            "analytics_interval_secs" => set_secs(&mut sched.analytics_interval, &key, val),
            "logo_interval_secs" => set_secs(&mut sched.logo_interval, &key, val),
            "resync_interval_secs" => {
                let mut secs = sched.resync_interval.map_or(0, |d| d.as_secs());
                set_parsed(&mut secs, &key, val);
                sched.resync_interval = (secs > 0).then(|| Duration::from_secs(secs));
            }
            "align_to_wall_clock" => match parse_bool(val) {
                Some(b) => sched.align_to_wall_clock = b,
                None => warn!(key = %key, value = val, "invalid boolean; keeping default"),
            },
            "logo_concurrency" => set_parsed(&mut sched.logo_concurrency, &key, val),
            _ => debug!(key = %key, "ignoring unknown setting"),
        }
    }
}
