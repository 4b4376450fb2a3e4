use std::env;
use std::path::{Path, PathBuf};

/// Application directory name under the XDG config base.
const APP_DIR: &str = "modmirror";
/// Settings file name inside the application directory.
const SETTINGS_FILE: &str = "settings.conf";

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// Config directory for the mirror: `$XDG_CONFIG_HOME/modmirror` or `$HOME/.config/modmirror`.
///
/// Not created here; only `--init-config` writes into it.
#[must_use]
pub fn config_dir() -> PathBuf {
    xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join(APP_DIR)
}

/// What: Determine which settings file to read.
///
/// Inputs:
/// - `explicit`: Path given on the command line, if any.
///
/// Output:
/// - The explicit path when given; otherwise `<config_dir>/settings.conf`.
///
/// Details:
/// - The returned path may not exist; a missing file means "defaults only".
#[must_use]
pub fn resolve_settings_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(|| config_dir().join(SETTINGS_FILE), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    /// What: An explicit path wins over the XDG location.
    #[test]
    fn explicit_settings_path_is_used_verbatim() {
        let p = std::path::Path::new("/etc/modmirror/custom.conf");
        assert_eq!(super::resolve_settings_path(Some(p)), p.to_path_buf());
        let default = super::resolve_settings_path(None);
        assert!(default.ends_with("modmirror/settings.conf"));
    }
}
