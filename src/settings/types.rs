use std::path::PathBuf;
use std::time::Duration;

/// What: How the upstream catalog is retrieved.
///
/// Details:
/// - `Bulk` asks for the total with `per_page=1`, then asks for everything at once.
/// - `Paginated` walks fixed-size pages until the reported total is reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Two requests: count request, then the full list.
    #[default]
    Bulk,
    /// One request per `page_size` records.
    Paginated,
}

impl FetchStrategy {
    /// Parse a config value (`bulk` / `paginated`, with a few aliases).
    #[must_use]
    pub fn from_config_key(val: &str) -> Option<Self> {
        match val.trim().to_ascii_lowercase().as_str() {
            "bulk" | "all" | "all_at_once" => Some(Self::Bulk),
            "paginated" | "pages" | "paged" => Some(Self::Paginated),
            _ => None,
        }
    }

    /// Canonical config spelling.
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::Bulk => "bulk",
            Self::Paginated => "paginated",
        }
    }
}

/// Fixed request parameters and transport knobs for the upstream index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamSettings {
    /// Base URL without trailing slash, e.g. `https://api.geode-sdk.org`.
    pub api_base_url: String,
    /// Game version pin (`gd` query parameter).
    pub gd_version: String,
    /// Loader version pin (`geode` query parameter).
    pub geode_version: String,
    /// Target platform (`platforms` query parameter).
    pub platform: String,
    /// Sort order (`sort` query parameter).
    pub sort: String,
    /// Catalog retrieval strategy.
    pub fetch_strategy: FetchStrategy,
    /// Page size for the paginated strategy.
    pub page_size: u32,
    /// Whole-request timeout.
    pub request_timeout: Duration,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.geode-sdk.org".to_string(),
            gd_version: "2.206".to_string(),
            geode_version: "3.4.0".to_string(),
            platform: "android64".to_string(),
            sort: "downloads".to_string(),
            fetch_strategy: FetchStrategy::Bulk,
            page_size: 100,
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(15),
        }
    }
}

/// Timer configuration for the three scheduled jobs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleSettings {
    /// Period of the download-count logger.
    pub analytics_interval: Duration,
    /// Period of the logo refresher.
    pub logo_interval: Duration,
    /// Period of the optional full re-sync; `None` disables it.
    pub resync_interval: Option<Duration>,
    /// Fire on wall-clock multiples of the period instead of relative to start.
    pub align_to_wall_clock: bool,
    /// Maximum number of logo downloads in flight.
    pub logo_concurrency: usize,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            analytics_interval: Duration::from_secs(300),
            logo_interval: Duration::from_secs(3600),
            resync_interval: None,
            align_to_wall_clock: true,
            logo_concurrency: 1,
        }
    }
}

/// What: Full runtime configuration for the mirror.
///
/// Details:
/// - Built from defaults, then `settings.conf`, then environment, then CLI flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// HTTP listen port.
    pub port: u16,
    /// Root under which `data/`, `analytics/` and `logos/` live.
    pub data_root: PathBuf,
    /// Directory for rolling log files; stderr when unset.
    pub log_dir: Option<PathBuf>,
    /// Upstream request configuration.
    pub upstream: UpstreamSettings,
    /// Job timers.
    pub schedule: ScheduleSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: 3000,
            data_root: PathBuf::from("public"),
            log_dir: None,
            upstream: UpstreamSettings::default(),
            schedule: ScheduleSettings::default(),
        }
    }
}
