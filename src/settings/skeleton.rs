/// Commented `settings.conf` written by `--init-config`; every value is the built-in default.
pub const SETTINGS_SKELETON_CONTENT: &str = "# modmirror settings\n\
#\n\
# Format: key = value\n\
# Lines starting with # are comments. Environment variables (PORT,\n\
# MODMIRROR_DATA_ROOT, MODMIRROR_API_BASE_URL, MODMIRROR_LOG_DIR) and\n\
# command-line flags override values from this file.\n\
#\n\
# ---------- Server ----------\n\
port = 3000\n\
# Cached files are written under data/, analytics/ and logos/ inside this directory\n\
data_root = public\n\
# Leave empty to log to stderr\n\
log_dir =\n\
#\n\
# ---------- Upstream index ----------\n\
api_base_url = https://api.geode-sdk.org\n\
gd_version = 2.206\n\
geode_version = 3.4.0\n\
platform = android64\n\
sort = downloads\n\
# bulk: one count request + one full request; paginated: page_size records per request\n\
fetch_strategy = bulk\n\
page_size = 100\n\
request_timeout_secs = 30\n\
connect_timeout_secs = 15\n\
#\n\
# ---------- Schedule ----------\n\
analytics_interval_secs = 300\n\
logo_interval_secs = 3600\n\
# 0 disables the periodic full re-sync (the catalog is then fetched only at startup)\n\
resync_interval_secs = 0\n\
# Fire jobs on wall-clock multiples of their period (like */5 cron entries)\n\
align_to_wall_clock = true\n\
logo_concurrency = 1\n";
