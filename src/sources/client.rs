use crate::error::{Error, Result};
use crate::settings::UpstreamSettings;

/// What: Build the HTTP client shared by all upstream requests.
///
/// Inputs:
/// - `settings`: Upstream settings carrying connect and request timeouts.
///
/// Output:
/// - A pooled `reqwest::Client`.
///
/// # Errors
/// - `Fetch` if the TLS backend cannot be initialised.
///
/// Details:
/// - The user agent identifies the mirror and its version to the index operators.
/// - Timeouts keep a hung request from stalling a job forever.
pub fn build_http_client(settings: &UpstreamSettings) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .user_agent(format!("modmirror/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Error::fetch(&settings.api_base_url, e))
}
