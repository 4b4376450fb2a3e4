//! Catalog and logo requests against the Geode index (`/v1/mods`).

use reqwest::Url;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::Upstream;
use super::client::build_http_client;
use crate::error::{Error, Result};
use crate::model::ModRecord;
use crate::settings::{FetchStrategy, UpstreamSettings};
use crate::util::{percent_encode, u64_of};

/// One decoded `/v1/mods` response.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    /// Total number of mods matching the filters (`payload.count`).
    pub count: u64,
    /// Mods on this page (`payload.data`).
    pub data: Vec<ModRecord>,
}

/// What: Decode a `/v1/mods` response body.
///
/// Inputs:
/// - `body`: Parsed JSON response.
///
/// Output:
/// - `CatalogPage` with the reported total and this page's records.
///
/// # Errors
/// - `DataShape` when `payload`, `payload.count` or `payload.data` is missing or
///   mistyped, or when an element does not decode as a mod.
pub fn parse_catalog_page(body: &Value) -> Result<CatalogPage> {
    let payload = body
        .get("payload")
        .ok_or_else(|| Error::shape("response has no payload object"))?;
    let Some(items) = payload.get("data").and_then(Value::as_array) else {
        return Err(Error::shape("payload.data is not an array"));
    };
    let count = u64_of(payload, &["count"])
        .ok_or_else(|| Error::shape("payload.count is missing or not a non-negative integer"))?;
    let data = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<ModRecord>(item.clone())
                .map_err(|e| Error::shape(format!("payload.data[{i}] is not a mod: {e}")))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CatalogPage { count, data })
}

/// What: Production [`Upstream`] backed by the Geode index HTTP API.
///
/// Details:
/// - Every catalog request carries the same fixed filters (`gd`, `geode`,
///   `platforms`, `sort`) from settings.
#[derive(Debug, Clone)]
pub struct GeodeIndex {
    /// Pooled HTTP client.
    client: reqwest::Client,
    /// Base URL, version pins, strategy, page size.
    settings: UpstreamSettings,
}

impl GeodeIndex {
    /// What: Create a client for the configured index.
    ///
    /// # Errors
    /// - `Fetch` if the HTTP client cannot be built.
    pub fn new(settings: UpstreamSettings) -> Result<Self> {
        let client = build_http_client(&settings)?;
        Ok(Self { client, settings })
    }

    /// Create a client around an existing `reqwest::Client`.
    #[must_use]
    pub const fn with_client(client: reqwest::Client, settings: UpstreamSettings) -> Self {
        Self { client, settings }
    }

    /// What: Build the `/v1/mods` URL for one page.
    ///
    /// # Errors
    /// - `Fetch` when the configured base URL does not parse.
    pub fn mods_url(&self, page: u64, per_page: u64) -> Result<Url> {
        let s = &self.settings;
        let base = format!("{}/v1/mods", s.api_base_url);
        let page = page.to_string();
        let per_page = per_page.to_string();
        Url::parse_with_params(
            &base,
            &[
                ("gd", s.gd_version.as_str()),
                ("geode", s.geode_version.as_str()),
                ("page", page.as_str()),
                ("per_page", per_page.as_str()),
                ("platforms", s.platform.as_str()),
                ("sort", s.sort.as_str()),
            ],
        )
        .map_err(|e| Error::fetch(base.clone(), format!("invalid base URL: {e}")))
    }

    /// URL of the logo for mod `id`.
    #[must_use]
    pub fn logo_url(&self, id: &str) -> String {
        format!(
            "{}/v1/mods/{}/logo",
            self.settings.api_base_url,
            percent_encode(id)
        )
    }

    /// What: GET a URL and return the body bytes of a 2xx response.
    ///
    /// # Errors
    /// - `Fetch` on transport failure, non-success status, or body read failure.
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, url, "upstream request failed");
            Error::fetch(url, e)
        })?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), url, "upstream returned error status");
            return Err(Error::fetch(url, format!("HTTP {status}")));
        }
        let body = response.bytes().await.map_err(|e| {
            warn!(error = %e, url, "failed to read upstream response body");
            Error::fetch(url, e)
        })?;
        Ok(body.to_vec())
    }

    /// What: Fetch and decode one catalog page.
    ///
    /// # Errors
    /// - `Fetch` for transport/status failures, `DataShape` for bad bodies.
    pub async fn get_page(&self, page: u64, per_page: u64) -> Result<CatalogPage> {
        let url = self.mods_url(page, per_page)?;
        let bytes = self.get_bytes(url.as_str()).await?;
        let body: Value = serde_json::from_slice(&bytes)
            .map_err(|e| Error::shape(format!("response from {url} is not JSON: {e}")))?;
        let parsed = parse_catalog_page(&body)?;
        debug!(
            page,
            per_page,
            count = parsed.count,
            received = parsed.data.len(),
            "fetched catalog page"
        );
        Ok(parsed)
    }

    /// Count request followed by a single request for everything.
    async fn fetch_bulk(&self) -> Result<Vec<ModRecord>> {
        let head = self.get_page(1, 1).await?;
        info!(total = head.count, "upstream reports mod total");
        if head.count == 0 {
            return Ok(Vec::new());
        }
        let full = self.get_page(1, head.count).await?;
        if len_u64(&full.data) < head.count {
            warn!(
                expected = head.count,
                received = full.data.len(),
                "bulk request returned fewer mods than reported"
            );
        }
        Ok(full.data)
    }

    /// What: Walk pages until the first page's reported total is reached.
    ///
    /// Details:
    /// - Records are accumulated locally; any failing page aborts the whole fetch.
    /// - An empty page stops the walk even if the total was not reached, so a
    ///   stale upstream count cannot loop forever.
    async fn fetch_paginated(&self) -> Result<Vec<ModRecord>> {
        let per_page = u64::from(self.settings.page_size);
        let first = self.get_page(1, per_page).await?;
        let total = first.count;
        info!(total, per_page, "upstream reports mod total");
        let mut mods = first.data;
        let mut page = 1;
        while len_u64(&mods) < total {
            page += 1;
            let next = self.get_page(page, per_page).await?;
            if next.data.is_empty() {
                warn!(
                    page,
                    fetched = mods.len(),
                    total,
                    "empty page before reaching reported total"
                );
                break;
            }
            mods.extend(next.data);
        }
        Ok(mods)
    }
}

/// Slice length as `u64` for comparison with upstream counts.
fn len_u64<T>(v: &[T]) -> u64 {
    u64::try_from(v.len()).unwrap_or(u64::MAX)
}

impl Upstream for GeodeIndex {
    async fn fetch_catalog(&self) -> Result<Vec<ModRecord>> {
        let strategy = self.settings.fetch_strategy;
        info!(strategy = strategy.as_config_key(), "fetching mods from upstream index");
        let mods = match strategy {
            FetchStrategy::Bulk => self.fetch_bulk().await?,
            FetchStrategy::Paginated => self.fetch_paginated().await?,
        };
        info!(count = mods.len(), "fetched upstream catalog");
        Ok(mods)
    }

    async fn fetch_logo(&self, id: &str) -> Result<Vec<u8>> {
        let url = self.logo_url(id);
        self.get_bytes(&url).await
    }
}
