use crate::error::{Result, WeatherPushError};
use crate::models::ForecastDocument;

use super::REQUEST_TIMEOUT;

const API_BASE_URL: &str = "https://www.jma.go.jp/bosai/forecast/data/forecast";
const SERVICE: &str = "jma weather";

/// Client for the JMA "bosai" forecast feed
pub struct JmaClient {
    client: reqwest::Client,
    base_url: String,
}

impl JmaClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(API_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(WeatherPushError::network(SERVICE))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch and decode the forecast document for a region code (e.g. `130000`).
    ///
    /// Fails with `EmptyResponse` when there is no block or the first block has
    /// no time series; everything else is returned as decoded.
    pub async fn fetch(&self, area_code: &str) -> Result<ForecastDocument> {
        let url = format!("{}/{}.json", self.base_url, area_code);
        tracing::debug!(%url, "fetching forecast");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(WeatherPushError::network(SERVICE))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherPushError::HttpStatus {
                service: SERVICE,
                code: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(WeatherPushError::network(SERVICE))?;
        let doc: ForecastDocument =
            serde_json::from_slice(&body).map_err(WeatherPushError::decode(SERVICE))?;

        if doc.is_empty() {
            return Err(WeatherPushError::EmptyResponse(SERVICE));
        }

        tracing::debug!(
            blocks = doc.blocks.len(),
            series = doc.short_term_series().len(),
            "decoded forecast"
        );
        Ok(doc)
    }
}
