use crate::config::YahooConfig;
use crate::error::{Result, WeatherPushError};
use serde::Deserialize;

use super::REQUEST_TIMEOUT;

const API_BASE_URL: &str = "https://map.yahooapis.jp/weather/V1/place";
const SERVICE: &str = "yahoo weather";

/// Current observation plus the next hour at 10 minute steps.
pub const MAX_ITEMS: usize = 7;

/// Client for the Yahoo! JAPAN weather "place" API (rainfall by coordinates)
pub struct YahooClient {
    client: reqwest::Client,
    base_url: String,
    config: YahooConfig,
}

// Yahoo API response structures
#[derive(Debug, Deserialize)]
struct YahooResponse {
    #[serde(rename = "Feature", default)]
    feature: Vec<YahooFeature>,
}

#[derive(Debug, Deserialize)]
struct YahooFeature {
    #[serde(rename = "Property")]
    property: YahooProperty,
}

#[derive(Debug, Deserialize)]
struct YahooProperty {
    #[serde(rename = "WeatherList")]
    weather_list: YahooWeatherList,
}

#[derive(Debug, Deserialize)]
struct YahooWeatherList {
    #[serde(rename = "Weather", default)]
    weather: Vec<PlaceWeather>,
}

/// One observation or forecast point
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaceWeather {
    /// `observation` or `forecast`
    #[serde(rename = "Type")]
    pub kind: String,
    /// Local time as `YYYYMMDDHHMM`
    #[serde(rename = "Date")]
    pub date: String,
}

impl PlaceWeather {
    /// `MM/DD HH:MM (<type>)`; dates in an unexpected shape pass through.
    pub fn render(&self) -> String {
        let d = &self.date;
        let pretty = if d.len() == 12 && d.bytes().all(|b| b.is_ascii_digit()) {
            format!("{}/{} {}:{}", &d[4..6], &d[6..8], &d[8..10], &d[10..12])
        } else {
            d.clone()
        };
        format!("{} ({})", pretty, self.kind)
    }
}

impl YahooClient {
    pub fn new(config: YahooConfig) -> Result<Self> {
        Self::with_base_url(config, API_BASE_URL)
    }

    pub fn with_base_url(config: YahooConfig, base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(WeatherPushError::network(SERVICE))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            config,
        })
    }

    /// Fetch up to [`MAX_ITEMS`] rendered lines for the configured coordinates.
    pub async fn fetch(&self) -> Result<Vec<String>> {
        // The API expects longitude first.
        let coordinates = format!("{},{}", self.config.longitude, self.config.latitude);
        tracing::debug!(url = %self.base_url, %coordinates, "fetching place weather");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("coordinates", coordinates.as_str()),
                ("appid", self.config.app_id.as_str()),
                ("output", "json"),
            ])
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
        let parsed: YahooResponse =
            serde_json::from_slice(&body).map_err(WeatherPushError::decode(SERVICE))?;

        let list = parsed
            .feature
            .into_iter()
            .next()
            .map(|f| f.property.weather_list.weather)
            .unwrap_or_default();
        if list.is_empty() {
            return Err(WeatherPushError::EmptyResponse(SERVICE));
        }

        Ok(list.iter().take(MAX_ITEMS).map(PlaceWeather::render).collect())
    }
}
