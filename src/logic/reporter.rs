use crate::config::ForecastTarget;
use crate::datasources::JmaClient;
use crate::error::Result;
use crate::logic::compose::compose_report;
use chrono::{DateTime, FixedOffset};

/// Fetches the forecast for one target and turns it into the message text.
pub struct ForecastReporter {
    client: JmaClient,
    target: ForecastTarget,
}

impl ForecastReporter {
    pub fn new(client: JmaClient, target: ForecastTarget) -> Self {
        Self { client, target }
    }

    pub async fn report(&self, now: &DateTime<FixedOffset>) -> Result<String> {
        let doc = self.client.fetch(&self.target.area_code).await?;
        let message = compose_report(&doc, &self.target, now);
        tracing::info!(
            area_code = %self.target.area_code,
            region = %self.target.region_name,
            "report composed"
        );
        Ok(message)
    }
}
