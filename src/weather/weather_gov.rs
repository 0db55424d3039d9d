//! api.weather.gov client for the zones directory and zone forecasts

use async_trait::async_trait;
use reqwest::{Client, Response, header};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use super::{ACCEPT_LD_JSON, ZoneDirectory};
use crate::config::WeatherConfig;
use crate::models::zone::ZoneCatalogResponse;
use crate::models::{ForecastDocument, StateCodeSet, ZoneDescriptor};
use crate::{Result, ZonecastError};

/// weather.gov API client
pub struct WeatherGovClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl WeatherGovClient {
    /// Create a new client with its own HTTP connection pool
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .build()
            .map_err(|e| ZonecastError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(client, config))
    }

    /// Create a client around an existing (shared) HTTP client
    #[must_use]
    pub fn with_client(client: Client, config: &WeatherConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
        }
    }

    fn zones_url(&self) -> String {
        format!("{}/zones", self.base_url)
    }

    fn forecast_url(&self, zone_id: &str) -> String {
        format!(
            "{}/zones/forecast/{}/forecast",
            self.base_url,
            urlencoding::encode(zone_id)
        )
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response> {
        let start_time = Instant::now();

        let response = request
            .header(header::ACCEPT, ACCEPT_LD_JSON)
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| ZonecastError::network(format!("weather.gov request failed: {e}")))?;

        let status = response.status();
        debug!(
            "HTTP response received: {} in {:.3}s",
            status,
            start_time.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown status");
            warn!("weather.gov returned {}", status);
            return Err(ZonecastError::external_service(status.as_u16(), reason));
        }

        Ok(response)
    }

    async fn parse_body<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        let body = response
            .text()
            .await
            .map_err(|e| ZonecastError::network(format!("Failed to read {what} body: {e}")))?;

        serde_json::from_str(&body)
            .map_err(|e| ZonecastError::schema(format!("Unexpected {what} response: {e}")))
    }
}

#[async_trait]
impl ZoneDirectory for WeatherGovClient {
    #[instrument(skip(self, states), fields(area = %states.to_area_param()))]
    async fn zones_in_states(&self, states: &StateCodeSet) -> Result<Vec<ZoneDescriptor>> {
        let area = states.to_area_param();
        let request = self.client.get(self.zones_url()).query(&[
            ("area", area.as_str()),
            ("type", "forecast"),
            ("include_geometry", "false"),
        ]);

        let response = self.send(request).await?;
        let catalog: ZoneCatalogResponse = Self::parse_body(response, "zones").await?;

        info!("Found {} forecast zones for {}", catalog.graph.len(), area);
        Ok(catalog.graph)
    }

    #[instrument(skip(self))]
    async fn zone_forecast(&self, zone_id: &str) -> Result<ForecastDocument> {
        let request = self.client.get(self.forecast_url(zone_id));

        let response = self.send(request).await?;
        let forecast: ForecastDocument = Self::parse_body(response, "forecast").await?;

        info!(
            "Retrieved forecast for {} with {} periods",
            zone_id,
            forecast.periods.len()
        );
        Ok(forecast)
    }
}
