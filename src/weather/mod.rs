//! Weather service access
//!
//! [`ZoneDirectory`] is the seam the pipeline talks to; [`WeatherGovClient`]
//! is the api.weather.gov implementation.

use async_trait::async_trait;

use crate::Result;
use crate::models::{ForecastDocument, StateCodeSet, ZoneDescriptor};

pub mod weather_gov;

pub use weather_gov::WeatherGovClient;

/// `Accept` header sent with every weather.gov request
pub const ACCEPT_LD_JSON: &str = "application/ld+json";

/// Read-only access to forecast zones and their text forecasts
#[async_trait]
pub trait ZoneDirectory: Send + Sync {
    /// Forecast zones covering the given states, in the order the service
    /// lists them. An empty list is not an error.
    async fn zones_in_states(&self, states: &StateCodeSet) -> Result<Vec<ZoneDescriptor>>;

    /// Text forecast for one zone id, returned verbatim
    async fn zone_forecast(&self, zone_id: &str) -> Result<ForecastDocument>;
}
