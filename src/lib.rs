//! `Zonecast` - U.S. location to weather.gov zone forecast resolution
//!
//! This library provides the `getForecast` capability for conversational
//! assistants: a free-text location is narrowed to U.S. states and a forecast
//! zone with the help of a text generator, and the zone's text forecast is
//! fetched from api.weather.gov.

pub mod config;
pub mod error;
pub mod generation;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod tool;
pub mod weather;
pub mod zone_picker;

// Re-export core types for public API
pub use config::ZonecastConfig;
pub use error::ZonecastError;
pub use generation::{OpenAiCompatibleGenerator, TextGenerator};
pub use location_resolver::StateCodeResolver;
pub use models::{
    AmbiguitySignal, ForecastDocument, ForecastOutcome, ForecastPeriod, LocationQuery,
    StateCodeSet, StateResolution, ZoneDescriptor,
};
pub use pipeline::ForecastPipeline;
pub use tool::{ForecastTool, ToolDefinition};
pub use weather::{WeatherGovClient, ZoneDirectory};
pub use zone_picker::ZonePicker;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ZonecastError>;
