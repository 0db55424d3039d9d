//! Data models for the forecast pipeline
//!
//! - Location: the user's query and state-level resolution results
//! - Zone: forecast zone descriptors from the zones directory
//! - Forecast: zone forecast documents and the pipeline outcome

pub mod forecast;
pub mod location;
pub mod zone;

pub use forecast::{ForecastDocument, ForecastOutcome, ForecastPeriod};
pub use location::{AmbiguitySignal, LocationQuery, StateCodeSet, StateResolution};
pub use zone::ZoneDescriptor;
