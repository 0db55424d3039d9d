//! Zone forecast document and the pipeline's outcome type

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Text forecast for one zone, kept exactly as weather.gov returned it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDocument {
    /// Issue time, passed through as the source string
    #[serde(rename = "updated")]
    pub updated_at: String,
    /// Periods in source order
    pub periods: Vec<ForecastPeriod>,
}

/// One named forecast period ("Tonight", "Saturday", ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPeriod {
    pub number: i64,
    pub name: String,
    #[serde(rename = "detailedForecast")]
    pub detailed_forecast: String,
}

impl Display for ForecastDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Updated: {}", self.updated_at)?;
        for period in &self.periods {
            writeln!(f)?;
            writeln!(f, "{}", period.name)?;
            writeln!(f, "   {}", period.detailed_forecast)?;
        }
        Ok(())
    }
}

/// Result of one `getForecast` invocation
///
/// Serializes untagged: a host sees either a plain JSON string or the
/// forecast object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ForecastOutcome {
    /// Clarification or not-found short-circuit
    Message(String),
    Forecast(ForecastDocument),
}

impl ForecastOutcome {
    #[must_use]
    pub fn as_forecast(&self) -> Option<&ForecastDocument> {
        match self {
            ForecastOutcome::Forecast(doc) => Some(doc),
            ForecastOutcome::Message(_) => None,
        }
    }

    #[must_use]
    pub fn as_message(&self) -> Option<&str> {
        match self {
            ForecastOutcome::Message(text) => Some(text),
            ForecastOutcome::Forecast(_) => None,
        }
    }
}
