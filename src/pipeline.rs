//! Location-to-forecast pipeline
//!
//! Sequences the stages for one `getForecast` call:
//! state resolution → zone catalog → zone pick → zone forecast.
//! Every call starts from scratch; nothing is kept between calls.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::Result;
use crate::config::ZonecastConfig;
use crate::generation::{OpenAiCompatibleGenerator, TextGenerator};
use crate::location_resolver::StateCodeResolver;
use crate::models::{AmbiguitySignal, ForecastOutcome, LocationQuery, StateResolution};
use crate::weather::{WeatherGovClient, ZoneDirectory};
use crate::zone_picker::ZonePicker;

/// Returned when the model flags the location as ambiguous
pub const CLARIFY_MESSAGE: &str =
    "Too many location options available. Please clarify location with user.";

/// Returned when no state code could be extracted
pub const NOT_FOUND_MESSAGE: &str = "No state found for location. Couldn't fetch weather.";

/// Returned when the extracted states have no forecast zones
pub const NO_ZONES_MESSAGE: &str = "No forecast zones found for location. Couldn't fetch weather.";

/// Stage the pipeline is in, used for tracing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolving,
    FetchingZones,
    PickingZone,
    FetchingForecast,
    Done,
}

/// The exposed forecast operation with its injected collaborators
#[derive(Clone)]
pub struct ForecastPipeline {
    generator: Arc<dyn TextGenerator>,
    directory: Arc<dyn ZoneDirectory>,
}

impl ForecastPipeline {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, directory: Arc<dyn ZoneDirectory>) -> Self {
        Self {
            generator,
            directory,
        }
    }

    /// Wire up the production clients from configuration
    pub fn from_config(config: &ZonecastConfig) -> Result<Self> {
        let generator = OpenAiCompatibleGenerator::new(&config.generation)?;
        let directory = WeatherGovClient::new(&config.weather)?;
        Ok(Self::new(Arc::new(generator), Arc::new(directory)))
    }

    /// Resolve `location` to a forecast zone and fetch its text forecast.
    ///
    /// Ambiguous or unplaceable locations return [`ForecastOutcome::Message`];
    /// every stage failure is returned as-is without retrying.
    #[instrument(skip(self), fields(location = %location))]
    pub async fn get_forecast(&self, location: &str) -> Result<ForecastOutcome> {
        let query = LocationQuery::from(location);

        enter(Stage::Resolving);
        let states =
            match StateCodeResolver::resolve(self.generator.as_ref(), &query).await? {
                StateResolution::Resolved(states) => states,
                StateResolution::Unresolved(AmbiguitySignal::Clarify) => {
                    enter(Stage::Done);
                    return Ok(ForecastOutcome::Message(CLARIFY_MESSAGE.to_string()));
                }
                StateResolution::Unresolved(AmbiguitySignal::NotFound) => {
                    enter(Stage::Done);
                    return Ok(ForecastOutcome::Message(NOT_FOUND_MESSAGE.to_string()));
                }
            };

        enter(Stage::FetchingZones);
        let zones = self.directory.zones_in_states(&states).await?;
        if zones.is_empty() {
            info!("No zones listed for {}", states.to_area_param());
            enter(Stage::Done);
            return Ok(ForecastOutcome::Message(NO_ZONES_MESSAGE.to_string()));
        }

        enter(Stage::PickingZone);
        let zone_id = ZonePicker::pick(self.generator.as_ref(), &query, &zones).await?;

        enter(Stage::FetchingForecast);
        let forecast = self.directory.zone_forecast(&zone_id).await?;

        enter(Stage::Done);
        Ok(ForecastOutcome::Forecast(forecast))
    }
}

fn enter(stage: Stage) {
    tracing::debug!(?stage, "Pipeline stage");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ZonecastError;
    use crate::models::{ForecastDocument, ForecastPeriod, StateCodeSet, ZoneDescriptor};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays canned responses in order and records prompts
    struct ScriptedGenerator {
        responses: Mutex<Vec<&'static str>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(responses: &[&'static str]) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.iter().rev().copied().collect()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompt_count(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop()
                .map(str::to_string)
                .ok_or_else(|| ZonecastError::generation("script exhausted"))
        }
    }

    #[derive(Default)]
    struct StubDirectory {
        zones: Vec<ZoneDescriptor>,
        fail_forecast: bool,
        requested_areas: Mutex<Vec<String>>,
        requested_zones: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ZoneDirectory for StubDirectory {
        async fn zones_in_states(&self, states: &StateCodeSet) -> Result<Vec<ZoneDescriptor>> {
            self.requested_areas
                .lock()
                .unwrap()
                .push(states.to_area_param());
            Ok(self.zones.clone())
        }

        async fn zone_forecast(&self, zone_id: &str) -> Result<ForecastDocument> {
            self.requested_zones.lock().unwrap().push(zone_id.to_string());
            if self.fail_forecast {
                return Err(ZonecastError::external_service(500, "Internal Server Error"));
            }
            Ok(ForecastDocument {
                updated_at: "2024-05-01T14:02:00+00:00".to_string(),
                periods: vec![ForecastPeriod {
                    number: 1,
                    name: "Tonight".to_string(),
                    detailed_forecast: "Clear.".to_string(),
                }],
            })
        }
    }

    fn directory_with_zones() -> Arc<StubDirectory> {
        Arc::new(StubDirectory {
            zones: vec![
                ZoneDescriptor::new("MOZ028", "Jackson"),
                ZoneDescriptor::new("KSZ105", "Johnson"),
            ],
            ..StubDirectory::default()
        })
    }

    #[tokio::test]
    async fn test_clarify_short_circuits() {
        let generator = ScriptedGenerator::new(&["Clarify"]);
        let directory = directory_with_zones();
        let pipeline = ForecastPipeline::new(generator.clone(), directory.clone());

        let outcome = pipeline.get_forecast("Springfield").await.unwrap();

        assert_eq!(outcome.as_message(), Some(CLARIFY_MESSAGE));
        assert_eq!(generator.prompt_count(), 1);
        assert!(directory.requested_areas.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_not_found_short_circuits() {
        let generator = ScriptedGenerator::new(&["Not in the U.S."]);
        let directory = directory_with_zones();
        let pipeline = ForecastPipeline::new(generator.clone(), directory.clone());

        let outcome = pipeline.get_forecast("London").await.unwrap();

        assert_eq!(outcome.as_message(), Some(NOT_FOUND_MESSAGE));
        assert!(directory.requested_areas.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_zones_skips_picker() {
        let generator = ScriptedGenerator::new(&["so, it"]);
        let directory = Arc::new(StubDirectory::default());
        let pipeline = ForecastPipeline::new(generator.clone(), directory.clone());

        let outcome = pipeline.get_forecast("somewhere odd").await.unwrap();

        assert_eq!(outcome.as_message(), Some(NO_ZONES_MESSAGE));
        assert_eq!(generator.prompt_count(), 1);
        assert_eq!(*directory.requested_areas.lock().unwrap(), vec!["SO,IT"]);
    }

    #[tokio::test]
    async fn test_selection_error_propagates() {
        let generator = ScriptedGenerator::new(&["MO,KS", "neither seems right"]);
        let directory = directory_with_zones();
        let pipeline = ForecastPipeline::new(generator, directory.clone());

        let err = pipeline.get_forecast("Kansas City").await.unwrap_err();

        assert!(matches!(err, ZonecastError::Selection { .. }));
        assert!(directory.requested_zones.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_forecast_error_propagates_unmodified() {
        let generator = ScriptedGenerator::new(&["MO,KS", "KSZ105"]);
        let directory = Arc::new(StubDirectory {
            zones: vec![ZoneDescriptor::new("KSZ105", "Johnson")],
            fail_forecast: true,
            ..StubDirectory::default()
        });
        let pipeline = ForecastPipeline::new(generator, directory);

        let err = pipeline.get_forecast("Overland Park").await.unwrap_err();

        assert!(matches!(
            err,
            ZonecastError::ExternalService { status: 500, .. }
        ));
    }

    #[tokio::test]
    async fn test_generation_error_propagates() {
        let generator = ScriptedGenerator::new(&[]);
        let pipeline = ForecastPipeline::new(generator, directory_with_zones());

        let err = pipeline.get_forecast("Kansas City").await.unwrap_err();

        assert!(matches!(err, ZonecastError::Generation { .. }));
    }

    #[tokio::test]
    async fn test_retry_starts_from_scratch() {
        let generator = ScriptedGenerator::new(&["Clarify", "MO", "MOZ028"]);
        let directory = directory_with_zones();
        let pipeline = ForecastPipeline::new(generator.clone(), directory.clone());

        let first = pipeline.get_forecast("Springfield").await.unwrap();
        assert!(first.as_message().is_some());

        let second = pipeline.get_forecast("Springfield, Missouri").await.unwrap();
        assert!(second.as_forecast().is_some());
        assert_eq!(generator.prompt_count(), 3);
        assert_eq!(*directory.requested_areas.lock().unwrap(), vec!["MO"]);
        assert_eq!(*directory.requested_zones.lock().unwrap(), vec!["MOZ028"]);
    }
}
