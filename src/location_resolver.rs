//! State-level location resolution
//!
//! Asks the text generator which U.S. state(s) a free-text location is in and
//! turns its unstructured answer into a [`StateCodeSet`] or an
//! [`AmbiguitySignal`].

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::Result;
use crate::generation::TextGenerator;
use crate::models::{AmbiguitySignal, LocationQuery, StateCodeSet, StateResolution};

/// Uppercase two-letter codes, comma separated: `MO,KS`, `MO, KS`, `FL`
static STRICT_CODES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:[A-Z]{2}, ?)*[A-Z]{2}").expect("valid regex"));

/// Any comma-separated run of two-character word tokens, any case
static LENIENT_CODES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:[A-Za-z0-9_]{2}, ?)+[A-Za-z0-9_]{2}").expect("valid regex")
});

/// Result of a single extraction pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Matched(StateCodeSet),
    Empty,
}

impl Extraction {
    fn from_match(matched: Option<regex::Match<'_>>) -> Self {
        let set: StateCodeSet = matched
            .map(|m| m.as_str().split(',').collect())
            .unwrap_or_default();

        if set.is_empty() {
            Extraction::Empty
        } else {
            Extraction::Matched(set)
        }
    }

    fn into_set(self) -> StateCodeSet {
        match self {
            Extraction::Matched(set) => set,
            Extraction::Empty => StateCodeSet::new(),
        }
    }
}

/// Strict pass: the first well-formed uppercase code list in the text
#[must_use]
pub fn strict_pass(text: &str) -> Extraction {
    Extraction::from_match(STRICT_CODES.find(text))
}

/// Lenient pass: the first comma-separated two-letter run, case-insensitive
#[must_use]
pub fn lenient_pass(text: &str) -> Extraction {
    Extraction::from_match(LENIENT_CODES.find(text))
}

/// Interpret the model's answer to the state prompt.
///
/// A leading "clarify" wins over anything else in the text. Otherwise both
/// passes run and their codes are unioned; an empty union means not found.
#[must_use]
pub fn interpret_state_response(text: &str) -> StateResolution {
    if text.to_lowercase().starts_with("clarify") {
        return StateResolution::Unresolved(AmbiguitySignal::Clarify);
    }

    let codes = strict_pass(text).into_set().union(lenient_pass(text).into_set());

    if codes.is_empty() {
        StateResolution::Unresolved(AmbiguitySignal::NotFound)
    } else {
        StateResolution::Resolved(codes)
    }
}

/// Build the instruction prompt for the state-narrowing request
#[must_use]
pub fn state_code_prompt(location: &LocationQuery) -> String {
    format!(
        r#"You are an AI assistant that assists with narrowing down general locations described by a user.
Below you will be given some user-provided text describing a location for a weather forecast and are tasked with identifying U.S. state (or multiple nearest states) that location is most likely in.
If the location is not in the U.S. (for example, "London"), respond only with the text "Not in the U.S."
If the location is actually in the U.S. (for example, "Kansas City" or "southern Florida"), return a comma-separated list of capitalized two-letter state abbreviations with no spaces, such as "MO,KS" or "FL".
If you believe the query needs clarification (for example, there are many cities named "Springfield"), respond with the text "Clarify" to request clarification on the location.
Do not include quotation marks like in the above examples, return the text plain. Do not include any extra text in your response besides what is asked of you above.

User location query: "{location}""#
    )
}

/// Service for narrowing a location query to U.S. state codes
pub struct StateCodeResolver;

impl StateCodeResolver {
    /// Ask the generator for state codes and interpret the answer
    pub async fn resolve(
        generator: &dyn TextGenerator,
        location: &LocationQuery,
    ) -> Result<StateResolution> {
        let prompt = state_code_prompt(location);
        debug!("State code prompt: {}", prompt);

        let text = generator.generate(&prompt).await?;
        debug!("State code response: {:?}", text);

        let resolution = interpret_state_response(&text);
        match &resolution {
            StateResolution::Resolved(codes) => {
                info!("Resolved '{}' to states {}", location, codes.to_area_param());
            }
            StateResolution::Unresolved(signal) => {
                info!("Could not resolve '{}' to states: {:?}", location, signal);
            }
        }

        Ok(resolution)
    }
}
