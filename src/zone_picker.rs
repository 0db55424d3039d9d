//! Zone selection
//!
//! Lists the candidate zones to the text generator and maps its free-text
//! answer back onto exactly one candidate.

use tracing::{debug, info, warn};

use crate::generation::TextGenerator;
use crate::models::{LocationQuery, ZoneDescriptor};
use crate::{Result, ZonecastError};

/// Build the prompt asking the model to choose one zone id
#[must_use]
pub fn zone_pick_prompt(location: &LocationQuery, candidates: &[ZoneDescriptor]) -> String {
    let listing = candidates
        .iter()
        .map(ZoneDescriptor::prompt_line)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an AI assistant that assists with narrowing down general locations described by a user.
Below you will be given some user-provided text describing a location for a weather forecast as well as some identified forecast zones that are likely candidates. You are tasked with selecting the zone ID the user is most likely requesting a forecast for.

The user requested a forecast for "{location}".
The zones identified as likely candidates are listed below in the following format: "ZONEID: Name". Respond with only the zone ID of the most likely requested zone exactly as provided.
{listing}
"#
    )
}

/// Find the chosen candidate in the model's answer.
///
/// Candidates are scanned in catalog order and the first one whose id occurs
/// anywhere in `response` wins, even if another id appears earlier in the text.
pub fn select_zone<'a>(
    candidates: &'a [ZoneDescriptor],
    response: &str,
) -> Result<&'a ZoneDescriptor> {
    candidates
        .iter()
        .find(|zone| response.contains(zone.id.as_str()))
        .ok_or_else(|| {
            ZonecastError::selection("No zone selected. Couldn't fetch weather")
        })
}

/// Service for picking one forecast zone out of a candidate list
pub struct ZonePicker;

impl ZonePicker {
    /// Ask the generator to choose among `candidates` and return the chosen id.
    ///
    /// `candidates` must not be empty; an empty list fails before any
    /// generation request is made.
    pub async fn pick(
        generator: &dyn TextGenerator,
        location: &LocationQuery,
        candidates: &[ZoneDescriptor],
    ) -> Result<String> {
        if candidates.is_empty() {
            return Err(ZonecastError::precondition(
                "Zone picker requires at least one candidate zone",
            ));
        }

        let prompt = zone_pick_prompt(location, candidates);
        debug!("Zone pick prompt: {}", prompt);

        let text = generator.generate(&prompt).await?;
        debug!("Zone pick response: {:?}", text);

        match select_zone(candidates, &text) {
            Ok(zone) => {
                info!("Selected zone {} ({}) for '{}'", zone.id, zone.name, location);
                Ok(zone.id.clone())
            }
            Err(e) => {
                warn!(
                    "Zone pick response matched none of {} candidates",
                    candidates.len()
                );
                Err(e)
            }
        }
    }
}
