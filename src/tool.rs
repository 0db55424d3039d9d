//! `getForecast` tool registration for hosting chat frameworks

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use crate::pipeline::ForecastPipeline;
use crate::{Result, ZonecastError};

pub const TOOL_NAME: &str = "getForecast";

pub const TOOL_DESCRIPTION: &str = "get a text-based forecast for a given location. Only supports locations in the United States. If the query is ambiguous, this tool may request clarification. In that case, do not immediately call it again, ask the user to clarify the location and try again with more information";

/// Declarative description a host hands to the model
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

#[derive(Debug, Deserialize)]
struct ForecastArgs {
    location: String,
}

/// The `getForecast` tool: definition plus JSON invocation
#[derive(Clone)]
pub struct ForecastTool {
    pipeline: ForecastPipeline,
}

impl ForecastTool {
    #[must_use]
    pub fn new(pipeline: ForecastPipeline) -> Self {
        Self { pipeline }
    }

    #[must_use]
    pub fn definition() -> ToolDefinition {
        ToolDefinition {
            name: TOOL_NAME,
            description: TOOL_DESCRIPTION,
            parameters: json!({
                "type": "object",
                "properties": {
                    "location": {
                        "type": "string",
                        "description": "Free-text U.S. location, e.g. \"Kansas City\" or \"southern Florida\""
                    }
                },
                "required": ["location"],
                "additionalProperties": false
            }),
        }
    }

    /// Run the tool with model-supplied JSON arguments.
    ///
    /// Returns a JSON string for short-circuits or the forecast object.
    pub async fn invoke(&self, arguments: Value) -> Result<Value> {
        let args: ForecastArgs = serde_json::from_value(arguments)
            .map_err(|e| ZonecastError::invalid_arguments(format!("{TOOL_NAME}: {e}")))?;

        info!("{} called for location '{}'", TOOL_NAME, args.location);

        let outcome = self.pipeline.get_forecast(&args.location).await?;
        serde_json::to_value(&outcome)
            .map_err(|e| ZonecastError::schema(format!("Failed to serialize outcome: {e}")))
    }
}
