//! Error types and handling for `Zonecast`

use thiserror::Error;

/// Main error type for the forecast pipeline
///
/// Short-circuit outcomes (ambiguous location, no state found) are not errors;
/// they come back as [`crate::ForecastOutcome::Message`].
#[derive(Error, Debug)]
pub enum ZonecastError {
    /// weather.gov answered with a non-success status
    #[error("External service error ({status}): {message}")]
    ExternalService { status: u16, message: String },

    /// A response body did not match its required shape
    #[error("Schema validation error: {message}")]
    SchemaValidation { message: String },

    /// The zone picker output contained no candidate zone id
    #[error("Selection error: {message}")]
    Selection { message: String },

    /// A stage was called with input its contract forbids
    #[error("Precondition violated: {message}")]
    Precondition { message: String },

    /// The text generation capability failed
    #[error("Generation error: {message}")]
    Generation { message: String },

    /// Transport-level failure talking to an HTTP service
    #[error("Network error: {message}")]
    Network { message: String },

    /// The tool was invoked with unusable arguments
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl ZonecastError {
    pub fn external_service<S: Into<String>>(status: u16, message: S) -> Self {
        Self::ExternalService {
            status,
            message: message.into(),
        }
    }

    pub fn schema<S: Into<String>>(message: S) -> Self {
        Self::SchemaValidation {
            message: message.into(),
        }
    }

    pub fn selection<S: Into<String>>(message: S) -> Self {
        Self::Selection {
            message: message.into(),
        }
    }

    pub fn precondition<S: Into<String>>(message: S) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    pub fn generation<S: Into<String>>(message: S) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn invalid_arguments<S: Into<String>>(message: S) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a message suitable for relaying to the assistant's user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ZonecastError::ExternalService { .. } | ZonecastError::Network { .. } => {
                "The weather service could not be reached. Couldn't fetch weather.".to_string()
            }
            ZonecastError::SchemaValidation { .. } => {
                "The weather service returned unexpected data. Couldn't fetch weather.".to_string()
            }
            ZonecastError::Selection { .. } => {
                "No zone selected. Couldn't fetch weather.".to_string()
            }
            ZonecastError::Generation { .. } => {
                "The language model could not be reached. Couldn't fetch weather.".to_string()
            }
            ZonecastError::InvalidArguments { message } => format!("Invalid input: {message}"),
            ZonecastError::Precondition { message } | ZonecastError::Config { message } => {
                message.clone()
            }
        }
    }
}
