//! Location query and state-level resolution results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw, user-supplied description of where a forecast is wanted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationQuery(String);

impl LocationQuery {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LocationQuery {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LocationQuery {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deduplicated, uppercase two-letter state codes in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StateCodeSet {
    codes: Vec<String>,
}

impl StateCodeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a code, normalized to trimmed uppercase. Returns `false` for
    /// duplicates and blank tokens.
    pub fn insert(&mut self, code: &str) -> bool {
        let code = code.trim().to_uppercase();
        if code.is_empty() || self.codes.contains(&code) {
            return false;
        }
        self.codes.push(code);
        true
    }

    /// Merge another set into this one, keeping this set's order first
    pub fn union(mut self, other: StateCodeSet) -> Self {
        for code in other.codes {
            self.insert(&code);
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    /// Comma-joined form used for the zones `area` parameter
    #[must_use]
    pub fn to_area_param(&self) -> String {
        self.codes.join(",")
    }
}

impl<'a> FromIterator<&'a str> for StateCodeSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for code in iter {
            set.insert(code);
        }
        set
    }
}

/// Why a location could not be narrowed to states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbiguitySignal {
    /// The model asked for clarification
    Clarify,
    /// No state codes could be extracted
    NotFound,
}

/// Outcome of the state-level resolution stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateResolution {
    /// At least one state code was found
    Resolved(StateCodeSet),
    /// Resolution stopped early; the caller should short-circuit
    Unresolved(AmbiguitySignal),
}
