//! Forecast zone descriptors as listed by the weather.gov zones directory

use serde::{Deserialize, Serialize};

/// One forecast zone: an opaque id owned by weather.gov plus its display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDescriptor {
    pub id: String,
    pub name: String,
}

impl ZoneDescriptor {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Line used when listing candidates in the picker prompt
    #[must_use]
    pub fn prompt_line(&self) -> String {
        format!("{}: {}", self.id, self.name)
    }
}

/// JSON-LD body of `GET /zones`; only `@graph` is required
#[derive(Debug, Deserialize)]
pub(crate) struct ZoneCatalogResponse {
    #[serde(rename = "@graph")]
    pub graph: Vec<ZoneDescriptor>,
}
