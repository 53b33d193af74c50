//! Library configuration

use serde::{Deserialize, Serialize};

/// Default character endpoint
pub const DEFAULT_API_URL: &str = "https://rickandmortyapi.com/api/character";

/// Search configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinderConfig {
    /// Character endpoint; query parameters are appended to it
    pub api_url: String,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
        }
    }
}

impl FinderConfig {
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self { api_url: api_url.into() }
    }
}
