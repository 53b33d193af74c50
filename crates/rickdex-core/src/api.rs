//! Character API client
//!
//! The remote API is treated as an opaque data source: one GET per search,
//! first page only, no auth, no retries.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::FinderConfig;
use crate::query::QueryParams;
use crate::ApiError;

/// One character as returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    pub status: String,
    pub species: String,
    pub image: String,
    #[serde(default)]
    pub episode: Option<Vec<String>>,
}

impl Character {
    /// Number of episodes the character appears in. Missing list reads as 0.
    pub fn episode_count(&self) -> usize {
        self.episode.as_ref().map_or(0, Vec::len)
    }
}

/// Paging block of a response
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub pages: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

/// A decoded response page
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPage {
    #[serde(default)]
    pub info: Option<PageInfo>,
    #[serde(default)]
    pub results: Option<Vec<Character>>,
}

impl CharacterPage {
    pub fn into_results(self) -> Vec<Character> {
        self.results.unwrap_or_default()
    }
}

/// Outcome of a successful round trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    Found(CharacterPage),
    /// The API answers 404 when no character matches.
    NotFound,
}

/// Anything that can answer a character query.
#[async_trait]
pub trait CharacterSource: Send + Sync {
    async fn fetch(&self, params: &QueryParams) -> Result<Lookup, ApiError>;
}

/// HTTP implementation backed by `reqwest`.
pub struct HttpCharacterSource {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpCharacterSource {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            client: reqwest::Client::new(),
        })
    }

    pub fn from_config(config: &FinderConfig) -> Result<Self, ApiError> {
        Self::new(&config.api_url)
    }
}

#[async_trait]
impl CharacterSource for HttpCharacterSource {
    async fn fetch(&self, params: &QueryParams) -> Result<Lookup, ApiError> {
        let url = params.apply_to(&self.base_url);
        tracing::debug!(%url, "fetching characters");

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("no characters matched");
            return Ok(Lookup::NotFound);
        }
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = resp.bytes().await?;
        let page: CharacterPage = serde_json::from_slice(&body)?;
        Ok(Lookup::Found(page))
    }
}
