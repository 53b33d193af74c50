//! Query parameters for the character API

use serde::Serialize;
use url::Url;

use crate::schema::FormValues;

/// Ordered list of query parameters. Order is always name, status, species.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    pub fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.0.push((key, value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `base` with its query replaced by these parameters,
    /// form-urlencoded.
    pub fn apply_to(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.set_query(None);
        if !self.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.0.iter().map(|(k, v)| (*k, v.as_str())));
        }
        url
    }
}

/// Maps validated form values to API parameters. Empty fields are omitted;
/// email, accept and the episode threshold never reach the API.
pub fn build_query(values: &FormValues) -> QueryParams {
    let mut params = QueryParams::default();
    if !values.name.is_empty() {
        params.push("name", values.name.as_str());
    }
    if !values.status.as_str().is_empty() {
        params.push("status", values.status.as_str());
    }
    if !values.species.as_str().is_empty() {
        params.push("species", values.species.as_str());
    }
    params
}
