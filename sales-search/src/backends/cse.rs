//! Custom-search API backend.
//!
//! Queries a Google Custom Search JSON endpoint. The API reports no publish
//! date, so every result has `published_at: None` and ranks as oldest.

use serde::Deserialize;

use crate::backend::SearchBackend;
use crate::config::{CSE_API_KEY_ENV, CSE_ENGINE_ID_ENV};
use crate::error::SearchError;
use crate::http;
use crate::types::{ResultSource, SearchResult};

use super::{absolute_url, read_json};

/// Default custom-search endpoint.
pub const DEFAULT_CSE_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// The API returns at most ten items per request.
const MAX_PAGE_SIZE: usize = 10;

/// Custom-search API client.
pub struct CseBackend {
    client: reqwest::Client,
    api_key: String,
    engine_id: String,
    language: String,
    endpoint: String,
}

impl CseBackend {
    /// Create a backend from an API key and search-engine identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingCredential`] if either credential is
    /// blank, or [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
        language: impl Into<String>,
        timeout_seconds: u64,
    ) -> Result<Self, SearchError> {
        let api_key = api_key.into();
        let engine_id = engine_id.into();
        if api_key.trim().is_empty() {
            return Err(SearchError::MissingCredential(CSE_API_KEY_ENV.into()));
        }
        if engine_id.trim().is_empty() {
            return Err(SearchError::MissingCredential(CSE_ENGINE_ID_ENV.into()));
        }
        Ok(Self {
            client: http::build_client(timeout_seconds)?,
            api_key,
            engine_id,
            language: language.into(),
            endpoint: DEFAULT_CSE_ENDPOINT.into(),
        })
    }

    /// Point the backend at a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct CseResponse {
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CseItem {
    #[serde(default)]
    title: Option<String>,
    link: String,
    #[serde(default)]
    snippet: Option<String>,
}

impl SearchBackend for CseBackend {
    async fn search(&self, query: &str, num: usize) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, num, "custom search");

        let count = num.clamp(1, MAX_PAGE_SIZE).to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", count.as_str()),
                ("hl", self.language.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest("cse", &e))?;

        let body: CseResponse = read_json("cse", response).await?;
        let results = parse_items(body.items, num);
        tracing::debug!(count = results.len(), "cse backend returned results");
        Ok(results)
    }

    fn source(&self) -> ResultSource {
        ResultSource::Cse
    }
}

/// Map raw result items to results, skipping any without a usable link.
fn parse_items(items: Vec<serde_json::Value>, num: usize) -> Vec<SearchResult> {
    items
        .into_iter()
        .filter_map(|raw| serde_json::from_value::<CseItem>(raw).ok())
        .filter_map(|item| {
            let url = absolute_url(&item.link)?;
            Some(SearchResult::new(
                item.title,
                url,
                item.snippet,
                ResultSource::Cse,
                None,
            ))
        })
        .take(num)
        .collect()
}
