//! News-search API backend.
//!
//! Queries a NewsAPI-compatible `/v2/everything` endpoint. Articles carry a
//! publish timestamp, so these results feed the freshness score directly.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::backend::SearchBackend;
use crate::error::SearchError;
use crate::http;
use crate::types::{ResultSource, SearchResult};

use super::{absolute_url, read_json};

/// Default news-search endpoint.
pub const DEFAULT_NEWS_ENDPOINT: &str = "https://newsapi.org/v2/everything";

/// Largest page size the news API accepts.
const MAX_PAGE_SIZE: usize = 100;

/// News-search API client.
pub struct NewsApiBackend {
    client: reqwest::Client,
    api_key: String,
    language: String,
    endpoint: String,
}

impl NewsApiBackend {
    /// Create a backend with the given key, language hint, and request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingCredential`] for a blank key, or
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        language: impl Into<String>,
        timeout_seconds: u64,
    ) -> Result<Self, SearchError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SearchError::MissingCredential(
                crate::config::NEWS_API_KEY_ENV.into(),
            ));
        }
        Ok(Self {
            client: http::build_client(timeout_seconds)?,
            api_key,
            language: language.into(),
            endpoint: DEFAULT_NEWS_ENDPOINT.into(),
        })
    }

    /// Point the backend at a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsArticle {
    #[serde(default)]
    title: Option<String>,
    url: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
}

impl SearchBackend for NewsApiBackend {
    async fn search(&self, query: &str, num: usize) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, num, "news search");

        let page_size = num.clamp(1, MAX_PAGE_SIZE).to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .header("X-Api-Key", &self.api_key)
            .query(&[
                ("q", query),
                ("language", self.language.as_str()),
                ("pageSize", page_size.as_str()),
                ("sortBy", "publishedAt"),
            ])
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest("news", &e))?;

        let body: NewsResponse = read_json("news", response).await?;
        if body.status.as_deref() == Some("error") {
            return Err(SearchError::Http(format!(
                "news API error: {}",
                body.message.unwrap_or_default()
            )));
        }

        let results = parse_articles(body.articles, num);
        tracing::debug!(count = results.len(), "news backend returned results");
        Ok(results)
    }

    fn source(&self) -> ResultSource {
        ResultSource::NewsApi
    }
}

/// Map raw article objects to results, skipping any that cannot be parsed
/// or lack an absolute URL.
fn parse_articles(articles: Vec<serde_json::Value>, num: usize) -> Vec<SearchResult> {
    articles
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<NewsArticle>(raw) {
            Ok(article) => Some(article),
            Err(err) => {
                tracing::debug!(error = %err, "skipping malformed news article");
                None
            }
        })
        .filter_map(|article| {
            let url = absolute_url(&article.url)?;
            Some(SearchResult::new(
                article.title,
                url,
                article.description,
                ResultSource::NewsApi,
                article.published_at.as_deref().and_then(parse_timestamp),
            ))
        })
        .take(num)
        .collect()
}

/// Parse an ISO 8601 timestamp, returning `None` if it is not valid.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
