//! Reference sources for advice generation.
//!
//! Pre-meeting advice and icebreakers cite recent industry news. This module
//! builds the news query for an industry, runs it through the search
//! provider, and reports whether the citations came from the offline stub.

use sales_search::{RankedResult, SearchSettings, WebSearchProvider};
use serde::Serialize;

use crate::error::Result;

/// Suffix appended to the industry name to search for recent news.
const NEWS_QUERY_SUFFIX: &str = "最新ニュース";

/// Build the news query for an industry, e.g. `"IT 最新ニュース"`.
pub fn industry_news_query(industry: &str) -> String {
    let industry = industry.trim();
    if industry.is_empty() {
        NEWS_QUERY_SUFFIX.to_string()
    } else {
        format!("{industry} {NEWS_QUERY_SUFFIX}")
    }
}

/// Citations gathered for one advice request.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceSources {
    /// The query that was searched.
    pub query: String,
    /// Ranked results, best first.
    pub results: Vec<RankedResult>,
    /// URLs to attach to the generated advice as evidence.
    pub evidence_urls: Vec<String>,
    /// `true` when the results are offline stub data.
    pub offline: bool,
}

impl ReferenceSources {
    /// Search recent news for `industry` and collect up to `num` citations.
    ///
    /// # Errors
    ///
    /// Returns an error only for invalid settings or `num == 0`; backend
    /// failures yield stub citations with `offline` set.
    pub async fn fetch(settings: SearchSettings, industry: &str, num: usize) -> Result<Self> {
        let provider = WebSearchProvider::new(settings)?;
        Self::fetch_with(&provider, industry, num).await
    }

    /// Like [`ReferenceSources::fetch`] with an already-built provider.
    ///
    /// # Errors
    ///
    /// Returns an error if `num == 0`.
    pub async fn fetch_with(
        provider: &WebSearchProvider,
        industry: &str,
        num: usize,
    ) -> Result<Self> {
        let query = industry_news_query(industry);
        let outcome = provider.search(&query, num).await?;
        if let Some(notice) = outcome.offline_notice() {
            tracing::warn!("{notice}");
        }
        Ok(Self {
            evidence_urls: outcome.evidence_urls(),
            offline: outcome.offline_mode,
            results: outcome.results,
            query,
        })
    }
}
