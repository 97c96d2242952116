//! Core types for normalised and ranked search results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Title used when a backend omits one.
pub const FALLBACK_TITLE: &str = "(no title)";

/// Which backend produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    /// Offline synthetic result.
    Stub,
    /// News-search API.
    NewsApi,
    /// Custom-search API.
    Cse,
    /// "No results" placeholder from the disabled provider.
    None,
}

impl ResultSource {
    /// Returns the stable tag for this source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stub => "stub",
            Self::NewsApi => "newsapi",
            Self::Cse => "cse",
            Self::None => "none",
        }
    }
}

impl fmt::Display for ResultSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single search result in the shape shared by every backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Short label; [`FALLBACK_TITLE`] when the backend omitted it.
    pub title: String,
    /// Absolute URL. Empty only for the "no results" placeholder.
    pub url: String,
    /// Short description, possibly empty.
    pub snippet: String,
    /// Provenance tag.
    pub source: ResultSource,
    /// Publish time, when the backend reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl SearchResult {
    /// Build a result, substituting the fallback title for a blank one.
    pub fn new(
        title: Option<String>,
        url: impl Into<String>,
        snippet: Option<String>,
        source: ResultSource,
        published_at: Option<DateTime<Utc>>,
    ) -> Self {
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| FALLBACK_TITLE.to_string());
        Self {
            title,
            url: url.into(),
            snippet: snippet.map(|s| s.trim().to_string()).unwrap_or_default(),
            source,
            published_at,
        }
    }
}

/// Named sub-scores that make up [`RankedResult::score`]. Each is in `0.0..=1.0`
/// before weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedScoring {
    /// Recency relative to the configured time window.
    pub freshness: f64,
    /// 1.0 for a trusted domain, otherwise 0.0.
    pub trust: f64,
    /// Fraction of query terms found in title and snippet.
    pub relevance: f64,
}

/// Why a result's score was boosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreReason {
    /// Domain matches an entry in the trusted-domain list.
    HighTrustedDomain,
    /// Published within the last seven days.
    VeryFresh,
    /// Published inside the configured time window.
    Fresh,
    /// At least one query term appears in the title or snippet.
    KeywordMatch,
}

impl ScoreReason {
    /// Returns the stable tag for this reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighTrustedDomain => "high_trusted_domain",
            Self::VeryFresh => "very_fresh",
            Self::Fresh => "fresh",
            Self::KeywordMatch => "keyword_match",
        }
    }
}

impl fmt::Display for ScoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A [`SearchResult`] plus ranking metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    /// The underlying result, unchanged by ranking.
    #[serde(flatten)]
    pub result: SearchResult,
    /// Weighted relevance score (higher is better).
    pub score: f64,
    /// Sub-scores contributing to `score`.
    pub detailed_scoring: DetailedScoring,
    /// Boost tags, without duplicates.
    pub reasons: Vec<ScoreReason>,
}

impl RankedResult {
    /// Wrap a result with zero score and no reasons.
    pub fn unscored(result: SearchResult) -> Self {
        Self {
            result,
            score: 0.0,
            detailed_scoring: DetailedScoring::default(),
            reasons: Vec::new(),
        }
    }

    /// Returns `true` if `reason` was recorded for this result.
    pub fn has_reason(&self, reason: ScoreReason) -> bool {
        self.reasons.contains(&reason)
    }

    /// Discard ranking metadata.
    pub fn into_result(self) -> SearchResult {
        self.result
    }
}
