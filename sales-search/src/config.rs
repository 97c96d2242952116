//! Search settings with sensible defaults.
//!
//! [`SearchSettings`] is built once by the caller and passed into
//! [`crate::WebSearchProvider`]; nothing below reads global state except the
//! explicit `from_env` constructors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SearchError;

/// Environment variable selecting the provider.
pub const SEARCH_PROVIDER_ENV: &str = "SEARCH_PROVIDER";
/// Environment variable holding the news API key.
pub const NEWS_API_KEY_ENV: &str = "NEWSAPI_KEY";
/// Environment variable holding the custom-search API key.
pub const CSE_API_KEY_ENV: &str = "CSE_API_KEY";
/// Environment variable holding the custom-search engine identifier.
pub const CSE_ENGINE_ID_ENV: &str = "CSE_CX";

/// Upper bound for `results_limit`.
pub const MAX_RESULTS_LIMIT: usize = 20;
/// Upper bound for `time_window_days`.
pub const MAX_TIME_WINDOW_DAYS: u32 = 365;

/// Which backend the provider facade uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    /// Search disabled; a single "no results" placeholder is returned.
    None,
    /// Custom-search API.
    Cse,
    /// News-search API.
    NewsApi,
    /// Offline synthetic results.
    #[default]
    Stub,
    /// Both live backends, merged.
    Hybrid,
}

impl SearchProvider {
    /// Returns the configuration tag for this provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Cse => "cse",
            Self::NewsApi => "newsapi",
            Self::Stub => "stub",
            Self::Hybrid => "hybrid",
        }
    }

    /// Parse a provider tag, resolving anything unrecognised to [`SearchProvider::Stub`].
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|err: SearchError| {
            tracing::warn!(error = %err, "unrecognised search provider, using stub");
            Self::Stub
        })
    }
}

impl FromStr for SearchProvider {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "cse" => Ok(Self::Cse),
            "newsapi" => Ok(Self::NewsApi),
            "stub" => Ok(Self::Stub),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(SearchError::Config(format!(
                "unknown search provider `{other}`"
            ))),
        }
    }
}

impl fmt::Display for SearchProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SearchProvider {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&raw))
    }
}

/// API credentials for the live backends. Blank values are treated as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// News API key.
    pub news_api_key: Option<String>,
    /// Custom-search API key.
    pub cse_api_key: Option<String>,
    /// Custom-search engine (context) identifier.
    pub cse_engine_id: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("news_api_key", &self.news_api_key.as_ref().map(|_| "<redacted>"))
            .field("cse_api_key", &self.cse_api_key.as_ref().map(|_| "<redacted>"))
            .field("cse_engine_id", &self.cse_engine_id)
            .finish()
    }
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            news_api_key: read(NEWS_API_KEY_ENV),
            cse_api_key: read(CSE_API_KEY_ENV),
            cse_engine_id: read(CSE_ENGINE_ID_ENV),
        }
    }

    /// Returns the news API key if present.
    pub fn news(&self) -> Option<&str> {
        non_blank(self.news_api_key.as_deref())
    }

    /// Returns `(api_key, engine_id)` if both custom-search credentials are present.
    pub fn cse(&self) -> Option<(&str, &str)> {
        Some((
            non_blank(self.cse_api_key.as_deref())?,
            non_blank(self.cse_engine_id.as_deref())?,
        ))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Configuration for the search subsystem.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Which backend to use.
    pub provider: SearchProvider,
    /// Maximum number of results returned, `1..=20`.
    pub results_limit: usize,
    /// Domains that receive the trusted-domain boost.
    pub trusted_domains: Vec<String>,
    /// Freshness horizon in days, `1..=365`.
    pub time_window_days: u32,
    /// Language hint passed to backends that support it.
    pub language: String,
    /// Per-backend HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Backend credentials.
    pub credentials: Credentials,
}

/// Trusted domains used when none are configured.
pub fn default_trusted_domains() -> Vec<String> {
    [
        "www.bloomberg.co.jp",
        "www.nikkei.com",
        "www.itmedia.co.jp",
        "www.impress.co.jp",
    ]
    .iter()
    .map(|d| (*d).to_string())
    .collect()
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            provider: SearchProvider::Stub,
            results_limit: 5,
            trusted_domains: default_trusted_domains(),
            time_window_days: 60,
            language: "ja".into(),
            timeout_seconds: 8,
            credentials: Credentials::default(),
        }
    }
}

impl SearchSettings {
    /// Defaults with the provider taken from `SEARCH_PROVIDER` and
    /// credentials from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`SearchSettings::from_env`], reading variables through `lookup`.
    ///
    /// An unrecognised provider value resolves to [`SearchProvider::Stub`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self {
            credentials: Credentials::from_lookup(&lookup),
            ..Self::default()
        };
        if let Some(raw) = lookup(SEARCH_PROVIDER_ENV) {
            settings.provider = SearchProvider::parse_lenient(&raw);
        }
        settings
    }

    /// Validates these settings, returning an error if any field is out of range.
    ///
    /// Checks:
    /// - `results_limit` must be in `1..=20`
    /// - `time_window_days` must be in `1..=365`
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.results_limit == 0 || self.results_limit > MAX_RESULTS_LIMIT {
            return Err(SearchError::Config(format!(
                "results_limit must be between 1 and {MAX_RESULTS_LIMIT}"
            )));
        }
        if self.time_window_days == 0 || self.time_window_days > MAX_TIME_WINDOW_DAYS {
            return Err(SearchError::Config(format!(
                "time_window_days must be between 1 and {MAX_TIME_WINDOW_DAYS}"
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
