//! # sales-search
//!
//! Ranked web search for sales coaching: pre-meeting advice and icebreakers
//! cite the results of this crate as reference sources.
//!
//! ## Design
//!
//! - One provider facade, [`WebSearchProvider`], selects a backend once from
//!   [`SearchSettings`]: disabled, offline stub, news API, custom search, or
//!   both merged (hybrid)
//! - Live results are scored by freshness, trusted domain and query overlap,
//!   then capped per domain so one site cannot fill the list
//! - Missing credentials and backend failures degrade to deterministic-under-seed
//!   stub results with `offline_mode` set; they never surface as errors
//!
//! ## Security
//!
//! - API keys come from the environment and never appear in errors or `Debug`
//! - Search queries are logged only at trace level

pub mod backend;
pub mod backends;
pub mod config;
pub mod error;
pub mod http;
pub mod provider;
pub mod ranking;
pub mod types;

pub use backend::SearchBackend;
pub use config::{Credentials, SearchProvider, SearchSettings};
pub use error::{Result, SearchError};
pub use provider::{SearchOutcome, WebSearchProvider};
pub use ranking::Ranker;
pub use types::{DetailedScoring, RankedResult, ResultSource, ScoreReason, SearchResult};

/// Search with settings taken from the environment.
///
/// Convenience wrapper around [`WebSearchProvider::from_env`] and
/// [`WebSearchProvider::search`].
///
/// # Errors
///
/// Returns [`SearchError::InvalidArgument`] if `num` is 0.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> sales_search::Result<()> {
/// let outcome = sales_search::search_from_env("IT 最新ニュース", 3).await?;
/// for ranked in &outcome.results {
///     println!("{}: {}", ranked.result.title, ranked.result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_from_env(query: &str, num: usize) -> Result<SearchOutcome> {
    WebSearchProvider::from_env()?.search(query, num).await
}

/// Rank already-normalised results with the given settings.
///
/// Equivalent to [`Ranker::from_settings`] followed by [`Ranker::rank`].
pub fn rank(
    results: Vec<SearchResult>,
    query: &str,
    num: usize,
    settings: &SearchSettings,
) -> Vec<RankedResult> {
    Ranker::from_settings(settings).rank(results, query, num)
}
