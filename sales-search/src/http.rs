//! Shared HTTP client construction for the backend adapters.

use std::time::Duration;

use crate::error::SearchError;

/// User-Agent sent to the search APIs.
pub const USER_AGENT: &str = concat!("sales-search/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] for the JSON search APIs.
///
/// The client has a bounded per-request timeout and gzip decompression.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(timeout_seconds: u64) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}
