//! Error types for the sales-search crate.
//!
//! Messages are stable and never contain API keys. Backend failures
//! (`Http`, `Timeout`) are recovered by the provider facade; only
//! `InvalidArgument` escapes [`crate::WebSearchProvider::search`].

/// Errors that can occur during web search operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Transport failure or non-success HTTP status from a backend.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A backend request exceeded its timeout.
    #[error("search timed out: {0}")]
    Timeout(String),

    /// The backend response body could not be decoded at all.
    #[error("parse error: {0}")]
    Parse(String),

    /// A backend was constructed without the credentials it needs.
    #[error("missing credential: {0}")]
    MissingCredential(String),

    /// Invalid search settings.
    #[error("config error: {0}")]
    Config(String),

    /// Caller violated the search contract (e.g. `num == 0`).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl SearchError {
    /// Returns `true` for transient backend failures that should trigger
    /// fallback to stub results rather than surface to the caller.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Timeout(_) | Self::Parse(_) | Self::MissingCredential(_)
        )
    }

    /// Classify a `reqwest` error, separating timeouts from other transport errors.
    pub(crate) fn from_reqwest(backend: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(format!("{backend} request timed out"))
        } else if let Some(status) = err.status() {
            Self::Http(format!("{backend} returned status {status}"))
        } else {
            Self::Http(format!("{backend} request failed: {err}"))
        }
    }
}

/// Convenience type alias for sales-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
