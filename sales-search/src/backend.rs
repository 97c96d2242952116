//! Trait definition for pluggable search backends.
//!
//! Each live search API (news, custom search) implements [`SearchBackend`]
//! to provide a uniform interface for querying and normalising results.

use crate::error::SearchError;
use crate::types::{ResultSource, SearchResult};

/// A pluggable search backend.
///
/// Implementors call one external search API and map its response into
/// [`SearchResult`] values. Each backend handles its own:
///
/// - Request construction and credential placement
/// - Response decoding, skipping individual malformed items
/// - Mapping transport and status failures to [`SearchError`]
///
/// Backends never fall back on their own; that decision belongs to
/// [`crate::WebSearchProvider`]. All implementations must be `Send + Sync`
/// so the hybrid mode can query them concurrently.
pub trait SearchBackend: Send + Sync {
    /// Perform a search and return up to `num` normalised results.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] or [`SearchError::Timeout`] on transport
    /// or status failures, and [`SearchError::Parse`] if the response body is
    /// not the expected JSON document.
    fn search(
        &self,
        query: &str,
        num: usize,
    ) -> impl std::future::Future<Output = Result<Vec<SearchResult>, SearchError>> + Send;

    /// Returns the provenance tag stamped on this backend's results.
    fn source(&self) -> ResultSource;
}
