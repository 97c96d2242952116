//! Backend implementations.
//!
//! [`NewsApiBackend`] and [`CseBackend`] implement [`crate::backend::SearchBackend`]
//! against live JSON APIs; [`StubGenerator`] produces offline results.

pub mod cse;
pub mod news;
pub mod stub;

pub use cse::CseBackend;
pub use news::NewsApiBackend;
pub use stub::StubGenerator;

use url::Url;

/// Returns the URL unchanged if it parses as an absolute `http(s)` URL.
pub(crate) fn absolute_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).ok()?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Some(trimmed.to_string()),
        _ => None,
    }
}

/// Read a response body and decode it as JSON, mapping failures to backend errors.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    backend: &str,
    response: reqwest::Response,
) -> Result<T, crate::SearchError> {
    let status = response.status();
    if !status.is_success() {
        return Err(crate::SearchError::Http(format!(
            "{backend} returned status {status}"
        )));
    }
    let body = response
        .text()
        .await
        .map_err(|e| crate::SearchError::from_reqwest(backend, &e))?;
    tracing::trace!(backend, bytes = body.len(), "response received");
    serde_json::from_str(&body)
        .map_err(|e| crate::SearchError::Parse(format!("{backend} response: {e}")))
}
