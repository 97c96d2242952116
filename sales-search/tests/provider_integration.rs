//! Integration tests for the provider facade against mock search APIs.
//!
//! A `wiremock` server stands in for both the news and custom-search
//! endpoints, so these tests make no real network calls.

use chrono::{Duration, Utc};
use sales_search::backends::{CseBackend, NewsApiBackend};
use sales_search::{
    Credentials, ResultSource, ScoreReason, SearchBackend, SearchError, SearchProvider,
    SearchSettings, WebSearchProvider,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NEWS_PATH: &str = "/v2/everything";
const CSE_PATH: &str = "/customsearch/v1";

fn all_credentials() -> Credentials {
    Credentials {
        news_api_key: Some("news-key".into()),
        cse_api_key: Some("cse-key".into()),
        cse_engine_id: Some("cx-123".into()),
    }
}

fn settings(provider: SearchProvider) -> SearchSettings {
    SearchSettings {
        provider,
        credentials: all_credentials(),
        timeout_seconds: 2,
        ..Default::default()
    }
}

fn provider_for(server: &MockServer, provider: SearchProvider) -> WebSearchProvider {
    WebSearchProvider::new(settings(provider))
        .expect("valid settings")
        .with_news_endpoint(&format!("{}{NEWS_PATH}", server.uri()))
        .with_cse_endpoint(&format!("{}{CSE_PATH}", server.uri()))
        .with_stub_seed(7)
}

fn days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days)).to_rfc3339()
}

// ────────────────────────────────────────────────────────────────────────────
// Backend adapters
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn news_backend_sends_key_and_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEWS_PATH))
        .and(header("X-Api-Key", "news-key"))
        .and(query_param("q", "IT"))
        .and(query_param("language", "ja"))
        .and(query_param("pageSize", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "articles": [
                {"title": "A", "url": "https://www.nikkei.com/a", "description": "d", "publishedAt": days_ago(1)}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = NewsApiBackend::new("news-key", "ja", 2)
        .expect("backend")
        .with_endpoint(format!("{}{NEWS_PATH}", server.uri()));
    let results = backend.search("IT", 3).await.expect("search");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].source, ResultSource::NewsApi);
    assert!(results[0].published_at.is_some());
}

#[tokio::test]
async fn news_backend_error_status_is_backend_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEWS_PATH))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let backend = NewsApiBackend::new("news-key", "ja", 2)
        .expect("backend")
        .with_endpoint(format!("{}{NEWS_PATH}", server.uri()));
    let err = backend.search("IT", 3).await.unwrap_err();
    assert!(matches!(err, SearchError::Http(_)));
    assert!(err.is_backend_failure());
    assert!(!err.to_string().contains("news-key"));
}

#[tokio::test]
async fn cse_backend_sends_credentials_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CSE_PATH))
        .and(query_param("key", "cse-key"))
        .and(query_param("cx", "cx-123"))
        .and(query_param("q", "製造業"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"title": "One", "link": "https://www.itmedia.co.jp/1", "snippet": "s1"},
                {"title": "Two", "link": "https://example.org/2"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = CseBackend::new("cse-key", "cx-123", "ja", 2)
        .expect("backend")
        .with_endpoint(format!("{}{CSE_PATH}", server.uri()));
    let results = backend.search("製造業", 5).await.expect("search");
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.published_at.is_none()));
    assert_eq!(results[1].snippet, "");
}

#[tokio::test]
async fn cse_backend_invalid_json_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CSE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let backend = CseBackend::new("cse-key", "cx-123", "ja", 2)
        .expect("backend")
        .with_endpoint(format!("{}{CSE_PATH}", server.uri()));
    let err = backend.search("IT", 3).await.unwrap_err();
    assert!(matches!(err, SearchError::Parse(_)));
}

// ────────────────────────────────────────────────────────────────────────────
// Facade: single live backend
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn newsapi_results_are_ranked_and_capped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEWS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "articles": [
                {"title": "Old blog", "url": "https://blog.example.com/old", "publishedAt": days_ago(90)},
                {"title": "Fresh Nikkei", "url": "https://www.nikkei.com/fresh", "publishedAt": days_ago(0)},
                {"title": "Mid", "url": "https://news.example.net/mid", "publishedAt": days_ago(20)},
                {"title": "Extra", "url": "https://other.example.org/x", "publishedAt": days_ago(40)}
            ]
        })))
        .mount(&server)
        .await;

    let outcome = provider_for(&server, SearchProvider::NewsApi)
        .search("IT", 3)
        .await
        .expect("search");

    assert!(!outcome.offline_mode);
    assert_eq!(outcome.len(), 3);
    assert_eq!(outcome.results[0].result.url, "https://www.nikkei.com/fresh");
    assert!(outcome.results[0].has_reason(ScoreReason::HighTrustedDomain));
    for pair in outcome.results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert_eq!(outcome.evidence_urls().len(), 3);
}

#[tokio::test]
async fn backend_server_error_falls_back_to_stub() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CSE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let outcome = provider_for(&server, SearchProvider::Cse)
        .search("IT", 2)
        .await
        .expect("search never fails on backend errors");
    assert!(outcome.offline_mode);
    assert_eq!(outcome.len(), 2);
    assert!(outcome
        .results
        .iter()
        .all(|r| r.result.source == ResultSource::Stub));
}

#[tokio::test]
async fn backend_timeout_falls_back_to_stub() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEWS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "ok", "articles": []}))
                .set_delay(std::time::Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let settings = SearchSettings {
        timeout_seconds: 1,
        ..settings(SearchProvider::NewsApi)
    };
    let outcome = WebSearchProvider::new(settings)
        .expect("valid settings")
        .with_news_endpoint(&format!("{}{NEWS_PATH}", server.uri()))
        .search("IT", 1)
        .await
        .expect("search");
    assert!(outcome.offline_mode);
    assert_eq!(outcome.results[0].result.source, ResultSource::Stub);
}

#[tokio::test]
async fn live_backend_with_no_hits_returns_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CSE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"kind": "customsearch#search"})))
        .mount(&server)
        .await;

    let outcome = provider_for(&server, SearchProvider::Cse)
        .search("zzzz", 3)
        .await
        .expect("search");
    assert!(outcome.is_empty());
    assert!(!outcome.offline_mode);
}

// ────────────────────────────────────────────────────────────────────────────
// Facade: hybrid
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn hybrid_merges_and_deduplicates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CSE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"title": "Shared", "link": "https://www.nikkei.com/shared/"},
                {"title": "CSE only", "link": "https://cse.example.com/a"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(NEWS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "articles": [
                {"title": "Shared news", "url": "https://www.nikkei.com/shared", "publishedAt": days_ago(2)},
                {"title": "News only", "url": "https://news.example.net/b", "publishedAt": days_ago(5)}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = provider_for(&server, SearchProvider::Hybrid)
        .search("IT", 5)
        .await
        .expect("search");

    assert!(!outcome.offline_mode);
    assert_eq!(outcome.len(), 3);
    let shared: Vec<_> = outcome
        .results
        .iter()
        .filter(|r| r.result.url.contains("nikkei.com/shared"))
        .collect();
    assert_eq!(shared.len(), 1);
    // CSE entry kept, publish date filled in from the news duplicate.
    assert_eq!(shared[0].result.source, ResultSource::Cse);
    assert!(shared[0].result.published_at.is_some());
    assert_eq!(outcome.results[0].result.url, "https://www.nikkei.com/shared/");
}

#[tokio::test]
async fn hybrid_uses_surviving_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CSE_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(NEWS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "articles": [
                {"title": "News", "url": "https://news.example.net/b", "publishedAt": days_ago(1)}
            ]
        })))
        .mount(&server)
        .await;

    let outcome = provider_for(&server, SearchProvider::Hybrid)
        .search("IT", 3)
        .await
        .expect("search");
    assert!(!outcome.offline_mode);
    assert_eq!(outcome.len(), 1);
    assert_eq!(outcome.results[0].result.source, ResultSource::NewsApi);
}

#[tokio::test]
async fn hybrid_with_only_news_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEWS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "articles": [
                {"title": "News", "url": "https://news.example.net/b", "publishedAt": days_ago(1)}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = SearchSettings {
        credentials: Credentials {
            news_api_key: Some("news-key".into()),
            ..Default::default()
        },
        ..settings(SearchProvider::Hybrid)
    };
    let provider = WebSearchProvider::new(settings)
        .expect("valid settings")
        .with_news_endpoint(&format!("{}{NEWS_PATH}", server.uri()));
    assert!(!provider.is_offline());
    let outcome = provider.search("IT", 3).await.expect("search");
    assert_eq!(outcome.len(), 1);
    assert!(!outcome.offline_mode);
}

#[tokio::test]
async fn hybrid_all_failing_falls_back_to_stub() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let outcome = provider_for(&server, SearchProvider::Hybrid)
        .search("IT", 2)
        .await
        .expect("search");
    assert!(outcome.offline_mode);
    assert_eq!(outcome.len(), 2);
    assert!(outcome
        .results
        .iter()
        .all(|r| r.result.source == ResultSource::Stub));
}
