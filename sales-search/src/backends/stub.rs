//! Offline stub results.
//!
//! Used when search is set to `stub`, or as the fallback of last resort when
//! live backends are unavailable. Never fails.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use url::Url;

use crate::types::{ResultSource, SearchResult};

/// Hard cap on the number of stub entries produced by one call.
pub const MAX_STUB_RESULTS: usize = 20;

/// Stub publish times fall within this many days before now.
const MAX_AGE_DAYS: i64 = 30;

/// Reserved example domains used for synthetic URLs.
const STUB_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

/// `(path, title, snippet)` templates; `{query}` is replaced with the query.
const TEMPLATES: &[(&str, &str, &str)] = &[
    (
        "market-trends",
        "{query} 業界の最新動向",
        "{query} market trends and recent announcements (offline sample).",
    ),
    (
        "case-study",
        "{query} の導入事例",
        "Customer case study related to {query} (offline sample).",
    ),
    (
        "regulation",
        "{query} 関連の規制・制度アップデート",
        "Regulatory and policy updates affecting {query} (offline sample).",
    ),
    (
        "funding",
        "{query} 分野の投資・資金調達ニュース",
        "Investment and funding news in the {query} space (offline sample).",
    ),
    (
        "interview",
        "{query} 企業トップインタビュー",
        "Executive interview touching on {query} (offline sample).",
    ),
];

/// Deterministic-under-seed generator of synthetic search results.
pub struct StubGenerator {
    rng: StdRng,
}

impl StubGenerator {
    /// A generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// A generator with a fixed seed, for reproducible output.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Produce `min(num, MAX_STUB_RESULTS)` results for `query`.
    pub fn generate(&mut self, query: &str, num: usize) -> Vec<SearchResult> {
        self.generate_at(query, num, Utc::now())
    }

    /// Like [`StubGenerator::generate`] with an explicit clock.
    pub fn generate_at(&mut self, query: &str, num: usize, now: DateTime<Utc>) -> Vec<SearchResult> {
        let count = num.min(MAX_STUB_RESULTS);
        let offset = self.rng.gen_range(0..TEMPLATES.len());
        let query = query.trim();

        (0..count)
            .map(|i| {
                let (path, title, snippet) = TEMPLATES[(offset + i) % TEMPLATES.len()];
                let domain = STUB_DOMAINS[i % STUB_DOMAINS.len()];
                let age = Duration::minutes(self.rng.gen_range(0..MAX_AGE_DAYS * 24 * 60));
                SearchResult::new(
                    Some(title.replace("{query}", query)),
                    stub_url(domain, path, i + 1, query),
                    Some(snippet.replace("{query}", query)),
                    ResultSource::Stub,
                    Some(now - age),
                )
            })
            .collect()
    }
}

impl Default for StubGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn stub_url(domain: &str, path: &str, index: usize, query: &str) -> String {
    let base = format!("https://{domain}/news/{path}/{index}");
    match Url::parse_with_params(&base, &[("q", query)]) {
        Ok(url) => url.to_string(),
        Err(_) => base,
    }
}
