//! Ranking engine: score, stable sort, diversity cap.
//!
//! Scores every result with [`scoring::score_result`], sorts by score
//! descending (ties keep input order), then selects up to `num` results
//! under the per-domain cap from [`diversity`].

pub mod dedup;
pub mod diversity;
pub mod domain;
pub mod scoring;
pub mod url_normalize;

use chrono::{DateTime, Utc};

use crate::config::SearchSettings;
use crate::types::{RankedResult, SearchResult};

use scoring::{score_result, ScoringContext};

/// Scores and orders results against a query using the trust list and
/// freshness window from [`SearchSettings`].
#[derive(Debug, Clone)]
pub struct Ranker {
    trusted_domains: Vec<String>,
    time_window_days: u32,
}

impl Ranker {
    /// Create a ranker from explicit parameters.
    pub fn new(trusted_domains: Vec<String>, time_window_days: u32) -> Self {
        Self {
            trusted_domains,
            time_window_days,
        }
    }

    /// Create a ranker from search settings.
    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self::new(settings.trusted_domains.clone(), settings.time_window_days)
    }

    /// Rank `results` for `query`, returning at most `num` diverse results.
    pub fn rank(&self, results: Vec<SearchResult>, query: &str, num: usize) -> Vec<RankedResult> {
        self.rank_at(results, query, num, Utc::now())
    }

    /// Like [`Ranker::rank`] with an explicit reference time.
    pub fn rank_at(
        &self,
        results: Vec<SearchResult>,
        query: &str,
        num: usize,
        now: DateTime<Utc>,
    ) -> Vec<RankedResult> {
        let sorted = self.score_sorted(results, query, now);
        diversity::select_diverse(sorted, num)
    }

    /// Score and sort every result without applying the diversity cap.
    pub fn score_sorted(
        &self,
        results: Vec<SearchResult>,
        query: &str,
        now: DateTime<Utc>,
    ) -> Vec<RankedResult> {
        let ctx = ScoringContext {
            query,
            trusted_domains: &self.trusted_domains,
            time_window_days: self.time_window_days,
            now,
        };
        let mut ranked: Vec<RankedResult> =
            results.into_iter().map(|r| score_result(r, &ctx)).collect();
        // `sort_by` is stable: equal scores keep input order.
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }
}
