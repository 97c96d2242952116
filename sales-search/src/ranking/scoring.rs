//! Multi-factor scoring for search results.
//!
//! Assigns scores based on:
//! - Freshness: linear decay from 1.0 at publish time to 0.0 at the end of
//!   the configured time window (missing dates score 0.0)
//! - Trusted domain: 1.0 if the host matches the trusted list
//! - Lexical relevance: fraction of query terms found in title and snippet
//!
//! Formula: `score = 0.6 * freshness + 0.3 * trust + 0.1 * relevance`
//!
//! Freshness dominates so that a fresh trusted article always outranks an
//! old untrusted one with similar text.

use chrono::{DateTime, Utc};

use crate::types::{DetailedScoring, RankedResult, ScoreReason, SearchResult};

use super::domain::is_trusted;

/// Weight of the freshness sub-score.
pub const FRESHNESS_WEIGHT: f64 = 0.6;
/// Weight of the trusted-domain sub-score.
pub const TRUST_WEIGHT: f64 = 0.3;
/// Weight of the lexical relevance sub-score.
pub const RELEVANCE_WEIGHT: f64 = 0.1;

/// Results younger than this many days are tagged `very_fresh`.
const VERY_FRESH_DAYS: f64 = 7.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Freshness in `0.0..=1.0` relative to a window of `window_days`.
///
/// Missing dates score 0.0. Dates in the future clamp to 1.0; dates older
/// than the window clamp to 0.0.
pub fn freshness_score(
    published_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    window_days: u32,
) -> f64 {
    let Some(published) = published_at else {
        return 0.0;
    };
    let window = f64::from(window_days.max(1));
    let age_days = age_in_days(published, now).max(0.0);
    (1.0 - age_days / window).clamp(0.0, 1.0)
}

/// Fraction of distinct query terms that appear in the title or snippet.
///
/// Matching is case-insensitive substring matching, so it also works for
/// unsegmented Japanese text. Returns 0.0 for an empty query.
pub fn relevance_score(result: &SearchResult, query: &str) -> f64 {
    let mut terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    terms.sort();
    terms.dedup();
    if terms.is_empty() {
        return 0.0;
    }
    let haystack = format!("{} {}", result.title, result.snippet).to_lowercase();
    let hits = terms.iter().filter(|t| haystack.contains(t.as_str())).count();
    hits as f64 / terms.len() as f64
}

/// Parameters shared by every result scored in one ranking pass.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    /// The search query.
    pub query: &'a str,
    /// Trusted domain list.
    pub trusted_domains: &'a [String],
    /// Freshness horizon in days.
    pub time_window_days: u32,
    /// Reference time for freshness.
    pub now: DateTime<Utc>,
}

/// Score one result, attaching sub-scores and reason tags.
pub fn score_result(result: SearchResult, ctx: &ScoringContext<'_>) -> RankedResult {
    let freshness = freshness_score(result.published_at, ctx.now, ctx.time_window_days);
    let trust = if is_trusted(&result.url, ctx.trusted_domains) {
        1.0
    } else {
        0.0
    };
    let relevance = relevance_score(&result, ctx.query);

    let mut reasons = Vec::new();
    if trust > 0.0 {
        reasons.push(ScoreReason::HighTrustedDomain);
    }
    if let Some(published) = result.published_at {
        let age = age_in_days(published, ctx.now);
        if age < VERY_FRESH_DAYS {
            reasons.push(ScoreReason::VeryFresh);
        } else if freshness > 0.0 {
            reasons.push(ScoreReason::Fresh);
        }
    }
    if relevance > 0.0 {
        reasons.push(ScoreReason::KeywordMatch);
    }

    RankedResult {
        result,
        score: FRESHNESS_WEIGHT * freshness + TRUST_WEIGHT * trust + RELEVANCE_WEIGHT * relevance,
        detailed_scoring: DetailedScoring {
            freshness,
            trust,
            relevance,
        },
        reasons,
    }
}

fn age_in_days(published: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - published).num_seconds() as f64 / SECONDS_PER_DAY
}
