//! Provider facade: backend selection, stub fallback, ranking.
//!
//! The backend is chosen once, when the provider is built, from
//! [`SearchSettings::provider`] and the available credentials. Each call to
//! [`WebSearchProvider::search`] then runs that backend and turns every
//! backend failure into stub results flagged with `offline_mode`.

use chrono::Utc;
use serde::Serialize;

use crate::backend::SearchBackend;
use crate::backends::{CseBackend, NewsApiBackend, StubGenerator};
use crate::config::{SearchProvider, SearchSettings, MAX_RESULTS_LIMIT};
use crate::error::SearchError;
use crate::ranking::dedup::deduplicate;
use crate::ranking::Ranker;
use crate::types::{RankedResult, ResultSource, SearchResult};

/// Title of the placeholder returned when search is disabled.
pub const NO_RESULTS_TITLE: &str = "検索結果なし";

/// Snippet of the placeholder returned when search is disabled.
pub const NO_RESULTS_MESSAGE: &str =
    "該当する検索結果がありません。別のキーワードでお試しください。";

/// Notice callers show when results came from the offline stub.
pub const OFFLINE_NOTICE: &str =
    "オフラインモード: Web検索が利用できません。スタブデータを使用します。";

/// Live backends are asked for this many times the requested count so the
/// diversity cap has candidates to choose from.
const CANDIDATE_MULTIPLIER: usize = 2;

/// What one backend call produced, tagged with the backend that made it.
type Fetched = (ResultSource, Result<Vec<SearchResult>, SearchError>);

/// The backend selected for this provider.
enum Backend {
    Disabled,
    Stub,
    News(NewsApiBackend),
    Cse(CseBackend),
    Hybrid {
        cse: Option<CseBackend>,
        news: Option<NewsApiBackend>,
    },
    /// A live provider was selected but could not be set up.
    Unavailable(String),
}

/// Results of one search call.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// Ranked results, at most `min(num, results_limit)`.
    pub results: Vec<RankedResult>,
    /// `true` when stub results were substituted for a live backend.
    pub offline_mode: bool,
    /// The configured provider.
    pub provider: SearchProvider,
}

impl SearchOutcome {
    /// Non-empty result URLs in rank order, for citing as evidence.
    pub fn evidence_urls(&self) -> Vec<String> {
        self.results
            .iter()
            .map(|r| r.result.url.clone())
            .filter(|u| !u.is_empty())
            .collect()
    }

    /// The degraded-mode notice, when one should be shown.
    pub fn offline_notice(&self) -> Option<&'static str> {
        self.offline_mode.then_some(OFFLINE_NOTICE)
    }

    /// Number of results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns `true` if there are no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Single entry point for web search.
pub struct WebSearchProvider {
    settings: SearchSettings,
    backend: Backend,
    ranker: Ranker,
    stub_seed: Option<u64>,
}

impl WebSearchProvider {
    /// Build a provider, selecting the backend from `settings`.
    ///
    /// Missing credentials are not an error: the provider is built in
    /// offline mode and serves stub results.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `settings` fail validation.
    pub fn new(settings: SearchSettings) -> Result<Self, SearchError> {
        settings.validate()?;
        let backend = select_backend(&settings);
        if let Backend::Unavailable(ref reason) = backend {
            tracing::warn!(provider = %settings.provider, reason = %reason, "search backend unavailable, using stub results");
        } else {
            tracing::debug!(provider = %settings.provider, "search provider selected");
        }
        Ok(Self {
            ranker: Ranker::from_settings(&settings),
            settings,
            backend,
            stub_seed: None,
        })
    }

    /// Build a provider from the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`WebSearchProvider::new`].
    pub fn from_env() -> Result<Self, SearchError> {
        Self::new(SearchSettings::from_env())
    }

    /// Use a fixed seed for stub results.
    pub fn with_stub_seed(mut self, seed: u64) -> Self {
        self.stub_seed = Some(seed);
        self
    }

    /// Send news requests to a different endpoint.
    pub fn with_news_endpoint(mut self, endpoint: &str) -> Self {
        self.backend = match self.backend {
            Backend::News(b) => Backend::News(b.with_endpoint(endpoint)),
            Backend::Hybrid { cse, news } => Backend::Hybrid {
                cse,
                news: news.map(|b| b.with_endpoint(endpoint)),
            },
            other => other,
        };
        self
    }

    /// Send custom-search requests to a different endpoint.
    pub fn with_cse_endpoint(mut self, endpoint: &str) -> Self {
        self.backend = match self.backend {
            Backend::Cse(b) => Backend::Cse(b.with_endpoint(endpoint)),
            Backend::Hybrid { cse, news } => Backend::Hybrid {
                cse: cse.map(|b| b.with_endpoint(endpoint)),
                news,
            },
            other => other,
        };
        self
    }

    /// The settings this provider was built with.
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Returns `true` if a live provider was selected but cannot be used.
    pub fn is_offline(&self) -> bool {
        matches!(self.backend, Backend::Unavailable(_))
    }

    /// Search for `query`, returning at most `min(num, results_limit)` results.
    ///
    /// Backend failures (see [`SearchError::is_backend_failure`]) never
    /// surface here; they produce stub results with `offline_mode` set.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidArgument`] if `num` is 0, and passes on
    /// any error a backend reports that is not a backend failure.
    pub async fn search(&self, query: &str, num: usize) -> Result<SearchOutcome, SearchError> {
        if num == 0 {
            return Err(SearchError::InvalidArgument(
                "num must be greater than 0".into(),
            ));
        }
        let limit = num.min(self.settings.results_limit);
        let candidates = (limit * CANDIDATE_MULTIPLIER).min(MAX_RESULTS_LIMIT);
        tracing::trace!(query, limit, provider = %self.settings.provider, "search");

        let outcome = match &self.backend {
            Backend::Disabled => self.outcome(vec![no_results_placeholder()], false),
            Backend::Stub => self.stub_outcome(query, limit, false),
            Backend::Unavailable(reason) => {
                tracing::warn!(reason = %reason, "search backend unavailable, using stub results");
                self.stub_outcome(query, limit, true)
            }
            Backend::News(news) => {
                let fetched = news.search(query, candidates).await;
                self.live_outcome(query, limit, (news.source(), fetched))?
            }
            Backend::Cse(cse) => {
                let fetched = cse.search(query, candidates).await;
                self.live_outcome(query, limit, (cse.source(), fetched))?
            }
            Backend::Hybrid { cse, news } => {
                let (cse_out, news_out) = futures::future::join(
                    run_optional(cse.as_ref(), query, candidates),
                    run_optional(news.as_ref(), query, candidates),
                )
                .await;
                self.hybrid_outcome(query, limit, [cse_out, news_out])?
            }
        };

        tracing::debug!(
            count = outcome.len(),
            offline = outcome.offline_mode,
            "search complete"
        );
        Ok(outcome)
    }

    fn outcome(&self, results: Vec<RankedResult>, offline_mode: bool) -> SearchOutcome {
        SearchOutcome {
            results,
            offline_mode,
            provider: self.settings.provider,
        }
    }

    fn stub_outcome(&self, query: &str, limit: usize, offline_mode: bool) -> SearchOutcome {
        let mut generator = match self.stub_seed {
            Some(seed) => StubGenerator::seeded(seed),
            None => StubGenerator::new(),
        };
        let now = Utc::now();
        let generated = generator.generate_at(query, limit, now);
        // Stub output skips the diversity cap so its length matches the request.
        let mut ranked = self.ranker.score_sorted(generated, query, now);
        ranked.truncate(limit);
        self.outcome(ranked, offline_mode)
    }

    fn live_outcome(
        &self,
        query: &str,
        limit: usize,
        (backend, fetched): Fetched,
    ) -> Result<SearchOutcome, SearchError> {
        match fetched {
            Ok(results) => Ok(self.outcome(self.ranker.rank(results, query, limit), false)),
            Err(err) if err.is_backend_failure() => {
                tracing::warn!(backend = %backend, error = %err, "search backend failed, using stub results");
                Ok(self.stub_outcome(query, limit, true))
            }
            Err(err) => {
                tracing::error!(backend = %backend, error = %err, "search backend rejected the request");
                Err(err)
            }
        }
    }

    fn hybrid_outcome(
        &self,
        query: &str,
        limit: usize,
        outcomes: [Option<Fetched>; 2],
    ) -> Result<SearchOutcome, SearchError> {
        let mut merged = Vec::new();
        let mut any_live = false;

        for (backend, fetched) in outcomes.into_iter().flatten() {
            match fetched {
                Ok(results) => {
                    tracing::debug!(backend = %backend, count = results.len(), "backend returned results");
                    any_live = true;
                    merged.extend(results);
                }
                Err(err) if err.is_backend_failure() => {
                    tracing::warn!(backend = %backend, error = %err, "search backend failed");
                }
                Err(err) => {
                    tracing::error!(backend = %backend, error = %err, "search backend rejected the request");
                    return Err(err);
                }
            }
        }

        if !any_live {
            tracing::warn!("no hybrid backend available, using stub results");
            return Ok(self.stub_outcome(query, limit, true));
        }
        let unique = deduplicate(merged);
        Ok(self.outcome(self.ranker.rank(unique, query, limit), false))
    }
}

async fn run_optional<B: SearchBackend>(
    backend: Option<&B>,
    query: &str,
    num: usize,
) -> Option<Fetched> {
    match backend {
        Some(b) => Some((b.source(), b.search(query, num).await)),
        None => None,
    }
}

fn no_results_placeholder() -> RankedResult {
    RankedResult::unscored(SearchResult {
        title: NO_RESULTS_TITLE.into(),
        url: String::new(),
        snippet: NO_RESULTS_MESSAGE.into(),
        source: ResultSource::None,
        published_at: None,
    })
}

fn select_backend(settings: &SearchSettings) -> Backend {
    match settings.provider {
        SearchProvider::None => Backend::Disabled,
        SearchProvider::Stub => Backend::Stub,
        SearchProvider::NewsApi => match build_news(settings) {
            Ok(b) => Backend::News(b),
            Err(err) => Backend::Unavailable(err.to_string()),
        },
        SearchProvider::Cse => match build_cse(settings) {
            Ok(b) => Backend::Cse(b),
            Err(err) => Backend::Unavailable(err.to_string()),
        },
        SearchProvider::Hybrid => {
            let cse = build_cse(settings)
                .inspect_err(|err| tracing::debug!(error = %err, "hybrid: cse disabled"))
                .ok();
            let news = build_news(settings)
                .inspect_err(|err| tracing::debug!(error = %err, "hybrid: news disabled"))
                .ok();
            if cse.is_none() && news.is_none() {
                Backend::Unavailable("no hybrid backend has credentials".into())
            } else {
                Backend::Hybrid { cse, news }
            }
        }
    }
}

fn build_news(settings: &SearchSettings) -> Result<NewsApiBackend, SearchError> {
    let key = settings.credentials.news().ok_or_else(|| {
        SearchError::MissingCredential(crate::config::NEWS_API_KEY_ENV.into())
    })?;
    NewsApiBackend::new(key, settings.language.as_str(), settings.timeout_seconds)
}

fn build_cse(settings: &SearchSettings) -> Result<CseBackend, SearchError> {
    let (key, cx) = settings.credentials.cse().ok_or_else(|| {
        SearchError::MissingCredential(format!(
            "{} and {}",
            crate::config::CSE_API_KEY_ENV,
            crate::config::CSE_ENGINE_ID_ENV
        ))
    })?;
    CseBackend::new(key, cx, settings.language.as_str(), settings.timeout_seconds)
}
