//! Application settings file.
//!
//! Only the search section of the sales-coach settings lives here. Missing
//! fields take their defaults, and an unrecognised `search_provider` value
//! resolves to `stub`.

use std::path::{Path, PathBuf};

use sales_search::config::{default_trusted_domains, SEARCH_PROVIDER_ENV};
use sales_search::{Credentials, SearchProvider, SearchSettings};
use serde::{Deserialize, Serialize};

use crate::error::{CoachError, Result};

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Which search backend to use.
    pub search_provider: SearchProvider,
    /// Maximum number of search results, `1..=20`.
    pub search_results_limit: usize,
    /// Trusted domain whitelist for ranking.
    pub search_trusted_domains: Vec<String>,
    /// Freshness window in days, `1..=365`.
    pub search_time_window_days: u32,
    /// Language hint for search backends.
    pub search_language: String,
    /// Per-backend timeout in seconds.
    pub search_timeout_seconds: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        let search = SearchSettings::default();
        Self {
            search_provider: search.provider,
            search_results_limit: search.results_limit,
            search_trusted_domains: default_trusted_domains(),
            search_time_window_days: search.time_window_days,
            search_language: search.language,
            search_timeout_seconds: search.timeout_seconds,
        }
    }
}

impl AppSettings {
    /// Load settings from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CoachError::Config(e.to_string()))
    }

    /// Load from `path` if it exists, otherwise use defaults. The
    /// `SEARCH_PROVIDER` environment variable overrides the file.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Like [`AppSettings::load`], reading overrides through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load_with(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = if path.exists() {
            tracing::info!(path = %path.display(), "loading settings");
            Self::from_file(path)?
        } else {
            tracing::info!(path = %path.display(), "settings file not found, using defaults");
            Self::default()
        };
        settings.apply_env_overrides(lookup);
        Ok(settings)
    }

    /// Apply `SEARCH_PROVIDER` from `lookup` over the file value. An
    /// unrecognised value resolves to `stub`.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup(SEARCH_PROVIDER_ENV) {
            tracing::debug!(value = %raw, "search provider overridden from environment");
            self.search_provider = SearchProvider::parse_lenient(&raw);
        }
    }

    /// Save settings to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the settings cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CoachError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default settings path: `~/.config/sales-coach/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("sales-coach").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("sales-coach")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/sales-coach-config/config.toml")
        }
    }

    /// Build validated search settings with the given credentials.
    ///
    /// # Errors
    ///
    /// Returns [`CoachError::Search`] if a numeric field is out of range.
    pub fn to_search_settings(&self, credentials: Credentials) -> Result<SearchSettings> {
        let settings = SearchSettings {
            provider: self.search_provider,
            results_limit: self.search_results_limit,
            trusted_domains: self.search_trusted_domains.clone(),
            time_window_days: self.search_time_window_days,
            language: self.search_language.clone(),
            timeout_seconds: self.search_timeout_seconds,
            credentials,
        };
        settings.validate()?;
        Ok(settings)
    }
}
