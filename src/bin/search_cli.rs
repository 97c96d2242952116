//! Command-line search for sales-coach.
//!
//! Runs one search with the configured provider and prints the ranked
//! outcome as JSON.

use clap::Parser;
use sales_coach::sales_search::{Credentials, SearchProvider, WebSearchProvider};
use sales_coach::AppSettings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Search recent news and print ranked results as JSON.
#[derive(Parser)]
#[command(name = "sales-coach-search", version, about)]
struct Cli {
    /// Search query.
    query: String,

    /// Number of results to return.
    #[arg(short, long, default_value_t = 3)]
    num: usize,

    /// Path to TOML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the search provider (none, cse, newsapi, stub, hybrid).
    #[arg(short, long)]
    provider: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sales_coach=info,sales_search=info")),
        )
        .init();

    let cli = Cli::parse();

    let path = cli.config.unwrap_or_else(AppSettings::default_config_path);
    let mut settings = AppSettings::load(&path)?;
    if let Some(ref raw) = cli.provider {
        settings.search_provider = SearchProvider::parse_lenient(raw);
    }

    let search_settings = settings.to_search_settings(Credentials::from_env())?;
    let provider = WebSearchProvider::new(search_settings)?;
    let outcome = provider.search(&cli.query, cli.num).await?;

    if let Some(notice) = outcome.offline_notice() {
        tracing::warn!("{notice}");
    }
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
