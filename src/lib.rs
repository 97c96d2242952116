//! sales-coach host library.
//!
//! Wires the `sales-search` crate into the coaching application: loads the
//! search section of the settings file, reads backend credentials from the
//! environment, and gathers reference sources for advice generation.

pub mod config;
pub mod error;
pub mod sources;

pub use config::AppSettings;
pub use error::{CoachError, Result};
pub use sources::{industry_news_query, ReferenceSources};

pub use sales_search;
