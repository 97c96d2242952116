//! Error types for the sales-coach host.

/// Top-level error type for the sales-coach host.
#[derive(Debug, thiserror::Error)]
pub enum CoachError {
    /// Search subsystem error (only argument and settings validation reach here).
    #[error("search error: {0}")]
    Search(#[from] sales_search::SearchError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, CoachError>;
