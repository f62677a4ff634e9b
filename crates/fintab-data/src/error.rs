//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while fetching or parsing pages.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Url: \"{url}\". Response code: {status}")]
    BadResponse {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Retries exhausted
    #[error("Giving up on {url} after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Requested URL
        url: String,
        /// Number of attempts made
        attempts: u32,
        /// The error of the final attempt
        last: Box<DataError>,
    },

    /// Page does not have the expected structure
    #[error("Page structure error: {0}")]
    Structure(String),
}

impl DataError {
    /// Whether retrying the request could succeed.
    ///
    /// Transport failures, rate limiting and server errors are transient;
    /// client errors and parse failures are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(err) => err.is_timeout() || err.is_connect() || err.is_request(),
            Self::BadResponse { status, .. } => *status == 429 || *status >= 500,
            Self::RetriesExhausted { .. } | Self::Structure(_) => false,
        }
    }
}
