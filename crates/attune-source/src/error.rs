//! Record source error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading the record collection.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Http { url: String, status: u16 },

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// A local catalog file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tabular data could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] csv::Error),
}

impl SourceError {
    /// Returns `true` when the error is transient and the fetch may
    /// succeed if retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::Io { .. } | Self::Parse(_) => false,
        }
    }
}

/// Convenience alias for record source results.
pub type SourceResult<T> = std::result::Result<T, SourceError>;
