use crate::core::io::module::ModuleError;
use crate::core::references::{ReferenceError, ReferenceId};
use std::path::PathBuf;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch reference conformer {id}: HTTP status {status}")]
    Status { id: ReferenceId, status: u16 },

    #[error("Failed to fetch reference conformer {id}: {source}")]
    Transport {
        id: ReferenceId,
        #[source]
        source: BoxError,
    },

    #[error("Failed to read body of reference conformer {id}: {source}")]
    Body {
        id: ReferenceId,
        #[source]
        source: BoxError,
    },
}

impl FetchError {
    /// Server errors and connection-level failures may succeed on a second attempt;
    /// client errors such as 404 never do.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status >= 500,
            Self::Transport { .. } | Self::Body { .. } => true,
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to initialize HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error("Failed to write output file '{path}': {source}", path = path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read back output file '{path}': {source}", path = path.display())]
    ReadBack {
        path: PathBuf,
        #[source]
        source: ModuleError,
    },

    #[error("Output file '{path}' does not match the fetched references: {reason}", path = path.display())]
    Verification { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(code: &str) -> ReferenceId {
        code.parse().unwrap()
    }

    #[test]
    fn status_error_names_the_failing_identifier() {
        let err = FetchError::Status {
            id: id("BA13"),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch reference conformer BA13: HTTP status 404"
        );
    }

    #[test]
    fn only_server_errors_and_transport_failures_are_retryable() {
        let not_found = FetchError::Status {
            id: id("AA00"),
            status: 404,
        };
        let unavailable = FetchError::Status {
            id: id("AA00"),
            status: 503,
        };
        let reset = FetchError::Transport {
            id: id("AA00"),
            source: "connection reset".into(),
        };
        assert!(!not_found.is_retryable());
        assert!(unavailable.is_retryable());
        assert!(reset.is_retryable());
    }

    #[test]
    fn pipeline_error_is_transparent_for_fetch_failures() {
        let err: PipelineError = FetchError::Status {
            id: id("ZZ01"),
            status: 500,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Failed to fetch reference conformer ZZ01: HTTP status 500"
        );
    }
}
