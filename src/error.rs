//! Error types shared by the API client and the workflows

use std::time::Duration;

use thiserror::Error;

/// Transport-level failures reported by a [`RecommenderApi`](crate::model::RecommenderApi)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("API returned status {0}")]
    Status(u16),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Parse error: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Problems detected on the client before any request is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingFields,

    #[error("Rating must be between 1 and 5 stars (got {0}).")]
    InvalidRating(u8),

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Select a song first.")]
    NoSongSelected,

    #[error("Your feedback is already being submitted.")]
    SubmissionInProgress,
}

/// Discriminant of a [`WorkflowError`], for callers that branch on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
}

/// The error a workflow records in its state.
///
/// `Display` is the message shown to the user; the transport detail of a
/// network failure stays reachable through `source()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    Network {
        message: &'static str,
        #[source]
        source: ApiError,
    },
}

impl WorkflowError {
    pub fn network(message: &'static str, source: ApiError) -> Self {
        Self::Network { message, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Network { .. } => ErrorKind::Network,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Network {
                source: ApiError::Timeout(_),
                ..
            }
        )
    }
}
