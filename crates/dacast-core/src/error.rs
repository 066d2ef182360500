//! Error types for Dacast Core

use crate::identifier::Provider;
use thiserror::Error;

/// Result type alias for resolution operations
pub type Result<T> = std::result::Result<T, Error>;

/// Resolution error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Identifier errors
    #[error("Malformed content id `{raw}`: {reason}")]
    MalformedIdentifier { raw: String, reason: String },

    #[error("Unrecognized content id: `{0}`")]
    UnrecognizedIdentifier(String),

    // Fetch errors
    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    // Extraction errors
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Malformed entry {index} in `{path}`: {reason}")]
    MalformedEntry {
        path: String,
        index: usize,
        reason: String,
    },

    #[error("{resolver} resolver cannot handle a {identifier} identifier")]
    ProviderMismatch {
        resolver: Provider,
        identifier: Provider,
    },

    // Lifecycle errors
    #[error("Resolution cancelled")]
    Cancelled,

    #[error("Player already has a source")]
    AlreadyLoaded,

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Create a malformed identifier error
    pub fn malformed(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedIdentifier {
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing field error for a dotted field path
    pub fn missing(path: impl Into<String>) -> Self {
        Error::MissingRequiredField(path.into())
    }

    /// Returns true for transport, status and decode failures
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Error::Network { .. } | Error::UnexpectedStatus { .. } | Error::Decode { .. }
        )
    }

    /// Returns true if wrapping the whole resolution in a retry could help.
    ///
    /// The core itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Network { .. } => true,
            Error::UnexpectedStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Returns the error code for analytics
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::MalformedIdentifier { .. } => "MALFORMED_IDENTIFIER",
            Error::UnrecognizedIdentifier(_) => "UNRECOGNIZED_IDENTIFIER",
            Error::Network { .. } => "NETWORK",
            Error::UnexpectedStatus { .. } => "HTTP_STATUS",
            Error::Decode { .. } => "DECODE",
            Error::MissingRequiredField(_) => "MISSING_FIELD",
            Error::MalformedEntry { .. } => "EXTRACTION",
            Error::ProviderMismatch { .. } => "PROVIDER_MISMATCH",
            Error::Cancelled => "CANCELLED",
            Error::AlreadyLoaded => "ALREADY_LOADED",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }
}
