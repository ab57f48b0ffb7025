//! Error type definitions for vidcast
//!
//! A small hierarchy: [`AppError`] is what callers of the feed service see,
//! the other enums belong to one layer each and convert into it.

use thiserror::Error;

use crate::models::{LinkType, Provider};

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed input that is not a URL problem
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The feed URL did not match any known provider pattern
    #[error("Unrecognized feed URL: {url}")]
    UnrecognizedUrl { url: String },

    /// No builder registered for the provider
    #[error("Unsupported provider: {provider}")]
    UnsupportedProvider { provider: Provider },

    /// The provider has a builder, but it cannot serve this kind of link
    #[error("Unsupported link type: {link_type} for {provider}")]
    UnsupportedLinkType { provider: Provider, link_type: LinkType },

    /// Upstream video platform API call failed
    #[error("Upstream query failed: {0}")]
    Upstream(#[from] UpstreamError),

    /// A required channel/group/user field is missing upstream
    #[error("Feed metadata error: {provider} {resource} is missing '{field}'")]
    FeedMetadata {
        provider: Provider,
        resource: String,
        field: String,
    },

    /// Resource not found errors
    #[error("Not found: {resource} with id {id}")]
    NotFound { resource: String, id: String },

    /// Identifier generator could not produce a fresh ID
    #[error("ID generation failed: {message}")]
    Generation { message: String },

    /// Storage collaborator errors
    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),

    /// Queue collaborator errors
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    /// The caller cancelled the operation or its deadline passed
    #[error("Operation cancelled: {operation}")]
    Cancelled { operation: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Storage layer specific errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Record not found
    #[error("Record not found: {resource} with id {id}")]
    NotFound { resource: String, id: String },

    /// The record store could not be reached or refused the operation
    #[error("Backend failure: {message}")]
    Backend { message: String },

    /// Data serialization/deserialization failures
    #[error("Serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Upstream video platform API errors
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Network connection timeouts
    #[error("Connection timeout: {url}")]
    Timeout { url: String },

    /// Connection-level failures (DNS, TLS, reset)
    #[error("Network error: {message}")]
    Network { message: String },

    /// API key rejected or quota exhausted
    #[error("Authentication failed: {provider} - {message}")]
    AuthenticationFailed { provider: String, message: String },

    /// Rate limiting errors
    #[error("Rate limited: {provider} - retry after {retry_after} seconds")]
    RateLimited { provider: String, retry_after: u64 },

    /// Non-2xx responses not covered above
    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    /// The response body was not what the API documents
    #[error("Parse error: {provider} - {message}")]
    Parse { provider: String, message: String },
}

/// Build queue errors
#[derive(Error, Debug)]
pub enum QueueError {
    /// Queue is closed or over capacity
    #[error("Job rejected: {message}")]
    Rejected { message: String },
}

/// Why a single upstream video could not become an episode.
///
/// Never surfaced to callers; the video is skipped and the page continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemMappingError {
    #[error("video is missing an id")]
    MissingId,

    #[error("video {video_id} is missing '{field}'")]
    MissingField { video_id: String, field: &'static str },

    #[error("video {video_id} has no media size and no duration to estimate one")]
    UnknownSize { video_id: String },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<R: Into<String>, I: Into<String>>(resource: R, id: I) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Create a feed metadata error for a missing upstream field
    pub fn feed_metadata<R: Into<String>, F: Into<String>>(
        provider: Provider,
        resource: R,
        field: F,
    ) -> Self {
        Self::FeedMetadata {
            provider,
            resource: resource.into(),
            field: field.into(),
        }
    }

    /// Create a cancellation error
    pub fn cancelled<S: Into<String>>(operation: S) -> Self {
        Self::Cancelled {
            operation: operation.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True for errors a client caused and can fix by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::UnrecognizedUrl { .. }
                | Self::UnsupportedProvider { .. }
                | Self::UnsupportedLinkType { .. }
                | Self::NotFound { .. }
        )
    }
}

impl UpstreamError {
    /// Create an authentication failed error
    pub fn auth_failed<P: Into<String>, M: Into<String>>(provider: P, message: M) -> Self {
        Self::AuthenticationFailed {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse<P: Into<String>, M: Into<String>>(provider: P, message: M) -> Self {
        Self::Parse {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

impl RepositoryError {
    /// Create a not found error
    pub fn not_found<R: Into<String>, I: Into<String>>(resource: R, id: I) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }
}
