//! Centralized error handling for vidcast
//!
//! Every fallible operation in the library returns one of the error types in
//! [`types`]. The orchestration surface (`FeedService`) only ever surfaces
//! [`AppError`]; the narrower enums describe failures inside a single layer
//! and convert into it with `?`.
//!
//! # Error Categories
//!
//! - **Validation Errors**: malformed or unrecognized feed URLs, link types a provider cannot serve
//! - **Upstream Errors**: video platform API failures (network, auth, rate limits, non-2xx)
//! - **Metadata Errors**: required channel/group/user fields missing from an upstream response
//! - **Repository Errors**: storage collaborator failures, including "not found"
//! - **Queue Errors**: the build queue refused a job
//!
//! # Usage
//!
//! ```rust
//! use vidcast::errors::{AppError, AppResult};
//!
//! fn lookup(id: &str) -> AppResult<String> {
//!     Err(AppError::not_found("feed", id))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Repository Results
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Convenience type alias for upstream API Results
pub type UpstreamResult<T> = Result<T, UpstreamError>;
