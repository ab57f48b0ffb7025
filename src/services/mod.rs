//! Service layer
//!
//! [`FeedService`] is the orchestration surface: it turns a creation request
//! into a persisted feed record, answers queries and submits builds.
//! [`TierPolicy`] resolves the effective page size, quality and format for a
//! caller's entitlement tier.

pub mod feed_service;
pub mod tier_policy;

pub use feed_service::FeedService;
pub use tier_policy::{ResolvedParams, TierPolicy};
