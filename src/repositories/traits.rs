//! Repository trait definitions

use async_trait::async_trait;

use crate::errors::RepositoryResult;
use crate::models::{Feed, FeedMetadata};

/// Record store for feeds and their derived metadata
///
/// Implementations must report a missing record as
/// [`RepositoryError::NotFound`](crate::errors::RepositoryError::NotFound) so
/// callers can tell "absent" apart from a backend failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedRepository: Send + Sync {
    /// Insert or replace a feed record keyed by its hash ID
    async fn save_feed(&self, feed: &Feed) -> RepositoryResult<()>;

    /// Fetch a feed record by hash ID
    async fn get_feed(&self, hash_id: &str) -> RepositoryResult<Feed>;

    /// Fetch the metadata record; counters the store has never written are `None`
    async fn get_metadata(&self, hash_id: &str) -> RepositoryResult<FeedMetadata>;
}
