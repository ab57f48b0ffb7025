use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::traits::FeedRepository;
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{Feed, FeedMetadata};

#[derive(Debug, Clone)]
struct StoredFeed {
    feed: Feed,
    downloads: Option<u64>,
}

/// Process-local feed store
#[derive(Debug, Clone, Default)]
pub struct InMemoryFeedRepository {
    feeds: Arc<RwLock<HashMap<String, StoredFeed>>>,
}

impl InMemoryFeedRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bump the download counter of a feed, creating it on first use
    pub async fn record_download(&self, hash_id: &str) -> RepositoryResult<u64> {
        let mut feeds = self.feeds.write().await;
        let stored = feeds
            .get_mut(hash_id)
            .ok_or_else(|| RepositoryError::not_found("feed", hash_id))?;

        let downloads = stored.downloads.unwrap_or(0) + 1;
        stored.downloads = Some(downloads);
        Ok(downloads)
    }

    pub async fn len(&self) -> usize {
        self.feeds.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.feeds.read().await.is_empty()
    }
}

#[async_trait]
impl FeedRepository for InMemoryFeedRepository {
    async fn save_feed(&self, feed: &Feed) -> RepositoryResult<()> {
        let mut feeds = self.feeds.write().await;
        let downloads = feeds.get(&feed.hash_id).and_then(|stored| stored.downloads);

        feeds.insert(
            feed.hash_id.clone(),
            StoredFeed {
                feed: feed.clone(),
                downloads,
            },
        );

        debug!("Saved feed {} ({} episodes)", feed.hash_id, feed.episodes.len());
        Ok(())
    }

    async fn get_feed(&self, hash_id: &str) -> RepositoryResult<Feed> {
        self.feeds
            .read()
            .await
            .get(hash_id)
            .map(|stored| stored.feed.clone())
            .ok_or_else(|| RepositoryError::not_found("feed", hash_id))
    }

    async fn get_metadata(&self, hash_id: &str) -> RepositoryResult<FeedMetadata> {
        let feeds = self.feeds.read().await;
        let stored = feeds
            .get(hash_id)
            .ok_or_else(|| RepositoryError::not_found("feed", hash_id))?;

        Ok(FeedMetadata {
            hash_id: stored.feed.hash_id.clone(),
            provider: stored.feed.provider,
            format: stored.feed.format,
            quality: stored.feed.quality,
            downloads: stored.downloads,
        })
    }
}
