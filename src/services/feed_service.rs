//! Feed orchestration service
//!
//! Accepts feed creation requests, persists feed records, answers queries and
//! hands build work to the queue. The service holds no mutable state of its
//! own; every call works on a freshly loaded record.

use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::tier_policy::TierPolicy;
use crate::builders::BuilderRegistry;
use crate::errors::{AppError, AppResult, RepositoryError};
use crate::models::{ChannelInfo, CreateFeedRequest, Feed, Identity, Item, Metadata, Podcast};
use crate::queue::{BuildJob, JobSender};
use crate::repositories::FeedRepository;
use crate::utils::{IdGenerator, UrlUtils, with_cancellation};

/// Orchestrates tier policy, ID generation, storage and the build queue
pub struct FeedService {
    id_generator: Arc<dyn IdGenerator>,
    storage: Arc<dyn FeedRepository>,
    queue: Arc<dyn JobSender>,
    builders: BuilderRegistry,
    policy: TierPolicy,
}

impl FeedService {
    pub fn new(
        id_generator: Arc<dyn IdGenerator>,
        storage: Arc<dyn FeedRepository>,
        queue: Arc<dyn JobSender>,
        builders: BuilderRegistry,
        policy: TierPolicy,
    ) -> Self {
        Self {
            id_generator,
            storage,
            queue,
            builders,
            policy,
        }
    }

    pub fn builders(&self) -> &BuilderRegistry {
        &self.builders
    }

    /// Create and persist a feed, returning its hash ID
    ///
    /// # Errors
    /// - `UnrecognizedUrl` when no provider pattern matches
    /// - `UnsupportedProvider` / `UnsupportedLinkType` when no builder can serve it
    /// - `Generation` / `Storage` on infrastructure failures
    pub async fn create_feed(
        &self,
        request: &CreateFeedRequest,
        identity: &Identity,
        cancel: &CancellationToken,
    ) -> AppResult<String> {
        info!("Creating feed for {}", request.url);

        let link = UrlUtils::parse_feed_url(&request.url)?;
        let builder = self.builders.get(link.provider)?;
        if !builder.supported_link_types().contains(&link.link_type) {
            return Err(AppError::UnsupportedLinkType {
                provider: link.provider,
                link_type: link.link_type,
            });
        }

        let params = self.policy.resolve(request, identity);

        let seed = format!(
            "{}|{}|{}|{}|{}|{}",
            link.provider, link.link_type, link.item_id, params.page_size, params.quality, params.format
        );
        let hash_id = self.id_generator.generate(&seed)?;

        let now = Utc::now();
        let feed = Feed {
            hash_id: hash_id.clone(),
            user_id: identity.user_id.clone(),
            provider: link.provider,
            link_type: link.link_type,
            item_url: link.canonical_url(),
            item_id: link.item_id,
            page_size: params.page_size,
            quality: params.quality,
            format: params.format,
            feature_level: identity.feature_level,
            last_id: None,
            episodes: Vec::new(),
            channel: None,
            created_at: now,
            last_access: now,
        };

        with_cancellation(cancel, "save feed", async {
            Ok(self.storage.save_feed(&feed).await?)
        })
        .await?;

        info!(
            "Successfully created feed {} ({} {} {}, page size {})",
            hash_id, feed.provider, feed.link_type, feed.item_id, feed.page_size
        );
        Ok(hash_id)
    }

    /// Read a persisted feed; never triggers a build
    pub async fn query_feed(&self, hash_id: &str) -> AppResult<Feed> {
        let hash_id = validate_hash_id(hash_id)?;
        self.storage
            .get_feed(hash_id)
            .await
            .map_err(lookup_error)
    }

    /// Enqueue a rebuild and return the feed as it was before the build
    pub async fn build_feed(&self, hash_id: &str, cancel: &CancellationToken) -> AppResult<Feed> {
        let feed = self.load_feed(hash_id, cancel).await?;

        let job = BuildJob::for_feed(&feed);
        debug!("Submitting build job {} for feed {}", job.job_id, feed.hash_id);

        with_cancellation(cancel, "enqueue build", async {
            Ok(self.queue.add(job).await?)
        })
        .await?;

        info!("Queued build for feed {}", feed.hash_id);
        Ok(feed)
    }

    /// Metadata view; counters the store has never written read as zero
    pub async fn get_metadata(&self, hash_id: &str) -> AppResult<Metadata> {
        let hash_id = validate_hash_id(hash_id)?;
        let record = self
            .storage
            .get_metadata(hash_id)
            .await
            .map_err(lookup_error)?;
        Ok(Metadata::from(record))
    }

    /// Run a build in-process and persist the merged result
    ///
    /// New episodes go ahead of the known ones, duplicates by ID are dropped,
    /// the list is cut to the feed's page size and `last_id` moves to the
    /// newest episode. Returns the podcast with the merged episode list.
    pub async fn refresh_feed(&self, hash_id: &str, cancel: &CancellationToken) -> AppResult<Podcast> {
        let mut feed = self.load_feed(hash_id, cancel).await?;
        let builder = self.builders.get(feed.provider)?;

        let mut podcast = builder.build(&feed, cancel).await?;
        let fresh = podcast.items.len();

        merge_episodes(&mut feed, std::mem::take(&mut podcast.items));
        podcast.items = feed.episodes.clone();
        feed.channel = Some(ChannelInfo::from(&podcast));
        feed.last_access = Utc::now();

        with_cancellation(cancel, "save feed", async {
            Ok(self.storage.save_feed(&feed).await?)
        })
        .await?;

        info!(
            "Successfully refreshed feed {}: {} new, {} total episodes",
            feed.hash_id,
            fresh,
            feed.episodes.len()
        );
        Ok(podcast)
    }

    async fn load_feed(&self, hash_id: &str, cancel: &CancellationToken) -> AppResult<Feed> {
        let hash_id = validate_hash_id(hash_id)?;
        with_cancellation(cancel, "load feed", async {
            self.storage
                .get_feed(hash_id)
                .await
                .map_err(lookup_error)
        })
        .await
    }
}

fn validate_hash_id(hash_id: &str) -> AppResult<&str> {
    let trimmed = hash_id.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("feed id must not be empty"));
    }
    Ok(trimmed)
}

/// Storage "not found" is a client-visible NotFound; anything else stays a storage error
fn lookup_error(error: RepositoryError) -> AppError {
    match error {
        RepositoryError::NotFound { resource, id } => AppError::NotFound { resource, id },
        other => AppError::Storage(other),
    }
}

fn merge_episodes(feed: &mut Feed, fresh: Vec<Item>) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged: Vec<Item> = fresh
        .into_iter()
        .chain(std::mem::take(&mut feed.episodes))
        .filter(|item| seen.insert(item.id.clone()))
        .collect();

    if feed.page_size > 0 {
        merged.truncate(feed.page_size as usize);
    }

    if let Some(newest) = merged.first() {
        feed.last_id = Some(newest.id.clone());
    }
    feed.episodes = merged;
}
