use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Feed, Format, LinkType, Quality};

/// Builds always start from the first upstream page
pub const BUILD_START: u32 = 1;

/// A request to rebuild one feed out-of-band
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildJob {
    /// Queue-local job identifier
    pub job_id: Uuid,
    /// Feed hash ID
    pub id: String,
    /// Canonical upstream resource URL
    pub url: String,
    pub start: u32,
    pub count: u32,
    pub last_id: Option<String>,
    pub link_type: LinkType,
    pub format: Format,
    pub quality: Quality,
    pub enqueued_at: DateTime<Utc>,
}

impl BuildJob {
    /// Job for the feed's current state: page 1, `count` = resolved page size
    pub fn for_feed(feed: &Feed) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            id: feed.hash_id.clone(),
            url: feed.item_url.clone(),
            start: BUILD_START,
            count: feed.page_size,
            last_id: feed.last_id.clone(),
            link_type: feed.link_type,
            format: feed.format,
            quality: feed.quality,
            enqueued_at: Utc::now(),
        }
    }
}

/// Statistics about the build queue state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildQueueStats {
    /// Jobs waiting for a worker
    pub pending_jobs: usize,
    /// Jobs handed to a worker and not yet completed
    pub running_jobs: usize,
    /// Jobs folded into an already pending job for the same feed
    pub deduplicated_jobs: u64,
}
