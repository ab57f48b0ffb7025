//! In-process build queue with per-feed de-duplication

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::types::{BuildJob, BuildQueueStats};
use crate::errors::QueueError;

/// Enqueue contract consumed by the orchestration service
///
/// Success means "accepted for async processing", not "built".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobSender: Send + Sync {
    async fn add(&self, job: BuildJob) -> Result<(), QueueError>;
}

/// FIFO build queue keeping at most one pending job per feed
#[derive(Debug)]
pub struct BuildJobQueue {
    pending: Arc<RwLock<VecDeque<BuildJob>>>,
    /// Feed IDs with a pending job
    pending_feeds: Arc<RwLock<HashSet<String>>>,
    /// job_id -> feed ID
    running: Arc<RwLock<HashMap<Uuid, String>>>,
    capacity: usize,
    closed: AtomicBool,
    deduplicated: AtomicU64,
}

impl BuildJobQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: Arc::new(RwLock::new(VecDeque::new())),
            pending_feeds: Arc::new(RwLock::new(HashSet::new())),
            running: Arc::new(RwLock::new(HashMap::new())),
            capacity,
            closed: AtomicBool::new(false),
            deduplicated: AtomicU64::new(0),
        }
    }

    /// Enqueue a job unless one is already pending for the same feed
    ///
    /// Returns `Ok(true)` if the job was queued, `Ok(false)` if it was folded
    /// into the pending one.
    pub async fn enqueue(&self, job: BuildJob) -> Result<bool, QueueError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(QueueError::Rejected {
                message: "queue is closed".to_string(),
            });
        }

        let mut pending_feeds = self.pending_feeds.write().await;
        if pending_feeds.contains(&job.id) {
            self.deduplicated.fetch_add(1, Ordering::Relaxed);
            debug!("Build already pending for feed {}, skipping duplicate", job.id);
            return Ok(false);
        }

        let mut pending = self.pending.write().await;
        if pending.len() >= self.capacity {
            warn!("Build queue full ({} jobs), rejecting feed {}", pending.len(), job.id);
            return Err(QueueError::Rejected {
                message: format!("queue is full ({} pending jobs)", self.capacity),
            });
        }

        pending_feeds.insert(job.id.clone());
        info!(
            "Enqueued build job {} for feed {} (count: {}, last_id: {})",
            job.job_id,
            job.id,
            job.count,
            job.last_id.as_deref().unwrap_or("-")
        );
        pending.push_back(job);

        Ok(true)
    }

    /// Hand up to `limit` pending jobs to a worker, oldest first
    ///
    /// Taken jobs count as running until [`mark_completed`](Self::mark_completed).
    pub async fn take_pending(&self, limit: usize) -> Vec<BuildJob> {
        let mut pending_feeds = self.pending_feeds.write().await;
        let mut pending = self.pending.write().await;
        let mut running = self.running.write().await;

        let take = limit.min(pending.len());
        let jobs: Vec<BuildJob> = pending.drain(..take).collect();

        for job in &jobs {
            pending_feeds.remove(&job.id);
            running.insert(job.job_id, job.id.clone());
        }

        if !jobs.is_empty() {
            debug!("Retrieved {} build jobs from queue", jobs.len());
        }

        jobs
    }

    pub async fn mark_completed(&self, job_id: Uuid) {
        if let Some(feed_id) = self.running.write().await.remove(&job_id) {
            debug!("Build job {} for feed {} completed", job_id, feed_id);
        } else {
            warn!("Attempted to mark unknown build job {} as completed", job_id);
        }
    }

    /// Stop accepting new jobs; pending jobs can still be taken
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        info!("Build queue closed");
    }

    pub async fn pending_count(&self) -> usize {
        self.pending.read().await.len()
    }

    pub async fn running_count(&self) -> usize {
        self.running.read().await.len()
    }

    pub async fn is_pending(&self, feed_id: &str) -> bool {
        self.pending_feeds.read().await.contains(feed_id)
    }

    pub async fn stats(&self) -> BuildQueueStats {
        BuildQueueStats {
            pending_jobs: self.pending.read().await.len(),
            running_jobs: self.running.read().await.len(),
            deduplicated_jobs: self.deduplicated.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl JobSender for BuildJobQueue {
    async fn add(&self, job: BuildJob) -> Result<(), QueueError> {
        self.enqueue(job).await.map(|_| ())
    }
}
