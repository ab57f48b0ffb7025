//! Background worker draining the build queue

use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::job_queue::BuildJobQueue;
use crate::config::WorkerConfig;
use crate::errors::AppError;
use crate::services::FeedService;

/// Floor for the poll period; `tokio::time::interval` rejects a zero period
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Outcome of one pass over the queue
#[derive(Debug, Default)]
pub struct DrainSummary {
    /// Jobs taken off the queue
    pub processed: usize,
    /// Feed ID and error of every build that did not finish
    pub failures: Vec<(String, AppError)>,
}

impl DrainSummary {
    pub fn succeeded(&self) -> usize {
        self.processed - self.failures.len()
    }
}

/// Takes pending build jobs off the queue and refreshes their feeds
pub struct BuildWorker {
    queue: Arc<BuildJobQueue>,
    service: Arc<FeedService>,
    poll_interval: Duration,
    batch_size: usize,
}

impl BuildWorker {
    pub fn new(queue: Arc<BuildJobQueue>, service: Arc<FeedService>, config: &WorkerConfig) -> Self {
        Self {
            queue,
            service,
            poll_interval: config.poll_interval.max(MIN_POLL_INTERVAL),
            batch_size: config.batch_size.max(1),
        }
    }

    /// Poll the queue until cancelled
    pub async fn run(&self, cancel: CancellationToken) {
        info!(
            "Starting build worker (poll interval: {:?}, batch size: {})",
            self.poll_interval, self.batch_size
        );
        let mut poll = interval(self.poll_interval);

        loop {
            tokio::select! {
                _ = poll.tick() => {
                    self.drain_once(&cancel).await;
                }
                _ = cancel.cancelled() => {
                    info!("Build worker received cancellation signal");
                    break;
                }
            }
        }

        info!("Build worker stopped");
    }

    /// Process one batch of pending jobs
    ///
    /// A failed build is logged, reported in the summary and the job is still
    /// marked completed; the feed record keeps its previous episodes.
    pub async fn drain_once(&self, cancel: &CancellationToken) -> DrainSummary {
        let jobs = self.queue.take_pending(self.batch_size).await;
        let mut summary = DrainSummary {
            processed: jobs.len(),
            failures: Vec::new(),
        };
        if jobs.is_empty() {
            return summary;
        }

        debug!("Processing {} build jobs", jobs.len());

        for job in jobs {
            match self.service.refresh_feed(&job.id, cancel).await {
                Ok(podcast) => {
                    debug!("Build job {} produced {} episodes", job.job_id, podcast.len());
                }
                Err(e @ AppError::Cancelled { .. }) => {
                    warn!("Build job {} for feed {} cancelled", job.job_id, job.id);
                    summary.failures.push((job.id.clone(), e));
                }
                Err(e) => {
                    error!("Build job {} for feed {} failed: {}", job.job_id, job.id, e);
                    summary.failures.push((job.id.clone(), e));
                }
            }
            self.queue.mark_completed(job.job_id).await;
        }

        summary
    }
}
