//! Build job queue
//!
//! The orchestration service only needs the enqueue contract
//! ([`JobSender`]). [`BuildJobQueue`] is an in-process implementation with
//! per-feed de-duplication, and [`BuildWorker`] drains it by refreshing feeds.

pub mod job_queue;
pub mod types;
pub mod worker;

pub use job_queue::{BuildJobQueue, JobSender};
pub use types::{BuildJob, BuildQueueStats};
pub use worker::{BuildWorker, DrainSummary};

#[cfg(test)]
pub use job_queue::MockJobSender;
