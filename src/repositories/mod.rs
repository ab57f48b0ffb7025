//! Storage collaborators
//!
//! Durable storage lives outside this crate; [`FeedRepository`] is the
//! contract the orchestration service depends on, and
//! [`InMemoryFeedRepository`] backs the CLI and the tests.

pub mod memory;
pub mod traits;

pub use memory::InMemoryFeedRepository;
pub use traits::FeedRepository;

#[cfg(test)]
pub use traits::MockFeedRepository;
