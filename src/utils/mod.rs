//! Utility modules for vidcast
//!
//! Reusable helpers shared by the builders and the orchestration service.

pub mod cancel;
pub mod duration;
pub mod hash_id;
pub mod http_client;
pub mod url;

pub use cancel::with_cancellation;
pub use hash_id::{HashIdGenerator, IdGenerator};
pub use http_client::UpstreamHttpClient;
pub use url::{FeedLink, UrlUtils};
