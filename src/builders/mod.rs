//! Provider feed builders
//!
//! A [`FeedBuilder`] turns a persisted [`Feed`](crate::models::Feed) into a
//! canonical [`Podcast`](crate::models::Podcast) by querying one video
//! platform. The [`BuilderRegistry`] selects the builder by provider.

pub mod media;
pub mod pagination;
pub mod registry;
pub mod traits;
pub mod vimeo;
pub mod youtube;

pub use pagination::{ListingParams, Page, PageCursor, PageSource, query_videos};
pub use registry::BuilderRegistry;
pub use traits::FeedBuilder;
pub use vimeo::{VimeoApi, VimeoBuilder, VimeoHttpApi};
pub use youtube::{YoutubeApi, YoutubeBuilder, YoutubeHttpApi};

#[cfg(test)]
pub use traits::MockFeedBuilder;
