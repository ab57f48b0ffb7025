//! Feed builder trait definitions

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::errors::AppResult;
use crate::models::{Feed, LinkType, Podcast, Provider};

/// Builds a canonical podcast document for one provider
///
/// `build` queries the resource metadata first and paginates episodes only
/// when that succeeds. The cancellation token must abort in-flight upstream
/// calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedBuilder: Send + Sync {
    /// Provider this builder serves
    fn provider(&self) -> Provider;

    /// Link types this builder can query
    fn supported_link_types(&self) -> &'static [LinkType];

    async fn build(&self, feed: &Feed, cancel: &CancellationToken) -> AppResult<Podcast>;
}
