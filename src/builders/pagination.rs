//! Generic upstream listing pagination
//!
//! Both providers expose their video listings as pages, Vimeo by page number
//! and YouTube by opaque token. [`query_videos`] walks such a listing in
//! upstream order and fills a [`Podcast`] with mapped episodes.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::errors::{AppResult, ItemMappingError};
use crate::models::{Item, Podcast};
use crate::utils::with_cancellation;

/// Position in an upstream listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCursor {
    Number(u32),
    Token(String),
}

/// One page of upstream results
#[derive(Debug, Clone)]
pub struct Page<V> {
    pub items: Vec<V>,
    /// Cursor of the following page, `None` on the last page
    pub next: Option<PageCursor>,
}

impl<V> Page<V> {
    pub fn last(items: Vec<V>) -> Self {
        Self { items, next: None }
    }
}

/// A page-fetch capability bound to one upstream listing
#[async_trait]
pub trait PageSource: Send + Sync {
    type Video: Send + Sync;

    /// Items requested per upstream call
    fn default_page_size(&self) -> u32;

    fn first_cursor(&self) -> PageCursor {
        PageCursor::Number(1)
    }

    async fn fetch_page(&self, cursor: &PageCursor, per_page: u32) -> AppResult<Page<Self::Video>>;

    /// Provider-native ID of a listed video, used for the LastID stop
    fn video_id<'v>(&self, video: &'v Self::Video) -> Option<&'v str>;
}

/// Per-build listing parameters
#[derive(Debug, Clone, Copy)]
pub struct ListingParams<'a> {
    /// Maximum episodes to collect; 0 means the source's default page size
    pub page_size: u32,
    /// Newest video already known from a previous build
    pub last_id: Option<&'a str>,
}

/// Walk a listing, mapping videos into episodes until one stop rule fires:
/// `page_size` episodes collected, no further page, or the video matching
/// `last_id` reached (it is not included).
///
/// Videos that fail to map, or map to an invalid item, are skipped. A failed
/// page fetch fails the whole query.
pub async fn query_videos<S, F>(
    source: &S,
    podcast: &mut Podcast,
    params: ListingParams<'_>,
    cancel: &CancellationToken,
    mut map_video: F,
) -> AppResult<()>
where
    S: PageSource,
    F: FnMut(&S::Video) -> Result<Item, ItemMappingError> + Send,
{
    let per_page = source.default_page_size();
    let limit = if params.page_size == 0 {
        per_page
    } else {
        params.page_size
    } as usize;

    let mut added = 0usize;
    let mut skipped = 0usize;
    let mut cursor = Some(source.first_cursor());

    'pages: while let Some(current) = cursor.take() {
        let page = with_cancellation(
            cancel,
            "fetch video page",
            source.fetch_page(&current, per_page),
        )
        .await?;

        if page.items.is_empty() {
            break;
        }

        for video in &page.items {
            if added >= limit {
                break 'pages;
            }

            let video_id = source.video_id(video);
            if params.last_id.is_some() && video_id == params.last_id {
                debug!("Reached last known video {:?}, stopping", params.last_id);
                break 'pages;
            }

            match map_video(video) {
                Ok(item) if item.is_valid() => {
                    podcast.add_item(item);
                    added += 1;
                }
                Ok(item) => {
                    skipped += 1;
                    debug!("Skipping video {}: incomplete episode", item.id);
                }
                Err(e) => {
                    skipped += 1;
                    debug!("Skipping video: {}", e);
                }
            }
        }

        if added >= limit {
            break;
        }
        cursor = page.next;
    }

    debug!("Collected {} episodes ({} skipped)", added, skipped);
    Ok(())
}
