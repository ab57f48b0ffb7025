//! YouTube feed builder
//!
//! Every YouTube source is paged as a playlist: channels and users through
//! their uploads playlist. Playlist items carry no duration, so each page is
//! followed by one `videos` lookup for the listed IDs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

use super::media::{self, Picture, non_empty};
use super::pagination::{self, ListingParams, Page, PageCursor, PageSource};
use super::traits::FeedBuilder;
use crate::errors::{AppError, AppResult, ItemMappingError, UpstreamResult};
use crate::models::{Feed, Item, LinkType, Podcast, Provider};
use crate::utils::duration::{format_duration, parse_iso8601_duration};
use crate::utils::{UpstreamHttpClient, UrlUtils, with_cancellation};

/// API maximum for `maxResults`
pub const YOUTUBE_DEFAULT_PAGE_SIZE: u32 = 50;

const SUPPORTED_LINK_TYPES: &[LinkType] = &[LinkType::Channel, LinkType::User, LinkType::Playlist];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct YoutubeSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "channelTitle")]
    pub channel_title: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<DateTime<Utc>>,
    /// Keyed by size name (`default`, `medium`, `high`, ...)
    #[serde(default)]
    pub thumbnails: HashMap<String, Picture>,
    #[serde(rename = "resourceId")]
    pub resource_id: Option<YoutubeResourceId>,
}

impl YoutubeSnippet {
    fn pictures(&self) -> Vec<Picture> {
        self.thumbnails.values().cloned().collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct YoutubeResourceId {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct YoutubeRelatedPlaylists {
    pub uploads: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct YoutubeContentDetails {
    #[serde(rename = "relatedPlaylists")]
    pub related_playlists: Option<YoutubeRelatedPlaylists>,
    /// ISO-8601, videos only
    pub duration: Option<String>,
}

/// Entry of a `channels`, `playlists`, `playlistItems` or `videos` listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YoutubeResource {
    pub id: Option<String>,
    #[serde(default)]
    pub snippet: YoutubeSnippet,
    #[serde(rename = "contentDetails", default)]
    pub content_details: YoutubeContentDetails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct YoutubeList {
    #[serde(default)]
    pub items: Vec<YoutubeResource>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// YouTube Data API surface used by the builder
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait YoutubeApi: Send + Sync {
    async fn channel_by_id(&self, id: &str) -> UpstreamResult<YoutubeList>;

    async fn channel_by_username(&self, username: &str) -> UpstreamResult<YoutubeList>;

    async fn playlist(&self, id: &str) -> UpstreamResult<YoutubeList>;

    async fn playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<String>,
        max_results: u32,
    ) -> UpstreamResult<YoutubeList>;

    /// `contentDetails` for up to 50 videos
    async fn videos(&self, ids: Vec<String>) -> UpstreamResult<YoutubeList>;
}

/// YouTube Data API v3 client authenticated with an API key
pub struct YoutubeHttpApi {
    client: UpstreamHttpClient,
    base_url: Url,
    api_key: String,
}

impl YoutubeHttpApi {
    pub fn new(client: UpstreamHttpClient, api_url: &str, api_key: &str) -> AppResult<Self> {
        let base_url = Url::parse(api_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| AppError::configuration(format!("invalid YouTube API URL '{api_url}'")))?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    async fn get(&self, resource: &str, params: &[(&str, &str)]) -> UpstreamResult<YoutubeList> {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(resource);
        }
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("key", &self.api_key);

        self.client.get_json(Provider::Youtube, url, &[]).await
    }
}

#[async_trait]
impl YoutubeApi for YoutubeHttpApi {
    async fn channel_by_id(&self, id: &str) -> UpstreamResult<YoutubeList> {
        self.get("channels", &[("part", "snippet,contentDetails"), ("id", id)])
            .await
    }

    async fn channel_by_username(&self, username: &str) -> UpstreamResult<YoutubeList> {
        self.get(
            "channels",
            &[("part", "snippet,contentDetails"), ("forUsername", username)],
        )
        .await
    }

    async fn playlist(&self, id: &str) -> UpstreamResult<YoutubeList> {
        self.get("playlists", &[("part", "snippet"), ("id", id)])
            .await
    }

    async fn playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<String>,
        max_results: u32,
    ) -> UpstreamResult<YoutubeList> {
        let max_results = max_results.to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token.as_deref() {
            params.push(("pageToken", token));
        }
        self.get("playlistItems", &params).await
    }

    async fn videos(&self, ids: Vec<String>) -> UpstreamResult<YoutubeList> {
        let ids = ids.join(",");
        self.get("videos", &[("part", "contentDetails"), ("id", ids.as_str())])
            .await
    }
}

/// Playlist entry joined with its duration
#[derive(Debug, Clone)]
pub struct YoutubeVideo {
    pub id: Option<String>,
    pub snippet: YoutubeSnippet,
    pub duration_secs: u64,
}

struct YoutubePlaylistListing<'a> {
    api: &'a dyn YoutubeApi,
    playlist_id: &'a str,
}

#[async_trait]
impl PageSource for YoutubePlaylistListing<'_> {
    type Video = YoutubeVideo;

    fn default_page_size(&self) -> u32 {
        YOUTUBE_DEFAULT_PAGE_SIZE
    }

    fn first_cursor(&self) -> PageCursor {
        PageCursor::Token(String::new())
    }

    async fn fetch_page(&self, cursor: &PageCursor, per_page: u32) -> AppResult<Page<YoutubeVideo>> {
        let PageCursor::Token(token) = cursor else {
            return Err(AppError::internal("YouTube listings are paged by token"));
        };
        let page_token = (!token.is_empty()).then(|| token.clone());

        let page = self
            .api
            .playlist_items(self.playlist_id, page_token, per_page.min(YOUTUBE_DEFAULT_PAGE_SIZE))
            .await?;

        let ids: Vec<String> = page
            .items
            .iter()
            .filter_map(|item| item.snippet.resource_id.as_ref()?.video_id.clone())
            .collect();

        let durations: HashMap<String, u64> = if ids.is_empty() {
            HashMap::new()
        } else {
            self.api
                .videos(ids)
                .await?
                .items
                .into_iter()
                .filter_map(|video| {
                    let seconds = video
                        .content_details
                        .duration
                        .as_deref()
                        .and_then(parse_iso8601_duration)?;
                    Some((video.id?, seconds))
                })
                .collect()
        };

        debug!(
            "Fetched YouTube playlist {} page ({} videos, {} with duration)",
            self.playlist_id,
            page.items.len(),
            durations.len()
        );

        let items = page
            .items
            .into_iter()
            .map(|item| {
                let id = item
                    .snippet
                    .resource_id
                    .as_ref()
                    .and_then(|r| r.video_id.clone());
                let duration_secs = id
                    .as_ref()
                    .and_then(|id| durations.get(id).copied())
                    .unwrap_or(0);
                YoutubeVideo {
                    id,
                    snippet: item.snippet,
                    duration_secs,
                }
            })
            .collect();

        Ok(Page {
            items,
            next: page
                .next_page_token
                .filter(|token| !token.is_empty())
                .map(PageCursor::Token),
        })
    }

    fn video_id<'v>(&self, video: &'v YoutubeVideo) -> Option<&'v str> {
        video.id.as_deref()
    }
}

/// Builder for YouTube channels, users and playlists
pub struct YoutubeBuilder {
    api: Arc<dyn YoutubeApi>,
    download_base: String,
}

impl YoutubeBuilder {
    pub fn new<S: Into<String>>(api: Arc<dyn YoutubeApi>, download_base: S) -> Self {
        Self {
            api,
            download_base: download_base.into(),
        }
    }

    /// Channel metadata plus the ID of its uploads playlist
    pub async fn query_channel(
        &self,
        feed: &Feed,
        cancel: &CancellationToken,
    ) -> AppResult<(Podcast, String)> {
        let list = with_cancellation(cancel, "query YouTube channel", async {
            Ok(self.api.channel_by_id(&feed.item_id).await?)
        })
        .await?;
        self.channel_podcast(list, "channel", feed)
    }

    /// Legacy username lookup, otherwise identical to a channel
    pub async fn query_user(
        &self,
        feed: &Feed,
        cancel: &CancellationToken,
    ) -> AppResult<(Podcast, String)> {
        let list = with_cancellation(cancel, "query YouTube user", async {
            Ok(self.api.channel_by_username(&feed.item_id).await?)
        })
        .await?;
        self.channel_podcast(list, "user", feed)
    }

    pub async fn query_playlist(&self, feed: &Feed, cancel: &CancellationToken) -> AppResult<Podcast> {
        let list = with_cancellation(cancel, "query YouTube playlist", async {
            Ok(self.api.playlist(&feed.item_id).await?)
        })
        .await?;

        let what = format!("playlist {}", feed.item_id);
        let playlist = first_item(list, &what)?;
        let snippet = &playlist.snippet;
        podcast_from_snippet(
            snippet,
            snippet.channel_title.as_deref(),
            "channelTitle",
            &what,
            feed,
        )
    }

    fn channel_podcast(&self, list: YoutubeList, kind: &str, feed: &Feed) -> AppResult<(Podcast, String)> {
        let what = format!("{kind} {}", feed.item_id);
        let channel = first_item(list, &what)?;

        let uploads = channel
            .content_details
            .related_playlists
            .as_ref()
            .and_then(|related| non_empty(related.uploads.as_deref()))
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::feed_metadata(Provider::Youtube, what.as_str(), "relatedPlaylists.uploads")
            })?;

        let snippet = &channel.snippet;
        let podcast = podcast_from_snippet(snippet, snippet.title.as_deref(), "title", &what, feed)?;
        Ok((podcast, uploads))
    }

    /// Page through a playlist's videos into `podcast`
    pub async fn query_videos(
        &self,
        playlist_id: &str,
        podcast: &mut Podcast,
        feed: &Feed,
        cancel: &CancellationToken,
    ) -> AppResult<()> {
        let listing = YoutubePlaylistListing {
            api: self.api.as_ref(),
            playlist_id,
        };
        let params = ListingParams {
            page_size: feed.page_size,
            last_id: feed.last_id.as_deref(),
        };

        pagination::query_videos(&listing, podcast, params, cancel, |video| {
            map_video(video, feed, &self.download_base)
        })
        .await
    }
}

fn first_item(list: YoutubeList, what: &str) -> AppResult<YoutubeResource> {
    list.items
        .into_iter()
        .next()
        .ok_or_else(|| AppError::feed_metadata(Provider::Youtube, what, "items"))
}

fn podcast_from_snippet(
    snippet: &YoutubeSnippet,
    author: Option<&str>,
    author_field: &str,
    what: &str,
    feed: &Feed,
) -> AppResult<Podcast> {
    let require = |value: Option<&str>, field: &str| {
        non_empty(value)
            .map(str::to_string)
            .ok_or_else(|| AppError::feed_metadata(Provider::Youtube, what, field))
    };

    let pictures = snippet.pictures();
    Ok(Podcast {
        title: require(snippet.title.as_deref(), "title")?,
        link: UrlUtils::canonical_url(Provider::Youtube, feed.link_type, &feed.item_id),
        description: require(snippet.description.as_deref(), "description")?,
        author: require(author, author_field)?,
        image: require(media::select_picture(&pictures, feed.quality), "thumbnails")?,
        itunes_image: require(media::largest_picture(&pictures), "thumbnails")?,
        ..Podcast::new()
    })
}

fn map_video(video: &YoutubeVideo, feed: &Feed, download_base: &str) -> Result<Item, ItemMappingError> {
    let id = non_empty(video.id.as_deref()).ok_or(ItemMappingError::MissingId)?;
    let title = non_empty(video.snippet.title.as_deref()).ok_or_else(|| {
        ItemMappingError::MissingField {
            video_id: id.to_string(),
            field: "title",
        }
    })?;

    let length = media::estimate_size(video.duration_secs, feed.format, feed.quality).ok_or_else(|| {
        ItemMappingError::UnknownSize {
            video_id: id.to_string(),
        }
    })?;

    Ok(Item {
        id: id.to_string(),
        guid: id.to_string(),
        title: title.to_string(),
        description: video.snippet.description.clone().unwrap_or_default(),
        link: format!("https://youtube.com/watch?v={id}"),
        duration: format_duration(video.duration_secs),
        duration_secs: video.duration_secs,
        pub_date: video.snippet.published_at,
        enclosure: media::enclosure(download_base, &feed.hash_id, id, feed.format, length),
        artwork: media::select_picture(&video.snippet.pictures(), feed.quality).map(str::to_string),
    })
}

#[async_trait]
impl FeedBuilder for YoutubeBuilder {
    fn provider(&self) -> Provider {
        Provider::Youtube
    }

    fn supported_link_types(&self) -> &'static [LinkType] {
        SUPPORTED_LINK_TYPES
    }

    async fn build(&self, feed: &Feed, cancel: &CancellationToken) -> AppResult<Podcast> {
        info!(
            "Building YouTube feed {} from {} {}",
            feed.hash_id, feed.link_type, feed.item_id
        );

        let (mut podcast, playlist_id) = match feed.link_type {
            LinkType::Channel => self.query_channel(feed, cancel).await?,
            LinkType::User => self.query_user(feed, cancel).await?,
            LinkType::Playlist => (
                self.query_playlist(feed, cancel).await?,
                feed.item_id.clone(),
            ),
            LinkType::Group => {
                return Err(AppError::UnsupportedLinkType {
                    provider: Provider::Youtube,
                    link_type: feed.link_type,
                });
            }
        };

        self.query_videos(&playlist_id, &mut podcast, feed, cancel)
            .await?;

        info!(
            "Successfully built YouTube feed {} with {} episodes",
            feed.hash_id,
            podcast.len()
        );
        Ok(podcast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use crate::models::{FeatureLevel, Format, Quality};
    use httpmock::prelude::*;
    use mockall::predicate::eq;
    use serde_json::json;

    fn feed(link_type: LinkType, item_id: &str) -> Feed {
        Feed {
            hash_id: "yt1".to_string(),
            user_id: None,
            provider: Provider::Youtube,
            link_type,
            item_id: item_id.to_string(),
            item_url: UrlUtils::canonical_url(Provider::Youtube, link_type, item_id),
            page_size: 50,
            quality: Quality::High,
            format: Format::Audio,
            feature_level: FeatureLevel::ExtendedFeatures,
            last_id: None,
            episodes: Vec::new(),
            channel: None,
            created_at: Utc::now(),
            last_access: Utc::now(),
        }
    }

    fn thumbnails() -> HashMap<String, Picture> {
        HashMap::from([
            (
                "default".to_string(),
                Picture {
                    width: 120,
                    height: 90,
                    url: "https://i.ytimg.com/default.jpg".to_string(),
                },
            ),
            (
                "high".to_string(),
                Picture {
                    width: 480,
                    height: 360,
                    url: "https://i.ytimg.com/high.jpg".to_string(),
                },
            ),
        ])
    }

    fn channel_list() -> YoutubeList {
        YoutubeList {
            items: vec![YoutubeResource {
                id: Some("UC123".to_string()),
                snippet: YoutubeSnippet {
                    title: Some("Some Channel".to_string()),
                    description: Some("Videos about things".to_string()),
                    thumbnails: thumbnails(),
                    ..Default::default()
                },
                content_details: YoutubeContentDetails {
                    related_playlists: Some(YoutubeRelatedPlaylists {
                        uploads: Some("UU123".to_string()),
                    }),
                    duration: None,
                },
            }],
            next_page_token: None,
        }
    }

    fn playlist_page(ids: &[&str], next: Option<&str>) -> YoutubeList {
        YoutubeList {
            items: ids
                .iter()
                .map(|id| YoutubeResource {
                    id: Some(format!("item-{id}")),
                    snippet: YoutubeSnippet {
                        title: Some(format!("Video {id}")),
                        resource_id: Some(YoutubeResourceId {
                            video_id: Some(id.to_string()),
                        }),
                        thumbnails: thumbnails(),
                        ..Default::default()
                    },
                    ..Default::default()
                })
                .collect(),
            next_page_token: next.map(str::to_string),
        }
    }

    /// Durations for every requested id except `missing`
    fn durations(ids: Vec<String>, missing: &str) -> YoutubeList {
        YoutubeList {
            items: ids
                .into_iter()
                .filter(|id| id != missing)
                .map(|id| YoutubeResource {
                    id: Some(id),
                    content_details: YoutubeContentDetails {
                        duration: Some("PT1M30S".to_string()),
                        related_playlists: None,
                    },
                    ..Default::default()
                })
                .collect(),
            next_page_token: None,
        }
    }

    #[tokio::test]
    async fn test_build_channel_pages_uploads_by_token() {
        let mut api = MockYoutubeApi::new();
        api.expect_channel_by_id()
            .with(eq("UC123"))
            .times(1)
            .returning(|_| Ok(channel_list()));
        api.expect_playlist_items()
            .with(eq("UU123"), eq(None), eq(YOUTUBE_DEFAULT_PAGE_SIZE))
            .times(1)
            .returning(|_, _, _| Ok(playlist_page(&["a", "b", "c"], Some("NEXT"))));
        api.expect_playlist_items()
            .with(eq("UU123"), eq(Some("NEXT".to_string())), eq(YOUTUBE_DEFAULT_PAGE_SIZE))
            .times(1)
            .returning(|_, _, _| Ok(playlist_page(&["d", "e"], None)));
        api.expect_videos()
            .times(2)
            .returning(|ids| Ok(durations(ids, "b")));

        let builder = YoutubeBuilder::new(Arc::new(api), "http://localhost:8080");
        let podcast = builder
            .build(&feed(LinkType::Channel, "UC123"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(podcast.title, "Some Channel");
        assert_eq!(podcast.author, "Some Channel");
        assert_eq!(podcast.link, "https://youtube.com/channel/UC123");
        assert_eq!(podcast.itunes_image, "https://i.ytimg.com/high.jpg");

        // "b" has no duration and is skipped
        let ids: Vec<&str> = podcast.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d", "e"]);

        let first = &podcast.items[0];
        assert_eq!(first.link, "https://youtube.com/watch?v=a");
        assert_eq!(first.duration, "0:01:30");
        assert_eq!(first.enclosure.url, "http://localhost:8080/download/yt1/a.m4a");
        assert_eq!(first.enclosure.length, 90 * 16_000);
    }

    #[tokio::test]
    async fn test_build_playlist_uses_channel_title_as_author() {
        let mut api = MockYoutubeApi::new();
        api.expect_playlist().with(eq("PL9")).returning(|_| {
            Ok(YoutubeList {
                items: vec![YoutubeResource {
                    snippet: YoutubeSnippet {
                        title: Some("Talks".to_string()),
                        description: Some("Conference talks".to_string()),
                        channel_title: Some("Conf Channel".to_string()),
                        thumbnails: thumbnails(),
                        ..Default::default()
                    },
                    ..Default::default()
                }],
                next_page_token: None,
            })
        });
        api.expect_playlist_items()
            .with(eq("PL9"), eq(None), eq(YOUTUBE_DEFAULT_PAGE_SIZE))
            .returning(|_, _, _| Ok(playlist_page(&["x", "y", "z"], None)));
        api.expect_videos().returning(|ids| Ok(durations(ids, "")));

        let mut known = feed(LinkType::Playlist, "PL9");
        known.last_id = Some("y".to_string());

        let builder = YoutubeBuilder::new(Arc::new(api), "http://localhost:8080");
        let podcast = builder
            .build(&known, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(podcast.author, "Conf Channel");
        assert_eq!(podcast.link, "https://youtube.com/playlist?list=PL9");
        assert_eq!(podcast.len(), 1);
        assert_eq!(podcast.items[0].id, "x");
    }

    #[tokio::test]
    async fn test_unknown_user_is_metadata_error() {
        let mut api = MockYoutubeApi::new();
        api.expect_channel_by_username()
            .with(eq("nobody"))
            .returning(|_| Ok(YoutubeList::default()));
        api.expect_playlist_items().never();

        let builder = YoutubeBuilder::new(Arc::new(api), "http://localhost:8080");
        let err = builder
            .build(&feed(LinkType::User, "nobody"), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::FeedMetadata { ref field, .. } if field == "items"));
    }

    #[tokio::test]
    async fn test_group_link_type_is_unsupported() {
        let builder = YoutubeBuilder::new(Arc::new(MockYoutubeApi::new()), "http://localhost:8080");
        let err = builder
            .build(&feed(LinkType::Group, "g"), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UnsupportedLinkType { .. }));
    }

    #[tokio::test]
    async fn test_http_api_passes_key_and_page_token() {
        let server = MockServer::start();
        let items = server.mock(|when, then| {
            when.method(GET)
                .path("/youtube/v3/playlistItems")
                .query_param("playlistId", "UU123")
                .query_param("pageToken", "CAUQAA")
                .query_param("maxResults", "50")
                .query_param("key", "k3y");
            then.status(200).json_body(json!({
                "nextPageToken": "CAoQAA",
                "items": [{
                    "id": "item-1",
                    "snippet": {
                        "title": "First",
                        "publishedAt": "2020-01-02T03:04:05Z",
                        "resourceId": { "kind": "youtube#video", "videoId": "vid1" },
                        "thumbnails": { "default": { "url": "https://i.ytimg.com/d.jpg", "width": 120, "height": 90 } }
                    }
                }]
            }));
        });
        let videos = server.mock(|when, then| {
            when.method(GET)
                .path("/youtube/v3/videos")
                .query_param("id", "vid1,vid2")
                .query_param("part", "contentDetails");
            then.status(200).json_body(json!({
                "items": [{ "id": "vid1", "contentDetails": { "duration": "PT4M13S" } }]
            }));
        });

        let client = UpstreamHttpClient::new(&HttpConfig::default()).unwrap();
        let api = YoutubeHttpApi::new(client, &server.url("/youtube/v3"), "k3y").unwrap();

        let page = api
            .playlist_items("UU123", Some("CAUQAA".to_string()), 50)
            .await
            .unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("CAoQAA"));
        let snippet = &page.items[0].snippet;
        assert_eq!(
            snippet.resource_id.as_ref().unwrap().video_id.as_deref(),
            Some("vid1")
        );
        assert!(snippet.published_at.is_some());
        assert_eq!(snippet.thumbnails["default"].width, 120);

        let list = api
            .videos(vec!["vid1".to_string(), "vid2".to_string()])
            .await
            .unwrap();
        assert_eq!(
            list.items[0].content_details.duration.as_deref(),
            Some("PT4M13S")
        );

        items.assert();
        videos.assert();
    }
}
