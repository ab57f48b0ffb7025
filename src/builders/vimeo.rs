//! Vimeo feed builder
//!
//! Channels, groups and users all expose the same shape on the Vimeo API:
//! a resource document plus a numbered `/videos` listing, so one builder
//! serves all three link types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

use super::media::{self, Picture, non_empty};
use super::pagination::{self, ListingParams, Page, PageCursor, PageSource};
use super::traits::FeedBuilder;
use crate::errors::{AppError, AppResult, ItemMappingError, UpstreamResult};
use crate::models::{Feed, Format, Item, LinkType, Podcast, Provider, Quality};
use crate::utils::duration::format_duration;
use crate::utils::{UpstreamHttpClient, UrlUtils, with_cancellation};

/// Videos requested per listing call
pub const VIMEO_DEFAULT_PAGE_SIZE: u32 = 50;

const VIMEO_ACCEPT: &str = "application/vnd.vimeo.*+json;version=3.4";

const SUPPORTED_LINK_TYPES: &[LinkType] = &[LinkType::Channel, LinkType::Group, LinkType::User];

/// Top-level Vimeo API collection a feed is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VimeoCollection {
    Channels,
    Groups,
    Users,
}

impl VimeoCollection {
    pub fn from_link_type(link_type: LinkType) -> Option<Self> {
        match link_type {
            LinkType::Channel => Some(Self::Channels),
            LinkType::Group => Some(Self::Groups),
            LinkType::User => Some(Self::Users),
            LinkType::Playlist => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Channels => "channels",
            Self::Groups => "groups",
            Self::Users => "users",
        }
    }

    fn resource_name(&self) -> &'static str {
        match self {
            Self::Channels => "channel",
            Self::Groups => "group",
            Self::Users => "user",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VimeoPictures {
    #[serde(default)]
    pub sizes: Vec<Picture>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VimeoUserRef {
    pub name: Option<String>,
}

/// Channel, group or user document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VimeoResource {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Users carry a bio instead of a description
    pub bio: Option<String>,
    pub link: Option<String>,
    /// Owner of a channel or group
    pub user: Option<VimeoUserRef>,
    #[serde(default)]
    pub pictures: VimeoPictures,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VimeoDownload {
    pub quality: Option<String>,
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VimeoVideo {
    /// `/videos/<id>`
    pub uri: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    /// Seconds
    #[serde(default)]
    pub duration: u64,
    pub release_time: Option<DateTime<Utc>>,
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pictures: VimeoPictures,
    /// Only present when the token may download the video
    #[serde(default)]
    pub download: Vec<VimeoDownload>,
}

impl VimeoVideo {
    pub fn video_id(&self) -> Option<&str> {
        self.uri
            .as_deref()
            .and_then(|uri| uri.trim_end_matches('/').rsplit('/').next())
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VimeoPaging {
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VimeoVideoPage {
    #[serde(default)]
    pub data: Vec<VimeoVideo>,
    #[serde(default)]
    pub paging: VimeoPaging,
}

/// Vimeo API surface used by the builder
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VimeoApi: Send + Sync {
    async fn resource(&self, collection: VimeoCollection, id: &str) -> UpstreamResult<VimeoResource>;

    async fn videos(
        &self,
        collection: VimeoCollection,
        id: &str,
        page: u32,
        per_page: u32,
    ) -> UpstreamResult<VimeoVideoPage>;
}

/// Vimeo REST API client authenticated with a bearer token
pub struct VimeoHttpApi {
    client: UpstreamHttpClient,
    base_url: Url,
    authorization: String,
}

impl VimeoHttpApi {
    pub fn new(client: UpstreamHttpClient, api_url: &str, token: &str) -> AppResult<Self> {
        let base_url = Url::parse(api_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| AppError::configuration(format!("invalid Vimeo API URL '{api_url}'")))?;

        Ok(Self {
            client,
            base_url,
            authorization: format!("bearer {token}"),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: Url) -> UpstreamResult<T> {
        self.client
            .get_json(
                Provider::Vimeo,
                url,
                &[
                    ("Authorization", self.authorization.as_str()),
                    ("Accept", VIMEO_ACCEPT),
                ],
            )
            .await
    }
}

#[async_trait]
impl VimeoApi for VimeoHttpApi {
    async fn resource(&self, collection: VimeoCollection, id: &str) -> UpstreamResult<VimeoResource> {
        self.get(self.endpoint(&[collection.path(), id])).await
    }

    async fn videos(
        &self,
        collection: VimeoCollection,
        id: &str,
        page: u32,
        per_page: u32,
    ) -> UpstreamResult<VimeoVideoPage> {
        let mut url = self.endpoint(&[collection.path(), id, "videos"]);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string())
            .append_pair("sort", "date")
            .append_pair("direction", "desc");
        self.get(url).await
    }
}

/// `/videos` listing of one channel, group or user
struct VimeoVideoListing<'a> {
    api: &'a dyn VimeoApi,
    collection: VimeoCollection,
    id: &'a str,
}

#[async_trait]
impl PageSource for VimeoVideoListing<'_> {
    type Video = VimeoVideo;

    fn default_page_size(&self) -> u32 {
        VIMEO_DEFAULT_PAGE_SIZE
    }

    async fn fetch_page(&self, cursor: &PageCursor, per_page: u32) -> AppResult<Page<VimeoVideo>> {
        let PageCursor::Number(page) = cursor else {
            return Err(AppError::internal("Vimeo listings are paged by number"));
        };

        let response = self
            .api
            .videos(self.collection, self.id, *page, per_page)
            .await?;

        debug!(
            "Fetched Vimeo {} {} page {} ({} videos)",
            self.collection.resource_name(),
            self.id,
            page,
            response.data.len()
        );

        let next = response
            .paging
            .next
            .as_ref()
            .map(|_| PageCursor::Number(page + 1));
        Ok(Page {
            items: response.data,
            next,
        })
    }

    fn video_id<'v>(&self, video: &'v VimeoVideo) -> Option<&'v str> {
        video.video_id()
    }
}

/// Builder for Vimeo channels, groups and users
pub struct VimeoBuilder {
    api: Arc<dyn VimeoApi>,
    download_base: String,
}

impl VimeoBuilder {
    pub fn new<S: Into<String>>(api: Arc<dyn VimeoApi>, download_base: S) -> Self {
        Self {
            api,
            download_base: download_base.into(),
        }
    }

    pub async fn query_channel(&self, feed: &Feed, cancel: &CancellationToken) -> AppResult<Podcast> {
        self.query_metadata(VimeoCollection::Channels, feed, cancel)
            .await
    }

    pub async fn query_group(&self, feed: &Feed, cancel: &CancellationToken) -> AppResult<Podcast> {
        self.query_metadata(VimeoCollection::Groups, feed, cancel)
            .await
    }

    pub async fn query_user(&self, feed: &Feed, cancel: &CancellationToken) -> AppResult<Podcast> {
        self.query_metadata(VimeoCollection::Users, feed, cancel)
            .await
    }

    async fn query_metadata(
        &self,
        collection: VimeoCollection,
        feed: &Feed,
        cancel: &CancellationToken,
    ) -> AppResult<Podcast> {
        let resource = with_cancellation(cancel, "query Vimeo metadata", async {
            Ok(self.api.resource(collection, &feed.item_id).await?)
        })
        .await?;

        let what = format!("{} {}", collection.resource_name(), feed.item_id);
        let require = |value: Option<&str>, field: &str| {
            non_empty(value)
                .map(str::to_string)
                .ok_or_else(|| AppError::feed_metadata(Provider::Vimeo, what.as_str(), field))
        };

        let title = require(resource.name.as_deref(), "name")?;
        let author = match collection {
            VimeoCollection::Users => title.clone(),
            _ => require(
                resource.user.as_ref().and_then(|user| user.name.as_deref()),
                "user.name",
            )?,
        };
        let description = require(
            resource.description.as_deref().or(resource.bio.as_deref()),
            "description",
        )?;
        let sizes = &resource.pictures.sizes;
        let image = require(media::select_picture(sizes, feed.quality), "pictures")?;
        let itunes_image = require(media::largest_picture(sizes), "pictures")?;

        Ok(Podcast {
            title,
            link: UrlUtils::canonical_url(Provider::Vimeo, feed.link_type, &feed.item_id),
            description,
            author,
            image,
            itunes_image,
            ..Podcast::new()
        })
    }

    /// Page through the collection's videos into `podcast`
    pub async fn query_videos(
        &self,
        collection: VimeoCollection,
        podcast: &mut Podcast,
        feed: &Feed,
        cancel: &CancellationToken,
    ) -> AppResult<()> {
        let listing = VimeoVideoListing {
            api: self.api.as_ref(),
            collection,
            id: &feed.item_id,
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

/// Map one Vimeo video to an episode at the feed's quality and format
fn map_video(video: &VimeoVideo, feed: &Feed, download_base: &str) -> Result<Item, ItemMappingError> {
    let id = video.video_id().ok_or(ItemMappingError::MissingId)?;
    let title = non_empty(video.name.as_deref()).ok_or_else(|| ItemMappingError::MissingField {
        video_id: id.to_string(),
        field: "name",
    })?;

    let length = download_size(video, feed.format, feed.quality)
        .or_else(|| media::estimate_size(video.duration, feed.format, feed.quality))
        .ok_or_else(|| ItemMappingError::UnknownSize {
            video_id: id.to_string(),
        })?;

    let link = non_empty(video.link.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| format!("https://vimeo.com/{id}"));

    Ok(Item {
        id: id.to_string(),
        guid: id.to_string(),
        title: title.to_string(),
        description: video.description.clone().unwrap_or_default(),
        link,
        duration: format_duration(video.duration),
        duration_secs: video.duration,
        pub_date: video.release_time.or(video.created_time),
        enclosure: media::enclosure(download_base, &feed.hash_id, id, feed.format, length),
        artwork: media::select_picture(&video.pictures.sizes, feed.quality).map(str::to_string),
    })
}

/// Size of the matching video rendition; audio is always estimated
fn download_size(video: &VimeoVideo, format: Format, quality: Quality) -> Option<u64> {
    if format == Format::Audio {
        return None;
    }

    let sizes = video.download.iter().map(|d| d.size).filter(|size| *size > 0);
    match quality {
        Quality::High => sizes.max(),
        Quality::Low => sizes.min(),
    }
}

#[async_trait]
impl FeedBuilder for VimeoBuilder {
    fn provider(&self) -> Provider {
        Provider::Vimeo
    }

    fn supported_link_types(&self) -> &'static [LinkType] {
        SUPPORTED_LINK_TYPES
    }

    async fn build(&self, feed: &Feed, cancel: &CancellationToken) -> AppResult<Podcast> {
        let collection = VimeoCollection::from_link_type(feed.link_type).ok_or(
            AppError::UnsupportedLinkType {
                provider: Provider::Vimeo,
                link_type: feed.link_type,
            },
        )?;

        info!(
            "Building Vimeo feed {} from {} {}",
            feed.hash_id,
            collection.resource_name(),
            feed.item_id
        );

        let mut podcast = match collection {
            VimeoCollection::Channels => self.query_channel(feed, cancel).await?,
            VimeoCollection::Groups => self.query_group(feed, cancel).await?,
            VimeoCollection::Users => self.query_user(feed, cancel).await?,
        };
        self.query_videos(collection, &mut podcast, feed, cancel)
            .await?;

        info!(
            "Successfully built Vimeo feed {} with {} episodes",
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
    use crate::errors::UpstreamError;
    use crate::models::FeatureLevel;
    use httpmock::prelude::*;
    use mockall::predicate::eq;
    use serde_json::json;

    fn feed(link_type: LinkType, item_id: &str) -> Feed {
        Feed {
            hash_id: "h4sh".to_string(),
            user_id: None,
            provider: Provider::Vimeo,
            link_type,
            item_id: item_id.to_string(),
            item_url: UrlUtils::canonical_url(Provider::Vimeo, link_type, item_id),
            page_size: 50,
            quality: Quality::High,
            format: Format::Video,
            feature_level: FeatureLevel::Standard,
            last_id: None,
            episodes: Vec::new(),
            channel: None,
            created_at: Utc::now(),
            last_access: Utc::now(),
        }
    }

    fn pictures() -> VimeoPictures {
        VimeoPictures {
            sizes: vec![
                Picture {
                    width: 100,
                    height: 75,
                    url: "https://i.vimeocdn.com/100.jpg".to_string(),
                },
                Picture {
                    width: 1280,
                    height: 720,
                    url: "https://i.vimeocdn.com/1280.jpg".to_string(),
                },
            ],
        }
    }

    fn staffpicks() -> VimeoResource {
        VimeoResource {
            name: Some("Vimeo Staff Picks".to_string()),
            description: Some("We really love videos".to_string()),
            link: Some("https://vimeo.com/channels/staffpicks".to_string()),
            user: Some(VimeoUserRef {
                name: Some("Vimeo Curation".to_string()),
            }),
            pictures: pictures(),
            ..Default::default()
        }
    }

    fn video(id: u64) -> VimeoVideo {
        VimeoVideo {
            uri: Some(format!("/videos/{id}")),
            name: Some(format!("Video {id}")),
            link: Some(format!("https://vimeo.com/{id}")),
            duration: 125,
            pictures: pictures(),
            ..Default::default()
        }
    }

    fn videos_page(ids: std::ops::RangeInclusive<u64>, has_next: bool) -> VimeoVideoPage {
        VimeoVideoPage {
            data: ids.rev().map(video).collect(),
            paging: VimeoPaging {
                next: has_next.then(|| "/next".to_string()),
            },
        }
    }

    #[tokio::test]
    async fn test_query_channel_populates_metadata() {
        let mut api = MockVimeoApi::new();
        api.expect_resource()
            .with(eq(VimeoCollection::Channels), eq("staffpicks"))
            .times(1)
            .returning(|_, _| Ok(staffpicks()));

        let builder = VimeoBuilder::new(Arc::new(api), "http://localhost:8080");
        let podcast = builder
            .query_channel(&feed(LinkType::Channel, "staffpicks"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(podcast.link, "https://vimeo.com/channels/staffpicks");
        assert_eq!(podcast.title, "Vimeo Staff Picks");
        assert_eq!(podcast.author, "Vimeo Curation");
        assert!(!podcast.description.is_empty());
        assert_eq!(podcast.image, "https://i.vimeocdn.com/1280.jpg");
        assert_eq!(podcast.itunes_image, "https://i.vimeocdn.com/1280.jpg");
    }

    #[tokio::test]
    async fn test_query_user_uses_name_and_bio() {
        let mut api = MockVimeoApi::new();
        api.expect_resource().returning(|_, _| {
            Ok(VimeoResource {
                name: Some("Motion Array".to_string()),
                bio: Some("Templates and stock footage".to_string()),
                pictures: pictures(),
                ..Default::default()
            })
        });

        let mut low = feed(LinkType::User, "motionarray");
        low.quality = Quality::Low;

        let builder = VimeoBuilder::new(Arc::new(api), "http://localhost:8080");
        let podcast = builder
            .query_user(&low, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(podcast.link, "https://vimeo.com/motionarray");
        assert_eq!(podcast.title, "Motion Array");
        assert_eq!(podcast.author, "Motion Array");
        assert_eq!(podcast.description, "Templates and stock footage");
        assert_eq!(podcast.image, "https://i.vimeocdn.com/100.jpg");
        assert_eq!(podcast.itunes_image, "https://i.vimeocdn.com/1280.jpg");
    }

    #[tokio::test]
    async fn test_missing_metadata_aborts_before_pagination() {
        let mut api = MockVimeoApi::new();
        api.expect_resource().returning(|_, _| {
            Ok(VimeoResource {
                user: None,
                ..staffpicks()
            })
        });
        api.expect_videos().never();

        let builder = VimeoBuilder::new(Arc::new(api), "http://localhost:8080");
        let err = builder
            .build(&feed(LinkType::Channel, "staffpicks"), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(
            matches!(err, AppError::FeedMetadata { provider: Provider::Vimeo, ref field, .. } if field == "user.name")
        );
    }

    #[tokio::test]
    async fn test_query_videos_default_page_size() {
        let mut api = MockVimeoApi::new();
        api.expect_videos()
            .with(
                eq(VimeoCollection::Channels),
                eq("staffpicks"),
                eq(1),
                eq(VIMEO_DEFAULT_PAGE_SIZE),
            )
            .returning(|_, _, _, _| Ok(videos_page(51..=100, true)));

        let mut unsized_feed = feed(LinkType::Channel, "staffpicks");
        unsized_feed.page_size = 0;

        let builder = VimeoBuilder::new(Arc::new(api), "http://localhost:8080");
        let mut podcast = Podcast::new();
        builder
            .query_videos(
                VimeoCollection::Channels,
                &mut podcast,
                &unsized_feed,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(podcast.len(), VIMEO_DEFAULT_PAGE_SIZE as usize);
        for item in &podcast.items {
            assert!(!item.title.is_empty());
            assert!(!item.link.is_empty());
            assert!(!item.guid.is_empty());
            assert_eq!(item.duration, "0:02:05");
            assert!(!item.enclosure.url.is_empty());
            assert!(item.enclosure.length > 0);
        }
        assert_eq!(
            podcast.items[0].enclosure.url,
            "http://localhost:8080/download/h4sh/100.mp4"
        );
    }

    #[tokio::test]
    async fn test_build_pages_until_last_id() {
        let mut api = MockVimeoApi::new();
        api.expect_resource().returning(|_, _| Ok(staffpicks()));
        api.expect_videos()
            .with(eq(VimeoCollection::Groups), eq("motion"), eq(1), eq(50))
            .returning(|_, _, _, _| Ok(videos_page(51..=100, true)));
        api.expect_videos()
            .with(eq(VimeoCollection::Groups), eq("motion"), eq(2), eq(50))
            .returning(|_, _, _, _| Ok(videos_page(1..=50, false)));

        let mut known = feed(LinkType::Group, "motion");
        known.page_size = 600;
        known.last_id = Some("40".to_string());

        let builder = VimeoBuilder::new(Arc::new(api), "http://localhost:8080");
        let podcast = builder
            .build(&known, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(podcast.len(), 60);
        assert_eq!(podcast.items.last().unwrap().id, "41");
        assert_eq!(podcast.link, "https://vimeo.com/groups/motion");
    }

    #[tokio::test]
    async fn test_page_failure_fails_build() {
        let mut api = MockVimeoApi::new();
        api.expect_resource().returning(|_, _| Ok(staffpicks()));
        api.expect_videos().returning(|_, _, _, _| {
            Err(UpstreamError::auth_failed("vimeo", "401: invalid token"))
        });

        let builder = VimeoBuilder::new(Arc::new(api), "http://localhost:8080");
        let err = builder
            .build(&feed(LinkType::Channel, "staffpicks"), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Upstream(UpstreamError::AuthenticationFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_playlist_link_type_is_unsupported() {
        let builder = VimeoBuilder::new(Arc::new(MockVimeoApi::new()), "http://localhost:8080");
        let err = builder
            .build(&feed(LinkType::Playlist, "x"), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::UnsupportedLinkType {
                link_type: LinkType::Playlist,
                ..
            }
        ));
    }

    #[test]
    fn test_map_video_sizes() {
        let mut feed = feed(LinkType::Channel, "staffpicks");
        let mut sized = video(7);
        sized.download = vec![
            VimeoDownload {
                quality: Some("hd".to_string()),
                size: 9_000,
            },
            VimeoDownload {
                quality: Some("sd".to_string()),
                size: 3_000,
            },
        ];

        assert_eq!(map_video(&sized, &feed, "http://x").unwrap().enclosure.length, 9_000);

        feed.quality = Quality::Low;
        assert_eq!(map_video(&sized, &feed, "http://x").unwrap().enclosure.length, 3_000);

        feed.format = Format::Audio;
        let item = map_video(&sized, &feed, "http://x").unwrap();
        assert_eq!(item.enclosure.length, 125 * 6_000);
        assert_eq!(item.enclosure.url, "http://x/download/h4sh/7.m4a");

        let mut silent = video(8);
        silent.duration = 0;
        assert_eq!(
            map_video(&silent, &feed, "http://x").unwrap_err(),
            ItemMappingError::UnknownSize {
                video_id: "8".to_string()
            }
        );

        let anonymous = VimeoVideo {
            uri: None,
            ..video(9)
        };
        assert_eq!(
            map_video(&anonymous, &feed, "http://x").unwrap_err(),
            ItemMappingError::MissingId
        );
    }

    #[tokio::test]
    async fn test_http_api_sends_token_and_paging() {
        let server = MockServer::start();
        let resource = server.mock(|when, then| {
            when.method(GET)
                .path("/channels/staffpicks")
                .header("authorization", "bearer s3cret");
            then.status(200).json_body(json!({
                "name": "Vimeo Staff Picks",
                "description": "We really love videos",
                "link": "https://vimeo.com/channels/staffpicks",
                "user": { "name": "Vimeo Curation" },
                "pictures": { "sizes": [
                    { "width": 200, "height": 150, "link": "https://i.vimeocdn.com/200.jpg" }
                ]}
            }));
        });
        let listing = server.mock(|when, then| {
            when.method(GET)
                .path("/channels/staffpicks/videos")
                .query_param("page", "2")
                .query_param("per_page", "50");
            then.status(200).json_body(json!({
                "paging": { "next": null },
                "data": [{
                    "uri": "/videos/42",
                    "name": "Answer",
                    "link": "https://vimeo.com/42",
                    "duration": 60,
                    "release_time": "2019-03-13T20:43:29+00:00"
                }]
            }));
        });

        let client = UpstreamHttpClient::new(&HttpConfig::default()).unwrap();
        let api = VimeoHttpApi::new(client, &server.base_url(), "s3cret").unwrap();

        let channel = api
            .resource(VimeoCollection::Channels, "staffpicks")
            .await
            .unwrap();
        assert_eq!(channel.user.unwrap().name.as_deref(), Some("Vimeo Curation"));
        assert_eq!(channel.pictures.sizes[0].url, "https://i.vimeocdn.com/200.jpg");

        let page = api
            .videos(VimeoCollection::Channels, "staffpicks", 2, 50)
            .await
            .unwrap();
        assert!(page.paging.next.is_none());
        assert_eq!(page.data[0].video_id(), Some("42"));
        assert!(page.data[0].release_time.is_some());

        resource.assert();
        listing.assert();
    }
}
