use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub mod podcast;

pub use podcast::{Enclosure, Item, Podcast};

/// Video platform a feed is sourced from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Provider {
    Youtube,
    Vimeo,
}

/// Kind of upstream resource a feed follows
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LinkType {
    Channel,
    Group,
    User,
    Playlist,
}

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Quality {
    #[default]
    High,
    Low,
}

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Format {
    #[default]
    Video,
    Audio,
}

impl Format {
    /// File extension used for enclosure URLs
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Video => "mp4",
            Format::Audio => "m4a",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Video => "video/mp4",
            Format::Audio => "audio/mp4",
        }
    }
}

/// Caller entitlement tier.
///
/// ExtendedFeatures relaxes quality and format; ExtendedPagination also
/// relaxes page size and inherits the quality/format relaxation.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FeatureLevel {
    #[default]
    Standard,
    ExtendedFeatures,
    ExtendedPagination,
}

/// Caller entitlement descriptor, supplied per request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Option<String>,
    pub feature_level: FeatureLevel,
}

impl Identity {
    pub fn new(feature_level: FeatureLevel) -> Self {
        Self {
            user_id: None,
            feature_level,
        }
    }

    pub fn with_user<S: Into<String>>(mut self, user_id: S) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateFeedRequest {
    pub url: String,
    pub page_size: u32,
    #[serde(default)]
    pub quality: Quality,
    #[serde(default)]
    pub format: Format,
}

/// Persisted feed record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feed {
    /// Public identifier, assigned once at creation
    pub hash_id: String,
    pub user_id: Option<String>,
    pub provider: Provider,
    pub link_type: LinkType,
    /// Provider-native resource identifier taken from the URL
    pub item_id: String,
    /// Canonical resource URL
    pub item_url: String,
    pub page_size: u32,
    pub quality: Quality,
    pub format: Format,
    pub feature_level: FeatureLevel,
    /// Newest upstream video already known, used to stop incremental builds
    pub last_id: Option<String>,
    /// Most recent first
    #[serde(default)]
    pub episodes: Vec<Item>,
    /// Podcast-level fields from the last successful build
    #[serde(default)]
    pub channel: Option<ChannelInfo>,
    pub created_at: DateTime<Utc>,
    pub last_access: DateTime<Utc>,
}

/// Channel metadata kept between builds so a stored feed can be rendered on its own
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelInfo {
    pub title: String,
    pub link: String,
    pub description: String,
    pub author: String,
    pub image: String,
    pub itunes_image: String,
    pub language: String,
    pub explicit: bool,
    pub pub_date: Option<DateTime<Utc>>,
    pub last_build_date: Option<DateTime<Utc>>,
}

impl From<&Podcast> for ChannelInfo {
    fn from(podcast: &Podcast) -> Self {
        Self {
            title: podcast.title.clone(),
            link: podcast.link.clone(),
            description: podcast.description.clone(),
            author: podcast.author.clone(),
            image: podcast.image.clone(),
            itunes_image: podcast.itunes_image.clone(),
            language: podcast.language.clone(),
            explicit: podcast.explicit,
            pub_date: podcast.pub_date,
            last_build_date: Some(podcast.last_build_date),
        }
    }
}

/// Metadata record as returned by storage; counters may be absent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedMetadata {
    pub hash_id: String,
    pub provider: Provider,
    pub format: Format,
    pub quality: Quality,
    pub downloads: Option<u64>,
}

/// Query-side metadata view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metadata {
    pub hash_id: String,
    pub provider: Provider,
    pub format: Format,
    pub quality: Quality,
    pub downloads: u64,
}

impl From<FeedMetadata> for Metadata {
    fn from(record: FeedMetadata) -> Self {
        Self {
            hash_id: record.hash_id,
            provider: record.provider,
            format: record.format,
            quality: record.quality,
            downloads: record.downloads.unwrap_or(0),
        }
    }
}
