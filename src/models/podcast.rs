//! Canonical podcast document produced by the builders
//!
//! This is the provider-independent shape handed to the RSS renderer. It
//! carries everything an iTunes-compatible feed needs but knows nothing about
//! XML.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LANGUAGE: &str = "en";
pub const GENERATOR: &str = concat!("vidcast ", env!("CARGO_PKG_VERSION"));

/// Playable media reference attached to an episode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Enclosure {
    pub url: String,
    /// Size of the media asset in bytes
    pub length: u64,
    pub mime_type: String,
}

/// One episode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    /// Provider-native video identifier
    pub id: String,
    pub guid: String,
    pub title: String,
    pub description: String,
    pub link: String,
    /// `H:MM:SS`
    pub duration: String,
    pub duration_secs: u64,
    pub pub_date: Option<DateTime<Utc>>,
    pub enclosure: Enclosure,
    pub artwork: Option<String>,
}

impl Item {
    /// An item is publishable only with a title, link, guid and a sized enclosure
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty()
            && !self.link.is_empty()
            && !self.guid.is_empty()
            && !self.enclosure.url.is_empty()
            && self.enclosure.length > 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Podcast {
    pub title: String,
    pub link: String,
    pub description: String,
    pub author: String,
    /// General feed image
    pub image: String,
    /// Square artwork for podcast directories
    pub itunes_image: String,
    pub language: String,
    pub explicit: bool,
    pub generator: String,
    pub pub_date: Option<DateTime<Utc>>,
    pub last_build_date: DateTime<Utc>,
    /// Most recent first
    pub items: Vec<Item>,
}

impl Default for Podcast {
    fn default() -> Self {
        Self {
            title: String::new(),
            link: String::new(),
            description: String::new(),
            author: String::new(),
            image: String::new(),
            itunes_image: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            explicit: false,
            generator: GENERATOR.to_string(),
            pub_date: None,
            last_build_date: Utc::now(),
            items: Vec::new(),
        }
    }
}

impl Podcast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an episode, keeping the newest publish date on the feed
    pub fn add_item(&mut self, item: Item) {
        if let Some(date) = item.pub_date {
            if self.pub_date.is_none_or(|current| date > current) {
                self.pub_date = Some(date);
            }
        }
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
