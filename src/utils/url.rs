//! URL utilities: feed link recognition and log-safe URLs
//!
//! Feed creation starts from whatever a user pasted into a form, so parsing is
//! lenient about the scheme and the `www.`/`m.` host prefixes but strict about
//! the path shapes each provider actually uses.

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

use crate::errors::{AppError, AppResult};
use crate::models::{LinkType, Provider};

/// Provider resource identified by a feed URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedLink {
    pub provider: Provider,
    pub link_type: LinkType,
    /// Provider-native resource identifier
    pub item_id: String,
}

impl FeedLink {
    pub fn new<S: Into<String>>(provider: Provider, link_type: LinkType, item_id: S) -> Self {
        Self {
            provider,
            link_type,
            item_id: item_id.into(),
        }
    }

    /// Canonical URL of the upstream resource
    pub fn canonical_url(&self) -> String {
        UrlUtils::canonical_url(self.provider, self.link_type, &self.item_id)
    }
}

/// URL utilities for consistent URL handling
pub struct UrlUtils;

impl UrlUtils {
    /// Ensure the URL has an HTTP(S) scheme, defaulting to HTTPS
    ///
    /// ```rust
    /// use vidcast::utils::url::UrlUtils;
    ///
    /// assert_eq!(UrlUtils::normalize_scheme("vimeo.com/x"), "https://vimeo.com/x");
    /// assert_eq!(UrlUtils::normalize_scheme("http://vimeo.com/x"), "http://vimeo.com/x");
    /// ```
    pub fn normalize_scheme(url: &str) -> String {
        let trimmed = url.trim();

        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        }
    }

    /// Recognize a provider resource from a user-supplied URL
    ///
    /// # Errors
    /// `AppError::UnrecognizedUrl` when the URL does not match any provider pattern
    pub fn parse_feed_url(raw: &str) -> AppResult<FeedLink> {
        let unrecognized = || AppError::UnrecognizedUrl {
            url: raw.trim().to_string(),
        };

        if raw.trim().is_empty() {
            return Err(unrecognized());
        }

        let parsed = Url::parse(&Self::normalize_scheme(raw)).map_err(|_| unrecognized())?;
        let host = parsed.host_str().ok_or_else(unrecognized)?.to_ascii_lowercase();
        let host = host
            .strip_prefix("www.")
            .or_else(|| host.strip_prefix("m."))
            .unwrap_or(&host);

        let segments: Vec<&str> = parsed
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        let link = match host {
            "youtube.com" => Self::parse_youtube(&parsed, &segments),
            "vimeo.com" => Self::parse_vimeo(&segments),
            _ => None,
        };

        link.ok_or_else(unrecognized)
    }

    fn parse_youtube(parsed: &Url, segments: &[&str]) -> Option<FeedLink> {
        match segments {
            ["playlist", ..] => parsed
                .query_pairs()
                .find(|(key, _)| key == "list")
                .map(|(_, value)| value.into_owned())
                .filter(|id| !id.is_empty())
                .map(|id| FeedLink::new(Provider::Youtube, LinkType::Playlist, id)),
            ["channel", id, ..] => Some(FeedLink::new(Provider::Youtube, LinkType::Channel, *id)),
            ["user", name, ..] => Some(FeedLink::new(Provider::Youtube, LinkType::User, *name)),
            _ => None,
        }
    }

    fn parse_vimeo(segments: &[&str]) -> Option<FeedLink> {
        match segments {
            ["channels", id, ..] => Some(FeedLink::new(Provider::Vimeo, LinkType::Channel, *id)),
            ["groups", id, ..] => Some(FeedLink::new(Provider::Vimeo, LinkType::Group, *id)),
            // A bare number is a single video, not a user
            [user] if !user.chars().all(|c| c.is_ascii_digit()) && !is_vimeo_site_path(user) => {
                Some(FeedLink::new(Provider::Vimeo, LinkType::User, *user))
            }
            _ => None,
        }
    }

    /// Build the canonical resource URL from provider URL templates
    pub fn canonical_url(provider: Provider, link_type: LinkType, item_id: &str) -> String {
        match (provider, link_type) {
            (Provider::Youtube, LinkType::Playlist) => {
                format!("https://youtube.com/playlist?list={item_id}")
            }
            (Provider::Youtube, LinkType::User) => format!("https://youtube.com/user/{item_id}"),
            (Provider::Youtube, _) => format!("https://youtube.com/channel/{item_id}"),
            (Provider::Vimeo, LinkType::Channel) => format!("https://vimeo.com/channels/{item_id}"),
            (Provider::Vimeo, LinkType::Group) => format!("https://vimeo.com/groups/{item_id}"),
            (Provider::Vimeo, _) => format!("https://vimeo.com/{item_id}"),
        }
    }

    /// Obfuscate API keys and tokens in URLs for safe logging
    ///
    /// ```rust
    /// use vidcast::utils::url::UrlUtils;
    ///
    /// let safe = UrlUtils::obfuscate_credentials("https://api.example.com/v3/videos?id=1&key=secret");
    /// assert_eq!(safe, "https://api.example.com/v3/videos?id=1&key=****");
    /// ```
    pub fn obfuscate_credentials(url: &str) -> String {
        static SENSITIVE: OnceLock<Regex> = OnceLock::new();
        let re = SENSITIVE.get_or_init(|| {
            Regex::new(r"(?i)([?&](?:key|api_key|access_token|token|password)=)[^&]*")
                .expect("static credential pattern is valid")
        });

        re.replace_all(url, "${1}****").to_string()
    }
}

/// First path segments Vimeo uses for its own pages rather than user profiles
const VIMEO_SITE_PATHS: &[&str] = &[
    "about", "blog", "categories", "channels", "create", "enterprise", "features", "groups",
    "help", "home", "join", "log_in", "login", "manage", "ondemand", "ott", "pricing",
    "search", "settings", "showcase", "stock", "upgrade", "upload", "videos", "watch",
];

fn is_vimeo_site_path(segment: &str) -> bool {
    VIMEO_SITE_PATHS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(segment))
}
