/// Configuration default values
///
/// All default values for configuration options live here so they can be
/// changed in one place.
// Tier page-size ceilings
pub const DEFAULT_STANDARD_PAGE_SIZE: u32 = 50;
pub const DEFAULT_EXTENDED_FEATURES_PAGE_SIZE: u32 = 150;
pub const DEFAULT_EXTENDED_PAGINATION_PAGE_SIZE: u32 = 600;

// Upstream HTTP defaults
pub const DEFAULT_HTTP_TIMEOUT: &str = "30s";
pub const DEFAULT_HTTP_CONNECT_TIMEOUT: &str = "10s";
pub const DEFAULT_USER_AGENT: &str = concat!("vidcast/", env!("CARGO_PKG_VERSION"));

// Provider API endpoints
pub const DEFAULT_VIMEO_API_URL: &str = "https://api.vimeo.com";
pub const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";

// Enclosure URLs point back at this host's download endpoint
pub const DEFAULT_DOWNLOAD_BASE_URL: &str = "http://localhost:8080";

// Build worker defaults
pub const DEFAULT_WORKER_POLL_INTERVAL: &str = "5s";
pub const DEFAULT_WORKER_BATCH_SIZE: usize = 10;
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

// Environment
pub const CONFIG_FILE_ENV: &str = "CONFIG_FILE";
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const ENV_PREFIX: &str = "VIDCAST_";
