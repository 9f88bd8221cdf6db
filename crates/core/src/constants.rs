//! Upstream locations and parameter defaults

/// Steam Web API root
pub const DEFAULT_API_BASE_URL: &str = "http://api.steampowered.com";

/// Root for app icon and logo images, followed by `/{appid}/{hash}.jpg`
pub const DEFAULT_MEDIA_BASE_URL: &str =
    "http://media.steampowered.com/steamcommunity/public/images/apps";

/// Root for community profile pages, followed by `/{steamid}/stats/{appid}`
pub const DEFAULT_COMMUNITY_BASE_URL: &str = "http://steamcommunity.com/profiles";

/// GetPlayerSummaries accepts at most this many comma-separated IDs
pub const MAX_STEAM_IDS: usize = 100;

pub const DEFAULT_RELATIONSHIP: &str = "friend";
pub const RELATIONSHIPS: [&str; 2] = ["all", "friend"];

pub const DEFAULT_NEWS_COUNT: u32 = 3;
pub const DEFAULT_NEWS_MAX_LENGTH: u32 = 300;
