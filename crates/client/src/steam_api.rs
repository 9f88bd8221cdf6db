//! Shared request execution against the Steam Web API

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use steamtools_core::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_COMMUNITY_BASE_URL, DEFAULT_MEDIA_BASE_URL,
};
use steamtools_core::UpstreamError;

use crate::transport::{HttpTransport, UpstreamRequest};

pub const API_PLAYER_SUMMARIES: &str = "ISteamUser/GetPlayerSummaries/v0002/";
pub const API_FRIEND_LIST: &str = "ISteamUser/GetFriendList/v0001/";
pub const API_OWNED_GAMES: &str = "IPlayerService/GetOwnedGames/v0001/";
pub const API_RECENTLY_PLAYED: &str = "IPlayerService/GetRecentlyPlayedGames/v0001/";
pub const API_GLOBAL_ACHIEVEMENTS: &str =
    "ISteamUserStats/GetGlobalAchievementPercentagesForApp/v0002/";
pub const API_PLAYER_ACHIEVEMENTS: &str = "ISteamUserStats/GetPlayerAchievements/v0001/";
pub const API_USER_STATS: &str = "ISteamUserStats/GetUserStatsForGame/v0002/";
pub const API_NEWS: &str = "ISteamNews/GetNewsForApp/v0002/";

pub(crate) const INVALID_FORMAT: &str = "Invalid API response format";

/// Base URLs for the API and the derived media/community links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteamEndpoints {
    pub api_base: String,
    pub media_base: String,
    pub community_base: String,
}

impl Default for SteamEndpoints {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE_URL.to_string(),
            media_base: DEFAULT_MEDIA_BASE_URL.to_string(),
            community_base: DEFAULT_COMMUNITY_BASE_URL.to_string(),
        }
    }
}

impl SteamEndpoints {
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), path)
    }

    /// Icon or logo image for an app, from the hash the API returns
    pub fn app_image_url(&self, appid: u64, hash: &str) -> String {
        format!("{}/{}/{}.jpg", self.media_base.trim_end_matches('/'), appid, hash)
    }

    pub fn stats_url(&self, steamid: &str, appid: u64) -> String {
        format!(
            "{}/{}/stats/{}",
            self.community_base.trim_end_matches('/'),
            steamid,
            appid
        )
    }
}

/// How non-200 statuses are reported for an endpoint
#[derive(Debug, Clone, Copy)]
pub(crate) enum StatusPolicy {
    /// Every failure is "request failed with status code N"
    Generic,
    /// 401 and 403 get their own messages, 404 uses `not_found`
    Categorized { not_found: &'static str },
}

pub(crate) fn check_status(status: u16, policy: StatusPolicy) -> Result<(), UpstreamError> {
    match (status, policy) {
        (200, _) => Ok(()),
        (401, StatusPolicy::Categorized { .. }) => Err(UpstreamError::Unauthorized),
        (403, StatusPolicy::Categorized { .. }) => Err(UpstreamError::Forbidden),
        (404, StatusPolicy::Categorized { not_found }) => Err(UpstreamError::NotFound(not_found)),
        _ => Err(UpstreamError::Status(status)),
    }
}

/// Send one request, map the status and decode the body into `T`
pub(crate) fn fetch<T: DeserializeOwned>(
    transport: &dyn HttpTransport,
    request: &UpstreamRequest,
    policy: StatusPolicy,
) -> Result<T, UpstreamError> {
    tracing::debug!(method = ?request.method, url = %request.url, "Steam API request");

    let response = transport.send(request)?;
    if let Err(e) = check_status(response.status, policy) {
        tracing::warn!(url = %request.url, status = response.status, "Steam API request failed");
        return Err(e);
    }

    serde_json::from_str(&response.body)
        .map_err(|e| UpstreamError::Format(format!("{}: {}", INVALID_FORMAT, e)))
}

/// Unwrap a container key that must be present
pub(crate) fn expect_key<T>(value: Option<T>) -> Result<T, UpstreamError> {
    value.ok_or_else(|| UpstreamError::Format(INVALID_FORMAT.to_string()))
}

/// Accepts `1`, `true` or `"1"` style flags
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Bool(b)) => Some(b),
        Some(serde_json::Value::Number(n)) => Some(n.as_f64().unwrap_or(0.0) != 0.0),
        Some(serde_json::Value::String(s)) => Some(!s.is_empty() && s != "0" && s != "false"),
        _ => None,
    })
}

/// Numbers that may arrive as JSON numbers or numeric strings
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
