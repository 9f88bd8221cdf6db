//! Tool registry and the context every tool runs with

mod achievements;
mod friends;
mod games;
mod news;
mod profile;
mod stats;

use serde::Serialize;
use steamtools_core::{Credentials, ToolError, ToolMessage, ToolParameters};

use crate::steam_api::SteamEndpoints;
use crate::transport::HttpTransport;

pub(crate) use profile::{fetch_players, SteamPlayer};

pub(crate) const API_KEY_MISSING: &str =
    "Steam API Key is not configured or invalid. Please provide it in the plugin settings.";
pub(crate) const STEAM_ID_EMPTY: &str = "Steam ID cannot be empty.";
pub(crate) const APP_ID_EMPTY: &str = "Game AppID cannot be empty.";

/// Everything a tool needs besides its parameters
pub struct ToolContext<'a> {
    pub transport: &'a dyn HttpTransport,
    pub endpoints: &'a SteamEndpoints,
    pub credentials: &'a Credentials,
}

impl<'a> ToolContext<'a> {
    pub fn new(
        transport: &'a dyn HttpTransport,
        endpoints: &'a SteamEndpoints,
        credentials: &'a Credentials,
    ) -> Self {
        Self {
            transport,
            endpoints,
            credentials,
        }
    }

    pub(crate) fn api_key(&self) -> Result<&'a str, ToolError> {
        self.credentials
            .api_key()
            .ok_or_else(|| ToolError::Configuration(API_KEY_MISSING.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    ProfileSummary,
    PlayerDetails,
    FriendList,
    OwnedGames,
    RecentlyPlayed,
    GlobalAchievements,
    PlayerAchievements,
    UserStats,
    News,
}

/// One accepted parameter, as advertised to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

const fn required(name: &'static str, description: &'static str) -> ParameterSpec {
    ParameterSpec { name, required: true, description }
}

const fn optional(name: &'static str, description: &'static str) -> ParameterSpec {
    ParameterSpec { name, required: false, description }
}

const PROFILE_SUMMARY_PARAMS: &[ParameterSpec] = &[required("steam_id", "17-digit Steam ID")];
const PLAYER_DETAILS_PARAMS: &[ParameterSpec] =
    &[required("steamids", "Comma-separated Steam IDs, up to 100")];
const FRIEND_LIST_PARAMS: &[ParameterSpec] = &[
    required("steamid", "64-bit Steam ID"),
    optional("relationship", "all or friend (default friend)"),
];
const OWNED_GAMES_PARAMS: &[ParameterSpec] = &[
    required("steamid", "64-bit Steam ID"),
    optional("include_appinfo", "Include names and images (default true)"),
    optional("include_played_free_games", "Include played free games (default true)"),
    optional("appids_filter", "JSON array of app IDs, e.g. [440, 570]"),
];
const RECENTLY_PLAYED_PARAMS: &[ParameterSpec] = &[
    required("steamid", "64-bit Steam ID"),
    optional("count", "Maximum number of games"),
];
const GLOBAL_ACHIEVEMENTS_PARAMS: &[ParameterSpec] = &[required("gameid", "AppID of the game")];
const PLAYER_STATS_PARAMS: &[ParameterSpec] = &[
    required("steamid", "64-bit Steam ID"),
    required("appid", "AppID of the game"),
    optional("language", "Language for names and descriptions"),
];
const NEWS_PARAMS: &[ParameterSpec] = &[
    required("appid", "AppID of the game"),
    optional("count", "Number of entries (default 3)"),
    optional("maxlength", "Maximum length of each entry (default 300)"),
];

impl Tool {
    pub const ALL: [Tool; 9] = [
        Tool::ProfileSummary,
        Tool::PlayerDetails,
        Tool::FriendList,
        Tool::OwnedGames,
        Tool::RecentlyPlayed,
        Tool::GlobalAchievements,
        Tool::PlayerAchievements,
        Tool::UserStats,
        Tool::News,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::ProfileSummary => "profile_summary",
            Tool::PlayerDetails => "player_details",
            Tool::FriendList => "friend_list",
            Tool::OwnedGames => "owned_games",
            Tool::RecentlyPlayed => "recently_played",
            Tool::GlobalAchievements => "achievements",
            Tool::PlayerAchievements => "player_achievements",
            Tool::UserStats => "user_stats",
            Tool::News => "news",
        }
    }

    pub fn from_name(name: &str) -> Option<Tool> {
        Tool::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::ProfileSummary => "Profile summary for one Steam user",
            Tool::PlayerDetails => "Detailed profiles for up to 100 Steam users",
            Tool::FriendList => "Friend list of a user with a public profile",
            Tool::OwnedGames => "Games owned by a user, most played first",
            Tool::RecentlyPlayed => "Games played in the last two weeks",
            Tool::GlobalAchievements => "Global achievement completion rates for a game",
            Tool::PlayerAchievements => "A user's achievements in a game",
            Tool::UserStats => "A user's statistics in a game",
            Tool::News => "Latest news for a game",
        }
    }

    pub fn parameters(self) -> &'static [ParameterSpec] {
        match self {
            Tool::ProfileSummary => PROFILE_SUMMARY_PARAMS,
            Tool::PlayerDetails => PLAYER_DETAILS_PARAMS,
            Tool::FriendList => FRIEND_LIST_PARAMS,
            Tool::OwnedGames => OWNED_GAMES_PARAMS,
            Tool::RecentlyPlayed => RECENTLY_PLAYED_PARAMS,
            Tool::GlobalAchievements => GLOBAL_ACHIEVEMENTS_PARAMS,
            Tool::PlayerAchievements | Tool::UserStats => PLAYER_STATS_PARAMS,
            Tool::News => NEWS_PARAMS,
        }
    }

    /// Run the tool: JSON record on success, text notice on an empty result
    pub fn invoke(
        self,
        ctx: &ToolContext<'_>,
        params: &ToolParameters,
    ) -> Result<ToolMessage, ToolError> {
        match self {
            Tool::ProfileSummary => profile::profile_summary(ctx, params),
            Tool::PlayerDetails => profile::player_details(ctx, params),
            Tool::FriendList => friends::friend_list(ctx, params),
            Tool::OwnedGames => games::owned_games(ctx, params),
            Tool::RecentlyPlayed => games::recently_played(ctx, params),
            Tool::GlobalAchievements => achievements::global_achievements(ctx, params),
            Tool::PlayerAchievements => achievements::player_achievements(ctx, params),
            Tool::UserStats => stats::user_stats(ctx, params),
            Tool::News => news::news(ctx, params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{invoke, invoke_with, FakeTransport, STEAM_ID};
    use serde_json::json;

    /// Parameters that satisfy every tool's required set
    fn full_params() -> serde_json::Value {
        json!({
            "steam_id": STEAM_ID,
            "steamids": STEAM_ID,
            "steamid": STEAM_ID,
            "appid": "440",
            "gameid": "440",
        })
    }

    #[test]
    fn test_names_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_name(tool.name()), Some(tool));
            assert!(tool.parameters().iter().any(|p| p.required));
        }
        assert_eq!(Tool::from_name("steam_wishlist"), None);
    }

    #[test]
    fn test_advertised_parameters() {
        let owned: Vec<(&str, bool)> = Tool::OwnedGames
            .parameters()
            .iter()
            .map(|p| (p.name, p.required))
            .collect();
        assert_eq!(
            owned,
            [
                ("steamid", true),
                ("include_appinfo", false),
                ("include_played_free_games", false),
                ("appids_filter", false),
            ]
        );
        assert_eq!(Tool::PlayerAchievements.parameters(), Tool::UserStats.parameters());
        assert_eq!(Tool::News.parameters().len(), 3);
    }

    #[test]
    fn test_missing_api_key_never_calls_upstream() {
        for tool in Tool::ALL {
            let transport = FakeTransport::json(200, json!({}));
            let err = invoke_with(tool, &transport, &Credentials::default(), full_params()).unwrap_err();
            assert!(matches!(err, ToolError::Configuration(_)), "{}", tool.name());
            assert_eq!(transport.calls(), 0);
        }
    }

    #[test]
    fn test_missing_required_parameter_never_calls_upstream() {
        for tool in Tool::ALL {
            let transport = FakeTransport::json(200, json!({}));
            let err = invoke(tool, &transport, json!({})).unwrap_err();
            assert!(matches!(err, ToolError::InvalidParameter(_)), "{}", tool.name());
            assert_eq!(transport.calls(), 0);
        }
    }

    #[test]
    fn test_unexpected_status_is_generic_failure() {
        for tool in Tool::ALL {
            let transport = FakeTransport::json(500, json!({}));
            let err = invoke(tool, &transport, full_params()).unwrap_err();
            assert!(
                err.to_string().ends_with("Steam API request failed with status code: 500"),
                "{}: {}",
                tool.name(),
                err
            );
            assert_eq!(transport.calls(), 1);
        }
    }

    #[test]
    fn test_missing_top_level_key_is_format_error() {
        for tool in Tool::ALL {
            let transport = FakeTransport::json(200, json!({"unexpected": {}}));
            let err = invoke(tool, &transport, full_params()).unwrap_err();
            assert!(
                matches!(err, ToolError::Upstream { source: steamtools_core::UpstreamError::Format(_), .. }),
                "{}: {}",
                tool.name(),
                err
            );
        }
    }

    #[test]
    fn test_non_json_body_is_format_error() {
        let transport = FakeTransport::raw(200, "<html>Service Unavailable</html>");
        let err = invoke(Tool::News, &transport, full_params()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to get game news: Invalid API response format"));
    }

    #[test]
    fn test_transport_failure_is_wrapped() {
        let transport = FakeTransport::unreachable();
        let err = invoke(Tool::FriendList, &transport, full_params()).unwrap_err();
        assert_eq!(err.to_string(), "Failed to get friend list: connection refused");
    }
}
