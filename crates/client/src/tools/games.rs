//! Owned games and recently played games

use serde::Deserialize;
use steamtools_core::format::playtime_readable;
use steamtools_core::{
    OwnedGame, OwnedGames, RecentGame, RecentlyPlayed, ResultRecord, ToolError, ToolMessage,
    ToolParameters,
};

use super::{ToolContext, STEAM_ID_EMPTY};
use crate::steam_api::{
    expect_key, fetch, flag, SteamEndpoints, StatusPolicy, API_OWNED_GAMES, API_RECENTLY_PLAYED,
};
use crate::transport::UpstreamRequest;

const NOT_FOUND: &str = "No data found. The user might not exist or the profile is not public.";
const NO_GAMES: &str = "This Steam user doesn't own any games or all games are filtered out.";
const PRIVATE_LIBRARY: &str = "Unable to retrieve game list. The user's profile might be private.";
const NO_RECENT_GAMES: &str =
    "This Steam user hasn't played any games in the last two weeks or the profile is private.";
const BAD_FILTER_JSON: &str = "Invalid JSON format for appids_filter. Example: [440, 570, 730]";
const BAD_FILTER_SHAPE: &str = "appids_filter must be a JSON array of app IDs.";

#[derive(Debug, Deserialize)]
struct GamesEnvelope {
    response: Option<GamesBody>,
}

/// Shared by GetOwnedGames (`game_count`) and GetRecentlyPlayedGames (`total_count`)
#[derive(Debug, Deserialize)]
struct GamesBody {
    game_count: Option<u64>,
    total_count: Option<u64>,
    games: Option<Vec<SteamGame>>,
}

#[derive(Debug, Deserialize)]
struct SteamGame {
    #[serde(default)]
    appid: u64,
    name: Option<String>,
    playtime_forever: Option<u64>,
    playtime_2weeks: Option<u64>,
    img_icon_url: Option<String>,
    img_logo_url: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    has_community_visible_stats: Option<bool>,
}

impl SteamGame {
    /// (hash, url) pairs for the icon and logo, skipping empty hashes
    fn images(&self, endpoints: &SteamEndpoints) -> [Option<(String, String)>; 2] {
        let image = |hash: &Option<String>| {
            hash.as_ref()
                .filter(|h| !h.is_empty())
                .map(|h| (h.clone(), endpoints.app_image_url(self.appid, h)))
        };
        [image(&self.img_icon_url), image(&self.img_logo_url)]
    }
}

/// Parse the optional `appids_filter` JSON array
fn appids_filter(params: &ToolParameters) -> Result<Vec<u64>, ToolError> {
    let Some(raw) = params.get("appids_filter") else {
        return Ok(Vec::new());
    };

    let value: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|_| ToolError::InvalidParameter(BAD_FILTER_JSON.to_string()))?;

    value
        .as_array()
        .and_then(|items| items.iter().map(serde_json::Value::as_u64).collect::<Option<Vec<u64>>>())
        .ok_or_else(|| ToolError::InvalidParameter(BAD_FILTER_SHAPE.to_string()))
}

pub(super) fn owned_games(
    ctx: &ToolContext<'_>,
    params: &ToolParameters,
) -> Result<ToolMessage, ToolError> {
    let api_key = ctx.api_key()?;
    let steamid = params.required("steamid", STEAM_ID_EMPTY)?;
    let include_appinfo = params.flag("include_appinfo", true);
    let include_played_free_games = params.flag("include_played_free_games", true);
    let filter = appids_filter(params)?;

    let mut request = UpstreamRequest::get(ctx.endpoints.api_url(API_OWNED_GAMES))
        .param("key", api_key)
        .param("steamid", &steamid)
        .param("format", "json");
    if include_appinfo {
        request = request.param("include_appinfo", 1);
    }
    if include_played_free_games {
        request = request.param("include_played_free_games", 1);
    }
    // The filter travels in the body while key and steamid stay on the URL
    if !filter.is_empty() {
        let body = serde_json::json!({ "appids_filter": filter }).to_string();
        request = request.post_body(body);
    }

    let envelope: GamesEnvelope = fetch(
        ctx.transport,
        &request,
        StatusPolicy::Categorized { not_found: NOT_FOUND },
    )
    .map_err(|e| ToolError::upstream("get owned games", e))?;
    let body = expect_key(envelope.response).map_err(|e| ToolError::upstream("get owned games", e))?;

    let games = match body.games {
        Some(games) if !games.is_empty() => games,
        Some(_) => return Ok(ToolMessage::text(NO_GAMES)),
        None if body.game_count == Some(0) => return Ok(ToolMessage::text(NO_GAMES)),
        None => return Ok(ToolMessage::text(PRIVATE_LIBRARY)),
    };

    let mut record = OwnedGames {
        game_count: body.game_count.unwrap_or(games.len() as u64),
        games: games
            .into_iter()
            .map(|game| project_owned(game, &steamid, include_appinfo, ctx.endpoints))
            .collect(),
        steamid,
    };
    record.sort_by_playtime();

    Ok(ToolMessage::json(&ResultRecord::ok(record))?)
}

fn project_owned(
    game: SteamGame,
    steamid: &str,
    include_appinfo: bool,
    endpoints: &SteamEndpoints,
) -> OwnedGame {
    let playtime_forever = game.playtime_forever.unwrap_or(0);
    let mut owned = OwnedGame {
        appid: game.appid,
        playtime_forever,
        playtime_2weeks: game.playtime_2weeks,
        has_community_visible_stats: game.has_community_visible_stats,
        playtime_readable: playtime_readable(playtime_forever),
        playtime_2weeks_readable: game.playtime_2weeks.map(playtime_readable),
        ..Default::default()
    };

    if include_appinfo {
        let [icon, logo] = game.images(endpoints);
        owned.name = game.name;
        (owned.img_icon_url, owned.icon_url) = icon.unzip();
        (owned.img_logo_url, owned.logo_url) = logo.unzip();
    }

    if game.has_community_visible_stats == Some(true) {
        owned.stats_url = Some(endpoints.stats_url(steamid, game.appid));
    }

    owned
}

pub(super) fn recently_played(
    ctx: &ToolContext<'_>,
    params: &ToolParameters,
) -> Result<ToolMessage, ToolError> {
    let api_key = ctx.api_key()?;
    let steamid = params.required("steamid", STEAM_ID_EMPTY)?;
    let count = match params.get("count") {
        Some(raw) => Some(
            raw.trim()
                .parse::<u32>()
                .ok()
                .filter(|c| *c > 0)
                .ok_or_else(|| {
                    ToolError::InvalidParameter(
                        "Invalid count value. It must be a positive integer.".to_string(),
                    )
                })?,
        ),
        None => None,
    };

    let mut request = UpstreamRequest::get(ctx.endpoints.api_url(API_RECENTLY_PLAYED))
        .param("key", api_key)
        .param("steamid", &steamid)
        .param("format", "json");
    if let Some(count) = count {
        request = request.param("count", count);
    }

    let envelope: GamesEnvelope = fetch(
        ctx.transport,
        &request,
        StatusPolicy::Categorized { not_found: NOT_FOUND },
    )
    .map_err(|e| ToolError::upstream("get recently played games", e))?;
    let body = expect_key(envelope.response)
        .map_err(|e| ToolError::upstream("get recently played games", e))?;

    let games = match body.games {
        Some(games) if !games.is_empty() => games,
        _ => return Ok(ToolMessage::text(NO_RECENT_GAMES)),
    };

    let mut record = RecentlyPlayed {
        steamid,
        total_count: body.total_count.unwrap_or(games.len() as u64),
        games: games
            .into_iter()
            .map(|game| {
                let [icon, logo] = game.images(ctx.endpoints);
                let (img_icon_url, icon_url) = icon.unzip();
                let (img_logo_url, logo_url) = logo.unzip();
                let playtime_2weeks = game.playtime_2weeks.unwrap_or(0);
                let playtime_forever = game.playtime_forever.unwrap_or(0);
                RecentGame {
                    appid: game.appid,
                    name: game.name,
                    playtime_2weeks,
                    playtime_forever,
                    img_icon_url,
                    icon_url,
                    img_logo_url,
                    logo_url,
                    playtime_2weeks_readable: playtime_readable(playtime_2weeks),
                    playtime_forever_readable: playtime_readable(playtime_forever),
                }
            })
            .collect(),
    };
    record.sort_by_recent_playtime();

    Ok(ToolMessage::json(&ResultRecord::ok(record))?)
}
