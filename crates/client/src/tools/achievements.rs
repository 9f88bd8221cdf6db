//! Global achievement rates and per-player achievements

use serde::Deserialize;
use steamtools_core::format::{completion_percentage, format_timestamp};
use steamtools_core::{
    AchievementPercent, GameRef, GlobalAchievements, PlayerAchievement, PlayerAchievements,
    ResultRecord, ToolError, ToolMessage, ToolParameters, UpstreamError,
};

use super::{ToolContext, APP_ID_EMPTY, STEAM_ID_EMPTY};
use crate::steam_api::{
    expect_key, fetch, flag, lenient_f64, StatusPolicy, API_GLOBAL_ACHIEVEMENTS,
    API_PLAYER_ACHIEVEMENTS,
};
use crate::transport::UpstreamRequest;

pub(super) const NOT_FOUND: &str =
    "No data found. The user might not exist, doesn't own the game, or has a private profile.";
const NO_ACHIEVEMENT_DATA: &str = "No achievement data found. The user might not own the game or the game might not support achievements";

#[derive(Debug, Deserialize)]
struct GlobalEnvelope {
    achievementpercentages: Option<GlobalBody>,
}

#[derive(Debug, Deserialize)]
struct GlobalBody {
    achievements: Option<Vec<SteamGlobalAchievement>>,
}

#[derive(Debug, Deserialize)]
struct SteamGlobalAchievement {
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    percent: Option<f64>,
}

/// `playerstats` as returned by GetPlayerAchievements and GetUserStatsForGame
#[derive(Debug, Deserialize)]
pub(super) struct PlayerStatsEnvelope {
    pub playerstats: Option<PlayerStats>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PlayerStats {
    #[serde(rename = "steamID")]
    pub steam_id: Option<String>,
    #[serde(rename = "gameName")]
    pub game_name: Option<String>,
    pub error: Option<String>,
    pub achievements: Option<Vec<SteamAchievement>>,
    pub stats: Option<Vec<SteamStat>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SteamAchievement {
    pub apiname: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub achieved: Option<bool>,
    pub unlocktime: Option<i64>,
}

impl SteamAchievement {
    pub fn is_achieved(&self) -> bool {
        self.achieved == Some(true)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SteamStat {
    pub name: Option<String>,
    pub value: Option<serde_json::Number>,
}

impl PlayerStats {
    /// Player and game identity, falling back to what the caller asked for
    pub fn identity(&self, steamid: &str, appid: &str) -> (String, GameRef) {
        let steam_id = self.steam_id.clone().unwrap_or_else(|| steamid.to_string());
        let game = GameRef {
            appid: appid.to_string(),
            name: self
                .game_name
                .clone()
                .unwrap_or_else(|| format!("AppID: {}", appid)),
        };
        (steam_id, game)
    }
}

/// Fetch `playerstats` for one player and game, surfacing an API-reported error
pub(super) fn fetch_player_stats(
    ctx: &ToolContext<'_>,
    path: &str,
    api_key: &str,
    steamid: &str,
    appid: &str,
    language: Option<&str>,
) -> Result<PlayerStats, UpstreamError> {
    let mut request = UpstreamRequest::get(ctx.endpoints.api_url(path))
        .param("appid", appid)
        .param("key", api_key)
        .param("steamid", steamid);
    if let Some(language) = language {
        request = request.param("l", language);
    }

    let envelope: PlayerStatsEnvelope = fetch(
        ctx.transport,
        &request,
        StatusPolicy::Categorized { not_found: NOT_FOUND },
    )?;
    let stats = expect_key(envelope.playerstats)?;
    if let Some(error) = stats.error {
        return Err(UpstreamError::Api(error));
    }
    Ok(stats)
}

pub(super) fn global_achievements(
    ctx: &ToolContext<'_>,
    params: &ToolParameters,
) -> Result<ToolMessage, ToolError> {
    ctx.api_key()?;
    let gameid = params.required("gameid", APP_ID_EMPTY)?;
    let wrap = |e| ToolError::upstream("get game achievement data", e);

    let request = UpstreamRequest::get(ctx.endpoints.api_url(API_GLOBAL_ACHIEVEMENTS))
        .param("gameid", &gameid)
        .param("format", "json");
    let envelope: GlobalEnvelope = fetch(ctx.transport, &request, StatusPolicy::Generic).map_err(wrap)?;
    let achievements = expect_key(expect_key(envelope.achievementpercentages).map_err(wrap)?.achievements)
        .map_err(wrap)?;

    if achievements.is_empty() {
        return Ok(ToolMessage::text(format!(
            "No achievement data found for game ID {}",
            gameid
        )));
    }

    let mut record = GlobalAchievements {
        gameid,
        achievement_count: achievements.len(),
        achievements: achievements
            .into_iter()
            .map(|a| AchievementPercent {
                name: a.name,
                percent: a.percent,
            })
            .collect(),
    };
    record.sort_by_percent();

    Ok(ToolMessage::json(&ResultRecord::ok(record))?)
}

pub(super) fn player_achievements(
    ctx: &ToolContext<'_>,
    params: &ToolParameters,
) -> Result<ToolMessage, ToolError> {
    let api_key = ctx.api_key()?;
    let steamid = params.required("steamid", STEAM_ID_EMPTY)?;
    let appid = params.required("appid", APP_ID_EMPTY)?;
    let language = params.get("language");
    let wrap = |e| ToolError::upstream("get player achievements", e);

    let mut stats = fetch_player_stats(
        ctx,
        API_PLAYER_ACHIEVEMENTS,
        api_key,
        &steamid,
        &appid,
        language.as_deref(),
    )
    .map_err(wrap)?;
    let achievements = stats
        .achievements
        .take()
        .ok_or_else(|| UpstreamError::Format(NO_ACHIEVEMENT_DATA.to_string()))
        .map_err(wrap)?;
    let (steam_id, game) = stats.identity(&steamid, &appid);

    if achievements.is_empty() {
        return Ok(ToolMessage::text(format!(
            "Steam user {} has no achievement data for game '{}'",
            steam_id, game.name
        )));
    }

    let completed = achievements.iter().filter(|a| a.is_achieved()).count();
    let mut record = PlayerAchievements {
        steamid: steam_id,
        game,
        achievement_count: achievements.len(),
        completed_count: completed,
        completion_percentage: completion_percentage(completed, achievements.len()),
        achievements: achievements
            .into_iter()
            .map(|a| {
                let unlocked_at = if a.is_achieved() {
                    Some(a.unlocktime.unwrap_or(0))
                } else {
                    None
                };
                PlayerAchievement {
                    achieved: a.is_achieved(),
                    unlocktime_timestamp: unlocked_at,
                    unlocktime_date: unlocked_at.and_then(format_timestamp),
                    apiname: a.apiname,
                    name: a.name,
                    description: a.description,
                }
            })
            .collect(),
    };
    record.sort_by_unlock();

    Ok(ToolMessage::json(&ResultRecord::ok(record))?)
}

#[cfg(test)]
mod tests {
    use crate::testing::{invoke, notice, record, FakeTransport, STEAM_ID};
    use crate::tools::Tool;
    use serde_json::json;

    #[test]
    fn test_global_rates_highest_first() {
        let transport = FakeTransport::json(
            200,
            json!({"achievementpercentages": {"achievements": [
                {"name": "TF_PLAY_GAME_EVERYCLASS", "percent": 10.0},
                {"name": "TF_GET_HEADSHOTS", "percent": "90.5"},
                {"name": "TF_KILL_NEMESIS", "percent": 50}
            ]}}),
        );
        let json = record(invoke(Tool::GlobalAchievements, &transport, json!({"gameid": "440"})));

        assert_eq!(json["gameid"], "440");
        assert_eq!(json["achievement_count"], 3);
        let order: Vec<f64> = json["achievements"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["percent"].as_f64().unwrap())
            .collect();
        assert_eq!(order, vec![90.5, 50.0, 10.0]);

        // Global rates are public: no key goes upstream
        let request = transport.last_request();
        assert_eq!(request.query_value("key"), None);
        assert_eq!(request.query_value("gameid"), Some("440"));
    }

    #[test]
    fn test_global_rates_empty() {
        let transport = FakeTransport::json(200, json!({"achievementpercentages": {"achievements": []}}));
        let text = notice(invoke(Tool::GlobalAchievements, &transport, json!({"gameid": 620})));
        assert_eq!(text, "No achievement data found for game ID 620");
    }

    fn player_stats(achievements: serde_json::Value) -> serde_json::Value {
        json!({"playerstats": {
            "steamID": STEAM_ID,
            "gameName": "Portal 2",
            "achievements": achievements,
            "success": true
        }})
    }

    #[test]
    fn test_player_achievements_unlocked_first() {
        let transport = FakeTransport::json(
            200,
            player_stats(json!([
                {"apiname": "ACH_LOCKED", "achieved": 0, "unlocktime": 0},
                {"apiname": "ACH_OLD", "achieved": 1, "unlocktime": 100, "name": "Old", "description": "First"},
                {"apiname": "ACH_NEW", "achieved": 1, "unlocktime": 200}
            ])),
        );
        let json = record(invoke(
            Tool::PlayerAchievements,
            &transport,
            json!({"steamid": STEAM_ID, "appid": "620", "language": "english"}),
        ));

        assert_eq!(json["game"], json!({"appid": "620", "name": "Portal 2"}));
        assert_eq!(json["achievement_count"], 3);
        assert_eq!(json["completed_count"], 2);
        assert_eq!(json["completion_percentage"], 66.67);

        let achievements = json["achievements"].as_array().unwrap();
        let order: Vec<&str> = achievements.iter().map(|a| a["apiname"].as_str().unwrap()).collect();
        assert_eq!(order, vec!["ACH_NEW", "ACH_OLD", "ACH_LOCKED"]);
        assert_eq!(achievements[0]["unlocktime_timestamp"], 200);
        assert_eq!(achievements[1]["name"], "Old");
        assert_eq!(achievements[2]["achieved"], false);
        assert!(achievements[2].get("unlocktime_timestamp").is_none());
        assert!(achievements[2].get("unlocktime_date").is_none());

        assert_eq!(transport.last_request().query_value("l"), Some("english"));
    }

    #[test]
    fn test_player_achievements_language_optional() {
        let transport = FakeTransport::json(200, player_stats(json!([])));
        let text = notice(invoke(
            Tool::PlayerAchievements,
            &transport,
            json!({"steamid": STEAM_ID, "appid": "620", "language": ""}),
        ));
        assert_eq!(
            text,
            format!("Steam user {} has no achievement data for game 'Portal 2'", STEAM_ID)
        );
        assert_eq!(transport.last_request().query_value("l"), None);
    }

    #[test]
    fn test_player_achievements_api_error() {
        let transport = FakeTransport::json(
            200,
            json!({"playerstats": {"error": "Requested app has no stats", "success": false}}),
        );
        let err = invoke(
            Tool::PlayerAchievements,
            &transport,
            json!({"steamid": STEAM_ID, "appid": "70"}),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to get player achievements: Steam API returned an error: Requested app has no stats"
        );
    }

    #[test]
    fn test_player_achievements_missing_list() {
        let transport = FakeTransport::json(200, json!({"playerstats": {"steamID": STEAM_ID}}));
        let err = invoke(
            Tool::PlayerAchievements,
            &transport,
            json!({"steamid": STEAM_ID, "appid": "70"}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("No achievement data found"));
    }

    #[test]
    fn test_player_achievements_private_profile() {
        let transport = FakeTransport::json(404, json!({}));
        let err = invoke(
            Tool::PlayerAchievements,
            &transport,
            json!({"steamid": STEAM_ID, "appid": "620"}),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to get player achievements: No data found. The user might not exist, doesn't own the game, or has a private profile."
        );
    }
}
