//! Per-player game statistics

use steamtools_core::format::completion_percentage;
use steamtools_core::{
    ResultRecord, StatAchievement, StatValue, ToolError, ToolMessage, ToolParameters, UserStats,
};

use super::achievements::fetch_player_stats;
use super::{ToolContext, APP_ID_EMPTY, STEAM_ID_EMPTY};
use crate::steam_api::API_USER_STATS;

pub(super) fn user_stats(
    ctx: &ToolContext<'_>,
    params: &ToolParameters,
) -> Result<ToolMessage, ToolError> {
    let api_key = ctx.api_key()?;
    let steamid = params.required("steamid", STEAM_ID_EMPTY)?;
    let appid = params.required("appid", APP_ID_EMPTY)?;
    let language = params.get("language");

    let mut player_stats = fetch_player_stats(
        ctx,
        API_USER_STATS,
        api_key,
        &steamid,
        &appid,
        language.as_deref(),
    )
    .map_err(|e| ToolError::upstream("get user game statistics", e))?;

    let stats = player_stats.stats.take().unwrap_or_default();
    let achievements = player_stats.achievements.take().unwrap_or_default();
    let (steam_id, game) = player_stats.identity(&steamid, &appid);

    if stats.is_empty() && achievements.is_empty() {
        return Ok(ToolMessage::text(format!(
            "Steam user {} has no available statistics for game '{}'",
            steam_id, game.name
        )));
    }

    let mut record = UserStats {
        steamid: steam_id,
        game,
        stats_count: None,
        stats: None,
        achievement_count: None,
        completed_count: None,
        completion_percentage: None,
        achievements: None,
    };

    if !stats.is_empty() {
        record.stats_count = Some(stats.len());
        record.stats = Some(
            stats
                .into_iter()
                .map(|s| StatValue {
                    name: s.name,
                    value: s.value,
                })
                .collect(),
        );
    }

    if !achievements.is_empty() {
        let completed = achievements.iter().filter(|a| a.is_achieved()).count();
        record.achievement_count = Some(achievements.len());
        record.completed_count = Some(completed);
        record.completion_percentage = completion_percentage(completed, achievements.len());
        record.achievements = Some(
            achievements
                .into_iter()
                .map(|a| StatAchievement {
                    achieved: a.is_achieved(),
                    name: a.name,
                })
                .collect(),
        );
    }

    Ok(ToolMessage::json(&ResultRecord::ok(record))?)
}

#[cfg(test)]
mod tests {
    use crate::testing::{invoke, notice, record, FakeTransport, STEAM_ID};
    use crate::tools::Tool;
    use serde_json::json;

    #[test]
    fn test_stats_and_achievements() {
        let transport = FakeTransport::json(
            200,
            json!({"playerstats": {
                "steamID": STEAM_ID,
                "gameName": "Team Fortress 2",
                "stats": [
                    {"name": "Scout.accum.iNumberOfKills", "value": 1523},
                    {"name": "Scout.max.fPlayTime", "value": 12.5}
                ],
                "achievements": [
                    {"name": "TF_PLAY_GAME_EVERYCLASS", "achieved": 1},
                    {"name": "TF_GET_HEADSHOTS", "achieved": 1},
                    {"name": "TF_KILL_NEMESIS", "achieved": 0},
                    {"name": "TF_WIN_MULTIPLEGAMES", "achieved": 0}
                ]
            }}),
        );
        let json = record(invoke(
            Tool::UserStats,
            &transport,
            json!({"steamid": STEAM_ID, "appid": "440"}),
        ));

        assert_eq!(json["game"]["name"], "Team Fortress 2");
        assert_eq!(json["stats_count"], 2);
        assert_eq!(json["stats"][0]["value"], 1523);
        assert_eq!(json["stats"][1]["value"], 12.5);
        assert_eq!(json["achievement_count"], 4);
        assert_eq!(json["completed_count"], 2);
        assert_eq!(json["completion_percentage"], 50.0);
        assert_eq!(json["achievements"][2], json!({"name": "TF_KILL_NEMESIS", "achieved": false}));

        let request = transport.last_request();
        assert!(request.url.ends_with("ISteamUserStats/GetUserStatsForGame/v0002/"));
    }

    #[test]
    fn test_stats_only() {
        let transport = FakeTransport::json(
            200,
            json!({"playerstats": {"stats": [{"name": "total_kills", "value": 7}]}}),
        );
        let json = record(invoke(
            Tool::UserStats,
            &transport,
            json!({"steamid": STEAM_ID, "appid": "730"}),
        ));

        assert_eq!(json["steamid"], STEAM_ID);
        assert_eq!(json["game"]["name"], "AppID: 730");
        assert!(json.get("achievements").is_none());
        assert!(json.get("completion_percentage").is_none());
    }

    #[test]
    fn test_no_statistics_notice() {
        let transport = FakeTransport::json(200, json!({"playerstats": {"steamID": "42", "gameName": "Dota 2"}}));
        let text = notice(invoke(Tool::UserStats, &transport, json!({"steamid": "42", "appid": "570"})));
        assert_eq!(text, "Steam user 42 has no available statistics for game 'Dota 2'");
    }

    #[test]
    fn test_unauthorized_key() {
        let transport = FakeTransport::json(401, json!({}));
        let err = invoke(Tool::UserStats, &transport, json!({"steamid": "42", "appid": "570"})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to get user game statistics: API key is invalid or unauthorized."
        );
    }
}
