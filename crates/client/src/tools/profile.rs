//! Player summaries: single profile and batch details

use serde::Deserialize;
use steamtools_core::constants::MAX_STEAM_IDS;
use steamtools_core::format::persona_state_label;
use steamtools_core::{
    PlayerDetail, PlayerDetails, PlayerProfile, PlayerSummary, ResultRecord, ToolError,
    ToolMessage, ToolParameters, UpstreamError,
};

use super::{ToolContext, STEAM_ID_EMPTY};
use crate::steam_api::{expect_key, fetch, SteamEndpoints, StatusPolicy, API_PLAYER_SUMMARIES};
use crate::transport::{HttpTransport, UpstreamRequest};

#[derive(Debug, Deserialize)]
struct SummariesEnvelope {
    response: Option<SummariesBody>,
}

#[derive(Debug, Deserialize)]
struct SummariesBody {
    players: Option<Vec<SteamPlayer>>,
}

/// Player as returned by GetPlayerSummaries
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SteamPlayer {
    pub steamid: Option<String>,
    pub personaname: Option<String>,
    pub profileurl: Option<String>,
    pub avatar: Option<String>,
    pub avatarmedium: Option<String>,
    pub avatarfull: Option<String>,
    pub personastate: Option<i64>,
    pub communityvisibilitystate: Option<i64>,
    pub profilestate: Option<i64>,
    pub lastlogoff: Option<i64>,
    pub commentpermission: Option<i64>,
    pub realname: Option<String>,
    pub primaryclanid: Option<String>,
    pub timecreated: Option<i64>,
    pub gameid: Option<String>,
    pub gameserverip: Option<String>,
    pub gameextrainfo: Option<String>,
    pub loccountrycode: Option<String>,
    pub locstatecode: Option<String>,
    pub loccityid: Option<i64>,
}

impl SteamPlayer {
    pub(crate) fn into_profile(self) -> PlayerProfile {
        PlayerProfile {
            steamid: self.steamid,
            personaname: self.personaname,
            profileurl: self.profileurl,
            avatar: self.avatar,
            avatarmedium: self.avatarmedium,
            avatarfull: self.avatarfull,
            personastate: self.personastate,
            lastlogoff: self.lastlogoff,
            timecreated: self.timecreated,
            communityvisibilitystate: self.communityvisibilitystate,
        }
    }

    fn into_detail(self) -> PlayerDetail {
        let state = self.personastate.unwrap_or(0);
        PlayerDetail {
            steamid: self.steamid,
            personaname: self.personaname,
            profileurl: self.profileurl,
            avatar: self.avatar,
            avatarmedium: self.avatarmedium,
            avatarfull: self.avatarfull,
            personastate: state,
            personastate_desc: persona_state_label(state).to_string(),
            communityvisibilitystate: self.communityvisibilitystate,
            profilestate: self.profilestate,
            lastlogoff: self.lastlogoff,
            commentpermission: self.commentpermission,
            realname: self.realname,
            primaryclanid: self.primaryclanid,
            timecreated: self.timecreated,
            gameid: self.gameid,
            gameserverip: self.gameserverip,
            gameextrainfo: self.gameextrainfo,
            loccountrycode: self.loccountrycode,
            locstatecode: self.locstatecode,
            loccityid: self.loccityid,
        }
    }
}

/// GetPlayerSummaries for a comma-separated ID list. An empty list is not an error here.
pub(crate) fn fetch_players(
    transport: &dyn HttpTransport,
    endpoints: &SteamEndpoints,
    api_key: &str,
    steamids: &str,
) -> Result<Vec<SteamPlayer>, UpstreamError> {
    let request = UpstreamRequest::get(endpoints.api_url(API_PLAYER_SUMMARIES))
        .param("key", api_key)
        .param("steamids", steamids);

    let envelope: SummariesEnvelope = fetch(transport, &request, StatusPolicy::Generic)?;
    expect_key(expect_key(envelope.response)?.players)
}

pub(super) fn profile_summary(
    ctx: &ToolContext<'_>,
    params: &ToolParameters,
) -> Result<ToolMessage, ToolError> {
    let api_key = ctx.api_key()?;
    let steam_id = params.required("steam_id", STEAM_ID_EMPTY)?;

    let players = fetch_players(ctx.transport, ctx.endpoints, api_key, &steam_id)
        .map_err(|e| ToolError::upstream("get player profile", e))?;

    let Some(player) = players.into_iter().next() else {
        return Ok(ToolMessage::text(format!("No Steam user found with ID: {}", steam_id)));
    };

    Ok(ToolMessage::json(&ResultRecord::ok(PlayerSummary {
        player: player.into_profile(),
    }))?)
}

pub(super) fn player_details(
    ctx: &ToolContext<'_>,
    params: &ToolParameters,
) -> Result<ToolMessage, ToolError> {
    let api_key = ctx.api_key()?;
    let steamids = params.required("steamids", STEAM_ID_EMPTY)?;
    if steamids.split(',').count() > MAX_STEAM_IDS {
        return Err(ToolError::InvalidParameter(format!(
            "You can query a maximum of {} Steam IDs at once.",
            MAX_STEAM_IDS
        )));
    }

    let players = fetch_players(ctx.transport, ctx.endpoints, api_key, &steamids)
        .map_err(|e| ToolError::upstream("get player profiles", e))?;

    if players.is_empty() {
        return Ok(ToolMessage::text(format!(
            "No Steam users found with the specified IDs: {}",
            steamids
        )));
    }

    let players: Vec<PlayerDetail> = players.into_iter().map(SteamPlayer::into_detail).collect();
    Ok(ToolMessage::json(&ResultRecord::ok(PlayerDetails {
        player_count: players.len(),
        players,
    }))?)
}
