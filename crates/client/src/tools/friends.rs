//! Friend list of a public profile

use serde::Deserialize;
use steamtools_core::constants::{DEFAULT_RELATIONSHIP, RELATIONSHIPS};
use steamtools_core::format::format_timestamp;
use steamtools_core::{
    Friend, FriendList, ResultRecord, ToolError, ToolMessage, ToolParameters, UpstreamError,
};

use super::{ToolContext, STEAM_ID_EMPTY};
use crate::steam_api::{fetch, StatusPolicy, API_FRIEND_LIST};
use crate::transport::UpstreamRequest;

const NOT_FOUND: &str = "No data found. The user might not exist or the profile is not public.";

#[derive(Debug, Deserialize)]
struct FriendListEnvelope {
    friendslist: Option<FriendListBody>,
}

#[derive(Debug, Deserialize)]
struct FriendListBody {
    friends: Option<Vec<SteamFriend>>,
}

#[derive(Debug, Deserialize)]
struct SteamFriend {
    steamid: Option<String>,
    relationship: Option<String>,
    friend_since: Option<i64>,
}

pub(super) fn friend_list(
    ctx: &ToolContext<'_>,
    params: &ToolParameters,
) -> Result<ToolMessage, ToolError> {
    let api_key = ctx.api_key()?;
    let steamid = params.required("steamid", STEAM_ID_EMPTY)?;
    let relationship = params
        .get("relationship")
        .unwrap_or_else(|| DEFAULT_RELATIONSHIP.to_string());
    if !RELATIONSHIPS.contains(&relationship.as_str()) {
        return Err(ToolError::InvalidParameter(
            "The relationship parameter must be 'all' or 'friend'.".to_string(),
        ));
    }

    let request = UpstreamRequest::get(ctx.endpoints.api_url(API_FRIEND_LIST))
        .param("key", api_key)
        .param("steamid", &steamid)
        .param("relationship", &relationship);

    let friends = fetch_friends(ctx, &request).map_err(|e| ToolError::upstream("get friend list", e))?;
    if friends.is_empty() {
        return Ok(ToolMessage::text(format!(
            "Steam ID {} has no friends or the profile is not public",
            steamid
        )));
    }

    let mut record = FriendList {
        steamid,
        relationship_filter: relationship,
        friend_count: friends.len(),
        friends: friends
            .into_iter()
            .map(|f| {
                let since = f.friend_since.unwrap_or(0);
                Friend {
                    steamid: f.steamid,
                    relationship: f.relationship,
                    friend_since_timestamp: since,
                    friend_since_date: format_timestamp(since),
                }
            })
            .collect(),
    };
    record.sort_by_friend_since();

    Ok(ToolMessage::json(&ResultRecord::ok(record))?)
}

fn fetch_friends(
    ctx: &ToolContext<'_>,
    request: &UpstreamRequest,
) -> Result<Vec<SteamFriend>, UpstreamError> {
    let envelope: FriendListEnvelope = fetch(
        ctx.transport,
        request,
        StatusPolicy::Categorized { not_found: NOT_FOUND },
    )?;

    envelope
        .friendslist
        .and_then(|body| body.friends)
        .ok_or_else(|| {
            UpstreamError::Format("Invalid API response format or the user has no friends".to_string())
        })
}
