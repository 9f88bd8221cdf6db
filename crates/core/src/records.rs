//! Result records returned to the host runtime
//!
//! Optional fields are only serialized when upstream supplied them.

use serde::Serialize;
use std::cmp::Ordering;

/// Envelope shared by every record: `{success, message?, ...fields}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: Option<T>,
}

impl<T> ResultRecord<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

// ============================================================================
// Profiles
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub player: PlayerProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steamid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personaname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profileurl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatarmedium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatarfull: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personastate: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastlogoff: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timecreated: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communityvisibilitystate: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerDetails {
    pub player_count: usize,
    pub players: Vec<PlayerDetail>,
}

/// Public profile data plus whatever private data the key can see
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steamid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personaname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profileurl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatarmedium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatarfull: Option<String>,
    pub personastate: i64,
    pub personastate_desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communityvisibilitystate: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profilestate: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastlogoff: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentpermission: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primaryclanid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timecreated: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gameid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gameserverip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gameextrainfo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loccountrycode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locstatecode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loccityid: Option<i64>,
}

// ============================================================================
// Friends
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FriendList {
    pub steamid: String,
    pub relationship_filter: String,
    pub friend_count: usize,
    pub friends: Vec<Friend>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Friend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steamid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    pub friend_since_timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friend_since_date: Option<String>,
}

impl FriendList {
    /// Newest friendships first
    pub fn sort_by_friend_since(&mut self) {
        self.friends
            .sort_by(|a, b| b.friend_since_timestamp.cmp(&a.friend_since_timestamp));
    }
}

// ============================================================================
// Games
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnedGames {
    pub steamid: String,
    pub game_count: u64,
    pub games: Vec<OwnedGame>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OwnedGame {
    pub appid: u64,
    pub playtime_forever: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playtime_2weeks: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_community_visible_stats: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_url: Option<String>,
    pub playtime_readable: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playtime_2weeks_readable: Option<String>,
}

impl OwnedGames {
    /// Most played (lifetime) first
    pub fn sort_by_playtime(&mut self) {
        self.games
            .sort_by(|a, b| b.playtime_forever.cmp(&a.playtime_forever));
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentlyPlayed {
    pub steamid: String,
    pub total_count: u64,
    pub games: Vec<RecentGame>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecentGame {
    pub appid: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub playtime_2weeks: u64,
    pub playtime_forever: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub playtime_2weeks_readable: String,
    pub playtime_forever_readable: String,
}

impl RecentlyPlayed {
    /// Most played in the last two weeks first
    pub fn sort_by_recent_playtime(&mut self) {
        self.games
            .sort_by(|a, b| b.playtime_2weeks.cmp(&a.playtime_2weeks));
    }
}

// ============================================================================
// Achievements and stats
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRef {
    pub appid: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalAchievements {
    pub gameid: String,
    pub achievement_count: usize,
    pub achievements: Vec<AchievementPercent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementPercent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
}

impl GlobalAchievements {
    /// Highest completion rate first; a missing rate sorts as zero
    pub fn sort_by_percent(&mut self) {
        self.achievements.sort_by(|a, b| {
            let a = a.percent.unwrap_or(0.0);
            let b = b.percent.unwrap_or(0.0);
            b.partial_cmp(&a).unwrap_or(Ordering::Equal)
        });
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerAchievements {
    pub steamid: String,
    pub game: GameRef,
    pub achievement_count: usize,
    pub completed_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_percentage: Option<f64>,
    pub achievements: Vec<PlayerAchievement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerAchievement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apiname: Option<String>,
    pub achieved: bool,
    /// Only set for unlocked achievements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocktime_timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocktime_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PlayerAchievements {
    /// Unlocked first, most recent unlock first among those
    pub fn sort_by_unlock(&mut self) {
        self.achievements.sort_by(|a, b| {
            b.achieved.cmp(&a.achieved).then_with(|| {
                b.unlocktime_timestamp
                    .unwrap_or(0)
                    .cmp(&a.unlocktime_timestamp.unwrap_or(0))
            })
        });
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub steamid: String,
    pub game: GameRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<Vec<StatValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievement_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Vec<StatAchievement>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Number>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatAchievement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub achieved: bool,
}

// ============================================================================
// News
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct News {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appid: Option<u64>,
    pub news_count: usize,
    pub newsitems: Vec<NewsItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewsItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedlabel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_name: Option<String>,
}
