//! Gateway event payloads
//!
//! Typed forms of the dispatches that feed a member's raw store. Each one
//! converts into the raw patch the merge operations take.

use guild_core::{Activity, ClientStatus, DomainResult, RawAttributes, Snowflake, UserStatus};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User object as carried by dispatches: the id, plus whatever else was sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialUser {
    pub id: Snowflake,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl PartialUser {
    pub fn new(id: Snowflake) -> Self {
        Self {
            id,
            fields: Map::new(),
        }
    }
}

/// PRESENCE_UPDATE dispatch
///
/// `roles`, `nick` and `premium_since` are optional on presence pushes; when
/// absent they leave the stored values alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceUpdateEvent {
    pub user: PartialUser,
    pub guild_id: Snowflake,
    #[serde(default)]
    pub status: UserStatus,
    /// `null` when the user is not playing anything
    #[serde(default)]
    pub game: Option<Activity>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub client_status: ClientStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Snowflake>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_since: Option<String>,
}

impl PresenceUpdateEvent {
    pub fn new(user_id: Snowflake, guild_id: Snowflake, status: UserStatus) -> Self {
        Self {
            user: PartialUser::new(user_id),
            guild_id,
            status,
            game: None,
            activities: Vec::new(),
            client_status: ClientStatus::default(),
            roles: None,
            nick: None,
            premium_since: None,
        }
    }

    /// Set the current game, mirrored as the first activity
    #[must_use]
    pub fn with_game(mut self, game: Activity) -> Self {
        self.activities.insert(0, game.clone());
        self.game = Some(game);
        self
    }

    /// Raw patch for `Member::update_from_presence`
    pub fn into_raw(self) -> DomainResult<RawAttributes> {
        RawAttributes::from_value(serde_json::to_value(self)?)
    }
}

/// GUILD_MEMBER_UPDATE dispatch
///
/// Carries the member's full mutable state, so a `null` nick or boost clears
/// the stored one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberUpdateEvent {
    pub guild_id: Snowflake,
    pub user: PartialUser,
    pub roles: Vec<Snowflake>,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub premium_since: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deaf: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mute: Option<bool>,
}

impl MemberUpdateEvent {
    /// Raw patch for `Member::apply_update`
    pub fn into_raw(self) -> DomainResult<RawAttributes> {
        RawAttributes::from_value(serde_json::to_value(self)?)
    }
}
