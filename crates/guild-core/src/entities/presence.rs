//! Presence - online status and activities, and snapshots of them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Activity;
use crate::error::DomainResult;
use crate::raw::RawAttributes;
use crate::traits::{FromRaw, Origin};
use crate::value_objects::Snowflake;

/// User online status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// User is online and active
    Online,
    /// User is idle (away from keyboard)
    Idle,
    /// Do not disturb
    Dnd,
    /// User is offline (or invisible)
    #[default]
    Offline,
}

impl UserStatus {
    /// Check if this status should be visible to others
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Offline)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Idle => "idle",
            Self::Dnd => "dnd",
            Self::Offline => "offline",
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "idle" => Ok(Self::Idle),
            "dnd" => Ok(Self::Dnd),
            // invisible users are reported as offline
            "offline" | "invisible" => Ok(Self::Offline),
            _ => Err(format!("Invalid status: {s}")),
        }
    }
}

/// Per-platform status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desktop: Option<UserStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<UserStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<UserStatus>,
}

impl ClientStatus {
    /// Read the client status stored under `client_status`; malformed reads as empty
    pub fn read(raw: &RawAttributes) -> Self {
        raw.get_present("client_status")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }
}

/// Read the status stored under `status`; absent or unknown reads as offline
pub fn read_status(raw: &RawAttributes) -> UserStatus {
    raw.str("status")
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

/// Presence-shaped view over a private copy of a member's raw attributes.
///
/// Owns its store, so later writes to the member it was taken from are never
/// visible through it.
#[derive(Debug, Clone, PartialEq)]
pub struct Presence {
    raw: RawAttributes,
    origin: Origin,
}

impl Presence {
    /// Fields a presence push carries
    pub const FIELDS: &'static [&'static str] = &[
        "user",
        "guild_id",
        "status",
        "game",
        "activities",
        "client_status",
        "roles",
        "nick",
        "premium_since",
    ];

    pub fn raw(&self) -> &RawAttributes {
        &self.raw
    }

    #[inline]
    pub fn is_from_network(&self) -> bool {
        self.origin.is_network()
    }

    pub fn user_id(&self) -> Option<Snowflake> {
        self.raw.object("user").and_then(|u| u.snowflake("id"))
    }

    pub fn guild_id(&self) -> Option<Snowflake> {
        self.raw.snowflake("guild_id")
    }

    pub fn status(&self) -> UserStatus {
        read_status(&self.raw)
    }

    pub fn client_status(&self) -> ClientStatus {
        ClientStatus::read(&self.raw)
    }

    pub fn game(&self) -> DomainResult<Activity> {
        Activity::read(&self.raw, "game")
    }

    pub fn activities(&self) -> DomainResult<Vec<Activity>> {
        Activity::read_all(&self.raw, "activities")
    }

    pub fn nick(&self) -> Option<&str> {
        self.raw.str("nick")
    }

    pub fn role_ids(&self) -> DomainResult<Vec<Snowflake>> {
        self.raw.snowflakes("roles")
    }

    pub fn premium_since(&self) -> DomainResult<Option<DateTime<Utc>>> {
        self.raw.timestamp("premium_since")
    }
}

impl FromRaw for Presence {
    const KIND: &'static str = "presence";

    fn from_raw(raw: &RawAttributes, origin: Origin) -> DomainResult<Self> {
        Ok(Self {
            raw: raw.clone(),
            origin,
        })
    }
}
