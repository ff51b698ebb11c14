//! Computed member fields
//!
//! Every derived field is a pure function of the raw store and the
//! relationship resolver. Nothing here is cached: each read re-derives from
//! the current raw state and the current contents of the repositories.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use guild_core::{
    Activity, DomainError, DomainResult, Guild, RawAttributes, RoleRef, Snowflake, User,
};
use serde_json::{json, Value};

use crate::relations::Relations;

/// A derivation from `(raw store, relationship resolver)` to a raw value
pub type Derivation = fn(&RawAttributes, &Relations) -> DomainResult<Value>;

/// Field name to derivation, the lookup table behind `Member::computed`
pub static COMPUTED_FIELDS: &[(&str, Derivation)] = &[
    ("id", |raw, _| Ok(member_id(raw).to_value())),
    ("username", |raw, rel| Ok(json!(user(raw, rel).username))),
    ("discriminator", |raw, rel| Ok(json!(user(raw, rel).discriminator))),
    ("user", |raw, rel| Ok(user_value(&user(raw, rel)))),
    ("guild", |raw, rel| {
        Ok(guild(raw, rel).map_or(Value::Null, |g| guild_value(&g)))
    }),
    ("roles", |raw, rel| {
        Ok(Value::Array(roles(raw, rel).iter().map(role_value).collect()))
    }),
    ("game", |raw, _| Ok(game(raw)?.to_value())),
    ("activities", |raw, _| {
        Ok(Value::Array(
            activities(raw)?.iter().map(Activity::to_value).collect(),
        ))
    }),
    ("joined_at", |raw, _| {
        Ok(joined_at(raw)?.map_or(Value::Null, |t| json!(t.to_rfc3339())))
    }),
    ("premium_since", |raw, _| Ok(premium_since(raw)?.to_value())),
];

/// Find the derivation for a field name
pub fn derivation(name: &str) -> Option<Derivation> {
    COMPUTED_FIELDS
        .iter()
        .find(|(field, _)| *field == name)
        .map(|(_, derive)| *derive)
}

/// Boost state. `Never` means the member has never boosted, not that the
/// state is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PremiumSince {
    Never,
    Since(DateTime<Utc>),
}

impl PremiumSince {
    #[inline]
    pub fn is_boosting(&self) -> bool {
        matches!(self, Self::Since(_))
    }

    pub fn since(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Never => None,
            Self::Since(at) => Some(*at),
        }
    }

    /// `false` for never, otherwise the RFC 3339 timestamp
    pub fn to_value(&self) -> Value {
        match self {
            Self::Never => Value::Bool(false),
            Self::Since(at) => json!(at.to_rfc3339()),
        }
    }
}

// =========================================================================
// Typed derivations
// =========================================================================

/// `user.id`. Every write to the store is checked to keep it present.
pub(crate) fn member_id(raw: &RawAttributes) -> Snowflake {
    raw.get("user")
        .and_then(|user| user.get("id"))
        .and_then(Snowflake::from_value)
        .unwrap_or_default()
}

pub(crate) fn guild_id(raw: &RawAttributes) -> Snowflake {
    raw.snowflake("guild_id").unwrap_or_default()
}

pub(crate) fn user(raw: &RawAttributes, relations: &Relations) -> Arc<User> {
    relations.user(member_id(raw), raw.get_present("user"))
}

pub(crate) fn guild(raw: &RawAttributes, relations: &Relations) -> Option<Arc<Guild>> {
    relations.guild(guild_id(raw))
}

/// Stored role ids, in stored order. Checked on every write.
pub(crate) fn role_ids(raw: &RawAttributes) -> Vec<Snowflake> {
    raw.snowflakes("roles").unwrap_or_default()
}

pub(crate) fn roles(raw: &RawAttributes, relations: &Relations) -> Vec<RoleRef> {
    relations.roles(guild_id(raw), &role_ids(raw))
}

pub(crate) fn game(raw: &RawAttributes) -> DomainResult<Activity> {
    Activity::read(raw, "game")
}

pub(crate) fn activities(raw: &RawAttributes) -> DomainResult<Vec<Activity>> {
    Activity::read_all(raw, "activities")
}

pub(crate) fn joined_at(raw: &RawAttributes) -> DomainResult<Option<DateTime<Utc>>> {
    raw.timestamp("joined_at")
}

pub(crate) fn premium_since(raw: &RawAttributes) -> DomainResult<PremiumSince> {
    Ok(raw
        .timestamp("premium_since")?
        .map_or(PremiumSince::Never, PremiumSince::Since))
}

// =========================================================================
// Raw forms
// =========================================================================

fn user_value(user: &User) -> Value {
    json!({
        "id": user.id,
        "username": user.username,
        "discriminator": user.discriminator,
        "global_name": user.global_name,
        "avatar": user.avatar,
        "bot": user.bot,
    })
}

fn guild_value(guild: &Guild) -> Value {
    json!({
        "id": guild.id,
        "name": guild.name,
        "owner_id": guild.owner_id,
    })
}

fn role_value(role: &RoleRef) -> Value {
    match role {
        RoleRef::Resolved(role) => json!({
            "id": role.id,
            "name": role.name,
            "color": role.color,
            "position": role.position,
            "permissions": role.permissions,
        }),
        RoleRef::Unresolved(id) => json!({ "id": id }),
    }
}

/// Check a raw member payload before it reaches the store.
///
/// With `identity` unset the payload must carry `user.id` and `guild_id`
/// (construction). With `identity` set, any `user.id`/`guild_id` the patch
/// carries must match it.
pub(crate) fn validate(
    patch: &RawAttributes,
    identity: Option<(Snowflake, Snowflake)>,
) -> DomainResult<()> {
    match patch.get("user") {
        Some(Value::Object(user)) => {
            let id = user
                .get("id")
                .and_then(Snowflake::from_value)
                .ok_or(DomainError::MissingField("user.id"))?;
            if let Some((member_id, _)) = identity {
                if id != member_id {
                    return Err(DomainError::invalid(
                        "user.id",
                        format!("expected {member_id}, got {id}"),
                    ));
                }
            }
        }
        Some(other) => {
            return Err(DomainError::invalid(
                "user",
                format!("expected an object, got {other}"),
            ))
        }
        None if identity.is_none() => return Err(DomainError::MissingField("user")),
        None => {}
    }

    match patch.get("guild_id") {
        Some(value) => {
            let id = Snowflake::from_value(value)
                .ok_or_else(|| DomainError::invalid("guild_id", format!("bad snowflake {value}")))?;
            if let Some((_, guild_id)) = identity {
                if id != guild_id {
                    return Err(DomainError::invalid(
                        "guild_id",
                        format!("expected {guild_id}, got {id}"),
                    ));
                }
            }
        }
        None if identity.is_none() => return Err(DomainError::MissingField("guild_id")),
        None => {}
    }

    patch.snowflakes("roles")?;
    patch.timestamp("joined_at")?;
    patch.timestamp("premium_since")?;
    game(patch)?;
    activities(patch)?;
    Ok(())
}
