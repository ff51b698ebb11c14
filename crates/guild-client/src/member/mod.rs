//! Guild member overlay
//!
//! A `Member` keeps the last-known raw payload for one guild member and
//! derives everything else from it on demand. Relationships to the user and
//! guild are ids resolved through the context's repositories, never owned.

mod fields;
mod mutations;
mod presence;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use guild_core::{
    Activity, ClientStatus, DomainError, DomainResult, Guild, Origin, RawAttributes, RoleRef,
    Snowflake, User, UserStatus,
};
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use serde_json::{json, Value};

use crate::context::ClientContext;

pub use fields::{derivation, Derivation, PremiumSince, COMPUTED_FIELDS};

/// A guild member: raw store plus computed overlay
pub struct Member {
    raw: RwLock<RawAttributes>,
    origin: Origin,
    ctx: Arc<ClientContext>,
}

impl Member {
    /// Build a member from a raw payload.
    ///
    /// The payload must carry `user.id` and `guild_id`; `joined_at` and
    /// `premium_since`, when present, must be valid timestamps.
    pub fn from_raw(
        ctx: Arc<ClientContext>,
        raw: RawAttributes,
        origin: Origin,
    ) -> DomainResult<Self> {
        fields::validate(&raw, None)?;
        Ok(Self {
            raw: RwLock::new(raw),
            origin,
            ctx,
        })
    }

    /// Build a member from a JSON value received from the network
    pub fn from_value(ctx: Arc<ClientContext>, value: Value) -> DomainResult<Self> {
        Self::from_raw(ctx, RawAttributes::from_value(value)?, Origin::Network)
    }

    #[inline]
    pub fn is_from_network(&self) -> bool {
        self.origin.is_network()
    }

    /// Copy of the raw store
    pub fn raw(&self) -> RawAttributes {
        self.raw.read().clone()
    }

    pub fn context(&self) -> &Arc<ClientContext> {
        &self.ctx
    }

    // =========================================================================
    // Computed fields
    // =========================================================================

    /// The member's id, which is its user's id
    pub fn id(&self) -> Snowflake {
        fields::member_id(&self.raw.read())
    }

    pub fn guild_id(&self) -> Snowflake {
        fields::guild_id(&self.raw.read())
    }

    /// The cached user, or a transient one built from the embedded payload.
    /// Never fails: an id-only payload yields `User::stand_in`.
    pub fn user(&self) -> Arc<User> {
        fields::user(&self.raw.read(), self.ctx.relations())
    }

    pub fn username(&self) -> String {
        self.user().username.clone()
    }

    pub fn discriminator(&self) -> String {
        self.user().discriminator.clone()
    }

    /// The owning guild, if cached
    pub fn guild(&self) -> Option<Arc<Guild>> {
        fields::guild(&self.raw.read(), self.ctx.relations())
    }

    /// Roles in the guild's order, or unresolved stand-ins in stored order
    /// when the guild is not cached
    pub fn roles(&self) -> Vec<RoleRef> {
        fields::roles(&self.raw.read(), self.ctx.relations())
    }

    pub fn role_ids(&self) -> Vec<Snowflake> {
        fields::role_ids(&self.raw.read())
    }

    pub fn has_role(&self, role: impl Into<Snowflake>) -> bool {
        self.role_ids().contains(&role.into())
    }

    /// Current game; the empty activity when none is stored
    pub fn game(&self) -> DomainResult<Activity> {
        self.materialize_default("game", || Activity::default().to_value());
        fields::game(&self.raw.read())
    }

    pub fn activities(&self) -> DomainResult<Vec<Activity>> {
        self.materialize_default("activities", || json!([]));
        fields::activities(&self.raw.read())
    }

    /// `None` only for members built from a partial payload
    pub fn joined_at(&self) -> DomainResult<Option<DateTime<Utc>>> {
        fields::joined_at(&self.raw.read())
    }

    pub fn premium_since(&self) -> DomainResult<PremiumSince> {
        fields::premium_since(&self.raw.read())
    }

    /// Look up a computed field by name
    pub fn computed(&self, name: &str) -> DomainResult<Value> {
        let derive =
            fields::derivation(name).ok_or_else(|| DomainError::UnknownField(name.to_string()))?;
        match name {
            "game" => self.materialize_default("game", || Activity::default().to_value()),
            "activities" => self.materialize_default("activities", || json!([])),
            _ => {}
        }
        derive(&self.raw.read(), self.ctx.relations())
    }

    // =========================================================================
    // Plain reads
    // =========================================================================

    pub fn nick(&self) -> Option<String> {
        self.raw.read().str("nick").map(String::from)
    }

    /// Nickname if set, otherwise the username
    pub fn display_name(&self) -> String {
        self.nick().unwrap_or_else(|| self.username())
    }

    pub fn mention(&self) -> String {
        if self.nick().is_some() {
            format!("<@!{}>", self.id())
        } else {
            format!("<@{}>", self.id())
        }
    }

    pub fn deaf(&self) -> bool {
        self.raw.read().bool("deaf").unwrap_or(false)
    }

    pub fn mute(&self) -> bool {
        self.raw.read().bool("mute").unwrap_or(false)
    }

    pub fn status(&self) -> UserStatus {
        guild_core::entities::read_status(&self.raw.read())
    }

    pub fn client_status(&self) -> ClientStatus {
        ClientStatus::read(&self.raw.read())
    }

    /// The fields this member contributes to a save: `{ "roles": [...] }`
    pub fn update_payload(&self) -> Value {
        let roles: Vec<Value> = self.role_ids().into_iter().map(Snowflake::to_value).collect();
        json!({ "roles": roles })
    }

    fn materialize_default(&self, field: &str, default: impl FnOnce() -> Value) {
        if !self.ctx.materialize_activity_defaults() {
            return;
        }
        let raw = self.raw.upgradable_read();
        if raw.contains_key(field) {
            return;
        }
        RwLockUpgradableReadGuard::upgrade(raw).insert(field, default());
    }

    fn identity(&self) -> (Snowflake, Snowflake) {
        let raw = self.raw.read();
        (fields::member_id(&raw), fields::guild_id(&raw))
    }
}

impl std::fmt::Debug for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Member")
            .field("raw", &*self.raw.read())
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}
