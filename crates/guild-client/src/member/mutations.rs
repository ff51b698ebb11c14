//! Member mutations
//!
//! Confirmed mutations go through the transport and touch the raw store only
//! after the service acknowledges them; a failure leaves the member exactly as
//! it was. Speculative mutations (`add_role`, `remove_role`) change the raw
//! store immediately and never talk to the network; `save` persists them.

use guild_core::{Ban, RawAttributes, Snowflake};
use serde_json::{json, Map, Value};
use tracing::{info, instrument, warn};

use super::{fields, Member};
use crate::error::{ClientError, ClientResult};
use crate::rest::Route;

impl Member {
    // =========================================================================
    // Confirmed
    // =========================================================================

    /// Ban this member from its guild.
    ///
    /// `delete_message_days` is forwarded as `delete-message-days` when given.
    /// The returned ban references the user and guild as they are when the
    /// service answers.
    #[instrument(skip(self), fields(guild_id = %self.guild_id(), member_id = %self.id()))]
    pub async fn ban(&self, delete_message_days: Option<u32>) -> ClientResult<Ban> {
        let (member_id, guild_id) = self.identity();

        let mut body = Map::new();
        if let Some(days) = delete_message_days {
            body.insert("delete-message-days".to_string(), json!(days));
        }

        self.confirm(Route::create_ban(guild_id, member_id), Some(Value::Object(body)))
            .await?;

        let ban = Ban::new(guild_id, self.guild(), self.user());
        info!("Member banned");
        Ok(ban)
    }

    /// Route for a nickname change: the self endpoint when this member is the
    /// acting identity, the member endpoint otherwise
    pub fn nickname_route(&self) -> Route {
        let (member_id, guild_id) = self.identity();
        if member_id == self.ctx.self_id() {
            Route::modify_own_nick(guild_id)
        } else {
            Route::modify_member(guild_id, member_id)
        }
    }

    /// Set or clear (`None` or empty) this member's nickname.
    ///
    /// On success the acknowledged nick is written to the raw store. Two calls
    /// in flight at once leave whichever answered last.
    #[instrument(skip(self), fields(guild_id = %self.guild_id(), member_id = %self.id()))]
    pub async fn set_nickname(&self, nick: Option<&str>) -> ClientResult<()> {
        let nick = nick.unwrap_or_default();
        let response = self
            .confirm(self.nickname_route(), Some(json!({ "nick": nick })))
            .await?;

        let acknowledged = match response.get("nick") {
            Some(Value::String(s)) if !s.is_empty() => Value::String(s.clone()),
            Some(_) => Value::Null,
            None if nick.is_empty() => Value::Null,
            None => Value::String(nick.to_string()),
        };
        self.raw.write().insert("nick", acknowledged);

        info!("Nickname updated");
        Ok(())
    }

    /// Move this member to a voice channel.
    ///
    /// Success means the request was accepted, not that the member is now in
    /// that channel.
    #[instrument(skip(self, channel), fields(guild_id = %self.guild_id(), member_id = %self.id()))]
    pub async fn move_member(&self, channel: impl Into<Snowflake>) -> ClientResult<()> {
        let channel_id = channel.into();
        let (member_id, guild_id) = self.identity();

        self.confirm(
            Route::modify_member(guild_id, member_id),
            Some(json!({ "channel_id": channel_id })),
        )
        .await?;

        info!(channel_id = %channel_id, "Member move accepted");
        Ok(())
    }

    /// Persist the stored role list.
    ///
    /// If the service answers with a `roles` list, it is written back.
    #[instrument(skip(self), fields(guild_id = %self.guild_id(), member_id = %self.id()))]
    pub async fn save(&self) -> ClientResult<()> {
        let (member_id, guild_id) = self.identity();
        let response = self
            .confirm(
                Route::modify_member(guild_id, member_id),
                Some(self.update_payload()),
            )
            .await?;

        if let Some(roles) = response.get("roles") {
            let mut patch = RawAttributes::new();
            patch.insert("roles", roles.clone());
            self.apply_update(patch)?;
        }

        info!("Member saved");
        Ok(())
    }

    /// Remove this member from its guild
    #[instrument(skip(self), fields(guild_id = %self.guild_id(), member_id = %self.id()))]
    pub async fn kick(&self) -> ClientResult<()> {
        let (member_id, guild_id) = self.identity();
        self.confirm(Route::remove_member(guild_id, member_id), None)
            .await?;

        info!("Member kicked");
        Ok(())
    }

    async fn confirm(&self, route: Route, body: Option<Value>) -> ClientResult<Value> {
        self.ctx
            .transport()
            .request(&route, body)
            .await
            .map_err(|err| {
                warn!(route = %route, error = %err, "Remote rejected member mutation");
                ClientError::Transport(err)
            })
    }

    // =========================================================================
    // Speculative
    // =========================================================================

    /// Append a role id. Returns `false`, changing nothing, if it is already
    /// held.
    ///
    /// Local only; call [`Member::save`] to persist.
    pub fn add_role(&self, role: impl Into<Snowflake>) -> bool {
        let id = role.into();
        let mut raw = self.raw.write();
        let mut ids = fields::role_ids(&raw);
        if ids.contains(&id) {
            return false;
        }
        ids.push(id);
        write_role_ids(&mut raw, &ids);
        true
    }

    /// Remove the first occurrence of a role id. Returns `false`, changing
    /// nothing, if it is not held.
    ///
    /// Local only; call [`Member::save`] to persist.
    pub fn remove_role(&self, role: impl Into<Snowflake>) -> bool {
        let id = role.into();
        let mut raw = self.raw.write();
        let mut ids = fields::role_ids(&raw);
        let Some(pos) = ids.iter().position(|r| *r == id) else {
            return false;
        };
        ids.remove(pos);
        write_role_ids(&mut raw, &ids);
        true
    }
}

fn write_role_ids(raw: &mut RawAttributes, ids: &[Snowflake]) {
    raw.insert(
        "roles",
        Value::Array(ids.iter().copied().map(Snowflake::to_value).collect()),
    );
}
