//! Test fixtures and data generators
//!
//! Provides reusable payloads for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use guild_core::{Guild, Role, Snowflake};
use serde_json::{json, Value};

/// Counter for unique test ids
static COUNTER: AtomicU64 = AtomicU64::new(1_000);

/// Get a unique id for test data
pub fn unique_id() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Guild every fixture member belongs to
pub const GUILD_ID: u64 = 10;

/// Member payload as received during a guild sync
pub fn member_payload(user_id: u64, roles: &[u64]) -> Value {
    json!({
        "user": {
            "id": user_id.to_string(),
            "username": format!("member{user_id}"),
            "discriminator": "0420",
            "avatar": null
        },
        "guild_id": GUILD_ID.to_string(),
        "roles": roles.iter().map(u64::to_string).collect::<Vec<_>>(),
        "nick": null,
        "deaf": false,
        "mute": false,
        "joined_at": "2015-04-26T06:26:56.936000+00:00",
        "status": "online",
        "game": {"name": "tetris", "type": 0},
        "activities": [{"name": "tetris", "type": 0}],
        "client_status": {"desktop": "online"}
    })
}

/// Guild with roles named after their ids, in the given canonical order
pub fn guild_with_roles(role_order: &[u64]) -> Guild {
    let mut guild = Guild::new(Snowflake::new(GUILD_ID), "Fixture Guild", Snowflake::new(1));
    guild.roles = role_order
        .iter()
        .enumerate()
        .map(|(position, id)| {
            let mut role = Role::new(Snowflake::new(*id), format!("role{id}"));
            role.position = position as i64;
            role
        })
        .collect();
    guild
}

/// Presence push for a fixture member
pub fn presence_payload(user_id: u64, status: &str, game: Option<&str>) -> Value {
    let game = game.map(|name| json!({"name": name, "type": 0}));
    let activities: Vec<Value> = game.iter().cloned().collect();
    json!({
        "user": {"id": user_id.to_string()},
        "guild_id": GUILD_ID.to_string(),
        "status": status,
        "game": game,
        "activities": activities,
        "client_status": {"mobile": status}
    })
}
