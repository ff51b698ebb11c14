//! Member overlay integration tests
//!
//! Run with: cargo test -p integration-tests --test member_tests

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use guild_client::{ClientError, Member, PremiumSince, TransportError};
use guild_core::{Presence, RawAttributes, RoleRef, Snowflake, User, UserStatus};
use integration_tests::{fixtures::*, TestGuild};
use serde_json::{json, Value};

fn raw(value: Value) -> RawAttributes {
    RawAttributes::from_value(value).unwrap()
}

// ============================================================================
// Speculative mutations
// ============================================================================

#[test]
fn test_add_role_grows_by_one_then_refuses() {
    let guild = TestGuild::new(1);
    let member = guild.member(unique_id(), &[2, 1]).unwrap();

    for id in 100..120_u64 {
        let before = member.role_ids();
        assert!(member.add_role(Snowflake::new(id)));
        assert_eq!(member.role_ids().len(), before.len() + 1);

        let after = member.role_ids();
        assert!(!member.add_role(Snowflake::new(id)));
        assert_eq!(member.role_ids(), after);
    }
    assert!(guild.transport.calls().is_empty());
}

#[test]
fn test_remove_role_removes_exactly_one() {
    let guild = TestGuild::new(1);
    let member = guild.member(unique_id(), &[5, 6, 7, 8]).unwrap();

    for id in [6_u64, 8, 5] {
        let before = member.role_ids().len();
        assert!(member.remove_role(Snowflake::new(id)));
        assert_eq!(member.role_ids().len(), before - 1);
        assert!(!member.has_role(Snowflake::new(id)));
    }

    let remaining = member.role_ids();
    assert!(!member.remove_role(Snowflake::new(42)));
    assert_eq!(member.role_ids(), remaining);
    assert_eq!(remaining, vec![Snowflake::new(7)]);
}

#[tokio::test]
async fn test_speculative_changes_from_many_tasks() {
    let guild = TestGuild::new(1);
    let member = Arc::new(guild.member(unique_id(), &[]).unwrap());

    let handles: Vec<_> = (1..=32_u64)
        .map(|id| {
            let member = Arc::clone(&member);
            tokio::spawn(async move { member.add_role(Snowflake::new(id)) })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap());
    }
    assert_eq!(member.role_ids().len(), 32);
}

#[tokio::test]
async fn test_save_persists_speculative_roles() {
    let guild = TestGuild::new(1);
    let member = guild.member(77, &[2]).unwrap();
    assert!(member.add_role(Snowflake::new(3)));

    member.save().await.unwrap();

    let call = guild.transport.last_call().unwrap();
    assert_eq!(call.route.to_string(), "PATCH guilds/10/members/77");
    assert_eq!(call.body, Some(json!({"roles": ["2", "3"]})));
}

#[tokio::test]
async fn test_failed_save_keeps_speculative_roles() {
    let guild = TestGuild::new(1);
    let member = guild.member(77, &[2]).unwrap();
    assert!(member.add_role(Snowflake::new(3)));
    guild.transport.fail(TransportError::status(403, "Missing Permissions"));

    assert!(member.save().await.is_err());
    // No rollback: the caller compensates
    assert!(member.has_role(Snowflake::new(3)));
    assert!(member.remove_role(Snowflake::new(3)));
}

// ============================================================================
// Presence merge
// ============================================================================

#[test]
fn test_presence_snapshot_then_merge() {
    let guild = TestGuild::new(1);
    let id = unique_id();
    let member = guild.member(id, &[2]).unwrap();

    let before = member.raw().project(Presence::FIELDS);
    let push = raw(presence_payload(id, "idle", Some("go")));

    let snapshot = member.update_from_presence(push.clone()).unwrap();
    assert_eq!(snapshot.raw(), &before);
    assert_eq!(snapshot.status(), UserStatus::Online);
    assert_eq!(snapshot.game().unwrap().name, "tetris");

    let after = member.raw();
    for key in push.keys().filter(|k| *k != "user") {
        assert_eq!(after.get(key), push.get(key), "field {key}");
    }
    assert_eq!(member.status(), UserStatus::Idle);
    assert_eq!(member.game().unwrap().name, "go");
}

#[test]
fn test_presence_snapshot_survives_later_writes() {
    let guild = TestGuild::new(1);
    let id = unique_id();
    let member = guild.member(id, &[2]).unwrap();

    let snapshot = member
        .update_from_presence(raw(presence_payload(id, "dnd", None)))
        .unwrap();
    member
        .update_from_presence(raw(presence_payload(id, "offline", Some("chess"))))
        .unwrap();
    member.add_role(Snowflake::new(9));

    assert_eq!(snapshot.status(), UserStatus::Online);
    assert_eq!(snapshot.game().unwrap().name, "tetris");
    assert_eq!(snapshot.role_ids().unwrap(), vec![Snowflake::new(2)]);
}

#[test]
fn test_presence_status_transition_diff() {
    let guild = TestGuild::new(1);
    let id = unique_id();
    let member = guild.member(id, &[]).unwrap();

    let old = member
        .update_from_presence(raw(presence_payload(id, "idle", None)))
        .unwrap();
    assert_ne!(old.status(), member.status());
    assert!(member.game().unwrap().is_empty());
    assert!(member.activities().unwrap().is_empty());
}

// ============================================================================
// Computed fields and relationships
// ============================================================================

#[test]
fn test_roles_unresolved_in_stored_order() {
    let guild = TestGuild::new(1);
    let member = guild.member(unique_id(), &[30, 10, 20]).unwrap();

    assert_eq!(
        member.roles(),
        vec![
            RoleRef::Unresolved(Snowflake::new(30)),
            RoleRef::Unresolved(Snowflake::new(10)),
            RoleRef::Unresolved(Snowflake::new(20)),
        ]
    );
}

#[test]
fn test_roles_resolved_in_guild_order() {
    let guild = TestGuild::new(1);
    guild.registry.insert_guild(guild_with_roles(&[20, 40, 10, 30]));
    let member = guild.member(unique_id(), &[30, 10, 20]).unwrap();

    let ids: Vec<u64> = member.roles().iter().map(|r| r.id().get()).collect();
    assert_eq!(ids, vec![20, 10, 30]);
    assert!(member.roles().iter().all(RoleRef::is_resolved));
}

#[test]
fn test_relationships_are_live() {
    let guild = TestGuild::new(1);
    let id = unique_id();
    let member = guild.member(id, &[10]).unwrap();

    assert!(member.guild().is_none());
    assert_eq!(member.username(), format!("member{id}"));

    guild.registry.insert_guild(guild_with_roles(&[10]));
    guild
        .registry
        .insert_user(User::new(Snowflake::new(id), "cached", "0001"));

    assert_eq!(member.guild().unwrap().name, "Fixture Guild");
    assert_eq!(member.username(), "cached");
    assert_eq!(member.roles()[0].name(), Some("role10"));

    guild.registry.remove_guild(Snowflake::new(GUILD_ID));
    assert!(!member.roles()[0].is_resolved());
}

#[test]
fn test_bad_joined_at_fails_construction() {
    let guild = TestGuild::new(1);
    let mut payload = member_payload(unique_id(), &[]);
    payload["joined_at"] = json!("last tuesday");

    let err = Member::from_value(Arc::clone(&guild.ctx), payload).unwrap_err();
    assert_eq!(err.code(), "INVALID_TIMESTAMP");
}

#[test]
fn test_boost_state_follows_updates() {
    let guild = TestGuild::new(1);
    let member = guild.member(unique_id(), &[]).unwrap();
    assert_eq!(member.premium_since().unwrap(), PremiumSince::Never);
    assert_eq!(member.computed("premium_since").unwrap(), json!(false));

    member
        .apply_update(raw(json!({"premium_since": "2019-01-01T00:00:00+00:00"})))
        .unwrap();
    assert_eq!(
        member.premium_since().unwrap(),
        PremiumSince::Since(Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(
        member.joined_at().unwrap(),
        Utc.timestamp_millis_opt(1_430_029_616_936).single()
    );
}

// ============================================================================
// Confirmed mutations
// ============================================================================

#[tokio::test]
async fn test_set_nickname_routes_self_and_other() {
    let guild = TestGuild::new(500);

    let me = guild.member(500, &[]).unwrap();
    me.set_nickname(Some("boss")).await.unwrap();
    let call = guild.transport.last_call().unwrap();
    assert_eq!(call.route.to_string(), "PATCH guilds/10/members/@me/nick");
    assert_eq!(call.body, Some(json!({"nick": "boss"})));

    let other = guild.member(501, &[]).unwrap();
    other.set_nickname(None).await.unwrap();
    let call = guild.transport.last_call().unwrap();
    assert_eq!(call.route.to_string(), "PATCH guilds/10/members/501");
    assert_eq!(call.body, Some(json!({"nick": ""})));
}

#[tokio::test]
async fn test_set_nickname_last_writer_wins() {
    let guild = TestGuild::new(1);
    let member = guild.member(unique_id(), &[]).unwrap();

    let release_first = guild.transport.respond_after(json!({"nick": "first"}));
    guild.transport.respond(json!({"nick": "second"}));

    let (first, second) = tokio::join!(member.set_nickname(Some("first")), async {
        let result = member.set_nickname(Some("second")).await;
        let _ = release_first.send(());
        result
    });
    first.unwrap();
    second.unwrap();

    // The first request answered last
    assert_eq!(member.nick().as_deref(), Some("first"));
}

#[tokio::test]
async fn test_ban_forwards_window_and_reads_state_at_completion() {
    let guild = TestGuild::new(1);
    guild.registry.insert_guild(guild_with_roles(&[]));
    let member = guild.member(66, &[]).unwrap();

    let release = guild.transport.respond_after(Value::Null);
    let (ban, renamed) = tokio::join!(member.ban(Some(7)), async {
        let renamed = guild
            .registry
            .insert_user(User::new(Snowflake::new(66), "renamed", "0001"));
        let _ = release.send(());
        renamed
    });

    let ban = ban.unwrap();
    assert!(Arc::ptr_eq(&ban.user, &renamed));
    assert_eq!(ban.guild_id, Snowflake::new(GUILD_ID));
    assert_eq!(ban.guild.as_ref().unwrap().name, "Fixture Guild");

    let call = guild.transport.last_call().unwrap();
    assert_eq!(call.route.to_string(), "PUT guilds/10/bans/66");
    assert_eq!(call.body, Some(json!({"delete-message-days": 7})));
}

#[tokio::test]
async fn test_ban_member_known_only_by_id() {
    let guild = TestGuild::new(1);
    let member =
        Member::from_value(Arc::clone(&guild.ctx), json!({"user": {"id": "5"}, "guild_id": "10"}))
            .unwrap();

    assert!(member.user().is_stand_in());
    assert_eq!(member.username(), "");
    assert_eq!(member.display_name(), "");

    let ban = member.ban(Some(7)).await.unwrap();
    assert_eq!(ban.user_id(), Snowflake::new(5));
    assert!(ban.user.is_stand_in());
    assert_eq!(guild.transport.calls().len(), 1);
    assert_eq!(guild.registry.user_count(), 0);
}

#[tokio::test]
async fn test_ban_failure_propagates_untouched() {
    let guild = TestGuild::new(1);
    let member = guild.member(66, &[]).unwrap();
    let before = member.raw();

    let rejection = TransportError::status(403, r#"{"message": "Missing Permissions"}"#);
    guild.transport.fail(rejection.clone());

    match member.ban(Some(7)).await {
        Err(ClientError::Transport(err)) => assert_eq!(err, rejection),
        other => panic!("expected transport error, got {other:?}"),
    }
    assert_eq!(member.raw(), before);
}

#[tokio::test]
async fn test_move_member_changes_nothing_locally() {
    let guild = TestGuild::new(1);
    let member = guild.member(66, &[1]).unwrap();
    let before = member.raw();

    member.move_member(900_u64).await.unwrap();

    let call = guild.transport.last_call().unwrap();
    assert_eq!(call.route.to_string(), "PATCH guilds/10/members/66");
    assert_eq!(call.body, Some(json!({"channel_id": "900"})));
    assert_eq!(member.raw(), before);
}

#[tokio::test]
async fn test_kick() {
    let guild = TestGuild::new(1);
    let member = guild.member(66, &[]).unwrap();

    member.kick().await.unwrap();
    let call = guild.transport.last_call().unwrap();
    assert_eq!(call.route.to_string(), "DELETE guilds/10/members/66");
    assert_eq!(call.body, None);
}
