#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{TimeZone, Utc};
use followtrack_core::errors::ExErrorKind;
use followtrack_core::{FollowFlag, RelationKind, RelationRecord, Scope};
use followtrack_store::db::{open_store, open_store_in_memory};
use followtrack_store::snapshot::{
    get_all_snapshots_for_plotting, get_latest_snapshot, get_previous_snapshot, get_snapshot,
    get_snapshot_records, get_snapshots, save_snapshot, save_snapshot_at,
};
use rusqlite::Connection;

fn followers(names: &[&str]) -> Vec<RelationRecord> {
    names
        .iter()
        .map(|n| RelationRecord::new(*n, RelationKind::Follower))
        .collect()
}

fn at(millis: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_millis_opt(millis).unwrap()
}

fn save_at(
    conn: &mut Connection,
    scope: Scope,
    filename: &str,
    names: &[&str],
    kind: RelationKind,
    millis: i64,
) -> i64 {
    save_snapshot_at(conn, scope, filename, &followers(names), kind, at(millis)).unwrap()
}

fn snapshot_rows(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM snapshots", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn test_save_and_read_back() {
    let mut conn = open_store_in_memory().unwrap();
    let scope = Scope::private(42);
    let records = vec![
        RelationRecord::new("alice", RelationKind::Follower)
            .with_fullname("Alice A")
            .with_followed_by_owner(FollowFlag::Yes)
            .with_verified(FollowFlag::No),
        RelationRecord::new("bob", RelationKind::Follower),
    ];

    let id = save_snapshot(
        &mut conn,
        scope,
        "IGFollow_me_2_followers.csv",
        &records,
        RelationKind::Follower,
    )
    .unwrap();

    let snapshot = get_snapshot(&conn, id).unwrap().expect("snapshot exists");
    assert_eq!(snapshot.record_count, 2);
    assert_eq!(snapshot.filename, "IGFollow_me_2_followers.csv");
    assert_eq!(snapshot.scope(), scope);
    assert_eq!(snapshot.relation_kind, RelationKind::Follower);

    let stored = get_snapshot_records(&conn, id).unwrap();
    assert_eq!(stored, records);
}

#[test]
fn test_record_kind_follows_snapshot_kind() {
    let mut conn = open_store_in_memory().unwrap();
    let id = save_snapshot(
        &mut conn,
        Scope::private(1),
        "following.csv",
        &followers(&["alice"]),
        RelationKind::Following,
    )
    .unwrap();

    let stored = get_snapshot_records(&conn, id).unwrap();
    assert_eq!(stored[0].relation_kind, RelationKind::Following);
}

#[test]
fn test_duplicate_usernames_rejected_without_writes() {
    let mut conn = open_store_in_memory().unwrap();
    let err = save_snapshot(
        &mut conn,
        Scope::private(1),
        "dupes.csv",
        &followers(&["alice", "bob", "alice"]),
        RelationKind::Follower,
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(err.entity_id(), Some("alice"));
    assert_eq!(snapshot_rows(&conn), 0);
}

#[test]
fn test_failed_record_insert_rolls_back_header() {
    let mut conn = open_store_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_carol BEFORE INSERT ON records
         WHEN NEW.username = 'carol'
         BEGIN SELECT RAISE(ABORT, 'carol rejected'); END;",
    )
    .unwrap();

    let err = save_snapshot(
        &mut conn,
        Scope::private(1),
        "followers.csv",
        &followers(&["alice", "bob", "carol", "dave"]),
        RelationKind::Follower,
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Persistence);
    assert_eq!(snapshot_rows(&conn), 0);
    let records: i64 = conn
        .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))
        .unwrap();
    assert_eq!(records, 0);

    // The store stays usable once the failing rows are gone
    let id = save_snapshot(
        &mut conn,
        Scope::private(1),
        "followers.csv",
        &followers(&["alice", "bob"]),
        RelationKind::Follower,
    )
    .unwrap();
    assert_eq!(get_snapshot_records(&conn, id).unwrap().len(), 2);
}

#[test]
fn test_empty_username_rejected() {
    let mut conn = open_store_in_memory().unwrap();
    let err = save_snapshot(
        &mut conn,
        Scope::private(1),
        "blank.csv",
        &followers(&["alice", ""]),
        RelationKind::Follower,
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(snapshot_rows(&conn), 0);
}

#[test]
fn test_empty_snapshot_is_allowed() {
    let mut conn = open_store_in_memory().unwrap();
    let id = save_snapshot(
        &mut conn,
        Scope::private(1),
        "empty.csv",
        &[],
        RelationKind::Follower,
    )
    .unwrap();
    assert_eq!(get_snapshot(&conn, id).unwrap().unwrap().record_count, 0);
}

#[test]
fn test_history_and_plotting_orders() {
    let mut conn = open_store_in_memory().unwrap();
    let scope = Scope::private(7);
    let first = save_at(&mut conn, scope, "a.csv", &["a"], RelationKind::Follower, 1_000);
    let second = save_at(&mut conn, scope, "b.csv", &["a", "b"], RelationKind::Follower, 2_000);
    let third = save_at(&mut conn, scope, "c.csv", &["c"], RelationKind::Following, 3_000);

    let newest_first: Vec<i64> = get_snapshots(&conn, scope, 10)
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(newest_first, vec![third, second, first]);

    let limited = get_snapshots(&conn, scope, 2).unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].id, third);

    let oldest_first: Vec<i64> = get_all_snapshots_for_plotting(&conn, scope)
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(oldest_first, vec![first, second, third]);
}

#[test]
fn test_latest_breaks_timestamp_ties_by_id() {
    let mut conn = open_store_in_memory().unwrap();
    let scope = Scope::private(7);
    let older = save_at(&mut conn, scope, "1.csv", &["a"], RelationKind::Follower, 5_000);
    let newer = save_at(&mut conn, scope, "2.csv", &["b"], RelationKind::Follower, 5_000);

    let latest = get_latest_snapshot(&conn, scope, RelationKind::Follower)
        .unwrap()
        .unwrap();
    assert_eq!(latest.id, newer);

    let previous = get_previous_snapshot(&conn, &latest).unwrap().unwrap();
    assert_eq!(previous.id, older);
    assert!(get_previous_snapshot(&conn, &previous).unwrap().is_none());
}

#[test]
fn test_latest_is_per_kind_and_scope() {
    let mut conn = open_store_in_memory().unwrap();
    let mine = Scope::new(1, 0);
    let group = Scope::new(1, 55);
    save_at(&mut conn, mine, "f.csv", &["a"], RelationKind::Follower, 1);
    save_at(&mut conn, group, "g.csv", &["a"], RelationKind::Follower, 2);

    assert!(get_latest_snapshot(&conn, mine, RelationKind::Following)
        .unwrap()
        .is_none());
    let latest = get_latest_snapshot(&conn, mine, RelationKind::Follower)
        .unwrap()
        .unwrap();
    assert_eq!(latest.filename, "f.csv");
    assert_eq!(get_snapshots(&conn, group, 10).unwrap().len(), 1);
}

#[test]
fn test_unknown_ids() {
    let conn = open_store_in_memory().unwrap();
    assert!(get_snapshot(&conn, 12345).unwrap().is_none());
    assert!(get_snapshot_records(&conn, 12345).unwrap().is_empty());
    assert!(get_snapshots(&conn, Scope::private(9), 10).unwrap().is_empty());
}

#[test]
fn test_snapshots_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");

    let id = {
        let mut conn = open_store(&path).unwrap();
        save_snapshot(
            &mut conn,
            Scope::private(3),
            "x.csv",
            &followers(&["zoe"]),
            RelationKind::Follower,
        )
        .unwrap()
    };

    let conn = open_store(&path).unwrap();
    let stored = get_snapshot_records(&conn, id).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].username, "zoe");
}
