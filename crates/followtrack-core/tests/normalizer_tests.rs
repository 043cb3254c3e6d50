#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Normalizer tests against on-disk export fixtures.

use followtrack_core::normalizer::{parse_export, ExportFormat};
use followtrack_core::{FollowFlag, RelationKind};

fn fixture(name: &str) -> Vec<u8> {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read(path).expect("fixture should exist")
}

#[test]
fn test_duplicate_username_last_row_wins_at_first_position() {
    let parsed = parse_export(
        &fixture("duplicate_rows.csv"),
        Some("IGFollow_owner_4_followers.csv"),
    );

    let names: Vec<&str> = parsed.records.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(names, vec!["ALICE", "bob", "carol"]);

    let alice = &parsed.records[0];
    assert_eq!(alice.external_id, "3");
    assert_eq!(alice.fullname, "Alice Late");
    assert_eq!(alice.followed_by_owner, FollowFlag::Yes);
    assert_eq!(alice.is_verified, FollowFlag::Yes);

    assert_eq!(parsed.metadata.total, 3);
    assert_eq!(parsed.metadata.duplicate_rows, 1);
    assert_eq!(parsed.metadata.skipped_rows, 0);
    assert_eq!(parsed.metadata.following_back, 2);
    assert_eq!(parsed.metadata.declared_count, Some(4));
}

#[test]
fn test_data_download_fixture() {
    let parsed = parse_export(
        &fixture("data_download_following.csv"),
        Some("following.csv"),
    );

    assert_eq!(parsed.metadata.format, Some(ExportFormat::DataDownload));
    assert_eq!(parsed.metadata.relation_kind, RelationKind::Following);
    assert_eq!(parsed.metadata.total, 2);
    assert_eq!(parsed.metadata.skipped_rows, 1);
    assert_eq!(parsed.records[1].username, "erin");
    assert_eq!(parsed.records[0].profile_url, "https://www.instagram.com/dave");
    assert!(parsed
        .records
        .iter()
        .all(|r| r.followed_by_owner == FollowFlag::Unknown));
    assert_eq!(parsed.metadata.account_handle, None);
}

#[test]
fn test_total_always_matches_records() {
    for name in ["duplicate_rows.csv", "data_download_following.csv"] {
        let parsed = parse_export(&fixture(name), Some(name));
        assert_eq!(parsed.metadata.total, parsed.records.len());
    }
}
