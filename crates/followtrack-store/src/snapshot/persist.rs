//! Snapshot write path.

#![allow(clippy::result_large_err)]

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use followtrack_core::errors::{ExError, TrackerError};
use followtrack_core::{RelationKind, RelationRecord, Scope};
use rusqlite::{params, Connection, Transaction};

use crate::errors::{from_rusqlite, Result};

/// Reject records that could not be stored as one snapshot
fn validate_records(records: &[RelationRecord]) -> std::result::Result<(), TrackerError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        if record.username.trim().is_empty() {
            return Err(TrackerError::EmptyUsername { position });
        }
        if !seen.insert(record.username.as_str()) {
            return Err(TrackerError::DuplicateUsername {
                username: record.username.clone(),
            });
        }
    }
    Ok(())
}

/// Persist a snapshot stamped with the current time.
///
/// See [`save_snapshot_at`].
///
/// # Errors
///
/// - `InvalidInput`: a record has an empty or repeated username
/// - `Persistence`: SQLite write failed
pub fn save_snapshot(
    conn: &mut Connection,
    scope: Scope,
    filename: &str,
    records: &[RelationRecord],
    relation_kind: RelationKind,
) -> Result<i64> {
    save_snapshot_at(conn, scope, filename, records, relation_kind, Utc::now())
}

/// Persist a snapshot header and all its records in one transaction.
///
/// Every stored record carries the snapshot's `relation_kind`. Validation
/// happens before any write, so a rejected snapshot leaves nothing behind.
///
/// ## Returns
///
/// The new snapshot id
///
/// # Errors
///
/// - `InvalidInput`: a record has an empty or repeated username
/// - `Persistence`: SQLite write failed; the transaction is rolled back
pub fn save_snapshot_at(
    conn: &mut Connection,
    scope: Scope,
    filename: &str,
    records: &[RelationRecord],
    relation_kind: RelationKind,
    uploaded_at: DateTime<Utc>,
) -> Result<i64> {
    validate_records(records)
        .map_err(|e| ExError::from(e).with_op("save_snapshot"))?;

    let tx = conn.transaction().map_err(from_rusqlite)?;

    tx.execute(
        "INSERT INTO snapshots (owner_id, group_id, uploaded_at, filename, record_count, relation_kind)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            scope.owner_id,
            scope.group_id,
            uploaded_at.timestamp_millis(),
            filename,
            records.len() as i64,
            relation_kind.as_str(),
        ],
    )
    .map_err(from_rusqlite)?;
    let snapshot_id = tx.last_insert_rowid();

    insert_records(&tx, snapshot_id, records, relation_kind)?;

    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(
        snapshot_id,
        owner_id = scope.owner_id,
        group_id = scope.group_id,
        record_count = records.len(),
        relation_kind = relation_kind.as_str(),
        "Saved snapshot"
    );

    Ok(snapshot_id)
}

fn insert_records(
    tx: &Transaction,
    snapshot_id: i64,
    records: &[RelationRecord],
    relation_kind: RelationKind,
) -> Result<()> {
    let mut stmt = tx
        .prepare(
            "INSERT INTO records (
                snapshot_id, external_id, username, fullname,
                followed_by_owner, is_verified, profile_url, relation_kind
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .map_err(from_rusqlite)?;

    for record in records {
        stmt.execute(params![
            snapshot_id,
            record.external_id,
            record.username,
            record.fullname,
            record.followed_by_owner.as_str(),
            record.is_verified.as_str(),
            record.profile_url,
            relation_kind.as_str(),
        ])
        .map_err(from_rusqlite)?;
    }

    Ok(())
}
