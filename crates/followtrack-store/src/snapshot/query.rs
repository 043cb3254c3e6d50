//! Read-only snapshot queries.
//!
//! Ordering is always by `uploaded_at`, with the larger id winning ties.

#![allow(clippy::result_large_err)]

use chrono::{DateTime, TimeZone, Utc};
use followtrack_core::errors::{ExError, TrackerError};
use followtrack_core::{FollowFlag, RelationKind, RelationRecord, Scope, Snapshot};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::errors::{from_rusqlite, Result};

const SNAPSHOT_COLUMNS: &str =
    "id, owner_id, group_id, uploaded_at, filename, record_count, relation_kind";

/// A raw row from the `snapshots` table, before text/timestamp decoding
struct SnapshotRow {
    id: i64,
    owner_id: i64,
    group_id: i64,
    uploaded_at: i64,
    filename: String,
    record_count: i64,
    relation_kind: String,
}

impl SnapshotRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            group_id: row.get(2)?,
            uploaded_at: row.get(3)?,
            filename: row.get(4)?,
            record_count: row.get(5)?,
            relation_kind: row.get(6)?,
        })
    }

    fn into_snapshot(self) -> Result<Snapshot> {
        Ok(Snapshot {
            id: self.id,
            owner_id: self.owner_id,
            group_id: self.group_id,
            uploaded_at: millis_to_utc(self.uploaded_at).map_err(stored_value_error)?,
            filename: self.filename,
            record_count: self.record_count,
            relation_kind: self
                .relation_kind
                .parse::<RelationKind>()
                .map_err(stored_value_error)?,
        })
    }
}

/// Convert stored Unix milliseconds into a UTC timestamp
pub(crate) fn millis_to_utc(millis: i64) -> std::result::Result<DateTime<Utc>, TrackerError> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or(TrackerError::InvalidTimestamp { millis })
}

pub(crate) fn stored_value_error(err: TrackerError) -> ExError {
    ExError::from(err).with_op("decode_stored_row")
}

fn query_snapshots(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Snapshot>> {
    let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
    let rows = stmt
        .query_map(params, SnapshotRow::from_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    rows.into_iter().map(SnapshotRow::into_snapshot).collect()
}

/// Snapshots of a scope, newest first, at most `limit`
///
/// # Errors
///
/// `Persistence` when the query fails, `InvalidValue` for undecodable rows.
pub fn get_snapshots(conn: &Connection, scope: Scope, limit: usize) -> Result<Vec<Snapshot>> {
    let sql = format!(
        "SELECT {SNAPSHOT_COLUMNS} FROM snapshots
         WHERE owner_id = ?1 AND group_id = ?2
         ORDER BY uploaded_at DESC, id DESC
         LIMIT ?3"
    );
    query_snapshots(
        conn,
        &sql,
        params![scope.owner_id, scope.group_id, limit as i64],
    )
}

/// Every snapshot of a scope, oldest first, for trend display
///
/// # Errors
///
/// `Persistence` when the query fails, `InvalidValue` for undecodable rows.
pub fn get_all_snapshots_for_plotting(conn: &Connection, scope: Scope) -> Result<Vec<Snapshot>> {
    let sql = format!(
        "SELECT {SNAPSHOT_COLUMNS} FROM snapshots
         WHERE owner_id = ?1 AND group_id = ?2
         ORDER BY uploaded_at ASC, id ASC"
    );
    query_snapshots(conn, &sql, params![scope.owner_id, scope.group_id])
}

/// Look up one snapshot header by id
///
/// # Errors
///
/// `Persistence` when the query fails, `InvalidValue` for an undecodable row.
pub fn get_snapshot(conn: &Connection, snapshot_id: i64) -> Result<Option<Snapshot>> {
    let sql = format!("SELECT {SNAPSHOT_COLUMNS} FROM snapshots WHERE id = ?1");
    conn.query_row(&sql, [snapshot_id], SnapshotRow::from_row)
        .optional()
        .map_err(from_rusqlite)?
        .map(SnapshotRow::into_snapshot)
        .transpose()
}

/// Most recent snapshot of one relation kind in a scope
///
/// # Errors
///
/// `Persistence` when the query fails, `InvalidValue` for an undecodable row.
pub fn get_latest_snapshot(
    conn: &Connection,
    scope: Scope,
    relation_kind: RelationKind,
) -> Result<Option<Snapshot>> {
    let sql = format!(
        "SELECT {SNAPSHOT_COLUMNS} FROM snapshots
         WHERE owner_id = ?1 AND group_id = ?2 AND relation_kind = ?3
         ORDER BY uploaded_at DESC, id DESC
         LIMIT 1"
    );
    conn.query_row(
        &sql,
        params![scope.owner_id, scope.group_id, relation_kind.as_str()],
        SnapshotRow::from_row,
    )
    .optional()
    .map_err(from_rusqlite)?
    .map(SnapshotRow::into_snapshot)
    .transpose()
}

/// Snapshot of the same scope and kind immediately before `snapshot`
///
/// # Errors
///
/// `Persistence` when the query fails, `InvalidValue` for an undecodable row.
pub fn get_previous_snapshot(conn: &Connection, snapshot: &Snapshot) -> Result<Option<Snapshot>> {
    let sql = format!(
        "SELECT {SNAPSHOT_COLUMNS} FROM snapshots
         WHERE owner_id = ?1 AND group_id = ?2 AND relation_kind = ?3
           AND (uploaded_at < ?4 OR (uploaded_at = ?4 AND id < ?5))
         ORDER BY uploaded_at DESC, id DESC
         LIMIT 1"
    );
    conn.query_row(
        &sql,
        params![
            snapshot.owner_id,
            snapshot.group_id,
            snapshot.relation_kind.as_str(),
            snapshot.uploaded_at.timestamp_millis(),
            snapshot.id,
        ],
        SnapshotRow::from_row,
    )
    .optional()
    .map_err(from_rusqlite)?
    .map(SnapshotRow::into_snapshot)
    .transpose()
}

type RecordRow = (String, String, String, String, String, String, String);

fn decode_record(row: RecordRow) -> Result<RelationRecord> {
    let (external_id, username, fullname, followed_by, verified, profile_url, kind) = row;
    Ok(RelationRecord {
        external_id,
        username,
        fullname,
        followed_by_owner: FollowFlag::from_stored(&followed_by).map_err(stored_value_error)?,
        is_verified: FollowFlag::from_stored(&verified).map_err(stored_value_error)?,
        profile_url,
        relation_kind: kind.parse::<RelationKind>().map_err(stored_value_error)?,
    })
}

/// Records stored under a snapshot, in insertion order.
///
/// An unknown id yields an empty list.
///
/// # Errors
///
/// `Persistence` when the query fails, `InvalidValue` for undecodable rows.
pub fn get_snapshot_records(conn: &Connection, snapshot_id: i64) -> Result<Vec<RelationRecord>> {
    let mut stmt = conn
        .prepare(
            "SELECT external_id, username, fullname, followed_by_owner,
                    is_verified, profile_url, relation_kind
             FROM records WHERE snapshot_id = ?1 ORDER BY id ASC",
        )
        .map_err(from_rusqlite)?;

    let rows = stmt
        .query_map([snapshot_id], |row| -> rusqlite::Result<RecordRow> {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    rows.into_iter().map(decode_record).collect()
}
