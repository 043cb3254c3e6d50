//! Snapshot comparison by id.

#![allow(clippy::result_large_err)]

use followtrack_core::{compare_records, log_op_end, log_op_error, log_op_start};
use followtrack_core::{ComparisonResult, RelationKind, Scope};
use followtrack_store::errors::Result;
use followtrack_store::snapshot::{
    get_latest_snapshot, get_previous_snapshot, get_snapshot_records,
};
use rusqlite::Connection;

use crate::commands::elapsed_ms;

/// Compare two stored snapshots, older first.
///
/// An id with no stored snapshot behaves as an empty record set.
///
/// ## Errors
///
/// - `Persistence`: loading records failed
pub fn compare_snapshots(
    conn: &Connection,
    old_id: i64,
    new_id: i64,
) -> Result<ComparisonResult> {
    log_op_start!("compare_snapshots", old_id = old_id, new_id = new_id);
    let start = std::time::Instant::now();

    let result = compare_snapshots_impl(conn, old_id, new_id).map_err(|e| {
        log_op_error!("compare_snapshots", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "compare_snapshots",
        duration_ms = elapsed_ms(start),
        gained_count = result.gained_count,
        lost_count = result.lost_count
    );

    Ok(result)
}

pub(crate) fn compare_snapshots_impl(
    conn: &Connection,
    old_id: i64,
    new_id: i64,
) -> Result<ComparisonResult> {
    let old_records = get_snapshot_records(conn, old_id)?;
    let new_records = get_snapshot_records(conn, new_id)?;
    Ok(compare_records(&old_records, &new_records))
}

/// Compare the two most recent snapshots of one relation kind.
///
/// `None` when the scope holds fewer than two such snapshots.
///
/// ## Errors
///
/// - `Persistence`: a query failed
pub fn latest_changes(
    conn: &Connection,
    scope: Scope,
    kind: RelationKind,
) -> Result<Option<ComparisonResult>> {
    log_op_start!(
        "latest_changes",
        owner_id = scope.owner_id,
        group_id = scope.group_id,
        relation_kind = kind.as_str()
    );
    let start = std::time::Instant::now();

    let result = latest_changes_impl(conn, scope, kind).map_err(|e| {
        log_op_error!("latest_changes", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "latest_changes",
        duration_ms = elapsed_ms(start),
        found = result.is_some()
    );

    Ok(result)
}

pub(crate) fn latest_changes_impl(
    conn: &Connection,
    scope: Scope,
    kind: RelationKind,
) -> Result<Option<ComparisonResult>> {
    let Some(newest) = get_latest_snapshot(conn, scope, kind)? else {
        return Ok(None);
    };
    let Some(previous) = get_previous_snapshot(conn, &newest)? else {
        return Ok(None);
    };
    compare_snapshots_impl(conn, previous.id, newest.id).map(Some)
}
