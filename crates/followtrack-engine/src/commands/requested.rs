//! Pending-request tracker commands with boundary logging.

#![allow(clippy::result_large_err)]

use std::collections::BTreeSet;

use followtrack_core::{log_op_end, log_op_error, log_op_start};
use followtrack_core::{RelationKind, RequestedEntry, Scope};
use followtrack_store::errors::Result;
use followtrack_store::requested::{
    add_requested, annotate_requested, check_accepted, clear_requested, count_requested,
    list_requested, remove_requested, AddOutcome,
};
use followtrack_store::snapshot::{get_latest_snapshot, get_snapshot_records};
use rusqlite::Connection;

use crate::commands::elapsed_ms;

/// Track usernames as outstanding follow requests
///
/// ## Errors
///
/// - `Persistence`: storage failed; nothing from the batch is kept
pub fn requested_add<S: AsRef<str>>(
    conn: &mut Connection,
    scope: Scope,
    usernames: &[S],
    notes: Option<&str>,
) -> Result<AddOutcome> {
    log_op_start!(
        "requested_add",
        owner_id = scope.owner_id,
        group_id = scope.group_id,
        requested = usernames.len()
    );
    let start = std::time::Instant::now();

    let outcome = add_requested(conn, scope, usernames, notes).map_err(|e| {
        log_op_error!("requested_add", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "requested_add",
        duration_ms = elapsed_ms(start),
        added = outcome.added,
        skipped = outcome.skipped
    );

    Ok(outcome)
}

/// Stop tracking usernames; returns how many were removed
///
/// ## Errors
///
/// - `Persistence`: storage failed
pub fn requested_remove<S: AsRef<str>>(
    conn: &mut Connection,
    scope: Scope,
    usernames: &[S],
) -> Result<usize> {
    log_op_start!(
        "requested_remove",
        owner_id = scope.owner_id,
        group_id = scope.group_id,
        requested = usernames.len()
    );
    let start = std::time::Instant::now();

    let removed = remove_requested(conn, scope, usernames).map_err(|e| {
        log_op_error!("requested_remove", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "requested_remove",
        duration_ms = elapsed_ms(start),
        removed = removed
    );

    Ok(removed)
}

/// Tracked entries, newest first
///
/// ## Errors
///
/// - `Persistence`: the query failed
pub fn requested_list(
    conn: &Connection,
    scope: Scope,
    limit: usize,
) -> Result<Vec<RequestedEntry>> {
    log_op_start!(
        "requested_list",
        owner_id = scope.owner_id,
        group_id = scope.group_id
    );
    let start = std::time::Instant::now();

    let entries = list_requested(conn, scope, limit).map_err(|e| {
        log_op_error!("requested_list", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "requested_list",
        duration_ms = elapsed_ms(start),
        count = entries.len()
    );

    Ok(entries)
}

/// Number of tracked entries
///
/// ## Errors
///
/// - `Persistence`: the query failed
pub fn requested_count(conn: &Connection, scope: Scope) -> Result<i64> {
    log_op_start!(
        "requested_count",
        owner_id = scope.owner_id,
        group_id = scope.group_id
    );
    let start = std::time::Instant::now();

    let count = count_requested(conn, scope).map_err(|e| {
        log_op_error!("requested_count", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!("requested_count", duration_ms = elapsed_ms(start), count = count);

    Ok(count)
}

/// Drop every tracked entry of the scope
///
/// ## Errors
///
/// - `Persistence`: storage failed
pub fn requested_clear(conn: &Connection, scope: Scope) -> Result<usize> {
    log_op_start!(
        "requested_clear",
        owner_id = scope.owner_id,
        group_id = scope.group_id
    );
    let start = std::time::Instant::now();

    let cleared = clear_requested(conn, scope).map_err(|e| {
        log_op_error!("requested_clear", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "requested_clear",
        duration_ms = elapsed_ms(start),
        cleared = cleared
    );

    Ok(cleared)
}

/// Set or clear the note on one tracked entry; `false` if it is not tracked
///
/// ## Errors
///
/// - `Persistence`: storage failed
pub fn requested_note(
    conn: &Connection,
    scope: Scope,
    username: &str,
    notes: Option<&str>,
) -> Result<bool> {
    log_op_start!(
        "requested_note",
        owner_id = scope.owner_id,
        group_id = scope.group_id
    );
    let start = std::time::Instant::now();

    let found = annotate_requested(conn, scope, username, notes).map_err(|e| {
        log_op_error!("requested_note", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!("requested_note", duration_ms = elapsed_ms(start), found = found);

    Ok(found)
}

/// Tracked usernames that appear in the newest follower snapshot.
///
/// `None` when the scope has no follower snapshot. Entries are not removed.
///
/// ## Errors
///
/// - `Persistence`: a query failed
pub fn requested_check(conn: &Connection, scope: Scope) -> Result<Option<BTreeSet<String>>> {
    log_op_start!(
        "requested_check",
        owner_id = scope.owner_id,
        group_id = scope.group_id
    );
    let start = std::time::Instant::now();

    let accepted = requested_check_impl(conn, scope).map_err(|e| {
        log_op_error!("requested_check", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "requested_check",
        duration_ms = elapsed_ms(start),
        accepted = accepted.as_ref().map_or(0, BTreeSet::len)
    );

    Ok(accepted)
}

fn requested_check_impl(conn: &Connection, scope: Scope) -> Result<Option<BTreeSet<String>>> {
    let Some(latest) = get_latest_snapshot(conn, scope, RelationKind::Follower)? else {
        return Ok(None);
    };
    let followers = get_snapshot_records(conn, latest.id)?;
    check_accepted(conn, scope, &followers).map(Some)
}
