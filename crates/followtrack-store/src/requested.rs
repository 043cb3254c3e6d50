//! Pending-request tracker.
//!
//! Usernames the owner has sent follow requests to, kept per scope until the
//! user removes them. Stored usernames are always normalized (see
//! [`normalize_username`]), so matching is case-insensitive.

#![allow(clippy::result_large_err)]

use std::collections::BTreeSet;

use chrono::Utc;
use followtrack_core::model::normalize_username;
use followtrack_core::{RelationRecord, RequestedEntry, Scope};
use rusqlite::{params, Connection};

use crate::errors::{from_rusqlite, is_constraint_violation, Result};
use crate::snapshot::query::{millis_to_utc, stored_value_error};

/// Result of a batch add
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOutcome {
    /// Entries newly stored
    pub added: usize,
    /// Entries already tracked, or repeated within the batch
    pub skipped: usize,
}

/// Track a batch of usernames.
///
/// Entries that normalize to nothing are dropped without counting. A username
/// already tracked in the scope, or repeated earlier in the same batch, is
/// counted as skipped. The batch runs in one transaction.
///
/// # Errors
///
/// `Persistence` for any storage failure other than a uniqueness collision;
/// nothing from the batch is kept in that case.
pub fn add_requested<S: AsRef<str>>(
    conn: &mut Connection,
    scope: Scope,
    usernames: &[S],
    notes: Option<&str>,
) -> Result<AddOutcome> {
    let notes = notes.map(str::trim).filter(|n| !n.is_empty());
    let added_at = Utc::now().timestamp_millis();
    let mut outcome = AddOutcome::default();

    let tx = conn.transaction().map_err(from_rusqlite)?;
    {
        let mut stmt = tx
            .prepare(
                "INSERT INTO requested (owner_id, group_id, username, added_at, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .map_err(from_rusqlite)?;

        for username in usernames.iter().filter_map(|u| normalize_username(u.as_ref())) {
            match stmt.execute(params![scope.owner_id, scope.group_id, username, added_at, notes]) {
                Ok(_) => outcome.added += 1,
                Err(e) if is_constraint_violation(&e) => outcome.skipped += 1,
                Err(e) => return Err(from_rusqlite(e)),
            }
        }
    }
    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(
        owner_id = scope.owner_id,
        group_id = scope.group_id,
        added = outcome.added,
        skipped = outcome.skipped,
        "Added requested entries"
    );

    Ok(outcome)
}

/// Stop tracking usernames; returns how many entries were deleted
///
/// # Errors
///
/// `Persistence` when a delete fails; the whole batch is rolled back.
pub fn remove_requested<S: AsRef<str>>(
    conn: &mut Connection,
    scope: Scope,
    usernames: &[S],
) -> Result<usize> {
    let tx = conn.transaction().map_err(from_rusqlite)?;
    let mut removed = 0;
    {
        let mut stmt = tx
            .prepare("DELETE FROM requested WHERE owner_id = ?1 AND group_id = ?2 AND username = ?3")
            .map_err(from_rusqlite)?;
        for username in usernames.iter().filter_map(|u| normalize_username(u.as_ref())) {
            removed += stmt
                .execute(params![scope.owner_id, scope.group_id, username])
                .map_err(from_rusqlite)?;
        }
    }
    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(
        owner_id = scope.owner_id,
        group_id = scope.group_id,
        removed,
        "Removed requested entries"
    );
    Ok(removed)
}

/// Tracked entries, newest first, at most `limit`
///
/// # Errors
///
/// `Persistence` when the query fails, `InvalidValue` for an undecodable row.
pub fn list_requested(conn: &Connection, scope: Scope, limit: usize) -> Result<Vec<RequestedEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT username, added_at, notes FROM requested
             WHERE owner_id = ?1 AND group_id = ?2
             ORDER BY added_at DESC, id DESC
             LIMIT ?3",
        )
        .map_err(from_rusqlite)?;

    let rows = stmt
        .query_map(params![scope.owner_id, scope.group_id, limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    rows.into_iter()
        .map(|(username, added_at, notes)| -> Result<RequestedEntry> {
            Ok(RequestedEntry {
                owner_id: scope.owner_id,
                group_id: scope.group_id,
                username,
                added_at: millis_to_utc(added_at).map_err(stored_value_error)?,
                notes,
            })
        })
        .collect()
}

/// Number of tracked entries in a scope
///
/// # Errors
///
/// `Persistence` when the query fails.
pub fn count_requested(conn: &Connection, scope: Scope) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM requested WHERE owner_id = ?1 AND group_id = ?2",
        params![scope.owner_id, scope.group_id],
        |row| row.get(0),
    )
    .map_err(from_rusqlite)
}

/// Delete every tracked entry of a scope; returns how many were deleted
///
/// # Errors
///
/// `Persistence` when the delete fails.
pub fn clear_requested(conn: &Connection, scope: Scope) -> Result<usize> {
    let cleared = conn
        .execute(
            "DELETE FROM requested WHERE owner_id = ?1 AND group_id = ?2",
            params![scope.owner_id, scope.group_id],
        )
        .map_err(from_rusqlite)?;

    tracing::debug!(
        owner_id = scope.owner_id,
        group_id = scope.group_id,
        cleared,
        "Cleared requested entries"
    );
    Ok(cleared)
}

/// Set (or, with `None` or blank text, clear) the note on one entry.
///
/// Returns `false` when the username is not tracked in the scope.
///
/// # Errors
///
/// `Persistence` when the update fails.
pub fn annotate_requested(
    conn: &Connection,
    scope: Scope,
    username: &str,
    notes: Option<&str>,
) -> Result<bool> {
    let Some(username) = normalize_username(username) else {
        return Ok(false);
    };
    let notes = notes.map(str::trim).filter(|n| !n.is_empty());

    let changed = conn
        .execute(
            "UPDATE requested SET notes = ?4
             WHERE owner_id = ?1 AND group_id = ?2 AND username = ?3",
            params![scope.owner_id, scope.group_id, username, notes],
        )
        .map_err(from_rusqlite)?;

    Ok(changed > 0)
}

/// Tracked usernames that now appear among `followers`.
///
/// Comparison is case-insensitive and results are lower-cased. Matching
/// entries are reported only; they stay tracked.
///
/// # Errors
///
/// `Persistence` when the query fails.
pub fn check_accepted(
    conn: &Connection,
    scope: Scope,
    followers: &[RelationRecord],
) -> Result<BTreeSet<String>> {
    let follower_keys: BTreeSet<String> =
        followers.iter().map(RelationRecord::username_key).collect();

    let mut stmt = conn
        .prepare("SELECT username FROM requested WHERE owner_id = ?1 AND group_id = ?2")
        .map_err(from_rusqlite)?;
    let tracked = stmt
        .query_map(params![scope.owner_id, scope.group_id], |row| row.get::<_, String>(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    Ok(tracked
        .into_iter()
        .map(|u| u.to_lowercase())
        .filter(|u| follower_keys.contains(u))
        .collect())
}
