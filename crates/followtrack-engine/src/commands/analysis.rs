//! Views over the newest follower snapshot: fans and search.

#![allow(clippy::result_large_err)]

use followtrack_core::analysis::{analyze_follow_status, search_records};
use followtrack_core::{log_op_end, log_op_error, log_op_start};
use followtrack_core::{RelationKind, RelationRecord, Scope};
use followtrack_store::errors::Result;
use followtrack_store::snapshot::{get_latest_snapshot, get_snapshot_records};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::commands::elapsed_ms;

/// Followers the owner does not follow back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonFollowers {
    /// At most `limit` fans, in export order
    pub fans: Vec<RelationRecord>,
    /// All fans in the snapshot
    pub total: usize,
}

/// Records of the newest follower snapshot, or `None` without one
fn latest_follower_records(
    conn: &Connection,
    scope: Scope,
) -> Result<Option<Vec<RelationRecord>>> {
    match get_latest_snapshot(conn, scope, RelationKind::Follower)? {
        Some(snapshot) => get_snapshot_records(conn, snapshot.id).map(Some),
        None => Ok(None),
    }
}

/// Fans from the newest follower snapshot; `None` without one.
///
/// ## Errors
///
/// - `Persistence`: a query failed
pub fn non_followers(
    conn: &Connection,
    scope: Scope,
    limit: usize,
) -> Result<Option<NonFollowers>> {
    log_op_start!(
        "non_followers",
        owner_id = scope.owner_id,
        group_id = scope.group_id,
        limit = limit
    );
    let start = std::time::Instant::now();

    let result = latest_follower_records(conn, scope)
        .map(|records| {
            records.map(|records| {
                let mut fans = analyze_follow_status(&records).fans;
                let total = fans.len();
                fans.truncate(limit);
                NonFollowers { fans, total }
            })
        })
        .map_err(|e| {
            log_op_error!("non_followers", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

    log_op_end!(
        "non_followers",
        duration_ms = elapsed_ms(start),
        total = result.as_ref().map_or(0, |r| r.total)
    );

    Ok(result)
}

/// Search the newest follower snapshot by username or full name.
///
/// `None` when the scope has no follower snapshot.
///
/// ## Errors
///
/// - `Persistence`: a query failed
pub fn search(
    conn: &Connection,
    scope: Scope,
    query: &str,
) -> Result<Option<Vec<RelationRecord>>> {
    log_op_start!(
        "search",
        owner_id = scope.owner_id,
        group_id = scope.group_id
    );
    let start = std::time::Instant::now();

    let result = latest_follower_records(conn, scope)
        .map(|records| {
            records.map(|records| {
                search_records(&records, query)
                    .into_iter()
                    .cloned()
                    .collect::<Vec<_>>()
            })
        })
        .map_err(|e| {
            log_op_error!("search", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

    log_op_end!(
        "search",
        duration_ms = elapsed_ms(start),
        matches = result.as_ref().map_or(0, Vec::len)
    );

    Ok(result)
}
