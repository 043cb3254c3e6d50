//! Dashboard, trend and history views over a scope's snapshots.

#![allow(clippy::result_large_err)]

use followtrack_core::analysis::{analyze_follow_status, growth_series, GrowthPoint};
use followtrack_core::{log_op_end, log_op_error, log_op_start};
use followtrack_core::{ComparisonResult, RelationKind, Scope, Snapshot};
use followtrack_store::errors::Result;
use followtrack_store::snapshot::{
    get_all_snapshots_for_plotting, get_snapshot_records, get_snapshots,
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::commands::compare::latest_changes_impl;
use crate::commands::{elapsed_ms, FollowCounts};

/// Everything a front-end needs to draw the follower dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Snapshots of both kinds stored for the scope
    pub snapshot_count: usize,
    /// Follower snapshots, oldest first
    pub trend: Vec<Snapshot>,
    pub growth: Vec<GrowthPoint>,
    /// Breakdown of the newest follower snapshot (zeros without one)
    pub breakdown: FollowCounts,
    /// Change between the two newest follower snapshots
    pub latest_change: Option<ComparisonResult>,
}

/// Build the dashboard for a scope; `None` when nothing was ever uploaded.
///
/// ## Errors
///
/// - `Persistence`: a query failed
pub fn dashboard(conn: &Connection, scope: Scope) -> Result<Option<Dashboard>> {
    log_op_start!(
        "dashboard",
        owner_id = scope.owner_id,
        group_id = scope.group_id
    );
    let start = std::time::Instant::now();

    let result = dashboard_impl(conn, scope).map_err(|e| {
        log_op_error!("dashboard", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "dashboard",
        duration_ms = elapsed_ms(start),
        snapshot_count = result.as_ref().map_or(0, |d| d.snapshot_count)
    );

    Ok(result)
}

fn dashboard_impl(conn: &Connection, scope: Scope) -> Result<Option<Dashboard>> {
    let all = get_all_snapshots_for_plotting(conn, scope)?;
    if all.is_empty() {
        return Ok(None);
    }

    let snapshot_count = all.len();
    let trend: Vec<Snapshot> = all
        .into_iter()
        .filter(|s| s.relation_kind == RelationKind::Follower)
        .collect();

    let breakdown = match trend.last() {
        Some(latest) => {
            let records = get_snapshot_records(conn, latest.id)?;
            FollowCounts::from(&analyze_follow_status(&records))
        }
        None => FollowCounts::default(),
    };

    let latest_change = latest_changes_impl(conn, scope, RelationKind::Follower)?;

    Ok(Some(Dashboard {
        snapshot_count,
        growth: growth_series(&trend),
        trend,
        breakdown,
        latest_change,
    }))
}

/// Upload history, newest first
///
/// ## Errors
///
/// - `Persistence`: the query failed
pub fn snapshot_history(conn: &Connection, scope: Scope, limit: usize) -> Result<Vec<Snapshot>> {
    log_op_start!(
        "snapshot_history",
        owner_id = scope.owner_id,
        group_id = scope.group_id,
        limit = limit
    );
    let start = std::time::Instant::now();

    let result = get_snapshots(conn, scope, limit).map_err(|e| {
        log_op_error!("snapshot_history", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    log_op_end!(
        "snapshot_history",
        duration_ms = elapsed_ms(start),
        count = result.len()
    );

    Ok(result)
}
