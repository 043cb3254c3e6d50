//! Export upload orchestration.
//!
//! ## Pipeline (in order):
//! 1. Normalize the raw bytes (no storage touched for unparseable input),
//!    applying an explicit relation kind when the caller gives one
//! 2. Find the current latest snapshot of the detected relation kind
//! 3. Persist the new snapshot atomically
//! 4. Compare against the previous latest, when there was one

#![allow(clippy::result_large_err)]

use followtrack_core::analysis::analyze_follow_status;
use followtrack_core::core_types::RequestId;
use followtrack_core::normalizer::{parse_export, ExportMetadata};
use followtrack_core::{compare_records, log_op_end, log_op_error, log_op_start};
use followtrack_core::{ComparisonResult, RelationKind, Scope};
use followtrack_store::errors::Result;
use followtrack_store::snapshot::{get_latest_snapshot, get_snapshot_records, save_snapshot};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::commands::{elapsed_ms, FollowCounts};

/// Summary of a stored upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReport {
    pub snapshot_id: i64,
    pub metadata: ExportMetadata,
    pub breakdown: FollowCounts,
    /// Change against the previous snapshot of the same kind, if any
    pub comparison: Option<ComparisonResult>,
}

/// Outcome of [`ingest_export`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadOutcome {
    /// The file produced no records; nothing was stored
    Unparseable,
    Uploaded(UploadReport),
}

/// Normalize, store and compare one export file.
///
/// `filename` drives handle detection and is stored on the snapshot header
/// without any directory prefix. The relation kind is `kind` when given,
/// otherwise whatever the filename implies.
///
/// ## Errors
///
/// - `Persistence`: storage failed; no snapshot is left behind
pub fn ingest_export(
    conn: &mut Connection,
    scope: Scope,
    filename: &str,
    bytes: &[u8],
    kind: Option<RelationKind>,
) -> Result<UploadOutcome> {
    let request_id = RequestId::new();
    let span = tracing::info_span!("ingest_export", request_id = %request_id);
    let _guard = span.enter();

    log_op_start!(
        "ingest_export",
        owner_id = scope.owner_id,
        group_id = scope.group_id,
        size_bytes = bytes.len(),
        kind = kind.map_or("auto", |k| k.as_str())
    );
    let start = std::time::Instant::now();

    let outcome = ingest_export_impl(conn, scope, filename, bytes, kind).map_err(|e| {
        let e = e.with_request_id(request_id.clone());
        log_op_error!("ingest_export", e.clone(), duration_ms = elapsed_ms(start));
        e
    })?;

    match &outcome {
        UploadOutcome::Uploaded(report) => {
            log_op_end!(
                "ingest_export",
                duration_ms = elapsed_ms(start),
                snapshot_id = report.snapshot_id,
                record_count = report.metadata.total,
                gained_count = report.comparison.as_ref().map_or(0, |c| c.gained_count),
                lost_count = report.comparison.as_ref().map_or(0, |c| c.lost_count)
            );
        }
        UploadOutcome::Unparseable => {
            log_op_end!(
                "ingest_export",
                duration_ms = elapsed_ms(start),
                unparseable = true
            );
        }
    }

    Ok(outcome)
}

fn base_filename(filename: &str) -> &str {
    filename
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(filename)
}

fn ingest_export_impl(
    conn: &mut Connection,
    scope: Scope,
    filename: &str,
    bytes: &[u8],
    kind: Option<RelationKind>,
) -> Result<UploadOutcome> {
    let name = base_filename(filename);
    let mut parsed = parse_export(bytes, Some(name));
    if let Some(kind) = kind {
        parsed = parsed.with_relation_kind(kind);
    }
    if parsed.is_empty() {
        tracing::debug!(filename = name, "Export produced no records");
        return Ok(UploadOutcome::Unparseable);
    }

    let kind = parsed.metadata.relation_kind;
    let previous = get_latest_snapshot(conn, scope, kind)?;

    let snapshot_id = save_snapshot(conn, scope, name, &parsed.records, kind)?;

    let comparison = match previous {
        Some(prev) => {
            let old_records = get_snapshot_records(conn, prev.id)?;
            Some(compare_records(&old_records, &parsed.records))
        }
        None => None,
    };

    let breakdown = FollowCounts::from(&analyze_follow_status(&parsed.records));

    Ok(UploadOutcome::Uploaded(UploadReport {
        snapshot_id,
        metadata: parsed.metadata,
        breakdown,
        comparison,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_filename() {
        assert_eq!(base_filename("dir/sub/followers.csv"), "followers.csv");
        assert_eq!(base_filename("C:\\exports\\following.csv"), "following.csv");
        assert_eq!(base_filename("plain.csv"), "plain.csv");
    }
}
