//! Subcommand implementations

pub mod changes;
pub mod demo;
pub mod history;
pub mod requested;
pub mod search;
pub mod stats;
pub mod upload;

use followtrack_core::{RelationKind, Snapshot};

/// `2024-05-01 13:45 UTC`
pub(crate) fn format_time(snapshot: &Snapshot) -> String {
    snapshot.uploaded_at.format("%Y-%m-%d %H:%M UTC").to_string()
}

pub(crate) fn signed(n: i64) -> String {
    if n > 0 {
        format!("+{n}")
    } else {
        n.to_string()
    }
}

/// clap value parser for `--kind`
pub(crate) fn parse_kind(raw: &str) -> Result<RelationKind, String> {
    raw.parse::<RelationKind>().map_err(|e| e.to_string())
}
