//! Change commands
//!
//! Usage:
//!   followtrack changes [--kind followers|following]
//!   followtrack compare <OLD_ID> <NEW_ID>

use clap::Args;
use followtrack_core::diff::render_change_summary;
use followtrack_core::RelationKind;
use followtrack_engine::commands::compare::{compare_snapshots, latest_changes};
use followtrack_store::snapshot::get_snapshot;

use crate::commands::parse_kind;
use crate::config::GlobalArgs;

#[derive(Debug, Args)]
pub struct ChangesArgs {
    /// Which list to compare
    #[arg(long, default_value = "followers", value_parser = parse_kind)]
    pub kind: RelationKind,

    /// Usernames to list per side
    #[arg(long, default_value_t = 20)]
    pub max_names: usize,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Older snapshot id
    pub old_id: i64,
    /// Newer snapshot id
    pub new_id: i64,

    /// Usernames to list per side
    #[arg(long, default_value_t = 20)]
    pub max_names: usize,
}

/// Execute changes command
pub fn execute_changes(
    args: ChangesArgs,
    global: &GlobalArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let conn = global.open_store()?;
    let result = latest_changes(&conn, global.scope(), args.kind)?;

    global.emit(&result, |result| match result {
        Some(comparison) => print!(
            "{}",
            render_change_summary(comparison, args.kind, args.max_names)
        ),
        None => println!(
            "Need at least two {} uploads to show changes.",
            args.kind
        ),
    })
}

/// Execute compare command
pub fn execute_compare(
    args: CompareArgs,
    global: &GlobalArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let conn = global.open_store()?;
    let comparison = compare_snapshots(&conn, args.old_id, args.new_id)?;
    // An unknown id compares as empty; fall back to the follower heading then
    let kind = match get_snapshot(&conn, args.new_id)? {
        Some(snapshot) => snapshot.relation_kind,
        None => get_snapshot(&conn, args.old_id)?.map_or(RelationKind::Follower, |s| s.relation_kind),
    };

    global.emit(&comparison, |comparison| {
        print!("{}", render_change_summary(comparison, kind, args.max_names));
    })
}
