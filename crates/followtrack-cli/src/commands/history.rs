//! History command
//!
//! Usage: followtrack history [--limit <N>]

use clap::Args;
use followtrack_engine::commands::dashboard::snapshot_history;

use crate::commands::format_time;
use crate::config::GlobalArgs;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Maximum number of snapshots to show
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,
}

/// Execute history command
pub fn execute(args: HistoryArgs, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let conn = global.open_store()?;
    let snapshots = snapshot_history(&conn, global.scope(), args.limit)?;

    global.emit(&snapshots, |snapshots| {
        if snapshots.is_empty() {
            println!("No uploads yet. Use `followtrack upload <file>` first.");
            return;
        }
        for s in snapshots {
            println!(
                "#{:<5} {}  {:<9} {:>6}  {}",
                s.id,
                format_time(s),
                s.relation_kind,
                s.record_count,
                s.filename
            );
        }
    })
}
