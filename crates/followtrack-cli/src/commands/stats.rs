//! Stats and trend commands
//!
//! Usage:
//!   followtrack stats
//!   followtrack trend

use followtrack_engine::commands::dashboard::dashboard;

use crate::commands::{format_time, signed};
use crate::config::GlobalArgs;

const NO_DATA: &str = "No uploads yet. Use `followtrack upload <file>` first.";

/// Execute stats command
pub fn execute_stats(global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let conn = global.open_store()?;
    let board = dashboard(&conn, global.scope())?;

    global.emit(&board, |board| {
        let Some(board) = board else {
            println!("{}", NO_DATA);
            return;
        };

        println!("## Follower Dashboard\n");
        println!("Uploads:    {}", board.snapshot_count);
        match board.trend.last() {
            Some(latest) => {
                println!("Followers:  {} (as of {})", latest.record_count, format_time(latest));
                println!("Mutual:     {}", board.breakdown.mutual);
                println!("Fans:       {}", board.breakdown.fans);
                if board.breakdown.unknown > 0 {
                    println!("Unknown:    {}", board.breakdown.unknown);
                }
            }
            None => println!("No follower uploads yet."),
        }
        if let Some(change) = &board.latest_change {
            println!(
                "Last change: +{} / -{} (net {})",
                change.gained_count,
                change.lost_count,
                signed(change.net_change)
            );
        }
    })
}

/// Execute trend command
pub fn execute_trend(global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let conn = global.open_store()?;
    let growth = dashboard(&conn, global.scope())?
        .map(|board| board.growth)
        .unwrap_or_default();

    global.emit(&growth, |growth| {
        if growth.is_empty() {
            println!("{}", NO_DATA);
            return;
        }
        for point in growth {
            println!(
                "{}  {:>6}  {:>6}",
                point.uploaded_at.format("%Y-%m-%d %H:%M"),
                point.record_count,
                signed(point.delta)
            );
        }
    })
}
