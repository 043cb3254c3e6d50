//! Non-follower and search commands
//!
//! Usage:
//!   followtrack nonfollowers [--limit <N>]
//!   followtrack search <QUERY>

use clap::Args;
use followtrack_core::{FollowFlag, RelationRecord};
use followtrack_engine::commands::analysis::{non_followers, search};

use crate::config::GlobalArgs;

const NO_FOLLOWERS: &str = "No follower upload yet. Upload a followers export first.";

#[derive(Debug, Args)]
pub struct NonFollowersArgs {
    /// Maximum number of accounts to list
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Part of a username or display name
    pub query: String,
}

fn record_line(record: &RelationRecord) -> String {
    let mut line = format!("@{}", record.username);
    if !record.fullname.is_empty() {
        line.push_str(&format!(" ({})", record.fullname));
    }
    if record.is_verified == FollowFlag::Yes {
        line.push_str(" ✓");
    }
    line
}

/// Execute nonfollowers command
pub fn execute_non_followers(
    args: NonFollowersArgs,
    global: &GlobalArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let conn = global.open_store()?;
    let result = non_followers(&conn, global.scope(), args.limit)?;

    global.emit(&result, |result| {
        let Some(result) = result else {
            println!("{}", NO_FOLLOWERS);
            return;
        };
        if result.total == 0 {
            println!("You follow back everyone who follows you.");
            return;
        }
        println!("{} follower(s) you do not follow back:", result.total);
        for record in &result.fans {
            println!("  {}", record_line(record));
        }
        let hidden = result.total.saturating_sub(result.fans.len());
        if hidden > 0 {
            println!("  … and {} more", hidden);
        }
    })
}

/// Execute search command
pub fn execute_search(args: SearchArgs, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let conn = global.open_store()?;
    let hits = search(&conn, global.scope(), &args.query)?;

    global.emit(&hits, |hits| match hits {
        None => println!("{}", NO_FOLLOWERS),
        Some(hits) if hits.is_empty() => println!("No followers match \"{}\".", args.query),
        Some(hits) => {
            for record in hits {
                let back = match record.followed_by_owner {
                    FollowFlag::Yes => "mutual",
                    FollowFlag::No => "fan",
                    FollowFlag::Unknown => "",
                };
                println!("{:<40} {}", record_line(record), back);
            }
        }
    })
}
