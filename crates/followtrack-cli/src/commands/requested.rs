//! Follow-request tracker commands
//!
//! Usage:
//!   followtrack requested add <USERNAME>... [--note <TEXT>]
//!   followtrack requested remove <USERNAME>...
//!   followtrack requested list [--limit <N>]
//!   followtrack requested count
//!   followtrack requested clear
//!   followtrack requested check
//!   followtrack requested note <USERNAME> [TEXT]

use clap::{Args, Subcommand};
use followtrack_engine::commands::requested::{
    requested_add, requested_check, requested_clear, requested_count, requested_list,
    requested_note, requested_remove,
};
use followtrack_core::model::normalize_username;
use serde_json::json;

use crate::config::GlobalArgs;

#[derive(Debug, Args)]
pub struct RequestedArgs {
    #[command(subcommand)]
    pub command: RequestedCommand,
}

#[derive(Debug, Subcommand)]
pub enum RequestedCommand {
    /// Track one or more usernames
    Add {
        #[arg(required = true)]
        usernames: Vec<String>,
        /// Note stored on every added entry
        #[arg(long)]
        note: Option<String>,
    },
    /// Stop tracking usernames
    Remove {
        #[arg(required = true)]
        usernames: Vec<String>,
    },
    /// List tracked usernames, newest first
    List {
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },
    /// Number of tracked usernames
    Count,
    /// Forget every tracked username
    Clear,
    /// Tracked usernames that now follow you
    Check,
    /// Set or clear the note of one entry
    Note {
        username: String,
        /// New note; omit to clear
        note: Option<String>,
    },
}

/// Execute requested command
pub fn execute(args: RequestedArgs, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let scope = global.scope();

    match args.command {
        RequestedCommand::Add { usernames, note } => {
            let mut conn = global.open_store()?;
            let outcome = requested_add(&mut conn, scope, &usernames, note.as_deref())?;
            let value = json!({ "added": outcome.added, "skipped": outcome.skipped });
            global.emit(&value, |_| {
                println!("Added {} username(s)", outcome.added);
                if outcome.skipped > 0 {
                    println!("Skipped {} already tracked", outcome.skipped);
                }
            })
        }
        RequestedCommand::Remove { usernames } => {
            let mut conn = global.open_store()?;
            let removed = requested_remove(&mut conn, scope, &usernames)?;
            global.emit(&json!({ "removed": removed }), |_| {
                println!("Removed {} username(s)", removed);
            })
        }
        RequestedCommand::List { limit } => {
            let conn = global.open_store()?;
            let entries = requested_list(&conn, scope, limit)?;
            global.emit(&entries, |entries| {
                if entries.is_empty() {
                    println!("No tracked follow requests.");
                    return;
                }
                for entry in entries {
                    let added = entry.added_at.format("%Y-%m-%d");
                    match &entry.notes {
                        Some(notes) => println!("@{:<30} {}  {}", entry.username, added, notes),
                        None => println!("@{:<30} {}", entry.username, added),
                    }
                }
            })
        }
        RequestedCommand::Count => {
            let conn = global.open_store()?;
            let count = requested_count(&conn, scope)?;
            global.emit(&json!({ "count": count }), |_| {
                println!("{} tracked follow request(s)", count);
            })
        }
        RequestedCommand::Clear => {
            let conn = global.open_store()?;
            let cleared = requested_clear(&conn, scope)?;
            global.emit(&json!({ "cleared": cleared }), |_| {
                println!("Cleared {} tracked follow request(s)", cleared);
            })
        }
        RequestedCommand::Check => {
            let conn = global.open_store()?;
            let accepted = requested_check(&conn, scope)?;
            global.emit(&accepted, |accepted| match accepted {
                None => println!("No follower upload yet. Upload a followers export first."),
                Some(accepted) if accepted.is_empty() => {
                    println!("None of your tracked requests follow you yet.")
                }
                Some(accepted) => {
                    println!("{} tracked request(s) now follow you:", accepted.len());
                    for username in accepted {
                        println!("  @{}", username);
                    }
                }
            })
        }
        RequestedCommand::Note { username, note } => {
            let Some(key) = normalize_username(&username) else {
                return Err("username must not be empty".into());
            };
            let conn = global.open_store()?;
            let found = requested_note(&conn, scope, &key, note.as_deref())?;
            if !found {
                return Err(format!("@{} is not tracked", key).into());
            }
            global.emit(&json!({ "username": key, "notes": note }), |_| {
                println!("Updated note for @{}", key);
            })
        }
    }
}
