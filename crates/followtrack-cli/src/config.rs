//! Global options shared by every subcommand.
//!
//! Each option can come from the command line or the environment (a `.env`
//! file in the working directory is loaded first).

use clap::Args;
use followtrack_core::logging_facility::{init_with_default_filter, Profile};
use followtrack_core::Scope;
use rusqlite::Connection;
use serde::Serialize;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = ".followtrack/follower_data.db";

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// SQLite database file
    #[arg(long, global = true, env = "DATABASE_PATH", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Account owner id
    #[arg(long, global = true, env = "FOLLOWTRACK_OWNER_ID", default_value_t = 0)]
    pub owner: i64,

    /// Group id (0 = private)
    #[arg(long, global = true, env = "FOLLOWTRACK_GROUP_ID", default_value_t = Scope::PRIVATE_GROUP)]
    pub group: i64,

    /// Log output format: pretty or json
    #[arg(long, global = true, env = "FOLLOWTRACK_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Show operation logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalArgs {
    pub fn scope(&self) -> Scope {
        Scope::new(self.owner, self.group)
    }

    pub fn init_logging(&self) {
        let filter = if self.verbose {
            "followtrack=debug"
        } else {
            "followtrack=warn"
        };
        init_with_default_filter(Profile::from_format(&self.log_format), filter);
    }

    /// Open the configured store, creating and migrating it if needed
    pub fn open_store(&self) -> Result<Connection, Box<dyn std::error::Error>> {
        Ok(followtrack_store::db::open_store(&self.db)?)
    }

    /// Print `value` as pretty JSON when `--json` is set; otherwise run `text`
    pub fn emit<T: Serialize>(
        &self,
        value: &T,
        text: impl FnOnce(&T),
    ) -> Result<(), Box<dyn std::error::Error>> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            text(value);
        }
        Ok(())
    }
}
