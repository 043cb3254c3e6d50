//! FollowTrack CLI
//!
//! Command-line front-end for uploading follower exports and inspecting
//! changes, trends and tracked follow requests.

use clap::{Parser, Subcommand};

mod commands;
mod config;

use config::GlobalArgs;
use followtrack_core::ExError;

#[derive(Debug, Parser)]
#[command(name = "followtrack")]
#[command(about = "FollowTrack - follower export history and change tracking", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Store an export file as a new snapshot and show what changed
    Upload(commands::upload::UploadArgs),
    /// List stored snapshots, newest first
    History(commands::history::HistoryArgs),
    /// Show the change between the two newest snapshots
    Changes(commands::changes::ChangesArgs),
    /// Compare two snapshots by id
    Compare(commands::changes::CompareArgs),
    /// Follower dashboard: totals, follow-back breakdown and latest change
    Stats,
    /// Follower count over time
    Trend,
    /// Followers you do not follow back
    Nonfollowers(commands::search::NonFollowersArgs),
    /// Search the newest follower snapshot
    Search(commands::search::SearchArgs),
    /// Track outstanding follow requests
    Requested(commands::requested::RequestedArgs),
    /// Store a bundled sample export to try the other commands
    Demo,
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    cli.global.init_logging();

    let global = &cli.global;
    let result = match cli.command {
        Commands::Upload(args) => commands::upload::execute(args, global),
        Commands::History(args) => commands::history::execute(args, global),
        Commands::Changes(args) => commands::changes::execute_changes(args, global),
        Commands::Compare(args) => commands::changes::execute_compare(args, global),
        Commands::Stats => commands::stats::execute_stats(global),
        Commands::Trend => commands::stats::execute_trend(global),
        Commands::Nonfollowers(args) => commands::search::execute_non_followers(args, global),
        Commands::Search(args) => commands::search::execute_search(args, global),
        Commands::Requested(args) => commands::requested::execute(args, global),
        Commands::Demo => commands::demo::execute(global),
    };

    if let Err(e) = result {
        match e.downcast_ref::<ExError>() {
            Some(ex) if ex.kind().is_storage_failure() => {
                eprintln!("Error: the follower store could not be read or written ({})", ex);
            }
            _ => eprintln!("Error: {}", e),
        }
        std::process::exit(1);
    }
}
