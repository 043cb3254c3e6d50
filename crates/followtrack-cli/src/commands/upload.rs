//! Upload command
//!
//! Usage: followtrack upload <FILE> [--kind followers|following]

use clap::Args;
use followtrack_core::diff::render_change_summary;
use followtrack_core::RelationKind;
use followtrack_engine::commands::upload::{ingest_export, UploadOutcome};
use std::path::PathBuf;

use crate::commands::parse_kind;
use crate::config::GlobalArgs;

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Export CSV file
    pub file: PathBuf,

    /// Which list the file holds; detected from the filename when omitted
    #[arg(long, value_parser = parse_kind)]
    pub kind: Option<RelationKind>,

    /// Usernames to list per side of the change summary
    #[arg(long, default_value_t = 10)]
    pub max_names: usize,
}

/// Execute upload command
pub fn execute(args: UploadArgs, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Read before touching the store
    let bytes = std::fs::read(&args.file)?;
    let filename = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());

    let mut conn = global.open_store()?;
    let outcome = ingest_export(&mut conn, global.scope(), &filename, &bytes, args.kind)?;

    global.emit(&outcome, |outcome| print_outcome(outcome, &filename, args.max_names))
}

/// Text rendering of an upload result, shared with `demo`
pub(crate) fn print_outcome(outcome: &UploadOutcome, filename: &str, max_names: usize) {
    match outcome {
        UploadOutcome::Unparseable => {
            println!("✗ Could not read any accounts from {}", filename);
            println!("  Expected a CSV with a username column.");
        }
        UploadOutcome::Uploaded(report) => {
            let meta = &report.metadata;
            println!("✓ Stored snapshot #{} ({})", report.snapshot_id, meta.relation_kind);
            if let Some(handle) = &meta.account_handle {
                println!("  Account:   @{}", handle);
            }
            println!("  Accounts:  {}", meta.total);
            println!("  Mutual:    {}", report.breakdown.mutual);
            println!("  Fans:      {}", report.breakdown.fans);
            println!("  Verified:  {}", meta.verified);
            if meta.skipped_rows > 0 || meta.duplicate_rows > 0 {
                println!(
                    "  Skipped {} unusable and {} duplicate row(s)",
                    meta.skipped_rows, meta.duplicate_rows
                );
            }
            if let Some(declared) = meta.declared_count {
                if declared as usize != meta.total {
                    println!("  Note: filename declares {} accounts", declared);
                }
            }
            match &report.comparison {
                Some(comparison) => {
                    println!();
                    let summary =
                        render_change_summary(comparison, meta.relation_kind, max_names);
                    print!("{}", summary);
                }
                None => println!("\nFirst upload of this kind; nothing to compare yet."),
            }
        }
    }
}
