//! Demo command
//!
//! Usage: followtrack demo
//!
//! Stores a bundled sample followers export so the other commands have data.

use followtrack_engine::commands::upload::ingest_export;

use crate::commands::upload::print_outcome;
use crate::config::GlobalArgs;

const SAMPLE_NAME: &str = "IGFollow_demo_8_followers.csv";
const SAMPLE: &[u8] = include_bytes!("../../assets/IGFollow_demo_8_followers.csv");

/// Execute demo command
pub fn execute(global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = global.open_store()?;
    let outcome = ingest_export(&mut conn, global.scope(), SAMPLE_NAME, SAMPLE, None)?;

    global.emit(&outcome, |outcome| {
        print_outcome(outcome, SAMPLE_NAME, 10);
        println!("\nTry `followtrack stats` or `followtrack nonfollowers` next.");
    })
}
