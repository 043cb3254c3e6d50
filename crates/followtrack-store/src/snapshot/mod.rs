//! Snapshot persistence layer.
//!
//! A snapshot is one uploaded export: a header row in `snapshots` plus its
//! relation records in `records`. Snapshots are written once and never
//! updated or deleted.
//!
//! ## Responsibilities
//!
//! - Validate and persist a snapshot with all its records atomically
//! - Newest-first history and oldest-first plotting queries
//! - Latest snapshot lookup per scope and relation kind
//!
//! ## Non-Responsibilities
//!
//! - Parsing export files (handled by `followtrack-core`)
//! - Comparing snapshots and orchestration (handled by `followtrack-engine`)

pub mod persist;
pub mod query;

// Re-export primary operations
pub use persist::{save_snapshot, save_snapshot_at};
pub use query::{
    get_all_snapshots_for_plotting, get_latest_snapshot, get_previous_snapshot, get_snapshot,
    get_snapshot_records, get_snapshots,
};
