//! FollowTrack Store - SQLite persistence for snapshots and follow requests
//!
//! Provides:
//! - Connection setup (pragmas + migrations) via [`db::open_store`]
//! - Embedded SQL migrations with checksums
//! - Snapshot store: immutable upload headers with their relation records
//! - Pending-request tracker
//!
//! Every function takes an explicitly passed `rusqlite::Connection`.

pub mod db;
pub mod errors;
pub mod migrations;
pub mod requested;
pub mod snapshot;

// Re-export key types
pub use errors::Result;
pub use requested::AddOutcome;
