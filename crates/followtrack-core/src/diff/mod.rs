//! Snapshot diff engine.
//!
//! Compares the record sets of two snapshots and reports which usernames were
//! gained and lost plus the count-based net change.
//!
//! ## Entry point
//!
//! ```ignore
//! use followtrack_core::diff::compare_records;
//! use followtrack_core::RelationKind;
//!
//! let result = compare_records(&old_records, &new_records);
//! let text = followtrack_core::diff::render_change_summary(&result, RelationKind::Follower, 10);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: `gained` and `lost` are sorted by lower-cased username.
//! - **Symmetry**: swapping the inputs swaps `gained`/`lost` and negates
//!   `net_change`.
//! - Loading records from storage is the caller's job; this module is pure.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::compare_records;
pub use human_summary::render_change_summary;
pub use model::ComparisonResult;
