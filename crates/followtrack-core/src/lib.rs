//! FollowTrack Core - follower export domain kernel
//!
//! This crate provides the storage-independent parts of FollowTrack:
//! - Relation record, snapshot and requested-entry models
//! - CSV export normalizer tolerant of several export layouts
//! - Snapshot diff (gained / lost / net change) and its text summary
//! - Follow-status analysis (mutuals, fans, search, growth)
//! - Structured error facility and logging facility

pub mod analysis;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod normalizer;

pub use followtrack_core_types as core_types;

// Re-export commonly used types
pub use analysis::{analyze_follow_status, FollowBreakdown, GrowthPoint};
pub use diff::{compare_records, ComparisonResult};
pub use errors::{ExError, ExErrorKind, TrackerError};
pub use model::{FollowFlag, RelationKind, RelationRecord, RequestedEntry, Scope, Snapshot};
pub use normalizer::{parse_export, ExportMetadata, ParsedExport};
