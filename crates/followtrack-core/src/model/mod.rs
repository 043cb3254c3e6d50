//! Domain models for follower tracking

pub mod record;
pub mod requested;
pub mod scope;
pub mod snapshot;

pub use record::{FollowFlag, RelationKind, RelationRecord};
pub use requested::{normalize_username, RequestedEntry};
pub use scope::Scope;
pub use snapshot::Snapshot;
