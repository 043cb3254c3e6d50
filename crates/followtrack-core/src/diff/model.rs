//! Diff output types.

use serde::{Deserialize, Serialize};

use crate::model::RelationRecord;

/// Result of comparing an older snapshot with a newer one.
///
/// `gained_count`/`lost_count` count distinct usernames, while
/// `net_change` is `new_total - old_total`. With de-duplicated snapshots
/// `net_change == gained_count - lost_count`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Records present only in the newer snapshot, sorted by username
    pub gained: Vec<RelationRecord>,
    /// Records present only in the older snapshot, sorted by username
    pub lost: Vec<RelationRecord>,
    pub gained_count: usize,
    pub lost_count: usize,
    pub old_total: usize,
    pub new_total: usize,
    pub net_change: i64,
}

impl ComparisonResult {
    /// True when neither side gained or lost anyone
    pub fn is_unchanged(&self) -> bool {
        self.gained_count == 0 && self.lost_count == 0 && self.net_change == 0
    }

    pub fn gained_usernames(&self) -> Vec<&str> {
        self.gained.iter().map(|r| r.username.as_str()).collect()
    }

    pub fn lost_usernames(&self) -> Vec<&str> {
        self.lost.iter().map(|r| r.username.as_str()).collect()
    }
}
