//! Command orchestration layer.
//!
//! ## Logging Ownership
//!
//! Every public command here owns its lifecycle logging:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (store, core) use only `tracing::debug!()` for internal details.

pub mod analysis;
pub mod compare;
pub mod dashboard;
pub mod requested;
pub mod upload;

use followtrack_core::analysis::FollowBreakdown;
use serde::{Deserialize, Serialize};

/// Sizes of a [`FollowBreakdown`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowCounts {
    pub mutual: usize,
    pub fans: usize,
    pub unknown: usize,
}

impl From<&FollowBreakdown> for FollowCounts {
    fn from(breakdown: &FollowBreakdown) -> Self {
        Self {
            mutual: breakdown.mutual.len(),
            fans: breakdown.fans.len(),
            unknown: breakdown.unknown.len(),
        }
    }
}

pub(crate) fn elapsed_ms(start: std::time::Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
