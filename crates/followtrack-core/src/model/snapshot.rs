use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::record::RelationKind;
use crate::model::scope::Scope;

/// Header of one immutable upload.
///
/// Records are attached at creation time only; `record_count` always equals
/// the number of records stored under `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Store-assigned, monotonically increasing
    pub id: i64,
    pub owner_id: i64,
    pub group_id: i64,
    pub uploaded_at: DateTime<Utc>,
    pub filename: String,
    pub record_count: i64,
    pub relation_kind: RelationKind,
}

impl Snapshot {
    pub fn scope(&self) -> Scope {
        Scope::new(self.owner_id, self.group_id)
    }
}
