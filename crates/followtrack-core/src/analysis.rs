//! Follow-status analysis over a snapshot's records.
//!
//! Mutuals are records the owner follows back, fans are followers the owner
//! does not follow back. Records with an unknown flag count as neither.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{FollowFlag, RelationRecord, Snapshot};

/// Records of one snapshot split by the followed-by-owner flag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowBreakdown {
    pub mutual: Vec<RelationRecord>,
    pub fans: Vec<RelationRecord>,
    pub unknown: Vec<RelationRecord>,
}

impl FollowBreakdown {
    pub fn total(&self) -> usize {
        self.mutual.len() + self.fans.len() + self.unknown.len()
    }
}

/// One point of a record-count series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub snapshot_id: i64,
    pub uploaded_at: DateTime<Utc>,
    pub record_count: i64,
    /// Change against the previous point; 0 for the first
    pub delta: i64,
}

/// Split records by follow-back status, preserving input order
pub fn analyze_follow_status(records: &[RelationRecord]) -> FollowBreakdown {
    let mut breakdown = FollowBreakdown::default();
    for record in records {
        let bucket = match record.followed_by_owner {
            FollowFlag::Yes => &mut breakdown.mutual,
            FollowFlag::No => &mut breakdown.fans,
            FollowFlag::Unknown => &mut breakdown.unknown,
        };
        bucket.push(record.clone());
    }
    breakdown
}

/// Case-insensitive substring search on username and full name.
///
/// Results are sorted by username. A blank query matches nothing.
pub fn search_records<'a>(records: &'a [RelationRecord], query: &str) -> Vec<&'a RelationRecord> {
    let needle = query.trim().trim_start_matches('@').to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<&RelationRecord> = records
        .iter()
        .filter(|r| {
            r.username.to_lowercase().contains(&needle)
                || r.fullname.to_lowercase().contains(&needle)
        })
        .collect();
    hits.sort_by(|a, b| a.username.cmp(&b.username));
    hits
}

/// Build a growth series from snapshots ordered oldest first
pub fn growth_series(snapshots: &[Snapshot]) -> Vec<GrowthPoint> {
    let mut previous: Option<i64> = None;
    snapshots
        .iter()
        .map(|s| {
            let delta = previous.map_or(0, |p| s.record_count - p);
            previous = Some(s.record_count);
            GrowthPoint {
                snapshot_id: s.id,
                uploaded_at: s.uploaded_at,
                record_count: s.record_count,
                delta,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RelationKind;
    use chrono::TimeZone;

    fn follower(name: &str, flag: FollowFlag) -> RelationRecord {
        RelationRecord::new(name, RelationKind::Follower).with_followed_by_owner(flag)
    }

    fn snapshot(id: i64, count: i64) -> Snapshot {
        Snapshot {
            id,
            owner_id: 1,
            group_id: 0,
            uploaded_at: Utc.timestamp_millis_opt(1_700_000_000_000 + id).unwrap(),
            filename: format!("followers_{id}.csv"),
            record_count: count,
            relation_kind: RelationKind::Follower,
        }
    }

    #[test]
    fn test_breakdown_by_flag() {
        let records = vec![
            follower("alice", FollowFlag::Yes),
            follower("bob", FollowFlag::No),
            follower("carol", FollowFlag::Unknown),
            follower("dave", FollowFlag::No),
        ];
        let breakdown = analyze_follow_status(&records);
        assert_eq!(breakdown.mutual.len(), 1);
        assert_eq!(breakdown.fans.len(), 2);
        assert_eq!(breakdown.unknown.len(), 1);
        assert_eq!(breakdown.total(), 4);
        assert_eq!(breakdown.fans[1].username, "dave");
    }

    #[test]
    fn test_search_matches_username_and_fullname() {
        let records = vec![
            RelationRecord::new("zoe_art", RelationKind::Follower),
            RelationRecord::new("bob", RelationKind::Follower).with_fullname("Zoey Bob"),
            RelationRecord::new("carol", RelationKind::Follower),
        ];
        let hits: Vec<&str> = search_records(&records, "ZO")
            .iter()
            .map(|r| r.username.as_str())
            .collect();
        assert_eq!(hits, vec!["bob", "zoe_art"]);
    }

    #[test]
    fn test_search_blank_query() {
        let records = vec![RelationRecord::new("alice", RelationKind::Follower)];
        assert!(search_records(&records, "  ").is_empty());
        assert_eq!(search_records(&records, "@ali").len(), 1);
    }

    #[test]
    fn test_growth_series_deltas() {
        let series = growth_series(&[snapshot(1, 100), snapshot(2, 110), snapshot(3, 95)]);
        let deltas: Vec<i64> = series.iter().map(|p| p.delta).collect();
        assert_eq!(deltas, vec![0, 10, -15]);
        assert_eq!(series[2].record_count, 95);
        assert!(growth_series(&[]).is_empty());
    }
}
