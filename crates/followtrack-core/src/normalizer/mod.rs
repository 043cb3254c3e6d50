//! CSV export normalizer.
//!
//! Turns raw export bytes into canonical [`RelationRecord`]s plus summary
//! counts. Parsing never fails: unusable input produces an empty
//! [`ParsedExport`], and individual bad rows are skipped and counted.
//!
//! ## Duplicate usernames
//!
//! When a username occurs more than once in one file (compared
//! case-insensitively), the **last** row wins. The surviving record keeps the
//! position of the first occurrence so output order follows the file.

pub mod filename;
pub mod layout;

use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::model::{FollowFlag, RelationKind, RelationRecord};

pub use filename::{parse_filename, FilenameInfo};
pub use layout::{ExportFormat, HeaderLayout};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Summary counts for one parsed export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Number of records produced (after de-duplication)
    pub total: usize,
    /// Records the owner follows back (mutuals)
    pub following_back: usize,
    /// Records the owner does not follow back (fans)
    pub not_following_back: usize,
    pub verified: usize,
    pub account_handle: Option<String>,
    /// Count embedded in the filename by the exporter, if any
    pub declared_count: Option<u32>,
    pub relation_kind: RelationKind,
    /// `None` when the header could not be recognised
    pub format: Option<ExportFormat>,
    pub skipped_rows: usize,
    pub duplicate_rows: usize,
}

/// Normalizer output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedExport {
    pub records: Vec<RelationRecord>,
    pub metadata: ExportMetadata,
}

impl ParsedExport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Force the relation kind, overriding whatever the filename implied
    pub fn with_relation_kind(mut self, kind: RelationKind) -> Self {
        self.metadata.relation_kind = kind;
        for record in &mut self.records {
            record.relation_kind = kind;
        }
        self
    }
}

fn cell(row: &csv::StringRecord, column: Option<usize>) -> &str {
    column.and_then(|i| row.get(i)).unwrap_or("").trim()
}

fn build_record(
    row: &csv::StringRecord,
    layout: &HeaderLayout,
    relation_kind: RelationKind,
) -> Option<RelationRecord> {
    let username = cell(row, Some(layout.username))
        .trim_start_matches('@')
        .trim();
    if username.is_empty() {
        return None;
    }

    Some(RelationRecord {
        external_id: cell(row, layout.external_id).to_string(),
        username: username.to_string(),
        fullname: cell(row, layout.fullname).to_string(),
        followed_by_owner: FollowFlag::parse_loose(cell(row, layout.followed_by)),
        is_verified: FollowFlag::parse_loose(cell(row, layout.verified)),
        profile_url: cell(row, layout.profile_url).to_string(),
        relation_kind,
    })
}

/// Parse an export file.
///
/// `filename` is optional; when present it contributes the account handle and
/// relation kind (see [`parse_filename`]). Without a derivable kind the export
/// is treated as a followers list.
pub fn parse_export(bytes: &[u8], filename: Option<&str>) -> ParsedExport {
    let file_info = filename.map(parse_filename).unwrap_or_default();
    let relation_kind = file_info.relation_kind.unwrap_or_default();

    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = String::from_utf8_lossy(body);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let layout = match reader.headers() {
        Ok(headers) => match HeaderLayout::detect(headers.iter()) {
            Some(layout) => layout,
            None => {
                tracing::debug!(filename = ?filename, "Export header has no username column");
                return ParsedExport::default();
            }
        },
        Err(e) => {
            tracing::debug!(filename = ?filename, error = %e, "Export header unreadable");
            return ParsedExport::default();
        }
    };

    let mut records: Vec<RelationRecord> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut skipped_rows = 0;
    let mut duplicate_rows = 0;

    for row in reader.records() {
        let record = match row {
            Ok(row) => build_record(&row, &layout, relation_kind),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping undecodable export row");
                None
            }
        };
        let Some(record) = record else {
            skipped_rows += 1;
            continue;
        };

        match positions.entry(record.username_key()) {
            Entry::Occupied(slot) => {
                duplicate_rows += 1;
                records[*slot.get()] = record;
            }
            Entry::Vacant(slot) => {
                slot.insert(records.len());
                records.push(record);
            }
        }
    }

    if records.is_empty() {
        return ParsedExport::default();
    }

    let metadata = ExportMetadata {
        total: records.len(),
        following_back: records
            .iter()
            .filter(|r| r.followed_by_owner == FollowFlag::Yes)
            .count(),
        not_following_back: records
            .iter()
            .filter(|r| r.followed_by_owner == FollowFlag::No)
            .count(),
        verified: records.iter().filter(|r| r.is_verified.is_yes()).count(),
        account_handle: file_info.account_handle,
        declared_count: file_info.declared_count,
        relation_kind,
        format: Some(layout.format),
        skipped_rows,
        duplicate_rows,
    };

    tracing::debug!(
        total = metadata.total,
        skipped_rows,
        duplicate_rows,
        format = ?layout.format,
        "Parsed export"
    );

    ParsedExport { records, metadata }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IGFOLLOW_CSV: &str = "\
User ID,Username,Fullname,Followed by you,Is Verified,Profile URL
101,alice,Alice A,YES,NO,https://instagram.com/alice
102,bob,Bob B,NO,YES,https://instagram.com/bob
103,carol,,no,,https://instagram.com/carol
";

    #[test]
    fn test_parse_igfollow_export() {
        let parsed = parse_export(
            IGFOLLOW_CSV.as_bytes(),
            Some("IGFollow_owner_3_followers.csv"),
        );
        assert_eq!(parsed.records.len(), 3);
        assert_eq!(parsed.metadata.total, 3);
        assert_eq!(parsed.metadata.following_back, 1);
        assert_eq!(parsed.metadata.not_following_back, 2);
        assert_eq!(parsed.metadata.verified, 1);
        assert_eq!(parsed.metadata.account_handle.as_deref(), Some("owner"));
        assert_eq!(parsed.metadata.declared_count, Some(3));
        assert_eq!(parsed.metadata.format, Some(ExportFormat::IgFollow));

        let bob = &parsed.records[1];
        assert_eq!(bob.external_id, "102");
        assert_eq!(bob.fullname, "Bob B");
        assert_eq!(bob.followed_by_owner, FollowFlag::No);
        assert_eq!(bob.is_verified, FollowFlag::Yes);
        assert_eq!(bob.relation_kind, RelationKind::Follower);
    }

    #[test]
    fn test_kind_taken_from_filename() {
        let parsed = parse_export(IGFOLLOW_CSV.as_bytes(), Some("IGFollow_owner_3_following.csv"));
        assert_eq!(parsed.metadata.relation_kind, RelationKind::Following);
        assert!(parsed
            .records
            .iter()
            .all(|r| r.relation_kind == RelationKind::Following));
    }

    #[test]
    fn test_explicit_kind_overrides_filename() {
        let parsed = parse_export(IGFOLLOW_CSV.as_bytes(), Some("IGFollow_owner_3_followers.csv"))
            .with_relation_kind(RelationKind::Following);
        assert_eq!(parsed.metadata.relation_kind, RelationKind::Following);
        assert_eq!(parsed.metadata.account_handle.as_deref(), Some("owner"));
        assert!(parsed
            .records
            .iter()
            .all(|r| r.relation_kind == RelationKind::Following));
    }

    #[test]
    fn test_bom_and_at_prefix_stripped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"Username\n@dave\n eve \n");
        let parsed = parse_export(&bytes, None);
        let names: Vec<&str> = parsed.records.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, vec!["dave", "eve"]);
        assert_eq!(parsed.metadata.format, Some(ExportFormat::UsernameOnly));
    }

    #[test]
    fn test_blank_usernames_skipped() {
        let csv = "Username,Followed by you\nalice,YES\n,NO\n@,NO\nbob,NO\n";
        let parsed = parse_export(csv.as_bytes(), None);
        assert_eq!(parsed.metadata.total, 2);
        assert_eq!(parsed.metadata.skipped_rows, 2);
    }

    #[test]
    fn test_short_rows_tolerated() {
        let csv = "Username,Fullname,Followed by you\nalice\nbob,Bob,YES\n";
        let parsed = parse_export(csv.as_bytes(), None);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].followed_by_owner, FollowFlag::Unknown);
        assert_eq!(parsed.records[1].followed_by_owner, FollowFlag::Yes);
    }

    #[test]
    fn test_unrecognised_header_is_empty() {
        let parsed = parse_export(b"foo,bar\n1,2\n", Some("followers.csv"));
        assert!(parsed.is_empty());
        assert_eq!(parsed.metadata, ExportMetadata::default());
    }

    #[test]
    fn test_empty_and_garbage_input() {
        assert!(parse_export(b"", None).is_empty());
        assert!(parse_export(&[0xFF, 0xFE, 0x00, 0x01], None).is_empty());
    }

    #[test]
    fn test_header_only_is_empty() {
        let parsed = parse_export(b"Username,Followed by you\n", None);
        assert!(parsed.is_empty());
        assert_eq!(parsed.metadata.total, 0);
    }
}
