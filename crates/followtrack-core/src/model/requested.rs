use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A manually tracked outstanding follow request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedEntry {
    pub owner_id: i64,
    pub group_id: i64,
    /// Always in normalized form (see [`normalize_username`])
    pub username: String,
    pub added_at: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Normalize a user-typed handle for the requested list.
///
/// Trims whitespace, strips leading `@` characters and lower-cases.
/// Returns `None` when nothing is left.
pub fn normalize_username(raw: &str) -> Option<String> {
    let normalized = raw.trim().trim_start_matches('@').trim().to_lowercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_username() {
        assert_eq!(normalize_username("@Alice"), Some("alice".to_string()));
        assert_eq!(normalize_username("bob "), Some("bob".to_string()));
        assert_eq!(normalize_username("  @@Carol_X "), Some("carol_x".to_string()));
    }

    #[test]
    fn test_normalize_username_empty() {
        assert_eq!(normalize_username(""), None);
        assert_eq!(normalize_username("   "), None);
        assert_eq!(normalize_username("@"), None);
    }
}
