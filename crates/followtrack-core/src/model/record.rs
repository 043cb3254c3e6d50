use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::TrackerError;

/// Three-valued flag carried by exports ("YES" / "NO" / blank)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FollowFlag {
    #[serde(rename = "YES")]
    Yes,
    #[serde(rename = "NO")]
    No,
    #[default]
    #[serde(rename = "")]
    Unknown,
}

impl FollowFlag {
    /// Canonical persisted text
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowFlag::Yes => "YES",
            FollowFlag::No => "NO",
            FollowFlag::Unknown => "",
        }
    }

    /// Lenient parse used on raw export cells.
    ///
    /// Never fails: anything unrecognised becomes `Unknown`.
    pub fn parse_loose(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "yes" | "y" | "true" | "1" | "✓" | "✔" => FollowFlag::Yes,
            "no" | "n" | "false" | "0" | "✗" | "✘" => FollowFlag::No,
            _ => FollowFlag::Unknown,
        }
    }

    /// Strict parse used when reading back from storage
    pub fn from_stored(value: &str) -> Result<Self, TrackerError> {
        match value {
            "YES" => Ok(FollowFlag::Yes),
            "NO" => Ok(FollowFlag::No),
            "" => Ok(FollowFlag::Unknown),
            other => Err(TrackerError::UnknownFlag {
                value: other.to_string(),
            }),
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, FollowFlag::Yes)
    }
}

/// Which list a snapshot (and its records) was captured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RelationKind {
    #[default]
    #[serde(rename = "followers")]
    Follower,
    #[serde(rename = "following")]
    Following,
}

impl RelationKind {
    /// Canonical persisted text
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Follower => "followers",
            RelationKind::Following => "following",
        }
    }
}

impl FromStr for RelationKind {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "followers" | "follower" => Ok(RelationKind::Follower),
            "following" | "followings" => Ok(RelationKind::Following),
            other => Err(TrackerError::UnknownRelationKind {
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One account relation inside a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationRecord {
    /// Platform account id; empty when the export does not carry one
    pub external_id: String,
    /// Case-preserving handle, never empty once normalized
    pub username: String,
    pub fullname: String,
    pub followed_by_owner: FollowFlag,
    pub is_verified: FollowFlag,
    pub profile_url: String,
    pub relation_kind: RelationKind,
}

impl RelationRecord {
    /// Create a record carrying only a username; other fields blank
    pub fn new(username: impl Into<String>, relation_kind: RelationKind) -> Self {
        Self {
            external_id: String::new(),
            username: username.into(),
            fullname: String::new(),
            followed_by_owner: FollowFlag::Unknown,
            is_verified: FollowFlag::Unknown,
            profile_url: String::new(),
            relation_kind,
        }
    }

    pub fn with_followed_by_owner(mut self, flag: FollowFlag) -> Self {
        self.followed_by_owner = flag;
        self
    }

    pub fn with_verified(mut self, flag: FollowFlag) -> Self {
        self.is_verified = flag;
        self
    }

    pub fn with_fullname(mut self, fullname: impl Into<String>) -> Self {
        self.fullname = fullname.into();
        self
    }

    /// Lower-cased username used for case-insensitive matching
    pub fn username_key(&self) -> String {
        self.username.to_lowercase()
    }
}
