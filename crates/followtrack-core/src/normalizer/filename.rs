//! Export filename conventions
//!
//! Third-party exporters name files `IGFollow_<handle>_<count>_<kind>.csv`,
//! where the handle may itself contain underscores. The platform's own data
//! download uses names such as `followers_1.csv` or `following.csv`.

use serde::{Deserialize, Serialize};

use crate::model::RelationKind;

const IGFOLLOW_PREFIX: &str = "igfollow_";

/// What could be read off an export's filename
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilenameInfo {
    pub account_handle: Option<String>,
    pub declared_count: Option<u32>,
    pub relation_kind: Option<RelationKind>,
}

/// Extract handle, count and relation kind from an export filename.
///
/// Any path prefix and the `.csv` extension are ignored. Fields that cannot be
/// derived are left as `None`.
pub fn parse_filename(name: &str) -> FilenameInfo {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name).trim();
    let stem = strip_csv_extension(base);

    if let Some(rest) = strip_prefix_ignore_case(stem, IGFOLLOW_PREFIX) {
        return parse_igfollow_stem(rest);
    }

    FilenameInfo {
        relation_kind: kind_from_words(stem),
        ..FilenameInfo::default()
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}

fn strip_csv_extension(base: &str) -> &str {
    let split = base.len().saturating_sub(4);
    match (base.get(..split), base.get(split..)) {
        (Some(stem), Some(ext)) if ext.eq_ignore_ascii_case(".csv") => stem,
        _ => base,
    }
}

fn token_kind(token: &str) -> Option<RelationKind> {
    match token.to_lowercase().as_str() {
        "followers" | "follower" => Some(RelationKind::Follower),
        "following" | "followings" => Some(RelationKind::Following),
        _ => None,
    }
}

/// `<handle>_<count>_<kind>`, with count and kind each optional from the right
fn parse_igfollow_stem(rest: &str) -> FilenameInfo {
    let mut tokens: Vec<&str> = rest.split('_').collect();

    let relation_kind = tokens.last().and_then(|t| token_kind(t));
    if relation_kind.is_some() {
        tokens.pop();
    }

    let declared_count = tokens.last().and_then(|t| t.parse::<u32>().ok());
    if declared_count.is_some() {
        tokens.pop();
    }

    let handle = tokens.join("_");
    FilenameInfo {
        account_handle: if handle.is_empty() { None } else { Some(handle) },
        declared_count,
        relation_kind,
    }
}

/// Pick whichever of "follower"/"following" appears last in the name
fn kind_from_words(stem: &str) -> Option<RelationKind> {
    let lower = stem.to_lowercase();
    let following = lower.rfind("following");
    // "followers" and "follower" both start with "follower"
    let follower = lower.rfind("follower");

    match (follower, following) {
        (Some(a), Some(b)) if a > b => Some(RelationKind::Follower),
        (_, Some(_)) => Some(RelationKind::Following),
        (Some(_), None) => Some(RelationKind::Follower),
        (None, None) => None,
    }
}
