//! Header-row detection for the supported export layouts

use serde::{Deserialize, Serialize};

/// Export layouts the normalizer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    /// Third-party follower export with a followed-by-you column
    IgFollow,
    /// The platform's own data download (username/href/timestamp)
    DataDownload,
    /// A bare list of usernames
    UsernameOnly,
}

const USERNAME: &[&str] = &["username", "user", "handle", "account", "value"];
const EXTERNAL_ID: &[&str] = &["userid", "id", "pk", "accountid"];
const FULLNAME: &[&str] = &["fullname", "name", "displayname"];
const FOLLOWED_BY: &[&str] = &[
    "followedbyyou",
    "followedbyviewer",
    "followedbyme",
    "followingback",
    "youfollow",
];
const VERIFIED: &[&str] = &["isverified", "verified"];
const PROFILE_URL: &[&str] = &["profileurl", "url", "href", "link", "profilelink"];
const TIMESTAMP: &[&str] = &["timestamp", "date", "followedat"];

/// Column positions resolved from a header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout {
    pub format: ExportFormat,
    pub username: usize,
    pub external_id: Option<usize>,
    pub fullname: Option<usize>,
    pub followed_by: Option<usize>,
    pub verified: Option<usize>,
    pub profile_url: Option<usize>,
}

/// Lower-case and keep ASCII alphanumerics only: "Followed by you" -> "followedbyyou"
fn canonical_header(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    // Alias order is priority order
    aliases
        .iter()
        .find_map(|alias| headers.iter().position(|h| h == alias))
}

impl HeaderLayout {
    /// Resolve columns from header cells. `None` when no username column exists.
    pub fn detect<'a, I>(header_cells: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let headers: Vec<String> = header_cells.into_iter().map(canonical_header).collect();

        let username = find_column(&headers, USERNAME)?;
        let followed_by = find_column(&headers, FOLLOWED_BY);
        let profile_url = find_column(&headers, PROFILE_URL);
        let has_timestamp = find_column(&headers, TIMESTAMP).is_some();

        let format = if followed_by.is_some() {
            ExportFormat::IgFollow
        } else if profile_url.is_some() || has_timestamp {
            ExportFormat::DataDownload
        } else {
            ExportFormat::UsernameOnly
        };

        Some(Self {
            format,
            username,
            external_id: find_column(&headers, EXTERNAL_ID),
            fullname: find_column(&headers, FULLNAME),
            followed_by,
            verified: find_column(&headers, VERIFIED),
            profile_url,
        })
    }
}
