#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Runs the built binary against a temporary store.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const WEEK_ONE: &str = "\
User ID,Username,Fullname,Followed by you,Is Verified,Profile URL
1,alice,Alice A,YES,NO,https://instagram.com/alice
2,bob,Bob B,NO,NO,https://instagram.com/bob
3,carol,Carol C,NO,YES,https://instagram.com/carol
";

const WEEK_TWO: &str = "\
User ID,Username,Fullname,Followed by you,Is Verified,Profile URL
1,alice,Alice A,YES,NO,https://instagram.com/alice
3,carol,Carol C,NO,YES,https://instagram.com/carol
4,dave,Dave D,NO,NO,https://instagram.com/dave
";

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn db(&self) -> PathBuf {
        self.dir.path().join("store").join("follower_data.db")
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_followtrack"))
            .current_dir(self.dir.path())
            .env_remove("DATABASE_PATH")
            .env_remove("FOLLOWTRACK_OWNER_ID")
            .env_remove("FOLLOWTRACK_GROUP_ID")
            .env_remove("FOLLOWTRACK_LOG_FORMAT")
            .env_remove("RUST_LOG")
            .args(args)
            .arg("--db")
            .arg(self.db())
            .arg("--owner")
            .arg("42")
            .output()
            .unwrap()
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "{:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }

    fn upload(&self, path: &Path) -> String {
        self.run_ok(&["upload", path.to_str().unwrap()])
    }
}

#[test]
fn test_upload_then_changes() {
    let ws = Workspace::new();
    let first = ws.write("IGFollow_me_3_followers.csv", WEEK_ONE);
    let second = ws.write("followers_2.csv", WEEK_TWO);

    let out = ws.upload(&first);
    assert!(out.contains("Stored snapshot #1"));
    assert!(out.contains("nothing to compare yet"));
    assert!(ws.db().exists());

    let out = ws.upload(&second);
    assert!(out.contains("Stored snapshot #2"));
    assert!(out.contains("- **New** (+1): @dave"));
    assert!(out.contains("- **Lost** (-1): @bob"));

    let out = ws.run_ok(&["changes"]);
    assert!(out.contains("**Net change**: 0"));

    let out = ws.run_ok(&["history"]);
    let ids: Vec<&str> = out
        .lines()
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    assert_eq!(ids, vec!["#2", "#1"]);
}

#[test]
fn test_json_output() {
    let ws = Workspace::new();
    let first = ws.write("IGFollow_me_3_followers.csv", WEEK_ONE);
    let second = ws.write("followers_2.csv", WEEK_TWO);
    ws.upload(&first);
    ws.upload(&second);

    let out = ws.run_ok(&["compare", "1", "2", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["gained_count"], 1);
    assert_eq!(value["lost_count"], 1);
    assert_eq!(value["gained"][0]["username"], "dave");

    let out = ws.run_ok(&["nonfollowers", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["total"], 2);

    let out = ws.run_ok(&["trend", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[1]["delta"], 0);
}

#[test]
fn test_empty_store_messages() {
    let ws = Workspace::new();
    assert!(ws.run_ok(&["history"]).contains("No uploads yet"));
    assert!(ws.run_ok(&["stats"]).contains("No uploads yet"));
    assert!(ws.run_ok(&["changes"]).contains("Need at least two"));
    assert!(ws.run_ok(&["search", "ali"]).contains("No follower upload yet"));
}

#[test]
fn test_unreadable_upload_stores_nothing() {
    let ws = Workspace::new();
    let junk = ws.write("notes.csv", "");
    let out = ws.upload(&junk);
    assert!(out.contains("Could not read any accounts"));
    assert!(ws.run_ok(&["history"]).contains("No uploads yet"));
}

#[test]
fn test_missing_file_fails() {
    let ws = Workspace::new();
    let output = ws.run(&["upload", "does_not_exist.csv"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error:"));
}

#[test]
fn test_requested_flow() {
    let ws = Workspace::new();
    let out = ws.run_ok(&["requested", "add", "@Dave", "zed", "dave", "--note", "sent"]);
    assert!(out.contains("Added 2 username(s)"));
    assert!(out.contains("Skipped 1"));

    let out = ws.run_ok(&["requested", "check"]);
    assert!(out.contains("No follower upload yet"));

    let second = ws.write("IGFollow_me_3_followers.csv", WEEK_TWO);
    ws.upload(&second);
    let out = ws.run_ok(&["requested", "check"]);
    assert!(out.contains("@dave"));
    assert!(!out.contains("@zed"));

    let out = ws.run_ok(&["requested", "count", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["count"], 2);

    let out = ws.run_ok(&["requested", "note", " @DAVE ", "followed back"]);
    assert!(out.contains("Updated note for @dave"));

    let output = ws.run(&["requested", "note", "@Nobody", "hi"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("@nobody is not tracked"));

    ws.run_ok(&["requested", "clear"]);
    assert!(ws.run_ok(&["requested", "list"]).contains("No tracked follow requests"));
}

#[test]
fn test_upload_kind_flag_overrides_filename() {
    let ws = Workspace::new();
    let first = ws.write("export.csv", WEEK_ONE);
    let second = ws.write("export_later.csv", WEEK_TWO);

    let out = ws.run_ok(&["upload", first.to_str().unwrap(), "--kind", "following"]);
    assert!(out.contains("(following)"));
    let out = ws.run_ok(&["upload", second.to_str().unwrap(), "--kind", "following"]);
    assert!(out.contains("## Following Changes"));

    assert!(ws.run_ok(&["changes"]).contains("Need at least two followers uploads"));
    let out = ws.run_ok(&["changes", "--kind", "following"]);
    assert!(out.starts_with("## Following Changes"));
    assert!(out.contains("@dave"));

    let output = ws.run(&["upload", first.to_str().unwrap(), "--kind", "friends"]);
    assert!(!output.status.success());
}

#[test]
fn test_demo_populates_store() {
    let ws = Workspace::new();
    let out = ws.run_ok(&["demo"]);
    assert!(out.contains("Stored snapshot #1 (followers)"));
    assert!(out.contains("Account:   @demo"));

    let out = ws.run_ok(&["nonfollowers", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["total"], 4);
}
