//! Human-readable summary renderer for snapshot comparisons.

use crate::diff::model::ComparisonResult;
use crate::model::{RelationKind, RelationRecord};

/// Render a Markdown/text summary of a [`ComparisonResult`].
///
/// `kind` is the list both snapshots were taken from and only picks the
/// heading. At most `max_names` usernames are listed per side; the remainder
/// is shown as "(+N more)".
pub fn render_change_summary(
    result: &ComparisonResult,
    kind: RelationKind,
    max_names: usize,
) -> String {
    let mut out = String::new();

    let heading = match kind {
        RelationKind::Follower => "Follower",
        RelationKind::Following => "Following",
    };
    out.push_str(&format!("## {heading} Changes\n\n"));
    out.push_str(&format!(
        "**Before**: {}  \n**After**: {}  \n**Net change**: {}\n\n",
        result.old_total,
        result.new_total,
        signed(result.net_change)
    ));

    if result.gained.is_empty() && result.lost.is_empty() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    if !result.gained.is_empty() {
        out.push_str(&format!(
            "- **New** (+{}): {}\n",
            result.gained_count,
            name_list(&result.gained, max_names)
        ));
    }
    if !result.lost.is_empty() {
        out.push_str(&format!(
            "- **Lost** (-{}): {}\n",
            result.lost_count,
            name_list(&result.lost, max_names)
        ));
    }

    out
}

fn signed(n: i64) -> String {
    if n > 0 {
        format!("+{n}")
    } else {
        n.to_string()
    }
}

fn name_list(records: &[RelationRecord], max_names: usize) -> String {
    let mut names = records
        .iter()
        .take(max_names)
        .map(|r| format!("@{}", r.username))
        .collect::<Vec<_>>()
        .join(", ");
    let hidden = records.len().saturating_sub(max_names);
    if hidden > 0 {
        if names.is_empty() {
            names = format!("{hidden} accounts");
        } else {
            names.push_str(&format!(" (+{hidden} more)"));
        }
    }
    names
}
