//! Audit log entry formatting.
//!
//! Entries are plain markdown blocks appended to a per-subreddit wiki page.
//! Successful pins lead with ✅, denied attempts with ⛔; nothing is ever
//! rewritten or removed.

use chrono::{DateTime, FixedOffset, Utc};

use crate::models::Role;
use crate::templates::{escape_username, quote_inline};

/// Wiki page holding the append-only log.
pub const LOG_PAGE: &str = "spotlight/logs";
/// Wiki index page written on install/upgrade.
pub const INDEX_PAGE: &str = "spotlight";
/// Change reason recorded with every log write.
pub const LOG_REASON: &str = "Logs updated";

/// Timestamps carry a fixed UTC+1 offset labelled CET, matching the log's
/// historical format. No DST handling.
pub fn cet_timestamp(at: DateTime<Utc>) -> String {
    let offset = FixedOffset::east_opt(3600).unwrap();
    at.with_timezone(&offset)
        .format("%Y-%m-%d %H:%M:%S CET")
        .to_string()
}

/// Lifecycle entries historically used UTC+2 labelled CEST.
pub fn cest_timestamp(at: DateTime<Utc>) -> String {
    let offset = FixedOffset::east_opt(7200).unwrap();
    at.with_timezone(&offset)
        .format("%Y-%m-%d %H:%M:%S CEST")
        .to_string()
}

/// Everything recorded about a fulfilled pin.
#[derive(Debug, Clone)]
pub struct PinRecord<'a> {
    pub role: Role,
    pub username: &'a str,
    pub author: &'a str,
    pub comment_permalink: &'a str,
    pub pinned_permalink: &'a str,
    pub body: &'a str,
    pub note: Option<&'a str>,
}

pub fn success_entry(at: DateTime<Utc>, rec: &PinRecord<'_>) -> String {
    let author = escape_username(rec.author);
    let mut entry = format!(
        "✅ {} - u/{} ({}) pinned [this comment](https://reddit.com{}) by u/{author}.\n\n",
        cet_timestamp(at),
        rec.username,
        rec.role.label(),
        rec.comment_permalink,
    );
    entry.push_str(&format!(
        "**Content** ([link]({})):\n\n> {}\n\n",
        rec.pinned_permalink,
        quote_inline(rec.body),
    ));
    if let Some(note) = rec.note {
        match rec.role {
            Role::OriginalPoster => entry.push_str(&format!("**Note from OP:** {note}\n\n")),
            _ => entry.push_str(&format!("**Note:** {note}\n\n")),
        }
    }
    entry.push_str("---\n\n");
    entry
}

pub fn denial_entry(
    at: DateTime<Utc>,
    username: &str,
    author: &str,
    comment_permalink: &str,
) -> String {
    format!(
        "⛔ {} - u/{username} attempted to pin [this comment](https://reddit.com{comment_permalink}) by u/{}. **Reason**: NOT_A_TRUSTED_USER\n\n---\n\n",
        cet_timestamp(at),
        escape_username(author),
    )
}

pub fn install_entry(at: DateTime<Utc>) -> String {
    format!("App installed on {}.\n\n\n---\n\n", cest_timestamp(at))
}

pub fn upgrade_entry(at: DateTime<Utc>) -> String {
    format!("App updated on {}.\n\n\n---\n\n", cest_timestamp(at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn cet_is_utc_plus_one() {
        assert_eq!(cet_timestamp(at()), "2024-03-01 13:00:00 CET");
    }

    #[test]
    fn cest_is_utc_plus_two() {
        assert_eq!(cest_timestamp(at()), "2024-03-01 14:00:00 CEST");
    }

    #[test]
    fn success_entry_contains_both_permalinks_and_note() {
        let rec = PinRecord {
            role: Role::TrustedUser,
            username: "bob",
            author: "carol",
            comment_permalink: "/r/test/comments/abc/x/def",
            pinned_permalink: "/r/test/comments/abc/x/new",
            body: "first\n\nsecond",
            note: Some("context"),
        };
        let entry = success_entry(at(), &rec);
        assert!(entry.starts_with("✅ 2024-03-01 13:00:00 CET - u/bob (trusted user) pinned"));
        assert!(entry.contains("https://reddit.com/r/test/comments/abc/x/def"));
        assert!(entry.contains("[link](/r/test/comments/abc/x/new)"));
        assert!(entry.contains("> first\n\n> second"));
        assert!(entry.contains("**Note:** context"));
        assert!(entry.ends_with("---\n\n"));
    }

    #[test]
    fn op_note_uses_op_label() {
        let rec = PinRecord {
            role: Role::OriginalPoster,
            username: "alice",
            author: "carol",
            comment_permalink: "/c",
            pinned_permalink: "/p",
            body: "text",
            note: Some("great point"),
        };
        assert!(success_entry(at(), &rec).contains("**Note from OP:** great point"));
    }

    #[test]
    fn denial_entry_has_leading_marker_and_reason() {
        let entry = denial_entry(at(), "mallory", "carol", "/r/test/comments/abc/x/def");
        assert!(entry.starts_with("⛔ "));
        assert!(entry.contains("u/mallory attempted to pin"));
        assert!(entry.contains("**Reason**: NOT_A_TRUSTED_USER"));
        assert!(entry.ends_with("---\n\n"));
    }
}
