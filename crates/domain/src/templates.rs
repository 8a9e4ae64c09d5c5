//! Message template library. Pure text assembly, no I/O.
//!
//! Every pin flows through one tagged context (`PinStyle` x optional note)
//! instead of a per-variant string builder; the literal wording of each
//! variant is preserved.

use crate::models::Role;

pub const WHAT_IS_SPOTLIGHT: &str =
    "^([What is Spotlight?](https://developers.reddit.com/apps/spotlight-app))\n\n";

pub const FEEDBACK_URL: &str = "https://reddit.com/message/compose?to=/r/paskapps&subject=Spotlight";

pub const INSTRUCTIONS_URL: &str =
    "https://www.reddit.com/r/paskapps/comments/1f8cmde/introducing_spotlight_an_app_that_allows_op_and/";

/// Markdown-escapes a username so that e.g. u/__test__ renders literally
/// instead of as italics.
pub fn escape_username(name: &str) -> String {
    name.replace('_', "\\_")
}

/// Re-quotes a comment body paragraph by paragraph, without the trailing
/// blank line.
pub fn quote_inline(body: &str) -> String {
    body.split("\n\n").collect::<Vec<_>>().join("\n\n> ")
}

/// Quoted block used in pinned-comment bodies.
pub fn quote_block(body: &str) -> String {
    if body.is_empty() {
        return "> [No content]\n\n".to_string();
    }
    format!("> {}\n\n", quote_inline(body))
}

pub fn logs_url(subreddit: &str) -> String {
    format!("https://reddit.com/r/{subreddit}/w/spotlight/logs")
}

pub fn config_url(subreddit: &str) -> String {
    format!("https://developers.reddit.com/r/{subreddit}/apps/spotlight-app")
}

/// Who is pinning, and how they appear in the produced texts.
#[derive(Debug, Clone)]
pub enum PinStyle {
    Op { op: String },
    Trusted {
        pinner: String,
        visible: bool,
        self_pin: bool,
    },
    Mod { moderator: String },
}

impl PinStyle {
    pub fn role(&self) -> Role {
        match self {
            PinStyle::Op { .. } => Role::OriginalPoster,
            PinStyle::Trusted { .. } => Role::TrustedUser,
            PinStyle::Mod { .. } => Role::Moderator,
        }
    }

    pub fn username(&self) -> &str {
        match self {
            PinStyle::Op { op } => op,
            PinStyle::Trusted { pinner, .. } => pinner,
            PinStyle::Mod { moderator } => moderator,
        }
    }
}

/// Everything the templates need for a single pin.
#[derive(Debug, Clone)]
pub struct PinContext {
    pub style: PinStyle,
    /// Target comment author, unescaped.
    pub author: String,
    pub comment_permalink: String,
    pub body: String,
    pub note: Option<String>,
    pub subreddit: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

/// The distinguished reply posted under the target's parent post.
pub fn pinned_comment_body(ctx: &PinContext) -> String {
    let author = escape_username(&ctx.author);
    let link = &ctx.comment_permalink;

    let mut out = match &ctx.style {
        PinStyle::Op { .. } => {
            format!("OP has pinned a [comment](https://reddit.com{link}) by u/{author}:\n\n")
        }
        PinStyle::Trusted {
            pinner,
            visible: true,
            self_pin: true,
        } => format!("u/{pinner} has pinned their own [comment](https://reddit.com{link}):\n\n"),
        PinStyle::Trusted {
            pinner,
            visible: true,
            self_pin: false,
        } => format!(
            "u/{pinner} has pinned a [comment](https://reddit.com{link}) by u/{author}:\n\n"
        ),
        PinStyle::Trusted { visible: false, .. } => {
            format!("Pinned [comment](https://reddit.com{link}) from u/{author}:\n\n")
        }
        PinStyle::Mod { .. } => {
            format!("Mods have pinned a [comment](https://reddit.com{link}) by u/{author}:\n\n")
        }
    };

    out.push_str(&quote_block(&ctx.body));

    if let Some(note) = &ctx.note {
        match ctx.style {
            PinStyle::Op { .. } => out.push_str(&format!("**Note from OP:** {note}\n\n")),
            _ => out.push_str(&format!("**Note:** {note}\n\n")),
        }
    }

    out.push_str(WHAT_IS_SPOTLIGHT);
    out
}

/// Private notification sent to the target comment's author.
/// `pinned_permalink` is the freshly created comment.
pub fn author_notification(ctx: &PinContext, pinned_permalink: &str) -> Notification {
    let author = escape_username(&ctx.author);
    let link = &ctx.comment_permalink;
    let hello = format!("Hello u/{author},\n\n");

    let (subject, mut body) = match &ctx.style {
        PinStyle::Op { op } => (
            "Your comment has been pinned by OP".to_string(),
            format!(
                "{hello}We would like to inform you that your [comment](https://reddit.com{link}) has been pinned by OP (u/{op}).\n\n"
            ),
        ),
        PinStyle::Trusted {
            pinner,
            visible: true,
            ..
        } => (
            "Your comment has been pinned".to_string(),
            format!(
                "{hello}We would like to inform you that your [comment](https://reddit.com{link}) has been pinned by u/{pinner}.\n\n"
            ),
        ),
        PinStyle::Trusted { visible: false, .. } => (
            "Your comment has been pinned".to_string(),
            format!(
                "{hello}We would like to inform you that your [comment](https://reddit.com{link}) has been pinned by a trusted user.\n\n"
            ),
        ),
        PinStyle::Mod { .. } => (
            "Your comment has been pinned by moderators".to_string(),
            format!(
                "{hello}We would like to inform you that your [comment](https://reddit.com{link}) has been pinned by moderators.\n\n"
            ),
        ),
    };

    if let Some(note) = &ctx.note {
        let label = match ctx.style {
            PinStyle::Op { .. } => "**Note from OP:**",
            PinStyle::Trusted { .. } => "**Note:**",
            PinStyle::Mod { .. } => "**Note from mods:**",
        };
        body.push_str(&format!("{label}\n\n> {note}\n\n"));
    }

    body.push_str(&format!(
        "You can view pinned comment [here]({pinned_permalink}).\n\n"
    ));
    body.push_str(&format!(
        "Thanks for contributing!\n\n~ r/{} Mod Team\n\n",
        ctx.subreddit
    ));

    Notification { subject, body }
}

/// Moderator-facing notice. Notes are deliberately not included here.
pub fn mod_notice(ctx: &PinContext) -> Notification {
    let author = escape_username(&ctx.author);
    let link = &ctx.comment_permalink;
    let username = ctx.style.username();

    let headline = match &ctx.style {
        PinStyle::Op { .. } => format!(
            "**{username} (OP)** has pinned the [comment](https://reddit.com{link}) by u/{author}.\n\n"
        ),
        PinStyle::Trusted { .. } => format!(
            "**{username} (trusted user)** has pinned [a comment](https://reddit.com{link}) by u/{author}.\n\n"
        ),
        PinStyle::Mod { .. } => format!(
            "**{username} (mod)** has pinned the [comment](https://reddit.com{link}) by u/{author}.\n\n"
        ),
    };

    let body = format!(
        "{headline}[Recent uses]({}) | [Config]({}) | [Feedback]({FEEDBACK_URL})\n\n",
        logs_url(&ctx.subreddit),
        config_url(&ctx.subreddit)
    );

    Notification {
        subject: format!("{username} has used Spotlight"),
        body,
    }
}

// -----------------------------------------------------
//  Install / upgrade modmail bodies
// -----------------------------------------------------

pub fn install_message(subreddit: &str) -> String {
    let mut msg = format!("Hello r/{subreddit} mods,\n\n");
    msg.push_str("Thanks for installing Spotlight!\n\n");
    msg.push_str(
        "This intuitive tool allows your trusted users and OPs to pin comments from other users.\n\n",
    );
    msg.push_str(
        "Users can write comments through a simple form and mods are able to pin user's comments by clicking \"Pin that comment\".\n\n",
    );
    msg.push_str(&format!(
        "You can set a list of trusted users [here]({}).\n\n",
        config_url(subreddit)
    ));
    msg.push_str(&format!(
        "[Instructions]({INSTRUCTIONS_URL}) | [Recent uses]({}) | [Contact]({FEEDBACK_URL})\n\n\n",
        logs_url(subreddit)
    ));
    msg
}

pub fn upgrade_message(subreddit: &str) -> String {
    let mut msg = format!("Hello r/{subreddit} mods,\n\n");
    msg.push_str(&format!(
        "You're receiving this message because **Spotlight** has just been updated on r/{subreddit}.\n\n"
    ));
    msg.push_str(&format!(
        "Thank you for using Spotlight. If you have any suggestions or feedback, you can reach us [here]({FEEDBACK_URL}).\n\n"
    ));
    msg
}

/// Wiki index page written on install/upgrade.
pub fn wiki_index_page(subreddit: &str) -> String {
    let mut page = String::new();
    page.push_str(&format!("* [Instructions]({INSTRUCTIONS_URL})\n\n"));
    page.push_str(&format!("* [Config]({})\n\n", config_url(subreddit)));
    page.push_str(&format!("* [Logs]({})\n\n", logs_url(subreddit)));
    page.push_str(&format!("* [Contact]({FEEDBACK_URL})\n\n"));
    page.push_str("---\n\n");
    page
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(style: PinStyle, note: Option<&str>) -> PinContext {
        PinContext {
            style,
            author: "carol".to_string(),
            comment_permalink: "/r/test/comments/abc/x/def".to_string(),
            body: "great insight".to_string(),
            note: note.map(str::to_string),
            subreddit: "test".to_string(),
        }
    }

    #[test]
    fn username_escaping() {
        assert_eq!(escape_username("__test__"), "\\_\\_test\\_\\_");
        assert_eq!(escape_username("plain"), "plain");
    }

    #[test]
    fn quote_block_handles_empty_and_multi_paragraph() {
        assert_eq!(quote_block(""), "> [No content]\n\n");
        assert_eq!(quote_block("a\n\nb"), "> a\n\n> b\n\n");
    }

    #[test]
    fn op_pin_with_note() {
        let c = ctx(
            PinStyle::Op {
                op: "alice".to_string(),
            },
            Some("great point"),
        );
        let body = pinned_comment_body(&c);
        assert!(body.starts_with("OP has pinned a [comment]"));
        assert!(body.contains("**Note from OP:** great point"));
        assert!(body.ends_with(WHAT_IS_SPOTLIGHT));
    }

    #[test]
    fn anonymous_trusted_pin_without_note() {
        let c = ctx(
            PinStyle::Trusted {
                pinner: "bob".to_string(),
                visible: false,
                self_pin: false,
            },
            None,
        );
        let body = pinned_comment_body(&c);
        assert!(body.starts_with("Pinned [comment]"));
        assert!(body.contains("from u/carol"));
        assert!(!body.contains("bob"));
        assert!(!body.contains("**Note"));

        let n = author_notification(&c, "/r/test/comments/abc/x/new");
        assert!(n.body.starts_with("Hello u/carol"));
        assert!(n.body.contains("pinned by a trusted user"));
        assert!(!n.body.contains("bob"));
    }

    #[test]
    fn visible_self_pin_wording() {
        let mut c = ctx(
            PinStyle::Trusted {
                pinner: "carol".to_string(),
                visible: true,
                self_pin: true,
            },
            None,
        );
        c.author = "carol".to_string();
        let body = pinned_comment_body(&c);
        assert!(body.starts_with("u/carol has pinned their own [comment]"));
    }

    #[test]
    fn mod_pin_variants() {
        let c = ctx(
            PinStyle::Mod {
                moderator: "modzilla".to_string(),
            },
            Some("context"),
        );
        let body = pinned_comment_body(&c);
        assert!(body.starts_with("Mods have pinned a [comment]"));
        assert!(body.contains("**Note:** context"));

        let n = author_notification(&c, "/pin");
        assert_eq!(n.subject, "Your comment has been pinned by moderators");
        assert!(n.body.contains("**Note from mods:**\n\n> context"));
        assert!(n.body.contains("~ r/test Mod Team"));
    }

    #[test]
    fn mod_notice_never_contains_the_note() {
        let c = ctx(
            PinStyle::Op {
                op: "alice".to_string(),
            },
            Some("secret note"),
        );
        let n = mod_notice(&c);
        assert_eq!(n.subject, "alice has used Spotlight");
        assert!(n.body.starts_with("**alice (OP)** has pinned the [comment]"));
        assert!(!n.body.contains("secret note"));
        assert!(n.body.contains("[Recent uses](https://reddit.com/r/test/w/spotlight/logs)"));
    }

    #[test]
    fn install_texts_link_the_instructions_post() {
        let msg = install_message("test");
        assert!(msg.contains(&format!(
            "[Instructions]({INSTRUCTIONS_URL}) | [Recent uses]("
        )));

        let page = wiki_index_page("test");
        assert!(page.starts_with(&format!("* [Instructions]({INSTRUCTIONS_URL})\n\n")));
        assert!(page.contains("* [Logs]("));
    }

    #[test]
    fn trusted_notice_uses_indefinite_article() {
        let c = ctx(
            PinStyle::Trusted {
                pinner: "bob".to_string(),
                visible: false,
                self_pin: false,
            },
            None,
        );
        let n = mod_notice(&c);
        assert!(n
            .body
            .starts_with("**bob (trusted user)** has pinned [a comment]"));
    }
}
