use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidSubredditName {
    #[error("Subreddit name cannot be empty.")]
    Empty,
    #[error("Subreddit name contains invalid characters.")]
    InvalidCharacters,
    #[error("Subreddit name is too long (max 24 chars).")]
    TooLong,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubredditName(String);

impl SubredditName {
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidSubredditName> {
        let s = s.into();
        if s.is_empty() {
            return Err(InvalidSubredditName::Empty);
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(InvalidSubredditName::InvalidCharacters);
        }
        if s.len() > 24 {
            return Err(InvalidSubredditName::TooLong);
        }
        Ok(Self(s))
    }

    pub fn new_unchecked(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubredditName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Moderator permission flags as exposed by the platform. Only `posts` and
/// `all` grant pinning rights; everything else is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModPermission {
    All,
    Posts,
    Other(String),
}

impl From<String> for ModPermission {
    fn from(s: String) -> Self {
        match s.as_str() {
            "all" => Self::All,
            "posts" => Self::Posts,
            _ => Self::Other(s),
        }
    }
}

impl From<ModPermission> for String {
    fn from(p: ModPermission) -> Self {
        match p {
            ModPermission::All => "all".to_string(),
            ModPermission::Posts => "posts".to_string(),
            ModPermission::Other(s) => s,
        }
    }
}

/// The user invoking the pin action, resolved per invocation.
#[derive(Debug, Clone)]
pub struct Actor {
    pub username: String,
    pub mod_permissions: Vec<ModPermission>,
}

impl Actor {
    pub fn can_moderate_posts(&self) -> bool {
        self.mod_permissions
            .iter()
            .any(|p| matches!(p, ModPermission::All | ModPermission::Posts))
    }
}

/// A comment as read from the platform. Read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author: String,
    pub body: String,
    pub permalink: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author: String,
    pub permalink: String,
}

/// The comment created by fulfilling a pin. The platform owns it; we only
/// keep the permalink for messages and the audit entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinnedComment {
    pub id: String,
    pub permalink: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    OriginalPoster,
    TrustedUser,
    Moderator,
}

impl Role {
    /// Label used in wiki log entries and moderator notices.
    pub fn label(self) -> &'static str {
        match self {
            Role::OriginalPoster => "OP",
            Role::TrustedUser => "trusted user",
            Role::Moderator => "mod",
        }
    }

    /// Label used in the webhook alert.
    pub fn alert_label(self) -> &'static str {
        match self {
            Role::OriginalPoster => "OP",
            Role::TrustedUser => "trusted user",
            Role::Moderator => "moderator",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    NotATrustedUser,
}

impl DenialReason {
    pub fn code(self) -> &'static str {
        match self {
            DenialReason::NotATrustedUser => "NOT_A_TRUSTED_USER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed(Role),
    Denied(DenialReason),
}

/// One pin action as submitted by the user. Consumed by exactly one
/// orchestrator invocation; never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct PinRequest {
    pub subreddit: SubredditName,
    pub comment_id: String,
    pub actor: String,
    #[serde(default)]
    pub note: Option<String>,
    /// Trusted-user case only: whether the pinner's username appears in
    /// the pinned message.
    #[serde(default)]
    pub username_visible: bool,
}

impl PinRequest {
    /// The form submits an empty string when the note field is left blank.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref().filter(|n| !n.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subreddit_name_validation() {
        assert_eq!(SubredditName::new("ask_science").unwrap().as_str(), "ask_science");
        assert_eq!(SubredditName::new(""), Err(InvalidSubredditName::Empty));
        assert_eq!(
            SubredditName::new("r/askscience"),
            Err(InvalidSubredditName::InvalidCharacters)
        );
        assert_eq!(
            SubredditName::new("a".repeat(25)),
            Err(InvalidSubredditName::TooLong)
        );
        assert_eq!(
            InvalidSubredditName::Empty.to_string(),
            "Subreddit name cannot be empty."
        );
    }
}
