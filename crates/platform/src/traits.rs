use async_trait::async_trait;
use domain::{Comment, ModPermission, PinnedComment, Post};
use serde_json::Value;

use crate::error::PlatformError;

#[derive(Debug, Clone, Default)]
pub struct WikiPage {
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct UserFlair {
    pub text: String,
    pub text_color: String,
    pub background_color: String,
}

/// The hosting platform's collaborator surface. Everything the pin flow
/// touches goes through this seam; the HTTP driver implements it for the
/// real platform and tests substitute an in-memory fake.
#[async_trait]
pub trait PlatformApi: Send + Sync {
    async fn comment(&self, comment_id: &str) -> Result<Comment, PlatformError>;

    async fn post(&self, post_id: &str) -> Result<Post, PlatformError>;

    async fn mod_permissions(
        &self,
        subreddit: &str,
        username: &str,
    ) -> Result<Vec<ModPermission>, PlatformError>;

    async fn is_moderator(&self, subreddit: &str, username: &str) -> Result<bool, PlatformError>;

    /// Submits a new top-level reply under `post_id`.
    async fn submit_comment(
        &self,
        post_id: &str,
        body: &str,
    ) -> Result<PinnedComment, PlatformError>;

    async fn distinguish_comment(&self, comment_id: &str) -> Result<(), PlatformError>;

    async fn lock_comment(&self, comment_id: &str) -> Result<(), PlatformError>;

    async fn delete_comment(&self, comment_id: &str) -> Result<(), PlatformError>;

    async fn set_post_flair(
        &self,
        subreddit: &str,
        post_id: &str,
        text: &str,
    ) -> Result<(), PlatformError>;

    async fn set_user_flair(
        &self,
        subreddit: &str,
        username: &str,
        flair: &UserFlair,
    ) -> Result<(), PlatformError>;

    async fn add_mod_note(
        &self,
        subreddit: &str,
        username: &str,
        label: &str,
        note: &str,
        thing_id: &str,
    ) -> Result<(), PlatformError>;

    /// Private conversation to a single user, author hidden. Returns the
    /// conversation id.
    async fn send_user_message(
        &self,
        subreddit: &str,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, PlatformError>;

    /// Moderator-facing notification. Returns the conversation id.
    async fn send_mod_notification(
        &self,
        subreddit: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, PlatformError>;

    async fn archive_conversation(&self, conversation_id: &str) -> Result<(), PlatformError>;

    /// `Ok(None)` when the page has never been created.
    async fn wiki_page(
        &self,
        subreddit: &str,
        page: &str,
    ) -> Result<Option<WikiPage>, PlatformError>;

    async fn write_wiki_page(
        &self,
        subreddit: &str,
        page: &str,
        content: &str,
        reason: &str,
    ) -> Result<(), PlatformError>;

    /// Restricts page visibility to moderators.
    async fn restrict_wiki_page(&self, subreddit: &str, page: &str) -> Result<(), PlatformError>;

    /// Raw per-subreddit settings document. Absent document is an empty
    /// object, never an error.
    async fn app_settings(&self, subreddit: &str) -> Result<Value, PlatformError>;
}
