//! In-memory `PlatformApi` fake recording every collaborator call.

use async_trait::async_trait;
use domain::{Comment, ModPermission, PinnedComment, Post};
use platform::{PlatformApi, PlatformError, UserFlair, WikiPage};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

pub struct FakePlatform {
    pub settings: Value,
    pub comments: HashMap<String, Comment>,
    pub posts: HashMap<String, Post>,
    pub mods: HashMap<String, Vec<ModPermission>>,
    pub fail_on: Option<&'static str>,
    pub pages: Mutex<HashMap<String, String>>,
    pub restricted: Mutex<Vec<String>>,
    pub submitted: Mutex<Vec<(String, String)>>,
    pub user_messages: Mutex<Vec<(String, String, String)>>,
    pub mod_notifications: Mutex<Vec<(String, String)>>,
    pub calls: Mutex<Vec<&'static str>>,
}

impl FakePlatform {
    /// Seeds one post by alice with one comment by carol, no moderators,
    /// empty settings.
    pub fn new() -> Self {
        let mut comments = HashMap::new();
        comments.insert(
            "t1_target".to_string(),
            Comment {
                id: "t1_target".to_string(),
                post_id: "t3_post".to_string(),
                author: "carol".to_string(),
                body: "great insight".to_string(),
                permalink: "/r/test/comments/post/x/target".to_string(),
            },
        );
        let mut posts = HashMap::new();
        posts.insert(
            "t3_post".to_string(),
            Post {
                id: "t3_post".to_string(),
                author: "alice".to_string(),
                permalink: "/r/test/comments/post".to_string(),
            },
        );
        Self {
            settings: json!({}),
            comments,
            posts,
            mods: HashMap::new(),
            fail_on: None,
            pages: Mutex::new(HashMap::new()),
            restricted: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
            user_messages: Mutex::new(Vec::new()),
            mod_notifications: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_settings(mut self, settings: Value) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_mod(mut self, username: &str, perms: &[&str]) -> Self {
        self.mods.insert(
            username.to_string(),
            perms.iter().map(|p| ModPermission::from(p.to_string())).collect(),
        );
        self
    }

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comments.insert(comment.id.clone(), comment);
        self
    }

    /// Makes the named collaborator call fail with a platform error.
    pub fn failing_on(mut self, call: &'static str) -> Self {
        self.fail_on = Some(call);
        self
    }

    pub fn called(&self, name: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|c| *c == name)
    }

    pub fn page_content(&self, subreddit: &str, page: &str) -> Option<String> {
        self.pages
            .lock()
            .unwrap()
            .get(&format!("{subreddit}/{page}"))
            .cloned()
    }

    fn record(&self, name: &'static str) -> Result<(), PlatformError> {
        self.calls.lock().unwrap().push(name);
        if self.fail_on == Some(name) {
            return Err(PlatformError::Api {
                status: 500,
                message: format!("injected failure in {name}"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PlatformApi for FakePlatform {
    async fn comment(&self, comment_id: &str) -> Result<Comment, PlatformError> {
        self.record("comment")?;
        self.comments
            .get(comment_id)
            .cloned()
            .ok_or_else(|| PlatformError::NotFound {
                kind: "comment",
                id: comment_id.to_string(),
            })
    }

    async fn post(&self, post_id: &str) -> Result<Post, PlatformError> {
        self.record("post")?;
        self.posts
            .get(post_id)
            .cloned()
            .ok_or_else(|| PlatformError::NotFound {
                kind: "post",
                id: post_id.to_string(),
            })
    }

    async fn mod_permissions(
        &self,
        _subreddit: &str,
        username: &str,
    ) -> Result<Vec<ModPermission>, PlatformError> {
        self.record("mod_permissions")?;
        Ok(self.mods.get(username).cloned().unwrap_or_default())
    }

    async fn is_moderator(&self, _subreddit: &str, username: &str) -> Result<bool, PlatformError> {
        self.record("is_moderator")?;
        Ok(self.mods.contains_key(username))
    }

    async fn submit_comment(
        &self,
        post_id: &str,
        body: &str,
    ) -> Result<PinnedComment, PlatformError> {
        self.record("submit_comment")?;
        self.submitted
            .lock()
            .unwrap()
            .push((post_id.to_string(), body.to_string()));
        Ok(PinnedComment {
            id: "t1_new".to_string(),
            permalink: "/r/test/comments/post/x/new".to_string(),
        })
    }

    async fn distinguish_comment(&self, _comment_id: &str) -> Result<(), PlatformError> {
        self.record("distinguish_comment")?;
        Ok(())
    }

    async fn lock_comment(&self, _comment_id: &str) -> Result<(), PlatformError> {
        self.record("lock_comment")?;
        Ok(())
    }

    async fn delete_comment(&self, _comment_id: &str) -> Result<(), PlatformError> {
        self.record("delete_comment")?;
        Ok(())
    }

    async fn set_post_flair(
        &self,
        _subreddit: &str,
        _post_id: &str,
        _text: &str,
    ) -> Result<(), PlatformError> {
        self.record("set_post_flair")?;
        Ok(())
    }

    async fn set_user_flair(
        &self,
        _subreddit: &str,
        _username: &str,
        _flair: &UserFlair,
    ) -> Result<(), PlatformError> {
        self.record("set_user_flair")?;
        Ok(())
    }

    async fn add_mod_note(
        &self,
        _subreddit: &str,
        _username: &str,
        _label: &str,
        _note: &str,
        _thing_id: &str,
    ) -> Result<(), PlatformError> {
        self.record("add_mod_note")?;
        Ok(())
    }

    async fn send_user_message(
        &self,
        _subreddit: &str,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, PlatformError> {
        self.record("send_user_message")?;
        self.user_messages.lock().unwrap().push((
            to.to_string(),
            subject.to_string(),
            body.to_string(),
        ));
        Ok("convo_user".to_string())
    }

    async fn send_mod_notification(
        &self,
        _subreddit: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, PlatformError> {
        self.record("send_mod_notification")?;
        self.mod_notifications
            .lock()
            .unwrap()
            .push((subject.to_string(), body.to_string()));
        Ok("convo_mods".to_string())
    }

    async fn archive_conversation(&self, _conversation_id: &str) -> Result<(), PlatformError> {
        self.record("archive_conversation")?;
        Ok(())
    }

    async fn wiki_page(
        &self,
        subreddit: &str,
        page: &str,
    ) -> Result<Option<WikiPage>, PlatformError> {
        self.record("wiki_page")?;
        Ok(self
            .pages
            .lock()
            .unwrap()
            .get(&format!("{subreddit}/{page}"))
            .map(|c| WikiPage { content: c.clone() }))
    }

    async fn write_wiki_page(
        &self,
        subreddit: &str,
        page: &str,
        content: &str,
        _reason: &str,
    ) -> Result<(), PlatformError> {
        self.record("write_wiki_page")?;
        self.pages
            .lock()
            .unwrap()
            .insert(format!("{subreddit}/{page}"), content.to_string());
        Ok(())
    }

    async fn restrict_wiki_page(&self, subreddit: &str, page: &str) -> Result<(), PlatformError> {
        self.record("restrict_wiki_page")?;
        self.restricted
            .lock()
            .unwrap()
            .push(format!("{subreddit}/{page}"));
        Ok(())
    }

    async fn app_settings(&self, _subreddit: &str) -> Result<Value, PlatformError> {
        self.record("app_settings")?;
        Ok(self.settings.clone())
    }
}
