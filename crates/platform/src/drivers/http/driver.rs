//! `reqwest`-backed implementation of [`PlatformApi`] against the
//! platform's OAuth REST API.

use async_trait::async_trait;
use domain::{Comment, ModPermission, PinnedComment, Post};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::types::{
    CommentInfo, ConversationResponse, Listing, ModeratorListing, PostInfo, SubmitResponse,
    WikiResponse,
};
use crate::error::PlatformError;
use crate::traits::{PlatformApi, UserFlair, WikiPage};

/// Wiki page holding the per-subreddit settings document (JSON).
const SETTINGS_PAGE: &str = "spotlight/config";

#[derive(Debug, Clone)]
pub struct RedditConfig {
    pub base_url: String,
    pub access_token: String,
    pub user_agent: String,
}

pub struct RedditDriver {
    client: reqwest::Client,
    base: String,
}

impl RedditDriver {
    pub fn new(config: RedditConfig) -> Result<Self, PlatformError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.access_token)).map_err(|e| {
                PlatformError::Decode(format!("invalid access token header: {e}"))
            })?,
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| PlatformError::Decode(format!("invalid user agent: {e}")))?,
        );

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PlatformError> {
        let resp = self.client.get(format!("{}{path}", self.base)).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(api_error(status, resp.text().await.unwrap_or_default()));
        }
        Ok(resp.json().await?)
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T, PlatformError> {
        let resp = self
            .client
            .post(format!("{}{path}", self.base))
            .form(form)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(api_error(status, resp.text().await.unwrap_or_default()));
        }
        Ok(resp.json().await?)
    }

    async fn post_form_ignored(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<(), PlatformError> {
        let resp = self
            .client
            .post(format!("{}{path}", self.base))
            .form(form)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(api_error(status, resp.text().await.unwrap_or_default()));
        }
        Ok(())
    }
}

fn api_error(status: StatusCode, body: String) -> PlatformError {
    PlatformError::Api {
        status: status.as_u16(),
        message: body.chars().take(200).collect(),
    }
}

#[async_trait]
impl PlatformApi for RedditDriver {
    async fn comment(&self, comment_id: &str) -> Result<Comment, PlatformError> {
        let listing: Listing<CommentInfo> = self
            .get_json(&format!("/api/info.json?id={comment_id}"))
            .await?;
        let info = listing
            .data
            .children
            .into_iter()
            .next()
            .ok_or_else(|| PlatformError::NotFound {
                kind: "comment",
                id: comment_id.to_string(),
            })?
            .data;
        Ok(Comment {
            id: info.name,
            post_id: info.link_id,
            author: info.author,
            body: info.body,
            permalink: info.permalink,
        })
    }

    async fn post(&self, post_id: &str) -> Result<Post, PlatformError> {
        let listing: Listing<PostInfo> = self
            .get_json(&format!("/api/info.json?id={post_id}"))
            .await?;
        let info = listing
            .data
            .children
            .into_iter()
            .next()
            .ok_or_else(|| PlatformError::NotFound {
                kind: "post",
                id: post_id.to_string(),
            })?
            .data;
        Ok(Post {
            id: info.name,
            author: info.author,
            permalink: info.permalink,
        })
    }

    async fn mod_permissions(
        &self,
        subreddit: &str,
        username: &str,
    ) -> Result<Vec<ModPermission>, PlatformError> {
        let listing: ModeratorListing = self
            .get_json(&format!(
                "/r/{subreddit}/about/moderators.json?user={username}"
            ))
            .await?;
        Ok(listing
            .data
            .children
            .into_iter()
            .find(|m| m.name.eq_ignore_ascii_case(username))
            .map(|m| m.mod_permissions.into_iter().map(ModPermission::from).collect())
            .unwrap_or_default())
    }

    async fn is_moderator(&self, subreddit: &str, username: &str) -> Result<bool, PlatformError> {
        Ok(!self.mod_permissions(subreddit, username).await?.is_empty())
    }

    async fn submit_comment(
        &self,
        post_id: &str,
        body: &str,
    ) -> Result<PinnedComment, PlatformError> {
        let resp: SubmitResponse = self
            .post_form(
                "/api/comment",
                &[("api_type", "json"), ("thing_id", post_id), ("text", body)],
            )
            .await?;

        if !resp.json.errors.is_empty() {
            return Err(PlatformError::Api {
                status: 200,
                message: format!("comment submission rejected: {:?}", resp.json.errors),
            });
        }

        let created = resp
            .json
            .data
            .and_then(|d| d.things.into_iter().next())
            .ok_or_else(|| {
                PlatformError::Decode("comment submission returned no thing".to_string())
            })?
            .data;

        Ok(PinnedComment {
            id: created.name,
            permalink: created.permalink,
        })
    }

    async fn distinguish_comment(&self, comment_id: &str) -> Result<(), PlatformError> {
        self.post_form_ignored(
            "/api/distinguish",
            &[("api_type", "json"), ("id", comment_id), ("how", "yes")],
        )
        .await
    }

    async fn lock_comment(&self, comment_id: &str) -> Result<(), PlatformError> {
        self.post_form_ignored("/api/lock", &[("id", comment_id)]).await
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<(), PlatformError> {
        self.post_form_ignored("/api/del", &[("id", comment_id)]).await
    }

    async fn set_post_flair(
        &self,
        subreddit: &str,
        post_id: &str,
        text: &str,
    ) -> Result<(), PlatformError> {
        self.post_form_ignored(
            &format!("/r/{subreddit}/api/selectflair"),
            &[("api_type", "json"), ("link", post_id), ("text", text)],
        )
        .await
    }

    async fn set_user_flair(
        &self,
        subreddit: &str,
        username: &str,
        flair: &UserFlair,
    ) -> Result<(), PlatformError> {
        self.post_form_ignored(
            &format!("/r/{subreddit}/api/selectflair"),
            &[
                ("api_type", "json"),
                ("name", username),
                ("text", &flair.text),
                ("text_color", &flair.text_color),
                ("background_color", &flair.background_color),
            ],
        )
        .await
    }

    async fn add_mod_note(
        &self,
        subreddit: &str,
        username: &str,
        label: &str,
        note: &str,
        thing_id: &str,
    ) -> Result<(), PlatformError> {
        self.post_form_ignored(
            "/api/mod/notes",
            &[
                ("subreddit", subreddit),
                ("user", username),
                ("label", label),
                ("note", note),
                ("reddit_id", thing_id),
            ],
        )
        .await
    }

    async fn send_user_message(
        &self,
        subreddit: &str,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, PlatformError> {
        let resp: ConversationResponse = self
            .post_form(
                "/api/mod/conversations",
                &[
                    ("srName", subreddit),
                    ("to", to),
                    ("subject", subject),
                    ("body", body),
                    ("isAuthorHidden", "true"),
                ],
            )
            .await?;
        Ok(resp.conversation.id)
    }

    async fn send_mod_notification(
        &self,
        subreddit: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, PlatformError> {
        let resp: ConversationResponse = self
            .post_form(
                "/api/mod/conversations",
                &[("srName", subreddit), ("subject", subject), ("body", body)],
            )
            .await?;
        Ok(resp.conversation.id)
    }

    async fn archive_conversation(&self, conversation_id: &str) -> Result<(), PlatformError> {
        self.post_form_ignored(&format!("/api/mod/conversations/{conversation_id}/archive"), &[])
            .await
    }

    async fn wiki_page(
        &self,
        subreddit: &str,
        page: &str,
    ) -> Result<Option<WikiPage>, PlatformError> {
        let resp = self
            .client
            .get(format!("{}/r/{subreddit}/wiki/{page}.json", self.base))
            .send()
            .await?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(api_error(status, resp.text().await.unwrap_or_default()));
        }
        let wiki: WikiResponse = resp.json().await?;
        Ok(Some(WikiPage {
            content: wiki.data.content_md,
        }))
    }

    async fn write_wiki_page(
        &self,
        subreddit: &str,
        page: &str,
        content: &str,
        reason: &str,
    ) -> Result<(), PlatformError> {
        self.post_form_ignored(
            &format!("/r/{subreddit}/api/wiki/edit"),
            &[("page", page), ("content", content), ("reason", reason)],
        )
        .await
    }

    async fn restrict_wiki_page(&self, subreddit: &str, page: &str) -> Result<(), PlatformError> {
        // permlevel 2 = only approved wiki contributors (mods) may view/edit.
        self.post_form_ignored(
            &format!("/r/{subreddit}/api/wiki/settings/{page}"),
            &[("listed", "true"), ("permlevel", "2")],
        )
        .await
    }

    async fn app_settings(&self, subreddit: &str) -> Result<Value, PlatformError> {
        let Some(page) = self.wiki_page(subreddit, SETTINGS_PAGE).await? else {
            debug!("No settings page on r/{subreddit}, using defaults");
            return Ok(Value::Object(Default::default()));
        };
        match serde_json::from_str(&page.content) {
            Ok(v) => Ok(v),
            Err(e) => {
                warn!("Settings page on r/{subreddit} is not valid JSON ({e}), using defaults");
                Ok(Value::Object(Default::default()))
            }
        }
    }
}
