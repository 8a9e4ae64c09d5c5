//! Moderator-only removal of content this service created.

use anyhow::Context;
use domain::{Actor, SubredditName};
use platform::PlatformApi;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteRequest {
    pub subreddit: SubredditName,
    pub comment_id: String,
    pub actor: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted { toast: &'static str },
    Denied { toast: String },
}

/// Deletes `comment_id` only when the actor holds the `posts` or `all`
/// permission and the comment was authored by the service account.
pub async fn run_delete(
    api: &dyn PlatformApi,
    app_account: &str,
    req: &DeleteRequest,
) -> anyhow::Result<DeleteOutcome> {
    let sub = req.subreddit.as_str();

    let actor = Actor {
        username: req.actor.clone(),
        mod_permissions: api
            .mod_permissions(sub, &req.actor)
            .await
            .context("reading moderator permissions")?,
    };

    if !actor.can_moderate_posts() {
        return Ok(DeleteOutcome::Denied {
            toast: "You don't have the necessary permissions.".to_string(),
        });
    }

    let comment = api.comment(&req.comment_id).await.context("reading comment")?;
    if comment.author != app_account {
        return Ok(DeleteOutcome::Denied {
            toast: format!("This is only for content removal by {app_account}!"),
        });
    }

    api.delete_comment(&comment.id).await.context("deleting comment")?;
    info!("Spotlight content deleted by {}.", actor.username);

    Ok(DeleteOutcome::Deleted { toast: "Deleted!" })
}
