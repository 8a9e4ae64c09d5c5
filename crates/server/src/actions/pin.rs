//! The pin orchestrator: resolve → build messages → post → side effects →
//! log. One sequential pass per invocation; a platform failure while
//! posting aborts the whole request, only the webhook alert is isolated.

use anyhow::Context;
use chrono::Utc;
use domain::audit::{self, PinRecord};
use domain::templates::{self, PinContext, PinStyle};
use domain::{resolve, Actor, Decision, PinRequest, Role, SpotlightSettings};
use platform::{append_wiki_log, AlertDispatcher, AlertEvent, PlatformApi, UserFlair};
use tracing::{info, warn};

pub const DENIED_TOAST: &str = "You're not allowed to use Spotlight on this subreddit.";
pub const POSTED_TOAST: &str = "Posted!";

const MOD_NOTE_LABEL: &str = "HELPFUL_USER";

#[derive(Debug, PartialEq, Eq)]
pub enum PinOutcome {
    Posted { toast: &'static str },
    Denied { toast: &'static str },
}

pub async fn run_pin(
    api: &dyn PlatformApi,
    alerts: &AlertDispatcher,
    req: &PinRequest,
) -> anyhow::Result<PinOutcome> {
    let sub = req.subreddit.as_str();

    // Settings are read fresh on every request; an absent document means
    // defaults, never an error.
    let settings = SpotlightSettings::from_value(
        &api.app_settings(sub).await.context("reading settings")?,
    );

    let comment = api.comment(&req.comment_id).await.context("reading target comment")?;
    let post = api.post(&comment.post_id).await.context("reading parent post")?;
    let actor = Actor {
        username: req.actor.clone(),
        mod_permissions: api
            .mod_permissions(sub, &req.actor)
            .await
            .context("reading moderator permissions")?,
    };

    let role = match resolve(&actor, &post.author, &settings) {
        Decision::Allowed(role) => {
            info!("{} may pin on r/{sub} as {}", actor.username, role.label());
            role
        }
        Decision::Denied(reason) => {
            info!("{} is not allowed to pin comments on r/{sub}", actor.username);
            let entry =
                audit::denial_entry(Utc::now(), &actor.username, &comment.author, &comment.permalink);
            append_wiki_log(api, sub, audit::LOG_PAGE, &entry)
                .await
                .with_context(|| format!("logging denied attempt ({})", reason.code()))?;
            return Ok(PinOutcome::Denied { toast: DENIED_TOAST });
        }
    };

    let style = match role {
        Role::OriginalPoster => PinStyle::Op {
            op: actor.username.clone(),
        },
        Role::TrustedUser => PinStyle::Trusted {
            pinner: actor.username.clone(),
            visible: req.username_visible,
            self_pin: comment.author == actor.username,
        },
        Role::Moderator => PinStyle::Mod {
            moderator: actor.username.clone(),
        },
    };
    let ctx = PinContext {
        style,
        author: comment.author.clone(),
        comment_permalink: comment.permalink.clone(),
        body: comment.body.clone(),
        note: req.note().map(str::to_string),
        subreddit: sub.to_string(),
    };

    // Posted: failure here aborts the whole request.
    let pinned = api
        .submit_comment(&comment.post_id, &templates::pinned_comment_body(&ctx))
        .await
        .context("submitting pinned comment")?;
    api.distinguish_comment(&pinned.id).await.context("distinguishing")?;
    if settings.auto_lock {
        api.lock_comment(&pinned.id).await.context("locking")?;
    }

    // Side effects, each individually gated; the mod note is unconditional.
    if settings.set_flair {
        api.set_post_flair(sub, &comment.post_id, &settings.flair_text)
            .await
            .context("setting post flair")?;
    }

    let mod_note = match role {
        Role::Moderator => format!("Comment pinned by {} (mod).", actor.username),
        _ => format!("Comment pinned by {}.", actor.username),
    };
    api.add_mod_note(sub, &comment.author, MOD_NOTE_LABEL, &mod_note, &comment.post_id)
        .await
        .context("adding mod note")?;

    if settings.alert_user {
        let notif = templates::author_notification(&ctx, &pinned.permalink);
        let convo = api
            .send_user_message(sub, &comment.author, &notif.subject, &notif.body)
            .await
            .context("notifying comment author")?;
        let recipient_is_mod = api.is_moderator(sub, &comment.author).await?;
        if recipient_is_mod {
            info!("Recipient is a moderator → skipping auto-archive");
        } else {
            api.archive_conversation(&convo).await?;
        }
    }

    if settings.send_modmail {
        let notice = templates::mod_notice(&ctx);
        let convo = api
            .send_mod_notification(sub, &notice.subject, &notice.body)
            .await
            .context("notifying moderators")?;
        if settings.auto_archive {
            api.archive_conversation(&convo).await?;
        }
    }

    if settings.send_webhook {
        let escaped_author = templates::escape_username(&comment.author);
        let event = AlertEvent {
            username: &actor.username,
            role,
            author: &escaped_author,
            comment_permalink: &comment.permalink,
            pinned_permalink: &pinned.permalink,
            note: req.note(),
            role_ping: settings.webhook_role_id.as_deref(),
            subreddit: sub,
        };
        // Fire-and-forget: delivery failures are logged, never escalated.
        if let Err(e) = alerts.send(settings.webhook_url.as_deref(), &event).await {
            warn!("Discord error: {e}");
        }
    }

    // Logged.
    let record = PinRecord {
        role,
        username: &actor.username,
        author: &comment.author,
        comment_permalink: &comment.permalink,
        pinned_permalink: &pinned.permalink,
        body: &comment.body,
        note: req.note(),
    };
    append_wiki_log(api, sub, audit::LOG_PAGE, &audit::success_entry(Utc::now(), &record))
        .await
        .context("logging pin")?;

    Ok(PinOutcome::Posted { toast: POSTED_TOAST })
}

/// Flair applied to the service account on install/upgrade.
pub fn bot_flair() -> UserFlair {
    UserFlair {
        text: "Mod Bot 🤖".to_string(),
        text_color: "light".to_string(),
        background_color: "#FF0000".to_string(),
    }
}
