//! Install / upgrade housekeeping: bot flair, wiki index page, log seed,
//! moderator notification.

use anyhow::Context;
use chrono::Utc;
use domain::audit;
use domain::templates;
use platform::{append_wiki_log, PlatformApi};
use tracing::info;

use super::pin::bot_flair;

const INDEX_REASON: &str = "Initialization completed!";

pub async fn run_install(
    api: &dyn PlatformApi,
    subreddit: &str,
    app_account: &str,
) -> anyhow::Result<()> {
    info!("App installed on r/{subreddit}.");
    prepare_subreddit(api, subreddit, app_account).await?;
    append_wiki_log(api, subreddit, audit::LOG_PAGE, &audit::install_entry(Utc::now()))
        .await
        .context("seeding log page")?;

    api.send_mod_notification(
        subreddit,
        "Thanks for installing Spotlight!",
        &templates::install_message(subreddit),
    )
    .await
    .context("sending install notification")?;
    info!("First message sent!");
    Ok(())
}

pub async fn run_upgrade(
    api: &dyn PlatformApi,
    subreddit: &str,
    app_account: &str,
) -> anyhow::Result<()> {
    info!("App updated on r/{subreddit}");
    prepare_subreddit(api, subreddit, app_account).await?;
    append_wiki_log(api, subreddit, audit::LOG_PAGE, &audit::upgrade_entry(Utc::now()))
        .await
        .context("appending upgrade entry")?;

    api.send_mod_notification(
        subreddit,
        "Spotlight update",
        &templates::upgrade_message(subreddit),
    )
    .await
    .context("sending upgrade notification")?;
    Ok(())
}

/// Shared between install and upgrade: flair the service account and
/// (re)write the wiki index page, restricting it on first creation.
async fn prepare_subreddit(
    api: &dyn PlatformApi,
    subreddit: &str,
    app_account: &str,
) -> anyhow::Result<()> {
    api.set_user_flair(subreddit, app_account, &bot_flair())
        .await
        .context("setting bot flair")?;

    let existing = api.wiki_page(subreddit, audit::INDEX_PAGE).await?;
    api.write_wiki_page(
        subreddit,
        audit::INDEX_PAGE,
        &templates::wiki_index_page(subreddit),
        INDEX_REASON,
    )
    .await
    .context("writing index page")?;
    if existing.is_none() {
        api.restrict_wiki_page(subreddit, audit::INDEX_PAGE).await?;
    }
    Ok(())
}
