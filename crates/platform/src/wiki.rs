//! Append-only audit log over a subreddit wiki page.

use tracing::{info, warn};

use crate::error::PlatformError;
use crate::traits::PlatformApi;

/// Appends `entry` to the wiki page, creating it on first use.
///
/// Read failures are treated as an absent page. The new entry is joined to
/// the prior content with a blank line; entries are never rewritten. On
/// first creation the page visibility is restricted to moderators, exactly
/// once.
///
/// Concurrent appends to the same page race read-modify-write; the last
/// writer wins on the full page content. Known limitation.
pub async fn append_wiki_log(
    api: &dyn PlatformApi,
    subreddit: &str,
    page: &str,
    entry: &str,
) -> Result<(), PlatformError> {
    let existing = match api.wiki_page(subreddit, page).await {
        Ok(p) => p,
        Err(e) => {
            warn!("Failed to read wiki page {subreddit}/{page}, treating as absent: {e}");
            None
        }
    };
    let first_write = existing.is_none();

    let new_content = format!(
        "{}\n\n{}",
        existing.map(|p| p.content).unwrap_or_default(),
        entry
    );

    api.write_wiki_page(subreddit, page, &new_content, domain::audit::LOG_REASON)
        .await?;

    if first_write {
        api.restrict_wiki_page(subreddit, page).await?;
    }

    info!("Wiki updated: {subreddit}/{page}");
    Ok(())
}
