//! Fire-and-forget Discord webhook alerts.
//!
//! Delivery is best-effort by contract: the dispatcher returns
//! `Result<(), DeliveryError>` so the caller can log a failure, but the pin
//! flow never escalates it.

use domain::templates::{config_url, logs_url, FEEDBACK_URL};
use domain::Role;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info};

pub const DISCORD_WEBHOOK_PREFIX: &str = "https://discord.com/api/webhooks/";

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook returned status {0}")]
    Status(u16),
}

#[derive(Debug, Clone)]
pub struct AlertEvent<'a> {
    pub username: &'a str,
    pub role: Role,
    pub author: &'a str,
    pub comment_permalink: &'a str,
    pub pinned_permalink: &'a str,
    pub note: Option<&'a str>,
    pub role_ping: Option<&'a str>,
    pub subreddit: &'a str,
}

#[derive(Serialize)]
struct EmbedField {
    name: &'static str,
    value: String,
    inline: bool,
}

pub struct AlertDispatcher {
    client: reqwest::Client,
    endpoint_prefix: &'static str,
}

impl Default for AlertDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertDispatcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint_prefix: DISCORD_WEBHOOK_PREFIX,
        }
    }

    /// Points the prefix check at a local mock server.
    #[cfg(test)]
    fn with_endpoint_prefix(mut self, prefix: &'static str) -> Self {
        self.endpoint_prefix = prefix;
        self
    }

    /// Sends one alert. A missing URL or a URL outside the provider's
    /// webhook endpoint is a silent no-op, not an error.
    pub async fn send(
        &self,
        webhook: Option<&str>,
        event: &AlertEvent<'_>,
    ) -> Result<(), DeliveryError> {
        let Some(webhook) = webhook else {
            info!("No webhook → skipping Discord");
            return Ok(());
        };

        if !webhook.starts_with(self.endpoint_prefix) {
            info!("Provided webhook is NOT a Discord webhook → skipping");
            return Ok(());
        }

        debug!("Sending to Discord…");

        let mut message = format!(
            "**{} ({})** has used Spotlight to pin [this comment](https://reddit.com{}) by u/{}.",
            event.username,
            event.role.alert_label(),
            event.comment_permalink,
            event.author,
        );
        if let Some(note) = event.note {
            message.push_str(&format!(" **Note:** {note}"));
        }
        if let Some(role_id) = event.role_ping {
            message.push_str(&format!("\n\n<@&{role_id}>"));
        }

        let fields = vec![
            EmbedField {
                name: "Recent uses",
                value: format!("[Link]({})", logs_url(event.subreddit)),
                inline: true,
            },
            EmbedField {
                name: "Config",
                value: format!("[Link]({})", config_url(event.subreddit)),
                inline: true,
            },
            EmbedField {
                name: "Feedback",
                value: format!("[Link]({FEEDBACK_URL})"),
                inline: true,
            },
        ];

        let payload = json!({
            "content": message,
            "embeds": [{
                "title": "Pinned comment",
                "url": format!("https://reddit.com{}", event.pinned_permalink),
                "fields": fields,
            }],
        });

        let resp = self.client.post(webhook).json(&payload).send().await?;
        if !resp.status().is_success() {
            return Err(DeliveryError::Status(resp.status().as_u16()));
        }

        info!("Discord alert sent!");
        Ok(())
    }
}
