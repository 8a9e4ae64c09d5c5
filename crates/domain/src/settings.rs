use serde_json::Value;

/// Per-subreddit configuration bag. Read fresh on every request from the
/// platform-owned settings document and passed by value into the resolver
/// and orchestrator; never cached process-wide.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotlightSettings {
    /// Lowercased allowlist entries.
    pub trusted_users: Vec<String>,
    pub allow_op_pin: bool,
    pub auto_lock: bool,
    pub alert_user: bool,
    pub auto_archive: bool,
    pub send_modmail: bool,
    pub send_webhook: bool,
    pub webhook_url: Option<String>,
    pub webhook_role_id: Option<String>,
    pub set_flair: bool,
    pub flair_text: String,
}

impl Default for SpotlightSettings {
    fn default() -> Self {
        Self {
            trusted_users: Vec::new(),
            allow_op_pin: false,
            auto_lock: true,
            alert_user: false,
            auto_archive: true,
            send_modmail: false,
            send_webhook: false,
            webhook_url: None,
            webhook_role_id: None,
            set_flair: false,
            flair_text: "Context Provided - Spotlight".to_string(),
        }
    }
}

impl SpotlightSettings {
    /// Parses the raw settings document. Missing or malformed keys fall
    /// back to defaults; unknown keys are ignored.
    pub fn from_value(raw: &Value) -> Self {
        let defaults = Self::default();

        let get_bool = |key: &str, fallback: bool| -> bool {
            raw.get(key).and_then(Value::as_bool).unwrap_or(fallback)
        };
        let get_string = |key: &str| -> Option<String> {
            raw.get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let trusted_users = raw
            .get("trustedUsers")
            .and_then(Value::as_str)
            .unwrap_or("")
            .split(',')
            .map(|u| u.trim().to_lowercase())
            .filter(|u| !u.is_empty())
            .collect();

        Self {
            trusted_users,
            allow_op_pin: get_bool("OPoption", defaults.allow_op_pin),
            auto_lock: get_bool("autoLock", defaults.auto_lock),
            alert_user: get_bool("alertUser", defaults.alert_user),
            auto_archive: get_bool("autoArchive", defaults.auto_archive),
            send_modmail: get_bool("sendModmail", defaults.send_modmail),
            send_webhook: get_bool("sendDiscord", defaults.send_webhook),
            webhook_url: get_string("webhook"),
            webhook_role_id: get_string("discordRole"),
            set_flair: get_bool("setFlair", defaults.set_flair),
            flair_text: get_string("spotlightPostFlairText").unwrap_or(defaults.flair_text),
        }
    }

    pub fn is_trusted(&self, username: &str) -> bool {
        let needle = username.to_lowercase();
        self.trusted_users.iter().any(|u| u == &needle)
    }
}
