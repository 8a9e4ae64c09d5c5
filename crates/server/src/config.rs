use config::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub reddit: RedditSettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
}

#[derive(Deserialize, Clone)]
pub struct RedditSettings {
    pub base_url: String,
    pub access_token: String,
    pub user_agent: String,
    /// The service account that authors pinned comments. Used by the
    /// delete action to refuse removing anything else.
    pub app_account: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let env_map = collect_env_vars();

        let s = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.cors_origins", "*")?
            .set_default("reddit.base_url", "https://oauth.reddit.com")?
            .set_default("reddit.access_token", "")?
            .set_default("reddit.user_agent", "spotlight/0.3")?
            .set_default("reddit.app_account", "spotlight-app")?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name(&format!("config.{}", run_mode)).required(false))
            .add_source(config::File::from_str(
                &serde_json::to_string(&env_map)
                    .expect("Environment variables should serialize to JSON"),
                config::FileFormat::Json,
            ))
            .build()?;

        s.try_deserialize()
    }
}

fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with("SPOTLIGHT_"))
        .map(|(k, v)| {
            let new_key = k
                .trim_start_matches("SPOTLIGHT_")
                .replace("__", ".")
                .to_lowercase();
            (new_key, v)
        })
        .collect()
}
