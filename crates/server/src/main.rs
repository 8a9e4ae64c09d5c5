mod actions;
mod config;
mod http;
mod state;

use anyhow::Context;
use dotenvy::dotenv;
use platform::{AlertDispatcher, RedditConfig, RedditDriver};
use std::sync::Arc;
use tracing::info;

use config::Settings;
use http::router::build_router;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let settings = Settings::new().context("Failed to load configuration")?;

    let driver = RedditDriver::new(RedditConfig {
        base_url: settings.reddit.base_url.clone(),
        access_token: settings.reddit.access_token.clone(),
        user_agent: settings.reddit.user_agent.clone(),
    })
    .context("Failed to build platform client")?;

    let state = AppState {
        platform: Arc::new(driver),
        alerts: Arc::new(AlertDispatcher::new()),
        app_account: settings.reddit.app_account.clone(),
    };

    let app = build_router(state, &settings.server.cors_origins);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to address: {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
