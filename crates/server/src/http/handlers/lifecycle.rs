use axum::{extract::State, http::StatusCode, Json};
use domain::SubredditName;
use serde::Deserialize;

use crate::actions::lifecycle::{run_install, run_upgrade};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LifecycleEvent {
    pub subreddit: String,
}

pub async fn install(
    State(state): State<AppState>,
    Json(event): Json<LifecycleEvent>,
) -> Result<Json<&'static str>, (StatusCode, String)> {
    let subreddit =
        SubredditName::new(event.subreddit).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    run_install(state.platform.as_ref(), subreddit.as_str(), &state.app_account)
        .await
        .map_err(|e| {
            tracing::error!("Install handling failed: {e:#}");
            (StatusCode::BAD_GATEWAY, e.to_string())
        })?;
    Ok(Json("ok"))
}

pub async fn upgrade(
    State(state): State<AppState>,
    Json(event): Json<LifecycleEvent>,
) -> Result<Json<&'static str>, (StatusCode, String)> {
    let subreddit =
        SubredditName::new(event.subreddit).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    run_upgrade(state.platform.as_ref(), subreddit.as_str(), &state.app_account)
        .await
        .map_err(|e| {
            tracing::error!("Upgrade handling failed: {e:#}");
            (StatusCode::BAD_GATEWAY, e.to_string())
        })?;
    Ok(Json("ok"))
}
