use axum::{extract::State, http::StatusCode, Json};
use domain::{PinRequest, SubredditName};
use serde::{Deserialize, Serialize};

use crate::actions::delete::{run_delete, DeleteOutcome, DeleteRequest};
use crate::actions::pin::{run_pin, PinOutcome};
use crate::state::AppState;

// --- DTOs ---

#[derive(Deserialize)]
pub struct PinActionRequest {
    pub subreddit: String,
    pub comment_id: String,
    pub actor: String,
    pub note: Option<String>,
    #[serde(default)]
    pub username_visible: bool,
}

#[derive(Deserialize)]
pub struct DeleteActionRequest {
    pub subreddit: String,
    pub comment_id: String,
    pub actor: String,
}

/// Toast text shown to the invoking user.
#[derive(Serialize)]
pub struct ActionResponse {
    pub toast: String,
}

// --- Handlers ---

pub async fn pin(
    State(state): State<AppState>,
    Json(payload): Json<PinActionRequest>,
) -> Result<Json<ActionResponse>, (StatusCode, String)> {
    let subreddit =
        SubredditName::new(payload.subreddit).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let req = PinRequest {
        subreddit,
        comment_id: payload.comment_id,
        actor: payload.actor,
        note: payload.note,
        username_visible: payload.username_visible,
    };

    match run_pin(state.platform.as_ref(), &state.alerts, &req).await {
        Ok(PinOutcome::Posted { toast }) => Ok(Json(ActionResponse {
            toast: toast.to_string(),
        })),
        Ok(PinOutcome::Denied { toast }) => Err((StatusCode::FORBIDDEN, toast.to_string())),
        Err(e) => {
            tracing::error!("Pin action failed: {e:#}");
            Err((StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Json(payload): Json<DeleteActionRequest>,
) -> Result<Json<ActionResponse>, (StatusCode, String)> {
    let subreddit =
        SubredditName::new(payload.subreddit).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let req = DeleteRequest {
        subreddit,
        comment_id: payload.comment_id,
        actor: payload.actor,
    };

    match run_delete(state.platform.as_ref(), &state.app_account, &req).await {
        Ok(DeleteOutcome::Deleted { toast }) => Ok(Json(ActionResponse {
            toast: toast.to_string(),
        })),
        Ok(DeleteOutcome::Denied { toast }) => Err((StatusCode::FORBIDDEN, toast)),
        Err(e) => {
            tracing::error!("Delete action failed: {e:#}");
            Err((StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}
