use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use tracing::{error, info};

use crate::state::AppState;
use crate::ui;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/invite-map", post(invite_map))
        .route("/post-invite-button", post(post_invite_button))
        .with_state(state)
}

async fn index(State(state): State<Arc<AppState>>) -> String {
    format!("{} Discord Bot is running.", state.config.business_name)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InviteMapBody {
    invite_code: Option<String>,
    firstname: Option<String>,
}

/// Zapier posts inviteCode + firstname here. Unauthenticated, as the
/// original integration was; the registry entry is upserted as-is.
async fn invite_map(
    State(state): State<Arc<AppState>>,
    Json(body): Json<InviteMapBody>,
) -> (StatusCode, &'static str) {
    let code = body.invite_code.as_deref().map(str::trim).unwrap_or("");
    let firstname = body.firstname.as_deref().map(str::trim).unwrap_or("");

    if code.is_empty() || firstname.is_empty() {
        return (StatusCode::BAD_REQUEST, "inviteCode and firstname required");
    }

    state.registry.insert(code, firstname);
    info!("Mapped {code} → {firstname}");
    (StatusCode::OK, "ok")
}

/// Re-posts the staff invite button, gated by the shared Zapier secret.
/// Returns 401 on a missing/wrong secret (including when none is
/// configured), 503 while the gateway connection is not ready yet.
async fn post_invite_button(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> (StatusCode, &'static str) {
    let presented = headers
        .get("x-zapier-secret")
        .and_then(|v| v.to_str().ok());
    let authorized = match (&state.config.zapier_secret, presented) {
        (Some(expected), Some(got)) => expected.as_str() == got,
        _ => false,
    };
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "unauthorized");
    }

    let Some(http) = state.http() else {
        return (StatusCode::SERVICE_UNAVAILABLE, "bot not ready");
    };

    let prompt = ui::invite_button_message(&state.config.business_name);
    match state
        .config
        .invite_request_channel_id
        .send_message(&http, prompt)
        .await
    {
        Ok(_) => (StatusCode::OK, "ok"),
        Err(e) => {
            error!("Could not post the invite button: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to post button")
        }
    }
}
