use axum::{extract::State, response::IntoResponse, Json};

use crate::AppState;

pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    let mailer = state
        .mailer
        .as_ref()
        .map(|m| m.name())
        .unwrap_or("unconfigured");

    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
        "version": state.version,
        "mailer": mailer,
        "projects": state.projects.len(),
    }))
}
