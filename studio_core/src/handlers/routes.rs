//! Route table for the studio API

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::handlers::{brief_email, health, projects};
use crate::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(health::handle_health))
        .route(
            "/api/send-brief-email",
            post(brief_email::handle_send_brief_email)
                .fallback(brief_email::handle_method_not_allowed),
        )
        .route("/api/projects", get(projects::handle_list_projects))
        .route("/api/projects/:id", get(projects::handle_get_project))
}

async fn handle_root(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "app": state.app_name,
        "version": state.version,
        "endpoints": {
            "health": "/health",
            "brief": "/api/send-brief-email",
            "projects": "/api/projects",
            "project": "/api/projects/{id}"
        }
    }))
}
