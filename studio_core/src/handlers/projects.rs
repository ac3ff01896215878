use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::{AppError, Result},
    models::Project,
    AppState,
};

pub async fn handle_list_projects(State(state): State<AppState>) -> Json<Vec<Project>> {
    Json(state.projects.all().to_vec())
}

pub async fn handle_get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>> {
    state
        .projects
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
}
