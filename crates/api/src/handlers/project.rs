//! Handlers for the `/projects` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use focusflow_core::project::{CreateProject, Project};

use crate::error::AppResult;
use crate::state::AppState;

/// POST /projects
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateProject>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let Json(input) = payload?;
    let new_project = input.validate_into()?;

    if new_project.begin_date.instant() > new_project.deadline.instant() {
        tracing::debug!(name = %new_project.name, "Project begins after its deadline");
    }

    let project = state.store.insert_project(new_project).await?;
    tracing::info!(id = %project.id, name = %project.name, "Project created");

    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = state.store.list_projects().await?;
    Ok(Json(projects))
}
