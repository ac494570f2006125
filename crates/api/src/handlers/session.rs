//! Handlers for the `/sessions` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use focusflow_core::error::CoreError;
use focusflow_core::session::{CreateSession, Session};
use focusflow_core::types::RecordId;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /sessions
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateSession>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Session>)> {
    let Json(input) = payload?;
    let new_session = input.validate_into()?;

    let session = state.store.insert_session(new_session).await?;
    tracing::info!(id = %session.id, kind = %session.kind, duration = session.duration, "Session created");

    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /sessions
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Session>>> {
    let sessions = state.store.list_sessions().await?;
    Ok(Json(sessions))
}

/// GET /sessions/{id}
///
/// An id that is not a valid identity cannot name any record, so it is
/// reported as not found rather than as a bad request.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Session>> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Session",
            id: id.clone(),
        })
    };

    let record_id = RecordId::parse_str(&id).map_err(|_| not_found())?;
    let session = state
        .store
        .find_session(record_id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(session))
}
