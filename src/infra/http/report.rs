use axum::{Json, extract::Path, extract::State, http::StatusCode};
use serde::Serialize;
use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::export::ExportState;
use crate::application::seed::{self, SeedSummary};

use super::HttpState;

#[derive(Debug, Serialize)]
pub struct TaskCreatedResponse {
    pub task_id: String,
    pub task_status: &'static str,
}

/// Kick off a full-catalog export; the snapshot is flattened and handed to
/// the pipeline before this returns.
pub async fn create(
    State(state): State<HttpState>,
) -> Result<(StatusCode, Json<TaskCreatedResponse>), AppError> {
    let task_id = state.report.export().await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(TaskCreatedResponse {
            task_id: task_id.to_string(),
            task_status: "pending",
        }),
    ))
}

pub async fn status(
    State(state): State<HttpState>,
    Path(task_id): Path<Uuid>,
) -> Result<Json<ExportState>, AppError> {
    let export_state = state.report.status(task_id).await?;
    Ok(Json(export_state))
}

pub async fn seed(State(state): State<HttpState>) -> Result<Json<SeedSummary>, AppError> {
    let summary =
        seed::seed_demo_catalog(&state.menus, &state.submenus, &state.dishes).await?;
    Ok(Json(summary))
}
