use axum::{Json, extract::Path, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::error::AppError;
use crate::application::submenus::{CreateSubMenuCommand, UpdateSubMenuCommand};
use crate::domain::entities::SubMenuRecord;

use super::{DeleteConfirmation, HttpState};

#[derive(Debug, Deserialize)]
pub struct SubMenuPayload {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct SubMenuResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub dishes_count: i64,
}

impl From<SubMenuRecord> for SubMenuResponse {
    fn from(record: SubMenuRecord) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title,
            description: record.description,
            dishes_count: record.dishes_count,
        }
    }
}

pub async fn list(
    State(state): State<HttpState>,
    Path(_menu_id): Path<i64>,
) -> Result<Json<Vec<SubMenuResponse>>, AppError> {
    let submenus = state.submenus.list().await?;
    Ok(Json(
        submenus.into_iter().map(SubMenuResponse::from).collect(),
    ))
}

pub async fn detail(
    State(state): State<HttpState>,
    Path((_menu_id, submenu_id)): Path<(i64, i64)>,
) -> Result<Json<SubMenuResponse>, AppError> {
    let submenu = state.submenus.get(submenu_id).await?;
    Ok(Json(submenu.into()))
}

pub async fn create(
    State(state): State<HttpState>,
    Path(menu_id): Path<i64>,
    Json(payload): Json<SubMenuPayload>,
) -> Result<(StatusCode, Json<SubMenuResponse>), AppError> {
    let submenu = state
        .submenus
        .create(
            menu_id,
            CreateSubMenuCommand {
                title: payload.title,
                description: payload.description,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(submenu.into())))
}

pub async fn update(
    State(state): State<HttpState>,
    Path((_menu_id, submenu_id)): Path<(i64, i64)>,
    Json(payload): Json<SubMenuPayload>,
) -> Result<Json<SubMenuResponse>, AppError> {
    let submenu = state
        .submenus
        .update(
            submenu_id,
            UpdateSubMenuCommand {
                title: payload.title,
                description: payload.description,
            },
        )
        .await?;
    Ok(Json(submenu.into()))
}

pub async fn delete(
    State(state): State<HttpState>,
    Path((menu_id, submenu_id)): Path<(i64, i64)>,
) -> Result<Json<DeleteConfirmation>, AppError> {
    state.submenus.delete(menu_id, submenu_id).await?;
    Ok(Json(DeleteConfirmation::for_entity("submenu")))
}
