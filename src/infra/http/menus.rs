use axum::{Json, extract::Path, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::error::AppError;
use crate::application::menus::{CreateMenuCommand, UpdateMenuCommand};
use crate::domain::entities::MenuRecord;

use super::{DeleteConfirmation, HttpState};

#[derive(Debug, Deserialize)]
pub struct MenuPayload {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub submenus_count: i64,
    pub dishes_count: i64,
}

impl From<MenuRecord> for MenuResponse {
    fn from(record: MenuRecord) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title,
            description: record.description,
            submenus_count: record.submenus_count,
            dishes_count: record.dishes_count,
        }
    }
}

pub async fn list(State(state): State<HttpState>) -> Result<Json<Vec<MenuResponse>>, AppError> {
    let menus = state.menus.list().await?;
    Ok(Json(menus.into_iter().map(MenuResponse::from).collect()))
}

pub async fn detail(
    State(state): State<HttpState>,
    Path(menu_id): Path<i64>,
) -> Result<Json<MenuResponse>, AppError> {
    let menu = state.menus.get(menu_id).await?;
    Ok(Json(menu.into()))
}

pub async fn create(
    State(state): State<HttpState>,
    Json(payload): Json<MenuPayload>,
) -> Result<(StatusCode, Json<MenuResponse>), AppError> {
    let menu = state
        .menus
        .create(CreateMenuCommand {
            title: payload.title,
            description: payload.description,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(menu.into())))
}

pub async fn update(
    State(state): State<HttpState>,
    Path(menu_id): Path<i64>,
    Json(payload): Json<MenuPayload>,
) -> Result<Json<MenuResponse>, AppError> {
    let menu = state
        .menus
        .update(
            menu_id,
            UpdateMenuCommand {
                title: payload.title,
                description: payload.description,
            },
        )
        .await?;
    Ok(Json(menu.into()))
}

pub async fn delete(
    State(state): State<HttpState>,
    Path(menu_id): Path<i64>,
) -> Result<Json<DeleteConfirmation>, AppError> {
    state.menus.delete(menu_id).await?;
    Ok(Json(DeleteConfirmation::for_entity("menu")))
}
