use axum::{Json, extract::Path, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::dishes::{CreateDishCommand, UpdateDishCommand};
use crate::application::error::AppError;
use crate::domain::entities::DishRecord;

use super::{DeleteConfirmation, HttpState};

#[derive(Debug, Deserialize)]
pub struct DishPayload {
    pub title: String,
    pub description: String,
    pub price: String,
}

#[derive(Debug, Serialize)]
pub struct DishResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
}

impl From<DishRecord> for DishResponse {
    fn from(record: DishRecord) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title,
            description: record.description,
            price: record.price,
        }
    }
}

pub async fn list(
    State(state): State<HttpState>,
    Path((_menu_id, _submenu_id)): Path<(i64, i64)>,
) -> Result<Json<Vec<DishResponse>>, AppError> {
    let dishes = state.dishes.list().await?;
    Ok(Json(dishes.into_iter().map(DishResponse::from).collect()))
}

pub async fn detail(
    State(state): State<HttpState>,
    Path((_menu_id, _submenu_id, dish_id)): Path<(i64, i64, i64)>,
) -> Result<Json<DishResponse>, AppError> {
    let dish = state.dishes.get(dish_id).await?;
    Ok(Json(dish.into()))
}

pub async fn create(
    State(state): State<HttpState>,
    Path((menu_id, submenu_id)): Path<(i64, i64)>,
    Json(payload): Json<DishPayload>,
) -> Result<(StatusCode, Json<DishResponse>), AppError> {
    let dish = state
        .dishes
        .create(
            menu_id,
            submenu_id,
            CreateDishCommand {
                title: payload.title,
                description: payload.description,
                price: payload.price,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(dish.into())))
}

pub async fn update(
    State(state): State<HttpState>,
    Path((_menu_id, _submenu_id, dish_id)): Path<(i64, i64, i64)>,
    Json(payload): Json<DishPayload>,
) -> Result<Json<DishResponse>, AppError> {
    let dish = state
        .dishes
        .update(
            dish_id,
            UpdateDishCommand {
                title: payload.title,
                description: payload.description,
                price: payload.price,
            },
        )
        .await?;
    Ok(Json(dish.into()))
}

pub async fn delete(
    State(state): State<HttpState>,
    Path((menu_id, submenu_id, dish_id)): Path<(i64, i64, i64)>,
) -> Result<Json<DeleteConfirmation>, AppError> {
    state.dishes.delete(menu_id, submenu_id, dish_id).await?;
    Ok(Json(DeleteConfirmation::for_entity("dish")))
}
