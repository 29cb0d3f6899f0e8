//! Transport layer: thin JSON handlers over the entity services.
//!
//! Handlers only translate DTOs and status codes; every rule lives below
//! the application layer.

mod dishes;
mod menus;
mod report;
mod submenus;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::application::{
    dishes::DishService, menus::MenuService, report::ReportService, submenus::SubMenuService,
};

#[derive(Clone)]
pub struct HttpState {
    pub menus: MenuService,
    pub submenus: SubMenuService,
    pub dishes: DishService,
    pub report: ReportService,
}

/// Confirmation body returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct DeleteConfirmation {
    pub status: bool,
    pub message: String,
}

impl DeleteConfirmation {
    fn for_entity(entity: &str) -> Self {
        Self {
            status: true,
            message: format!("The {entity} has been deleted"),
        }
    }
}

pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/api/v1/menus", get(menus::list).post(menus::create))
        .route(
            "/api/v1/menus/{menu_id}",
            get(menus::detail).patch(menus::update).delete(menus::delete),
        )
        .route(
            "/api/v1/menus/{menu_id}/submenus",
            get(submenus::list).post(submenus::create),
        )
        .route(
            "/api/v1/menus/{menu_id}/submenus/{submenu_id}",
            get(submenus::detail)
                .patch(submenus::update)
                .delete(submenus::delete),
        )
        .route(
            "/api/v1/menus/{menu_id}/submenus/{submenu_id}/dishes",
            get(dishes::list).post(dishes::create),
        )
        .route(
            "/api/v1/menus/{menu_id}/submenus/{submenu_id}/dishes/{dish_id}",
            get(dishes::detail)
                .patch(dishes::update)
                .delete(dishes::delete),
        )
        .route("/api/v1/report", post(report::create))
        .route("/api/v1/report/{task_id}", get(report::status))
        .route("/api/v1/report/seed", post(report::seed))
        .with_state(state)
}
