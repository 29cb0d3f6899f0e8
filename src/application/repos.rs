//! Repository traits describing persistence adapters.
//!
//! Counter-bearing mutations (submenu/dish create and delete) run as one
//! atomic unit: the child row change and the ancestor counter adjustments
//! either all commit or none do. Implementations must return
//! [`RepoError::NotFound`], persisting nothing, when an owning ancestor is
//! absent.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{DishRecord, MenuRecord, SubMenuRecord};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreateMenuParams {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct UpdateMenuParams {
    pub id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct CreateSubMenuParams {
    pub menu_id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct UpdateSubMenuParams {
    pub id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct CreateDishParams {
    pub menu_id: i64,
    pub submenu_id: i64,
    pub title: String,
    pub description: String,
    /// Already normalized to two fractional digits by the service.
    pub price: String,
}

#[derive(Debug, Clone)]
pub struct UpdateDishParams {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: String,
}

/// One row of the flat three-level join, ordered by menu, submenu, dish id.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRow {
    pub menu_id: i64,
    pub menu_title: String,
    pub menu_description: String,
    pub submenu_id: i64,
    pub submenu_title: String,
    pub submenu_description: String,
    pub dish_id: i64,
    pub dish_title: String,
    pub dish_description: String,
    pub dish_price: String,
}

#[async_trait]
pub trait MenusRepo: Send + Sync {
    async fn list_menus(&self) -> Result<Vec<MenuRecord>, RepoError>;

    async fn find_menu_by_id(&self, id: i64) -> Result<Option<MenuRecord>, RepoError>;

    async fn find_menu_by_title(&self, title: &str) -> Result<Option<MenuRecord>, RepoError>;

    async fn create_menu(&self, params: CreateMenuParams) -> Result<MenuRecord, RepoError>;

    async fn update_menu(&self, params: UpdateMenuParams) -> Result<MenuRecord, RepoError>;

    /// Deletes the menu and, by cascade, every submenu and dish below it.
    async fn delete_menu(&self, id: i64) -> Result<(), RepoError>;
}

#[async_trait]
pub trait SubMenusRepo: Send + Sync {
    async fn list_submenus(&self) -> Result<Vec<SubMenuRecord>, RepoError>;

    async fn find_submenu_by_id(&self, id: i64) -> Result<Option<SubMenuRecord>, RepoError>;

    async fn find_submenu_by_title(&self, title: &str)
    -> Result<Option<SubMenuRecord>, RepoError>;

    /// Inserts the submenu and increments the owning menu's `submenus_count`
    /// in the same transaction.
    async fn create_submenu(&self, params: CreateSubMenuParams)
    -> Result<SubMenuRecord, RepoError>;

    async fn update_submenu(&self, params: UpdateSubMenuParams)
    -> Result<SubMenuRecord, RepoError>;

    /// Deletes the submenu (cascading to its dishes) and folds its own dish
    /// total out of the owning menu in the same transaction.
    async fn delete_submenu(&self, menu_id: i64, id: i64) -> Result<(), RepoError>;
}

#[async_trait]
pub trait DishesRepo: Send + Sync {
    async fn list_dishes(&self) -> Result<Vec<DishRecord>, RepoError>;

    async fn find_dish_by_id(&self, id: i64) -> Result<Option<DishRecord>, RepoError>;

    async fn find_dish_by_title(&self, title: &str) -> Result<Option<DishRecord>, RepoError>;

    /// Inserts the dish and increments both ancestor dish counters in the
    /// same transaction. The submenu must belong to `params.menu_id`.
    async fn create_dish(&self, params: CreateDishParams) -> Result<DishRecord, RepoError>;

    async fn update_dish(&self, params: UpdateDishParams) -> Result<DishRecord, RepoError>;

    async fn delete_dish(&self, menu_id: i64, submenu_id: i64, id: i64)
    -> Result<(), RepoError>;
}

#[async_trait]
pub trait ReportRepo: Send + Sync {
    /// The flat (menu, submenu, dish) join, ordered by ascending id at each
    /// level. Menus without submenus and submenus without dishes do not
    /// appear; the report is a join, not an outline.
    async fn full_catalog_rows(&self) -> Result<Vec<CatalogRow>, RepoError>;
}
