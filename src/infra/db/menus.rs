use async_trait::async_trait;

use crate::application::repos::{CreateMenuParams, MenusRepo, RepoError, UpdateMenuParams};
use crate::domain::entities::MenuRecord;

use super::{PostgresCatalog, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct MenuRow {
    id: i64,
    title: String,
    description: String,
    submenus_count: i64,
    dishes_count: i64,
}

impl From<MenuRow> for MenuRecord {
    fn from(row: MenuRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            submenus_count: row.submenus_count,
            dishes_count: row.dishes_count,
        }
    }
}

#[async_trait]
impl MenusRepo for PostgresCatalog {
    async fn list_menus(&self) -> Result<Vec<MenuRecord>, RepoError> {
        let rows = sqlx::query_as::<_, MenuRow>(
            "SELECT id, title, description, submenus_count, dishes_count \
             FROM menu ORDER BY id",
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(MenuRecord::from).collect())
    }

    async fn find_menu_by_id(&self, id: i64) -> Result<Option<MenuRecord>, RepoError> {
        let row = sqlx::query_as::<_, MenuRow>(
            "SELECT id, title, description, submenus_count, dishes_count \
             FROM menu WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(MenuRecord::from))
    }

    async fn find_menu_by_title(&self, title: &str) -> Result<Option<MenuRecord>, RepoError> {
        let row = sqlx::query_as::<_, MenuRow>(
            "SELECT id, title, description, submenus_count, dishes_count \
             FROM menu WHERE title = $1",
        )
        .bind(title)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(MenuRecord::from))
    }

    async fn create_menu(&self, params: CreateMenuParams) -> Result<MenuRecord, RepoError> {
        let row = sqlx::query_as::<_, MenuRow>(
            "INSERT INTO menu (title, description) VALUES ($1, $2) \
             RETURNING id, title, description, submenus_count, dishes_count",
        )
        .bind(&params.title)
        .bind(&params.description)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn update_menu(&self, params: UpdateMenuParams) -> Result<MenuRecord, RepoError> {
        let row = sqlx::query_as::<_, MenuRow>(
            "UPDATE menu SET title = $2, description = $3 WHERE id = $1 \
             RETURNING id, title, description, submenus_count, dishes_count",
        )
        .bind(params.id)
        .bind(&params.title)
        .bind(&params.description)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        row.map(MenuRecord::from).ok_or(RepoError::NotFound)
    }

    async fn delete_menu(&self, id: i64) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM menu WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
