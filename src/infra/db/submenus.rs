use async_trait::async_trait;

use crate::application::repos::{
    CreateSubMenuParams, RepoError, SubMenusRepo, UpdateSubMenuParams,
};
use crate::domain::aggregates;
use crate::domain::entities::SubMenuRecord;

use super::{PostgresCatalog, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct SubMenuRow {
    id: i64,
    title: String,
    description: String,
    dishes_count: i64,
    menu_id: i64,
}

impl From<SubMenuRow> for SubMenuRecord {
    fn from(row: SubMenuRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            dishes_count: row.dishes_count,
            menu_id: row.menu_id,
        }
    }
}

#[async_trait]
impl SubMenusRepo for PostgresCatalog {
    async fn list_submenus(&self) -> Result<Vec<SubMenuRecord>, RepoError> {
        let rows = sqlx::query_as::<_, SubMenuRow>(
            "SELECT id, title, description, dishes_count, menu_id \
             FROM submenu ORDER BY id",
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(SubMenuRecord::from).collect())
    }

    async fn find_submenu_by_id(&self, id: i64) -> Result<Option<SubMenuRecord>, RepoError> {
        let row = sqlx::query_as::<_, SubMenuRow>(
            "SELECT id, title, description, dishes_count, menu_id \
             FROM submenu WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(SubMenuRecord::from))
    }

    async fn find_submenu_by_title(
        &self,
        title: &str,
    ) -> Result<Option<SubMenuRecord>, RepoError> {
        let row = sqlx::query_as::<_, SubMenuRow>(
            "SELECT id, title, description, dishes_count, menu_id \
             FROM submenu WHERE title = $1",
        )
        .bind(title)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(SubMenuRecord::from))
    }

    async fn create_submenu(
        &self,
        params: CreateSubMenuParams,
    ) -> Result<SubMenuRecord, RepoError> {
        let delta = aggregates::submenu_created();
        let mut tx = self.begin().await.map_err(map_sqlx_error)?;

        // Locks the menu row; an absent menu aborts before anything is
        // inserted.
        let touched = sqlx::query("UPDATE menu SET submenus_count = submenus_count + $1 WHERE id = $2")
            .bind(delta.submenus_count)
            .bind(params.menu_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        if touched.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        let row = sqlx::query_as::<_, SubMenuRow>(
            "INSERT INTO submenu (title, description, menu_id) VALUES ($1, $2, $3) \
             RETURNING id, title, description, dishes_count, menu_id",
        )
        .bind(&params.title)
        .bind(&params.description)
        .bind(params.menu_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(row.into())
    }

    async fn update_submenu(
        &self,
        params: UpdateSubMenuParams,
    ) -> Result<SubMenuRecord, RepoError> {
        let row = sqlx::query_as::<_, SubMenuRow>(
            "UPDATE submenu SET title = $2, description = $3 WHERE id = $1 \
             RETURNING id, title, description, dishes_count, menu_id",
        )
        .bind(params.id)
        .bind(&params.title)
        .bind(&params.description)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        row.map(SubMenuRecord::from).ok_or(RepoError::NotFound)
    }

    async fn delete_submenu(&self, menu_id: i64, id: i64) -> Result<(), RepoError> {
        let mut tx = self.begin().await.map_err(map_sqlx_error)?;

        let row = sqlx::query_as::<_, SubMenuRow>(
            "SELECT id, title, description, dishes_count, menu_id \
             FROM submenu WHERE id = $1 AND menu_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(menu_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;
        let Some(row) = row else {
            return Err(RepoError::NotFound);
        };

        // Fold the submenu's own dish total out of the menu; the cascade
        // below removes the dishes without touching counters again.
        let delta = aggregates::submenu_deleted(row.dishes_count);
        let touched = sqlx::query(
            "UPDATE menu SET submenus_count = submenus_count + $1, dishes_count = dishes_count + $2 \
             WHERE id = $3",
        )
        .bind(delta.submenus_count)
        .bind(delta.dishes_count)
        .bind(menu_id)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;
        if touched.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        sqlx::query("DELETE FROM submenu WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }
}
