use async_trait::async_trait;

use crate::application::repos::{CreateDishParams, DishesRepo, RepoError, UpdateDishParams};
use crate::domain::aggregates;
use crate::domain::entities::DishRecord;

use super::{PostgresCatalog, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct DishRow {
    id: i64,
    title: String,
    description: String,
    price: String,
    submenu_id: i64,
}

impl From<DishRow> for DishRecord {
    fn from(row: DishRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            submenu_id: row.submenu_id,
        }
    }
}

#[async_trait]
impl DishesRepo for PostgresCatalog {
    async fn list_dishes(&self) -> Result<Vec<DishRecord>, RepoError> {
        let rows = sqlx::query_as::<_, DishRow>(
            "SELECT id, title, description, price, submenu_id FROM dish ORDER BY id",
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(DishRecord::from).collect())
    }

    async fn find_dish_by_id(&self, id: i64) -> Result<Option<DishRecord>, RepoError> {
        let row = sqlx::query_as::<_, DishRow>(
            "SELECT id, title, description, price, submenu_id FROM dish WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(DishRecord::from))
    }

    async fn find_dish_by_title(&self, title: &str) -> Result<Option<DishRecord>, RepoError> {
        let row = sqlx::query_as::<_, DishRow>(
            "SELECT id, title, description, price, submenu_id FROM dish WHERE title = $1",
        )
        .bind(title)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(DishRecord::from))
    }

    async fn create_dish(&self, params: CreateDishParams) -> Result<DishRecord, RepoError> {
        let (submenu_delta, menu_delta) = aggregates::dish_created();
        let mut tx = self.begin().await.map_err(map_sqlx_error)?;

        // The scoped WHERE both locks the submenu row and verifies it
        // belongs to the claimed menu.
        let touched = sqlx::query(
            "UPDATE submenu SET dishes_count = dishes_count + $1 \
             WHERE id = $2 AND menu_id = $3",
        )
        .bind(submenu_delta.dishes_count)
        .bind(params.submenu_id)
        .bind(params.menu_id)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;
        if touched.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        let touched = sqlx::query("UPDATE menu SET dishes_count = dishes_count + $1 WHERE id = $2")
            .bind(menu_delta.dishes_count)
            .bind(params.menu_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        if touched.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        let row = sqlx::query_as::<_, DishRow>(
            "INSERT INTO dish (title, description, price, submenu_id) VALUES ($1, $2, $3, $4) \
             RETURNING id, title, description, price, submenu_id",
        )
        .bind(&params.title)
        .bind(&params.description)
        .bind(&params.price)
        .bind(params.submenu_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(row.into())
    }

    async fn update_dish(&self, params: UpdateDishParams) -> Result<DishRecord, RepoError> {
        let row = sqlx::query_as::<_, DishRow>(
            "UPDATE dish SET title = $2, description = $3, price = $4 WHERE id = $1 \
             RETURNING id, title, description, price, submenu_id",
        )
        .bind(params.id)
        .bind(&params.title)
        .bind(&params.description)
        .bind(&params.price)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        row.map(DishRecord::from).ok_or(RepoError::NotFound)
    }

    async fn delete_dish(&self, menu_id: i64, submenu_id: i64, id: i64) -> Result<(), RepoError> {
        let (submenu_delta, menu_delta) = aggregates::dish_deleted();
        let mut tx = self.begin().await.map_err(map_sqlx_error)?;

        let deleted = sqlx::query(
            "DELETE FROM dish USING submenu \
             WHERE dish.id = $1 AND dish.submenu_id = $2 \
             AND submenu.id = dish.submenu_id AND submenu.menu_id = $3",
        )
        .bind(id)
        .bind(submenu_id)
        .bind(menu_id)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;
        if deleted.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        let touched = sqlx::query("UPDATE submenu SET dishes_count = dishes_count + $1 WHERE id = $2")
            .bind(submenu_delta.dishes_count)
            .bind(submenu_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        if touched.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        let touched = sqlx::query("UPDATE menu SET dishes_count = dishes_count + $1 WHERE id = $2")
            .bind(menu_delta.dishes_count)
            .bind(menu_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        if touched.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }
}
