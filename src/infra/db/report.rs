use async_trait::async_trait;

use crate::application::repos::{CatalogRow, RepoError, ReportRepo};

use super::{PostgresCatalog, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct JoinRow {
    menu_id: i64,
    menu_title: String,
    menu_description: String,
    submenu_id: i64,
    submenu_title: String,
    submenu_description: String,
    dish_id: i64,
    dish_title: String,
    dish_description: String,
    dish_price: String,
}

impl From<JoinRow> for CatalogRow {
    fn from(row: JoinRow) -> Self {
        Self {
            menu_id: row.menu_id,
            menu_title: row.menu_title,
            menu_description: row.menu_description,
            submenu_id: row.submenu_id,
            submenu_title: row.submenu_title,
            submenu_description: row.submenu_description,
            dish_id: row.dish_id,
            dish_title: row.dish_title,
            dish_description: row.dish_description,
            dish_price: row.dish_price,
        }
    }
}

#[async_trait]
impl ReportRepo for PostgresCatalog {
    async fn full_catalog_rows(&self) -> Result<Vec<CatalogRow>, RepoError> {
        let rows = sqlx::query_as::<_, JoinRow>(
            "SELECT m.id AS menu_id, m.title AS menu_title, m.description AS menu_description, \
                    s.id AS submenu_id, s.title AS submenu_title, s.description AS submenu_description, \
                    d.id AS dish_id, d.title AS dish_title, d.description AS dish_description, \
                    d.price AS dish_price \
             FROM menu m \
             JOIN submenu s ON s.menu_id = m.id \
             JOIN dish d ON d.submenu_id = s.id \
             ORDER BY m.id, s.id, d.id",
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CatalogRow::from).collect())
    }
}
