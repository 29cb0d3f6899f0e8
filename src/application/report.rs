//! Hierarchy flattening and the export-facing report service.
//!
//! The flat (menu, submenu, dish) join repeats every parent value on each of
//! its descendant rows. For tabular rendering the repeats collapse to
//! blanks, giving the merged-cell effect: a menu title prints once and stays
//! blank until the menu changes.

use std::sync::Arc;

use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::export::{ExportError, ExportQueue, ExportState};
use crate::application::repos::{CatalogRow, ReportRepo};
use crate::domain::entities::EntityKind;

/// One rendered report row: menu id/title/description, submenu
/// id/title/description, dish id/title/description/price.
pub type ReportRow = [String; 10];

pub const REPORT_COLUMNS: usize = 10;

fn raw_cells(row: &CatalogRow) -> ReportRow {
    [
        row.menu_id.to_string(),
        row.menu_title.clone(),
        row.menu_description.clone(),
        row.submenu_id.to_string(),
        row.submenu_title.clone(),
        row.submenu_description.clone(),
        row.dish_id.to_string(),
        row.dish_title.clone(),
        row.dish_description.clone(),
        row.dish_price.clone(),
    ]
}

/// Collapse repeated parent values into blanks.
///
/// Carries a per-column "last shown value": a cell is blanked iff it equals
/// the value most recently shown in its column; otherwise it is shown and
/// becomes the new last-shown value. On input ordered by menu, submenu,
/// dish this blanks exactly the runs of repeated parents while dish cells,
/// distinct on every row, always print.
pub fn flatten(rows: &[CatalogRow]) -> Vec<ReportRow> {
    let mut last_shown: [Option<String>; REPORT_COLUMNS] = Default::default();
    let mut out = Vec::with_capacity(rows.len());

    for row in rows {
        let raw = raw_cells(row);
        let mut rendered = ReportRow::default();
        for (column, value) in raw.into_iter().enumerate() {
            if last_shown[column].as_deref() == Some(value.as_str()) {
                continue;
            }
            last_shown[column] = Some(value.clone());
            rendered[column] = value;
        }
        out.push(rendered);
    }

    out
}

/// Builds the flattened snapshot and hands it to the export pipeline.
#[derive(Clone)]
pub struct ReportService {
    repo: Arc<dyn ReportRepo>,
    queue: Arc<dyn ExportQueue>,
}

impl ReportService {
    pub fn new(repo: Arc<dyn ReportRepo>, queue: Arc<dyn ExportQueue>) -> Self {
        Self { repo, queue }
    }

    /// Compute a fresh flattened snapshot (never cached; the report is a
    /// point-in-time full-table view) and submit it for export.
    pub async fn export(&self) -> Result<Uuid, AppError> {
        let rows = self
            .repo
            .full_catalog_rows()
            .await
            .map_err(|err| AppError::from_repo(EntityKind::Menu, err))?;
        let flattened = flatten(&rows);

        self.queue
            .submit(flattened)
            .await
            .map_err(|err| AppError::unexpected(err.to_string()))
    }

    pub async fn status(&self, task_id: Uuid) -> Result<ExportState, AppError> {
        match self.queue.status(task_id).await {
            Ok(state) => Ok(state),
            Err(ExportError::NotFound) => Err(AppError::ExportTaskNotFound),
            Err(err) => Err(AppError::unexpected(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        menu: (i64, &str, &str),
        submenu: (i64, &str, &str),
        dish: (i64, &str, &str, &str),
    ) -> CatalogRow {
        CatalogRow {
            menu_id: menu.0,
            menu_title: menu.1.to_string(),
            menu_description: menu.2.to_string(),
            submenu_id: submenu.0,
            submenu_title: submenu.1.to_string(),
            submenu_description: submenu.2.to_string(),
            dish_id: dish.0,
            dish_title: dish.1.to_string(),
            dish_description: dish.2.to_string(),
            dish_price: dish.3.to_string(),
        }
    }

    #[test]
    fn shared_parents_blank_after_first_row() {
        let rows = vec![
            row((1, "Food", "Mains"), (1, "Starters", "Cold"), (1, "Herring", "Pickled", "182.99")),
            row((1, "Food", "Mains"), (1, "Starters", "Cold"), (2, "Platter", "Seafood", "215.36")),
            row((1, "Food", "Mains"), (1, "Starters", "Cold"), (3, "Ramen", "Chicken", "166.87")),
        ];

        let flat = flatten(&rows);
        assert_eq!(flat.len(), 3);

        // Row 1 shows everything.
        assert_eq!(flat[0][0], "1");
        assert_eq!(flat[0][1], "Food");
        assert_eq!(flat[0][4], "Starters");

        // Rows 2 and 3 blank the six parent cells, dish cells stay populated.
        for rendered in &flat[1..] {
            for cell in &rendered[..6] {
                assert_eq!(cell, "");
            }
            for cell in &rendered[6..] {
                assert_ne!(cell, "");
            }
        }
    }

    #[test]
    fn parent_reappears_when_group_changes() {
        let rows = vec![
            row((1, "Food", "Mains"), (1, "Starters", "Cold"), (1, "Herring", "Pickled", "182.99")),
            row((1, "Food", "Mains"), (2, "Ramen", "Hot"), (2, "Daizu", "Broth", "166.87")),
            row((2, "Drinks", "Bar"), (3, "Wine", "Red"), (3, "Chianti", "Dry", "1523.37")),
        ];

        let flat = flatten(&rows);

        // Menu unchanged on row 2: blanked. Submenu changed: shown.
        assert_eq!(flat[1][0], "");
        assert_eq!(flat[1][1], "");
        assert_eq!(flat[1][3], "2");
        assert_eq!(flat[1][4], "Ramen");

        // Row 3 starts a new menu group: everything shown again.
        assert_eq!(flat[2][0], "2");
        assert_eq!(flat[2][1], "Drinks");
        assert_eq!(flat[2][3], "3");
    }

    #[test]
    fn flattening_is_idempotent_on_unchanged_input() {
        let rows = vec![
            row((1, "Food", "Mains"), (1, "Starters", "Cold"), (1, "Herring", "Pickled", "182.99")),
            row((1, "Food", "Mains"), (1, "Starters", "Cold"), (2, "Platter", "Seafood", "215.36")),
        ];

        assert_eq!(flatten(&rows), flatten(&rows));
    }

    #[test]
    fn non_blank_cells_equal_raw_values() {
        let rows = vec![
            row((1, "Food", "Mains"), (1, "Starters", "Cold"), (1, "Herring", "Pickled", "182.99")),
            row((1, "Food", "Mains"), (2, "Ramen", "Hot"), (2, "Daizu", "Broth", "166.87")),
        ];

        let flat = flatten(&rows);
        for (rendered, original) in flat.iter().zip(&rows) {
            let raw = raw_cells(original);
            for (cell, raw_cell) in rendered.iter().zip(raw.iter()) {
                if !cell.is_empty() {
                    assert_eq!(cell, raw_cell);
                }
            }
        }
    }

    #[test]
    fn empty_join_produces_empty_report() {
        assert!(flatten(&[]).is_empty());
    }
}
