//! In-memory Store Gateway implementation.
//!
//! Backs hermetic tests with the same contract as the Postgres catalog:
//! store-assigned ids, unique titles enforced as a storage constraint,
//! cascading ownership, and counter adjustments applied atomically with the
//! row mutation (a single lock guard scope plays the role of the
//! transaction).

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::application::repos::{
    CatalogRow, CreateDishParams, CreateMenuParams, CreateSubMenuParams, DishesRepo, MenusRepo,
    RepoError, ReportRepo, SubMenusRepo, UpdateDishParams, UpdateMenuParams, UpdateSubMenuParams,
};
use crate::cache::lock::{rw_read, rw_write};
use crate::domain::aggregates;
use crate::domain::entities::{DishRecord, MenuRecord, SubMenuRecord};

const SOURCE: &str = "infra::memory";

#[derive(Default)]
struct State {
    menus: BTreeMap<i64, MenuRecord>,
    submenus: BTreeMap<i64, SubMenuRecord>,
    dishes: BTreeMap<i64, DishRecord>,
    next_id: i64,
}

impl State {
    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

fn duplicate(constraint: &str) -> RepoError {
    RepoError::Duplicate {
        constraint: constraint.to_string(),
    }
}

/// HashMap-backed catalog store.
#[derive(Default)]
pub struct MemoryCatalog {
    state: RwLock<State>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenusRepo for MemoryCatalog {
    async fn list_menus(&self) -> Result<Vec<MenuRecord>, RepoError> {
        let state = rw_read(&self.state, SOURCE, "list_menus");
        Ok(state.menus.values().cloned().collect())
    }

    async fn find_menu_by_id(&self, id: i64) -> Result<Option<MenuRecord>, RepoError> {
        let state = rw_read(&self.state, SOURCE, "find_menu_by_id");
        Ok(state.menus.get(&id).cloned())
    }

    async fn find_menu_by_title(&self, title: &str) -> Result<Option<MenuRecord>, RepoError> {
        let state = rw_read(&self.state, SOURCE, "find_menu_by_title");
        Ok(state.menus.values().find(|m| m.title == title).cloned())
    }

    async fn create_menu(&self, params: CreateMenuParams) -> Result<MenuRecord, RepoError> {
        let mut state = rw_write(&self.state, SOURCE, "create_menu");
        if state.menus.values().any(|m| m.title == params.title) {
            return Err(duplicate("menu_title_key"));
        }

        let id = state.assign_id();
        let menu = MenuRecord {
            id,
            title: params.title,
            description: params.description,
            submenus_count: 0,
            dishes_count: 0,
        };
        state.menus.insert(id, menu.clone());
        Ok(menu)
    }

    async fn update_menu(&self, params: UpdateMenuParams) -> Result<MenuRecord, RepoError> {
        let mut state = rw_write(&self.state, SOURCE, "update_menu");
        let menu = state.menus.get_mut(&params.id).ok_or(RepoError::NotFound)?;
        menu.title = params.title;
        menu.description = params.description;
        Ok(menu.clone())
    }

    async fn delete_menu(&self, id: i64) -> Result<(), RepoError> {
        let mut state = rw_write(&self.state, SOURCE, "delete_menu");
        if state.menus.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }

        let orphaned: Vec<i64> = state
            .submenus
            .values()
            .filter(|s| s.menu_id == id)
            .map(|s| s.id)
            .collect();
        for submenu_id in orphaned {
            state.submenus.remove(&submenu_id);
            state.dishes.retain(|_, dish| dish.submenu_id != submenu_id);
        }
        Ok(())
    }
}

#[async_trait]
impl SubMenusRepo for MemoryCatalog {
    async fn list_submenus(&self) -> Result<Vec<SubMenuRecord>, RepoError> {
        let state = rw_read(&self.state, SOURCE, "list_submenus");
        Ok(state.submenus.values().cloned().collect())
    }

    async fn find_submenu_by_id(&self, id: i64) -> Result<Option<SubMenuRecord>, RepoError> {
        let state = rw_read(&self.state, SOURCE, "find_submenu_by_id");
        Ok(state.submenus.get(&id).cloned())
    }

    async fn find_submenu_by_title(
        &self,
        title: &str,
    ) -> Result<Option<SubMenuRecord>, RepoError> {
        let state = rw_read(&self.state, SOURCE, "find_submenu_by_title");
        Ok(state.submenus.values().find(|s| s.title == title).cloned())
    }

    async fn create_submenu(
        &self,
        params: CreateSubMenuParams,
    ) -> Result<SubMenuRecord, RepoError> {
        let mut state = rw_write(&self.state, SOURCE, "create_submenu");
        if state.submenus.values().any(|s| s.title == params.title) {
            return Err(duplicate("submenu_title_key"));
        }
        if !state.menus.contains_key(&params.menu_id) {
            return Err(RepoError::NotFound);
        }

        let id = state.assign_id();
        let submenu = SubMenuRecord {
            id,
            title: params.title,
            description: params.description,
            dishes_count: 0,
            menu_id: params.menu_id,
        };
        state.submenus.insert(id, submenu.clone());

        let delta = aggregates::submenu_created();
        let menu = state
            .menus
            .get_mut(&params.menu_id)
            .ok_or(RepoError::NotFound)?;
        menu.submenus_count += delta.submenus_count;
        menu.dishes_count += delta.dishes_count;
        Ok(submenu)
    }

    async fn update_submenu(
        &self,
        params: UpdateSubMenuParams,
    ) -> Result<SubMenuRecord, RepoError> {
        let mut state = rw_write(&self.state, SOURCE, "update_submenu");
        let submenu = state
            .submenus
            .get_mut(&params.id)
            .ok_or(RepoError::NotFound)?;
        submenu.title = params.title;
        submenu.description = params.description;
        Ok(submenu.clone())
    }

    async fn delete_submenu(&self, menu_id: i64, id: i64) -> Result<(), RepoError> {
        let mut state = rw_write(&self.state, SOURCE, "delete_submenu");
        let dishes_count = match state.submenus.get(&id) {
            Some(submenu) if submenu.menu_id == menu_id => submenu.dishes_count,
            _ => return Err(RepoError::NotFound),
        };

        let delta = aggregates::submenu_deleted(dishes_count);
        let menu = state.menus.get_mut(&menu_id).ok_or(RepoError::NotFound)?;
        menu.submenus_count += delta.submenus_count;
        menu.dishes_count += delta.dishes_count;

        state.submenus.remove(&id);
        state.dishes.retain(|_, dish| dish.submenu_id != id);
        Ok(())
    }
}

#[async_trait]
impl DishesRepo for MemoryCatalog {
    async fn list_dishes(&self) -> Result<Vec<DishRecord>, RepoError> {
        let state = rw_read(&self.state, SOURCE, "list_dishes");
        Ok(state.dishes.values().cloned().collect())
    }

    async fn find_dish_by_id(&self, id: i64) -> Result<Option<DishRecord>, RepoError> {
        let state = rw_read(&self.state, SOURCE, "find_dish_by_id");
        Ok(state.dishes.get(&id).cloned())
    }

    async fn find_dish_by_title(&self, title: &str) -> Result<Option<DishRecord>, RepoError> {
        let state = rw_read(&self.state, SOURCE, "find_dish_by_title");
        Ok(state.dishes.values().find(|d| d.title == title).cloned())
    }

    async fn create_dish(&self, params: CreateDishParams) -> Result<DishRecord, RepoError> {
        let mut state = rw_write(&self.state, SOURCE, "create_dish");
        if state.dishes.values().any(|d| d.title == params.title) {
            return Err(duplicate("dish_title_key"));
        }
        match state.submenus.get(&params.submenu_id) {
            Some(submenu) if submenu.menu_id == params.menu_id => {}
            _ => return Err(RepoError::NotFound),
        }

        let id = state.assign_id();
        let dish = DishRecord {
            id,
            title: params.title,
            description: params.description,
            price: params.price,
            submenu_id: params.submenu_id,
        };
        state.dishes.insert(id, dish.clone());

        let (submenu_delta, menu_delta) = aggregates::dish_created();
        let submenu = state
            .submenus
            .get_mut(&params.submenu_id)
            .ok_or(RepoError::NotFound)?;
        submenu.dishes_count += submenu_delta.dishes_count;
        let menu = state
            .menus
            .get_mut(&params.menu_id)
            .ok_or(RepoError::NotFound)?;
        menu.dishes_count += menu_delta.dishes_count;
        Ok(dish)
    }

    async fn update_dish(&self, params: UpdateDishParams) -> Result<DishRecord, RepoError> {
        let mut state = rw_write(&self.state, SOURCE, "update_dish");
        let dish = state.dishes.get_mut(&params.id).ok_or(RepoError::NotFound)?;
        dish.title = params.title;
        dish.description = params.description;
        dish.price = params.price;
        Ok(dish.clone())
    }

    async fn delete_dish(&self, menu_id: i64, submenu_id: i64, id: i64) -> Result<(), RepoError> {
        let mut state = rw_write(&self.state, SOURCE, "delete_dish");
        match state.dishes.get(&id) {
            Some(dish) if dish.submenu_id == submenu_id => {}
            _ => return Err(RepoError::NotFound),
        }
        match state.submenus.get(&submenu_id) {
            Some(submenu) if submenu.menu_id == menu_id => {}
            _ => return Err(RepoError::NotFound),
        }

        state.dishes.remove(&id);

        let (submenu_delta, menu_delta) = aggregates::dish_deleted();
        let submenu = state
            .submenus
            .get_mut(&submenu_id)
            .ok_or(RepoError::NotFound)?;
        submenu.dishes_count += submenu_delta.dishes_count;
        let menu = state.menus.get_mut(&menu_id).ok_or(RepoError::NotFound)?;
        menu.dishes_count += menu_delta.dishes_count;
        Ok(())
    }
}

#[async_trait]
impl ReportRepo for MemoryCatalog {
    async fn full_catalog_rows(&self) -> Result<Vec<CatalogRow>, RepoError> {
        let state = rw_read(&self.state, SOURCE, "full_catalog_rows");
        let mut rows = Vec::new();

        for menu in state.menus.values() {
            for submenu in state.submenus.values().filter(|s| s.menu_id == menu.id) {
                for dish in state.dishes.values().filter(|d| d.submenu_id == submenu.id) {
                    rows.push(CatalogRow {
                        menu_id: menu.id,
                        menu_title: menu.title.clone(),
                        menu_description: menu.description.clone(),
                        submenu_id: submenu.id,
                        submenu_title: submenu.title.clone(),
                        submenu_description: submenu.description.clone(),
                        dish_id: dish.id,
                        dish_title: dish.title.clone(),
                        dish_description: dish.description.clone(),
                        dish_price: dish.price.clone(),
                    });
                }
            }
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_params(title: &str) -> CreateMenuParams {
        CreateMenuParams {
            title: title.to_string(),
            description: "desc".to_string(),
        }
    }

    #[tokio::test]
    async fn assigns_monotonic_ids() {
        let store = MemoryCatalog::new();
        let first = store.create_menu(menu_params("a")).await.unwrap();
        let second = store.create_menu(menu_params("b")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn storage_rejects_duplicate_titles() {
        let store = MemoryCatalog::new();
        store.create_menu(menu_params("a")).await.unwrap();
        let err = store.create_menu(menu_params("a")).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn submenu_create_requires_owner() {
        let store = MemoryCatalog::new();
        let err = store
            .create_submenu(CreateSubMenuParams {
                menu_id: 42,
                title: "s".to_string(),
                description: "d".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
        // Nothing partially committed.
        assert!(store.list_submenus().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn dish_create_rejects_mismatched_menu_scope() {
        let store = MemoryCatalog::new();
        let menu_a = store.create_menu(menu_params("a")).await.unwrap();
        let menu_b = store.create_menu(menu_params("b")).await.unwrap();
        let submenu = store
            .create_submenu(CreateSubMenuParams {
                menu_id: menu_a.id,
                title: "s".to_string(),
                description: "d".to_string(),
            })
            .await
            .unwrap();

        let err = store
            .create_dish(CreateDishParams {
                menu_id: menu_b.id,
                submenu_id: submenu.id,
                title: "dish".to_string(),
                description: "d".to_string(),
                price: "1.00".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }
}
