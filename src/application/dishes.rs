//! Dish entity service.

use std::sync::Arc;

use crate::application::error::AppError;
use crate::application::repos::{CreateDishParams, DishesRepo, UpdateDishParams};
use crate::cache::{CacheGateway, CacheInvalidator, CacheKey, CatalogMutation};
use crate::domain::entities::{DishRecord, EntityKind};
use crate::domain::error::DomainError;
use crate::domain::price::normalize_price;

const KIND: EntityKind = EntityKind::Dish;

#[derive(Debug, Clone)]
pub struct CreateDishCommand {
    pub title: String,
    pub description: String,
    pub price: String,
}

#[derive(Debug, Clone)]
pub struct UpdateDishCommand {
    pub title: String,
    pub description: String,
    pub price: String,
}

#[derive(Clone)]
pub struct DishService {
    repo: Arc<dyn DishesRepo>,
    cache: CacheGateway,
    invalidator: CacheInvalidator,
}

impl DishService {
    pub fn new(repo: Arc<dyn DishesRepo>, cache: CacheGateway, invalidator: CacheInvalidator) -> Self {
        Self {
            repo,
            cache,
            invalidator,
        }
    }

    pub async fn list(&self) -> Result<Vec<DishRecord>, AppError> {
        let key = CacheKey::list(KIND);
        if let Some(cached) = self.cache.get_json::<Vec<DishRecord>>(&key).await {
            return Ok(cached);
        }

        let dishes = self
            .repo
            .list_dishes()
            .await
            .map_err(|err| AppError::from_repo(KIND, err))?;
        self.cache.put_json(&key, &dishes, self.cache.read_ttl()).await;
        Ok(dishes)
    }

    pub async fn get(&self, id: i64) -> Result<DishRecord, AppError> {
        let key = CacheKey::detail(KIND, id);
        if let Some(cached) = self.cache.get_json::<DishRecord>(&key).await {
            return Ok(cached);
        }

        let dish = self
            .repo
            .find_dish_by_id(id)
            .await
            .map_err(|err| AppError::from_repo(KIND, err))?
            .ok_or_else(|| DomainError::not_found(KIND))?;
        self.cache.put_json(&key, &dish, self.cache.read_ttl()).await;
        Ok(dish)
    }

    /// Create under `submenu_id` (which must belong to `menu_id`). The price
    /// is normalized before it reaches the store; both ancestor dish
    /// counters move inside the repo transaction.
    pub async fn create(
        &self,
        menu_id: i64,
        submenu_id: i64,
        command: CreateDishCommand,
    ) -> Result<DishRecord, AppError> {
        let price = normalize_price(&command.price)?;

        if self
            .repo
            .find_dish_by_title(&command.title)
            .await
            .map_err(|err| AppError::from_repo(KIND, err))?
            .is_some()
        {
            return Err(DomainError::duplicate_title(KIND).into());
        }

        let dish = self
            .repo
            .create_dish(CreateDishParams {
                menu_id,
                submenu_id,
                title: command.title,
                description: command.description,
                price,
            })
            .await
            .map_err(|err| AppError::from_repo(KIND, err))?;

        self.invalidator
            .apply(CatalogMutation::DishCreated {
                menu_id,
                submenu_id,
            })
            .await;
        self.cache
            .put_json(&CacheKey::detail(KIND, dish.id), &dish, self.cache.write_ttl())
            .await;
        Ok(dish)
    }

    pub async fn update(&self, id: i64, command: UpdateDishCommand) -> Result<DishRecord, AppError> {
        let price = normalize_price(&command.price)?;

        let dish = self
            .repo
            .update_dish(UpdateDishParams {
                id,
                title: command.title,
                description: command.description,
                price,
            })
            .await
            .map_err(|err| AppError::from_repo(KIND, err))?;

        self.invalidator
            .apply(CatalogMutation::DishUpdated { id })
            .await;
        Ok(dish)
    }

    pub async fn delete(&self, menu_id: i64, submenu_id: i64, id: i64) -> Result<(), AppError> {
        self.repo
            .delete_dish(menu_id, submenu_id, id)
            .await
            .map_err(|err| AppError::from_repo(KIND, err))?;

        self.invalidator
            .apply(CatalogMutation::DishDeleted {
                menu_id,
                submenu_id,
                id,
            })
            .await;
        Ok(())
    }
}
