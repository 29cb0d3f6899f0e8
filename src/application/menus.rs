//! Menu entity service.

use std::sync::Arc;

use crate::application::error::AppError;
use crate::application::repos::{CreateMenuParams, MenusRepo, UpdateMenuParams};
use crate::cache::{CacheGateway, CacheInvalidator, CacheKey, CatalogMutation};
use crate::domain::entities::{EntityKind, MenuRecord};
use crate::domain::error::DomainError;

const KIND: EntityKind = EntityKind::Menu;

#[derive(Debug, Clone)]
pub struct CreateMenuCommand {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct UpdateMenuCommand {
    pub title: String,
    pub description: String,
}

#[derive(Clone)]
pub struct MenuService {
    repo: Arc<dyn MenusRepo>,
    cache: CacheGateway,
    invalidator: CacheInvalidator,
}

impl MenuService {
    pub fn new(repo: Arc<dyn MenusRepo>, cache: CacheGateway, invalidator: CacheInvalidator) -> Self {
        Self {
            repo,
            cache,
            invalidator,
        }
    }

    pub async fn list(&self) -> Result<Vec<MenuRecord>, AppError> {
        let key = CacheKey::list(KIND);
        if let Some(cached) = self.cache.get_json::<Vec<MenuRecord>>(&key).await {
            return Ok(cached);
        }

        let menus = self
            .repo
            .list_menus()
            .await
            .map_err(|err| AppError::from_repo(KIND, err))?;
        self.cache.put_json(&key, &menus, self.cache.read_ttl()).await;
        Ok(menus)
    }

    /// Detail read. An absent id is `NotFound` and is never cached.
    pub async fn get(&self, id: i64) -> Result<MenuRecord, AppError> {
        let key = CacheKey::detail(KIND, id);
        if let Some(cached) = self.cache.get_json::<MenuRecord>(&key).await {
            return Ok(cached);
        }

        let menu = self
            .repo
            .find_menu_by_id(id)
            .await
            .map_err(|err| AppError::from_repo(KIND, err))?
            .ok_or_else(|| DomainError::not_found(KIND))?;
        self.cache.put_json(&key, &menu, self.cache.read_ttl()).await;
        Ok(menu)
    }

    pub async fn create(&self, command: CreateMenuCommand) -> Result<MenuRecord, AppError> {
        if self
            .repo
            .find_menu_by_title(&command.title)
            .await
            .map_err(|err| AppError::from_repo(KIND, err))?
            .is_some()
        {
            return Err(DomainError::duplicate_title(KIND).into());
        }

        let menu = self
            .repo
            .create_menu(CreateMenuParams {
                title: command.title,
                description: command.description,
            })
            .await
            .map_err(|err| AppError::from_repo(KIND, err))?;

        self.invalidator.apply(CatalogMutation::MenuCreated).await;
        self.cache
            .put_json(&CacheKey::detail(KIND, menu.id), &menu, self.cache.write_ttl())
            .await;
        Ok(menu)
    }

    pub async fn update(&self, id: i64, command: UpdateMenuCommand) -> Result<MenuRecord, AppError> {
        let menu = self
            .repo
            .update_menu(UpdateMenuParams {
                id,
                title: command.title,
                description: command.description,
            })
            .await
            .map_err(|err| AppError::from_repo(KIND, err))?;

        self.invalidator
            .apply(CatalogMutation::MenuUpdated { id })
            .await;
        Ok(menu)
    }

    /// Deletes the menu and its whole subtree, then flushes the cache: the
    /// cascade invalidates an unenumerated set of descendant keys.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.repo
            .delete_menu(id)
            .await
            .map_err(|err| AppError::from_repo(KIND, err))?;

        self.invalidator.apply(CatalogMutation::MenuDeleted).await;
        Ok(())
    }
}
