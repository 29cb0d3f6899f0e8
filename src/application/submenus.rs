//! SubMenu entity service.
//!
//! Creation and deletion move the owning menu's counters inside the repo
//! transaction; this service only sequences the pre-checks, the store call,
//! and the post-commit cache invalidation.

use std::sync::Arc;

use crate::application::error::AppError;
use crate::application::repos::{CreateSubMenuParams, SubMenusRepo, UpdateSubMenuParams};
use crate::cache::{CacheGateway, CacheInvalidator, CacheKey, CatalogMutation};
use crate::domain::entities::{EntityKind, SubMenuRecord};
use crate::domain::error::DomainError;

const KIND: EntityKind = EntityKind::SubMenu;

#[derive(Debug, Clone)]
pub struct CreateSubMenuCommand {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct UpdateSubMenuCommand {
    pub title: String,
    pub description: String,
}

#[derive(Clone)]
pub struct SubMenuService {
    repo: Arc<dyn SubMenusRepo>,
    cache: CacheGateway,
    invalidator: CacheInvalidator,
}

impl SubMenuService {
    pub fn new(
        repo: Arc<dyn SubMenusRepo>,
        cache: CacheGateway,
        invalidator: CacheInvalidator,
    ) -> Self {
        Self {
            repo,
            cache,
            invalidator,
        }
    }

    pub async fn list(&self) -> Result<Vec<SubMenuRecord>, AppError> {
        let key = CacheKey::list(KIND);
        if let Some(cached) = self.cache.get_json::<Vec<SubMenuRecord>>(&key).await {
            return Ok(cached);
        }

        let submenus = self
            .repo
            .list_submenus()
            .await
            .map_err(|err| AppError::from_repo(KIND, err))?;
        self.cache
            .put_json(&key, &submenus, self.cache.read_ttl())
            .await;
        Ok(submenus)
    }

    pub async fn get(&self, id: i64) -> Result<SubMenuRecord, AppError> {
        let key = CacheKey::detail(KIND, id);
        if let Some(cached) = self.cache.get_json::<SubMenuRecord>(&key).await {
            return Ok(cached);
        }

        let submenu = self
            .repo
            .find_submenu_by_id(id)
            .await
            .map_err(|err| AppError::from_repo(KIND, err))?
            .ok_or_else(|| DomainError::not_found(KIND))?;
        self.cache
            .put_json(&key, &submenu, self.cache.read_ttl())
            .await;
        Ok(submenu)
    }

    /// Create under `menu_id`. Fails `NotFound` when the menu is absent;
    /// the repo transaction guarantees the row and the menu's
    /// `submenus_count` move together or not at all.
    pub async fn create(
        &self,
        menu_id: i64,
        command: CreateSubMenuCommand,
    ) -> Result<SubMenuRecord, AppError> {
        if self
            .repo
            .find_submenu_by_title(&command.title)
            .await
            .map_err(|err| AppError::from_repo(KIND, err))?
            .is_some()
        {
            return Err(DomainError::duplicate_title(KIND).into());
        }

        let submenu = self
            .repo
            .create_submenu(CreateSubMenuParams {
                menu_id,
                title: command.title,
                description: command.description,
            })
            .await
            .map_err(|err| AppError::from_repo(KIND, err))?;

        self.invalidator
            .apply(CatalogMutation::SubMenuCreated { menu_id })
            .await;
        self.cache
            .put_json(
                &CacheKey::detail(KIND, submenu.id),
                &submenu,
                self.cache.write_ttl(),
            )
            .await;
        Ok(submenu)
    }

    pub async fn update(
        &self,
        id: i64,
        command: UpdateSubMenuCommand,
    ) -> Result<SubMenuRecord, AppError> {
        let submenu = self
            .repo
            .update_submenu(UpdateSubMenuParams {
                id,
                title: command.title,
                description: command.description,
            })
            .await
            .map_err(|err| AppError::from_repo(KIND, err))?;

        self.invalidator
            .apply(CatalogMutation::SubMenuUpdated { id })
            .await;
        Ok(submenu)
    }

    pub async fn delete(&self, menu_id: i64, id: i64) -> Result<(), AppError> {
        self.repo
            .delete_submenu(menu_id, id)
            .await
            .map_err(|err| AppError::from_repo(KIND, err))?;

        self.invalidator
            .apply(CatalogMutation::SubMenuDeleted { menu_id, id })
            .await;
        Ok(())
    }
}
