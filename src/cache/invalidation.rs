//! Mutation-to-key-set mapping.
//!
//! Every committed write maps to the exact set of cache keys that could now
//! be stale. Two rules produce the sets:
//!
//! - A cached aggregate is cleared whenever a descendant mutation could have
//!   changed it, so a dish insert clears its submenu's and menu's detail
//!   keys even though only counters moved.
//! - List keys are cleared on any membership change (create/delete), never
//!   on a pure field update.
//!
//! A menu deletion cascades into an unenumerated set of descendant keys;
//! flushing the whole cache is the only plan that cannot leave staleness
//! behind.

use tracing::debug;

use super::gateway::CacheGateway;
use super::keys::CacheKey;
use crate::domain::entities::EntityKind;

/// A committed catalog write, described precisely enough to derive its key
/// set. Ids are the path of the mutated row, not of any cascade victims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogMutation {
    MenuCreated,
    MenuUpdated { id: i64 },
    MenuDeleted,
    SubMenuCreated { menu_id: i64 },
    SubMenuUpdated { id: i64 },
    SubMenuDeleted { menu_id: i64, id: i64 },
    DishCreated { menu_id: i64, submenu_id: i64 },
    DishUpdated { id: i64 },
    DishDeleted { menu_id: i64, submenu_id: i64, id: i64 },
}

/// What the invalidation engine must do for one mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidationPlan {
    Keys(Vec<CacheKey>),
    FlushAll,
}

/// Derive the exact invalidation plan for a mutation.
pub fn plan_for(mutation: CatalogMutation) -> InvalidationPlan {
    use CatalogMutation::*;
    use EntityKind::{Dish, Menu, SubMenu};

    let keys = match mutation {
        MenuCreated => vec![CacheKey::list(Menu)],
        MenuUpdated { id } => vec![CacheKey::detail(Menu, id), CacheKey::list(Menu)],
        MenuDeleted => return InvalidationPlan::FlushAll,
        SubMenuCreated { menu_id } => vec![
            CacheKey::detail(Menu, menu_id),
            CacheKey::list(Menu),
            CacheKey::list(SubMenu),
        ],
        SubMenuUpdated { id } => vec![CacheKey::detail(SubMenu, id), CacheKey::list(SubMenu)],
        SubMenuDeleted { menu_id, id } => vec![
            CacheKey::detail(SubMenu, id),
            CacheKey::detail(Menu, menu_id),
            CacheKey::list(Menu),
            CacheKey::list(SubMenu),
            CacheKey::list(Dish),
        ],
        DishCreated {
            menu_id,
            submenu_id,
        } => vec![
            CacheKey::detail(Menu, menu_id),
            CacheKey::detail(SubMenu, submenu_id),
            CacheKey::list(Menu),
            CacheKey::list(SubMenu),
            CacheKey::list(Dish),
        ],
        DishUpdated { id } => vec![CacheKey::detail(Dish, id), CacheKey::list(Dish)],
        DishDeleted {
            menu_id,
            submenu_id,
            id,
        } => vec![
            CacheKey::detail(Menu, menu_id),
            CacheKey::detail(SubMenu, submenu_id),
            CacheKey::detail(Dish, id),
            CacheKey::list(Menu),
            CacheKey::list(SubMenu),
            CacheKey::list(Dish),
        ],
    };

    InvalidationPlan::Keys(keys)
}

/// Executes invalidation plans against the cache gateway.
///
/// Runs strictly after the store transaction commits; failures are the
/// gateway's to log, never the mutation's to see.
#[derive(Clone)]
pub struct CacheInvalidator {
    gateway: CacheGateway,
}

impl CacheInvalidator {
    pub fn new(gateway: CacheGateway) -> Self {
        Self { gateway }
    }

    pub async fn apply(&self, mutation: CatalogMutation) {
        match plan_for(mutation) {
            InvalidationPlan::Keys(keys) => {
                debug!(?mutation, cleared = keys.len(), "invalidating cache keys");
                self.gateway.delete(&keys).await;
            }
            InvalidationPlan::FlushAll => {
                debug!(?mutation, "flushing entire cache");
                self.gateway.flush_all().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(mutation: CatalogMutation) -> Vec<String> {
        match plan_for(mutation) {
            InvalidationPlan::Keys(keys) => keys.iter().map(CacheKey::to_string).collect(),
            InvalidationPlan::FlushAll => panic!("expected a key plan"),
        }
    }

    #[test]
    fn dish_create_clears_both_ancestor_scopes() {
        assert_eq!(
            rendered(CatalogMutation::DishCreated {
                menu_id: 1,
                submenu_id: 2,
            }),
            vec!["menu:1", "submenu:2", "menu:list", "submenu:list", "dish:list"],
        );
    }

    #[test]
    fn dish_update_touches_only_dish_scope() {
        assert_eq!(
            rendered(CatalogMutation::DishUpdated { id: 5 }),
            vec!["dish:5", "dish:list"],
        );
    }

    #[test]
    fn dish_delete_clears_all_implicated_keys() {
        assert_eq!(
            rendered(CatalogMutation::DishDeleted {
                menu_id: 1,
                submenu_id: 2,
                id: 5,
            }),
            vec![
                "menu:1",
                "submenu:2",
                "dish:5",
                "menu:list",
                "submenu:list",
                "dish:list"
            ],
        );
    }

    #[test]
    fn submenu_create_clears_owning_menu_and_lists() {
        assert_eq!(
            rendered(CatalogMutation::SubMenuCreated { menu_id: 3 }),
            vec!["menu:3", "menu:list", "submenu:list"],
        );
    }

    #[test]
    fn submenu_update_does_not_touch_menu_scope() {
        assert_eq!(
            rendered(CatalogMutation::SubMenuUpdated { id: 4 }),
            vec!["submenu:4", "submenu:list"],
        );
    }

    #[test]
    fn submenu_delete_clears_dish_list_for_cascade() {
        assert_eq!(
            rendered(CatalogMutation::SubMenuDeleted { menu_id: 3, id: 4 }),
            vec!["submenu:4", "menu:3", "menu:list", "submenu:list", "dish:list"],
        );
    }

    #[test]
    fn menu_update_leaves_child_lists_alone() {
        assert_eq!(
            rendered(CatalogMutation::MenuUpdated { id: 9 }),
            vec!["menu:9", "menu:list"],
        );
    }

    #[test]
    fn menu_create_is_a_membership_change_only() {
        assert_eq!(rendered(CatalogMutation::MenuCreated), vec!["menu:list"]);
    }

    #[test]
    fn menu_delete_flushes_everything() {
        assert_eq!(plan_for(CatalogMutation::MenuDeleted), InvalidationPlan::FlushAll);
    }
}
