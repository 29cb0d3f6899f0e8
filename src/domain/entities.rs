//! Domain entities mirrored from persistent storage.

use serde::{Deserialize, Serialize};

/// Selector for the three catalog entity kinds.
///
/// Used wherever an operation is generic over the hierarchy level: store
/// lookups, cache key rendering, and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Menu,
    SubMenu,
    Dish,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Menu => "menu",
            EntityKind::SubMenu => "submenu",
            EntityKind::Dish => "dish",
        }
    }
}

/// A top-level menu with denormalized subtree totals.
///
/// `submenus_count` and `dishes_count` are maintained exclusively by the
/// counter rules in [`crate::domain::aggregates`]; clients never set them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub submenus_count: i64,
    pub dishes_count: i64,
}

/// A submenu owned by exactly one menu. Deleting the menu cascades here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubMenuRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub dishes_count: i64,
    pub menu_id: i64,
}

/// A dish owned by exactly one submenu. `price` is stored normalized to
/// exactly two fractional digits (see [`crate::domain::price`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: String,
    pub submenu_id: i64,
}
