//! Counter-adjustment rules for the catalog hierarchy.
//!
//! Every child mutation moves its ancestors' denormalized counters in
//! lock-step, inside the same store transaction as the row change. The rules
//! are pure; both store implementations apply the same deltas.
//!
//! A submenu deletion folds the submenu's own dish total into the menu
//! decrement. The cascade-deleted dishes do not decrement individually.

/// Delta applied to the owning menu row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuDelta {
    pub submenus_count: i64,
    pub dishes_count: i64,
}

/// Delta applied to the owning submenu row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubMenuDelta {
    pub dishes_count: i64,
}

/// SubMenu inserted under a menu.
pub fn submenu_created() -> MenuDelta {
    MenuDelta {
        submenus_count: 1,
        dishes_count: 0,
    }
}

/// SubMenu removed from a menu, along with its entire dish subtree.
pub fn submenu_deleted(submenu_dishes_count: i64) -> MenuDelta {
    MenuDelta {
        submenus_count: -1,
        dishes_count: -submenu_dishes_count,
    }
}

/// Dish inserted under a submenu: both ancestors gain one dish.
pub fn dish_created() -> (SubMenuDelta, MenuDelta) {
    (
        SubMenuDelta { dishes_count: 1 },
        MenuDelta {
            submenus_count: 0,
            dishes_count: 1,
        },
    )
}

/// Dish removed from a submenu: the symmetric decrements.
pub fn dish_deleted() -> (SubMenuDelta, MenuDelta) {
    (
        SubMenuDelta { dishes_count: -1 },
        MenuDelta {
            submenus_count: 0,
            dishes_count: -1,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dish_rules_are_symmetric() {
        let (sub_add, menu_add) = dish_created();
        let (sub_del, menu_del) = dish_deleted();
        assert_eq!(sub_add.dishes_count + sub_del.dishes_count, 0);
        assert_eq!(menu_add.dishes_count + menu_del.dishes_count, 0);
        assert_eq!(menu_add.submenus_count, 0);
        assert_eq!(menu_del.submenus_count, 0);
    }

    #[test]
    fn submenu_delete_folds_subtree_total() {
        let delta = submenu_deleted(3);
        assert_eq!(delta.submenus_count, -1);
        assert_eq!(delta.dishes_count, -3);
    }

    #[test]
    fn empty_submenu_delete_moves_no_dishes() {
        let delta = submenu_deleted(0);
        assert_eq!(delta.dishes_count, 0);
    }
}
