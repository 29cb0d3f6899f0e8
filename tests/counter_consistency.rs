//! Counter and cascade behavior of the entity services over the in-memory
//! catalog store.

use std::sync::Arc;

use carta::application::dishes::{CreateDishCommand, DishService};
use carta::application::error::AppError;
use carta::application::menus::{CreateMenuCommand, MenuService, UpdateMenuCommand};
use carta::application::submenus::{CreateSubMenuCommand, SubMenuService};
use carta::cache::{CacheBackend, CacheConfig, CacheGateway, CacheInvalidator, MemoryCache};
use carta::domain::error::DomainError;
use carta::infra::memory::MemoryCatalog;

fn services() -> (MenuService, SubMenuService, DishService) {
    let repo = Arc::new(MemoryCatalog::new());
    let backend: Arc<dyn CacheBackend> = Arc::new(MemoryCache::new());
    let gateway = CacheGateway::new(backend, CacheConfig::default());
    let invalidator = CacheInvalidator::new(gateway.clone());

    (
        MenuService::new(repo.clone(), gateway.clone(), invalidator.clone()),
        SubMenuService::new(repo.clone(), gateway.clone(), invalidator.clone()),
        DishService::new(repo, gateway, invalidator),
    )
}

fn menu_cmd(title: &str) -> CreateMenuCommand {
    CreateMenuCommand {
        title: title.to_string(),
        description: format!("{title} description"),
    }
}

fn submenu_cmd(title: &str) -> CreateSubMenuCommand {
    CreateSubMenuCommand {
        title: title.to_string(),
        description: format!("{title} description"),
    }
}

fn dish_cmd(title: &str, price: &str) -> CreateDishCommand {
    CreateDishCommand {
        title: title.to_string(),
        description: format!("{title} description"),
        price: price.to_string(),
    }
}

/// Walk the full create/delete sequence and watch every counter move.
#[tokio::test]
async fn counters_follow_the_hierarchy() {
    let (menus, submenus, dishes) = services();

    let menu = menus.create(menu_cmd("Menu 1")).await.unwrap();
    assert_eq!(menu.submenus_count, 0);
    assert_eq!(menu.dishes_count, 0);

    let submenu = submenus
        .create(menu.id, submenu_cmd("Soups"))
        .await
        .unwrap();
    assert_eq!(submenus.get(submenu.id).await.unwrap().dishes_count, 0);
    assert_eq!(menus.get(menu.id).await.unwrap().submenus_count, 1);

    let dish_1 = dishes
        .create(menu.id, submenu.id, dish_cmd("Borscht", "4.20"))
        .await
        .unwrap();
    dishes
        .create(menu.id, submenu.id, dish_cmd("Solyanka", "5.10"))
        .await
        .unwrap();

    assert_eq!(submenus.get(submenu.id).await.unwrap().dishes_count, 2);
    let menu_after_dishes = menus.get(menu.id).await.unwrap();
    assert_eq!(menu_after_dishes.submenus_count, 1);
    assert_eq!(menu_after_dishes.dishes_count, 2);

    dishes.delete(menu.id, submenu.id, dish_1.id).await.unwrap();
    assert_eq!(submenus.get(submenu.id).await.unwrap().dishes_count, 1);
    assert_eq!(menus.get(menu.id).await.unwrap().dishes_count, 1);

    submenus.delete(menu.id, submenu.id).await.unwrap();
    let menu_after_submenu = menus.get(menu.id).await.unwrap();
    assert_eq!(menu_after_submenu.submenus_count, 0);
    assert_eq!(menu_after_submenu.dishes_count, 0);
}

/// A menu's dish total always equals the sum of its submenus' totals, and
/// each submenu total equals its live dish count.
#[tokio::test]
async fn counter_invariant_holds_across_mixed_operations() {
    let (menus, submenus, dishes) = services();

    let menu = menus.create(menu_cmd("Invariant menu")).await.unwrap();
    let first = submenus
        .create(menu.id, submenu_cmd("First"))
        .await
        .unwrap();
    let second = submenus
        .create(menu.id, submenu_cmd("Second"))
        .await
        .unwrap();

    for i in 0..3 {
        dishes
            .create(menu.id, first.id, dish_cmd(&format!("first-{i}"), "1.00"))
            .await
            .unwrap();
    }
    for i in 0..2 {
        dishes
            .create(menu.id, second.id, dish_cmd(&format!("second-{i}"), "2.00"))
            .await
            .unwrap();
    }

    let all_dishes = dishes.list().await.unwrap();
    let victim = all_dishes
        .iter()
        .find(|d| d.submenu_id == first.id)
        .unwrap();
    dishes.delete(menu.id, first.id, victim.id).await.unwrap();

    let menu_state = menus.get(menu.id).await.unwrap();
    let submenu_states = submenus.list().await.unwrap();
    let dish_states = dishes.list().await.unwrap();

    let submenu_sum: i64 = submenu_states
        .iter()
        .filter(|s| s.menu_id == menu.id)
        .map(|s| s.dishes_count)
        .sum();
    assert_eq!(menu_state.dishes_count, submenu_sum);
    assert_eq!(menu_state.dishes_count, 4);

    for submenu in &submenu_states {
        let live = dish_states
            .iter()
            .filter(|d| d.submenu_id == submenu.id)
            .count() as i64;
        assert_eq!(submenu.dishes_count, live);
    }
}

#[tokio::test]
async fn deleting_a_submenu_folds_its_subtree_out_of_the_menu() {
    let (menus, submenus, dishes) = services();

    let menu = menus.create(menu_cmd("Cascade menu")).await.unwrap();
    let keep = submenus.create(menu.id, submenu_cmd("Keep")).await.unwrap();
    let drop = submenus.create(menu.id, submenu_cmd("Drop")).await.unwrap();

    dishes
        .create(menu.id, keep.id, dish_cmd("kept dish", "1.00"))
        .await
        .unwrap();
    for i in 0..3 {
        dishes
            .create(menu.id, drop.id, dish_cmd(&format!("dropped-{i}"), "1.00"))
            .await
            .unwrap();
    }

    submenus.delete(menu.id, drop.id).await.unwrap();

    let menu_state = menus.get(menu.id).await.unwrap();
    assert_eq!(menu_state.submenus_count, 1);
    assert_eq!(menu_state.dishes_count, 1);

    // The cascade removed exactly the dropped submenu's dishes.
    let remaining = dishes.list().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "kept dish");
}

#[tokio::test]
async fn deleting_a_menu_removes_the_whole_subtree() {
    let (menus, submenus, dishes) = services();

    let menu = menus.create(menu_cmd("Doomed")).await.unwrap();
    let survivor_menu = menus.create(menu_cmd("Survivor")).await.unwrap();
    let submenu = submenus
        .create(menu.id, submenu_cmd("Doomed submenu"))
        .await
        .unwrap();
    let survivor_submenu = submenus
        .create(survivor_menu.id, submenu_cmd("Survivor submenu"))
        .await
        .unwrap();
    dishes
        .create(menu.id, submenu.id, dish_cmd("doomed dish", "1.00"))
        .await
        .unwrap();
    dishes
        .create(
            survivor_menu.id,
            survivor_submenu.id,
            dish_cmd("survivor dish", "1.00"),
        )
        .await
        .unwrap();

    menus.delete(menu.id).await.unwrap();

    let err = menus.get(menu.id).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Domain(DomainError::NotFound { .. })
    ));
    let err = submenus.get(submenu.id).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Domain(DomainError::NotFound { .. })
    ));

    let remaining = dishes.list().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "survivor dish");
}

#[tokio::test]
async fn duplicate_title_conflicts_and_inserts_nothing() {
    let (menus, _submenus, _dishes) = services();

    menus.create(menu_cmd("Unique")).await.unwrap();
    let err = menus.create(menu_cmd("Unique")).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Domain(DomainError::DuplicateTitle { .. })
    ));

    assert_eq!(menus.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn child_creation_under_missing_ancestor_fails_cleanly() {
    let (menus, submenus, dishes) = services();

    let err = submenus
        .create(999, submenu_cmd("Orphan"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Domain(DomainError::NotFound { .. })
    ));

    let menu = menus.create(menu_cmd("Real menu")).await.unwrap();
    let err = dishes
        .create(menu.id, 999, dish_cmd("Orphan dish", "1.00"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Domain(DomainError::NotFound { .. })
    ));

    // Nothing leaked into the store.
    assert!(submenus.list().await.unwrap().is_empty());
    assert!(dishes.list().await.unwrap().is_empty());
    assert_eq!(menus.get(menu.id).await.unwrap().dishes_count, 0);
}

#[tokio::test]
async fn dish_price_is_truncated_to_two_digits() {
    let (menus, submenus, dishes) = services();

    let menu = menus.create(menu_cmd("Price menu")).await.unwrap();
    let submenu = submenus
        .create(menu.id, submenu_cmd("Price submenu"))
        .await
        .unwrap();

    let dish = dishes
        .create(menu.id, submenu.id, dish_cmd("Precise", "12.555"))
        .await
        .unwrap();
    assert_eq!(dish.price, "12.55");

    let err = dishes
        .create(menu.id, submenu.id, dish_cmd("Freebie", "gratis"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Domain(DomainError::Validation { .. })
    ));
}

#[tokio::test]
async fn updates_change_fields_but_never_counters() {
    let (menus, submenus, dishes) = services();

    let menu = menus.create(menu_cmd("Before")).await.unwrap();
    let submenu = submenus.create(menu.id, submenu_cmd("Sub")).await.unwrap();
    dishes
        .create(menu.id, submenu.id, dish_cmd("Dish", "3.00"))
        .await
        .unwrap();

    let updated = menus
        .update(
            menu.id,
            UpdateMenuCommand {
                title: "After".to_string(),
                description: "new description".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "After");
    assert_eq!(updated.submenus_count, 1);
    assert_eq!(updated.dishes_count, 1);
}
