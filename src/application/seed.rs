//! Demonstration catalog seeding.
//!
//! Populates a small showcase catalog through the regular entity services,
//! so counters and cache invalidation behave exactly as for client writes.

use serde::Serialize;

use crate::application::dishes::{CreateDishCommand, DishService};
use crate::application::error::AppError;
use crate::application::menus::{CreateMenuCommand, MenuService};
use crate::application::submenus::{CreateSubMenuCommand, SubMenuService};

#[derive(Debug, Clone, Serialize)]
pub struct SeedSummary {
    pub menus: usize,
    pub submenus: usize,
    pub dishes: usize,
}

struct SeedDish(&'static str, &'static str, &'static str);
struct SeedSubMenu(&'static str, &'static str, &'static [SeedDish]);
struct SeedMenu(&'static str, &'static str, &'static [SeedSubMenu]);

const DEMO_CATALOG: &[SeedMenu] = &[
    SeedMenu(
        "Food",
        "Main menu",
        &[
            SeedSubMenu(
                "Cold starters",
                "Best with beer",
                &[
                    SeedDish("Bismarck herring", "Pickled herring, onion, rye bread", "182.99"),
                    SeedDish("Seafood platter", "Shrimp, squid, scallops and salmon", "215.36"),
                ],
            ),
            SeedSubMenu(
                "Ramen",
                "Hot ramen bowls",
                &[
                    SeedDish("Daizu ramen", "Chicken broth with chicken and egg", "166.87"),
                    SeedDish("Unagi ramen", "Creamy fish broth with marinated eel", "165.90"),
                    SeedDish("Cheese ramen", "Cheese and coconut-milk broth, wheat noodles", "182.99"),
                ],
            ),
        ],
    ),
    SeedMenu(
        "Alcohol",
        "Alcoholic drinks",
        &[
            SeedSubMenu(
                "Red wines",
                "For a romantic evening",
                &[
                    SeedDish("Chemin des Papes", "Red, fruity", "2700.93"),
                    SeedDish("Riparosso Montepulciano", "Red, dry", "3100.23"),
                    SeedDish("Chianti", "Red, elegant and complex", "1523.37"),
                ],
            ),
            SeedSubMenu(
                "Whisky",
                "For long conversations",
                &[
                    SeedDish("Jameson", "Classic blend, four years aged", "540.22"),
                    SeedDish("Jack Daniel's", "Soft caramel, vanilla and wood notes", "697.11"),
                    SeedDish("Chivas Regal", "Malt and grain blend, twelve years aged", "750.25"),
                ],
            ),
        ],
    ),
];

/// Create the demonstration catalog. Fails on the first conflict, so running
/// it twice against the same store surfaces a duplicate-title error.
pub async fn seed_demo_catalog(
    menus: &MenuService,
    submenus: &SubMenuService,
    dishes: &DishService,
) -> Result<SeedSummary, AppError> {
    let mut summary = SeedSummary {
        menus: 0,
        submenus: 0,
        dishes: 0,
    };

    for menu_seed in DEMO_CATALOG {
        let menu = menus
            .create(CreateMenuCommand {
                title: menu_seed.0.to_string(),
                description: menu_seed.1.to_string(),
            })
            .await?;
        summary.menus += 1;

        for submenu_seed in menu_seed.2 {
            let submenu = submenus
                .create(
                    menu.id,
                    CreateSubMenuCommand {
                        title: submenu_seed.0.to_string(),
                        description: submenu_seed.1.to_string(),
                    },
                )
                .await?;
            summary.submenus += 1;

            for dish_seed in submenu_seed.2 {
                dishes
                    .create(
                        menu.id,
                        submenu.id,
                        CreateDishCommand {
                            title: dish_seed.0.to_string(),
                            description: dish_seed.1.to_string(),
                            price: dish_seed.2.to_string(),
                        },
                    )
                    .await?;
                summary.dishes += 1;
            }
        }
    }

    Ok(summary)
}
