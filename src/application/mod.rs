//! Application layer: entity services and their collaborator traits.

pub mod dishes;
pub mod error;
pub mod export;
pub mod menus;
pub mod report;
pub mod repos;
pub mod seed;
pub mod submenus;
