//! Carta, a catalog service for three-level restaurant menus.
//!
//! Menus own submenus, submenus own dishes. Every parent row carries
//! denormalized descendant counters that move in lock-step with child
//! mutations, reads go through a time-bounded cache with precise
//! per-mutation invalidation, and the full hierarchy exports as a
//! merged-cell style tabular report.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
