//! Kiosk Database Layer
//!
//! This crate provides database operations for the Kiosk magazine library.
//! It uses SQLite with sqlx for type-safe database queries.

pub mod catalog;
pub mod connection;
pub mod migrations;
pub mod queries;

pub use catalog::Catalog;
pub use connection::{connect, DatabaseConfig, DbPool};
pub use migrations::{current_version, run_migrations, verify_integrity};
