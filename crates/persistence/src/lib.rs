//! Persistence layer for the Prepvio progress service.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - The PostgreSQL implementation of the progress storage port

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;

pub use db::{create_pool, DatabaseConfig};
pub use repositories::PgProgressRepository;
