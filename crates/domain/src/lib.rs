//! Domain layer for the Prepvio progress service.
//!
//! This crate contains:
//! - Progress models (CourseProgress, VideoProgress)
//! - The aggregation service and its pure query helpers
//! - The storage port with an in-memory implementation
//! - Domain error types

pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use error::ProgressError;
pub use repository::{InMemoryProgressRepository, ProgressRepository};
