//! Repository implementations for database operations.

pub mod progress;

pub use progress::PgProgressRepository;
