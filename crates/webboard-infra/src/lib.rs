//! # Webboard Infrastructure
//!
//! Concrete implementations of the storage ports defined in `webboard-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store only
//! - `postgres` - PostgreSQL store via SeaORM

pub mod database;

// Re-exports
pub use database::{DatabaseConfig, InMemoryStore};

#[cfg(feature = "postgres")]
pub use database::PostgresStore;
