//! # Webboard Core
//!
//! The domain layer of the Webboard discussion board.
//! This crate contains the entity model, the storage ports and the services
//! built on top of them. It has no database or HTTP dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, DomainResult};
