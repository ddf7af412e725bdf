//! Middleware modules.

pub mod error;
pub mod cors;
