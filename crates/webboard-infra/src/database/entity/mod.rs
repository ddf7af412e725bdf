//! SeaORM entities for the four board tables.

pub mod category;
pub mod comment;
pub mod post;
pub mod user;
