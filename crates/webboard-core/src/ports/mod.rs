//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod repository;
mod store;

pub use repository::{
    BaseRepository, CategoryRepository, CommentRepository, PostRepository, RowLock,
    UserRepository,
};
pub use store::{Store, StoreTx};
