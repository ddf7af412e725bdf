//! Transactional access to the repositories.

use async_trait::async_trait;

use super::{CategoryRepository, CommentRepository, PostRepository, UserRepository};
use crate::error::RepoError;

/// Entry point to storage. Every service operation runs in one transaction.
#[async_trait]
pub trait Store: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, RepoError>;
}

/// An open transaction.
///
/// Dropping it without calling [`StoreTx::commit`] rolls back every write
/// made through its repositories.
#[async_trait]
pub trait StoreTx: Send + Sync {
    fn users(&self) -> Box<dyn UserRepository + '_>;

    fn categories(&self) -> Box<dyn CategoryRepository + '_>;

    fn posts(&self) -> Box<dyn PostRepository + '_>;

    fn comments(&self) -> Box<dyn CommentRepository + '_>;

    async fn commit(self: Box<Self>) -> Result<(), RepoError>;
}
