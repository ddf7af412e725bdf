use async_trait::async_trait;

use crate::domain::{Category, Comment, Post, PostDetail, PostFilter, User};
use crate::error::RepoError;

/// Row lock taken when reading inside a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLock {
    /// The row is referenced by the write; it must not be deleted meanwhile.
    Share,
    /// The row itself is about to be mutated.
    Update,
}

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Find an entity by ID and lock the row until the transaction ends.
    async fn find_locked(&self, id: ID, lock: RowLock) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. The store assigns the ID.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `NotFound` if it is gone.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with `NotFound` if no row was affected.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, i32> {
    /// All categories, in store order.
    async fn find_all(&self) -> Result<Vec<Category>, RepoError>;
}

/// Post repository.
///
/// Deleting a post also deletes its comments.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// Posts matching `filter`, with author, category and comments loaded.
    async fn find_details(&self, filter: &PostFilter) -> Result<Vec<PostDetail>, RepoError>;
}

/// Comment repository.
pub trait CommentRepository: BaseRepository<Comment, i32> {}
