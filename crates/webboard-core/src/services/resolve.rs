//! Narrow lookup capabilities the services depend on.
//!
//! Resolution takes a shared row lock, so a referenced row cannot be deleted
//! before the resolving transaction ends.

use async_trait::async_trait;

use crate::domain::{Category, Post, User};
use crate::error::{DomainError, DomainResult};
use crate::ports::{CategoryRepository, PostRepository, RowLock, UserRepository};

/// Resolves a user id to a live user.
#[async_trait]
pub trait UserResolver: Send + Sync {
    async fn resolve_user(&self, id: i32) -> DomainResult<User>;
}

/// Resolves a category id to a live category.
#[async_trait]
pub trait CategoryResolver: Send + Sync {
    async fn resolve_category(&self, id: i32) -> DomainResult<Category>;
}

/// Resolves a post id to a live post.
#[async_trait]
pub trait PostResolver: Send + Sync {
    async fn resolve_post(&self, id: i32) -> DomainResult<Post>;
}

#[async_trait]
impl<R> UserResolver for R
where
    R: UserRepository + ?Sized,
{
    async fn resolve_user(&self, id: i32) -> DomainResult<User> {
        self.find_locked(id, RowLock::Share)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }
}

#[async_trait]
impl<R> CategoryResolver for R
where
    R: CategoryRepository + ?Sized,
{
    async fn resolve_category(&self, id: i32) -> DomainResult<Category> {
        self.find_locked(id, RowLock::Share)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", id))
    }
}

#[async_trait]
impl<R> PostResolver for R
where
    R: PostRepository + ?Sized,
{
    async fn resolve_post(&self, id: i32) -> DomainResult<Post> {
        self.find_locked(id, RowLock::Share)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepoError;
    use crate::ports::BaseRepository;

    /// Stand-in directory holding a single user.
    struct OneUser(User);

    #[async_trait]
    impl BaseRepository<User, i32> for OneUser {
        async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
            Ok((self.0.id == id).then(|| self.0.clone()))
        }

        async fn find_locked(&self, id: i32, _lock: RowLock) -> Result<Option<User>, RepoError> {
            self.find_by_id(id).await
        }

        async fn insert(&self, user: User) -> Result<User, RepoError> {
            Ok(user)
        }

        async fn update(&self, user: User) -> Result<User, RepoError> {
            Ok(user)
        }

        async fn delete(&self, _id: i32) -> Result<(), RepoError> {
            Err(RepoError::NotFound)
        }
    }

    #[async_trait]
    impl UserRepository for OneUser {
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
            Ok((self.0.username == username).then(|| self.0.clone()))
        }
    }

    fn alice() -> OneUser {
        let mut user = User::new("alice".into());
        user.id = 1;
        OneUser(user)
    }

    #[tokio::test]
    async fn test_resolve_existing_user() {
        let users = alice();
        let user = users.resolve_user(1).await.unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_resolve_missing_user_is_not_found() {
        let users = alice();
        let resolver: &dyn UserResolver = &users;

        let err = resolver.resolve_user(2).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound {
                entity_type: "User",
                id: 2
            }
        ));
    }
}
