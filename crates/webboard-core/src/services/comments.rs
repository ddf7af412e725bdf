use std::sync::Arc;

use chrono::Utc;

use crate::domain::Comment;
use crate::error::{DomainError, DomainResult};
use crate::ports::{RowLock, Store, StoreTx};

use super::resolve::{PostResolver, UserResolver};

/// Replacement values for a comment update.
#[derive(Debug, Clone)]
pub struct CommentUpdate {
    pub post_id: i32,
    pub author_id: i32,
    pub content: String,
}

/// Comment service - CRUD over comments with author-ownership enforcement.
///
/// Mutations run load, ownership check, reference resolution and persist in
/// that order inside one transaction; the first failing step ends the request.
/// The ownership check compares the claimed author id with the stored one
/// before anything else is resolved, so a mismatched claim is always
/// `Unauthorized` whether or not the claimed user exists.
///
/// Because the comment is loaded first, an update naming both a missing
/// comment and a missing post fails with `NotFound` for the comment, not
/// the post.
#[derive(Clone)]
pub struct CommentService {
    store: Arc<dyn Store>,
}

/// Fail with `Unauthorized` unless `actor_id` authored `comment`.
pub fn ensure_owner(comment: &Comment, actor_id: i32) -> DomainResult<()> {
    if comment.is_owned_by(actor_id) {
        return Ok(());
    }

    tracing::warn!(
        comment_id = comment.id,
        owner_id = comment.author_id,
        actor_id,
        "Rejected comment mutation by non-owner"
    );
    Err(DomainError::Unauthorized)
}

impl CommentService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, post_id: i32, author_id: i32, content: String) -> DomainResult<Comment> {
        let tx = self.store.begin().await?;
        let post = tx.posts().resolve_post(post_id).await?;
        let author = tx.users().resolve_user(author_id).await?;

        let comment = tx
            .comments()
            .insert(Comment::new(post.id, author.id, content))
            .await?;
        tx.commit().await?;

        tracing::info!(comment_id = comment.id, post_id, author_id, "Comment created");
        Ok(comment)
    }

    pub async fn get_by_id(&self, id: i32) -> DomainResult<Comment> {
        let tx = self.store.begin().await?;
        tx.comments()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Comment", id))
    }

    /// Replace post, author and content of a comment owned by `author_id`.
    pub async fn update(&self, id: i32, update: CommentUpdate) -> DomainResult<Comment> {
        let tx = self.store.begin().await?;
        let mut comment = Self::load_owned(&*tx, id, update.author_id).await?;

        let post = tx.posts().resolve_post(update.post_id).await?;
        let author = tx.users().resolve_user(update.author_id).await?;
        ensure_owner(&comment, author.id)?;

        comment.post_id = post.id;
        comment.author_id = author.id;
        comment.content = update.content;
        comment.updated_at = Utc::now();

        let comment = tx
            .comments()
            .update(comment)
            .await
            .map_err(|e| DomainError::from_repo(e, "Comment", id))?;
        tx.commit().await?;

        Ok(comment)
    }

    /// Delete a comment owned by `author_id`.
    pub async fn remove(&self, id: i32, author_id: i32) -> DomainResult<()> {
        let tx = self.store.begin().await?;
        let comment = Self::load_owned(&*tx, id, author_id).await?;

        let author = tx.users().resolve_user(author_id).await?;
        ensure_owner(&comment, author.id)?;

        tx.comments()
            .delete(id)
            .await
            .map_err(|e| DomainError::from_repo(e, "Comment", id))?;
        tx.commit().await?;

        tracing::info!(comment_id = id, author_id, "Comment deleted");
        Ok(())
    }

    async fn load_owned(tx: &dyn StoreTx, id: i32, actor_id: i32) -> DomainResult<Comment> {
        let comment = tx
            .comments()
            .find_locked(id, RowLock::Update)
            .await?
            .ok_or_else(|| DomainError::not_found("Comment", id))?;
        ensure_owner(&comment, actor_id)?;
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment_by(author_id: i32) -> Comment {
        let mut comment = Comment::new(1, author_id, "hello".into());
        comment.id = 10;
        comment
    }

    #[test]
    fn test_owner_passes() {
        assert!(ensure_owner(&comment_by(3), 3).is_ok());
    }

    #[test]
    fn test_non_owner_is_unauthorized() {
        let err = ensure_owner(&comment_by(3), 4).unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));
    }
}
