use std::sync::Arc;

use crate::domain::{Post, PostChanges, PostDetail, PostFilter};
use crate::error::{DomainError, DomainResult};
use crate::ports::{RowLock, Store, StoreTx};

use super::resolve::{CategoryResolver, UserResolver};

/// Input for creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: i32,
    pub category_id: i32,
}

/// Post service - CRUD plus filtered listing over posts.
///
/// Every listing is one [`PostFilter`]; no result order is guaranteed.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn Store>,
}

impl PostService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Create a post for an existing author in an existing category.
    pub async fn create(&self, input: NewPost) -> DomainResult<PostDetail> {
        let tx = self.store.begin().await?;
        let author = tx.users().resolve_user(input.author_id).await?;
        let category = tx.categories().resolve_category(input.category_id).await?;

        let post = tx
            .posts()
            .insert(Post::new(input.title, input.content, author.id, category.id))
            .await?;
        tx.commit().await?;

        tracing::info!(post_id = post.id, author_id = author.id, "Post created");
        Ok(PostDetail {
            post,
            author,
            category,
            comments: Vec::new(),
        })
    }

    pub async fn get_by_id(&self, id: i32) -> DomainResult<PostDetail> {
        self.find_one(PostFilter::all().with_id(id)).await
    }

    /// Fetch a post only if `author_id` is its stored author.
    pub async fn get_by_id_for_author(&self, id: i32, author_id: i32) -> DomainResult<PostDetail> {
        self.find_one(PostFilter::all().with_id(id).by_author(author_id))
            .await
            .inspect_err(|_| {
                tracing::debug!(post_id = id, author_id, "No post for this author");
            })
    }

    pub async fn list_all(&self) -> DomainResult<Vec<PostDetail>> {
        self.find(PostFilter::all()).await
    }

    /// Posts whose title or content contains `text`; all posts when empty.
    pub async fn search(&self, text: &str) -> DomainResult<Vec<PostDetail>> {
        self.find(PostFilter::all().matching(text)).await
    }

    pub async fn list_by_author(&self, author_id: i32, text: &str) -> DomainResult<Vec<PostDetail>> {
        self.find(PostFilter::all().by_author(author_id).matching(text))
            .await
    }

    pub async fn list_by_category(
        &self,
        category_id: i32,
        text: &str,
    ) -> DomainResult<Vec<PostDetail>> {
        self.find(PostFilter::all().in_category(category_id).matching(text))
            .await
    }

    pub async fn list_by_author_and_category(
        &self,
        author_id: i32,
        category_id: i32,
        text: &str,
    ) -> DomainResult<Vec<PostDetail>> {
        let filter = PostFilter::all()
            .by_author(author_id)
            .in_category(category_id)
            .matching(text);
        self.find(filter).await
    }

    /// Merge `changes` into an existing post. The author never changes.
    pub async fn update(&self, id: i32, changes: PostChanges) -> DomainResult<PostDetail> {
        let tx = self.store.begin().await?;
        let mut post = tx
            .posts()
            .find_locked(id, RowLock::Update)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))?;

        if let Some(category_id) = changes.category_id {
            tx.categories().resolve_category(category_id).await?;
        }

        post.apply(changes);
        tx.posts()
            .update(post)
            .await
            .map_err(|e| DomainError::from_repo(e, "Post", id))?;

        let detail = Self::first(&*tx, PostFilter::all().with_id(id)).await?;
        tx.commit().await?;
        Ok(detail)
    }

    /// Delete a post and, through the store, its comments.
    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        let tx = self.store.begin().await?;
        tx.posts()
            .delete(id)
            .await
            .map_err(|e| DomainError::from_repo(e, "Post", id))?;
        tx.commit().await?;

        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }

    async fn find(&self, filter: PostFilter) -> DomainResult<Vec<PostDetail>> {
        tracing::debug!(?filter, "Listing posts");
        let tx = self.store.begin().await?;
        Ok(tx.posts().find_details(&filter).await?)
    }

    async fn find_one(&self, filter: PostFilter) -> DomainResult<PostDetail> {
        let tx = self.store.begin().await?;
        Self::first(&*tx, filter).await
    }

    async fn first(tx: &dyn StoreTx, filter: PostFilter) -> DomainResult<PostDetail> {
        let id = filter.id.unwrap_or_default();
        tx.posts()
            .find_details(&filter)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::not_found("Post", id))
    }
}
