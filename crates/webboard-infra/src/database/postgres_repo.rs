//! PostgreSQL repository implementations.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use sea_orm::sea_query::LikeExpr;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter};

use webboard_core::domain::{Category, Comment, PostDetail, PostFilter, User};
use webboard_core::error::RepoError;
use webboard_core::ports::{CategoryRepository, CommentRepository, PostRepository, UserRepository};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository<'c, C> = PostgresBaseRepository<'c, UserEntity, C>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository<'c, C> = PostgresBaseRepository<'c, CategoryEntity, C>;

/// PostgreSQL post repository.
pub type PostgresPostRepository<'c, C> = PostgresBaseRepository<'c, PostEntity, C>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository<'c, C> = PostgresBaseRepository<'c, CommentEntity, C>;

const LIKE_ESCAPE: char = '\\';

/// Escape LIKE wildcards so `text` matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

fn contains(text: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like(text))).escape(LIKE_ESCAPE)
}

/// Translate a [`PostFilter`] into a SQL condition.
///
/// Equality constraints are AND-ed; the search text adds
/// `AND (title LIKE %text% OR content LIKE %text%)`.
pub fn post_condition(filter: &PostFilter) -> Condition {
    let text = filter.text.as_deref().map(|text| {
        Condition::any()
            .add(post::Column::Title.like(contains(text)))
            .add(post::Column::Content.like(contains(text)))
    });

    Condition::all()
        .add_option(filter.id.map(|id| post::Column::Id.eq(id)))
        .add_option(filter.author_id.map(|id| post::Column::AuthorId.eq(id)))
        .add_option(filter.category_id.map(|id| post::Column::CategoryId.eq(id)))
        .add_option(text)
}

#[async_trait]
impl<'c, C> UserRepository for PostgresUserRepository<'c, C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username = %username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl<'c, C> CategoryRepository for PostgresCategoryRepository<'c, C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn find_all(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .all(self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl<'c, C> PostRepository for PostgresPostRepository<'c, C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn find_details(&self, filter: &PostFilter) -> Result<Vec<PostDetail>, RepoError> {
        let posts = PostEntity::find()
            .filter(post_condition(filter))
            .all(self.db)
            .await
            .map_err(map_db_err)?;

        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<i32> = posts.iter().map(|p| p.id).collect();
        let author_ids: BTreeSet<i32> = posts.iter().map(|p| p.author_id).collect();
        let category_ids: BTreeSet<i32> = posts.iter().map(|p| p.category_id).collect();

        let authors: HashMap<i32, User> = UserEntity::find()
            .filter(user::Column::Id.is_in(author_ids))
            .all(self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|m| (m.id, m.into()))
            .collect();

        let categories: HashMap<i32, Category> = CategoryEntity::find()
            .filter(category::Column::Id.is_in(category_ids))
            .all(self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|m| (m.id, m.into()))
            .collect();

        let mut comments: HashMap<i32, Vec<Comment>> = HashMap::new();
        for model in CommentEntity::find()
            .filter(comment::Column::PostId.is_in(post_ids))
            .all(self.db)
            .await
            .map_err(map_db_err)?
        {
            comments.entry(model.post_id).or_default().push(model.into());
        }

        posts
            .into_iter()
            .map(|model| -> Result<PostDetail, RepoError> {
                let author = authors.get(&model.author_id).cloned().ok_or_else(|| {
                    RepoError::Query(format!(
                        "post {} references missing user {}",
                        model.id, model.author_id
                    ))
                })?;
                let category = categories.get(&model.category_id).cloned().ok_or_else(|| {
                    RepoError::Query(format!(
                        "post {} references missing category {}",
                        model.id, model.category_id
                    ))
                })?;
                let comments = comments.remove(&model.id).unwrap_or_default();

                Ok(PostDetail {
                    post: model.into(),
                    author,
                    category,
                    comments,
                })
            })
            .collect()
    }
}

impl<'c, C> CommentRepository for PostgresCommentRepository<'c, C> where
    C: ConnectionTrait + Send + Sync
{
}
