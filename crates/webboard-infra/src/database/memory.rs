//! In-memory store - used as fallback when no database is configured.
//!
//! Enforces the same constraints as the SQL schema: unique usernames and
//! category names, foreign keys without cascade, and comments deleted with
//! their post. Transactions are serialised by holding the store lock and
//! work on a copy that only replaces the committed state on commit.
//! Note: Data is lost on process restart.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use webboard_core::domain::{Category, Comment, Post, PostDetail, PostFilter, User};
use webboard_core::error::RepoError;
use webboard_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, PostRepository, RowLock, Store,
    StoreTx, UserRepository,
};

#[derive(Debug, Clone, Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    categories: BTreeMap<i32, Category>,
    posts: BTreeMap<i32, Post>,
    comments: BTreeMap<i32, Comment>,
    user_seq: i32,
    category_seq: i32,
    post_seq: i32,
    comment_seq: i32,
}

/// A record kind stored in [`Tables`].
trait Row: Clone + Send + Sync + 'static {
    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
    fn table(tables: &Tables) -> &BTreeMap<i32, Self>;
    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i32, Self>;
    fn next_id(tables: &mut Tables) -> i32;

    /// Uniqueness and foreign key checks before a write.
    fn check(tables: &Tables, row: &Self) -> Result<(), RepoError>;

    /// Referential actions before the row with `id` is removed.
    fn on_delete(tables: &mut Tables, id: i32) -> Result<(), RepoError>;
}

fn next(seq: &mut i32) -> i32 {
    *seq += 1;
    *seq
}

fn constraint(msg: impl Into<String>) -> RepoError {
    RepoError::Constraint(msg.into())
}

impl Row for User {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn table(tables: &Tables) -> &BTreeMap<i32, Self> {
        &tables.users
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i32, Self> {
        &mut tables.users
    }

    fn next_id(tables: &mut Tables) -> i32 {
        next(&mut tables.user_seq)
    }

    fn check(tables: &Tables, row: &Self) -> Result<(), RepoError> {
        if tables
            .users
            .values()
            .any(|u| u.id != row.id && u.username == row.username)
        {
            return Err(constraint(format!("username '{}' already exists", row.username)));
        }
        Ok(())
    }

    fn on_delete(tables: &mut Tables, id: i32) -> Result<(), RepoError> {
        let referenced = tables.posts.values().any(|p| p.author_id == id)
            || tables.comments.values().any(|c| c.author_id == id);
        if referenced {
            return Err(constraint(format!("user {id} is still referenced")));
        }
        Ok(())
    }
}

impl Row for Category {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn table(tables: &Tables) -> &BTreeMap<i32, Self> {
        &tables.categories
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i32, Self> {
        &mut tables.categories
    }

    fn next_id(tables: &mut Tables) -> i32 {
        next(&mut tables.category_seq)
    }

    fn check(tables: &Tables, row: &Self) -> Result<(), RepoError> {
        if tables
            .categories
            .values()
            .any(|c| c.id != row.id && c.name == row.name)
        {
            return Err(constraint(format!("category '{}' already exists", row.name)));
        }
        Ok(())
    }

    fn on_delete(tables: &mut Tables, id: i32) -> Result<(), RepoError> {
        if tables.posts.values().any(|p| p.category_id == id) {
            return Err(constraint(format!("category {id} still has posts")));
        }
        Ok(())
    }
}

impl Row for Post {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn table(tables: &Tables) -> &BTreeMap<i32, Self> {
        &tables.posts
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i32, Self> {
        &mut tables.posts
    }

    fn next_id(tables: &mut Tables) -> i32 {
        next(&mut tables.post_seq)
    }

    fn check(tables: &Tables, row: &Self) -> Result<(), RepoError> {
        if !tables.users.contains_key(&row.author_id) {
            return Err(constraint(format!("user {} does not exist", row.author_id)));
        }
        if !tables.categories.contains_key(&row.category_id) {
            return Err(constraint(format!("category {} does not exist", row.category_id)));
        }
        Ok(())
    }

    fn on_delete(tables: &mut Tables, id: i32) -> Result<(), RepoError> {
        tables.comments.retain(|_, c| c.post_id != id);
        Ok(())
    }
}

impl Row for Comment {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn table(tables: &Tables) -> &BTreeMap<i32, Self> {
        &tables.comments
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i32, Self> {
        &mut tables.comments
    }

    fn next_id(tables: &mut Tables) -> i32 {
        next(&mut tables.comment_seq)
    }

    fn check(tables: &Tables, row: &Self) -> Result<(), RepoError> {
        if !tables.posts.contains_key(&row.post_id) {
            return Err(constraint(format!("post {} does not exist", row.post_id)));
        }
        if !tables.users.contains_key(&row.author_id) {
            return Err(constraint(format!("user {} does not exist", row.author_id)));
        }
        Ok(())
    }

    fn on_delete(_tables: &mut Tables, _id: i32) -> Result<(), RepoError> {
        Ok(())
    }
}

/// Generic repository over one table of an open in-memory transaction.
struct InMemoryRepository<'t, R> {
    tables: &'t Mutex<Tables>,
    _row: PhantomData<R>,
}

impl<'t, R> InMemoryRepository<'t, R> {
    fn new(tables: &'t Mutex<Tables>) -> Self {
        Self {
            tables,
            _row: PhantomData,
        }
    }
}

#[async_trait]
impl<R: Row> BaseRepository<R, i32> for InMemoryRepository<'_, R> {
    async fn find_by_id(&self, id: i32) -> Result<Option<R>, RepoError> {
        let tables = self.tables.lock().await;
        Ok(R::table(&tables).get(&id).cloned())
    }

    async fn find_locked(&self, id: i32, _lock: RowLock) -> Result<Option<R>, RepoError> {
        // The whole store is already locked for the transaction.
        self.find_by_id(id).await
    }

    async fn insert(&self, mut row: R) -> Result<R, RepoError> {
        let mut tables = self.tables.lock().await;
        R::check(&tables, &row)?;

        let id = R::next_id(&mut tables);
        row.set_id(id);
        R::table_mut(&mut tables).insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, row: R) -> Result<R, RepoError> {
        let mut tables = self.tables.lock().await;
        if !R::table(&tables).contains_key(&row.id()) {
            return Err(RepoError::NotFound);
        }
        R::check(&tables, &row)?;

        R::table_mut(&mut tables).insert(row.id(), row.clone());
        Ok(row)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.lock().await;
        if !R::table(&tables).contains_key(&id) {
            return Err(RepoError::NotFound);
        }
        R::on_delete(&mut tables, id)?;

        R::table_mut(&mut tables).remove(&id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository<'_, User> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository<'_, Category> {
    async fn find_all(&self) -> Result<Vec<Category>, RepoError> {
        let tables = self.tables.lock().await;
        Ok(tables.categories.values().cloned().collect())
    }
}

#[async_trait]
impl PostRepository for InMemoryRepository<'_, Post> {
    async fn find_details(&self, filter: &PostFilter) -> Result<Vec<PostDetail>, RepoError> {
        let tables = self.tables.lock().await;

        tables
            .posts
            .values()
            .filter(|post| filter.matches(post))
            .map(|post| {
                let author = tables.users.get(&post.author_id).cloned().ok_or_else(|| {
                    RepoError::Query(format!("post {} references missing user", post.id))
                })?;
                let category = tables
                    .categories
                    .get(&post.category_id)
                    .cloned()
                    .ok_or_else(|| {
                        RepoError::Query(format!("post {} references missing category", post.id))
                    })?;
                let comments = tables
                    .comments
                    .values()
                    .filter(|c| c.post_id == post.id)
                    .cloned()
                    .collect();

                Ok(PostDetail {
                    post: post.clone(),
                    author,
                    category,
                    comments,
                })
            })
            .collect()
    }
}

impl CommentRepository for InMemoryRepository<'_, Comment> {}

/// In-memory store using a BTreeMap per table behind an async Mutex.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, RepoError> {
        let committed = self.tables.clone().lock_owned().await;
        let working = Mutex::new(Tables::clone(&committed));
        Ok(Box::new(InMemoryTx { committed, working }))
    }
}

/// Open in-memory transaction. Dropping it discards the working copy.
struct InMemoryTx {
    committed: OwnedMutexGuard<Tables>,
    working: Mutex<Tables>,
}

#[async_trait]
impl StoreTx for InMemoryTx {
    fn users(&self) -> Box<dyn UserRepository + '_> {
        Box::new(InMemoryRepository::<User>::new(&self.working))
    }

    fn categories(&self) -> Box<dyn CategoryRepository + '_> {
        Box::new(InMemoryRepository::<Category>::new(&self.working))
    }

    fn posts(&self) -> Box<dyn PostRepository + '_> {
        Box::new(InMemoryRepository::<Post>::new(&self.working))
    }

    fn comments(&self) -> Box<dyn CommentRepository + '_> {
        Box::new(InMemoryRepository::<Comment>::new(&self.working))
    }

    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        let Self {
            mut committed,
            working,
        } = *self;
        *committed = working.into_inner();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_ids() {
        let store = InMemoryStore::new();
        let tx = store.begin().await.unwrap();

        let first = tx.users().insert(User::new("a".into())).await.unwrap();
        let second = tx.users().insert(User::new("b".into())).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_rollback_on_drop() {
        let store = InMemoryStore::new();

        let tx = store.begin().await.unwrap();
        tx.categories()
            .insert(Category::new("news".into()))
            .await
            .unwrap();
        drop(tx);

        let tx = store.begin().await.unwrap();
        assert!(tx.categories().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_commit_publishes_writes() {
        let store = InMemoryStore::new();

        let tx = store.begin().await.unwrap();
        tx.categories()
            .insert(Category::new("news".into()))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let tx = store.begin().await.unwrap();
        assert_eq!(tx.categories().find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_constraint() {
        let store = InMemoryStore::new();
        let tx = store.begin().await.unwrap();

        tx.categories()
            .insert(Category::new("news".into()))
            .await
            .unwrap();
        let err = tx
            .categories()
            .insert(Category::new("news".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_post_requires_existing_author() {
        let store = InMemoryStore::new();
        let tx = store.begin().await.unwrap();
        let category = tx
            .categories()
            .insert(Category::new("news".into()))
            .await
            .unwrap();

        let err = tx
            .posts()
            .insert(Post::new("t".into(), "c".into(), 42, category.id))
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
    }
}
