//! PostgreSQL store - one database transaction per service operation.

use async_trait::async_trait;
use sea_orm::{DatabaseTransaction, DbConn, TransactionTrait};

use webboard_core::error::RepoError;
use webboard_core::ports::{
    CategoryRepository, CommentRepository, PostRepository, Store, StoreTx, UserRepository,
};

use super::postgres_base::map_db_err;
use super::postgres_repo::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresPostRepository,
    PostgresUserRepository,
};

/// Store backed by a SeaORM connection pool.
pub struct PostgresStore {
    db: DbConn,
}

impl PostgresStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        Ok(Box::new(PostgresTx { txn }))
    }
}

/// An open database transaction. SeaORM rolls it back when dropped.
pub struct PostgresTx {
    txn: DatabaseTransaction,
}

#[async_trait]
impl StoreTx for PostgresTx {
    fn users(&self) -> Box<dyn UserRepository + '_> {
        Box::new(PostgresUserRepository::new(&self.txn))
    }

    fn categories(&self) -> Box<dyn CategoryRepository + '_> {
        Box::new(PostgresCategoryRepository::new(&self.txn))
    }

    fn posts(&self) -> Box<dyn PostRepository + '_> {
        Box::new(PostgresPostRepository::new(&self.txn))
    }

    fn comments(&self) -> Box<dyn CommentRepository + '_> {
        Box::new(PostgresCommentRepository::new(&self.txn))
    }

    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        self.txn.commit().await.map_err(map_db_err)
    }
}
