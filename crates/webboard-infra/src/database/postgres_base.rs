use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    Iterable, PrimaryKeyToColumn, PrimaryKeyTrait, QuerySelect, SqlErr,
};

use webboard_core::error::RepoError;
use webboard_core::ports::{BaseRepository, RowLock};

/// Generic PostgreSQL repository implementation.
///
/// Borrows a connection, normally the transaction a [`super::PostgresTx`]
/// owns, so every statement issued through it joins that transaction.
pub struct PostgresBaseRepository<'c, E, C>
where
    E: EntityTrait,
{
    pub(crate) db: &'c C,
    _entity: PhantomData<E>,
}

impl<'c, E, C> PostgresBaseRepository<'c, E, C>
where
    E: EntityTrait,
{
    pub fn new(db: &'c C) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// Classify a SeaORM error for the core.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    if let Some(
        SqlErr::UniqueConstraintViolation(msg) | SqlErr::ForeignKeyConstraintViolation(msg),
    ) = err.sql_err()
    {
        return RepoError::Constraint(msg);
    }

    match err {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

#[async_trait]
impl<'c, E, C, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<'c, E, C>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    C: ConnectionTrait + Send + Sync,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id).one(self.db).await.map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_locked(&self, id: ID, lock: RowLock) -> Result<Option<T>, RepoError> {
        let select = E::find_by_id(id);
        let select = match lock {
            RowLock::Share => select.lock_shared(),
            RowLock::Update => select.lock_exclusive(),
        };
        let result = select.one(self.db).await.map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let mut active_model: E::ActiveModel = entity.into();
        // The id column is generated by the database.
        for key in E::PrimaryKey::iter() {
            active_model.not_set(key.into_column());
        }

        let model = active_model.insert(self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let active_model: E::ActiveModel = entity.into();
        let model = active_model.update(self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete(&self, id: ID) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
