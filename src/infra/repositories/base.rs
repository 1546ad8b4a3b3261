//! Base repository traits following Interface Segregation Principle (ISP).
//!
//! These traits provide the primitive store operations (insert-one,
//! find-by-id, find-all, find-where, update, delete-by-id, delete-where)
//! that concrete repositories compose. They are generic over the
//! connection so the same primitives run on a pooled connection or
//! inside a transaction.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, Condition, ConnectionTrait, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait, QueryFilter, QueryOrder,
};

use crate::errors::AppResult;

/// Anything that can hand out a connection to run statements on
pub trait Repository: Send + Sync {
    type Connection: ConnectionTrait + Send + Sync;

    /// Get database connection reference
    fn db(&self) -> &Self::Connection;
}

/// Read operations (Query) - Single Responsibility
#[async_trait]
pub trait ReadRepository<E>: Repository
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    /// Find entity by primary key
    async fn find_one<K>(&self, id: K) -> AppResult<Option<E::Model>>
    where
        K: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType> + Send,
    {
        E::find_by_id(id).one(self.db()).await.map_err(Into::into)
    }

    /// Find all entities in ascending order of `order`
    async fn find_all(&self, order: E::Column) -> AppResult<Vec<E::Model>> {
        E::find()
            .order_by_asc(order)
            .all(self.db())
            .await
            .map_err(Into::into)
    }

    /// Find entities matching `condition` in ascending order of `order`
    async fn find_where(&self, condition: Condition, order: E::Column) -> AppResult<Vec<E::Model>> {
        E::find()
            .filter(condition)
            .order_by_asc(order)
            .all(self.db())
            .await
            .map_err(Into::into)
    }
}

/// Write operations (Command) - Single Responsibility
#[async_trait]
pub trait WriteRepository<A>: Repository
where
    A: ActiveModelTrait + ActiveModelBehavior + Send + 'static,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A> + Send + Sync,
{
    /// Insert new entity
    async fn insert_one(&self, model: A) -> AppResult<<A::Entity as EntityTrait>::Model> {
        model.insert(self.db()).await.map_err(Into::into)
    }

    /// Update the changed fields of an existing entity
    async fn update_one(&self, model: A) -> AppResult<<A::Entity as EntityTrait>::Model> {
        model.update(self.db()).await.map_err(Into::into)
    }
}

/// Delete operations - Single Responsibility
#[async_trait]
pub trait DeleteRepository<E>: Repository
where
    E: EntityTrait,
{
    /// Delete entity by primary key, returning the number of rows removed
    async fn delete_one<K>(&self, id: K) -> AppResult<u64>
    where
        K: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType> + Send,
    {
        let result = E::delete_by_id(id).exec(self.db()).await?;
        Ok(result.rows_affected)
    }

    /// Delete every entity matching `condition`
    async fn delete_where(&self, condition: Condition) -> AppResult<u64> {
        let result = E::delete_many().filter(condition).exec(self.db()).await?;
        Ok(result.rows_affected)
    }
}
