//! Unit of Work pattern implementation.
//!
//! Centralizes access to the habit and mark repositories and runs
//! multi-statement operations (such as deleting a habit together with
//! its marks) inside a single database transaction.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::repositories::entities::{habit, mark};
use super::repositories::{
    DeleteRepository, HabitRepository, HabitStore, MarkRepository, MarkStore, Repository,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly due to the generic `transaction` method;
/// tests provide a hand-written implementation instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get habit repository
    fn habits(&self) -> Arc<dyn HabitRepository>;

    /// Get mark repository
    fn marks(&self) -> Arc<dyn MarkRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>
            + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Habit repository bound to this transaction
    pub fn habits(&self) -> TxHabitRepository<'_> {
        TxHabitRepository { txn: self.txn }
    }

    /// Mark repository bound to this transaction
    pub fn marks(&self) -> TxMarkRepository<'_> {
        TxMarkRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    habit_repo: Arc<HabitStore>,
    mark_repo: Arc<MarkStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let habit_repo = Arc::new(HabitStore::new(db.clone()));
        let mark_repo = Arc::new(MarkStore::new(db.clone()));
        Self {
            db,
            habit_repo,
            mark_repo,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn habits(&self) -> Arc<dyn HabitRepository> {
        self.habit_repo.clone()
    }

    fn marks(&self) -> Arc<dyn MarkRepository> {
        self.mark_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>
            + Send,
        T: Send,
    {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware habit repository.
pub struct TxHabitRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl Repository for TxHabitRepository<'_> {
    type Connection = DatabaseTransaction;

    fn db(&self) -> &DatabaseTransaction {
        self.txn
    }
}

impl DeleteRepository<habit::Entity> for TxHabitRepository<'_> {}

impl TxHabitRepository<'_> {
    /// Permanently delete a habit, failing with `NotFound` if no row matched
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let removed = self.delete_one(id).await?;
        if removed == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// Transaction-aware mark repository.
pub struct TxMarkRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl Repository for TxMarkRepository<'_> {
    type Connection = DatabaseTransaction;

    fn db(&self) -> &DatabaseTransaction {
        self.txn
    }
}

impl DeleteRepository<mark::Entity> for TxMarkRepository<'_> {}

impl TxMarkRepository<'_> {
    /// Delete every mark of a habit, returning how many were removed
    pub async fn delete_for_habit(&self, habit_id: i32) -> AppResult<u64> {
        self.delete_where(Condition::all().add(mark::Column::HabitId.eq(habit_id)))
            .await
    }
}

/// Simpler API for executing transactional operations.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::{Habit, HabitDraft};
    use crate::infra::Database;

    async fn persistence_with_marked_habit() -> (Persistence, Habit) {
        let db = Database::in_memory().await;
        let uow = Persistence::new(db.get_connection());

        let habit = uow
            .habits()
            .create(HabitDraft::new("Read", None).unwrap(), Utc::now())
            .await
            .unwrap();
        for date in ["2024-01-01", "2024-01-02"] {
            uow.marks()
                .insert_if_absent(habit.id, date.to_string())
                .await
                .unwrap();
        }

        (uow, habit)
    }

    #[tokio::test]
    async fn failed_transaction_keeps_deleted_marks() {
        let (uow, habit) = persistence_with_marked_habit().await;
        let habit_id = habit.id;

        let result: AppResult<()> = with_transaction!(uow, |ctx| {
            let removed = ctx.marks().delete_for_habit(habit_id).await?;
            assert_eq!(removed, 2);
            Err(AppError::internal("abort after deleting marks"))
        });

        assert!(matches!(result, Err(AppError::Internal(_))));
        assert_eq!(uow.marks().find_for_habit(habit_id).await.unwrap().len(), 2);
        assert!(uow.habits().find_by_id(habit_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn committed_transaction_removes_habit_and_marks() {
        let (uow, habit) = persistence_with_marked_habit().await;
        let habit_id = habit.id;

        let result = with_transaction!(uow, |ctx| {
            ctx.marks().delete_for_habit(habit_id).await?;
            ctx.habits().delete(habit_id).await
        });

        assert!(result.is_ok());

        assert!(uow.marks().find_for_habit(habit_id).await.unwrap().is_empty());
        assert!(uow.habits().find_by_id(habit_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_missing_habit_rolls_back() {
        let (uow, _) = persistence_with_marked_habit().await;

        let result = with_transaction!(uow, |ctx| ctx.habits().delete(999).await);

        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
