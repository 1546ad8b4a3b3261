//! Mark repository implementation.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, Set, SqlErr};

use super::base::{ReadRepository, Repository, WriteRepository};
use super::entities::mark::{self, ActiveModel};
use crate::domain::Mark;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Mark repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MarkRepository: Send + Sync {
    /// Marks of one habit, ordered by date ascending
    async fn find_for_habit(&self, habit_id: i32) -> AppResult<Vec<Mark>>;

    /// Every mark of every habit, ordered by date ascending
    async fn list(&self) -> AppResult<Vec<Mark>>;

    /// Record a mark for `date`.
    ///
    /// Returns `false` when the (habit, date) pair already exists and
    /// `NotFound` when the habit is gone.
    async fn insert_if_absent(&self, habit_id: i32, date: String) -> AppResult<bool>;
}

/// Concrete implementation of MarkRepository
pub struct MarkStore {
    db: DatabaseConnection,
}

impl MarkStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Repository for MarkStore {
    type Connection = DatabaseConnection;

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl ReadRepository<mark::Entity> for MarkStore {}

impl WriteRepository<ActiveModel> for MarkStore {}

#[async_trait]
impl MarkRepository for MarkStore {
    async fn find_for_habit(&self, habit_id: i32) -> AppResult<Vec<Mark>> {
        let models = self
            .find_where(
                Condition::all().add(mark::Column::HabitId.eq(habit_id)),
                mark::Column::Date,
            )
            .await?;

        Ok(models.into_iter().map(Mark::from).collect())
    }

    async fn list(&self) -> AppResult<Vec<Mark>> {
        let models = self.find_all(mark::Column::Date).await?;
        Ok(models.into_iter().map(Mark::from).collect())
    }

    async fn insert_if_absent(&self, habit_id: i32, date: String) -> AppResult<bool> {
        let active_model = ActiveModel {
            habit_id: Set(habit_id),
            date: Set(date),
            ..Default::default()
        };

        // The unique (habit_id, date) index turns a concurrent duplicate into an error
        match self.insert_one(active_model).await {
            Ok(_) => Ok(true),
            Err(AppError::Database(err)) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Ok(false),
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => Err(AppError::NotFound),
                _ => Err(AppError::Database(err)),
            },
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::HabitDraft;
    use crate::infra::{Database, HabitRepository, HabitStore};

    async fn stores() -> (HabitStore, MarkStore) {
        let db = Database::in_memory().await;
        (
            HabitStore::new(db.get_connection()),
            MarkStore::new(db.get_connection()),
        )
    }

    #[tokio::test]
    async fn insert_if_absent_reports_duplicates() {
        let (habits, marks) = stores().await;
        let habit = habits
            .create(HabitDraft::new("Read", None).unwrap(), Utc::now())
            .await
            .unwrap();

        assert!(marks.insert_if_absent(habit.id, "2024-01-01".into()).await.unwrap());
        assert!(!marks.insert_if_absent(habit.id, "2024-01-01".into()).await.unwrap());
        assert_eq!(marks.find_for_habit(habit.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn insert_for_missing_habit_is_not_found() {
        let (_, marks) = stores().await;

        let result = marks.insert_if_absent(404, "2024-01-01".into()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn list_returns_all_marks_by_date() {
        let (habits, marks) = stores().await;
        let read = habits
            .create(HabitDraft::new("Read", None).unwrap(), Utc::now())
            .await
            .unwrap();
        let run = habits
            .create(HabitDraft::new("Run", None).unwrap(), Utc::now())
            .await
            .unwrap();

        marks.insert_if_absent(read.id, "2024-01-03".into()).await.unwrap();
        marks.insert_if_absent(run.id, "2024-01-02".into()).await.unwrap();
        marks.insert_if_absent(read.id, "2024-01-01".into()).await.unwrap();

        let dates: Vec<String> = marks.list().await.unwrap().into_iter().map(|m| m.date).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    }
}
