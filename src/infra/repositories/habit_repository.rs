//! Habit repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, DatabaseConnection, DbErr, Set};

use super::base::{ReadRepository, Repository, WriteRepository};
use super::entities::habit::{self, ActiveModel};
use crate::domain::{Habit, HabitDraft};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Habit repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait HabitRepository: Send + Sync {
    /// Find habit by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Habit>>;

    /// List all habits, ordered by ID ascending
    async fn list(&self) -> AppResult<Vec<Habit>>;

    /// Create a new habit stamped with `created_at`
    async fn create(&self, draft: HabitDraft, created_at: DateTime<Utc>) -> AppResult<Habit>;

    /// Overwrite name and notes of an existing habit
    async fn update(&self, id: i32, draft: HabitDraft) -> AppResult<Habit>;
}

/// Concrete implementation of HabitRepository
pub struct HabitStore {
    db: DatabaseConnection,
}

impl HabitStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Repository for HabitStore {
    type Connection = DatabaseConnection;

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl ReadRepository<habit::Entity> for HabitStore {}

impl WriteRepository<ActiveModel> for HabitStore {}

#[async_trait]
impl HabitRepository for HabitStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Habit>> {
        Ok(self.find_one(id).await?.map(Habit::from))
    }

    async fn list(&self) -> AppResult<Vec<Habit>> {
        let models = self.find_all(habit::Column::Id).await?;
        Ok(models.into_iter().map(Habit::from).collect())
    }

    async fn create(&self, draft: HabitDraft, created_at: DateTime<Utc>) -> AppResult<Habit> {
        let (name, notes) = draft.into_parts();
        let active_model = ActiveModel {
            name: Set(name),
            notes: Set(notes),
            created_at: Set(created_at),
            ..Default::default()
        };

        let model = self.insert_one(active_model).await?;
        Ok(Habit::from(model))
    }

    async fn update(&self, id: i32, draft: HabitDraft) -> AppResult<Habit> {
        let (name, notes) = draft.into_parts();
        let active = ActiveModel {
            id: ActiveValue::Unchanged(id),
            name: Set(name),
            notes: Set(notes),
            ..Default::default()
        };

        // A single UPDATE keyed on id; a row removed concurrently reads as missing
        match self.update_one(active).await {
            Ok(model) => Ok(Habit::from(model)),
            Err(AppError::Database(DbErr::RecordNotUpdated | DbErr::RecordNotFound(_))) => {
                Err(AppError::NotFound)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::infra::Database;

    async fn store() -> HabitStore {
        HabitStore::new(Database::in_memory().await.get_connection())
    }

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 0).unwrap()
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let store = store().await;
        for name in ["Read", "Run", "Rest"] {
            store
                .create(HabitDraft::new(name, None).unwrap(), created_at())
                .await
                .unwrap();
        }

        let ids: Vec<i32> = store.list().await.unwrap().iter().map(|h| h.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids, sorted);
    }

    #[tokio::test]
    async fn update_keeps_creation_time() {
        let store = store().await;
        let habit = store
            .create(HabitDraft::new("Read", Some("1 page".into())).unwrap(), created_at())
            .await
            .unwrap();

        let updated = store
            .update(habit.id, HabitDraft::new("Read more", None).unwrap())
            .await
            .unwrap();

        assert_eq!(updated.name, "Read more");
        assert_eq!(updated.notes, None);
        assert_eq!(updated.created_at, created_at());
    }

    #[tokio::test]
    async fn update_of_missing_row_is_not_found() {
        let store = store().await;

        let result = store.update(77, HabitDraft::new("Ghost", None).unwrap()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
