//! Habit service - Handles habit tracking use cases.
//!
//! Orchestrates the habit and mark repositories via Unit of Work.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use super::Clock;
use crate::domain::{format_mark_date, Habit, HabitDraft, HabitHistory, MarkResponse, MarkStatus};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::with_transaction;

/// Habit service trait for dependency injection.
#[async_trait]
pub trait HabitService: Send + Sync {
    /// Create a habit with an empty history
    async fn create_habit(&self, draft: HabitDraft) -> AppResult<HabitHistory>;

    /// List every habit with its history, ordered by ID
    async fn list_habits(&self) -> AppResult<Vec<HabitHistory>>;

    /// Get one habit with its history
    async fn get_habit(&self, id: i32) -> AppResult<HabitHistory>;

    /// Mark a habit done for the current day
    async fn mark_today(&self, id: i32) -> AppResult<MarkResponse>;

    /// Replace name and notes of a habit
    async fn update_habit(&self, id: i32, draft: HabitDraft) -> AppResult<HabitHistory>;

    /// Delete a habit and all its marks atomically, returning the ID
    async fn delete_habit(&self, id: i32) -> AppResult<i32>;
}

/// Concrete implementation of HabitService using Unit of Work.
pub struct HabitManager<U: UnitOfWork> {
    uow: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U: UnitOfWork> HabitManager<U> {
    /// Create new habit service instance with Unit of Work
    pub fn new(uow: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { uow, clock }
    }

    async fn history_of(&self, habit: Habit) -> AppResult<HabitHistory> {
        let done_dates = self
            .uow
            .marks()
            .find_for_habit(habit.id)
            .await?
            .into_iter()
            .map(|mark| mark.date)
            .collect();

        Ok(HabitHistory::new(habit, done_dates))
    }
}

#[async_trait]
impl<U: UnitOfWork> HabitService for HabitManager<U> {
    async fn create_habit(&self, draft: HabitDraft) -> AppResult<HabitHistory> {
        let habit = self.uow.habits().create(draft, self.clock.now()).await?;
        tracing::info!(habit_id = habit.id, "Habit created");

        Ok(HabitHistory::new(habit, Vec::new()))
    }

    async fn list_habits(&self) -> AppResult<Vec<HabitHistory>> {
        let habits = self.uow.habits().list().await?;

        // Marks arrive date-ascending, so each habit's dates stay sorted
        let mut dates_by_habit: HashMap<i32, Vec<String>> = HashMap::new();
        for mark in self.uow.marks().list().await? {
            dates_by_habit.entry(mark.habit_id).or_default().push(mark.date);
        }

        Ok(habits
            .into_iter()
            .map(|habit| {
                let done_dates = dates_by_habit.remove(&habit.id).unwrap_or_default();
                HabitHistory::new(habit, done_dates)
            })
            .collect())
    }

    async fn get_habit(&self, id: i32) -> AppResult<HabitHistory> {
        let habit = self.uow.habits().find_by_id(id).await?.ok_or_not_found()?;
        self.history_of(habit).await
    }

    async fn mark_today(&self, id: i32) -> AppResult<MarkResponse> {
        self.uow.habits().find_by_id(id).await?.ok_or_not_found()?;

        let today = self.clock.today();
        let inserted = self
            .uow
            .marks()
            .insert_if_absent(id, format_mark_date(today))
            .await?;

        let status = if inserted {
            MarkStatus::Marked
        } else {
            MarkStatus::AlreadyMarked
        };
        tracing::info!(habit_id = id, date = %today, %status, "Habit mark requested");

        Ok(MarkResponse::new(status, today))
    }

    async fn update_habit(&self, id: i32, draft: HabitDraft) -> AppResult<HabitHistory> {
        let habit = self.uow.habits().update(id, draft).await?;
        tracing::info!(habit_id = id, "Habit updated");

        self.history_of(habit).await
    }

    async fn delete_habit(&self, id: i32) -> AppResult<i32> {
        let removed = with_transaction!(self.uow, |ctx| {
            let marks = ctx.marks().delete_for_habit(id).await?;
            ctx.habits().delete(id).await?;
            Ok(marks)
        })?;

        tracing::info!(habit_id = id, marks_removed = removed, "Habit deleted");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use mockall::predicate::eq;
    use std::future::Future;
    use std::pin::Pin;

    use crate::domain::Mark;
    use crate::errors::AppError;
    use crate::infra::{
        HabitRepository, MarkRepository, MockHabitRepository, MockMarkRepository,
        TransactionContext,
    };

    struct FixedClock;

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        }

        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap()
        }
    }

    /// Unit of Work backed by repository mocks
    struct TestUnitOfWork {
        habit_repo: Arc<MockHabitRepository>,
        mark_repo: Arc<MockMarkRepository>,
    }

    impl TestUnitOfWork {
        fn new(habit_repo: MockHabitRepository, mark_repo: MockMarkRepository) -> Self {
            Self {
                habit_repo: Arc::new(habit_repo),
                mark_repo: Arc::new(mark_repo),
            }
        }
    }

    #[async_trait]
    impl UnitOfWork for TestUnitOfWork {
        fn habits(&self) -> Arc<dyn HabitRepository> {
            self.habit_repo.clone()
        }

        fn marks(&self) -> Arc<dyn MarkRepository> {
            self.mark_repo.clone()
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(
                    TransactionContext<'a>,
                ) -> Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>
                + Send,
            T: Send,
        {
            Err(AppError::internal("Transactions not supported in test mock"))
        }
    }

    fn habit(id: i32, name: &str) -> Habit {
        Habit {
            id,
            name: name.to_string(),
            notes: None,
            created_at: FixedClock.now(),
        }
    }

    fn mark(habit_id: i32, date: &str) -> Mark {
        Mark {
            id: 0,
            habit_id,
            date: date.to_string(),
        }
    }

    fn service(
        habits: MockHabitRepository,
        marks: MockMarkRepository,
    ) -> HabitManager<TestUnitOfWork> {
        HabitManager::new(
            Arc::new(TestUnitOfWork::new(habits, marks)),
            Arc::new(FixedClock),
        )
    }

    #[tokio::test]
    async fn create_stamps_clock_time_and_starts_empty() {
        let mut habits = MockHabitRepository::new();
        habits
            .expect_create()
            .withf(|draft, created_at| draft.name() == "Read" && *created_at == FixedClock.now())
            .returning(|draft, created_at| {
                let (name, notes) = draft.into_parts();
                Ok(Habit {
                    id: 1,
                    name,
                    notes,
                    created_at,
                })
            });

        let service = service(habits, MockMarkRepository::new());
        let history = service
            .create_habit(HabitDraft::new("Read", None).unwrap())
            .await
            .unwrap();

        assert_eq!(history.habit.id, 1);
        assert_eq!(history.done_count(), 0);
    }

    #[tokio::test]
    async fn list_groups_marks_by_habit() {
        let mut habits = MockHabitRepository::new();
        habits
            .expect_list()
            .returning(|| Ok(vec![habit(1, "Read"), habit(2, "Run")]));

        let mut marks = MockMarkRepository::new();
        marks
            .expect_list()
            .times(1)
            .returning(|| Ok(vec![mark(2, "2024-01-01"), mark(2, "2024-01-02")]));

        let service = service(habits, marks);
        let list = service.list_habits().await.unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].done_count(), 0);
        assert_eq!(list[1].done_dates, vec!["2024-01-01", "2024-01-02"]);
    }

    #[tokio::test]
    async fn get_missing_habit_is_not_found() {
        let mut habits = MockHabitRepository::new();
        habits.expect_find_by_id().returning(|_| Ok(None));

        let service = service(habits, MockMarkRepository::new());
        let result = service.get_habit(42).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn mark_today_uses_clock_date() {
        let mut habits = MockHabitRepository::new();
        habits
            .expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(habit(id, "Read"))));

        let mut marks = MockMarkRepository::new();
        marks
            .expect_insert_if_absent()
            .with(eq(1), eq("2024-01-02".to_string()))
            .returning(|_, _| Ok(true));

        let service = service(habits, marks);
        let response = service.mark_today(1).await.unwrap();

        assert_eq!(response.status, MarkStatus::Marked);
        assert_eq!(response.date, "2024-01-02");
    }

    #[tokio::test]
    async fn mark_today_reports_existing_mark() {
        let mut habits = MockHabitRepository::new();
        habits
            .expect_find_by_id()
            .returning(|id| Ok(Some(habit(id, "Read"))));

        let mut marks = MockMarkRepository::new();
        marks.expect_insert_if_absent().returning(|_, _| Ok(false));

        let service = service(habits, marks);
        let response = service.mark_today(1).await.unwrap();

        assert_eq!(response.status, MarkStatus::AlreadyMarked);
    }

    #[tokio::test]
    async fn mark_today_on_missing_habit_writes_nothing() {
        let mut habits = MockHabitRepository::new();
        habits.expect_find_by_id().returning(|_| Ok(None));

        let mut marks = MockMarkRepository::new();
        marks.expect_insert_if_absent().never();

        let service = service(habits, marks);
        let result = service.mark_today(9).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn update_returns_history() {
        let mut habits = MockHabitRepository::new();
        habits.expect_update().returning(|id, draft| {
            let (name, notes) = draft.into_parts();
            Ok(Habit {
                id,
                name,
                notes,
                created_at: FixedClock.now(),
            })
        });

        let mut marks = MockMarkRepository::new();
        marks
            .expect_find_for_habit()
            .with(eq(5))
            .returning(|id| Ok(vec![mark(id, "2024-01-01")]));

        let service = service(habits, marks);
        let draft = HabitDraft::new("Walk", Some("10k steps".to_string())).unwrap();
        let history = service.update_habit(5, draft).await.unwrap();

        assert_eq!(history.habit.name, "Walk");
        assert_eq!(history.habit.notes.as_deref(), Some("10k steps"));
        assert_eq!(history.done_count(), 1);
    }
}
