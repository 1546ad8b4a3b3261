//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::{Database, Persistence};
use crate::services::{HabitManager, HabitService, SystemClock};

/// Application state shared by all handlers.
///
/// The store is injected here; handlers never reach for globals.
#[derive(Clone)]
pub struct AppState {
    /// Habit service
    pub habit_service: Arc<dyn HabitService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the production services on top of a connected database.
    pub fn from_database(database: Arc<Database>) -> Self {
        let uow = Arc::new(Persistence::new(database.get_connection()));
        let habit_service = Arc::new(HabitManager::new(uow, Arc::new(SystemClock)));

        Self {
            habit_service,
            database,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(habit_service: Arc<dyn HabitService>, database: Arc<Database>) -> Self {
        Self {
            habit_service,
            database,
        }
    }
}
