//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod base;
pub(crate) mod entities;
mod habit_repository;
mod mark_repository;

pub use base::{DeleteRepository, ReadRepository, Repository, WriteRepository};
pub use habit_repository::{HabitRepository, HabitStore};
pub use mark_repository::{MarkRepository, MarkStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use habit_repository::MockHabitRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use mark_repository::MockMarkRepository;
