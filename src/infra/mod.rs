//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! database connections, migrations, repositories and the
//! Unit of Work used for transaction management.

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{HabitRepository, HabitStore, MarkRepository, MarkStore};
pub use unit_of_work::{
    Persistence, TransactionContext, TxHabitRepository, TxMarkRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockHabitRepository, MockMarkRepository};
