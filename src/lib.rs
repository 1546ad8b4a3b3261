//! Habit Tracker - REST service for tracking daily habits
//!
//! Habits are created, marked done once per calendar day, renamed and
//! deleted over HTTP; each habit reports how often and on which days
//! it was done.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Habit and mark entities
//! - **services**: Habit use cases
//! - **infra**: Database, migrations, repositories, Unit of Work
//! - **api**: HTTP handlers, extractors and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Habit, HabitDraft, Mark};
pub use errors::{AppError, AppResult};
