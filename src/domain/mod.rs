//! Domain layer - Core business entities and logic
//!
//! This module contains the habit and mark models that represent
//! business concepts independent of infrastructure concerns.

pub mod habit;
pub mod mark;

pub use habit::{DeletedHabitResponse, Habit, HabitDraft, HabitHistory, HabitResponse};
pub use mark::{format_mark_date, Mark, MarkResponse, MarkStatus};
