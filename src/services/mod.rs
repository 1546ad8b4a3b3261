//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod clock;
mod habit_service;

pub use clock::{Clock, SystemClock};
pub use habit_service::{HabitManager, HabitService};
