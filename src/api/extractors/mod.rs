//! Custom request extractors.

mod habit_id;
mod validated_json;

pub use habit_id::{parse_habit_id, HabitId};
pub use validated_json::ValidatedJson;
