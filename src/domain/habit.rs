//! Habit domain entity and related types.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::NAME_REQUIRED_MESSAGE;
use crate::errors::{AppError, AppResult};

/// Habit domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: i32,
    pub name: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated name/notes pair used for both creation and update.
///
/// The name is trimmed and must not be blank; empty notes are treated as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitDraft {
    name: String,
    notes: Option<String>,
}

impl HabitDraft {
    pub fn new(name: impl Into<String>, notes: Option<String>) -> AppResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation(NAME_REQUIRED_MESSAGE));
        }

        let notes = notes.filter(|n| !n.trim().is_empty());

        Ok(Self { name, notes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn into_parts(self) -> (String, Option<String>) {
        (self.name, self.notes)
    }
}

/// A habit together with the dates it was marked done, ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitHistory {
    pub habit: Habit,
    pub done_dates: Vec<String>,
}

impl HabitHistory {
    pub fn new(habit: Habit, done_dates: Vec<String>) -> Self {
        Self { habit, done_dates }
    }

    /// Number of days the habit was marked done
    pub fn done_count(&self) -> usize {
        self.done_dates.len()
    }
}

/// Habit response with completion history
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HabitResponse {
    /// Habit identifier
    #[schema(example = 1)]
    pub id: i32,
    /// Habit name
    #[schema(example = "Drink Water")]
    pub name: String,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "8 glasses")]
    pub notes: Option<String>,
    /// Creation timestamp (RFC 3339)
    #[schema(example = "2024-01-01T08:30:00Z")]
    pub created_at: String,
    /// Number of days marked done
    #[schema(example = 2)]
    pub done_count: usize,
    /// Days marked done, ascending (`YYYY-MM-DD`)
    #[schema(example = json!(["2024-01-01", "2024-01-02"]))]
    pub done_dates: Vec<String>,
}

impl From<HabitHistory> for HabitResponse {
    fn from(history: HabitHistory) -> Self {
        let done_count = history.done_count();
        let habit = history.habit;
        Self {
            id: habit.id,
            name: habit.name,
            notes: habit.notes,
            created_at: habit.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            done_count,
            done_dates: history.done_dates,
        }
    }
}

/// Response for a deleted habit
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedHabitResponse {
    /// Identifier of the removed habit
    #[schema(example = 1)]
    pub id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn habit() -> Habit {
        Habit {
            id: 3,
            name: "Meditate".to_string(),
            notes: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 0).unwrap(),
        }
    }

    #[test]
    fn draft_trims_name() {
        let draft = HabitDraft::new("  Read  ", Some("20 pages".to_string())).unwrap();
        assert_eq!(draft.name(), "Read");
        assert_eq!(draft.notes(), Some("20 pages"));
    }

    #[test]
    fn draft_rejects_blank_name() {
        for name in ["", "   ", "\t"] {
            let err = HabitDraft::new(name, None).unwrap_err();
            assert!(matches!(err, AppError::Validation(ref m) if m == NAME_REQUIRED_MESSAGE));
        }
    }

    #[test]
    fn draft_drops_empty_notes() {
        let draft = HabitDraft::new("Read", Some(String::new())).unwrap();
        assert_eq!(draft.notes(), None);
    }

    #[test]
    fn response_counts_dates_and_formats_timestamp() {
        let history = HabitHistory::new(
            habit(),
            vec!["2024-01-01".to_string(), "2024-01-03".to_string()],
        );

        let response = HabitResponse::from(history);
        assert_eq!(response.done_count, 2);
        assert_eq!(response.done_dates, vec!["2024-01-01", "2024-01-03"]);
        assert_eq!(response.created_at, "2024-01-01T08:30:00Z");
    }

    #[test]
    fn response_omits_missing_notes() {
        let response = HabitResponse::from(HabitHistory::new(habit(), vec![]));
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("notes").is_none());
        assert_eq!(json["done_count"], 0);
        assert_eq!(json["done_dates"], serde_json::json!([]));
    }
}
