//! Mark domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{MARK_DATE_FORMAT, MARK_STATUS_ALREADY_MARKED, MARK_STATUS_MARKED};

/// A record that a habit was completed on a calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    pub id: i32,
    pub habit_id: i32,
    pub date: String,
}

/// Render a calendar day the way marks store it.
pub fn format_mark_date(date: NaiveDate) -> String {
    date.format(MARK_DATE_FORMAT).to_string()
}

/// Result of marking a habit for a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MarkStatus {
    #[serde(rename = "marked")]
    Marked,
    #[serde(rename = "already marked")]
    AlreadyMarked,
}

impl MarkStatus {
    /// Whether a new mark row was written
    pub fn is_new(&self) -> bool {
        matches!(self, MarkStatus::Marked)
    }
}

impl std::fmt::Display for MarkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkStatus::Marked => write!(f, "{}", MARK_STATUS_MARKED),
            MarkStatus::AlreadyMarked => write!(f, "{}", MARK_STATUS_ALREADY_MARKED),
        }
    }
}

/// Mark-today response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MarkResponse {
    /// `marked` or `already marked`
    #[schema(example = "marked")]
    pub status: MarkStatus,
    /// Day that was marked (`YYYY-MM-DD`)
    #[schema(example = "2024-01-01")]
    pub date: String,
}

impl MarkResponse {
    pub fn new(status: MarkStatus, date: NaiveDate) -> Self {
        Self {
            status,
            date: format_mark_date(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_with_spaces() {
        let json = serde_json::to_string(&MarkStatus::AlreadyMarked).unwrap();
        assert_eq!(json, "\"already marked\"");
        assert_eq!(MarkStatus::AlreadyMarked.to_string(), "already marked");
    }

    #[test]
    fn response_uses_iso_day() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let response = MarkResponse::new(MarkStatus::Marked, date);

        assert_eq!(response.date, "2024-01-01");
        assert!(response.status.is_new());
    }
}
