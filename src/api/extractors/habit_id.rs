//! Habit identifier extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::config::INVALID_HABIT_ID_MESSAGE;
use crate::errors::{AppError, AppResult};

/// Positive habit ID taken from the `:id` path segment.
///
/// Non-numeric, zero or negative values are rejected with 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for HabitId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request(INVALID_HABIT_ID_MESSAGE))?;

        parse_habit_id(&raw).map(HabitId)
    }
}

/// Parse a raw identifier as used in paths and the `?id=` query.
pub fn parse_habit_id(raw: &str) -> AppResult<i32> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::bad_request(INVALID_HABIT_ID_MESSAGE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_integers() {
        assert_eq!(parse_habit_id("1").unwrap(), 1);
        assert_eq!(parse_habit_id("2147483647").unwrap(), i32::MAX);
    }

    #[test]
    fn rejects_everything_else() {
        for raw in ["", "abc", "0", "-3", "1.5", "99999999999"] {
            assert!(
                matches!(parse_habit_id(raw), Err(AppError::BadRequest(_))),
                "{raw:?} should be rejected"
            );
        }
    }
}
