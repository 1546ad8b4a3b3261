//! Time source for habit creation and marking.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of "now" and "today", injected so tests can pin the calendar.
pub trait Clock: Send + Sync {
    /// Calendar day used when marking a habit
    fn today(&self) -> NaiveDate;

    /// Instant stamped on newly created habits
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock; `today` follows the server's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
