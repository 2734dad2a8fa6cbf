//! Time source used for the test date and response timestamps.

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// The calendar day after today.
    fn tomorrow(&self) -> NaiveDate {
        let today = self.now().date_naive();
        today.checked_add_days(Days::new(1)).unwrap_or(today)
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Fixed clock at the given UTC date and time. Falls back to the Unix
    /// epoch for out-of-range components.
    pub fn ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        let instant = Utc
            .with_ymd_and_hms(year, month, day, hour, min, sec)
            .single()
            .unwrap_or_default();
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
