//! Unit tests for the presenter.


use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to one instant.
struct FixedClock(DateTime<Utc>);

impl FixedClock {
    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
                .single()
                .expect("valid instant"),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
