//! Unit tests for the endpoint registry.

mod service_tests;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

/// Clock that returns a settable instant.
#[derive(Debug)]
pub(super) struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    pub(super) fn at(year: i32, month: u32, day: u32) -> Self {
        let instant = Utc
            .with_ymd_and_hms(year, month, day, 9, 30, 0)
            .single()
            .expect("valid test instant");
        Self(Mutex::new(instant))
    }

    pub(super) fn now(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock lock")
    }

    pub(super) fn advance_days(&self, days: i64) {
        let mut instant = self.0.lock().expect("clock lock");
        *instant += chrono::Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now()
    }
}
