use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Local, TimeZone};

/// Source of wall-clock time for the controller
pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    fn now_ms(&self) -> i64 {
        self.now().timestamp_millis()
    }

    /// Date label stored with a finished test
    fn date_label(&self) -> String {
        self.now().format("%-m/%-d/%Y").to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Manually advanced clock. Clones share the same time, so a test can keep
/// one handle while the controller owns another.
#[derive(Debug, Clone)]
pub struct FakeClock {
    ms: Rc<Cell<i64>>,
}

impl FakeClock {
    pub fn at_ms(ms: i64) -> Self {
        Self {
            ms: Rc::new(Cell::new(ms)),
        }
    }

    pub fn advance_ms(&self, ms: i64) {
        self.ms.set(self.ms.get() + ms);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.advance_ms(secs * 1_000);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Local> {
        Local
            .timestamp_millis_opt(self.ms.get())
            .single()
            .unwrap_or_else(Local::now)
    }

    fn now_ms(&self) -> i64 {
        self.ms.get()
    }
}
