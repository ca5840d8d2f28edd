use crate::core::calendar::{Date, Time};
use crate::core::instant::Instant;
use chrono::{Datelike, Local, Timelike};

/// Source of the current wall-clock time.
pub trait Clock {
    fn now(&self) -> Instant;

    fn today(&self) -> Date {
        self.now().date
    }
}

/// Host local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        let now = Local::now();
        Instant {
            date: Date {
                year: now.year(),
                month: now.month() as u8,
                day: now.day() as u8,
            },
            time: Time {
                hour: now.hour() as u8,
                minute: now.minute() as u8,
            },
        }
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Instant);

impl Clock for FixedClock {
    fn now(&self) -> Instant {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
