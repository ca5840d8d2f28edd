pub mod calendar;
pub mod clock;
pub mod instant;

pub use calendar::{Date, Time, WeekStart, Weekday, YearMonth};
pub use clock::{Clock, FixedClock, SystemClock};
pub use instant::Instant;
