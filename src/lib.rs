pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod picker;
pub mod terminal;
pub mod ui;

pub use crate::config::PickerConfig;
pub use crate::core::{Clock, Date, FixedClock, Instant, SystemClock, Time, WeekStart, YearMonth};
pub use crate::error::{Error, Result};
pub use crate::picker::{
    Bridge, CalendarCell, CalendarGrid, Outcome, PickerSession, PickerState, QuickJump,
    Transition, build_grid,
};
