use crate::core::calendar::{Date, WeekStart, YearMonth};
use crate::core::instant::Instant;
use crate::picker::grid::{self, CalendarGrid};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Quick jumps ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuickJump {
    Today,
    Tomorrow,
    NextWeek,
}

impl QuickJump {
    pub const ALL: [QuickJump; 3] = [Self::Today, Self::Tomorrow, Self::NextWeek];

    pub fn offset_days(self) -> i64 {
        match self {
            Self::Today => 0,
            Self::Tomorrow => 1,
            Self::NextWeek => 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Tomorrow => "Tomorrow",
            Self::NextWeek => "Next Week",
        }
    }
}

impl FromStr for QuickJump {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "today" => Ok(Self::Today),
            "tomorrow" => Ok(Self::Tomorrow),
            "nextweek" => Ok(Self::NextWeek),
            _ => Err(format!("Unknown quick jump: {s}")),
        }
    }
}

// ── Transition outcomes ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Hour,
    Minute,
}

impl TimeField {
    pub fn max(self) -> u8 {
        match self {
            Self::Hour => 23,
            Self::Minute => 59,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Minute => "minute",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    PastDay { day: Date, today: Date },
    NotNumeric { field: TimeField, input: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PastDay { day, .. } => write!(f, "{day} is in the past"),
            Self::NotNumeric { field, input } => {
                write!(f, "{:?} is not a valid {}", input, field.name())
            }
        }
    }
}

/// Result of a state-machine operation. Rejected operations leave the state
/// untouched.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Rejected(Rejection),
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Applied => None,
            Self::Rejected(r) => Some(r),
        }
    }
}

// ── PickerState ───────────────────────────────────────────────────────────────

/// The displayed month and the selected instant of one open picker.
///
/// `view_month` moves freely; `selected` can never be moved onto a day
/// before `today`, though its time of day may be edited to anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerState {
    view_month: YearMonth,
    selected: Instant,
}

impl PickerState {
    /// Seeds both slices from `initial`, or from `now` when absent.
    pub fn open(initial: Option<Instant>, now: Instant) -> Self {
        let selected = initial.unwrap_or(now);
        Self {
            view_month: selected.date.year_month(),
            selected,
        }
    }

    pub fn view_month(&self) -> YearMonth {
        self.view_month
    }

    pub fn selected(&self) -> Instant {
        self.selected
    }

    pub fn navigate_month(&mut self, delta: i32) -> Transition {
        self.view_month = self.view_month.add_months(delta);
        tracing::debug!(view = %self.view_month, delta, "navigated month");
        Transition::Applied
    }

    /// Selects `day`, keeping the current time of day.
    pub fn select_day(&mut self, day: Date, today: Date) -> Transition {
        if day < today {
            tracing::debug!(%day, %today, "rejected past day");
            return Transition::Rejected(Rejection::PastDay { day, today });
        }
        self.selected = self.selected.with_date(day);
        tracing::debug!(selected = %self.selected, "selected day");
        Transition::Applied
    }

    /// Parses a typed hour; out-of-range values are clamped into 0..=23.
    pub fn set_hour(&mut self, input: &str) -> Transition {
        self.set_time_text(TimeField::Hour, input)
    }

    /// Parses a typed minute; out-of-range values are clamped into 0..=59.
    pub fn set_minute(&mut self, input: &str) -> Transition {
        self.set_time_text(TimeField::Minute, input)
    }

    pub fn set_hour_value(&mut self, hour: i64) -> Transition {
        self.set_time_value(TimeField::Hour, hour)
    }

    pub fn set_minute_value(&mut self, minute: i64) -> Transition {
        self.set_time_value(TimeField::Minute, minute)
    }

    /// Jumps to today, tomorrow or next week relative to `now`, keeping the
    /// selected time of day and scrolling the view to the new date.
    pub fn quick_jump(&mut self, jump: QuickJump, now: Instant) -> Transition {
        let date = now.date.add_days(jump.offset_days());
        self.selected = self.selected.with_date(date);
        self.view_month = date.year_month();
        tracing::debug!(jump = jump.label(), selected = %self.selected, "quick jump");
        Transition::Applied
    }

    pub fn grid(&self, today: Date, week_start: WeekStart) -> CalendarGrid {
        grid::build_grid_with(self.view_month, self.selected, today, week_start)
    }

    fn set_time_text(&mut self, field: TimeField, input: &str) -> Transition {
        match parse_time_input(input) {
            Some(value) => self.set_time_value(field, value),
            None => {
                tracing::debug!(field = field.name(), input, "rejected non-numeric time input");
                Transition::Rejected(Rejection::NotNumeric {
                    field,
                    input: input.to_string(),
                })
            }
        }
    }

    fn set_time_value(&mut self, field: TimeField, value: i64) -> Transition {
        let clamped = value.clamp(0, field.max() as i64) as u8;
        self.selected = match field {
            TimeField::Hour => self.selected.with_hour(clamped),
            TimeField::Minute => self.selected.with_minute(clamped),
        };
        tracing::debug!(field = field.name(), value, clamped, "set time field");
        Transition::Applied
    }
}

/// Whole integers only, surrounding whitespace allowed. Integers too large
/// for `i64` saturate so they still clamp.
fn parse_time_input(input: &str) -> Option<i64> {
    let text = input.trim();
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match text.parse::<i64>() {
        Ok(v) => Some(v),
        Err(_) if text.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}
