use crate::core::calendar::{self, Date, Time};
use crate::error::ParseError;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static INSTANT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{4})-(\d{1,2})-(\d{1,2})(?:[T ](\d{1,2}):(\d{1,2})(?::\d{1,2}(?:\.\d+)?)?)?\s*$")
        .expect("instant pattern compiles")
});

/// A point in time with calendar-day and minute resolution.
///
/// Values are immutable; every `with_*` produces a new instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    pub date: Date,
    pub time: Time,
}

impl Instant {
    pub fn new(date: Date, time: Time) -> Self {
        Self { date, time }
    }

    pub fn from_parts(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
    ) -> Result<Self, ParseError> {
        let date = Date::from_parts(year, month, day).map_err(ParseError::OutOfRange)?;
        let time = Time::from_parts(hour, minute).map_err(ParseError::OutOfRange)?;
        Ok(Self { date, time })
    }

    /// Truncates to the start of the calendar day.
    pub fn day(self) -> Date {
        self.date
    }

    pub fn start_of_day(self) -> Self {
        Self {
            date: self.date,
            time: Time::default(),
        }
    }

    pub fn same_day(self, other: Instant) -> bool {
        calendar::same_day(self.date, other.date)
    }

    pub fn with_date(self, date: Date) -> Self {
        Self { date, ..self }
    }

    pub fn with_time(self, time: Time) -> Self {
        Self { time, ..self }
    }

    pub fn with_hour(self, hour: u8) -> Self {
        Self {
            time: Time {
                hour: hour.min(23),
                ..self.time
            },
            ..self
        }
    }

    pub fn with_minute(self, minute: u8) -> Self {
        Self {
            time: Time {
                minute: minute.min(59),
                ..self.time
            },
            ..self
        }
    }

    pub fn add_days(self, delta: i64) -> Self {
        self.with_date(self.date.add_days(delta))
    }

    pub fn to_iso(self) -> String {
        format!("{}T{}", self.date.to_iso(), self.time.to_hhmm())
    }

    /// Formats with `YYYY`, `MMMM`, `MM`, `DD`, `ddd`, `HH` and `mm` tokens;
    /// everything else is copied through.
    pub fn format(self, pattern: &str) -> String {
        const TOKENS: [&str; 7] = ["YYYY", "MMMM", "MM", "DD", "ddd", "HH", "mm"];
        let mut out = String::with_capacity(pattern.len() + 8);
        let mut rest = pattern;
        'outer: while !rest.is_empty() {
            for token in TOKENS {
                if let Some(tail) = rest.strip_prefix(token) {
                    self.push_token(token, &mut out);
                    rest = tail;
                    continue 'outer;
                }
            }
            let mut chars = rest.chars();
            if let Some(ch) = chars.next() {
                out.push(ch);
            }
            rest = chars.as_str();
        }
        out
    }

    fn push_token(self, token: &str, out: &mut String) {
        match token {
            "YYYY" => out.push_str(&format!("{:04}", self.date.year)),
            "MMMM" => out.push_str(self.date.year_month().month_name()),
            "MM" => out.push_str(&format!("{:02}", self.date.month)),
            "DD" => out.push_str(&format!("{:02}", self.date.day)),
            "ddd" => out.push_str(self.date.weekday().abbrev()),
            "HH" => out.push_str(&format!("{:02}", self.time.hour)),
            "mm" => out.push_str(&format!("{:02}", self.time.minute)),
            _ => out.push_str(token),
        }
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.to_iso(), self.time.to_hhmm())
    }
}

impl FromStr for Instant {
    type Err = ParseError;

    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:mm` and `YYYY-MM-DDTHH:mm`, with
    /// optional seconds which are dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = INSTANT_RE
            .captures(s)
            .ok_or_else(|| ParseError::Syntax(s.to_string()))?;
        let field = |i: usize| caps.get(i).map(|m| m.as_str());
        let year = parse_num::<i32>(field(1), s)?;
        let month = parse_num::<u8>(field(2), s)?;
        let day = parse_num::<u8>(field(3), s)?;
        let (hour, minute) = match (field(4), field(5)) {
            (Some(h), Some(m)) => (parse_num::<u8>(Some(h), s)?, parse_num::<u8>(Some(m), s)?),
            _ => (0, 0),
        };
        Instant::from_parts(year, month, day, hour, minute)
    }
}

fn parse_num<T: FromStr>(text: Option<&str>, input: &str) -> Result<T, ParseError> {
    text.and_then(|t| t.parse().ok())
        .ok_or_else(|| ParseError::Syntax(input.to_string()))
}

impl Serialize for Instant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
