use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
}

/// A displayed month. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u8,
}

// ── Weekdays ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Weekday(pub u8);

impl Weekday {
    pub const MON: Self = Self(0);
    pub const TUE: Self = Self(1);
    pub const WED: Self = Self(2);
    pub const THU: Self = Self(3);
    pub const FRI: Self = Self(4);
    pub const SAT: Self = Self(5);
    pub const SUN: Self = Self(6);

    pub fn short_name(self) -> &'static str {
        ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"][self.0 as usize % 7]
    }

    pub fn abbrev(self) -> &'static str {
        ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"][self.0 as usize % 7]
    }

    /// Column of this weekday in a grid whose weeks begin on `start`.
    pub fn column(self, start: WeekStart) -> u8 {
        (self.0 + 7 - start.weekday().0) % 7
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::SUN,
            Self::Monday => Weekday::MON,
        }
    }

    /// The seven weekdays in display order.
    pub fn days(self) -> [Weekday; 7] {
        let first = self.weekday().0;
        std::array::from_fn(|i| Weekday((first + i as u8) % 7))
    }
}

// ── Month arithmetic ──────────────────────────────────────────────────────────

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Supported years. Grids at either end spill one week into years 0 and 10000,
/// which the day-number arithmetic still handles.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

pub fn weekday_of(date: Date) -> Weekday {
    // 1970-01-01 was a Thursday.
    Weekday((date.day_number() + 3).rem_euclid(7) as u8)
}

/// True when both dates name the same calendar day.
pub fn same_day(a: Date, b: Date) -> bool {
    a == b
}

pub fn validate_date(year: i32, month: u8, day: u8) -> Result<Date, String> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(format!("Invalid year: {year} (supported {MIN_YEAR}..={MAX_YEAR})"));
    }
    if !(1..=12).contains(&month) {
        return Err(format!("Invalid month: {month}"));
    }
    let max_day = days_in_month(year, month);
    if day < 1 || day > max_day {
        return Err(format!(
            "Invalid day {day} for {month}/{year} (max {max_day})"
        ));
    }
    Ok(Date { year, month, day })
}

pub fn validate_time(hour: u8, minute: u8) -> Result<Time, String> {
    if hour > 23 {
        return Err(format!("Invalid hour: {hour}"));
    }
    if minute > 59 {
        return Err(format!("Invalid minute: {minute}"));
    }
    Ok(Time { hour, minute })
}

impl Date {
    pub fn from_parts(year: i32, month: u8, day: u8) -> Result<Self, String> {
        validate_date(year, month, day)
    }

    /// Days since 1970-01-01 (negative before the epoch).
    pub fn day_number(self) -> i64 {
        let y = if self.month <= 2 {
            self.year as i64 - 1
        } else {
            self.year as i64
        };
        let era = y.div_euclid(400);
        let yoe = y.rem_euclid(400);
        let m = self.month as i64;
        let mp = if m > 2 { m - 3 } else { m + 9 };
        let doy = (153 * mp + 2) / 5 + self.day as i64 - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * 146097 + doe - 719468
    }

    pub fn from_day_number(days: i64) -> Self {
        let z = days + 719468;
        let era = z.div_euclid(146097);
        let doe = z.rem_euclid(146097);
        let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let d = doy - (153 * mp + 2) / 5 + 1;
        let m = if mp < 10 { mp + 3 } else { mp - 9 };
        let y = yoe + era * 400 + if m <= 2 { 1 } else { 0 };
        Date {
            year: y as i32,
            month: m as u8,
            day: d as u8,
        }
    }

    pub fn add_days(self, delta: i64) -> Self {
        Self::from_day_number(self.day_number() + delta)
    }

    /// Shifts by whole months, clamping the day to the target month's length.
    pub fn add_months(self, delta: i32) -> Self {
        let ym = self.year_month().add_months(delta);
        let day = self.day.min(days_in_month(ym.year, ym.month));
        Date {
            year: ym.year,
            month: ym.month,
            day,
        }
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(self, other: Date) -> i64 {
        other.day_number() - self.day_number()
    }

    pub fn weekday(self) -> Weekday {
        weekday_of(self)
    }

    pub fn year_month(self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }

    pub fn to_iso(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}

impl Serialize for Date {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso())
    }
}

impl Time {
    pub fn from_parts(hour: u8, minute: u8) -> Result<Self, String> {
        validate_time(hour, minute)
    }

    pub fn to_hhmm(self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

impl YearMonth {
    pub fn new(year: i32, month: u8) -> Result<Self, String> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(format!("Invalid year: {year} (supported {MIN_YEAR}..={MAX_YEAR})"));
        }
        if !(1..=12).contains(&month) {
            return Err(format!("Invalid month: {month}"));
        }
        Ok(Self { year, month })
    }

    /// Shifts by whole months, saturating at January of `MIN_YEAR` and
    /// December of `MAX_YEAR`.
    pub fn add_months(self, delta: i32) -> Self {
        let lo = MIN_YEAR as i64 * 12;
        let hi = MAX_YEAR as i64 * 12 + 11;
        let index = self.year as i64 * 12 + (self.month as i64 - 1);
        let total = (index + delta as i64).clamp(lo, hi);
        YearMonth {
            year: total.div_euclid(12) as i32,
            month: (total.rem_euclid(12) + 1) as u8,
        }
    }

    pub fn first_day(self) -> Date {
        Date {
            year: self.year,
            month: self.month,
            day: 1,
        }
    }

    pub fn last_day(self) -> Date {
        Date {
            year: self.year,
            month: self.month,
            day: days_in_month(self.year, self.month),
        }
    }

    pub fn len(self) -> u8 {
        days_in_month(self.year, self.month)
    }

    pub fn contains(self, date: Date) -> bool {
        date.year == self.year && date.month == self.month
    }

    pub fn month_name(self) -> &'static str {
        MONTH_NAMES[(self.month as usize).saturating_sub(1) % 12]
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u8, day: u8) -> Date {
        Date::from_parts(year, month, day).expect("valid date")
    }

    #[test]
    fn month_lengths_follow_gregorian_rules() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn day_number_is_anchored_at_epoch() {
        assert_eq!(d(1970, 1, 1).day_number(), 0);
        assert_eq!(d(1969, 12, 31).day_number(), -1);
        assert_eq!(d(2000, 3, 1).day_number(), 11017);
        assert_eq!(Date::from_day_number(11017), d(2000, 3, 1));
    }

    #[test]
    fn day_number_is_contiguous_across_four_centuries() {
        let mut date = d(1899, 12, 25);
        let mut n = date.day_number();
        while date.year < 2301 {
            let next = date.add_days(1);
            assert_eq!(next.day_number(), n + 1);
            assert!(next > date);
            date = next;
            n += 1;
        }
    }

    #[test]
    fn weekday_of_known_dates() {
        assert_eq!(weekday_of(d(1970, 1, 1)), Weekday::THU);
        assert_eq!(weekday_of(d(2024, 3, 15)), Weekday::FRI);
        assert_eq!(weekday_of(d(2024, 3, 31)), Weekday::SUN);
        assert_eq!(weekday_of(d(2015, 2, 1)), Weekday::SUN);
        assert_eq!(weekday_of(d(1900, 1, 1)), Weekday::MON);
    }

    #[test]
    fn add_days_crosses_month_and_year_boundaries() {
        assert_eq!(d(2024, 2, 28).add_days(1), d(2024, 2, 29));
        assert_eq!(d(2023, 2, 28).add_days(1), d(2023, 3, 1));
        assert_eq!(d(2024, 12, 31).add_days(1), d(2025, 1, 1));
        assert_eq!(d(2024, 3, 1).add_days(-1), d(2024, 2, 29));
        assert_eq!(d(2024, 3, 15).add_days(7), d(2024, 3, 22));
        assert_eq!(d(2024, 3, 15).add_days(-365), d(2023, 3, 16));
    }

    #[test]
    fn add_months_clamps_day_and_wraps_year() {
        assert_eq!(d(2024, 1, 31).add_months(1), d(2024, 2, 29));
        assert_eq!(d(2023, 1, 31).add_months(1), d(2023, 2, 28));
        assert_eq!(d(2024, 12, 15).add_months(1), d(2025, 1, 15));
        assert_eq!(d(2024, 1, 15).add_months(-1), d(2023, 12, 15));
        assert_eq!(d(2024, 3, 31).add_months(-25), d(2022, 2, 28));
    }

    #[test]
    fn year_month_navigation_and_bounds() {
        let march = YearMonth::new(2024, 3).expect("month");
        assert_eq!(march.add_months(1), YearMonth::new(2024, 4).expect("month"));
        assert_eq!(march.add_months(-3), YearMonth::new(2023, 12).expect("month"));
        assert_eq!(march.first_day(), d(2024, 3, 1));
        assert_eq!(march.last_day(), d(2024, 3, 31));
        assert!(march.contains(d(2024, 3, 9)));
        assert!(!march.contains(d(2023, 3, 9)));
        assert_eq!(march.to_string(), "March 2024");
        assert!(YearMonth::new(2024, 13).is_err());
    }

    #[test]
    fn years_outside_the_supported_range_are_rejected() {
        assert!(Date::from_parts(0, 12, 31).is_err());
        assert!(Date::from_parts(10000, 1, 1).is_err());
        assert!(Date::from_parts(i32::MAX, 12, 15).is_err());
        assert!(YearMonth::new(i32::MAX, 12).is_err());
        assert!(Date::from_parts(MAX_YEAR, 12, 31).is_ok());
    }

    #[test]
    fn month_navigation_saturates_at_the_supported_range() {
        let last = YearMonth::new(MAX_YEAR, 12).expect("month");
        assert_eq!(last.add_months(1), last);
        assert_eq!(last.add_months(i32::MAX), last);
        let first = YearMonth::new(MIN_YEAR, 1).expect("month");
        assert_eq!(first.add_months(-1), first);
        assert_eq!(first.add_months(i32::MIN), first);
        assert_eq!(
            last.add_months(-12 * 9998 - 11),
            YearMonth::new(MIN_YEAR, 1).expect("month")
        );
        assert_eq!(d(MAX_YEAR, 12, 31).add_months(3), d(MAX_YEAR, 12, 31));
    }

    #[test]
    fn days_until_is_signed() {
        assert_eq!(d(2024, 3, 15).days_until(d(2024, 4, 10)), 26);
        assert_eq!(d(2024, 4, 10).days_until(d(2024, 3, 15)), -26);
    }

    #[test]
    fn validation_rejects_out_of_range_parts() {
        assert!(Date::from_parts(2023, 2, 29).is_err());
        assert!(Date::from_parts(2024, 0, 1).is_err());
        assert!(Time::from_parts(24, 0).is_err());
        assert!(Time::from_parts(23, 60).is_err());
        assert_eq!(Time::from_parts(9, 5).expect("time").to_hhmm(), "09:05");
    }

    #[test]
    fn week_start_rotates_columns() {
        assert_eq!(Weekday::SUN.column(WeekStart::Sunday), 0);
        assert_eq!(Weekday::SAT.column(WeekStart::Sunday), 6);
        assert_eq!(Weekday::MON.column(WeekStart::Monday), 0);
        assert_eq!(Weekday::SUN.column(WeekStart::Monday), 6);
        let names: Vec<_> = WeekStart::Sunday
            .days()
            .iter()
            .map(|w| w.short_name())
            .collect();
        assert_eq!(names, ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]);
    }
}
