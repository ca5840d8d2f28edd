use crate::core::calendar::{Date, WeekStart, YearMonth};
use crate::core::instant::Instant;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub date: Date,
    pub in_current_month: bool,
    pub is_past: bool,
    pub is_selected: bool,
}

/// The cells for one displayed month, in row-major order, always whole weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CalendarGrid {
    cells: Vec<CalendarCell>,
}

impl CalendarGrid {
    pub fn cells(&self) -> &[CalendarCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }

    pub fn row_count(&self) -> usize {
        self.cells.len() / 7
    }

    pub fn find(&self, date: Date) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|cell| cell.date == date)
            .map(|i| (i / 7, i % 7))
    }

    pub fn first_date(&self) -> Option<Date> {
        self.cells.first().map(|c| c.date)
    }

    pub fn last_date(&self) -> Option<Date> {
        self.cells.last().map(|c| c.date)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Builds the grid for `view` with weeks starting on Sunday.
pub fn build_grid(view: YearMonth, selected: Instant, today: Date) -> CalendarGrid {
    build_grid_with(view, selected, today, WeekStart::Sunday)
}

pub fn build_grid_with(
    view: YearMonth,
    selected: Instant,
    today: Date,
    week_start: WeekStart,
) -> CalendarGrid {
    let first = view.first_day();
    let last = view.last_day();
    let start = first.add_days(-(first.weekday().column(week_start) as i64));
    let end = last.add_days(6 - last.weekday().column(week_start) as i64);
    let count = start.days_until(end) + 1;

    let cells: Vec<CalendarCell> = (0..count)
        .map(|offset| {
            let date = start.add_days(offset);
            CalendarCell {
                date,
                in_current_month: view.contains(date),
                is_past: date < today,
                is_selected: date == selected.day(),
            }
        })
        .collect();

    tracing::trace!(view = %view, cells = cells.len(), "built calendar grid");
    CalendarGrid { cells }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u8) -> YearMonth {
        YearMonth::new(year, month).expect("month")
    }

    fn day(year: i32, month: u8, d: u8) -> Date {
        Date::from_parts(year, month, d).expect("date")
    }

    fn at(text: &str) -> Instant {
        text.parse().expect("instant")
    }

    #[test]
    fn every_month_is_whole_weeks_covering_the_month() {
        let selected = at("2024-03-15 09:30");
        let today = day(2024, 3, 15);
        for year in [1999, 2000, 2015, 2023, 2024, 2100] {
            for month in 1..=12 {
                for week_start in [WeekStart::Sunday, WeekStart::Monday] {
                    let view = ym(year, month);
                    let grid = build_grid_with(view, selected, today, week_start);
                    assert_eq!(grid.len() % 7, 0, "{view}");
                    assert!(grid.len() >= 28, "{view}");
                    assert!(grid.len() <= 42, "{view}");

                    let in_month = grid.cells().iter().filter(|c| c.in_current_month).count();
                    assert_eq!(in_month, view.len() as usize, "{view}");
                    for cell in grid.cells() {
                        assert_eq!(cell.in_current_month, view.contains(cell.date));
                    }
                    let first = grid.first_date().expect("first");
                    assert_eq!(first.weekday(), week_start.weekday());
                    for pair in grid.cells().windows(2) {
                        assert_eq!(pair[0].date.add_days(1), pair[1].date);
                    }
                }
            }
        }
    }

    #[test]
    fn april_2024_starts_with_trailing_march_days() {
        let grid = build_grid(ym(2024, 4), at("2024-03-15 09:30"), day(2024, 3, 15));
        let first_row: Vec<_> = grid.rows().next().expect("row").to_vec();
        assert_eq!(first_row[0].date, day(2024, 3, 31));
        assert!(!first_row[0].in_current_month);
        assert_eq!(first_row[1].date, day(2024, 4, 1));
        assert!(first_row[1].in_current_month);
        assert_eq!(grid.last_date(), Some(day(2024, 5, 4)));
        assert_eq!(grid.row_count(), 5);
    }

    #[test]
    fn month_aligned_to_week_needs_no_padding() {
        // February 2015 starts on a Sunday and has exactly 28 days.
        // Padding only extends to the surrounding week edges, so an aligned
        // month gets no extra leading or trailing row.
        let grid = build_grid(ym(2015, 2), at("2015-02-10 08:00"), day(2015, 2, 1));
        assert_eq!(grid.len(), 28);
        assert!(grid.cells().iter().all(|c| c.in_current_month));

        let monday = build_grid_with(
            ym(2015, 2),
            at("2015-02-10 08:00"),
            day(2015, 2, 1),
            WeekStart::Monday,
        );
        assert_eq!(monday.len(), 35);
    }

    #[test]
    fn past_and_selected_flags_follow_today_and_selection() {
        let grid = build_grid(ym(2024, 3), at("2024-03-20 18:45"), day(2024, 3, 15));
        for cell in grid.cells() {
            assert_eq!(cell.is_past, cell.date < day(2024, 3, 15));
            assert_eq!(cell.is_selected, cell.date == day(2024, 3, 20));
        }
        assert_eq!(grid.cells().iter().filter(|c| c.is_selected).count(), 1);
        let (row, col) = grid.find(day(2024, 3, 15)).expect("today is in view");
        assert!(!grid.cells()[row * 7 + col].is_past);
    }

    #[test]
    fn moving_today_only_flips_cells_between_the_two_days() {
        let view = ym(2024, 3);
        let selected = at("2024-03-20 18:45");
        let before = build_grid(view, selected, day(2024, 3, 10));
        let after = build_grid(view, selected, day(2024, 3, 14));
        for (a, b) in before.cells().iter().zip(after.cells()) {
            let crossed = a.date >= day(2024, 3, 10) && a.date < day(2024, 3, 14);
            assert_eq!(a.is_past != b.is_past, crossed, "{}", a.date);
            assert_eq!(a.date, b.date);
            assert_eq!(a.in_current_month, b.in_current_month);
        }
    }

    #[test]
    fn selection_outside_the_view_marks_nothing_in_month() {
        let grid = build_grid(ym(2024, 12), at("2024-11-20 10:00"), day(2024, 11, 1));
        assert!(grid.cells().iter().all(|c| !c.is_selected));
    }

    #[test]
    fn builds_are_deterministic_and_serialize_by_value() {
        let view = ym(2024, 2);
        let a = build_grid(view, at("2024-02-29 12:00"), day(2024, 2, 1));
        let b = build_grid(view, at("2024-02-29 12:00"), day(2024, 2, 1));
        assert_eq!(a, b);

        let json = a.to_json();
        let cells = json.as_array().expect("array");
        assert_eq!(cells.len(), a.len());
        assert_eq!(cells[0]["date"], "2024-01-28");
        assert_eq!(cells[0]["in_current_month"], false);
        assert_eq!(cells[0]["is_past"], true);
        let leap = cells
            .iter()
            .find(|c| c["date"] == "2024-02-29")
            .expect("leap day");
        assert_eq!(leap["is_selected"], true);
    }

    #[test]
    fn monday_week_start_shifts_leading_days() {
        let grid = build_grid_with(
            ym(2024, 4),
            at("2024-04-10 09:30"),
            day(2024, 3, 15),
            WeekStart::Monday,
        );
        assert_eq!(grid.first_date(), Some(day(2024, 4, 1)));
        assert_eq!(grid.last_date(), Some(day(2024, 5, 5)));
    }
}
