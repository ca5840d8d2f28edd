use crate::app::Section;
use crate::core::calendar::{Date, WeekStart, YearMonth};
use crate::core::instant::Instant;
use crate::picker::grid::{CalendarCell, CalendarGrid};
use crate::picker::state::QuickJump;
use crate::ui::span::{Span, SpanLine, centered};
use crate::ui::style::{Style, Theme};

/// Columns per day cell.
const CELL_WIDTH: usize = 4;
const GRID_WIDTH: usize = CELL_WIDTH * 7;
const INDENT: &str = "  ";

/// Everything needed to draw one frame of the picker.
pub struct PickerView<'a> {
    pub view_month: YearMonth,
    pub selected: Instant,
    pub grid: &'a CalendarGrid,
    pub week_start: WeekStart,
    pub quick_jumps: &'a [QuickJump],
    pub section: Section,
    pub cursor: Date,
    pub quick_index: usize,
    pub hour_text: &'a str,
    pub minute_text: &'a str,
    pub status: Option<&'a str>,
}

pub fn render(view: &PickerView<'_>, theme: &Theme) -> Vec<SpanLine> {
    let mut lines: Vec<SpanLine> = Vec::new();

    // ── Month title ───────────────────────────────────────────────────────────
    let month_focused = view.section == Section::Month;
    let arrow_style = if month_focused {
        theme.focused
    } else {
        theme.hint
    };
    let title = centered(&view.view_month.to_string(), GRID_WIDTH - 4);
    lines.push(vec![
        Span::new(INDENT),
        Span::styled("‹ ", arrow_style),
        Span::styled(title, theme.title),
        Span::styled(" ›", arrow_style),
    ]);
    lines.push(Vec::new());

    // ── Weekday header ────────────────────────────────────────────────────────
    let header: String = view
        .week_start
        .days()
        .iter()
        .map(|wd| format!(" {} ", wd.short_name()))
        .collect();
    lines.push(vec![Span::new(INDENT), Span::styled(header, theme.header)]);

    // ── Grid ──────────────────────────────────────────────────────────────────
    let grid_focused = view.section == Section::Grid;
    for row in view.grid.rows() {
        let mut line: SpanLine = vec![Span::new(INDENT)];
        for cell in row {
            let is_cursor = grid_focused && cell.date == view.cursor;
            let (l, r) = if is_cursor { ("[", "]") } else { (" ", " ") };
            line.push(Span::styled(
                format!("{l}{:2}{r}", cell.date.day),
                cell_style(cell, is_cursor, theme),
            ));
        }
        lines.push(line);
    }
    lines.push(Vec::new());

    // ── Quick jumps ───────────────────────────────────────────────────────────
    let mut quick: SpanLine = vec![Span::new(INDENT)];
    for (i, jump) in view.quick_jumps.iter().enumerate() {
        let active = view.section == Section::Quick && i == view.quick_index;
        let style = if active { theme.cursor } else { Style::default() };
        let (l, r) = if active { ("[", "]") } else { (" ", " ") };
        quick.push(Span::styled(format!("{l}{}{r}", jump.label()), style));
        quick.push(Span::new(" "));
    }
    lines.push(quick);
    lines.push(Vec::new());

    // ── Time ──────────────────────────────────────────────────────────────────
    let field = |section: Section, text: &str, value: u8| {
        if view.section == section {
            Span::styled(format!("{text:>2}"), theme.cursor)
        } else {
            Span::new(format!("{value:02}"))
        }
    };
    lines.push(vec![
        Span::new(INDENT),
        Span::styled(view.selected.date.to_iso(), theme.selected),
        Span::new("   "),
        field(Section::Hour, view.hour_text, view.selected.time.hour),
        Span::new(" : "),
        field(Section::Minute, view.minute_text, view.selected.time.minute),
    ]);
    lines.push(Vec::new());

    lines.push(vec![Span::styled(
        format!("{INDENT}{}", hint_for(view.section)),
        theme.hint,
    )]);
    if let Some(status) = view.status {
        lines.push(vec![Span::styled(format!("{INDENT}{status}"), theme.error)]);
    }

    lines
}

fn cell_style(cell: &CalendarCell, is_cursor: bool, theme: &Theme) -> Style {
    if is_cursor {
        theme.cursor
    } else if cell.is_selected {
        theme.selected
    } else if cell.is_past {
        theme.past
    } else if !cell.in_current_month {
        theme.outside_month
    } else {
        Style::default()
    }
}

fn hint_for(section: Section) -> &'static str {
    match section {
        Section::Month => "←/→ month · Tab next · Ctrl+S save · Esc cancel",
        Section::Grid => "arrows move · Home/End edges · Enter select · Tab next · Esc cancel",
        Section::Quick => "←/→ choose · Enter jump · Tab next · Esc cancel",
        Section::Hour | Section::Minute => "type digits · ↑/↓ adjust · Enter save · Esc cancel",
    }
}
