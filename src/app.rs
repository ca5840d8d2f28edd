use crate::core::calendar::Date;
use crate::core::clock::Clock;
use crate::picker::session::{Outcome, PickerSession};
use crate::picker::state::{QuickJump, TimeField, Transition};
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::SpanLine;
use crate::ui::style::Theme;
use crate::ui::view::{self, PickerView};

// ── Focus sections ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Month,
    Grid,
    Quick,
    Hour,
    Minute,
}

impl Section {
    fn next(self) -> Self {
        match self {
            Self::Month => Self::Grid,
            Self::Grid => Self::Quick,
            Self::Quick => Self::Hour,
            Self::Hour => Self::Minute,
            Self::Minute => Self::Month,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Month => Self::Minute,
            Self::Grid => Self::Month,
            Self::Quick => Self::Grid,
            Self::Hour => Self::Quick,
            Self::Minute => Self::Hour,
        }
    }
}

// ── PickerApp ─────────────────────────────────────────────────────────────────

/// Keyboard host for one picker session.
///
/// Keys are translated into state-machine operations; the session is
/// consumed by the first save or cancel, after which keys are ignored.
pub struct PickerApp<K: Clock> {
    session: Option<PickerSession<K>>,
    outcome: Option<Outcome>,
    section: Section,
    cursor: Date,
    quick_index: usize,
    hour_text: String,
    minute_text: String,
    status: Option<String>,
    theme: Theme,
}

impl<K: Clock> PickerApp<K> {
    pub fn new(session: PickerSession<K>) -> Self {
        let selected = session.state().selected();
        Self {
            session: Some(session),
            outcome: None,
            section: Section::Grid,
            cursor: selected.date,
            quick_index: 0,
            hour_text: format!("{:02}", selected.time.hour),
            minute_text: format!("{:02}", selected.time.minute),
            status: None,
            theme: Theme::default(),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn cursor(&self) -> Date {
        self.cursor
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn session(&self) -> Option<&PickerSession<K>> {
        self.session.as_ref()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.session.is_none() {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return self.finish(PickerSession::cancel),
            KeyCode::Char('s') if ctrl => return self.finish(PickerSession::commit),
            KeyCode::Char('c') if ctrl => return self.finish(PickerSession::cancel),
            KeyCode::Tab => return self.focus(self.section.next()),
            KeyCode::BackTab => return self.focus(self.section.prev()),
            KeyCode::PageUp => return self.navigate(-1),
            KeyCode::PageDown => return self.navigate(1),
            _ => {}
        }

        match self.section {
            Section::Month => match key.code {
                KeyCode::Left => self.navigate(-1),
                KeyCode::Right => self.navigate(1),
                KeyCode::Enter => self.focus(Section::Grid),
                _ => {}
            },
            Section::Grid => match key.code {
                KeyCode::Left => self.move_cursor(-1),
                KeyCode::Right => self.move_cursor(1),
                KeyCode::Up => self.move_cursor(-7),
                KeyCode::Down => self.move_cursor(7),
                KeyCode::Home => self.cursor_to_edge(false),
                KeyCode::End => self.cursor_to_edge(true),
                KeyCode::Enter | KeyCode::Char(' ') => self.select_cursor(),
                _ => {}
            },
            Section::Quick => match key.code {
                KeyCode::Left => self.step_quick(-1),
                KeyCode::Right => self.step_quick(1),
                KeyCode::Enter => self.apply_quick(),
                _ => {}
            },
            Section::Hour => self.edit_time(TimeField::Hour, key),
            Section::Minute => self.edit_time(TimeField::Minute, key),
        }
    }

    pub fn render(&self) -> Vec<SpanLine> {
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        let state = session.state();
        let grid = session.grid();
        let picker = PickerView {
            view_month: state.view_month(),
            selected: state.selected(),
            grid: &grid,
            week_start: session.config().week_start,
            quick_jumps: &session.config().quick_jumps,
            section: self.section,
            cursor: self.cursor,
            quick_index: self.quick_index,
            hour_text: &self.hour_text,
            minute_text: &self.minute_text,
            status: self.status.as_deref(),
        };
        view::render(&picker, &self.theme)
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn finish(&mut self, end: fn(PickerSession<K>) -> Outcome) {
        if let Some(session) = self.session.take() {
            self.outcome = Some(end(session));
        }
    }

    fn focus(&mut self, section: Section) {
        self.section = section;
        self.sync_time_text();
    }

    fn navigate(&mut self, delta: i32) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let result = session.navigate_month(delta);
        self.report(result);
        self.cursor = self.cursor.add_months(delta);
    }

    fn move_cursor(&mut self, days: i64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let next = self.cursor.add_days(days);
        let view = session.state().view_month();
        if !view.contains(next) {
            let delta = if next > self.cursor { 1 } else { -1 };
            let result = session.navigate_month(delta);
            self.report(result);
        }
        self.cursor = next;
    }

    fn cursor_to_edge(&mut self, last: bool) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let view = session.state().view_month();
        self.cursor = if last { view.last_day() } else { view.first_day() };
    }

    fn select_cursor(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let result = session.select_day(self.cursor);
        self.report(result);
    }

    fn step_quick(&mut self, delta: isize) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let len = session.config().quick_jumps.len();
        if len == 0 {
            return;
        }
        self.quick_index = (self.quick_index as isize + delta).rem_euclid(len as isize) as usize;
    }

    fn apply_quick(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(jump) = session.config().quick_jumps.get(self.quick_index).copied() else {
            return;
        };
        let result = session.quick_jump(jump);
        self.cursor = session.state().selected().date;
        self.report(result);
        self.sync_time_text();
    }

    fn edit_time(&mut self, field: TimeField, key: KeyEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let time = session.state().selected().time;
        let current = match field {
            TimeField::Hour => time.hour,
            TimeField::Minute => time.minute,
        } as i64;

        let result = match key.code {
            KeyCode::Enter => return self.finish(PickerSession::commit),
            KeyCode::Up | KeyCode::Down => {
                let step = if key.code == KeyCode::Up { 1 } else { -1 };
                let result = match field {
                    TimeField::Hour => session.set_hour_value(current + step),
                    TimeField::Minute => session.set_minute_value(current + step),
                };
                self.report(result);
                return self.sync_time_text();
            }
            KeyCode::Char(ch) => {
                let text = self.time_text_mut(field);
                if text.chars().count() >= 2 {
                    text.clear();
                }
                text.push(ch);
                self.apply_time_text(field)
            }
            KeyCode::Backspace => {
                self.time_text_mut(field).pop();
                self.apply_time_text(field)
            }
            _ => return,
        };
        self.report(result);
    }

    fn apply_time_text(&mut self, field: TimeField) -> Transition {
        let Some(session) = self.session.as_mut() else {
            return Transition::Applied;
        };
        match field {
            TimeField::Hour => session.set_hour(&self.hour_text),
            TimeField::Minute => session.set_minute(&self.minute_text),
        }
    }

    fn time_text_mut(&mut self, field: TimeField) -> &mut String {
        match field {
            TimeField::Hour => &mut self.hour_text,
            TimeField::Minute => &mut self.minute_text,
        }
    }

    fn sync_time_text(&mut self) {
        if let Some(session) = self.session.as_ref() {
            let time = session.state().selected().time;
            self.hour_text = format!("{:02}", time.hour);
            self.minute_text = format!("{:02}", time.minute);
        }
    }

    fn report(&mut self, result: Transition) {
        self.status = result.rejection().map(ToString::to_string);
    }
}

/// Quick jump names as shown in the picker, for help output.
pub fn quick_jump_labels(jumps: &[QuickJump]) -> String {
    jumps
        .iter()
        .map(|j| j.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PickerConfig;
    use crate::core::calendar::YearMonth;
    use crate::core::clock::FixedClock;
    use crate::core::instant::Instant;

    fn at(text: &str) -> Instant {
        text.parse().expect("instant")
    }

    fn app(initial: &str, now: &str) -> PickerApp<FixedClock> {
        let session = PickerSession::open(
            Some(at(initial)),
            FixedClock(at(now)),
            PickerConfig::default(),
        );
        PickerApp::new(session)
    }

    fn press(app: &mut PickerApp<FixedClock>, codes: &[KeyCode]) {
        for code in codes {
            app.handle_key(KeyEvent::plain(*code));
        }
    }

    fn selected(app: &PickerApp<FixedClock>) -> Instant {
        app.session().expect("open").state().selected()
    }

    #[test]
    fn keyboard_walkthrough_commits_edited_instant() {
        let mut app = app("2024-03-15 09:30", "2024-03-15 08:00");
        press(&mut app, &[KeyCode::PageDown]);
        assert_eq!(
            app.session().expect("open").state().view_month(),
            YearMonth::new(2024, 4).expect("month")
        );
        assert_eq!(app.cursor(), at("2024-04-15").date);

        // Walk the cursor back to the 10th and select it.
        press(&mut app, &[KeyCode::Left; 5]);
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(selected(&app), at("2024-04-10 09:30"));

        press(&mut app, &[KeyCode::Tab, KeyCode::Tab]);
        assert_eq!(app.section(), Section::Hour);
        press(&mut app, &[KeyCode::Char('1'), KeyCode::Char('4')]);
        assert_eq!(selected(&app), at("2024-04-10 14:30"));

        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.outcome(), Some(Outcome::Committed(at("2024-04-10 14:30"))));
        assert!(app.session().is_none());

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.outcome(), Some(Outcome::Committed(at("2024-04-10 14:30"))));
    }

    #[test]
    fn past_day_shows_status_and_keeps_selection() {
        let mut app = app("2024-03-15 11:20", "2024-03-15 11:20");
        press(&mut app, &[KeyCode::Up, KeyCode::Enter]);
        assert_eq!(app.cursor(), at("2024-03-08").date);
        assert_eq!(selected(&app), at("2024-03-15 11:20"));
        assert_eq!(app.status(), Some("2024-03-08 is in the past"));

        press(&mut app, &[KeyCode::Down, KeyCode::Enter]);
        assert_eq!(app.status(), None);
    }

    #[test]
    fn cursor_crossing_month_edge_scrolls_view() {
        let mut app = app("2024-03-31 10:00", "2024-03-01 00:00");
        press(&mut app, &[KeyCode::Right]);
        assert_eq!(app.cursor(), at("2024-04-01").date);
        assert_eq!(
            app.session().expect("open").state().view_month(),
            YearMonth::new(2024, 4).expect("month")
        );
    }

    #[test]
    fn home_and_end_jump_to_month_edges() {
        let mut app = app("2024-02-14 10:00", "2024-02-01 00:00");
        press(&mut app, &[KeyCode::End]);
        assert_eq!(app.cursor(), at("2024-02-29").date);
        press(&mut app, &[KeyCode::Home]);
        assert_eq!(app.cursor(), at("2024-02-01").date);
        assert_eq!(
            app.session().expect("open").state().view_month(),
            YearMonth::new(2024, 2).expect("month")
        );

        press(&mut app, &[KeyCode::End, KeyCode::Enter]);
        assert_eq!(selected(&app), at("2024-02-29 10:00"));
    }

    #[test]
    fn quick_jump_row_moves_selection_and_cursor() {
        let mut app = app("2024-05-20 17:45", "2024-03-15 08:00");
        press(&mut app, &[KeyCode::Tab, KeyCode::Right, KeyCode::Right, KeyCode::Enter]);
        assert_eq!(selected(&app), at("2024-03-22 17:45"));
        assert_eq!(app.cursor(), at("2024-03-22").date);
    }

    #[test]
    fn time_fields_clamp_reject_and_adjust() {
        let mut app = app("2024-05-20 17:45", "2024-03-15 08:00");
        press(&mut app, &[KeyCode::Tab, KeyCode::Tab, KeyCode::Tab]);
        assert_eq!(app.section(), Section::Minute);

        press(&mut app, &[KeyCode::Char('9'), KeyCode::Char('9')]);
        assert_eq!(selected(&app).time.minute, 59);

        press(&mut app, &[KeyCode::Char('x')]);
        assert_eq!(selected(&app).time.minute, 59);
        assert!(app.status().is_some());

        press(&mut app, &[KeyCode::Backspace, KeyCode::Down]);
        assert_eq!(selected(&app).time.minute, 58);
        assert_eq!(app.status(), None);
    }

    #[test]
    fn escape_and_ctrl_s_end_the_session() {
        let mut cancelled = app("2024-05-20 17:45", "2024-03-15 08:00");
        press(&mut cancelled, &[KeyCode::Esc]);
        assert_eq!(cancelled.outcome(), Some(Outcome::Cancelled));
        assert!(cancelled.render().is_empty());

        let mut saved = app("2024-05-20 17:45", "2024-03-15 08:00");
        saved.handle_key(KeyEvent::ctrl('s'));
        assert_eq!(saved.outcome(), Some(Outcome::Committed(at("2024-05-20 17:45"))));
    }

    #[test]
    fn render_reflects_focus() {
        let app = app("2024-04-10 09:30", "2024-03-15 08:00");
        let text: Vec<String> = app
            .render()
            .iter()
            .map(|l| crate::ui::span::line_text(l))
            .collect();
        assert!(text.iter().any(|l| l.contains("[10]")));
    }

    #[test]
    fn labels_join_in_order() {
        assert_eq!(quick_jump_labels(&QuickJump::ALL), "Today, Tomorrow, Next Week");
    }
}
