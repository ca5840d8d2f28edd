use crate::config::PickerConfig;
use crate::core::calendar::Date;
use crate::core::clock::Clock;
use crate::core::instant::Instant;
use crate::error::ParseError;
use crate::picker::grid::CalendarGrid;
use crate::picker::state::{PickerState, QuickJump, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Committed(Instant),
    Cancelled,
}

impl Outcome {
    pub fn instant(self) -> Option<Instant> {
        match self {
            Self::Committed(instant) => Some(instant),
            Self::Cancelled => None,
        }
    }
}

/// The host's two callbacks. Delivering an outcome consumes the bridge, so
/// exactly one callback runs, once.
pub struct Bridge<C, X>
where
    C: FnOnce(Instant),
    X: FnOnce(),
{
    on_commit: C,
    on_cancel: X,
}

impl<C, X> Bridge<C, X>
where
    C: FnOnce(Instant),
    X: FnOnce(),
{
    pub fn new(on_commit: C, on_cancel: X) -> Self {
        Self {
            on_commit,
            on_cancel,
        }
    }

    pub fn deliver(self, outcome: Outcome) {
        match outcome {
            Outcome::Committed(instant) => (self.on_commit)(instant),
            Outcome::Cancelled => (self.on_cancel)(),
        }
    }
}

/// One open picker. The state lives exactly as long as the session;
/// `commit` and `cancel` consume it.
pub struct PickerSession<K: Clock> {
    state: PickerState,
    clock: K,
    config: PickerConfig,
}

impl<K: Clock> PickerSession<K> {
    pub fn open(initial: Option<Instant>, clock: K, config: PickerConfig) -> Self {
        let state = PickerState::open(initial, clock.now());
        tracing::info!(selected = %state.selected(), "picker opened");
        Self {
            state,
            clock,
            config,
        }
    }

    /// Opens from host-supplied text, failing fast when it does not parse.
    pub fn open_str(
        initial: Option<&str>,
        clock: K,
        config: PickerConfig,
    ) -> Result<Self, ParseError> {
        let initial = initial.map(str::parse::<Instant>).transpose()?;
        Ok(Self::open(initial, clock, config))
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn today(&self) -> Date {
        self.clock.today()
    }

    pub fn grid(&self) -> CalendarGrid {
        self.state.grid(self.today(), self.config.week_start)
    }

    pub fn navigate_month(&mut self, delta: i32) -> Transition {
        self.state.navigate_month(delta)
    }

    pub fn select_day(&mut self, day: Date) -> Transition {
        let today = self.today();
        self.state.select_day(day, today)
    }

    pub fn set_hour(&mut self, input: &str) -> Transition {
        self.state.set_hour(input)
    }

    pub fn set_minute(&mut self, input: &str) -> Transition {
        self.state.set_minute(input)
    }

    pub fn set_hour_value(&mut self, hour: i64) -> Transition {
        self.state.set_hour_value(hour)
    }

    pub fn set_minute_value(&mut self, minute: i64) -> Transition {
        self.state.set_minute_value(minute)
    }

    pub fn quick_jump(&mut self, jump: QuickJump) -> Transition {
        let now = self.clock.now();
        self.state.quick_jump(jump, now)
    }

    pub fn commit(self) -> Outcome {
        let instant = self.state.selected();
        tracing::info!(%instant, "picker committed");
        Outcome::Committed(instant)
    }

    pub fn cancel(self) -> Outcome {
        tracing::info!("picker cancelled");
        Outcome::Cancelled
    }
}
