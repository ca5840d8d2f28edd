pub mod grid;
pub mod session;
pub mod state;

pub use grid::{CalendarCell, CalendarGrid, build_grid, build_grid_with};
pub use session::{Bridge, Outcome, PickerSession};
pub use state::{PickerState, QuickJump, Rejection, TimeField, Transition};
