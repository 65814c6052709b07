use tunelane_protocol::NavSignal;

use super::{ScreenOutcome, dispatch};
use crate::button_row::{ButtonRow, RowEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiniAction {
    /// Open the full player overlay.
    Expand,
    PlayPause,
}

/// Controls of the floating mini-player group. Shared by every screen.
#[derive(Debug, Clone)]
pub struct MiniPlayer {
    row: ButtonRow<MiniAction>,
}

impl MiniPlayer {
    pub fn new() -> Self {
        Self {
            row: ButtonRow::new(vec![
                (MiniAction::Expand, "Open player".to_owned()),
                (MiniAction::PlayPause, "Play/Pause".to_owned()),
            ]),
        }
    }

    pub fn row(&self) -> &ButtonRow<MiniAction> {
        &self.row
    }

    pub fn focused_index(&self) -> usize {
        self.row.focused_index()
    }

    pub fn set_input_focus(&mut self, focused: bool) {
        self.row.set_input_focus(focused);
    }

    /// Horizontal moves and selection while the mini-player group is
    /// active. Anything else belongs to the screen.
    pub fn handle(&mut self, signal: NavSignal) -> ScreenOutcome {
        match dispatch(&mut self.row, signal) {
            Some(RowEvent::FocusChanged(_)) => ScreenOutcome::Handled,
            Some(RowEvent::Pressed(MiniAction::Expand)) => ScreenOutcome::OpenPlayer,
            Some(RowEvent::Pressed(MiniAction::PlayPause)) => ScreenOutcome::TogglePlayback,
            None => ScreenOutcome::Ignored,
        }
    }
}

impl Default for MiniPlayer {
    fn default() -> Self {
        Self::new()
    }
}
