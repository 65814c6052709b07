//! Short fixed rows of buttons (header, mini-player, channel actions).
//!
//! Rows never scroll; focus is a clamped index and selecting emits the
//! action under it.

use tunelane_protocol::Horizontal;

use crate::focus::FocusNode;
use crate::swimlane::step;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEvent<A> {
    FocusChanged(usize),
    Pressed(A),
}

#[derive(Debug, Clone)]
pub struct ButtonRow<A> {
    actions: Vec<(A, String)>,
    focused_index: usize,
    has_input: bool,
}

impl<A: Copy> ButtonRow<A> {
    pub fn new(actions: Vec<(A, String)>) -> Self {
        Self {
            actions,
            focused_index: 0,
            has_input: false,
        }
    }

    pub fn actions(&self) -> impl Iterator<Item = (A, &str)> {
        self.actions.iter().map(|(a, label)| (*a, label.as_str()))
    }

    pub fn focused_index(&self) -> usize {
        self.focused_index
    }

    pub fn focused_action(&self) -> Option<A> {
        self.actions.get(self.focused_index).map(|(a, _)| *a)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn has_input_focus(&self) -> bool {
        self.has_input
    }

    pub fn move_focus(&mut self, direction: Horizontal) -> Option<RowEvent<A>> {
        let next = step(self.focused_index, self.actions.len(), direction);
        if next == self.focused_index {
            return None;
        }
        self.focused_index = next;
        Some(RowEvent::FocusChanged(next))
    }

    pub fn set_focused_index(&mut self, index: usize) {
        self.focused_index = index.min(self.actions.len().saturating_sub(1));
    }

    pub fn press(&self) -> Option<RowEvent<A>> {
        self.focused_action().map(RowEvent::Pressed)
    }

    pub fn set_input_focus(&mut self, focused: bool) {
        self.has_input = focused;
    }
}

impl<A: Copy> FocusNode for ButtonRow<A> {
    type Event = RowEvent<A>;

    fn on_directional(&mut self, direction: Horizontal) -> Option<RowEvent<A>> {
        self.move_focus(direction)
    }

    fn on_activate(&mut self) -> Option<RowEvent<A>> {
        self.press()
    }

    fn on_input_focus(&mut self, focused: bool) {
        self.set_input_focus(focused);
    }

    fn focused_index(&self) -> usize {
        self.focused_index
    }

    fn len(&self) -> usize {
        self.actions.len()
    }
}
