//! Platform focus and the focusable-component interface.

use serde::{Deserialize, Serialize};
use tunelane_protocol::Horizontal;

use crate::overlay::OverlayGroup;

/// Opaque reference to "the element that has platform focus".
///
/// Captured by the player overlay when it opens and handed back to the
/// [`FocusHost`] when it closes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FocusTarget {
    /// The item at `index` inside group `group` of screen `screen`.
    Element {
        screen: String,
        group: usize,
        index: usize,
    },
    /// A group container with nothing focusable in it.
    Container { screen: String, group: usize },
    OverlayControl { group: OverlayGroup, index: usize },
}

/// The platform's notion of focus: whichever element keyboard events land
/// on.
pub trait FocusHost {
    fn focused(&self) -> Option<FocusTarget>;
    fn focus(&mut self, target: FocusTarget);
}

/// In-memory host that remembers the last focused target.
#[derive(Debug, Default, Clone)]
pub struct RecordingFocusHost {
    current: Option<FocusTarget>,
    moves: usize,
}

impl RecordingFocusHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times focus actually moved.
    pub fn moves(&self) -> usize {
        self.moves
    }
}

impl FocusHost for RecordingFocusHost {
    fn focused(&self) -> Option<FocusTarget> {
        self.current.clone()
    }

    fn focus(&mut self, target: FocusTarget) {
        if self.current.as_ref() != Some(&target) {
            tracing::trace!(?target, "platform focus moved");
            self.current = Some(target);
            self.moves += 1;
        }
    }
}

/// A component that owns horizontal navigation within one focus group.
///
/// Screens hold concrete components and forward signals to whichever one
/// backs the active group; the component reports what happened as an event
/// instead of invoking callbacks. Platform focus follows input ownership:
/// the session points the [`FocusHost`] at the owning component's
/// [`FocusTarget`] after every change.
pub trait FocusNode {
    type Event;

    fn on_directional(&mut self, direction: Horizontal) -> Option<Self::Event>;

    fn on_activate(&mut self) -> Option<Self::Event>;

    fn on_input_focus(&mut self, focused: bool);

    fn focused_index(&self) -> usize;

    /// Number of navigable entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
