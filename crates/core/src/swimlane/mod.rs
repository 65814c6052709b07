//! Horizontally scrolling rows of cards.
//!
//! Two controllers share the offset calculator: [`FixedSwimlane`] for
//! equal-width cards and [`VariableSwimlane`] for measured chips with an
//! optional "More" entry.

mod fixed;
mod variable;

pub use fixed::{FixedLaneConfig, FixedSwimlane};
pub use variable::{OffsetDriver, VariableLaneConfig, VariableSwimlane};

use tunelane_protocol::{Horizontal, StableId};

/// Who owns a lane's focused index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOwnership {
    /// The lane moves its own index and reports the change.
    Autonomous,
    /// The lane only requests moves; the parent decides (typically after
    /// persisting) and pushes the index back with `set_focused_index`.
    Delegated,
}

/// What a lane reports back to the screen that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaneEvent {
    /// An autonomous lane moved its focus.
    FocusChanged(usize),
    /// A delegated lane wants its focus moved to this index.
    FocusRequested(usize),
    Selected { index: usize, id: StableId },
    /// The overflow "More" entry was activated.
    MoreRequested,
}

/// One step left or right, clamped to `[0, count - 1]`.
pub(crate) fn step(current: usize, count: usize, direction: Horizontal) -> usize {
    if count == 0 {
        return 0;
    }
    let current = current.min(count - 1);
    match direction {
        Horizontal::Left => current.saturating_sub(1),
        Horizontal::Right => (current + 1).min(count - 1),
    }
}
