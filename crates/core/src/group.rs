//! Vertical focus groups of one screen.
//!
//! Groups are stacked top to bottom (header, filters, content, ...). A
//! floating group (the mini-player) may be appended as the highest index
//! while it is eligible; when it stops being eligible the count shrinks and
//! an active index that pointed at it is out of range until reclamped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tunelane_protocol::Vertical;

/// Where focus was inside a group the last time the user left it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupFocusMemory {
    pub focused_index: usize,
    pub offset_px: f64,
}

#[derive(Debug, Clone)]
pub struct GroupNavigator {
    base_count: usize,
    floating_eligible: bool,
    active: usize,
    memory: HashMap<usize, GroupFocusMemory>,
}

impl GroupNavigator {
    /// # Panics
    /// If `base_count` is zero. A screen with no groups is a wiring bug.
    pub fn new(base_count: usize) -> Self {
        assert!(base_count > 0, "a screen needs at least one focus group");
        Self {
            base_count,
            floating_eligible: false,
            active: 0,
            memory: HashMap::new(),
        }
    }

    pub fn base_count(&self) -> usize {
        self.base_count
    }

    pub fn group_count(&self) -> usize {
        self.base_count + usize::from(self.floating_eligible)
    }

    /// Index of the floating group while it exists.
    pub fn floating_group(&self) -> Option<usize> {
        self.floating_eligible.then_some(self.base_count)
    }

    pub fn is_floating_eligible(&self) -> bool {
        self.floating_eligible
    }

    /// Grow or shrink the group count. The active index is left alone; call
    /// [`clamp`](Self::clamp) when a stale index must not survive.
    pub fn set_floating_eligible(&mut self, eligible: bool) {
        if eligible != self.floating_eligible {
            tracing::debug!(eligible, "floating group eligibility changed");
            self.floating_eligible = eligible;
        }
    }

    /// Raw active index. May be out of range after the floating group went
    /// away.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Whether the active index points at an existing group.
    pub fn is_active_valid(&self) -> bool {
        self.active < self.group_count()
    }

    pub fn set_active(&mut self, index: usize) {
        self.active = index;
    }

    /// Pull a stale active index back into `[0, group_count - 1]`.
    pub fn clamp(&mut self) -> usize {
        let last = self.group_count() - 1;
        if self.active > last {
            tracing::debug!(from = self.active, to = last, "reclamped stale group index");
            self.active = last;
        }
        self.active
    }

    pub fn move_up(&mut self) -> usize {
        self.clamp();
        self.active = self.active.saturating_sub(1);
        self.active
    }

    pub fn move_down(&mut self) -> usize {
        self.clamp();
        self.active = (self.active + 1).min(self.group_count() - 1);
        self.active
    }

    pub fn move_vertical(&mut self, direction: Vertical) -> usize {
        match direction {
            Vertical::Up => self.move_up(),
            Vertical::Down => self.move_down(),
        }
    }

    pub fn set_group_focus_memory(&mut self, group: usize, memory: GroupFocusMemory) {
        self.memory.insert(group, memory);
    }

    /// Remembered focus of `group`, or the zero default.
    pub fn group_focus_memory(&self, group: usize) -> GroupFocusMemory {
        self.memory.get(&group).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_clamp_to_group_range() {
        let mut nav = GroupNavigator::new(3);
        assert_eq!(nav.move_up(), 0);
        assert_eq!(nav.move_down(), 1);
        assert_eq!(nav.move_down(), 2);
        assert_eq!(nav.move_down(), 2);
    }

    #[test]
    fn floating_group_is_highest_index() {
        let mut nav = GroupNavigator::new(3);
        assert_eq!(nav.floating_group(), None);
        nav.set_floating_eligible(true);
        assert_eq!(nav.group_count(), 4);
        assert_eq!(nav.floating_group(), Some(3));
        for _ in 0..5 {
            nav.move_down();
        }
        assert_eq!(nav.active(), 3);
    }

    #[test]
    fn shrinking_leaves_index_stale_until_next_move() {
        let mut nav = GroupNavigator::new(3);
        nav.set_floating_eligible(true);
        nav.set_active(3);
        nav.set_floating_eligible(false);
        assert!(!nav.is_active_valid());
        assert_eq!(nav.move_up(), 1);
    }

    #[test]
    fn stale_index_moving_down_lands_on_last() {
        let mut nav = GroupNavigator::new(2);
        nav.set_active(5);
        assert_eq!(nav.move_down(), 1);
    }

    #[test]
    fn memory_defaults_and_round_trips() {
        let mut nav = GroupNavigator::new(3);
        assert_eq!(nav.group_focus_memory(2), GroupFocusMemory::default());
        let m = GroupFocusMemory {
            focused_index: 7,
            offset_px: 1296.0,
        };
        nav.set_group_focus_memory(2, m);
        assert_eq!(nav.group_focus_memory(2), m);
        assert_eq!(nav.group_focus_memory(1), GroupFocusMemory::default());
    }

    #[test]
    #[should_panic(expected = "at least one focus group")]
    fn zero_groups_is_a_wiring_bug() {
        let _ = GroupNavigator::new(0);
    }
}
