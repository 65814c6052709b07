use std::time::Duration;

use tunelane_protocol::{FocusableItem, Horizontal, LayoutItem, Viewport};

use super::{IndexOwnership, LaneEvent, step};
use crate::animation::Tween;
use crate::config::DesignTokens;
use crate::focus::FocusNode;
use crate::offset;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLaneConfig {
    pub card_width: f64,
    pub gap: f64,
    pub viewport: Viewport,
    pub scroll_duration: Duration,
}

impl FixedLaneConfig {
    pub fn from_tokens(tokens: &DesignTokens) -> Self {
        Self {
            card_width: tokens.card_width,
            gap: tokens.fixed_gap,
            viewport: tokens.lane_viewport(),
            scroll_duration: tokens.scroll_duration(),
        }
    }
}

impl Default for FixedLaneConfig {
    fn default() -> Self {
        Self::from_tokens(&DesignTokens::default())
    }
}

/// A lane of equal-width cards.
#[derive(Debug, Clone)]
pub struct FixedSwimlane {
    items: Vec<FocusableItem>,
    ownership: IndexOwnership,
    focused_index: usize,
    has_input: bool,
    config: FixedLaneConfig,
    offset: Tween,
}

impl FixedSwimlane {
    pub fn new(
        items: Vec<FocusableItem>,
        ownership: IndexOwnership,
        config: FixedLaneConfig,
    ) -> Self {
        Self {
            items,
            ownership,
            focused_index: 0,
            has_input: false,
            config,
            offset: Tween::settled(0.0),
        }
    }

    pub fn items(&self) -> &[FocusableItem] {
        &self.items
    }

    pub fn ownership(&self) -> IndexOwnership {
        self.ownership
    }

    pub fn focused_index(&self) -> usize {
        self.focused_index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn focused_item(&self) -> Option<&FocusableItem> {
        self.items.get(self.focused_index)
    }

    pub fn has_input_focus(&self) -> bool {
        self.has_input
    }

    pub fn config(&self) -> &FixedLaneConfig {
        &self.config
    }

    /// Offset currently drawn (mid-animation values included).
    pub fn offset(&self) -> f64 {
        self.offset.value()
    }

    /// Offset the lane is settling on.
    pub fn target_offset(&self) -> f64 {
        self.offset.target()
    }

    pub fn layout(&self) -> Vec<LayoutItem> {
        offset::fixed_layout(self.items.len(), self.config.card_width, self.config.gap)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn offset_for(&self, index: usize) -> f64 {
        offset::fixed_offset(
            index,
            self.items.len(),
            self.config.card_width,
            self.config.gap,
            &self.config.viewport,
        )
    }

    fn scroll_to_focus(&mut self) {
        let target = self.offset_for(self.focused_index);
        self.offset.retarget(target, self.config.scroll_duration);
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.items.len().saturating_sub(1))
    }

    /// Move one card left or right. Moves past either end are absorbed.
    pub fn move_focus(&mut self, direction: Horizontal) -> Option<LaneEvent> {
        if self.items.is_empty() {
            return None;
        }
        let next = step(self.focused_index, self.items.len(), direction);
        if next == self.focused_index {
            return None;
        }
        match self.ownership {
            IndexOwnership::Autonomous => {
                self.focused_index = next;
                self.scroll_to_focus();
                Some(LaneEvent::FocusChanged(next))
            }
            IndexOwnership::Delegated => Some(LaneEvent::FocusRequested(next)),
        }
    }

    /// Push a focus index from outside (the parent of a delegated lane, or a
    /// screen jumping programmatically). Animates towards it.
    pub fn set_focused_index(&mut self, index: usize) {
        let index = self.clamp(index);
        if index != self.focused_index {
            self.focused_index = index;
            self.scroll_to_focus();
        }
    }

    /// Restore a remembered position without animating. A remembered offset
    /// is reused only if it still shows the focused card in full.
    pub fn restore(&mut self, index: usize, remembered_offset: Option<f64>) {
        self.focused_index = self.clamp(index);
        let layout = self.layout();
        let max = offset::max_offset(&layout, &self.config.viewport);
        let offset = remembered_offset
            .filter(|o| (0.0..=max).contains(o))
            .filter(|o| {
                offset::is_fully_visible(self.focused_index, &layout, &self.config.viewport, *o)
            })
            .unwrap_or_else(|| self.offset_for(self.focused_index));
        self.offset.jump(offset);
    }

    pub fn activate(&self) -> Option<LaneEvent> {
        self.items.get(self.focused_index).map(|item| LaneEvent::Selected {
            index: self.focused_index,
            id: item.id.clone(),
        })
    }

    pub fn set_input_focus(&mut self, focused: bool) {
        self.has_input = focused;
    }

    /// Swap in a new list. A list with different identities starts over at
    /// the first card; a delegated lane asks its parent to do so.
    pub fn replace_items(&mut self, items: Vec<FocusableItem>) -> Option<LaneEvent> {
        let same = self.items.len() == items.len()
            && self.items.iter().zip(&items).all(|(a, b)| a.id == b.id);
        self.items = items;
        if same {
            return None;
        }
        match self.ownership {
            IndexOwnership::Autonomous => {
                self.focused_index = 0;
                self.offset.jump(0.0);
                Some(LaneEvent::FocusChanged(0))
            }
            IndexOwnership::Delegated => {
                self.focused_index = self.clamp(self.focused_index);
                self.offset.jump(self.offset_for(self.focused_index));
                Some(LaneEvent::FocusRequested(0))
            }
        }
    }

    /// New container measurement. Layout changes snap rather than animate.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport != self.config.viewport {
            self.config.viewport = viewport;
            self.offset.jump(self.offset_for(self.focused_index));
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        self.offset.tick(dt);
    }
}

impl FocusNode for FixedSwimlane {
    type Event = LaneEvent;

    fn on_directional(&mut self, direction: Horizontal) -> Option<LaneEvent> {
        self.move_focus(direction)
    }

    fn on_activate(&mut self) -> Option<LaneEvent> {
        self.activate()
    }

    fn on_input_focus(&mut self, focused: bool) {
        self.set_input_focus(focused);
    }

    fn focused_index(&self) -> usize {
        self.focused_index
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(n: usize) -> Vec<FocusableItem> {
        (0..n)
            .map(|i| FocusableItem::new(format!("card-{i}"), format!("Card {i}")))
            .collect()
    }

    fn config() -> FixedLaneConfig {
        FixedLaneConfig {
            viewport: Viewport::padded(1920.0, 100.0),
            scroll_duration: Duration::ZERO,
            ..FixedLaneConfig::default()
        }
    }

    fn lane(n: usize) -> FixedSwimlane {
        FixedSwimlane::new(cards(n), IndexOwnership::Autonomous, config())
    }

    #[test]
    fn left_at_start_is_absorbed() {
        let mut lane = lane(5);
        assert_eq!(lane.move_focus(Horizontal::Left), None);
        assert_eq!(lane.focused_index(), 0);
    }

    #[test]
    fn right_past_end_is_absorbed() {
        let mut lane = lane(3);
        for _ in 0..10 {
            lane.move_focus(Horizontal::Right);
        }
        assert_eq!(lane.focused_index(), 2);
        assert_eq!(lane.move_focus(Horizontal::Right), None);
    }

    #[test]
    fn autonomous_move_scrolls_and_reports() {
        let mut lane = lane(15);
        for _ in 0..14 {
            lane.move_focus(Horizontal::Right);
        }
        assert_eq!(lane.focused_index(), 14);
        assert_eq!(lane.offset(), 3140.0);
        assert_eq!(
            lane.move_focus(Horizontal::Left),
            Some(LaneEvent::FocusChanged(13))
        );
    }

    #[test]
    fn delegated_move_only_requests() {
        let mut lane = FixedSwimlane::new(cards(5), IndexOwnership::Delegated, config());
        assert_eq!(
            lane.move_focus(Horizontal::Right),
            Some(LaneEvent::FocusRequested(1))
        );
        assert_eq!(lane.focused_index(), 0);
        lane.set_focused_index(1);
        assert_eq!(lane.focused_index(), 1);
    }

    #[test]
    fn activate_reports_item_and_index() {
        let mut lane = lane(3);
        lane.move_focus(Horizontal::Right);
        assert_eq!(
            lane.activate(),
            Some(LaneEvent::Selected {
                index: 1,
                id: "card-1".into()
            })
        );
    }

    #[test]
    fn activate_on_empty_is_noop() {
        let mut lane = lane(0);
        assert_eq!(lane.activate(), None);
        assert_eq!(lane.move_focus(Horizontal::Right), None);
    }

    #[test]
    fn focus_node_drives_the_lane() {
        let mut lane = lane(3);
        FocusNode::on_input_focus(&mut lane, true);
        assert!(lane.has_input_focus());
        assert_eq!(
            lane.on_directional(Horizontal::Right),
            Some(LaneEvent::FocusChanged(1))
        );
        assert_eq!(
            lane.on_activate(),
            Some(LaneEvent::Selected {
                index: 1,
                id: "card-1".into()
            })
        );
        assert_eq!(FocusNode::len(&lane), 3);
        FocusNode::on_input_focus(&mut lane, false);
        assert!(!lane.has_input_focus());
    }

    #[test]
    fn new_list_resets_autonomous_focus() {
        let mut lane = lane(10);
        for _ in 0..6 {
            lane.move_focus(Horizontal::Right);
        }
        assert_eq!(lane.replace_items(cards(10)), None);
        assert_eq!(lane.focused_index(), 6);

        let other: Vec<_> = (0..4)
            .map(|i| FocusableItem::new(format!("other-{i}"), "x"))
            .collect();
        assert_eq!(lane.replace_items(other), Some(LaneEvent::FocusChanged(0)));
        assert_eq!(lane.focused_index(), 0);
        assert_eq!(lane.offset(), 0.0);
    }

    #[test]
    fn new_list_in_delegated_lane_asks_parent() {
        let mut lane = FixedSwimlane::new(cards(10), IndexOwnership::Delegated, config());
        lane.set_focused_index(7);
        let event = lane.replace_items(cards(3));
        assert_eq!(event, Some(LaneEvent::FocusRequested(0)));
        assert_eq!(lane.focused_index(), 2);
    }

    #[test]
    fn restore_keeps_visible_remembered_offset() {
        let mut lane = lane(15);
        // Card 5 at offset 1000: left edge 100 + 1620 − 1000 = 720.
        lane.restore(5, Some(1000.0));
        assert_eq!(lane.focused_index(), 5);
        assert_eq!(lane.offset(), 1000.0);
    }

    #[test]
    fn restore_discards_offset_that_hides_focus() {
        let mut lane = lane(15);
        lane.restore(5, Some(0.0));
        assert_eq!(lane.offset(), 5.0 * 324.0);
        lane.restore(5, Some(-20.0));
        assert_eq!(lane.offset(), 5.0 * 324.0);
    }

    #[test]
    fn restore_clamps_stale_index() {
        let mut lane = lane(4);
        lane.restore(40, None);
        assert_eq!(lane.focused_index(), 3);
    }

    #[test]
    fn viewport_change_snaps_offset() {
        let mut lane = lane(15);
        lane.restore(14, None);
        lane.set_viewport(Viewport::padded(1280.0, 100.0));
        assert_eq!(lane.offset(), 4860.0 - 1280.0 + 200.0);
    }

    #[test]
    fn scroll_animates_over_duration() {
        let mut lane = FixedSwimlane::new(
            cards(15),
            IndexOwnership::Autonomous,
            FixedLaneConfig {
                scroll_duration: Duration::from_millis(200),
                ..config()
            },
        );
        lane.move_focus(Horizontal::Right);
        lane.move_focus(Horizontal::Right);
        assert_eq!(lane.target_offset(), 648.0);
        assert!(lane.offset() < 648.0);
        lane.tick(Duration::from_millis(200));
        assert_eq!(lane.offset(), 648.0);
    }
}
