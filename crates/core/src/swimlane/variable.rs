use std::collections::HashMap;
use std::time::Duration;

use tunelane_protocol::{FocusableItem, Horizontal, LayoutItem, StableId, Viewport};

use super::{IndexOwnership, LaneEvent, step};
use crate::animation::Tween;
use crate::config::DesignTokens;
use crate::focus::FocusNode;
use crate::offset;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableLaneConfig {
    pub gap: f64,
    pub viewport: Viewport,
    /// Content wider than `overflow_ratio` viewports gets a "More" entry.
    pub overflow_ratio: f64,
    pub scroll_duration: Duration,
}

impl VariableLaneConfig {
    pub fn from_tokens(tokens: &DesignTokens) -> Self {
        Self {
            gap: tokens.variable_gap,
            viewport: tokens.lane_viewport(),
            overflow_ratio: tokens.overflow_ratio,
            scroll_duration: tokens.scroll_duration(),
        }
    }
}

impl Default for VariableLaneConfig {
    fn default() -> Self {
        Self::from_tokens(&DesignTokens::default())
    }
}

/// Which policy last decided the lane's offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetDriver {
    /// Following the focused chip while the lane owns input.
    Focus,
    /// Revealing the active chip (e.g. the applied filter).
    ActiveReveal,
}

/// A lane of chips whose widths are only known after they are rendered.
///
/// The two offset policies resolve deterministically: while the lane owns
/// input, revealing the active chip never moves the offset away from the
/// focused chip, and it never overrides navigation made since gaining input.
/// Otherwise the most recent request wins.
#[derive(Debug, Clone)]
pub struct VariableSwimlane {
    items: Vec<FocusableItem>,
    widths: HashMap<StableId, f64>,
    more_width: Option<f64>,
    ownership: IndexOwnership,
    focused_index: usize,
    active_index: Option<usize>,
    has_input: bool,
    navigated: bool,
    fully_measured: bool,
    config: VariableLaneConfig,
    offset: Tween,
    driver: OffsetDriver,
}

impl VariableSwimlane {
    pub fn new(
        items: Vec<FocusableItem>,
        ownership: IndexOwnership,
        config: VariableLaneConfig,
    ) -> Self {
        Self {
            items,
            widths: HashMap::new(),
            more_width: None,
            ownership,
            focused_index: 0,
            active_index: None,
            has_input: false,
            navigated: false,
            fully_measured: false,
            config,
            offset: Tween::settled(0.0),
            driver: OffsetDriver::Focus,
        }
    }

    pub fn items(&self) -> &[FocusableItem] {
        &self.items
    }

    pub fn focused_index(&self) -> usize {
        self.focused_index
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn has_input_focus(&self) -> bool {
        self.has_input
    }

    pub fn driver(&self) -> OffsetDriver {
        self.driver
    }

    pub fn config(&self) -> &VariableLaneConfig {
        &self.config
    }

    pub fn offset(&self) -> f64 {
        self.offset.value()
    }

    pub fn target_offset(&self) -> f64 {
        self.offset.target()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn width_of(&self, id: &str) -> Option<f64> {
        self.widths.get(id).copied()
    }

    pub fn more_width(&self) -> Option<f64> {
        self.more_width
    }

    /// Every real item has reported a width.
    pub fn is_measured(&self) -> bool {
        self.items.iter().all(|item| self.widths.contains_key(&item.id))
    }

    /// Measured widths of the real items plus the gaps between them.
    pub fn items_width(&self) -> f64 {
        let widths: f64 = self
            .items
            .iter()
            .filter_map(|item| self.widths.get(&item.id))
            .sum();
        let gaps = self.items.len().saturating_sub(1) as f64 * self.config.gap;
        widths + gaps
    }

    pub fn has_overflow(&self) -> bool {
        let limit = self.config.viewport.effective_width() * self.config.overflow_ratio;
        !self.items.is_empty() && self.is_measured() && self.items_width() > limit
    }

    /// Index of the "More" entry, when present.
    pub fn more_index(&self) -> Option<usize> {
        self.has_overflow().then_some(self.items.len())
    }

    /// Real items plus the "More" entry.
    pub fn navigable_count(&self) -> usize {
        self.items.len() + usize::from(self.has_overflow())
    }

    /// Layout of every navigable entry. Unmeasured entries count as zero
    /// width until they report.
    pub fn layout(&self) -> Vec<LayoutItem> {
        let gap = self.config.gap;
        let mut layout: Vec<LayoutItem> = self
            .items
            .iter()
            .map(|item| LayoutItem::new(self.widths.get(&item.id).copied().unwrap_or(0.0), gap))
            .collect();
        if self.has_overflow() {
            layout.push(LayoutItem::new(self.more_width.unwrap_or(0.0), gap));
        }
        if let Some(last) = layout.last_mut() {
            last.gap_after = 0.0;
        }
        layout
    }

    fn offset_for(&self, index: usize) -> f64 {
        offset::compute_offset_with_allowance(
            index,
            &self.layout(),
            &self.config.viewport,
            self.config.gap / 2.0,
        )
    }

    fn move_offset(&mut self, target: f64, animate: bool) {
        if animate {
            self.offset.retarget(target, self.config.scroll_duration);
        } else {
            self.offset.jump(target);
        }
    }

    fn follow_focus(&mut self, animate: bool) {
        self.driver = OffsetDriver::Focus;
        let target = self.offset_for(self.focused_index);
        self.move_offset(target, animate);
    }

    /// Scroll the active chip into view unless that would take the view
    /// away from the focused chip of a lane holding input. Returns whether
    /// the offset was taken over.
    fn reveal_active(&mut self, animate: bool) -> bool {
        let Some(active) = self.active_index else {
            return false;
        };
        if self.has_input && (self.navigated || active != self.focused_index) {
            tracing::trace!(active, focused = self.focused_index, "active reveal yields to focus");
            return false;
        }
        self.driver = OffsetDriver::ActiveReveal;
        let target = self.offset_for(active);
        self.move_offset(target, animate);
        true
    }

    fn clamp_focus(&mut self) {
        let count = self.navigable_count();
        self.focused_index = self.focused_index.min(count.saturating_sub(1));
    }

    /// Re-run layout after widths or the viewport changed.
    fn relayout(&mut self) {
        self.clamp_focus();
        if self.is_measured() && !self.fully_measured {
            self.fully_measured = true;
            if self.reveal_active(true) {
                return;
            }
        }
        match self.driver {
            OffsetDriver::Focus => self.follow_focus(false),
            OffsetDriver::ActiveReveal => {
                if !self.reveal_active(false) {
                    self.follow_focus(false);
                }
            }
        }
    }

    /// Record the rendered width of one item.
    pub fn measure_item(&mut self, id: &StableId, width: f64) {
        if !width.is_finite() || width < 0.0 {
            return;
        }
        if self.widths.get(id) == Some(&width) {
            return;
        }
        self.widths.insert(id.clone(), width);
        self.relayout();
    }

    /// Record the rendered width of the "More" entry.
    pub fn measure_more(&mut self, width: f64) {
        if !width.is_finite() || width < 0.0 || self.more_width == Some(width) {
            return;
        }
        self.more_width = Some(width);
        self.relayout();
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport != self.config.viewport {
            self.config.viewport = viewport;
            self.relayout();
        }
    }

    pub fn move_focus(&mut self, direction: Horizontal) -> Option<LaneEvent> {
        let count = self.navigable_count();
        if count == 0 {
            return None;
        }
        let next = step(self.focused_index, count, direction);
        if next == self.focused_index {
            return None;
        }
        match self.ownership {
            IndexOwnership::Autonomous => {
                self.apply_focus(next);
                Some(LaneEvent::FocusChanged(next))
            }
            IndexOwnership::Delegated => Some(LaneEvent::FocusRequested(next)),
        }
    }

    fn apply_focus(&mut self, index: usize) {
        self.focused_index = index;
        self.navigated = true;
        if self.has_input {
            self.follow_focus(true);
        }
    }

    /// Push a focus index from outside.
    pub fn set_focused_index(&mut self, index: usize) {
        let index = index.min(self.navigable_count().saturating_sub(1));
        if index != self.focused_index {
            self.apply_focus(index);
        }
    }

    /// Restore a remembered focus without counting it as navigation.
    pub fn restore(&mut self, index: usize) {
        self.focused_index = index.min(self.navigable_count().saturating_sub(1));
        if self.has_input {
            self.follow_focus(false);
        }
    }

    /// Mark the selected chip. Changing it scrolls it into view.
    pub fn set_active_index(&mut self, index: Option<usize>) {
        let index = index.filter(|i| *i < self.items.len());
        if index != self.active_index {
            self.active_index = index;
            self.reveal_active(true);
        }
    }

    pub fn activate(&self) -> Option<LaneEvent> {
        if let Some(item) = self.items.get(self.focused_index) {
            return Some(LaneEvent::Selected {
                index: self.focused_index,
                id: item.id.clone(),
            });
        }
        (self.more_index() == Some(self.focused_index)).then_some(LaneEvent::MoreRequested)
    }

    pub fn set_input_focus(&mut self, focused: bool) {
        if focused == self.has_input {
            return;
        }
        self.has_input = focused;
        self.navigated = false;
        if focused {
            self.follow_focus(true);
        }
    }

    /// Swap in a new list. Cached widths of surviving items are kept.
    pub fn replace_items(&mut self, items: Vec<FocusableItem>) -> Option<LaneEvent> {
        let same = self.items.len() == items.len()
            && self.items.iter().zip(&items).all(|(a, b)| a.id == b.id);
        self.items = items;
        if same {
            return None;
        }
        let items = &self.items;
        self.widths.retain(|id, _| items.iter().any(|item| &item.id == id));
        self.fully_measured = false;
        self.active_index = None;
        self.driver = OffsetDriver::Focus;
        match self.ownership {
            IndexOwnership::Autonomous => {
                self.focused_index = 0;
                self.offset.jump(0.0);
                Some(LaneEvent::FocusChanged(0))
            }
            IndexOwnership::Delegated => {
                self.clamp_focus();
                self.offset.jump(self.offset_for(self.focused_index));
                Some(LaneEvent::FocusRequested(0))
            }
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        self.offset.tick(dt);
    }
}

impl FocusNode for VariableSwimlane {
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
        self.navigable_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chips(n: usize) -> Vec<FocusableItem> {
        (0..n)
            .map(|i| FocusableItem::new(format!("chip-{i}"), format!("Chip {i}")))
            .collect()
    }

    fn config() -> VariableLaneConfig {
        VariableLaneConfig {
            gap: 32.0,
            viewport: Viewport::padded(1920.0, 100.0),
            overflow_ratio: 2.5,
            scroll_duration: Duration::ZERO,
        }
    }

    fn measured_lane(n: usize, width: f64) -> VariableSwimlane {
        let mut lane = VariableSwimlane::new(chips(n), IndexOwnership::Autonomous, config());
        let ids: Vec<StableId> = lane.items().iter().map(|i| i.id.clone()).collect();
        for id in &ids {
            lane.measure_item(id, width);
        }
        lane.measure_more(200.0);
        lane
    }

    #[test]
    fn three_chips_fit_without_more() {
        let lane = measured_lane(3, 400.0);
        assert_eq!(lane.items_width(), 1264.0);
        assert!(!lane.has_overflow());
        assert_eq!(lane.navigable_count(), 3);
    }

    #[test]
    fn ten_chips_stay_under_overflow_limit() {
        let lane = measured_lane(10, 400.0);
        assert_eq!(lane.items_width(), 4288.0);
        assert!(!lane.has_overflow());
        assert_eq!(lane.navigable_count(), 10);
    }

    #[test]
    fn fourteen_chips_grow_a_more_entry() {
        let mut lane = measured_lane(14, 400.0);
        assert_eq!(lane.items_width(), 6016.0);
        assert!(lane.has_overflow());
        assert_eq!(lane.navigable_count(), 15);
        lane.set_input_focus(true);
        for _ in 0..20 {
            lane.move_focus(Horizontal::Right);
        }
        assert_eq!(lane.focused_index(), 14);
        assert_eq!(lane.activate(), Some(LaneEvent::MoreRequested));
        assert_eq!(lane.layout().len(), 15);
        assert_eq!(lane.layout()[14].width, 200.0);
    }

    #[test]
    fn unmeasured_lane_never_overflows() {
        let mut lane = VariableSwimlane::new(chips(14), IndexOwnership::Autonomous, config());
        lane.measure_item(&"chip-0".into(), 4000.0);
        assert!(!lane.is_measured());
        assert!(!lane.has_overflow());
        assert_eq!(lane.navigable_count(), 14);
    }

    #[test]
    fn real_chip_selects_with_id() {
        let mut lane = measured_lane(3, 400.0);
        lane.set_input_focus(true);
        lane.move_focus(Horizontal::Right);
        assert_eq!(
            lane.activate(),
            Some(LaneEvent::Selected {
                index: 1,
                id: "chip-1".into()
            })
        );
    }

    #[test]
    fn empty_lane_is_inert() {
        let mut lane = VariableSwimlane::new(Vec::new(), IndexOwnership::Autonomous, config());
        assert_eq!(lane.move_focus(Horizontal::Right), None);
        assert_eq!(lane.activate(), None);
        assert!(!lane.has_overflow());
    }

    #[test]
    fn focus_follows_navigation_with_half_gap_parking() {
        let mut lane = measured_lane(14, 400.0);
        lane.set_input_focus(true);
        for _ in 0..14 {
            lane.move_focus(Horizontal::Right);
        }
        // 14 × 400 + 200 + 14 × 32 = 6248; 6248 − 1920 + 200 + 16 = 4544.
        assert_eq!(lane.offset(), 4544.0);
        assert_eq!(lane.driver(), OffsetDriver::Focus);
    }

    #[test]
    fn active_reveal_applies_without_input() {
        let mut lane = measured_lane(14, 400.0);
        lane.set_active_index(Some(6));
        assert_eq!(lane.driver(), OffsetDriver::ActiveReveal);
        assert_eq!(lane.offset(), 6.0 * 432.0);
        assert_eq!(lane.focused_index(), 0);
        assert!(!lane.has_input_focus());
    }

    #[test]
    fn active_reveal_yields_to_navigation_in_progress() {
        let mut lane = measured_lane(14, 400.0);
        lane.set_input_focus(true);
        lane.move_focus(Horizontal::Right);
        lane.move_focus(Horizontal::Right);
        let navigated_offset = lane.offset();
        lane.set_active_index(Some(10));
        assert_eq!(lane.active_index(), Some(10));
        assert_eq!(lane.offset(), navigated_offset);
        assert_eq!(lane.driver(), OffsetDriver::Focus);
    }

    #[test]
    fn active_reveal_never_hides_the_focused_chip() {
        let mut lane = measured_lane(14, 400.0);
        lane.set_input_focus(true);
        lane.set_active_index(Some(5));
        assert_eq!(lane.driver(), OffsetDriver::Focus);
        assert_eq!(lane.offset(), 0.0);
    }

    #[test]
    fn active_reveal_wins_when_focus_sits_on_the_active_chip() {
        let mut lane = measured_lane(14, 400.0);
        lane.restore(5);
        lane.set_input_focus(true);
        lane.set_active_index(Some(5));
        assert_eq!(lane.driver(), OffsetDriver::ActiveReveal);
        assert_eq!(lane.offset(), 5.0 * 432.0);
    }

    #[test]
    fn first_measurement_keeps_a_focused_lane_on_its_focus() {
        let mut lane = VariableSwimlane::new(chips(14), IndexOwnership::Autonomous, config());
        lane.restore(1);
        lane.set_input_focus(true);
        lane.set_active_index(Some(10));
        let ids: Vec<StableId> = lane.items().iter().map(|i| i.id.clone()).collect();
        for id in &ids {
            lane.measure_item(id, 400.0);
        }
        lane.measure_more(200.0);
        assert_eq!(lane.driver(), OffsetDriver::Focus);
        assert_eq!(lane.offset(), 432.0);
    }

    #[test]
    fn first_measurement_reveals_active() {
        let mut lane = VariableSwimlane::new(chips(14), IndexOwnership::Autonomous, config());
        lane.set_active_index(Some(8));
        assert_eq!(lane.offset(), 0.0);
        let ids: Vec<StableId> = lane.items().iter().map(|i| i.id.clone()).collect();
        for id in &ids {
            lane.measure_item(id, 400.0);
        }
        assert_eq!(lane.driver(), OffsetDriver::ActiveReveal);
        assert_eq!(lane.offset(), 8.0 * 432.0);
    }

    #[test]
    fn shrinking_viewport_limit_can_remove_more() {
        let mut lane = measured_lane(14, 400.0);
        lane.set_input_focus(true);
        for _ in 0..14 {
            lane.move_focus(Horizontal::Right);
        }
        assert_eq!(lane.focused_index(), 14);
        lane.set_viewport(Viewport::padded(3840.0, 100.0));
        assert!(!lane.has_overflow());
        assert_eq!(lane.focused_index(), 13);
    }

    #[test]
    fn repeated_measurement_is_ignored() {
        let mut lane = measured_lane(3, 400.0);
        lane.set_active_index(Some(2));
        lane.measure_item(&"chip-0".into(), 400.0);
        assert_eq!(lane.driver(), OffsetDriver::ActiveReveal);
        lane.measure_item(&"chip-0".into(), f64::NAN);
        assert_eq!(lane.width_of("chip-0"), Some(400.0));
    }

    #[test]
    fn replacing_list_keeps_surviving_widths() {
        let mut lane = measured_lane(4, 300.0);
        let mut next = chips(2);
        next.push(FocusableItem::new("new", "New"));
        assert_eq!(lane.replace_items(next), Some(LaneEvent::FocusChanged(0)));
        assert_eq!(lane.width_of("chip-1"), Some(300.0));
        assert_eq!(lane.width_of("chip-3"), None);
        assert!(!lane.is_measured());
        assert_eq!(lane.active_index(), None);
    }
}
