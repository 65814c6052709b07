//! Layout measurements delivered by the renderer after it has drawn.

use std::collections::HashMap;

use tunelane_protocol::{FocusableItem, StableId};

/// Source of rendered sizes, queried per focus group.
///
/// Any method may answer `None` while the renderer has not measured yet;
/// lanes keep their fallbacks until a real value arrives.
pub trait LayoutProbe {
    fn container_width(&self, group: usize) -> Option<f64>;

    fn item_width(&self, group: usize, item: &FocusableItem) -> Option<f64>;

    /// Width of the overflow "More" entry of a variable lane.
    fn more_width(&self, group: usize) -> Option<f64>;
}

/// Measurements pushed in from outside (the browser bridge, tests).
#[derive(Debug, Clone, Default)]
pub struct LayoutReport {
    containers: HashMap<usize, f64>,
    items: HashMap<(usize, StableId), f64>,
    more: HashMap<usize, f64>,
}

impl LayoutReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_container_width(&mut self, group: usize, width: f64) {
        self.containers.insert(group, width);
    }

    pub fn set_item_width(&mut self, group: usize, id: impl Into<StableId>, width: f64) {
        self.items.insert((group, id.into()), width);
    }

    pub fn set_more_width(&mut self, group: usize, width: f64) {
        self.more.insert(group, width);
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty() && self.items.is_empty() && self.more.is_empty()
    }
}

impl LayoutProbe for LayoutReport {
    fn container_width(&self, group: usize) -> Option<f64> {
        self.containers.get(&group).copied()
    }

    fn item_width(&self, group: usize, item: &FocusableItem) -> Option<f64> {
        self.items.get(&(group, item.id.clone())).copied()
    }

    fn more_width(&self, group: usize) -> Option<f64> {
        self.more.get(&group).copied()
    }
}
