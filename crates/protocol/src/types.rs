use serde::{Deserialize, Serialize};

/// Width assumed for a viewport that has not been measured yet.
pub const FALLBACK_VIEWPORT_WIDTH: f64 = 1920.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }
}

/// The visible horizontal window a swimlane lays its items out in.
///
/// `width` is measured from the rendered container. A width of zero means
/// "not measured yet"; use [`Viewport::effective_width`] for layout math.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub left_padding: f64,
    pub right_padding: f64,
}

impl Viewport {
    pub fn new(width: f64, left_padding: f64, right_padding: f64) -> Self {
        Self {
            width,
            left_padding,
            right_padding,
        }
    }

    /// Viewport with the same padding on both sides.
    pub fn padded(width: f64, side_padding: f64) -> Self {
        Self::new(width, side_padding, side_padding)
    }

    /// An unmeasured viewport; layout falls back to [`FALLBACK_VIEWPORT_WIDTH`].
    pub fn unmeasured(side_padding: f64) -> Self {
        Self::padded(0.0, side_padding)
    }

    pub fn is_measured(&self) -> bool {
        self.width.is_finite() && self.width > 0.0
    }

    /// Width used for layout: the measured width, or the fallback when the
    /// container has not reported a usable size.
    pub fn effective_width(&self) -> f64 {
        if self.is_measured() {
            self.width
        } else {
            FALLBACK_VIEWPORT_WIDTH
        }
    }

    /// Horizontal room between the two paddings.
    pub fn inner_width(&self) -> f64 {
        (self.effective_width() - self.left_padding - self.right_padding).max(0.0)
    }
}

/// Horizontal footprint of one item in a swimlane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutItem {
    pub width: f64,
    /// Gap between this item and the next one. The last item of a
    /// variable-width lane carries no gap.
    pub gap_after: f64,
}

impl LayoutItem {
    pub fn new(width: f64, gap_after: f64) -> Self {
        Self { width, gap_after }
    }

    /// Distance from this item's left edge to the next item's left edge.
    pub fn stride(&self) -> f64 {
        self.width + self.gap_after
    }
}
