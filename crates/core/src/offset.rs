//! Horizontal scroll offsets for swimlanes.
//!
//! Items are laid out left to right starting at `viewport.left_padding`; a
//! lane is drawn translated by `-offset`. The offset puts the target item's
//! left edge on the left padding, then parks it so the lane never scrolls
//! past its last item:
//!
//! ```text
//! left_edge  = Σ stride(items[..target])
//! max_offset = max(0, content_width - viewport_width + left_pad + right_pad + allowance)
//! offset     = clamp(left_edge, 0, max_offset)
//! ```
//!
//! Everything here is pure. Callers re-run it whenever item count, widths,
//! viewport or target change.

use std::ops::Range;

use tunelane_protocol::{LayoutItem, Viewport};

/// Sum of strides (width plus trailing gap) of all items.
pub fn content_width(items: &[LayoutItem]) -> f64 {
    items.iter().map(LayoutItem::stride).sum()
}

/// Distance from the first item's left edge to `target`'s left edge.
pub fn left_edge(target: usize, items: &[LayoutItem]) -> f64 {
    let end = target.min(items.len());
    items[..end].iter().map(LayoutItem::stride).sum()
}

pub fn max_offset(items: &[LayoutItem], viewport: &Viewport) -> f64 {
    max_offset_with_allowance(items, viewport, 0.0)
}

/// Parking limit. `allowance` extends it (variable lanes add half a gap so
/// the last chip does not sit flush against the right padding).
pub fn max_offset_with_allowance(
    items: &[LayoutItem],
    viewport: &Viewport,
    allowance: f64,
) -> f64 {
    let overflow = content_width(items) - viewport.effective_width()
        + viewport.left_padding
        + viewport.right_padding
        + allowance;
    if overflow.is_finite() {
        overflow.max(0.0)
    } else {
        0.0
    }
}

pub fn compute_offset(target: usize, items: &[LayoutItem], viewport: &Viewport) -> f64 {
    compute_offset_with_allowance(target, items, viewport, 0.0)
}

/// Offset that brings `target` into view. Out-of-range targets are clamped
/// to the last item; empty and single-item lanes never scroll.
pub fn compute_offset_with_allowance(
    target: usize,
    items: &[LayoutItem],
    viewport: &Viewport,
    allowance: f64,
) -> f64 {
    if items.len() <= 1 {
        return 0.0;
    }
    let target = target.min(items.len() - 1);
    let max = max_offset_with_allowance(items, viewport, allowance);
    let edge = left_edge(target, items);
    if edge.is_finite() {
        edge.min(max).max(0.0)
    } else {
        0.0
    }
}

/// Layout of `count` equal cards separated by `gap` (trailing gap included).
pub fn fixed_layout(count: usize, card_width: f64, gap: f64) -> Vec<LayoutItem> {
    vec![LayoutItem::new(card_width, gap); count]
}

/// Closed form of [`compute_offset`] for lanes of equal-width cards.
pub fn fixed_offset(
    target: usize,
    count: usize,
    card_width: f64,
    gap: f64,
    viewport: &Viewport,
) -> f64 {
    if count <= 1 {
        return 0.0;
    }
    let stride = card_width + gap;
    let target = target.min(count - 1);
    let max = (count as f64 * stride - viewport.effective_width()
        + viewport.left_padding
        + viewport.right_padding)
        .max(0.0);
    (target as f64 * stride).min(max).max(0.0)
}

/// Whether `target` lies entirely between the paddings when the lane is
/// translated by `offset`.
pub fn is_fully_visible(
    target: usize,
    items: &[LayoutItem],
    viewport: &Viewport,
    offset: f64,
) -> bool {
    let Some(item) = items.get(target) else {
        return false;
    };
    let x = viewport.left_padding + left_edge(target, items) - offset;
    const EPS: f64 = 1e-6;
    x >= viewport.left_padding - EPS
        && x + item.width <= viewport.effective_width() - viewport.right_padding + EPS
}

/// Indices of items that intersect the viewport at `offset`, for culling.
pub fn visible_range(items: &[LayoutItem], viewport: &Viewport, offset: f64) -> Range<usize> {
    let width = viewport.effective_width();
    let mut x = viewport.left_padding - offset;
    let mut start = None;
    let mut end = 0;
    for (i, item) in items.iter().enumerate() {
        let right = x + item.width;
        if right > 0.0 && x < width {
            start.get_or_insert(i);
            end = i + 1;
        } else if x >= width {
            break;
        }
        x += item.stride();
    }
    match start {
        Some(start) => start..end,
        None => 0..0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp() -> Viewport {
        Viewport::padded(1920.0, 100.0)
    }

    #[test]
    fn empty_and_single_lanes_never_scroll() {
        assert_eq!(compute_offset(0, &[], &vp()), 0.0);
        assert_eq!(compute_offset(5, &[], &vp()), 0.0);
        let one = fixed_layout(1, 5000.0, 24.0);
        assert_eq!(compute_offset(0, &one, &vp()), 0.0);
        assert_eq!(fixed_offset(3, 1, 5000.0, 24.0, &vp()), 0.0);
    }

    #[test]
    fn fifteen_fixed_cards_park_at_the_tail() {
        // 15 × (300 + 24) = 4860; 4860 − 1920 + 200 = 3140 < 14 × 324 = 4536.
        let items = fixed_layout(15, 300.0, 24.0);
        assert_eq!(max_offset(&items, &vp()), 3140.0);
        assert_eq!(compute_offset(14, &items, &vp()), 3140.0);
        assert_eq!(fixed_offset(14, 15, 300.0, 24.0, &vp()), 3140.0);
    }

    #[test]
    fn early_cards_align_to_left_padding() {
        let items = fixed_layout(15, 300.0, 24.0);
        assert_eq!(compute_offset(0, &items, &vp()), 0.0);
        assert_eq!(compute_offset(3, &items, &vp()), 972.0);
        assert_eq!(fixed_offset(3, 15, 300.0, 24.0, &vp()), 972.0);
    }

    #[test]
    fn short_lane_stays_put() {
        let items = fixed_layout(4, 300.0, 24.0);
        for i in 0..4 {
            assert_eq!(compute_offset(i, &items, &vp()), 0.0);
        }
    }

    #[test]
    fn unmeasured_viewport_falls_back_to_nominal_width() {
        let items = fixed_layout(15, 300.0, 24.0);
        let unmeasured = Viewport::unmeasured(100.0);
        assert_eq!(
            compute_offset(14, &items, &unmeasured),
            compute_offset(14, &items, &vp())
        );
    }

    #[test]
    fn out_of_range_target_clamps_to_last() {
        let items = fixed_layout(15, 300.0, 24.0);
        assert_eq!(
            compute_offset(99, &items, &vp()),
            compute_offset(14, &items, &vp())
        );
    }

    #[test]
    fn allowance_extends_parking() {
        let items = vec![
            LayoutItem::new(800.0, 32.0),
            LayoutItem::new(800.0, 32.0),
            LayoutItem::new(800.0, 0.0),
        ];
        let base = max_offset(&items, &vp());
        let extended = max_offset_with_allowance(&items, &vp(), 16.0);
        assert_eq!(extended - base, 16.0);
        assert_eq!(compute_offset_with_allowance(2, &items, &vp(), 16.0), extended);
    }

    #[test]
    fn computed_offset_keeps_target_visible() {
        let items = fixed_layout(15, 300.0, 24.0);
        for i in 0..15 {
            let off = compute_offset(i, &items, &vp());
            assert!(is_fully_visible(i, &items, &vp(), off), "card {i} hidden at {off}");
        }
    }

    #[test]
    fn visible_range_culls_offscreen_cards() {
        let items = fixed_layout(15, 300.0, 24.0);
        assert_eq!(visible_range(&items, &vp(), 0.0), 0..6);
        let tail = visible_range(&items, &vp(), 3140.0);
        assert_eq!(tail.end, 15);
        assert!(tail.start > 0);
        assert_eq!(visible_range(&[], &vp(), 0.0), 0..0);
    }
}
