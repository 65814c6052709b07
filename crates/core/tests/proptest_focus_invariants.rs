//! Property-based invariant tests for the focus engine.
//!
//! 1. Focus indices stay in range under any move sequence.
//! 2. Offsets stay within `[0, max_offset]`.
//! 3. The focused card is fully visible after any move sequence, and a
//!    focused chip stays visible whatever the active chip does.
//! 4. Offset computation is a pure function.
//! 5. The closed-form fixed-lane offset matches the general one.
//! 6. The active group index is in range after every vertical move, even
//!    right after the floating group disappears.
//! 7. Group focus memory round-trips.
//! 8. A legacy bare-string position reads back as `{id, 0}` and is never
//!    rewritten by reading.

use std::time::Duration;

use proptest::prelude::*;
use serde_json::json;
use tunelane_core::group::{GroupFocusMemory, GroupNavigator};
use tunelane_core::memory::{ItemPosition, ScreenMemory};
use tunelane_core::offset;
use tunelane_core::swimlane::{
    FixedLaneConfig, FixedSwimlane, IndexOwnership, VariableLaneConfig, VariableSwimlane,
};
use tunelane_protocol::{FocusableItem, Horizontal, LayoutItem, Vertical, Viewport};

// ── Helpers ─────────────────────────────────────────────────────────────

fn items(n: usize) -> Vec<FocusableItem> {
    (0..n)
        .map(|i| FocusableItem::new(format!("i{i}"), format!("Item {i}")))
        .collect()
}

fn direction_strategy() -> impl Strategy<Value = Horizontal> {
    prop_oneof![Just(Horizontal::Left), Just(Horizontal::Right)]
}

fn layout_strategy() -> impl Strategy<Value = Vec<LayoutItem>> {
    (prop::collection::vec(0.0f64..800.0, 0..40), 0.0f64..64.0).prop_map(|(widths, gap)| {
        let last = widths.len().saturating_sub(1);
        widths
            .into_iter()
            .enumerate()
            .map(|(i, w)| LayoutItem::new(w, if i == last { 0.0 } else { gap }))
            .collect()
    })
}

fn viewport_strategy() -> impl Strategy<Value = Viewport> {
    (600.0f64..3840.0, 0.0f64..200.0).prop_map(|(width, side)| Viewport::padded(width, side))
}

fn fixed_config(card_width: f64, gap: f64, viewport: Viewport) -> FixedLaneConfig {
    FixedLaneConfig {
        card_width,
        gap,
        viewport,
        scroll_duration: Duration::ZERO,
    }
}

#[derive(Debug, Clone, Copy)]
enum GroupOp {
    Move(Vertical),
    Floating(bool),
}

fn group_op_strategy() -> impl Strategy<Value = GroupOp> {
    prop_oneof![
        Just(GroupOp::Move(Vertical::Up)),
        Just(GroupOp::Move(Vertical::Down)),
        any::<bool>().prop_map(GroupOp::Floating),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Focus indices stay in range
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fixed_focus_stays_in_range(
        n in 0usize..30,
        moves in prop::collection::vec(direction_strategy(), 0..80),
    ) {
        let mut lane = FixedSwimlane::new(
            items(n),
            IndexOwnership::Autonomous,
            fixed_config(300.0, 24.0, Viewport::padded(1920.0, 100.0)),
        );
        for direction in moves {
            lane.move_focus(direction);
            prop_assert!(lane.focused_index() < n.max(1));
        }
    }

    #[test]
    fn variable_focus_may_reach_more_but_no_further(
        widths in prop::collection::vec(50.0f64..600.0, 0..25),
        moves in prop::collection::vec(direction_strategy(), 0..80),
    ) {
        let list = items(widths.len());
        let config = VariableLaneConfig {
            gap: 32.0,
            viewport: Viewport::padded(1920.0, 100.0),
            overflow_ratio: 2.5,
            scroll_duration: Duration::ZERO,
        };
        let mut lane = VariableSwimlane::new(list.clone(), IndexOwnership::Autonomous, config);
        for (item, width) in list.iter().zip(&widths) {
            lane.measure_item(&item.id, *width);
        }
        lane.measure_more(160.0);
        lane.set_input_focus(true);

        let limit = widths.len() + usize::from(lane.has_overflow());
        prop_assert_eq!(lane.navigable_count(), limit);
        for direction in moves {
            lane.move_focus(direction);
            prop_assert!(lane.focused_index() < limit.max(1));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Offset bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn offset_within_bounds(
        layout in layout_strategy(),
        viewport in viewport_strategy(),
        target in 0usize..50,
        allowance in 0.0f64..32.0,
    ) {
        let max = offset::max_offset_with_allowance(&layout, &viewport, allowance);
        let value = offset::compute_offset_with_allowance(target, &layout, &viewport, allowance);
        prop_assert!(value >= 0.0, "negative offset {}", value);
        prop_assert!(value <= max + 1e-9, "offset {} above max {}", value, max);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Visibility after moves
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn focused_card_is_fully_visible(
        n in 1usize..40,
        card_width in 100.0f64..500.0,
        gap in 0.0f64..48.0,
        viewport in viewport_strategy(),
        moves in prop::collection::vec(direction_strategy(), 0..60),
    ) {
        prop_assume!(card_width <= viewport.inner_width());
        let mut lane = FixedSwimlane::new(
            items(n),
            IndexOwnership::Autonomous,
            fixed_config(card_width, gap, viewport),
        );
        lane.set_input_focus(true);
        for direction in moves {
            lane.move_focus(direction);
        }
        prop_assert!(offset::is_fully_visible(
            lane.focused_index(),
            &lane.layout(),
            &viewport,
            lane.target_offset(),
        ));
    }

    #[test]
    fn focused_chip_stays_visible_while_active_chip_changes(
        widths in prop::collection::vec(50.0f64..600.0, 1..25),
        viewport in viewport_strategy(),
        first_active in prop::option::of(0usize..25),
        steps in prop::collection::vec(
            (direction_strategy(), prop::option::of(0usize..25)),
            0..60,
        ),
    ) {
        let widest = widths.iter().copied().fold(160.0, f64::max);
        prop_assume!(widest <= viewport.inner_width());
        let list = items(widths.len());
        let config = VariableLaneConfig {
            gap: 32.0,
            viewport,
            overflow_ratio: 2.5,
            scroll_duration: Duration::ZERO,
        };
        let mut lane = VariableSwimlane::new(list.clone(), IndexOwnership::Autonomous, config);
        lane.set_input_focus(true);
        lane.set_active_index(first_active);
        for (item, width) in list.iter().zip(&widths) {
            lane.measure_item(&item.id, *width);
        }
        lane.measure_more(160.0);

        let visible = |lane: &VariableSwimlane| {
            offset::is_fully_visible(
                lane.focused_index(),
                &lane.layout(),
                &viewport,
                lane.target_offset(),
            )
        };
        prop_assert!(visible(&lane), "hidden after measurement");
        for (direction, active) in steps {
            lane.move_focus(direction);
            prop_assert!(visible(&lane), "hidden after move");
            lane.set_active_index(active);
            prop_assert!(visible(&lane), "hidden after active change to {:?}", active);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn offset_is_pure(
        layout in layout_strategy(),
        viewport in viewport_strategy(),
        target in 0usize..50,
    ) {
        let first = offset::compute_offset(target, &layout, &viewport);
        let second = offset::compute_offset(target, &layout, &viewport);
        prop_assert_eq!(first.to_bits(), second.to_bits());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Closed form agrees with the general computation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fixed_offset_matches_general_form(
        count in 0usize..60,
        card_width in 50.0f64..500.0,
        gap in 0.0f64..48.0,
        viewport in viewport_strategy(),
        target in 0usize..80,
    ) {
        let layout = offset::fixed_layout(count, card_width, gap);
        let general = offset::compute_offset(target, &layout, &viewport);
        let closed = offset::fixed_offset(target, count, card_width, gap, &viewport);
        prop_assert!((general - closed).abs() < 1e-6, "{} != {}", general, closed);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Group clamp
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn group_index_in_range_after_every_move(
        base in 1usize..6,
        ops in prop::collection::vec(group_op_strategy(), 0..60),
    ) {
        let mut groups = GroupNavigator::new(base);
        for op in ops {
            match op {
                GroupOp::Move(direction) => {
                    let active = groups.move_vertical(direction);
                    prop_assert!(active < groups.group_count());
                    prop_assert!(groups.is_active_valid());
                }
                GroupOp::Floating(eligible) => groups.set_floating_eligible(eligible),
            }
        }
        let active = groups.clamp();
        prop_assert!(active < groups.group_count());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Group memory round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn group_memory_round_trips(
        group in 0usize..10,
        focused_index in 0usize..1000,
        offset_px in 0.0f64..10_000.0,
        other in 10usize..20,
    ) {
        let mut groups = GroupNavigator::new(3);
        let memory = GroupFocusMemory { focused_index, offset_px };
        groups.set_group_focus_memory(group, memory);
        prop_assert_eq!(groups.group_focus_memory(group), memory);
        prop_assert_eq!(groups.group_focus_memory(other), GroupFocusMemory::default());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Legacy position coercion
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn bare_string_position_coerces_on_read(id in "[a-z0-9-]{1,16}", reads in 1usize..5) {
        let mut memory = ScreenMemory::new();
        memory.set_field("home", "swimlanePosition", json!(id.clone()));
        for _ in 0..reads {
            prop_assert_eq!(
                memory.item_position("home", "swimlanePosition"),
                Some(ItemPosition::new(id.as_str(), 0.0))
            );
        }
        prop_assert_eq!(memory.get_field("home", "swimlanePosition"), Some(&json!(id)));
    }
}
