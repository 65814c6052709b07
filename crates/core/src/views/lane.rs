use tunelane_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport};

use super::{push_card, push_label};
use crate::offset;
use crate::swimlane::{FixedSwimlane, VariableSwimlane};

const LABEL_GAP: f64 = 20.0;
const EMPTY_TEXT: &str = "Nothing here yet";

/// Placement of one lane on the canvas.
#[derive(Debug, Clone)]
pub struct LaneFrame {
    pub id: String,
    pub label: Option<String>,
    pub y: f64,
    pub height: f64,
    /// The lane's group owns input.
    pub focused: bool,
}

impl LaneFrame {
    fn open(&self, commands: &mut Vec<RenderCommand>, viewport: &Viewport, offset: f64) {
        commands.push(RenderCommand::BeginGroup {
            id: self.id.clone(),
            label: self.label.clone(),
            focused: self.focused,
        });
        if let Some(label) = &self.label {
            push_label(commands, viewport.left_padding, self.y - LABEL_GAP, label);
        }
        commands.push(RenderCommand::SetClip {
            rect: Rect::new(0.0, self.y, viewport.effective_width(), self.height),
        });
        commands.push(RenderCommand::PushTransform {
            translate: Point::new(-offset, 0.0),
        });
    }

    fn close(commands: &mut Vec<RenderCommand>) {
        commands.push(RenderCommand::PopTransform);
        commands.push(RenderCommand::ClearClip);
        commands.push(RenderCommand::EndGroup);
    }

    fn empty(&self, commands: &mut Vec<RenderCommand>, viewport: &Viewport) {
        commands.push(RenderCommand::DrawText {
            position: Point::new(viewport.left_padding, self.y + self.height / 2.0),
            text: EMPTY_TEXT.to_owned(),
            color: ThemeToken::TextMuted,
            font_size: 24.0,
            align: TextAlign::Left,
        });
    }
}

/// Render a fixed-width lane, culling cards outside the viewport.
pub fn render_fixed_lane(frame: &LaneFrame, lane: &FixedSwimlane) -> Vec<RenderCommand> {
    let _span = tracing::debug_span!("render_fixed_lane", id = %frame.id).entered();
    let viewport = lane.config().viewport;
    let offset = lane.offset();
    let layout = lane.layout();
    let visible = offset::visible_range(&layout, &viewport, offset);

    let mut commands = Vec::with_capacity(visible.len() * 3 + 8);
    frame.open(&mut commands, &viewport, offset);
    if lane.is_empty() {
        frame.empty(&mut commands, &viewport);
    }

    let mut x = viewport.left_padding + offset::left_edge(visible.start, &layout);
    for i in visible {
        let (Some(item), Some(slot)) = (lane.items().get(i), layout.get(i)) else {
            break;
        };
        let focused = frame.focused && i == lane.focused_index();
        let color = if focused {
            ThemeToken::CardFocused
        } else {
            ThemeToken::CardIdle
        };
        let rect = Rect::new(x, frame.y, slot.width, frame.height);
        push_card(&mut commands, rect, item, color, focused);
        x += slot.stride();
    }

    LaneFrame::close(&mut commands);
    commands
}

/// Render a variable-width lane. Chips that have not been measured yet are
/// skipped; the "More" entry is drawn after the last chip when present.
pub fn render_variable_lane(frame: &LaneFrame, lane: &VariableSwimlane) -> Vec<RenderCommand> {
    let _span = tracing::debug_span!("render_variable_lane", id = %frame.id).entered();
    let viewport = lane.config().viewport;
    let offset = lane.offset();
    let layout = lane.layout();
    let visible = offset::visible_range(&layout, &viewport, offset);

    let mut commands = Vec::with_capacity(visible.len() * 2 + 8);
    frame.open(&mut commands, &viewport, offset);
    if lane.items().is_empty() {
        frame.empty(&mut commands, &viewport);
    }

    let mut x = viewport.left_padding + offset::left_edge(visible.start, &layout);
    for i in visible {
        let Some(slot) = layout.get(i) else {
            break;
        };
        let focused = frame.focused && i == lane.focused_index();
        let rect = Rect::new(x, frame.y, slot.width, frame.height);
        x += slot.stride();
        if slot.width <= 0.0 {
            continue;
        }

        match lane.items().get(i) {
            Some(item) => {
                let color = if focused {
                    ThemeToken::CardFocused
                } else if lane.active_index() == Some(i) {
                    ThemeToken::CardActive
                } else {
                    ThemeToken::CardIdle
                };
                push_card(&mut commands, rect, item, color, focused);
            }
            None => {
                commands.push(RenderCommand::DrawRect {
                    rect,
                    color: if focused {
                        ThemeToken::CardFocused
                    } else {
                        ThemeToken::MoreAffordance
                    },
                    border_color: focused.then_some(ThemeToken::FocusRing),
                    label: Some("More".to_owned()),
                    item_id: None,
                });
            }
        }
    }

    LaneFrame::close(&mut commands);
    commands
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tunelane_protocol::{FocusableItem, Horizontal, StableId};

    use super::*;
    use crate::swimlane::{FixedLaneConfig, IndexOwnership, VariableLaneConfig};

    fn frame(focused: bool) -> LaneFrame {
        LaneFrame {
            id: "home/channels".into(),
            label: Some("Channels".into()),
            y: 590.0,
            height: 300.0,
            focused,
        }
    }

    fn cards(n: usize) -> Vec<FocusableItem> {
        (0..n)
            .map(|i| FocusableItem::new(format!("c{i}"), format!("Card {i}")))
            .collect()
    }

    fn card_ids(commands: &[RenderCommand]) -> Vec<StableId> {
        commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawRect {
                    item_id: Some(id), ..
                } => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn fixed_lane_culls_and_translates() {
        let config = FixedLaneConfig {
            scroll_duration: Duration::ZERO,
            ..FixedLaneConfig::default()
        };
        let mut lane = FixedSwimlane::new(cards(15), IndexOwnership::Autonomous, config);
        let commands = render_fixed_lane(&frame(false), &lane);
        assert_eq!(card_ids(&commands).len(), 6);
        assert!(matches!(
            commands.first(),
            Some(RenderCommand::BeginGroup { focused: false, .. })
        ));
        assert_eq!(commands.last(), Some(&RenderCommand::EndGroup));

        for _ in 0..14 {
            lane.move_focus(Horizontal::Right);
        }
        let commands = render_fixed_lane(&frame(true), &lane);
        assert!(commands.contains(&RenderCommand::PushTransform {
            translate: Point::new(-3140.0, 0.0)
        }));
        assert_eq!(card_ids(&commands).last(), Some(&StableId::from("c14")));
    }

    #[test]
    fn only_focused_group_draws_focus_ring() {
        let lane =
            FixedSwimlane::new(cards(3), IndexOwnership::Autonomous, FixedLaneConfig::default());
        let ring = |commands: &[RenderCommand]| {
            commands.iter().any(|c| {
                matches!(
                    c,
                    RenderCommand::DrawRect {
                        border_color: Some(ThemeToken::FocusRing),
                        ..
                    }
                )
            })
        };
        assert!(!ring(&render_fixed_lane(&frame(false), &lane)));
        assert!(ring(&render_fixed_lane(&frame(true), &lane)));
    }

    #[test]
    fn empty_lane_says_so() {
        let lane =
            FixedSwimlane::new(Vec::new(), IndexOwnership::Autonomous, FixedLaneConfig::default());
        let commands = render_fixed_lane(&frame(true), &lane);
        assert!(commands.iter().any(|c| matches!(
            c,
            RenderCommand::DrawText { text, .. } if text == EMPTY_TEXT
        )));
    }

    #[test]
    fn variable_lane_marks_active_and_more() {
        let mut lane = VariableSwimlane::new(
            cards(14),
            IndexOwnership::Autonomous,
            VariableLaneConfig::default(),
        );
        let ids: Vec<StableId> = lane.items().iter().map(|i| i.id.clone()).collect();
        assert!(card_ids(&render_variable_lane(&frame(false), &lane)).is_empty());
        for id in &ids {
            lane.measure_item(id, 400.0);
        }
        lane.measure_more(160.0);
        lane.set_active_index(Some(0));
        let commands = render_variable_lane(&frame(false), &lane);
        assert!(commands.iter().any(|c| matches!(
            c,
            RenderCommand::DrawRect { color: ThemeToken::CardActive, .. }
        )));
        lane.set_input_focus(true);
        for _ in 0..14 {
            lane.move_focus(Horizontal::Right);
        }
        lane.tick(Duration::from_secs(1));
        let commands = render_variable_lane(&frame(true), &lane);
        assert!(commands.iter().any(|c| matches!(
            c,
            RenderCommand::DrawRect { label: Some(label), color: ThemeToken::CardFocused, .. }
                if label == "More"
        )));
    }
}
