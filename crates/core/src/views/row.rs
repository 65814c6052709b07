use tunelane_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken};

use crate::button_row::ButtonRow;

#[derive(Debug, Clone)]
pub struct RowFrame {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub button_width: f64,
    pub button_height: f64,
    pub gap: f64,
    pub focused: bool,
}

pub fn render_button_row<A: Copy>(frame: &RowFrame, row: &ButtonRow<A>) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(row.len() * 2 + 2);
    commands.push(RenderCommand::BeginGroup {
        id: frame.id.clone(),
        label: None,
        focused: frame.focused,
    });

    for (i, (_, label)) in row.actions().enumerate() {
        let focused = frame.focused && i == row.focused_index();
        let x = frame.x + i as f64 * (frame.button_width + frame.gap);
        let rect = Rect::new(x, frame.y, frame.button_width, frame.button_height);
        commands.push(RenderCommand::DrawRect {
            rect,
            color: if focused {
                ThemeToken::ButtonFocused
            } else {
                ThemeToken::ButtonIdle
            },
            border_color: focused.then_some(ThemeToken::FocusRing),
            label: None,
            item_id: None,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(
                x + frame.button_width / 2.0,
                frame.y + frame.button_height * 0.6,
            ),
            text: label.to_owned(),
            color: ThemeToken::TextPrimary,
            font_size: 24.0,
            align: TextAlign::Center,
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_are_laid_out_left_to_right() {
        let row = ButtonRow::new(vec![(0u8, "A".to_owned()), (1u8, "B".to_owned())]);
        let frame = RowFrame {
            id: "header".into(),
            x: 100.0,
            y: 40.0,
            button_width: 200.0,
            button_height: 64.0,
            gap: 24.0,
            focused: true,
        };
        let rects: Vec<(Rect, ThemeToken)> = render_button_row(&frame, &row)
            .into_iter()
            .filter_map(|c| match c {
                RenderCommand::DrawRect { rect, color, .. } => Some((rect, color)),
                _ => None,
            })
            .collect();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].0, Rect::new(100.0, 40.0, 200.0, 64.0));
        assert_eq!(rects[0].1, ThemeToken::ButtonFocused);
        assert_eq!(rects[1].0, Rect::new(324.0, 40.0, 200.0, 64.0));
        assert_eq!(rects[1].1, ThemeToken::ButtonIdle);
    }
}
