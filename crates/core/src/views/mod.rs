//! Render-command builders.
//!
//! Screens call these with their component state each frame. Everything is
//! laid out on the fixed 1920×1080 canvas; renderers scale as they see fit.

mod lane;
mod player;
mod row;

pub use lane::{LaneFrame, render_fixed_lane, render_variable_lane};
pub use player::{PlayerView, render_mini_player, render_player_overlay};
pub use row::{RowFrame, render_button_row};

use tunelane_protocol::{FocusableItem, Point, Rect, RenderCommand, TextAlign, ThemeToken};

pub const HEADER_Y: f64 = 40.0;
pub const HEADER_BUTTON_WIDTH: f64 = 200.0;
pub const HEADER_BUTTON_HEIGHT: f64 = 64.0;
pub const UPPER_ROW_Y: f64 = 200.0;
pub const LOWER_ROW_Y: f64 = 590.0;
pub const CHIP_HEIGHT: f64 = 72.0;
pub const MINI_PLAYER_HEIGHT: f64 = 110.0;

const TITLE_FONT: f64 = 28.0;
const SUBTITLE_FONT: f64 = 22.0;
const LABEL_FONT: f64 = 26.0;

/// Draw a labelled card for `item`.
pub(crate) fn push_card(
    commands: &mut Vec<RenderCommand>,
    rect: Rect,
    item: &FocusableItem,
    color: ThemeToken,
    focused: bool,
) {
    commands.push(RenderCommand::DrawRect {
        rect,
        color,
        border_color: focused.then_some(ThemeToken::FocusRing),
        label: None,
        item_id: Some(item.id.clone()),
    });
    let center = rect.x + rect.w / 2.0;
    let title_y = match item.subtitle {
        Some(_) => rect.y + rect.h / 2.0 - SUBTITLE_FONT / 2.0,
        None => rect.y + rect.h / 2.0 + TITLE_FONT / 3.0,
    };
    commands.push(RenderCommand::DrawText {
        position: Point::new(center, title_y),
        text: item.title.clone(),
        color: ThemeToken::TextPrimary,
        font_size: TITLE_FONT,
        align: TextAlign::Center,
    });
    if let Some(subtitle) = &item.subtitle {
        commands.push(RenderCommand::DrawText {
            position: Point::new(center, title_y + TITLE_FONT + 8.0),
            text: subtitle.clone(),
            color: ThemeToken::TextSecondary,
            font_size: SUBTITLE_FONT,
            align: TextAlign::Center,
        });
    }
}

/// Row caption drawn above a lane.
pub(crate) fn push_label(commands: &mut Vec<RenderCommand>, x: f64, y: f64, text: &str) {
    commands.push(RenderCommand::DrawText {
        position: Point::new(x, y),
        text: text.to_owned(),
        color: ThemeToken::TextSecondary,
        font_size: LABEL_FONT,
        align: TextAlign::Left,
    });
}
