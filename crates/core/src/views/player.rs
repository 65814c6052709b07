use tunelane_protocol::{FocusableItem, Point, Rect, RenderCommand, Tag, TextAlign, ThemeToken};

use super::{MINI_PLAYER_HEIGHT, RowFrame, render_button_row};
use crate::config::DesignTokens;
use crate::overlay::{
    HEADER_ACTIONS, HeaderAction, OverlayGroup, OverlayPhase, PLAYBACK_CONTROLS, PlayerOverlay,
    PlaybackControl,
};
use crate::screens::MiniPlayer;

const PANEL_MARGIN_X: f64 = 160.0;
const PANEL_MARGIN_Y: f64 = 90.0;
const CONTROL_WIDTH: f64 = 220.0;
const CONTROL_HEIGHT: f64 = 80.0;
const CONTROL_GAP: f64 = 32.0;

/// Playback state the player views display.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerView<'a> {
    pub now_playing: Option<&'a FocusableItem>,
    pub playing: bool,
    pub liked: bool,
    pub show_info: bool,
}

impl PlayerView<'_> {
    fn status(&self) -> &'static str {
        if self.playing { "Playing" } else { "Paused" }
    }
}

pub fn render_mini_player(
    mini: &MiniPlayer,
    view: &PlayerView<'_>,
    focused: bool,
    tokens: &DesignTokens,
) -> Vec<RenderCommand> {
    let Some(item) = view.now_playing else {
        return Vec::new();
    };
    let y = tokens.canvas_height - MINI_PLAYER_HEIGHT;
    let mut commands = vec![
        RenderCommand::BeginGroup {
            id: "mini-player".into(),
            label: Some("Now playing".into()),
            focused,
        },
        RenderCommand::DrawRect {
            rect: Rect::new(0.0, y, tokens.canvas_width, MINI_PLAYER_HEIGHT),
            color: ThemeToken::MiniPlayerBackground,
            border_color: Some(ThemeToken::Border),
            label: None,
            item_id: None,
        },
        RenderCommand::DrawText {
            position: Point::new(tokens.side_padding, y + 48.0),
            text: item.title.clone(),
            color: ThemeToken::TextPrimary,
            font_size: 30.0,
            align: TextAlign::Left,
        },
        RenderCommand::DrawText {
            position: Point::new(tokens.side_padding, y + 84.0),
            text: view.status().to_owned(),
            color: ThemeToken::TextSecondary,
            font_size: 22.0,
            align: TextAlign::Left,
        },
    ];

    let buttons = mini.row().len() as f64;
    let row_width = buttons * CONTROL_WIDTH + (buttons - 1.0).max(0.0) * CONTROL_GAP;
    let frame = RowFrame {
        id: "mini-player/controls".into(),
        x: tokens.canvas_width - tokens.side_padding - row_width,
        y: y + (MINI_PLAYER_HEIGHT - 64.0) / 2.0,
        button_width: CONTROL_WIDTH,
        button_height: 64.0,
        gap: CONTROL_GAP,
        focused,
    };
    commands.extend(render_button_row(&frame, mini.row()));
    commands.push(RenderCommand::EndGroup);
    commands
}

fn push_button(commands: &mut Vec<RenderCommand>, rect: Rect, label: &str, focused: bool) {
    commands.push(RenderCommand::DrawRect {
        rect,
        color: if focused {
            ThemeToken::ControlFocused
        } else {
            ThemeToken::ControlIdle
        },
        border_color: focused.then_some(ThemeToken::FocusRing),
        label: None,
        item_id: None,
    });
    commands.push(RenderCommand::DrawText {
        position: Point::new(rect.x + rect.w / 2.0, rect.y + rect.h * 0.6),
        text: label.to_owned(),
        color: ThemeToken::TextPrimary,
        font_size: 24.0,
        align: TextAlign::Center,
    });
}

fn header_label(action: HeaderAction, view: &PlayerView<'_>) -> &'static str {
    match action {
        HeaderAction::Info if view.show_info => "Hide info",
        HeaderAction::Info => "Info",
        HeaderAction::Like if view.liked => "Liked",
        HeaderAction::Like => "Like",
    }
}

fn control_label(control: PlaybackControl, view: &PlayerView<'_>) -> &'static str {
    match control {
        PlaybackControl::Previous => "Previous",
        PlaybackControl::PlayPause if view.playing => "Pause",
        PlaybackControl::PlayPause => "Play",
        PlaybackControl::Next => "Next",
    }
}

/// Render the player overlay. Focus rings only appear once the entry
/// animation has finished and the overlay is interactive.
pub fn render_player_overlay(
    overlay: &PlayerOverlay,
    view: &PlayerView<'_>,
    tokens: &DesignTokens,
) -> Vec<RenderCommand> {
    if overlay.phase() == OverlayPhase::Closed {
        return Vec::new();
    }
    let _span = tracing::debug_span!("render_player_overlay", phase = ?overlay.phase()).entered();
    let interactive = overlay.phase() == OverlayPhase::Open;
    let is_focused = |group: OverlayGroup, index: usize| {
        interactive && overlay.active_group() == group && overlay.focused_index() == index
    };

    let (w, h) = (tokens.canvas_width, tokens.canvas_height);
    let panel = Rect::new(
        PANEL_MARGIN_X,
        PANEL_MARGIN_Y,
        w - 2.0 * PANEL_MARGIN_X,
        h - 2.0 * PANEL_MARGIN_Y,
    );
    let mut commands = vec![
        RenderCommand::BeginGroup {
            id: "player".into(),
            label: Some("Player".into()),
            focused: overlay.is_modal(),
        },
        RenderCommand::DrawRect {
            rect: Rect::new(0.0, 0.0, w, h),
            color: ThemeToken::OverlayScrim,
            border_color: None,
            label: None,
            item_id: None,
        },
        RenderCommand::DrawRect {
            rect: panel,
            color: ThemeToken::OverlayPanel,
            border_color: Some(ThemeToken::Border),
            label: None,
            item_id: None,
        },
    ];

    let header_y = panel.y + 40.0;
    for (i, action) in HEADER_ACTIONS.iter().enumerate() {
        let from_right = (HEADER_ACTIONS.len() - i) as f64;
        let x = panel.right() - 40.0 - from_right * CONTROL_WIDTH
            - (from_right - 1.0) * CONTROL_GAP;
        let rect = Rect::new(x, header_y, CONTROL_WIDTH, CONTROL_HEIGHT);
        let focused = is_focused(OverlayGroup::Header, i);
        push_button(&mut commands, rect, header_label(*action, view), focused);
    }

    let center = panel.x + panel.w / 2.0;
    let (title, subtitle) = match view.now_playing {
        Some(item) => (item.title.as_str(), item.subtitle.as_deref()),
        None => ("Nothing playing", None),
    };
    commands.push(RenderCommand::DrawText {
        position: Point::new(center, panel.y + panel.h * 0.42),
        text: title.to_owned(),
        color: ThemeToken::TextPrimary,
        font_size: 56.0,
        align: TextAlign::Center,
    });
    if let Some(subtitle) = subtitle {
        commands.push(RenderCommand::DrawText {
            position: Point::new(center, panel.y + panel.h * 0.42 + 64.0),
            text: subtitle.to_owned(),
            color: ThemeToken::TextSecondary,
            font_size: 32.0,
            align: TextAlign::Center,
        });
    }
    if view.show_info {
        let tags = view
            .now_playing
            .map(|item| {
                let labels: Vec<&str> = item.tags.iter().map(Tag::label).collect();
                labels.join(" · ")
            })
            .unwrap_or_default();
        commands.push(RenderCommand::DrawText {
            position: Point::new(center, panel.y + panel.h * 0.42 + 112.0),
            text: if tags.is_empty() { "No details".to_owned() } else { tags },
            color: ThemeToken::TextMuted,
            font_size: 24.0,
            align: TextAlign::Center,
        });
    }

    let controls = PLAYBACK_CONTROLS.len() as f64;
    let row_width = controls * CONTROL_WIDTH + (controls - 1.0) * CONTROL_GAP;
    let controls_y = panel.y + panel.h - 40.0 - CONTROL_HEIGHT;
    for (i, control) in PLAYBACK_CONTROLS.iter().enumerate() {
        let x = center - row_width / 2.0 + i as f64 * (CONTROL_WIDTH + CONTROL_GAP);
        let rect = Rect::new(x, controls_y, CONTROL_WIDTH, CONTROL_HEIGHT);
        let focused = is_focused(OverlayGroup::Controls, i);
        push_button(&mut commands, rect, control_label(*control, view), focused);
    }

    commands.push(RenderCommand::EndGroup);
    commands
}
