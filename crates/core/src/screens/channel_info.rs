use std::time::Duration;

use tunelane_protocol::{
    FocusableItem, NavSignal, Point, RenderCommand, StableId, TextAlign, ThemeToken,
};

use super::{
    HEADER_GROUP, HeaderNav, NavContext, Route, Screen, ScreenOutcome, dispatch, hand_input,
    header_outcome, header_row, measured_viewport, move_group, node_target, remember,
    settle_on_non_empty,
};
use crate::button_row::{ButtonRow, RowEvent};
use crate::catalog::Catalog;
use crate::config::DesignTokens;
use crate::focus::FocusTarget;
use crate::group::{GroupFocusMemory, GroupNavigator};
use crate::layout::LayoutProbe;
use crate::memory::fields;
use crate::swimlane::{FixedLaneConfig, FixedSwimlane, IndexOwnership, LaneEvent};
use crate::views::{
    HEADER_BUTTON_HEIGHT, HEADER_BUTTON_WIDTH, HEADER_Y, LOWER_ROW_Y, LaneFrame, RowFrame,
    render_button_row, render_fixed_lane,
};

const ACTIONS: usize = 1;
const TRACKS: usize = 2;
const TITLE_Y: f64 = 230.0;
const ACTIONS_Y: f64 = 340.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelAction {
    Play,
    Like,
}

/// Detail page of one channel: play/like buttons above its track list.
pub struct ChannelInfoScreen {
    name: String,
    channel: StableId,
    details: Option<FocusableItem>,
    header: ButtonRow<HeaderNav>,
    actions: ButtonRow<ChannelAction>,
    tracks: FixedSwimlane,
}

impl ChannelInfoScreen {
    /// Memory key for the page of `channel`.
    pub fn name_for(channel: &StableId) -> String {
        format!("channel-info/{channel}")
    }

    pub fn new(catalog: &dyn Catalog, tokens: &DesignTokens, channel: StableId) -> Self {
        let details = catalog.channel(&channel);
        if details.is_none() {
            tracing::warn!(%channel, "channel not in catalog");
        }
        Self {
            name: Self::name_for(&channel),
            details,
            header: header_row(),
            actions: ButtonRow::new(vec![
                (ChannelAction::Play, "Play".to_owned()),
                (ChannelAction::Like, "Like".to_owned()),
            ]),
            tracks: FixedSwimlane::new(
                catalog.tracks(&channel),
                IndexOwnership::Autonomous,
                FixedLaneConfig::from_tokens(tokens),
            ),
            channel,
        }
    }

    pub fn channel(&self) -> &StableId {
        &self.channel
    }

    pub fn actions(&self) -> &ButtonRow<ChannelAction> {
        &self.actions
    }

    pub fn tracks(&self) -> &FixedSwimlane {
        &self.tracks
    }

    fn is_group_empty(&self, group: usize) -> bool {
        group == TRACKS && self.tracks.is_empty()
    }

    fn remember_tracks(&self, ctx: &mut NavContext<'_>) {
        ctx.groups.set_group_focus_memory(
            TRACKS,
            GroupFocusMemory {
                focused_index: self.tracks.focused_index(),
                offset_px: self.tracks.target_offset(),
            },
        );
    }

    fn play_from(&self, index: usize) -> ScreenOutcome {
        if self.tracks.is_empty() {
            return ScreenOutcome::Ignored;
        }
        ScreenOutcome::Play {
            queue: self.tracks.items().to_vec(),
            index,
        }
    }
}

impl Screen for ChannelInfoScreen {
    fn name(&self) -> &str {
        &self.name
    }

    fn route(&self) -> Route {
        Route::ChannelInfo {
            channel: self.channel.clone(),
        }
    }

    fn group_count(&self) -> usize {
        3
    }

    fn enter(&mut self, ctx: &mut NavContext<'_>) {
        let remembered = ctx.groups.group_focus_memory(TRACKS);
        self.tracks
            .restore(remembered.focused_index, Some(remembered.offset_px));
        self.actions
            .set_focused_index(ctx.groups.group_focus_memory(ACTIONS).focused_index);

        let group = ctx
            .memory
            .get(&self.name, fields::LAST_FOCUSED_GROUP_INDEX)
            .unwrap_or(ACTIONS);
        ctx.groups.set_active(group);
        settle_on_non_empty(ctx.groups, |g| self.is_group_empty(g));
        self.sync_input_focus(ctx.groups);
        tracing::info!(screen = %self.name, group = ctx.groups.active(), "entered screen");
    }

    fn exit(&mut self, ctx: &mut NavContext<'_>) {
        self.remember_tracks(ctx);
        ctx.groups.set_group_focus_memory(
            ACTIONS,
            GroupFocusMemory {
                focused_index: self.actions.focused_index(),
                offset_px: 0.0,
            },
        );
        remember(
            ctx.memory,
            &self.name,
            fields::LAST_FOCUSED_GROUP_INDEX,
            &ctx.groups.active(),
        );
        self.header.set_input_focus(false);
        self.actions.set_input_focus(false);
        self.tracks.set_input_focus(false);
        tracing::info!(screen = %self.name, "left screen");
    }

    fn handle(&mut self, signal: NavSignal, ctx: &mut NavContext<'_>) -> ScreenOutcome {
        if let Some(direction) = signal.vertical() {
            let Some((_, to)) = move_group(ctx.groups, direction, |g| self.is_group_empty(g))
            else {
                return ScreenOutcome::Ignored;
            };
            remember(ctx.memory, &self.name, fields::LAST_FOCUSED_GROUP_INDEX, &to);
            self.sync_input_focus(ctx.groups);
            return ScreenOutcome::Handled;
        }

        if signal == NavSignal::Back {
            return ScreenOutcome::Back;
        }

        match ctx.groups.active() {
            HEADER_GROUP => match dispatch(&mut self.header, signal) {
                Some(RowEvent::FocusChanged(_)) => ScreenOutcome::Handled,
                Some(RowEvent::Pressed(nav)) => header_outcome(nav, None),
                None => ScreenOutcome::Ignored,
            },
            ACTIONS => match dispatch(&mut self.actions, signal) {
                Some(RowEvent::FocusChanged(_)) => ScreenOutcome::Handled,
                Some(RowEvent::Pressed(ChannelAction::Play)) => self.play_from(0),
                Some(RowEvent::Pressed(ChannelAction::Like)) => {
                    ScreenOutcome::ToggleLike(self.channel.clone())
                }
                None => ScreenOutcome::Ignored,
            },
            TRACKS => match dispatch(&mut self.tracks, signal) {
                Some(LaneEvent::FocusChanged(_)) => {
                    self.remember_tracks(ctx);
                    ScreenOutcome::Handled
                }
                Some(LaneEvent::Selected { index, .. }) => self.play_from(index),
                Some(_) => ScreenOutcome::Handled,
                None => ScreenOutcome::Ignored,
            },
            _ => ScreenOutcome::Ignored,
        }
    }

    fn sync_input_focus(&mut self, groups: &GroupNavigator) {
        let active = groups.active();
        hand_input(&mut self.header, HEADER_GROUP, active);
        hand_input(&mut self.actions, ACTIONS, active);
        hand_input(&mut self.tracks, TRACKS, active);
    }

    fn focus_target(&self, groups: &GroupNavigator) -> Option<FocusTarget> {
        let group = groups.active();
        match group {
            HEADER_GROUP => Some(node_target(&self.name, group, &self.header)),
            ACTIONS => Some(node_target(&self.name, group, &self.actions)),
            TRACKS => Some(node_target(&self.name, group, &self.tracks)),
            _ => None,
        }
    }

    fn report_layout(&mut self, probe: &dyn LayoutProbe, tokens: &DesignTokens) {
        if let Some(viewport) = measured_viewport(probe, TRACKS, tokens) {
            self.tracks.set_viewport(viewport);
        }
    }

    fn tick(&mut self, dt: Duration) {
        self.tracks.tick(dt);
    }

    fn render(&self, groups: &GroupNavigator, tokens: &DesignTokens) -> Vec<RenderCommand> {
        let _span = tracing::debug_span!("render_screen", screen = %self.name).entered();
        let active = groups.active();
        let mut commands = render_button_row(
            &RowFrame {
                id: format!("{}/header", self.name),
                x: tokens.side_padding,
                y: HEADER_Y,
                button_width: HEADER_BUTTON_WIDTH,
                button_height: HEADER_BUTTON_HEIGHT,
                gap: tokens.fixed_gap,
                focused: active == HEADER_GROUP,
            },
            &self.header,
        );

        let (title, subtitle) = match &self.details {
            Some(item) => (item.title.as_str(), item.subtitle.as_deref()),
            None => ("Unknown channel", None),
        };
        commands.push(RenderCommand::DrawText {
            position: Point::new(tokens.side_padding, TITLE_Y),
            text: title.to_owned(),
            color: ThemeToken::TextPrimary,
            font_size: 56.0,
            align: TextAlign::Left,
        });
        if let Some(subtitle) = subtitle {
            commands.push(RenderCommand::DrawText {
                position: Point::new(tokens.side_padding, TITLE_Y + 50.0),
                text: subtitle.to_owned(),
                color: ThemeToken::TextSecondary,
                font_size: 28.0,
                align: TextAlign::Left,
            });
        }

        commands.extend(render_button_row(
            &RowFrame {
                id: format!("{}/actions", self.name),
                x: tokens.side_padding,
                y: ACTIONS_Y,
                button_width: HEADER_BUTTON_WIDTH,
                button_height: HEADER_BUTTON_HEIGHT,
                gap: tokens.fixed_gap,
                focused: active == ACTIONS,
            },
            &self.actions,
        ));
        commands.extend(render_fixed_lane(
            &LaneFrame {
                id: format!("{}/tracks", self.name),
                label: Some("Tracks".into()),
                y: LOWER_ROW_Y,
                height: tokens.card_height,
                focused: active == TRACKS,
            },
            &self.tracks,
        ));
        commands
    }
}
