use std::collections::BTreeMap;
use std::time::Duration;

use tunelane_protocol::{NavSignal, RenderCommand};

use super::{
    HEADER_GROUP, HeaderNav, NavContext, Route, Screen, ScreenOutcome, dispatch, hand_input,
    header_outcome, header_row, measured_viewport, move_group, node_target, remember,
    settle_on_non_empty,
};
use crate::button_row::{ButtonRow, RowEvent};
use crate::catalog::Catalog;
use crate::config::DesignTokens;
use crate::focus::FocusTarget;
use crate::group::GroupNavigator;
use crate::layout::LayoutProbe;
use crate::memory::{ItemPosition, fields};
use crate::swimlane::{FixedLaneConfig, FixedSwimlane, IndexOwnership, LaneEvent};
use crate::views::{
    HEADER_BUTTON_HEIGHT, HEADER_BUTTON_WIDTH, HEADER_Y, LOWER_ROW_Y, LaneFrame, RowFrame,
    UPPER_ROW_Y, render_button_row, render_fixed_lane,
};

const CATEGORIES: usize = 1;
const CHANNELS: usize = 2;

/// Home: header, a row of genre categories and a row of channels.
///
/// Both lanes are delegated: every move is written to screen memory before
/// the lane is told about it. The channel lane remembers its position by
/// stable id so it survives the list being reordered.
pub struct HomeScreen {
    header: ButtonRow<HeaderNav>,
    categories: FixedSwimlane,
    channels: FixedSwimlane,
}

impl HomeScreen {
    pub const NAME: &'static str = "home";

    pub fn new(catalog: &dyn Catalog, tokens: &DesignTokens) -> Self {
        let config = FixedLaneConfig::from_tokens(tokens);
        Self {
            header: header_row(),
            categories: FixedSwimlane::new(
                catalog.categories(),
                IndexOwnership::Delegated,
                config,
            ),
            channels: FixedSwimlane::new(catalog.channels(), IndexOwnership::Delegated, config),
        }
    }

    pub fn categories(&self) -> &FixedSwimlane {
        &self.categories
    }

    pub fn channels(&self) -> &FixedSwimlane {
        &self.channels
    }

    fn lane_mut(&mut self, group: usize) -> Option<&mut FixedSwimlane> {
        match group {
            CATEGORIES => Some(&mut self.categories),
            CHANNELS => Some(&mut self.channels),
            _ => None,
        }
    }

    fn is_group_empty(&self, group: usize) -> bool {
        match group {
            CATEGORIES => self.categories.is_empty(),
            CHANNELS => self.channels.is_empty(),
            _ => false,
        }
    }

    fn remember_focus(&self, ctx: &mut NavContext<'_>) {
        let indices: BTreeMap<usize, usize> = [
            (HEADER_GROUP, self.header.focused_index()),
            (CATEGORIES, self.categories.focused_index()),
            (CHANNELS, self.channels.focused_index()),
        ]
        .into();
        remember(ctx.memory, Self::NAME, fields::LAST_FOCUSED_ITEM_INDICES, &indices);
        if let Some(item) = self.channels.focused_item() {
            let position = ItemPosition::new(item.id.clone(), self.channels.target_offset());
            remember(ctx.memory, Self::NAME, fields::SWIMLANE_POSITION, &position);
        }
    }

    fn on_lane_event(
        &mut self,
        group: usize,
        event: LaneEvent,
        ctx: &mut NavContext<'_>,
    ) -> ScreenOutcome {
        match event {
            LaneEvent::FocusRequested(index) => {
                if let Some(lane) = self.lane_mut(group) {
                    lane.set_focused_index(index);
                }
                self.remember_focus(ctx);
                ScreenOutcome::Handled
            }
            LaneEvent::Selected { id, .. } if group == CATEGORIES => {
                ScreenOutcome::Navigate(Route::SearchBrowse { filter: Some(id) })
            }
            LaneEvent::Selected { id, .. } => {
                ScreenOutcome::Navigate(Route::ChannelInfo { channel: id })
            }
            LaneEvent::FocusChanged(_) => ScreenOutcome::Handled,
            LaneEvent::MoreRequested => ScreenOutcome::Ignored,
        }
    }
}

impl Screen for HomeScreen {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn route(&self) -> Route {
        Route::Home
    }

    fn group_count(&self) -> usize {
        3
    }

    fn enter(&mut self, ctx: &mut NavContext<'_>) {
        let indices: BTreeMap<usize, usize> = ctx
            .memory
            .get(Self::NAME, fields::LAST_FOCUSED_ITEM_INDICES)
            .unwrap_or_default();
        let index_of = |group| indices.get(&group).copied().unwrap_or(0);

        self.header.set_focused_index(index_of(HEADER_GROUP));
        self.categories.restore(index_of(CATEGORIES), None);

        let remembered = ctx
            .memory
            .item_position(Self::NAME, fields::SWIMLANE_POSITION)
            .and_then(|pos| Some((self.channels.index_of(&pos.stable_id)?, pos.offset_px)));
        match remembered {
            Some((index, offset)) => self.channels.restore(index, Some(offset)),
            None => self.channels.restore(index_of(CHANNELS), None),
        }

        let group = ctx
            .memory
            .get(Self::NAME, fields::LAST_FOCUSED_GROUP_INDEX)
            .unwrap_or(CATEGORIES);
        ctx.groups.set_active(group);
        settle_on_non_empty(ctx.groups, |g| self.is_group_empty(g));
        self.sync_input_focus(ctx.groups);
        tracing::info!(screen = Self::NAME, group = ctx.groups.active(), "entered screen");
    }

    fn exit(&mut self, ctx: &mut NavContext<'_>) {
        self.remember_focus(ctx);
        remember(
            ctx.memory,
            Self::NAME,
            fields::LAST_FOCUSED_GROUP_INDEX,
            &ctx.groups.active(),
        );
        self.header.set_input_focus(false);
        self.categories.set_input_focus(false);
        self.channels.set_input_focus(false);
        tracing::info!(screen = Self::NAME, "left screen");
    }

    fn handle(&mut self, signal: NavSignal, ctx: &mut NavContext<'_>) -> ScreenOutcome {
        if let Some(direction) = signal.vertical() {
            let Some((_, to)) = move_group(ctx.groups, direction, |g| self.is_group_empty(g))
            else {
                return ScreenOutcome::Ignored;
            };
            remember(ctx.memory, Self::NAME, fields::LAST_FOCUSED_GROUP_INDEX, &to);
            self.sync_input_focus(ctx.groups);
            return ScreenOutcome::Handled;
        }

        if signal == NavSignal::Back {
            return ScreenOutcome::Back;
        }
        let group = ctx.groups.active();
        if group == HEADER_GROUP {
            return match dispatch(&mut self.header, signal) {
                Some(RowEvent::FocusChanged(_)) => {
                    self.remember_focus(ctx);
                    ScreenOutcome::Handled
                }
                Some(RowEvent::Pressed(nav)) => header_outcome(nav, Some(HeaderNav::Home)),
                None => ScreenOutcome::Ignored,
            };
        }
        match self.lane_mut(group).and_then(|lane| dispatch(lane, signal)) {
            Some(event) => self.on_lane_event(group, event, ctx),
            None => ScreenOutcome::Ignored,
        }
    }

    fn sync_input_focus(&mut self, groups: &GroupNavigator) {
        let active = groups.active();
        hand_input(&mut self.header, HEADER_GROUP, active);
        hand_input(&mut self.categories, CATEGORIES, active);
        hand_input(&mut self.channels, CHANNELS, active);
    }

    fn focus_target(&self, groups: &GroupNavigator) -> Option<FocusTarget> {
        let group = groups.active();
        match group {
            HEADER_GROUP => Some(node_target(Self::NAME, group, &self.header)),
            CATEGORIES => Some(node_target(Self::NAME, group, &self.categories)),
            CHANNELS => Some(node_target(Self::NAME, group, &self.channels)),
            _ => None,
        }
    }

    fn report_layout(&mut self, probe: &dyn LayoutProbe, tokens: &DesignTokens) {
        for group in [CATEGORIES, CHANNELS] {
            if let (Some(viewport), Some(lane)) =
                (measured_viewport(probe, group, tokens), self.lane_mut(group))
            {
                lane.set_viewport(viewport);
            }
        }
    }

    fn tick(&mut self, dt: Duration) {
        self.categories.tick(dt);
        self.channels.tick(dt);
    }

    fn render(&self, groups: &GroupNavigator, tokens: &DesignTokens) -> Vec<RenderCommand> {
        let _span = tracing::debug_span!("render_screen", screen = Self::NAME).entered();
        let active = groups.active();
        let mut commands = render_button_row(
            &RowFrame {
                id: "home/header".into(),
                x: tokens.side_padding,
                y: HEADER_Y,
                button_width: HEADER_BUTTON_WIDTH,
                button_height: HEADER_BUTTON_HEIGHT,
                gap: tokens.fixed_gap,
                focused: active == HEADER_GROUP,
            },
            &self.header,
        );
        commands.extend(render_fixed_lane(
            &LaneFrame {
                id: "home/categories".into(),
                label: Some("Genres".into()),
                y: UPPER_ROW_Y,
                height: tokens.card_height,
                focused: active == CATEGORIES,
            },
            &self.categories,
        ));
        commands.extend(render_fixed_lane(
            &LaneFrame {
                id: "home/channels".into(),
                label: Some("Channels".into()),
                y: LOWER_ROW_Y,
                height: tokens.card_height,
                focused: active == CHANNELS,
            },
            &self.channels,
        ));
        commands
    }
}
