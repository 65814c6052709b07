use std::time::Duration;

use tunelane_protocol::{NavSignal, RenderCommand, StableId};

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
use crate::swimlane::{
    FixedLaneConfig, FixedSwimlane, IndexOwnership, LaneEvent, VariableLaneConfig,
    VariableSwimlane,
};
use crate::views::{
    CHIP_HEIGHT, HEADER_BUTTON_HEIGHT, HEADER_BUTTON_WIDTH, HEADER_Y, LaneFrame, RowFrame,
    UPPER_ROW_Y, render_button_row, render_fixed_lane, render_variable_lane,
};

const FILTERS: usize = 1;
const RESULTS: usize = 2;
const RESULTS_Y: f64 = UPPER_ROW_Y + CHIP_HEIGHT + 140.0;

/// What the results lane is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsMode {
    /// Channels matching the filter (every channel for `None`).
    Filtered(Option<StableId>),
    /// Every filter as a card, after "More" was chosen.
    AllFilters,
}

/// Search/browse: header, a row of filter chips and a row of results.
///
/// The applied filter lives in screen memory; lane positions live in the
/// screen's group navigator.
pub struct SearchBrowseScreen {
    header: ButtonRow<HeaderNav>,
    filters: VariableSwimlane,
    results: FixedSwimlane,
    requested_filter: Option<StableId>,
    mode: ResultsMode,
}

impl SearchBrowseScreen {
    pub const NAME: &'static str = "search";

    pub fn new(catalog: &dyn Catalog, tokens: &DesignTokens, filter: Option<StableId>) -> Self {
        Self {
            header: header_row(),
            filters: VariableSwimlane::new(
                catalog.filters(),
                IndexOwnership::Autonomous,
                VariableLaneConfig::from_tokens(tokens),
            ),
            results: FixedSwimlane::new(
                Vec::new(),
                IndexOwnership::Autonomous,
                FixedLaneConfig::from_tokens(tokens),
            ),
            requested_filter: filter,
            mode: ResultsMode::Filtered(None),
        }
    }

    pub fn filters(&self) -> &VariableSwimlane {
        &self.filters
    }

    pub fn results(&self) -> &FixedSwimlane {
        &self.results
    }

    pub fn mode(&self) -> &ResultsMode {
        &self.mode
    }

    /// Currently applied filter.
    pub fn active_filter(&self) -> Option<&StableId> {
        match &self.mode {
            ResultsMode::Filtered(filter) => filter.as_ref(),
            ResultsMode::AllFilters => None,
        }
    }

    fn is_group_empty(&self, group: usize) -> bool {
        match group {
            FILTERS => self.filters.navigable_count() == 0,
            RESULTS => self.results.is_empty(),
            _ => false,
        }
    }

    /// Apply `filter`, refill the results and remember the choice. Unknown
    /// filter ids apply no filter.
    fn apply_filter(&mut self, filter: Option<StableId>, ctx: &mut NavContext<'_>) {
        let active = filter.as_deref().and_then(|id| self.filters.index_of(id));
        let filter = active.and(filter);
        tracing::debug!(filter = ?filter, "applying filter");
        self.filters.set_active_index(active);
        self.results.replace_items(ctx.catalog.results(filter.as_ref()));
        ctx.groups
            .set_group_focus_memory(RESULTS, GroupFocusMemory::default());
        remember(ctx.memory, Self::NAME, fields::ACTIVE_FILTER_ID, &filter);
        self.mode = ResultsMode::Filtered(filter);
    }

    fn show_all_filters(&mut self, ctx: &mut NavContext<'_>) {
        self.results.replace_items(ctx.catalog.filters());
        ctx.groups
            .set_group_focus_memory(RESULTS, GroupFocusMemory::default());
        self.mode = ResultsMode::AllFilters;
    }

    fn remember_lane(&self, group: usize, ctx: &mut NavContext<'_>) {
        let memory = match group {
            FILTERS => GroupFocusMemory {
                focused_index: self.filters.focused_index(),
                offset_px: self.filters.target_offset(),
            },
            RESULTS => GroupFocusMemory {
                focused_index: self.results.focused_index(),
                offset_px: self.results.target_offset(),
            },
            _ => return,
        };
        ctx.groups.set_group_focus_memory(group, memory);
    }

    fn on_lane_event(
        &mut self,
        group: usize,
        event: LaneEvent,
        ctx: &mut NavContext<'_>,
    ) -> ScreenOutcome {
        match (group, event) {
            (_, LaneEvent::FocusChanged(_) | LaneEvent::FocusRequested(_)) => {
                self.remember_lane(group, ctx);
                ScreenOutcome::Handled
            }
            (FILTERS, LaneEvent::Selected { id, .. }) => {
                self.apply_filter(Some(id), ctx);
                ScreenOutcome::Handled
            }
            (FILTERS, LaneEvent::MoreRequested) => {
                self.show_all_filters(ctx);
                ScreenOutcome::Handled
            }
            (_, LaneEvent::Selected { id, .. }) => match self.mode {
                ResultsMode::AllFilters => {
                    self.apply_filter(Some(id), ctx);
                    ScreenOutcome::Handled
                }
                ResultsMode::Filtered(_) => {
                    ScreenOutcome::Navigate(Route::ChannelInfo { channel: id })
                }
            },
            _ => ScreenOutcome::Handled,
        }
    }
}

impl Screen for SearchBrowseScreen {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn route(&self) -> Route {
        Route::SearchBrowse {
            filter: self.active_filter().cloned(),
        }
    }

    fn group_count(&self) -> usize {
        3
    }

    fn enter(&mut self, ctx: &mut NavContext<'_>) {
        let first_visit = !ctx.memory.has_record(Self::NAME);
        let remembered: Option<StableId> = ctx
            .memory
            .get::<Option<StableId>>(Self::NAME, fields::ACTIVE_FILTER_ID)
            .flatten();
        let filter = self.requested_filter.clone().or_else(|| remembered.clone());
        let results_memory = ctx.groups.group_focus_memory(RESULTS);

        self.apply_filter(filter, ctx);
        if self.active_filter() == remembered.as_ref() {
            self.results
                .restore(results_memory.focused_index, Some(results_memory.offset_px));
            ctx.groups.set_group_focus_memory(RESULTS, results_memory);
        } else {
            self.results.restore(0, None);
        }

        let requested_applied = self.requested_filter.is_some()
            && self.active_filter() == self.requested_filter.as_ref();
        let filter_focus = if first_visit || requested_applied {
            self.filters.active_index().unwrap_or(0)
        } else {
            ctx.groups.group_focus_memory(FILTERS).focused_index
        };
        self.filters.restore(filter_focus);

        if first_visit {
            ctx.groups.set_active(FILTERS);
        }
        settle_on_non_empty(ctx.groups, |g| self.is_group_empty(g));
        self.sync_input_focus(ctx.groups);
        tracing::info!(
            screen = Self::NAME,
            group = ctx.groups.active(),
            filter = ?self.active_filter(),
            "entered screen"
        );
    }

    fn exit(&mut self, ctx: &mut NavContext<'_>) {
        self.remember_lane(FILTERS, ctx);
        self.remember_lane(RESULTS, ctx);
        self.header.set_input_focus(false);
        self.filters.set_input_focus(false);
        self.results.set_input_focus(false);
        tracing::info!(screen = Self::NAME, "left screen");
    }

    fn handle(&mut self, signal: NavSignal, ctx: &mut NavContext<'_>) -> ScreenOutcome {
        if let Some(direction) = signal.vertical() {
            if move_group(ctx.groups, direction, |g| self.is_group_empty(g)).is_none() {
                return ScreenOutcome::Ignored;
            }
            self.sync_input_focus(ctx.groups);
            return ScreenOutcome::Handled;
        }

        if signal == NavSignal::Back {
            return ScreenOutcome::Back;
        }

        let group = ctx.groups.active();
        let event = match group {
            HEADER_GROUP => {
                return match dispatch(&mut self.header, signal) {
                    Some(RowEvent::FocusChanged(_)) => ScreenOutcome::Handled,
                    Some(RowEvent::Pressed(nav)) => header_outcome(nav, Some(HeaderNav::Search)),
                    None => ScreenOutcome::Ignored,
                };
            }
            FILTERS => dispatch(&mut self.filters, signal),
            RESULTS => dispatch(&mut self.results, signal),
            _ => None,
        };
        match event {
            Some(event) => self.on_lane_event(group, event, ctx),
            None => ScreenOutcome::Ignored,
        }
    }

    fn sync_input_focus(&mut self, groups: &GroupNavigator) {
        let active = groups.active();
        hand_input(&mut self.header, HEADER_GROUP, active);
        hand_input(&mut self.filters, FILTERS, active);
        hand_input(&mut self.results, RESULTS, active);
    }

    fn focus_target(&self, groups: &GroupNavigator) -> Option<FocusTarget> {
        let group = groups.active();
        match group {
            HEADER_GROUP => Some(node_target(Self::NAME, group, &self.header)),
            FILTERS => Some(node_target(Self::NAME, group, &self.filters)),
            RESULTS => Some(node_target(Self::NAME, group, &self.results)),
            _ => None,
        }
    }

    fn report_layout(&mut self, probe: &dyn LayoutProbe, tokens: &DesignTokens) {
        if let Some(viewport) = measured_viewport(probe, FILTERS, tokens) {
            self.filters.set_viewport(viewport);
        }
        let widths: Vec<(StableId, f64)> = self
            .filters
            .items()
            .iter()
            .filter_map(|item| Some((item.id.clone(), probe.item_width(FILTERS, item)?)))
            .collect();
        for (id, width) in &widths {
            self.filters.measure_item(id, *width);
        }
        if let Some(width) = probe.more_width(FILTERS) {
            self.filters.measure_more(width);
        }
        if let Some(viewport) = measured_viewport(probe, RESULTS, tokens) {
            self.results.set_viewport(viewport);
        }
    }

    fn tick(&mut self, dt: Duration) {
        self.filters.tick(dt);
        self.results.tick(dt);
    }

    fn render(&self, groups: &GroupNavigator, tokens: &DesignTokens) -> Vec<RenderCommand> {
        let _span = tracing::debug_span!("render_screen", screen = Self::NAME).entered();
        let active = groups.active();
        let mut commands = render_button_row(
            &RowFrame {
                id: "search/header".into(),
                x: tokens.side_padding,
                y: HEADER_Y,
                button_width: HEADER_BUTTON_WIDTH,
                button_height: HEADER_BUTTON_HEIGHT,
                gap: tokens.fixed_gap,
                focused: active == HEADER_GROUP,
            },
            &self.header,
        );
        commands.extend(render_variable_lane(
            &LaneFrame {
                id: "search/filters".into(),
                label: Some("Filters".into()),
                y: UPPER_ROW_Y,
                height: CHIP_HEIGHT,
                focused: active == FILTERS,
            },
            &self.filters,
        ));
        let results_label = match &self.mode {
            ResultsMode::AllFilters => "All genres".to_owned(),
            ResultsMode::Filtered(None) => "All channels".to_owned(),
            ResultsMode::Filtered(Some(_)) => self
                .filters
                .active_index()
                .and_then(|i| self.filters.items().get(i))
                .map_or_else(|| "Results".to_owned(), |f| format!("{} channels", f.title)),
        };
        commands.extend(render_fixed_lane(
            &LaneFrame {
                id: "search/results".into(),
                label: Some(results_label),
                y: RESULTS_Y,
                height: tokens.card_height,
                focused: active == RESULTS,
            },
            &self.results,
        ));
        commands
    }
}
