//! Screen controllers.
//!
//! A screen composes components into vertically stacked focus groups, maps
//! signals onto them and reads/writes its memory. Screens are rebuilt every
//! time they are entered; everything that must survive navigation lives in
//! the [`NavContext`] the session hands them.

mod channel_info;
mod home;
mod mini_player;
mod search_browse;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tunelane_protocol::{FocusableItem, NavSignal, RenderCommand, StableId, Vertical, Viewport};

pub use channel_info::{ChannelAction, ChannelInfoScreen};
pub use home::HomeScreen;
pub use mini_player::{MiniAction, MiniPlayer};
pub use search_browse::{ResultsMode, SearchBrowseScreen};

use crate::button_row::ButtonRow;
use crate::catalog::Catalog;
use crate::config::DesignTokens;
use crate::focus::{FocusNode, FocusTarget};
use crate::group::GroupNavigator;
use crate::layout::LayoutProbe;
use crate::memory::ScreenMemory;

/// Every screen starts with the navigation header.
pub const HEADER_GROUP: usize = 0;

/// Where the router can take the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "kebab-case")]
pub enum Route {
    Home,
    SearchBrowse { filter: Option<StableId> },
    ChannelInfo { channel: StableId },
}

impl Route {
    /// Memory key of the screen this route shows. Channel pages remember
    /// their state per channel.
    pub fn screen_name(&self) -> String {
        match self {
            Route::Home => HomeScreen::NAME.to_owned(),
            Route::SearchBrowse { .. } => SearchBrowseScreen::NAME.to_owned(),
            Route::ChannelInfo { channel } => ChannelInfoScreen::name_for(channel),
        }
    }

    pub fn build(&self, catalog: &dyn Catalog, tokens: &DesignTokens) -> Box<dyn Screen> {
        match self {
            Route::Home => Box::new(HomeScreen::new(catalog, tokens)),
            Route::SearchBrowse { filter } => {
                Box::new(SearchBrowseScreen::new(catalog, tokens, filter.clone()))
            }
            Route::ChannelInfo { channel } => {
                Box::new(ChannelInfoScreen::new(catalog, tokens, channel.clone()))
            }
        }
    }
}

/// What a screen asks the session to do after handling a signal.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenOutcome {
    /// Nothing reacted.
    Ignored,
    Handled,
    Navigate(Route),
    Back,
    /// Start playing `queue` at `index` and open the player.
    Play {
        queue: Vec<FocusableItem>,
        index: usize,
    },
    ToggleLike(StableId),
    OpenPlayer,
    TogglePlayback,
}

/// Session state a screen may touch while handling input.
pub struct NavContext<'a> {
    pub memory: &'a mut ScreenMemory,
    pub groups: &'a mut GroupNavigator,
    pub tokens: &'a DesignTokens,
    pub catalog: &'a dyn Catalog,
}

pub trait Screen {
    /// Key of this screen's memory record and navigator.
    fn name(&self) -> &str;

    fn route(&self) -> Route;

    /// Groups owned by the screen, not counting the floating mini-player.
    fn group_count(&self) -> usize;

    /// Restore remembered focus and claim input for the active group.
    fn enter(&mut self, ctx: &mut NavContext<'_>);

    fn exit(&mut self, ctx: &mut NavContext<'_>);

    fn handle(&mut self, signal: NavSignal, ctx: &mut NavContext<'_>) -> ScreenOutcome;

    /// Give input ownership to the component backing the active group and
    /// take it from all others.
    fn sync_input_focus(&mut self, groups: &GroupNavigator);

    /// Platform focus target for the active group, if the screen owns it.
    fn focus_target(&self, groups: &GroupNavigator) -> Option<FocusTarget>;

    fn report_layout(&mut self, probe: &dyn LayoutProbe, tokens: &DesignTokens);

    fn tick(&mut self, dt: Duration);

    fn render(&self, groups: &GroupNavigator, tokens: &DesignTokens) -> Vec<RenderCommand>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderNav {
    Home,
    Search,
}

pub(crate) fn header_row() -> ButtonRow<HeaderNav> {
    ButtonRow::new(vec![
        (HeaderNav::Home, "Home".to_owned()),
        (HeaderNav::Search, "Search".to_owned()),
    ])
}

/// Outcome of pressing a header button while on `current`.
pub(crate) fn header_outcome(pressed: HeaderNav, current: Option<HeaderNav>) -> ScreenOutcome {
    if Some(pressed) == current {
        return ScreenOutcome::Handled;
    }
    match pressed {
        HeaderNav::Home => ScreenOutcome::Navigate(Route::Home),
        HeaderNav::Search => ScreenOutcome::Navigate(Route::SearchBrowse { filter: None }),
    }
}

/// Move to the nearest non-empty group in `direction`. Returns the
/// `(from, to)` pair when the active group changed; a move that would land
/// on an empty edge group is abandoned.
pub(crate) fn move_group(
    groups: &mut GroupNavigator,
    direction: Vertical,
    is_empty: impl Fn(usize) -> bool,
) -> Option<(usize, usize)> {
    let from = groups.clamp();
    loop {
        let before = groups.active();
        let to = groups.move_vertical(direction);
        if to == before {
            groups.set_active(from);
            return None;
        }
        if !is_empty(to) {
            tracing::debug!(from, to, "group focus moved");
            return Some((from, to));
        }
    }
}

/// If the active group is empty, fall back to the first non-empty one.
pub(crate) fn settle_on_non_empty(
    groups: &mut GroupNavigator,
    is_empty: impl Fn(usize) -> bool,
) {
    let active = groups.clamp();
    if is_empty(active) {
        let fallback = (0..groups.group_count())
            .find(|g| !is_empty(*g))
            .unwrap_or(HEADER_GROUP);
        groups.set_active(fallback);
    }
}

/// Forward a horizontal move or a select to the component backing the
/// active group.
pub(crate) fn dispatch<N: FocusNode>(node: &mut N, signal: NavSignal) -> Option<N::Event> {
    match signal {
        NavSignal::Select => node.on_activate(),
        _ => signal.horizontal().and_then(|direction| node.on_directional(direction)),
    }
}

/// Give `node` input ownership exactly when its group is the active one.
pub(crate) fn hand_input<N: FocusNode>(node: &mut N, group: usize, active: usize) {
    node.on_input_focus(group == active);
}

/// Platform focus target of `node`: its focused entry, or the container
/// when it has nothing to focus.
pub(crate) fn node_target<N: FocusNode>(screen: &str, group: usize, node: &N) -> FocusTarget {
    if node.is_empty() {
        FocusTarget::Container {
            screen: screen.to_owned(),
            group,
        }
    } else {
        element(screen, group, node.focused_index())
    }
}

pub(crate) fn element(screen: &str, group: usize, index: usize) -> FocusTarget {
    FocusTarget::Element {
        screen: screen.to_owned(),
        group,
        index,
    }
}

/// Measured viewport of the lane in `group`, if the renderer reported one.
pub(crate) fn measured_viewport(
    probe: &dyn LayoutProbe,
    group: usize,
    tokens: &DesignTokens,
) -> Option<Viewport> {
    probe
        .container_width(group)
        .map(|width| Viewport::padded(width, tokens.side_padding))
}

/// Write a memory field, logging instead of failing on encode errors.
pub(crate) fn remember<T: Serialize>(
    memory: &mut ScreenMemory,
    screen: &str,
    field: &str,
    value: &T,
) {
    if let Err(err) = memory.set(screen, field, value) {
        tracing::warn!(screen, field, %err, "could not store screen memory");
    }
}
