//! Session orchestration.
//!
//! A [`Session`] owns every piece of state that outlives a single screen:
//! screen memory, one [`GroupNavigator`] per screen, the player overlay,
//! playback and the platform focus host. Screens are rebuilt on every visit
//! and only see the [`NavContext`] handed to them for the duration of a
//! call.
//!
//! Signals are routed overlay first (it swallows everything while modal),
//! then to the mini-player when its floating group is active, then to the
//! screen. The mini-player group exists only while something is playing and
//! the overlay is not modal. When it disappears while the overlay is modal
//! the active group index is left stale; it becomes valid again once the
//! overlay closes. When it disappears for any other reason the index is
//! reclamped right away.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use serde::Serialize;
use tunelane_protocol::{FocusableItem, NavSignal, RenderCommand, StableId};

use crate::catalog::Catalog;
use crate::config::DesignTokens;
use crate::focus::{FocusHost, FocusTarget, RecordingFocusHost};
use crate::group::GroupNavigator;
use crate::layout::LayoutProbe;
use crate::memory::ScreenMemory;
use crate::overlay::{
    HeaderAction, OverlayGroup, OverlayOutcome, OverlayPhase, OverlayTimings, PlaybackControl,
    PlayerOverlay,
};
use crate::screens::{MiniPlayer, NavContext, Route, Screen, ScreenOutcome};
use crate::views::{PlayerView, render_mini_player, render_player_overlay};

/// What is playing. There is no audio; this is the state the player views
/// display.
#[derive(Debug, Clone, Default)]
pub struct Playback {
    queue: Vec<FocusableItem>,
    position: usize,
    playing: bool,
    liked: HashSet<StableId>,
    show_info: bool,
}

impl Playback {
    pub fn now_playing(&self) -> Option<&FocusableItem> {
        self.queue.get(self.position)
    }

    pub fn queue(&self) -> &[FocusableItem] {
        &self.queue
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.liked.contains(id)
    }

    pub fn shows_info(&self) -> bool {
        self.show_info
    }

    fn start(&mut self, queue: Vec<FocusableItem>, index: usize) {
        self.position = index.min(queue.len().saturating_sub(1));
        self.queue = queue;
        self.playing = !self.queue.is_empty();
        tracing::info!(
            track = ?self.now_playing().map(|t| &t.id),
            queued = self.queue.len(),
            "playback started"
        );
    }

    fn stop(&mut self) {
        self.queue.clear();
        self.position = 0;
        self.playing = false;
        self.show_info = false;
    }

    fn toggle(&mut self) {
        if self.now_playing().is_some() {
            self.playing = !self.playing;
        }
    }

    fn skip(&mut self, forward: bool) {
        let last = self.queue.len().saturating_sub(1);
        self.position = if forward {
            (self.position + 1).min(last)
        } else {
            self.position.saturating_sub(1)
        };
    }

    fn toggle_like(&mut self, id: StableId) {
        if !self.liked.remove(&id) {
            self.liked.insert(id);
        }
    }
}

/// Serializable summary of where focus is, for front-ends and tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub route: Route,
    pub screen: String,
    pub active_group: usize,
    pub group_count: usize,
    pub overlay_phase: OverlayPhase,
    pub overlay_group: OverlayGroup,
    pub overlay_index: usize,
    pub focus: Option<FocusTarget>,
    pub now_playing: Option<StableId>,
    pub playing: bool,
}

pub struct Session<H: FocusHost = RecordingFocusHost> {
    catalog: Box<dyn Catalog>,
    tokens: DesignTokens,
    memory: ScreenMemory,
    navigators: HashMap<String, GroupNavigator>,
    overlay: PlayerOverlay,
    mini_player: MiniPlayer,
    playback: Playback,
    history: Vec<Route>,
    screen: Box<dyn Screen>,
    host: H,
}

impl Session<RecordingFocusHost> {
    /// Start on the home screen with an in-memory focus host.
    pub fn new(catalog: Box<dyn Catalog>, tokens: DesignTokens) -> Self {
        Self::with_host(catalog, tokens, RecordingFocusHost::new())
    }
}

impl<H: FocusHost> Session<H> {
    pub fn with_host(catalog: Box<dyn Catalog>, tokens: DesignTokens, host: H) -> Self {
        let screen = Route::Home.build(catalog.as_ref(), &tokens);
        let mut session = Self {
            overlay: PlayerOverlay::new(OverlayTimings::from_tokens(&tokens)),
            catalog,
            tokens,
            memory: ScreenMemory::new(),
            navigators: HashMap::new(),
            mini_player: MiniPlayer::new(),
            playback: Playback::default(),
            history: Vec::new(),
            screen,
            host,
        };
        session.enter_screen();
        session
    }

    pub fn active_screen(&self) -> &dyn Screen {
        self.screen.as_ref()
    }

    pub fn route(&self) -> Route {
        self.screen.route()
    }

    pub fn overlay(&self) -> &PlayerOverlay {
        &self.overlay
    }

    pub fn memory(&self) -> &ScreenMemory {
        &self.memory
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn tokens(&self) -> &DesignTokens {
        &self.tokens
    }

    pub fn mini_player(&self) -> &MiniPlayer {
        &self.mini_player
    }

    /// Navigator of the active screen.
    pub fn groups(&self) -> Option<&GroupNavigator> {
        self.navigators.get(self.screen.name())
    }

    /// Whether the mini-player group is currently part of the group stack.
    pub fn is_floating_eligible(&self) -> bool {
        self.playback.now_playing().is_some() && !self.overlay.is_modal()
    }

    fn is_mini_player_active(&self) -> bool {
        self.groups()
            .is_some_and(|g| g.floating_group() == Some(g.active()))
    }

    /// Run `f` against the active screen with the session's context.
    fn with_screen<R>(&mut self, f: impl FnOnce(&mut dyn Screen, &mut NavContext<'_>) -> R) -> R {
        let Self {
            catalog,
            tokens,
            memory,
            navigators,
            screen,
            ..
        } = self;
        let groups = navigators
            .entry(screen.name().to_owned())
            .or_insert_with(|| GroupNavigator::new(screen.group_count()));
        let mut ctx = NavContext {
            memory,
            groups,
            tokens,
            catalog: &**catalog,
        };
        f(screen.as_mut(), &mut ctx)
    }

    fn enter_screen(&mut self) {
        let eligible = self.is_floating_eligible();
        self.with_screen(|screen, ctx| {
            ctx.groups.set_floating_eligible(eligible);
            screen.enter(ctx);
        });
        self.sync_mini_input();
        self.sync_host_focus();
    }

    fn leave_screen(&mut self) {
        self.with_screen(|screen, ctx| screen.exit(ctx));
        self.mini_player.set_input_focus(false);
    }

    fn show(&mut self, route: Route) {
        self.screen = route.build(self.catalog.as_ref(), &self.tokens);
        self.enter_screen();
    }

    /// Leave the current screen and show `route`. The current route is
    /// pushed onto the back stack, unless the target screen is already on
    /// it: then the stack unwinds to below that entry, so header jumps
    /// between root screens never grow it.
    pub fn navigate(&mut self, route: Route) {
        if self.overlay.is_modal() {
            self.overlay.close(&mut self.host);
        }
        let from = self.screen.route();
        tracing::info!(?from, to = ?route, "navigate");
        self.leave_screen();
        let target = route.screen_name();
        match self
            .history
            .iter()
            .position(|entry| entry.screen_name() == target)
        {
            Some(depth) => {
                tracing::debug!(depth, "unwinding back stack");
                self.history.truncate(depth);
            }
            None => self.history.push(from),
        }
        self.show(route);
    }

    /// Routes `back` would return to, oldest first.
    pub fn history(&self) -> &[Route] {
        &self.history
    }

    /// Return to the previous route. Returns `false` at the root.
    pub fn back(&mut self) -> bool {
        let Some(route) = self.history.pop() else {
            return false;
        };
        tracing::info!(to = ?route, "navigate back");
        self.leave_screen();
        self.show(route);
        true
    }

    /// Route one signal. Returns whether anything reacted to it.
    pub fn handle(&mut self, signal: NavSignal) -> bool {
        let _span = tracing::debug_span!("handle", ?signal).entered();
        match self.overlay.handle(signal, &mut self.host) {
            OverlayOutcome::Ignored => {}
            OverlayOutcome::Consumed => return true,
            OverlayOutcome::Header(action) => {
                self.apply_header_action(action);
                return true;
            }
            OverlayOutcome::Control(control) => {
                self.apply_control(control);
                return true;
            }
            OverlayOutcome::Closed => {
                self.sync_floating();
                return true;
            }
        }

        let to_mini_player = self.is_mini_player_active()
            && (signal.horizontal().is_some() || signal == NavSignal::Select);
        let outcome = if to_mini_player {
            self.mini_player.handle(signal)
        } else {
            self.with_screen(|screen, ctx| screen.handle(signal, ctx))
        };
        self.sync_mini_input();
        self.sync_host_focus();
        self.apply(outcome)
    }

    fn apply(&mut self, outcome: ScreenOutcome) -> bool {
        match outcome {
            ScreenOutcome::Ignored => false,
            ScreenOutcome::Handled => true,
            ScreenOutcome::Navigate(route) => {
                self.navigate(route);
                true
            }
            ScreenOutcome::Back => self.back(),
            ScreenOutcome::Play { queue, index } => {
                self.playback.start(queue, index);
                self.open_player();
                true
            }
            ScreenOutcome::ToggleLike(id) => {
                self.playback.toggle_like(id);
                true
            }
            ScreenOutcome::OpenPlayer => {
                self.open_player();
                true
            }
            ScreenOutcome::TogglePlayback => {
                self.playback.toggle();
                true
            }
        }
    }

    /// Open the player overlay over whatever has platform focus now.
    pub fn open_player(&mut self) -> bool {
        if self.playback.now_playing().is_none() {
            tracing::debug!("nothing playing, player stays closed");
            return false;
        }
        let opened = self.overlay.open(&self.host);
        self.sync_floating();
        opened
    }

    /// Stop playback. The mini-player group goes away with it.
    pub fn stop(&mut self) {
        if self.overlay.is_modal() {
            self.overlay.close(&mut self.host);
        }
        self.playback.stop();
        self.sync_floating();
    }

    fn apply_header_action(&mut self, action: HeaderAction) {
        match action {
            HeaderAction::Info => self.playback.show_info = !self.playback.show_info,
            HeaderAction::Like => {
                if let Some(id) = self.playback.now_playing().map(|t| t.id.clone()) {
                    self.playback.toggle_like(id);
                }
            }
        }
    }

    fn apply_control(&mut self, control: PlaybackControl) {
        match control {
            PlaybackControl::Previous => self.playback.skip(false),
            PlaybackControl::PlayPause => self.playback.toggle(),
            PlaybackControl::Next => self.playback.skip(true),
        }
    }

    /// Bring the floating group in line with playback and overlay state.
    fn sync_floating(&mut self) {
        let eligible = self.is_floating_eligible();
        let modal = self.overlay.is_modal();
        let reclamped = self.with_screen(|screen, ctx| {
            ctx.groups.set_floating_eligible(eligible);
            if modal || ctx.groups.is_active_valid() {
                return false;
            }
            ctx.groups.clamp();
            screen.sync_input_focus(ctx.groups);
            true
        });
        self.sync_mini_input();
        if reclamped {
            self.sync_host_focus();
        }
    }

    fn sync_mini_input(&mut self) {
        let active = self.is_mini_player_active() && !self.overlay.is_modal();
        self.mini_player.set_input_focus(active);
    }

    /// Point platform focus at whatever owns input below the overlay.
    fn sync_host_focus(&mut self) {
        if self.overlay.is_modal() {
            return;
        }
        let Some(groups) = self.navigators.get(self.screen.name()) else {
            return;
        };
        let target = match groups.floating_group() {
            Some(floating) if floating == groups.active() => Some(FocusTarget::Element {
                screen: self.screen.name().to_owned(),
                group: floating,
                index: self.mini_player.focused_index(),
            }),
            _ => self.screen.focus_target(groups),
        };
        if let Some(target) = target {
            self.host.focus(target);
        }
    }

    /// Advance animations and overlay timers by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.screen.tick(dt);
        self.overlay.tick(dt, &mut self.host);
    }

    /// Forward renderer measurements to the active screen.
    pub fn report_layout(&mut self, probe: &dyn LayoutProbe) {
        self.screen.report_layout(probe, &self.tokens);
    }

    pub fn player_view(&self) -> PlayerView<'_> {
        let now_playing = self.playback.now_playing();
        PlayerView {
            now_playing,
            playing: self.playback.playing,
            liked: now_playing.is_some_and(|t| self.playback.is_liked(&t.id)),
            show_info: self.playback.show_info,
        }
    }

    /// Draw the active screen, the mini-player and the overlay, bottom to
    /// top.
    pub fn render(&self) -> Vec<RenderCommand> {
        let Some(groups) = self.groups() else {
            return Vec::new();
        };
        let mut commands = self.screen.render(groups, &self.tokens);
        let view = self.player_view();
        let mini_focused = self.is_mini_player_active() && !self.overlay.is_modal();
        commands.extend(render_mini_player(&self.mini_player, &view, mini_focused, &self.tokens));
        commands.extend(render_player_overlay(&self.overlay, &view, &self.tokens));
        commands
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let (active_group, group_count) = self
            .groups()
            .map_or((0, 0), |g| (g.active(), g.group_count()));
        SessionSnapshot {
            route: self.screen.route(),
            screen: self.screen.name().to_owned(),
            active_group,
            group_count,
            overlay_phase: self.overlay.phase(),
            overlay_group: self.overlay.active_group(),
            overlay_index: self.overlay.focused_index(),
            focus: self.host.focused(),
            now_playing: self.playback.now_playing().map(|t| t.id.clone()),
            playing: self.playback.playing,
        }
    }
}
