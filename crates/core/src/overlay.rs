//! Focus sub-machine of the modal player overlay.
//!
//! ```text
//! Closed --open--> Opening --entry timer--> Open
//!    ^                |                       |
//!    |              close                   close
//!    |                v                       |
//!    +--exit timer-- Closing <----------------+
//! ```
//!
//! Opening and Open are modal: every signal is consumed here and nothing
//! reaches the screen underneath. Timers carry the epoch they were
//! scheduled in, and every transition bumps the epoch, so a timer from an
//! earlier open/close cycle is discarded instead of acting on the current
//! one.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tunelane_protocol::{Horizontal, NavSignal};

use crate::animation::Countdown;
use crate::config::DesignTokens;
use crate::focus::{FocusHost, FocusTarget};
use crate::swimlane::step;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayGroup {
    Header,
    Controls,
}

impl OverlayGroup {
    fn other(self) -> Self {
        match self {
            OverlayGroup::Header => OverlayGroup::Controls,
            OverlayGroup::Controls => OverlayGroup::Header,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderAction {
    Info,
    Like,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaybackControl {
    Previous,
    PlayPause,
    Next,
}

pub const HEADER_ACTIONS: [HeaderAction; 2] = [HeaderAction::Info, HeaderAction::Like];
pub const PLAYBACK_CONTROLS: [PlaybackControl; 3] = [
    PlaybackControl::Previous,
    PlaybackControl::PlayPause,
    PlaybackControl::Next,
];

const DEFAULT_GROUP: OverlayGroup = OverlayGroup::Controls;
const DEFAULT_HEADER_INDEX: usize = 0;
/// Play/pause.
const DEFAULT_CONTROLS_INDEX: usize = 1;

/// What the overlay did with a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayOutcome {
    /// Not modal; route the signal to the screen.
    Ignored,
    Consumed,
    Header(HeaderAction),
    Control(PlaybackControl),
    /// The overlay began closing and focus went back to the trigger.
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayTimings {
    pub entry: Duration,
    pub exit: Duration,
}

impl OverlayTimings {
    pub fn from_tokens(tokens: &DesignTokens) -> Self {
        Self {
            entry: tokens.overlay_entry(),
            exit: tokens.overlay_exit(),
        }
    }
}

impl Default for OverlayTimings {
    fn default() -> Self {
        Self::from_tokens(&DesignTokens::default())
    }
}

#[derive(Debug, Clone)]
pub struct PlayerOverlay {
    phase: OverlayPhase,
    active_group: OverlayGroup,
    header_index: usize,
    controls_index: usize,
    trigger: Option<FocusTarget>,
    epoch: u64,
    timer: Option<Countdown>,
    timings: OverlayTimings,
}

impl PlayerOverlay {
    pub fn new(timings: OverlayTimings) -> Self {
        Self {
            phase: OverlayPhase::Closed,
            active_group: DEFAULT_GROUP,
            header_index: DEFAULT_HEADER_INDEX,
            controls_index: DEFAULT_CONTROLS_INDEX,
            trigger: None,
            epoch: 0,
            timer: None,
            timings,
        }
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// Opening or open: the overlay owns all input.
    pub fn is_modal(&self) -> bool {
        matches!(self.phase, OverlayPhase::Opening | OverlayPhase::Open)
    }

    pub fn active_group(&self) -> OverlayGroup {
        self.active_group
    }

    pub fn header_index(&self) -> usize {
        self.header_index
    }

    pub fn controls_index(&self) -> usize {
        self.controls_index
    }

    /// Focused index within the active group.
    pub fn focused_index(&self) -> usize {
        match self.active_group {
            OverlayGroup::Header => self.header_index,
            OverlayGroup::Controls => self.controls_index,
        }
    }

    /// The element captured when the overlay opened.
    pub fn trigger(&self) -> Option<&FocusTarget> {
        self.trigger.as_ref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn pending_timer(&self) -> Option<Countdown> {
        self.timer
    }

    pub fn focus_target(&self) -> FocusTarget {
        FocusTarget::OverlayControl {
            group: self.active_group,
            index: self.focused_index(),
        }
    }

    fn set_phase(&mut self, phase: OverlayPhase) {
        tracing::debug!(from = ?self.phase, to = ?phase, epoch = self.epoch, "overlay phase");
        self.phase = phase;
    }

    /// Capture the focused element and start the entry animation. Returns
    /// `false` if the overlay is already modal.
    pub fn open<H: FocusHost>(&mut self, host: &H) -> bool {
        if self.is_modal() {
            return false;
        }
        self.trigger = host.focused();
        self.epoch += 1;
        self.timer = Some(Countdown::new(self.epoch, self.timings.entry));
        self.set_phase(OverlayPhase::Opening);
        true
    }

    /// Cancel pending work, reset focus defaults and give focus back to the
    /// trigger. Returns `false` if the overlay was not modal.
    pub fn close<H: FocusHost>(&mut self, host: &mut H) -> bool {
        if !self.is_modal() {
            return false;
        }
        self.epoch += 1;
        self.timer = None;
        self.active_group = DEFAULT_GROUP;
        self.header_index = DEFAULT_HEADER_INDEX;
        self.controls_index = DEFAULT_CONTROLS_INDEX;
        if let Some(trigger) = self.trigger.take() {
            host.focus(trigger);
        }
        if self.timings.exit.is_zero() {
            self.set_phase(OverlayPhase::Closed);
        } else {
            self.timer = Some(Countdown::new(self.epoch, self.timings.exit));
            self.set_phase(OverlayPhase::Closing);
        }
        true
    }

    /// Advance the pending timer and fire it when it runs out.
    pub fn tick<H: FocusHost>(&mut self, dt: Duration, host: &mut H) {
        let Some(timer) = self.timer.as_mut() else {
            return;
        };
        if timer.tick(dt) {
            let epoch = timer.epoch();
            self.timer = None;
            self.fire(epoch, host);
        }
    }

    /// Run the deferred step scheduled in `epoch`. A timer from any other
    /// epoch is stale and ignored. Returns whether it acted.
    pub fn fire<H: FocusHost>(&mut self, epoch: u64, host: &mut H) -> bool {
        if epoch != self.epoch {
            tracing::debug!(epoch, current = self.epoch, "discarding stale overlay timer");
            return false;
        }
        match self.phase {
            OverlayPhase::Opening => {
                self.set_phase(OverlayPhase::Open);
                host.focus(self.focus_target());
                true
            }
            OverlayPhase::Closing => {
                self.set_phase(OverlayPhase::Closed);
                true
            }
            OverlayPhase::Closed | OverlayPhase::Open => {
                tracing::debug!(epoch, phase = ?self.phase, "overlay timer had nothing to do");
                false
            }
        }
    }

    pub fn handle<H: FocusHost>(&mut self, signal: NavSignal, host: &mut H) -> OverlayOutcome {
        match self.phase {
            OverlayPhase::Closed | OverlayPhase::Closing => OverlayOutcome::Ignored,
            OverlayPhase::Opening => {
                if signal == NavSignal::Back {
                    self.close(host);
                    OverlayOutcome::Closed
                } else {
                    OverlayOutcome::Consumed
                }
            }
            OverlayPhase::Open => self.handle_open(signal, host),
        }
    }

    fn handle_open<H: FocusHost>(&mut self, signal: NavSignal, host: &mut H) -> OverlayOutcome {
        let moved = match signal {
            NavSignal::Left => self.move_within(Horizontal::Left),
            NavSignal::Right => self.move_within(Horizontal::Right),
            NavSignal::Up => self.switch_to(OverlayGroup::Header),
            NavSignal::Down => self.switch_to(OverlayGroup::Controls),
            NavSignal::CycleForward | NavSignal::CycleBackward => {
                self.switch_to(self.active_group.other())
            }
            NavSignal::Select => return self.activate(),
            NavSignal::Back => {
                self.close(host);
                return OverlayOutcome::Closed;
            }
        };
        if moved {
            host.focus(self.focus_target());
        }
        OverlayOutcome::Consumed
    }

    fn move_within(&mut self, direction: Horizontal) -> bool {
        let (index, len) = match self.active_group {
            OverlayGroup::Header => (&mut self.header_index, HEADER_ACTIONS.len()),
            OverlayGroup::Controls => (&mut self.controls_index, PLAYBACK_CONTROLS.len()),
        };
        let next = step(*index, len, direction);
        let moved = next != *index;
        *index = next;
        moved
    }

    fn switch_to(&mut self, group: OverlayGroup) -> bool {
        if group == self.active_group {
            return false;
        }
        self.active_group = group;
        true
    }

    fn activate(&self) -> OverlayOutcome {
        match self.active_group {
            OverlayGroup::Header => HEADER_ACTIONS
                .get(self.header_index)
                .map_or(OverlayOutcome::Consumed, |a| OverlayOutcome::Header(*a)),
            OverlayGroup::Controls => PLAYBACK_CONTROLS
                .get(self.controls_index)
                .map_or(OverlayOutcome::Consumed, |c| OverlayOutcome::Control(*c)),
        }
    }
}

impl Default for PlayerOverlay {
    fn default() -> Self {
        Self::new(OverlayTimings::default())
    }
}
