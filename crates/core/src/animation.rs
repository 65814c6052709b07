//! Time-driven primitives used for visual sequencing.
//!
//! State transitions in the focus engine are immediate; these only decide
//! what is drawn while a lane scrolls and when deferred focus moves happen.
//! Both are advanced explicitly with `tick(dt)` by the owner, so behavior is
//! deterministic under test.

use std::time::Duration;

pub type EasingFn = fn(f64) -> f64;

#[inline]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Interpolates a scalar (a lane offset) towards a target.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f64,
    to: f64,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Tween {
    /// A tween that is already at rest on `value`.
    pub fn settled(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            easing: ease_out_cubic,
        }
    }

    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    fn progress(&self) -> f64 {
        if self.duration.is_zero() || self.elapsed >= self.duration {
            return 1.0;
        }
        self.elapsed.as_secs_f64() / self.duration.as_secs_f64()
    }

    pub fn value(&self) -> f64 {
        let t = (self.easing)(self.progress());
        self.from + (self.to - self.from) * t
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Start moving from the current on-screen value to `to`. Retargeting to
    /// the current target keeps the animation in flight untouched.
    pub fn retarget(&mut self, to: f64, duration: Duration) {
        if to == self.to {
            return;
        }
        self.from = self.value();
        self.to = to;
        self.elapsed = Duration::ZERO;
        self.duration = duration;
    }

    /// Snap to `value` without animating (layout changes, restoration).
    pub fn jump(&mut self, value: f64) {
        self.from = value;
        self.to = value;
        self.elapsed = Duration::ZERO;
        self.duration = Duration::ZERO;
    }

    pub fn tick(&mut self, dt: Duration) {
        if !self.is_complete() {
            self.elapsed = self.elapsed.saturating_add(dt);
        }
    }
}

/// One-shot timer tagged with the epoch of the state that scheduled it.
///
/// The owner bumps its epoch on every transition that invalidates pending
/// work and compares epochs when the countdown fires, so a timer from an
/// earlier open/close cycle can never act on the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    epoch: u64,
    remaining: Duration,
}

impl Countdown {
    pub fn new(epoch: u64, duration: Duration) -> Self {
        Self {
            epoch,
            remaining: duration,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Advance by `dt`; returns `true` once the countdown has run out.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(dt);
        self.remaining.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn settled_tween_reports_value() {
        let t = Tween::settled(42.0);
        assert!(t.is_complete());
        assert_eq!(t.value(), 42.0);
        assert_eq!(t.target(), 42.0);
    }

    #[test]
    fn tween_reaches_target() {
        let mut t = Tween::settled(0.0).easing(linear);
        t.retarget(100.0, Duration::from_millis(200));
        assert_eq!(t.value(), 0.0);
        t.tick(MS_100);
        assert!((t.value() - 50.0).abs() < 1e-9);
        t.tick(MS_100);
        assert!(t.is_complete());
        assert_eq!(t.value(), 100.0);
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let mut t = Tween::settled(0.0).easing(linear);
        t.retarget(100.0, Duration::from_millis(200));
        t.tick(MS_100);
        t.retarget(0.0, Duration::from_millis(200));
        assert!((t.value() - 50.0).abs() < 1e-9);
        t.tick(Duration::from_millis(200));
        assert_eq!(t.value(), 0.0);
    }

    #[test]
    fn retarget_to_same_target_keeps_progress() {
        let mut t = Tween::settled(0.0).easing(linear);
        t.retarget(100.0, Duration::from_millis(200));
        t.tick(MS_100);
        t.retarget(100.0, Duration::from_millis(200));
        assert!((t.value() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn zero_duration_is_immediate() {
        let mut t = Tween::settled(0.0);
        t.retarget(10.0, Duration::ZERO);
        assert_eq!(t.value(), 10.0);
    }

    #[test]
    fn ease_out_is_ahead_of_linear() {
        assert!(ease_out_cubic(0.5) > linear(0.5));
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
    }

    #[test]
    fn countdown_fires_when_elapsed() {
        let mut c = Countdown::new(3, Duration::from_millis(250));
        assert!(!c.tick(MS_100));
        assert!(!c.tick(MS_100));
        assert!(c.tick(MS_100));
        assert_eq!(c.epoch(), 3);
        assert_eq!(c.remaining(), Duration::ZERO);
    }
}
