//! Time-driven tweens and the dimming overlay they animate.
//!
//! Nothing here owns a clock. The host loop advances tweens by elapsed
//! time through `Orchestrator::tick`.

use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

// ============================================================================
// EASING
// ============================================================================

/// Easing curve mapping linear progress in `[0, 1]` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Fast start, slow finish.
    SineOut,
    /// Slow start, fast finish.
    SineIn,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::SineOut => (t * FRAC_PI_2).sin(),
            Easing::SineIn => 1.0 - (t * FRAC_PI_2).cos(),
        }
    }
}

// ============================================================================
// TWEEN
// ============================================================================

/// Interpolates a single value from `from` to `to` over `duration`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Tween {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// Advance by `dt`.
    ///
    /// Returns the unused part of `dt` once the tween has finished, or
    /// `None` while it is still running.
    pub fn advance(&mut self, dt: Duration) -> Option<Duration> {
        let remaining = self.duration.saturating_sub(self.elapsed);
        if dt >= remaining {
            self.elapsed = self.duration;
            Some(dt - remaining)
        } else {
            self.elapsed += dt;
            None
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current interpolated value.
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }
}

// ============================================================================
// OVERLAY
// ============================================================================

/// Full-viewport black surface used to mask screen swaps.
///
/// Mutated only by the orchestrator; hosts read it when rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    alpha: f32,
    visible: bool,
}

impl Overlay {
    /// Hidden and fully transparent.
    pub fn new() -> Self {
        Overlay {
            alpha: 0.0,
            visible: false,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Opacity a renderer should apply: zero while hidden.
    pub fn effective_alpha(&self) -> f32 {
        if self.visible { self.alpha } else { 0.0 }
    }

    pub(crate) fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Overlay::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
