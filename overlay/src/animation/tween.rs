//! Time-driven property interpolation

use std::time::{Duration, Instant};

/// Easing curve applied to a tween's progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Smooth start and stop; the default for fades
    #[default]
    InOutCubic,
    OutCubic,
    /// Overshooting bounce used by the scale pulse
    OutBounce,
}

impl Easing {
    /// Map linear progress `t` in [0, 1] onto the eased curve
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::OutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::OutBounce => {
                const N1: f32 = 7.5625;
                const D1: f32 = 2.75;
                if t < 1.0 / D1 {
                    N1 * t * t
                } else if t < 2.0 / D1 {
                    let t = t - 1.5 / D1;
                    N1 * t * t + 0.75
                } else if t < 2.5 / D1 {
                    let t = t - 2.25 / D1;
                    N1 * t * t + 0.9375
                } else {
                    let t = t - 2.625 / D1;
                    N1 * t * t + 0.984375
                }
            }
        }
    }
}

/// A single interpolation from `from` to `to` over `duration`.
///
/// With a midpoint keyframe the eased progress interpolates
/// `from → mid → to` piecewise, which is how the three-keyframe scale
/// pulse is expressed.
#[derive(Debug, Clone)]
pub struct Tween {
    from: f32,
    to: f32,
    mid: Option<f32>,
    duration: Duration,
    easing: Easing,
    started: Instant,
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl Tween {
    pub fn start(now: Instant, from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            mid: None,
            duration,
            easing,
            started: now,
        }
    }

    /// Insert a keyframe at 50% progress
    pub fn with_midpoint(mut self, mid: f32) -> Self {
        self.mid = Some(mid);
        self
    }

    /// Linear progress in [0, 1]; a zero duration is already complete
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Current property value
    pub fn value_at(&self, now: Instant) -> f32 {
        let eased = self.easing.apply(self.progress(now));
        match self.mid {
            None => lerp(self.from, self.to, eased),
            Some(mid) => {
                if eased < 0.5 {
                    lerp(self.from, mid, eased * 2.0)
                } else {
                    lerp(mid, self.to, (eased - 0.5) * 2.0)
                }
            }
        }
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn end_value(&self) -> f32 {
        self.to
    }
}
