// Interpolation parameter driver

/// Loop length used when none (or a non-positive one) is configured.
pub const DEFAULT_PERIOD: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Idle,
    Animating,
}

/// Advances `t` through `[0, 1)` once per `period` seconds while animating.
///
/// Stopping the clock freezes `t` where it is; it is never reset to 0.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    state: ClockState,
    t: f32,
    period: f32,
}

impl AnimationClock {
    pub fn new(period: f32, animating: bool) -> Self {
        Self {
            state: if animating {
                ClockState::Animating
            } else {
                ClockState::Idle
            },
            t: 0.0,
            period: sanitize_period(period),
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.state == ClockState::Animating
    }

    pub fn set_animating(&mut self, animating: bool) {
        let next = if animating {
            ClockState::Animating
        } else {
            ClockState::Idle
        };
        if next != self.state {
            log::debug!("animation clock {:?} -> {:?} at t={:.3}", self.state, next, self.t);
            self.state = next;
        }
    }

    /// Step by `dt` seconds and return the new `t`.
    ///
    /// Negative or non-finite `dt` counts as zero.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if self.state == ClockState::Animating {
            let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
            self.t = (self.t + dt / self.period).rem_euclid(1.0);
        }
        self.t
    }

    pub fn t(&self) -> f32 {
        self.t
    }

    /// Manual scrub; clamped into `[0, 1]`.
    pub fn set_t(&mut self, t: f32) {
        self.t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn set_period(&mut self, period: f32) {
        self.period = sanitize_period(period);
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD, true)
    }
}

fn sanitize_period(period: f32) -> f32 {
    if period.is_finite() && period > 0.0 {
        period
    } else {
        log::warn!("invalid animation period {period}, using {DEFAULT_PERIOD}s");
        DEFAULT_PERIOD
    }
}
