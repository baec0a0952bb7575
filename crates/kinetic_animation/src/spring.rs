//! Spring timing curve
//!
//! A damped harmonic oscillator solved in closed form over normalized time.
//! Unit mass, unit distance: the oscillator starts at 0 with the given
//! initial velocity and settles at 1.
//!
//! The natural frequency is derived from the damping ratio so that the
//! envelope has decayed to [`SETTLE_THRESHOLD`] by `t = 1`. That ties the
//! spring's settling time to the animation duration instead of to a
//! stiffness constant. Under-damped springs are also kept fast enough for
//! the first peak to land by [`FIRST_PEAK_LIMIT`].

use std::f64::consts::PI;

use crate::error::{AnimationError, Result};

/// Envelope amplitude considered settled at the end of the curve
pub const SETTLE_THRESHOLD: f64 = 1e-3;

/// Solves `(1 + w) * e^-w == SETTLE_THRESHOLD`
const CRITICAL_OMEGA: f64 = 9.2335;

/// Latest normalized time at which an under-damped spring peaks
pub const FIRST_PEAK_LIMIT: f64 = 0.9;

/// Natural frequency for a damping ratio in `(0.0, 1.0]`
fn natural_frequency_for(zeta: f64) -> f64 {
    if zeta >= 1.0 {
        return CRITICAL_OMEGA;
    }
    let settle = -SETTLE_THRESHOLD.ln() / zeta;
    let first_peak = PI / (FIRST_PEAK_LIMIT * (1.0 - zeta * zeta).sqrt());
    settle.max(first_peak)
}

/// Spring-driven timing curve
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringCurve {
    damping_ratio: f32,
    initial_velocity: f32,
    omega: f64,
}

impl SpringCurve {
    /// Create a spring curve
    ///
    /// `damping_ratio` must be in `(0.0, 1.0]`: below 1.0 the curve
    /// overshoots and oscillates, at 1.0 it is critically damped.
    /// `initial_velocity` is in progress units per normalized time, so 1.0
    /// matches the slope of a linear curve. A critically damped spring
    /// rejects velocities above its natural frequency, which would push it
    /// past the target.
    pub fn new(damping_ratio: f32, initial_velocity: f32) -> Result<Self> {
        if !damping_ratio.is_finite() || damping_ratio <= 0.0 || damping_ratio > 1.0 {
            return Err(AnimationError::InvalidCurveParameters(format!(
                "damping ratio must be within (0.0, 1.0], got {damping_ratio}"
            )));
        }
        if !initial_velocity.is_finite() {
            return Err(AnimationError::InvalidCurveParameters(format!(
                "initial velocity must be finite, got {initial_velocity}"
            )));
        }

        let omega = natural_frequency_for(damping_ratio as f64);
        if damping_ratio >= 1.0 && initial_velocity as f64 > omega {
            return Err(AnimationError::InvalidCurveParameters(format!(
                "initial velocity {initial_velocity} overshoots a critically damped spring \
                 (at most {omega:.4})"
            )));
        }

        Ok(Self {
            damping_ratio,
            initial_velocity,
            omega,
        })
    }

    /// A bouncy spring (damping 0.3)
    pub fn bouncy() -> Self {
        Self::preset(0.3)
    }

    /// A gentle spring with slight overshoot (damping 0.7)
    pub fn gentle() -> Self {
        Self::preset(0.7)
    }

    /// Critically damped, no overshoot
    pub fn critical() -> Self {
        Self::preset(1.0)
    }

    fn preset(damping_ratio: f32) -> Self {
        Self {
            damping_ratio,
            initial_velocity: 0.0,
            omega: natural_frequency_for(damping_ratio as f64),
        }
    }

    pub fn damping_ratio(&self) -> f32 {
        self.damping_ratio
    }

    pub fn initial_velocity(&self) -> f32 {
        self.initial_velocity
    }

    /// Natural frequency in radians per normalized time
    pub fn natural_frequency(&self) -> f64 {
        self.omega
    }

    pub fn is_underdamped(&self) -> bool {
        self.damping_ratio < 1.0
    }

    /// Evaluate the oscillator at `t` (clamped to 0.0..=1.0)
    pub fn apply(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        let t = t as f64;
        let zeta = self.damping_ratio as f64;
        let v0 = self.initial_velocity as f64;
        let w = self.omega;

        // Displacement from the rest position, starting at 1 with slope -v0
        let displacement = if zeta < 1.0 {
            let wd = w * (1.0 - zeta * zeta).sqrt();
            let b = (zeta * w - v0) / wd;
            (-zeta * w * t).exp() * ((wd * t).cos() + b * (wd * t).sin())
        } else {
            (-w * t).exp() * (1.0 + (w - v0) * t)
        };

        (1.0 - displacement) as f32
    }
}

impl Default for SpringCurve {
    fn default() -> Self {
        Self::gentle()
    }
}
