//! Timing curves
//!
//! A timing curve maps normalized elapsed time in `0.0..=1.0` to eased
//! progress. Linear and bezier curves stay within `0.0..=1.0`; springs
//! overshoot before settling.

use crate::error::{AnimationError, Result};
use crate::spring::SpringCurve;

/// Two-control-point bezier easing (the CSS `cubic-bezier()` shape)
///
/// The curve runs from (0, 0) to (1, 1). Control point x-components must
/// lie in `0.0..=1.0` so the curve stays a function of time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<Self> {
        if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
            return Err(AnimationError::InvalidCurveParameters(format!(
                "control points must be finite, got ({x1}, {y1}), ({x2}, {y2})"
            )));
        }
        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(AnimationError::InvalidCurveParameters(format!(
                "control point x must be within 0.0..=1.0, got x1={x1} x2={x2}"
            )));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    pub fn control_points(&self) -> [(f32, f32); 2] {
        [(self.x1, self.y1), (self.x2, self.y2)]
    }

    pub fn apply(&self, t: f32) -> f32 {
        cubic_bezier_ease(t, self.x1, self.y1, self.x2, self.y2)
    }
}

/// Timing curve type
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TimingCurve {
    #[default]
    Linear,
    CubicBezier(CubicBezier),
    Spring(SpringCurve),
}

impl TimingCurve {
    /// Linear pacing
    pub fn linear() -> Self {
        TimingCurve::Linear
    }

    /// Slow start
    pub fn ease_in() -> Self {
        TimingCurve::CubicBezier(CubicBezier {
            x1: 0.42,
            y1: 0.0,
            x2: 1.0,
            y2: 1.0,
        })
    }

    /// Slow finish
    pub fn ease_out() -> Self {
        TimingCurve::CubicBezier(CubicBezier {
            x1: 0.0,
            y1: 0.0,
            x2: 0.58,
            y2: 1.0,
        })
    }

    /// Slow start and finish
    pub fn ease_in_out() -> Self {
        TimingCurve::CubicBezier(CubicBezier {
            x1: 0.42,
            y1: 0.0,
            x2: 0.58,
            y2: 1.0,
        })
    }

    /// Custom bezier curve, validated
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<Self> {
        CubicBezier::new(x1, y1, x2, y2).map(TimingCurve::CubicBezier)
    }

    /// Damped spring, validated
    pub fn spring(damping_ratio: f32, initial_velocity: f32) -> Result<Self> {
        SpringCurve::new(damping_ratio, initial_velocity).map(TimingCurve::Spring)
    }

    pub fn is_linear(&self) -> bool {
        matches!(self, TimingCurve::Linear)
    }

    /// Apply the curve to a progress value (clamped to 0.0..=1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            TimingCurve::Linear => t,
            TimingCurve::CubicBezier(bezier) => bezier.apply(t),
            TimingCurve::Spring(spring) => spring.apply(t),
        }
    }
}

/// Cubic bezier easing calculation (matches CSS / browser implementations).
///
/// Uses Newton-Raphson with binary-search fallback.
/// Computes in f64 internally to avoid f32 precision jitter at high frame rates.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Endpoints are always exact
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = t as f64;
    let x1 = x1 as f64;
    let y1 = y1 as f64;
    let x2 = x2 as f64;
    let y2 = y2 as f64;

    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2) as f32;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    // Bisection always converges since x(p) is monotonic for x1, x2 in [0, 1]
    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = x;
    for _ in 0..30 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2) as f32
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

/// B'(t)
#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}
