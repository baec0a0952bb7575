//! Interpolation for animatable value types

use crate::geometry::{Color, Point, Size};

/// Trait for values that can be linearly interpolated
///
/// `t` is not clamped: eased progress from a spring can leave 0.0..=1.0
/// and the result extrapolates accordingly.
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

// ============================================================================
// f32 Implementation
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

// ============================================================================
// Point / Size Implementations
// ============================================================================

impl Interpolate for Point {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Point::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.approx_eq(&other.x, epsilon) && self.y.approx_eq(&other.y, epsilon)
    }
}

impl Interpolate for Size {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Size::new(
            self.width.lerp(&other.width, t),
            self.height.lerp(&other.height, t),
        )
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.width.approx_eq(&other.width, epsilon)
            && self.height.approx_eq(&other.height, epsilon)
    }
}

// ============================================================================
// Color Implementation
// ============================================================================

impl Interpolate for Color {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Color::rgba(
            self.r.lerp(&other.r, t),
            self.g.lerp(&other.g, t),
            self.b.lerp(&other.b, t),
            self.a.lerp(&other.a, t),
        )
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.r - other.r).abs() < epsilon
            && (self.g - other.g).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
            && (self.a - other.a).abs() < epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_lerp_extrapolates() {
        assert_eq!(0.0f32.lerp(&10.0, 0.5), 5.0);
        assert_eq!(0.0f32.lerp(&10.0, 1.2), 12.0);
    }

    #[test]
    fn test_color_lerp_midpoint() {
        let mid = Color::RED.lerp(&Color::BLUE, 0.5);
        assert!(mid.approx_eq(&Color::rgb(0.5, 0.0, 0.5), 1e-6));
    }

    #[test]
    fn test_size_and_point_lerp() {
        let size = Size::square(100.0).lerp(&Size::new(200.0, 50.0), 0.5);
        assert!(size.approx_eq(&Size::new(150.0, 75.0), 1e-6));

        let point = Point::ZERO.lerp(&Point::new(-40.0, 80.0), 0.25);
        assert!(point.approx_eq(&Point::new(-10.0, 20.0), 1e-6));
    }
}
