//! Animation descriptors
//!
//! A descriptor is the immutable recipe for one run: how long, how late,
//! which curve, and which property changes.

use kinetic_core::{AnimatableValue, PropertyChange, PropertyKey};

use crate::curve::TimingCurve;
use crate::error::{check_delay, check_duration, Result};

/// Extra options carried by a descriptor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationOptions {
    /// Play forward then backward.
    ///
    /// Property animators do not support this and ignore it with a warning.
    pub autoreverse: bool,
}

/// Immutable description of an animation run
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationDescriptor {
    duration: f32,
    delay: f32,
    curve: TimingCurve,
    changes: Vec<PropertyChange>,
    options: AnimationOptions,
}

impl AnimationDescriptor {
    /// Start building a descriptor with the given duration in seconds
    pub fn builder(duration: f32) -> DescriptorBuilder {
        DescriptorBuilder::new(duration)
    }

    /// Duration in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Delay before the run activates, in seconds
    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn curve(&self) -> TimingCurve {
        self.curve
    }

    pub fn changes(&self) -> &[PropertyChange] {
        &self.changes
    }

    pub fn options(&self) -> AnimationOptions {
        self.options
    }
}

/// Builder for [`AnimationDescriptor`]
///
/// Value shapes and timing are validated in [`DescriptorBuilder::build`].
#[derive(Clone, Debug)]
pub struct DescriptorBuilder {
    duration: f32,
    delay: f32,
    curve: TimingCurve,
    changes: Vec<(PropertyKey, AnimatableValue)>,
    options: AnimationOptions,
}

impl DescriptorBuilder {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            delay: 0.0,
            curve: TimingCurve::Linear,
            changes: Vec::new(),
            options: AnimationOptions::default(),
        }
    }

    /// Set delay in seconds
    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn curve(mut self, curve: TimingCurve) -> Self {
        self.curve = curve;
        self
    }

    /// Animate `key` to `value`
    pub fn change(mut self, key: PropertyKey, value: impl Into<AnimatableValue>) -> Self {
        self.changes.push((key, value.into()));
        self
    }

    /// Animate several already-validated changes
    pub fn changes(mut self, changes: impl IntoIterator<Item = PropertyChange>) -> Self {
        self.changes
            .extend(changes.into_iter().map(|c| (c.key, c.value)));
        self
    }

    pub fn autoreverse(mut self, autoreverse: bool) -> Self {
        self.options.autoreverse = autoreverse;
        self
    }

    pub fn build(self) -> Result<AnimationDescriptor> {
        check_duration(self.duration)?;
        check_delay(self.delay)?;

        let changes = self
            .changes
            .into_iter()
            .map(|(key, value)| PropertyChange::new(key, value))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(AnimationDescriptor {
            duration: self.duration,
            delay: self.delay,
            curve: self.curve,
            changes,
            options: self.options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnimationError;
    use kinetic_core::{Color, NodeId, PropertyError, PropertyKind};

    fn key(kind: PropertyKind) -> PropertyKey {
        PropertyKey::new(NodeId(7), kind)
    }

    #[test]
    fn test_build_keeps_change_order() {
        let descriptor = AnimationDescriptor::builder(1.0)
            .delay(0.5)
            .curve(TimingCurve::ease_out())
            .change(key(PropertyKind::Color), Color::BLUE)
            .change(key(PropertyKind::Opacity), 0.5)
            .build()
            .unwrap();

        assert_eq!(descriptor.duration(), 1.0);
        assert_eq!(descriptor.delay(), 0.5);
        assert_eq!(descriptor.curve(), TimingCurve::ease_out());
        let kinds: Vec<_> = descriptor.changes().iter().map(|c| c.key.kind).collect();
        assert_eq!(kinds, vec![PropertyKind::Color, PropertyKind::Opacity]);
    }

    #[test]
    fn test_rejects_bad_timing() {
        for duration in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                AnimationDescriptor::builder(duration).build(),
                Err(AnimationError::InvalidTiming(_))
            ));
        }
        assert!(matches!(
            AnimationDescriptor::builder(1.0).delay(-0.1).build(),
            Err(AnimationError::InvalidTiming(_))
        ));
    }

    #[test]
    fn test_rejects_mismatched_value() {
        let err = AnimationDescriptor::builder(1.0)
            .change(key(PropertyKind::Size), 3.0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            AnimationError::Property(PropertyError::PropertyTypeMismatch { .. })
        ));
    }
}
