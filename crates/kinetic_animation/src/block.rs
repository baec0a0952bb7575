//! Block-style one-shot animations
//!
//! The closure style: describe the target values inside a closure and get
//! back a running [`PropertyAnimator`].
//!
//! ```ignore
//! let animator = animate(snapshot, AnimateOptions::new(0.5).curve(TimingCurve::ease_out()), |set| {
//!     set.set(color, Color::BLUE);
//!     set.set(radius, 24.0);
//! })?;
//! ```

use kinetic_core::{AnimatableValue, PropertyKey, PropertySnapshot};

use crate::animator::{FinalPosition, PropertyAnimator};
use crate::curve::TimingCurve;
use crate::descriptor::AnimationDescriptor;
use crate::error::Result;

/// Timing options for [`animate`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimateOptions {
    duration: f32,
    delay: f32,
    curve: TimingCurve,
    autoreverse: bool,
}

impl AnimateOptions {
    /// Linear curve, no delay
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            delay: 0.0,
            curve: TimingCurve::Linear,
            autoreverse: false,
        }
    }

    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn curve(mut self, curve: TimingCurve) -> Self {
        self.curve = curve;
        self
    }

    pub fn autoreverse(mut self, autoreverse: bool) -> Self {
        self.autoreverse = autoreverse;
        self
    }
}

/// Target values collected inside an animation closure
#[derive(Clone, Debug, Default)]
pub struct ChangeSet {
    changes: Vec<(PropertyKey, AnimatableValue)>,
}

impl ChangeSet {
    pub fn set(&mut self, key: PropertyKey, value: impl Into<AnimatableValue>) -> &mut Self {
        self.changes.push((key, value.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Build and start an animator from a closure of target values
pub fn animate(
    snapshot: PropertySnapshot,
    options: AnimateOptions,
    animations: impl FnOnce(&mut ChangeSet),
) -> Result<PropertyAnimator> {
    let mut set = ChangeSet::default();
    animations(&mut set);

    let descriptor = set
        .changes
        .into_iter()
        .fold(
            AnimationDescriptor::builder(options.duration),
            |builder, (key, value)| builder.change(key, value),
        )
        .delay(options.delay)
        .curve(options.curve)
        .autoreverse(options.autoreverse)
        .build()?;

    let mut animator = PropertyAnimator::new(snapshot, &descriptor)?;
    animator.start(0.0)?;
    Ok(animator)
}

/// [`animate`] with a completion observer
pub fn animate_with_completion(
    snapshot: PropertySnapshot,
    options: AnimateOptions,
    animations: impl FnOnce(&mut ChangeSet),
    completion: impl FnOnce(FinalPosition) + 'static,
) -> Result<PropertyAnimator> {
    let mut animator = animate(snapshot, options, animations)?;
    animator.add_completion(completion)?;
    Ok(animator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_core::{NodeId, Point, PropertyKind};
    use std::cell::Cell;
    use std::rc::Rc;

    fn position() -> PropertyKey {
        PropertyKey::new(NodeId(2), PropertyKind::Position)
    }

    fn snapshot() -> PropertySnapshot {
        PropertySnapshot::new().with(position(), Point::ZERO).unwrap()
    }

    #[test]
    fn test_animate_moves_position() {
        let mut animator = animate(snapshot(), AnimateOptions::new(1.0), |set| {
            set.set(position(), Point::new(100.0, -50.0));
        })
        .unwrap();

        animator.advance(0.5).unwrap();
        assert_eq!(
            animator.value(position()),
            Some(Point::new(50.0, -25.0).into())
        );
    }

    #[test]
    fn test_spring_options_overshoot() {
        let curve = TimingCurve::spring(0.3, 0.0).unwrap();
        let mut animator = animate(snapshot(), AnimateOptions::new(1.0).curve(curve), |set| {
            set.set(position(), Point::new(100.0, 0.0));
        })
        .unwrap();

        let mut peak = f32::MIN;
        for _ in 0..100 {
            animator.advance(0.01).unwrap();
            let x = animator
                .value(position())
                .and_then(|v| v.as_point())
                .map(|p| p.x)
                .unwrap();
            peak = peak.max(x);
        }
        assert!(peak > 100.0);

        animator.advance(0.1).unwrap();
        assert_eq!(
            animator.value(position()),
            Some(Point::new(100.0, 0.0).into())
        );
    }

    #[test]
    fn test_completion_reports_end() {
        let done = Rc::new(Cell::new(None));
        let observed = done.clone();
        let mut animator = animate_with_completion(
            snapshot(),
            AnimateOptions::new(0.25).delay(0.25),
            |set| {
                set.set(position(), Point::new(10.0, 10.0));
            },
            move |position| observed.set(Some(position)),
        )
        .unwrap();

        animator.advance(0.25).unwrap();
        assert_eq!(done.get(), None);
        animator.advance(0.25).unwrap();
        assert_eq!(done.get(), Some(FinalPosition::End));
    }
}
