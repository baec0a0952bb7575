//! Begin/commit animation transactions
//!
//! The imperative style: open a transaction, configure timing, assign
//! target values, then commit. Commit builds and starts a
//! [`PropertyAnimator`].

use kinetic_core::{AnimatableValue, PropertyKey, PropertySnapshot};

use crate::animator::{CompletionObserver, FinalPosition, PropertyAnimator};
use crate::curve::TimingCurve;
use crate::descriptor::AnimationDescriptor;
use crate::error::Result;

/// Default transaction duration in seconds
pub const DEFAULT_TRANSACTION_DURATION: f32 = 0.2;

/// An open animation transaction
pub struct AnimationTransaction {
    snapshot: PropertySnapshot,
    duration: f32,
    delay: f32,
    curve: TimingCurve,
    autoreverses: bool,
    changes: Vec<(PropertyKey, AnimatableValue)>,
    completions: Vec<CompletionObserver>,
}

impl AnimationTransaction {
    /// Open a transaction over the given properties
    ///
    /// Defaults: 0.2s, no delay, ease-in-out.
    pub fn begin(snapshot: PropertySnapshot) -> Self {
        Self {
            snapshot,
            duration: DEFAULT_TRANSACTION_DURATION,
            delay: 0.0,
            curve: TimingCurve::ease_in_out(),
            autoreverses: false,
            changes: Vec::new(),
            completions: Vec::new(),
        }
    }

    pub fn set_duration(&mut self, duration: f32) {
        self.duration = duration;
    }

    pub fn set_delay(&mut self, delay: f32) {
        self.delay = delay;
    }

    pub fn set_curve(&mut self, curve: TimingCurve) {
        self.curve = curve;
    }

    /// Request autoreverse (ignored once committed to a property animator)
    pub fn set_autoreverses(&mut self, autoreverses: bool) {
        self.autoreverses = autoreverses;
    }

    /// Assign a target value inside the transaction
    pub fn set(&mut self, key: PropertyKey, value: impl Into<AnimatableValue>) {
        self.changes.push((key, value.into()));
    }

    pub fn on_completion(&mut self, observer: impl FnOnce(FinalPosition) + 'static) {
        self.completions.push(Box::new(observer));
    }

    /// Close the transaction and start animating
    pub fn commit(self) -> Result<PropertyAnimator> {
        let descriptor = self
            .changes
            .into_iter()
            .fold(
                AnimationDescriptor::builder(self.duration),
                |builder, (key, value)| builder.change(key, value),
            )
            .delay(self.delay)
            .curve(self.curve)
            .autoreverse(self.autoreverses)
            .build()?;

        let mut animator = PropertyAnimator::new(self.snapshot, &descriptor)?;
        for observer in self.completions {
            animator.add_completion(observer)?;
        }
        animator.start(0.0)?;
        Ok(animator)
    }
}
