//! Property animator
//!
//! Drives a [`Timeline`] of property changes over frame time and owns the
//! [`PropertySnapshot`] it mutates. Lifecycle:
//!
//! ```text
//! Inactive --start/pause/scrub--> Active --finish/stop--> Stopped
//! ```
//!
//! While Active the animator may be running or paused, and may play
//! forwards or reversed. Completion observers fire exactly once, when the
//! animator reaches Stopped.
//!
//! Autoreverse is not supported: a descriptor asking for it is accepted
//! but the option is ignored with a warning.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use kinetic_core::{AnimatableValue, PropertyChange, PropertyKey, PropertySnapshot};
use tracing::{debug, error, warn};

use crate::curve::TimingCurve;
use crate::descriptor::AnimationDescriptor;
use crate::error::{check_delay, check_duration, AnimationError, Result};
use crate::keyframe::KeyframeTrack;
use crate::timeline::{EntryBody, Timeline};

/// Lifecycle state of an animator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatorState {
    /// Created, not started
    Inactive,
    /// Started (possibly paused or still waiting for its delay)
    Active,
    /// Finished or stopped; terminal
    Stopped,
}

/// Where a run ended, reported to completion observers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinalPosition {
    Start,
    Current,
    End,
}

/// Callback invoked once when an animator stops
pub type CompletionObserver = Box<dyn FnOnce(FinalPosition)>;

/// Frame-driven animator over an owned property snapshot
pub struct PropertyAnimator {
    values: PropertySnapshot,
    start_values: PropertySnapshot,
    timeline: Timeline,
    curve: TimingCurve,
    duration: f32,
    delay: f32,
    pending_delay: f32,
    elapsed: f32,
    state: AnimatorState,
    running: bool,
    reversed: bool,
    observers: Vec<CompletionObserver>,
    final_position: Option<FinalPosition>,
}

impl PropertyAnimator {
    /// Create an inactive animator for a descriptor
    ///
    /// Every change must target a property present in `snapshot`.
    pub fn new(snapshot: PropertySnapshot, descriptor: &AnimationDescriptor) -> Result<Self> {
        check_changes(&snapshot, descriptor.changes())?;
        if descriptor.options().autoreverse {
            warn!("autoreverse is not supported by property animators, ignoring it");
        }

        let mut animator = Self::empty(
            snapshot,
            descriptor.duration(),
            descriptor.delay(),
            descriptor.curve(),
        );
        if !descriptor.changes().is_empty() {
            animator.timeline.add(
                0.0,
                descriptor.duration(),
                EntryBody::Changes(descriptor.changes().to_vec()),
            );
        }
        Ok(animator)
    }

    /// Create an inactive animator running a keyframe track
    pub fn with_keyframes(
        snapshot: PropertySnapshot,
        duration: f32,
        curve: TimingCurve,
        track: KeyframeTrack,
    ) -> Result<Self> {
        check_duration(duration)?;
        for segment in track.segments() {
            check_changes(&snapshot, segment.changes())?;
        }

        let mut animator = Self::empty(snapshot, duration, 0.0, curve);
        animator
            .timeline
            .add(0.0, duration, EntryBody::Keyframes(track));
        Ok(animator)
    }

    fn empty(snapshot: PropertySnapshot, duration: f32, delay: f32, curve: TimingCurve) -> Self {
        Self {
            start_values: snapshot.clone(),
            values: snapshot,
            timeline: Timeline::new(),
            curve,
            duration,
            delay,
            pending_delay: 0.0,
            elapsed: 0.0,
            state: AnimatorState::Inactive,
            running: false,
            reversed: false,
            observers: Vec::new(),
            final_position: None,
        }
    }

    // =========================================================================
    // Playback control
    // =========================================================================

    /// Start (or resume) the run after `after_delay` seconds
    ///
    /// A fresh run also waits for the descriptor's own delay.
    pub fn start(&mut self, after_delay: f32) -> Result<()> {
        check_delay(after_delay)?;
        match self.state {
            AnimatorState::Inactive => {
                self.state = AnimatorState::Active;
                self.running = true;
                self.pending_delay = self.delay + after_delay;
                debug!(
                    delay = self.pending_delay,
                    duration = self.duration,
                    "animator started"
                );
            }
            AnimatorState::Active if !self.running => {
                self.running = true;
                self.pending_delay += after_delay;
                debug!(elapsed = self.elapsed, "animator resumed");
            }
            AnimatorState::Active => {}
            AnimatorState::Stopped => return Err(self.invalid("start")),
        }
        Ok(())
    }

    /// Pause the run; an inactive animator becomes active and paused
    pub fn pause(&mut self) -> Result<()> {
        match self.state {
            AnimatorState::Stopped => Err(self.invalid("pause")),
            _ => {
                self.state = AnimatorState::Active;
                self.running = false;
                Ok(())
            }
        }
    }

    /// Play toward the start values instead of the targets
    pub fn set_reversed(&mut self, reversed: bool) -> Result<()> {
        if self.state == AnimatorState::Stopped {
            return Err(self.invalid("reverse"));
        }
        self.reversed = reversed;
        Ok(())
    }

    /// Advance the run by `dt` seconds of frame time
    ///
    /// Does nothing unless the animator is active and running. Reaching
    /// the end (or the start, when reversed) stops the animator.
    pub fn advance(&mut self, dt: f32) -> Result<()> {
        if self.state != AnimatorState::Active || !self.running {
            return Ok(());
        }
        if !dt.is_finite() || dt <= 0.0 {
            return Ok(());
        }

        let mut dt = dt;
        if self.pending_delay > 0.0 {
            if dt < self.pending_delay {
                self.pending_delay -= dt;
                return Ok(());
            }
            dt -= self.pending_delay;
            self.pending_delay = 0.0;
            debug!("animator delay elapsed");
        }

        if self.reversed {
            self.elapsed = (self.elapsed - dt).max(0.0);
            if self.elapsed <= 0.0 {
                self.values = self.start_values.clone();
                self.finish(FinalPosition::Start);
                return Ok(());
            }
        } else {
            self.elapsed = (self.elapsed + dt).min(self.duration);
            if self.elapsed >= self.duration {
                self.timeline.finish(&mut self.values)?;
                self.finish(FinalPosition::End);
                return Ok(());
            }
        }

        self.timeline
            .sample(self.elapsed, &self.curve, &mut self.values)
    }

    /// End the run early
    ///
    /// `Start` restores the values the animator was created with, `End`
    /// jumps to the targets, `Current` keeps the last sampled values.
    /// Stopping a stopped animator is a no-op.
    pub fn stop(&mut self, at: FinalPosition) -> Result<()> {
        if self.state == AnimatorState::Stopped {
            debug!("animator already stopped");
            return Ok(());
        }

        match at {
            FinalPosition::Start => self.values = self.start_values.clone(),
            FinalPosition::Current => {}
            FinalPosition::End => self.timeline.finish(&mut self.values)?,
        }
        self.finish(at);
        Ok(())
    }

    fn finish(&mut self, position: FinalPosition) {
        self.state = AnimatorState::Stopped;
        self.running = false;
        self.final_position = Some(position);
        debug!(?position, elapsed = self.elapsed, "animator stopped");

        let observers = std::mem::take(&mut self.observers);
        for (index, observer) in observers.into_iter().enumerate() {
            if catch_unwind(AssertUnwindSafe(move || observer(position))).is_err() {
                error!(index, "completion observer panicked");
            }
        }
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Append property changes to the run
    ///
    /// The new changes begin after `delay_factor` of the remaining time
    /// (the whole duration if not yet started) and finish with the run.
    pub fn add_animations(
        &mut self,
        changes: impl IntoIterator<Item = PropertyChange>,
        delay_factor: f32,
    ) -> Result<()> {
        if !delay_factor.is_finite() || !(0.0..=1.0).contains(&delay_factor) {
            return Err(AnimationError::InvalidDelayFactor(delay_factor));
        }
        if self.state == AnimatorState::Stopped {
            return Err(self.invalid("add animations to"));
        }

        let changes: Vec<PropertyChange> = changes.into_iter().collect();
        check_changes(&self.values, &changes)?;

        let start = match self.state {
            AnimatorState::Active => self.elapsed,
            _ => 0.0,
        };
        let offset = start + delay_factor * (self.duration - start);
        debug!(offset, count = changes.len(), "appending animations");
        self.timeline
            .add(offset, self.duration - offset, EntryBody::Changes(changes));
        Ok(())
    }

    /// Register an observer called once when the animator stops
    pub fn add_completion(&mut self, observer: impl FnOnce(FinalPosition) + 'static) -> Result<()> {
        if self.state == AnimatorState::Stopped {
            return Err(self.invalid("add a completion to"));
        }
        self.observers.push(Box::new(observer));
        Ok(())
    }

    // =========================================================================
    // Scrubbing
    // =========================================================================

    /// Progress through the run, 0.0..=1.0 (linear, before the curve)
    pub fn fraction_complete(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Jump a paused (or inactive) animator to a point in its run
    pub fn set_fraction_complete(&mut self, fraction: f32) -> Result<()> {
        if self.state == AnimatorState::Stopped || self.is_running() {
            return Err(self.invalid("scrub"));
        }
        if !fraction.is_finite() {
            return Err(AnimationError::InvalidTiming(format!(
                "fraction complete must be finite, got {fraction}"
            )));
        }

        self.state = AnimatorState::Active;
        self.pending_delay = 0.0;
        self.elapsed = fraction.clamp(0.0, 1.0) * self.duration;
        self.timeline
            .sample(self.elapsed, &self.curve, &mut self.values)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    /// Active, not paused
    pub fn is_running(&self) -> bool {
        self.state == AnimatorState::Active && self.running
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Run duration in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Descriptor delay in seconds
    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn curve(&self) -> TimingCurve {
        self.curve
    }

    /// Seconds since activation
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Where the run ended, once stopped
    pub fn final_position(&self) -> Option<FinalPosition> {
        self.final_position
    }

    pub fn snapshot(&self) -> &PropertySnapshot {
        &self.values
    }

    pub fn into_snapshot(self) -> PropertySnapshot {
        self.values
    }

    pub fn value(&self, key: PropertyKey) -> Option<AnimatableValue> {
        self.values.get(key)
    }

    /// Properties this animator changes, in first-touch order
    pub fn animated_keys(&self) -> Vec<PropertyKey> {
        self.timeline.keys()
    }

    fn invalid(&self, operation: &'static str) -> AnimationError {
        AnimationError::InvalidState {
            operation,
            state: self.state,
        }
    }
}

impl fmt::Debug for PropertyAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyAnimator")
            .field("state", &self.state)
            .field("running", &self.running)
            .field("reversed", &self.reversed)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("curve", &self.curve)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

fn check_changes(snapshot: &PropertySnapshot, changes: &[PropertyChange]) -> Result<()> {
    for change in changes {
        snapshot.check(change)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_core::{Color, NodeId, PropertyError, PropertyKind, Size};
    use std::cell::RefCell;
    use std::rc::Rc;

    const SHAPE: NodeId = NodeId(1);

    fn key(kind: PropertyKind) -> PropertyKey {
        PropertyKey::new(SHAPE, kind)
    }

    fn shape() -> PropertySnapshot {
        PropertySnapshot::new()
            .with(key(PropertyKind::Opacity), 1.0)
            .unwrap()
            .with(key(PropertyKind::CornerRadius), 0.0)
            .unwrap()
            .with(key(PropertyKind::Size), Size::square(100.0))
            .unwrap()
    }

    fn fade_out(duration: f32) -> AnimationDescriptor {
        AnimationDescriptor::builder(duration)
            .change(key(PropertyKind::Opacity), 0.0)
            .build()
            .unwrap()
    }

    fn opacity(animator: &PropertyAnimator) -> f32 {
        animator
            .value(key(PropertyKind::Opacity))
            .and_then(|v| v.as_scalar())
            .unwrap()
    }

    fn radius(animator: &PropertyAnimator) -> f32 {
        animator
            .value(key(PropertyKind::CornerRadius))
            .and_then(|v| v.as_scalar())
            .unwrap()
    }

    fn recorder() -> (Rc<RefCell<Vec<FinalPosition>>>, impl Fn() -> Box<dyn FnOnce(FinalPosition)>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let make = {
            let log = log.clone();
            move || {
                let log = log.clone();
                Box::new(move |position: FinalPosition| log.borrow_mut().push(position))
                    as Box<dyn FnOnce(FinalPosition)>
            }
        };
        (log, make)
    }

    #[test]
    fn test_runs_to_end() {
        let mut animator = PropertyAnimator::new(shape(), &fade_out(1.0)).unwrap();
        assert_eq!(animator.state(), AnimatorState::Inactive);

        animator.start(0.0).unwrap();
        animator.advance(0.5).unwrap();
        assert!((opacity(&animator) - 0.5).abs() < 1e-6);

        animator.advance(0.5).unwrap();
        assert_eq!(animator.state(), AnimatorState::Stopped);
        assert_eq!(animator.final_position(), Some(FinalPosition::End));
        assert_eq!(opacity(&animator), 0.0);
    }

    #[test]
    fn test_inactive_animator_ignores_frames() {
        let mut animator = PropertyAnimator::new(shape(), &fade_out(1.0)).unwrap();
        animator.advance(0.5).unwrap();
        assert_eq!(opacity(&animator), 1.0);
        assert_eq!(animator.elapsed(), 0.0);
    }

    #[test]
    fn test_delay_holds_values() {
        let descriptor = AnimationDescriptor::builder(1.0)
            .delay(0.25)
            .change(key(PropertyKind::Opacity), 0.0)
            .build()
            .unwrap();
        let mut animator = PropertyAnimator::new(shape(), &descriptor).unwrap();
        animator.start(0.25).unwrap();

        animator.advance(0.4).unwrap();
        assert_eq!(opacity(&animator), 1.0);
        assert_eq!(animator.elapsed(), 0.0);

        // 0.1 of the delay left, 0.4 into the run
        animator.advance(0.5).unwrap();
        assert!((opacity(&animator) - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_add_animations_while_running_starts_next_frame() {
        let mut animator = PropertyAnimator::new(shape(), &fade_out(1.0)).unwrap();
        animator.start(0.0).unwrap();
        animator.advance(0.5).unwrap();

        animator
            .add_animations(
                [PropertyChange::new(key(PropertyKind::CornerRadius), 50.0).unwrap()],
                0.0,
            )
            .unwrap();
        assert_eq!(radius(&animator), 0.0);

        animator.advance(0.25).unwrap();
        assert!((radius(&animator) - 25.0).abs() < 1e-4);

        animator.advance(0.25).unwrap();
        assert_eq!(radius(&animator), 50.0);
    }

    #[test]
    fn test_add_animations_with_delay_factor() {
        let mut animator = PropertyAnimator::new(shape(), &fade_out(1.0)).unwrap();
        animator.start(0.0).unwrap();
        animator.advance(0.2).unwrap();

        // Remaining 0.8s, half of it waits
        animator
            .add_animations(
                [PropertyChange::new(key(PropertyKind::CornerRadius), 40.0).unwrap()],
                0.5,
            )
            .unwrap();
        animator.advance(0.3).unwrap();
        assert_eq!(radius(&animator), 0.0);

        animator.advance(0.3).unwrap();
        assert!((radius(&animator) - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_add_animations_before_start_uses_whole_run() {
        let mut animator = PropertyAnimator::new(shape(), &fade_out(2.0)).unwrap();
        animator
            .add_animations(
                [PropertyChange::new(key(PropertyKind::CornerRadius), 10.0).unwrap()],
                0.5,
            )
            .unwrap();
        animator.start(0.0).unwrap();

        animator.advance(1.0).unwrap();
        assert_eq!(radius(&animator), 0.0);
        animator.advance(0.5).unwrap();
        assert!((radius(&animator) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_add_animations_validation() {
        let mut animator = PropertyAnimator::new(shape(), &fade_out(1.0)).unwrap();
        assert_eq!(
            animator.add_animations([], 1.5),
            Err(AnimationError::InvalidDelayFactor(1.5))
        );

        let unknown = PropertyChange::new(key(PropertyKind::Color), Color::RED).unwrap();
        assert_eq!(
            animator.add_animations([unknown], 0.0),
            Err(AnimationError::Property(PropertyError::UnknownProperty(
                key(PropertyKind::Color)
            )))
        );
    }

    #[test]
    fn test_stop_at_current_keeps_sampled_values() {
        let mut animator = PropertyAnimator::new(shape(), &fade_out(1.0)).unwrap();
        animator.start(0.0).unwrap();
        animator.advance(0.3).unwrap();
        animator.stop(FinalPosition::Current).unwrap();

        assert!((opacity(&animator) - 0.7).abs() < 1e-5);
        assert_eq!(animator.final_position(), Some(FinalPosition::Current));

        // Further frames change nothing
        animator.advance(1.0).unwrap();
        assert!((opacity(&animator) - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_stop_at_start_and_end() {
        let mut animator = PropertyAnimator::new(shape(), &fade_out(1.0)).unwrap();
        animator.start(0.0).unwrap();
        animator.advance(0.3).unwrap();
        animator.stop(FinalPosition::Start).unwrap();
        assert_eq!(opacity(&animator), 1.0);

        let mut animator = PropertyAnimator::new(shape(), &fade_out(1.0)).unwrap();
        animator.start(0.0).unwrap();
        animator.advance(0.3).unwrap();
        animator.stop(FinalPosition::End).unwrap();
        assert_eq!(opacity(&animator), 0.0);
    }

    #[test]
    fn test_stop_twice_fires_once() {
        let (log, observer) = recorder();
        let mut animator = PropertyAnimator::new(shape(), &fade_out(1.0)).unwrap();
        animator.add_completion(observer()).unwrap();
        animator.start(0.0).unwrap();

        animator.stop(FinalPosition::Current).unwrap();
        animator.stop(FinalPosition::End).unwrap();
        assert_eq!(*log.borrow(), vec![FinalPosition::Current]);
    }

    #[test]
    fn test_observers_fire_in_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut animator = PropertyAnimator::new(shape(), &fade_out(0.5)).unwrap();
        for tag in ["first", "second", "third"] {
            let order = order.clone();
            animator
                .add_completion(move |position| order.borrow_mut().push((tag, position)))
                .unwrap();
        }
        animator.start(0.0).unwrap();
        animator.advance(1.0).unwrap();

        assert_eq!(
            *order.borrow(),
            vec![
                ("first", FinalPosition::End),
                ("second", FinalPosition::End),
                ("third", FinalPosition::End),
            ]
        );
    }

    #[test]
    fn test_panicking_observer_is_isolated() {
        let (log, observer) = recorder();
        let mut animator = PropertyAnimator::new(shape(), &fade_out(1.0)).unwrap();
        animator
            .add_completion(|_| panic!("observer failure"))
            .unwrap();
        animator.add_completion(observer()).unwrap();

        animator.start(0.0).unwrap();
        animator.stop(FinalPosition::End).unwrap();
        assert_eq!(*log.borrow(), vec![FinalPosition::End]);
    }

    #[test]
    fn test_stopped_animator_rejects_changes() {
        let mut animator = PropertyAnimator::new(shape(), &fade_out(1.0)).unwrap();
        animator.stop(FinalPosition::End).unwrap();
        assert_eq!(animator.state(), AnimatorState::Stopped);

        assert!(matches!(
            animator.start(0.0),
            Err(AnimationError::InvalidState { .. })
        ));
        assert!(matches!(
            animator.add_completion(|_| {}),
            Err(AnimationError::InvalidState { .. })
        ));
        assert!(matches!(
            animator.add_animations([], 0.0),
            Err(AnimationError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_pause_and_resume() {
        let mut animator = PropertyAnimator::new(shape(), &fade_out(1.0)).unwrap();
        animator.start(0.0).unwrap();
        animator.advance(0.25).unwrap();
        animator.pause().unwrap();
        assert!(!animator.is_running());
        assert_eq!(animator.state(), AnimatorState::Active);

        animator.advance(0.5).unwrap();
        assert!((opacity(&animator) - 0.75).abs() < 1e-5);

        animator.start(0.0).unwrap();
        animator.advance(0.25).unwrap();
        assert!((opacity(&animator) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_reversed_run_ends_at_start() {
        let (log, observer) = recorder();
        let mut animator = PropertyAnimator::new(shape(), &fade_out(1.0)).unwrap();
        animator.add_completion(observer()).unwrap();
        animator.start(0.0).unwrap();
        animator.advance(0.6).unwrap();

        animator.set_reversed(true).unwrap();
        animator.advance(0.2).unwrap();
        assert!((opacity(&animator) - 0.6).abs() < 1e-5);

        animator.advance(1.0).unwrap();
        assert_eq!(opacity(&animator), 1.0);
        assert_eq!(*log.borrow(), vec![FinalPosition::Start]);
    }

    #[test]
    fn test_scrubbing_requires_paused_animator() {
        let mut animator = PropertyAnimator::new(shape(), &fade_out(1.0)).unwrap();
        animator.set_fraction_complete(0.4).unwrap();
        assert_eq!(animator.state(), AnimatorState::Active);
        assert!(!animator.is_running());
        assert!((opacity(&animator) - 0.6).abs() < 1e-5);
        assert!((animator.fraction_complete() - 0.4).abs() < 1e-6);

        animator.start(0.0).unwrap();
        assert!(matches!(
            animator.set_fraction_complete(0.1),
            Err(AnimationError::InvalidState { .. })
        ));

        animator.advance(0.7).unwrap();
        assert_eq!(animator.state(), AnimatorState::Stopped);
    }

    #[test]
    fn test_autoreverse_is_ignored() {
        let descriptor = AnimationDescriptor::builder(1.0)
            .change(key(PropertyKind::Opacity), 0.0)
            .autoreverse(true)
            .build()
            .unwrap();
        let mut animator = PropertyAnimator::new(shape(), &descriptor).unwrap();
        animator.start(0.0).unwrap();
        animator.advance(1.0).unwrap();
        assert_eq!(opacity(&animator), 0.0);
        assert_eq!(animator.final_position(), Some(FinalPosition::End));
    }

    #[test]
    fn test_keyframe_animator_follows_segments() {
        let track = KeyframeTrack::builder()
            .segment(0.0, 0.5, key(PropertyKind::Opacity), 0.5)
            .segment(0.75, 0.25, key(PropertyKind::CornerRadius), 20.0)
            .build()
            .unwrap();
        let mut animator =
            PropertyAnimator::with_keyframes(shape(), 2.0, TimingCurve::Linear, track).unwrap();
        animator.start(0.0).unwrap();

        animator.advance(1.0).unwrap();
        assert!((opacity(&animator) - 0.5).abs() < 1e-5);
        assert_eq!(radius(&animator), 0.0);

        animator.advance(0.75).unwrap();
        assert!((radius(&animator) - 10.0).abs() < 1e-4);

        animator.advance(0.25).unwrap();
        assert_eq!(radius(&animator), 20.0);
        assert_eq!(
            animator.animated_keys(),
            vec![key(PropertyKind::Opacity), key(PropertyKind::CornerRadius)]
        );
    }

    #[test]
    fn test_rejects_unknown_properties() {
        let descriptor = AnimationDescriptor::builder(1.0)
            .change(key(PropertyKind::Position), kinetic_core::Point::ZERO)
            .build()
            .unwrap();
        assert!(matches!(
            PropertyAnimator::new(shape(), &descriptor),
            Err(AnimationError::Property(PropertyError::UnknownProperty(_)))
        ));
    }
}
