//! Demo catalog
//!
//! Each demo animates the same shape with one of the API styles and an
//! optional script of actions applied at fixed points in time.

use anyhow::{Context, Result};
use clap::ValueEnum;
use kinetic_animation::{
    animate, AnimateOptions, AnimationDescriptor, AnimationScheduler, AnimationTransaction,
    AnimatorId, FinalPosition, KeyframeTrack, PropertyAnimator, TimingCurve,
};
use kinetic_core::{
    Color, NodeId, Point, PropertyChange, PropertyKey, PropertyKind, PropertySnapshot, Size,
};
use tracing::info;

/// Node the demos animate
pub const SHAPE: NodeId = NodeId(1);

fn key(kind: PropertyKind) -> PropertyKey {
    PropertyKey::new(SHAPE, kind)
}

/// Available demos
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    /// Begin/commit transaction changing color and size
    BeginCommit,
    /// Block animation moving and rounding the shape after a delay
    Block,
    /// Block animation growing the shape on an under-damped spring
    Spring,
    /// Keyframe track touching one property per quarter
    Keyframes,
    /// Property animator built from a descriptor
    PropertyAnimator,
    /// Animations appended to a running animator
    AddAnimations,
    /// Animator stopped halfway at its current values
    StopMidway,
    /// Animator reversed halfway back to its start values
    Reverse,
    /// Animator scrubbed by hand between paused and running stretches
    Scrub,
    /// Transaction asking for autoreverse, which is ignored
    Autoreverse,
}

impl Demo {
    pub const ALL: [Demo; 10] = [
        Demo::BeginCommit,
        Demo::Block,
        Demo::Spring,
        Demo::Keyframes,
        Demo::PropertyAnimator,
        Demo::AddAnimations,
        Demo::StopMidway,
        Demo::Reverse,
        Demo::Scrub,
        Demo::Autoreverse,
    ];

    /// Command-line name
    pub fn name(&self) -> &'static str {
        match self {
            Demo::BeginCommit => "begin-commit",
            Demo::Block => "block",
            Demo::Spring => "spring",
            Demo::Keyframes => "keyframes",
            Demo::PropertyAnimator => "property-animator",
            Demo::AddAnimations => "add-animations",
            Demo::StopMidway => "stop-midway",
            Demo::Reverse => "reverse",
            Demo::Scrub => "scrub",
            Demo::Autoreverse => "autoreverse",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Demo::BeginCommit => "begin/commit transaction: red to blue, 100 to 200 (1s ease-in-out)",
            Demo::Block => "block animation: move to (150, 250) and round corners after 0.25s",
            Demo::Spring => "block animation on a bouncy spring: grow to 200",
            Demo::Keyframes => "keyframes: color, size, radius, position one quarter each (2s)",
            Demo::PropertyAnimator => "property animator: fade to 0.5 while turning green (ease-in)",
            Demo::AddAnimations => "property animator: round corners added halfway through",
            Demo::StopMidway => "property animator: stopped at 1s of 2s, keeping current values",
            Demo::Reverse => "property animator: reversed at 1s, returns to start",
            Demo::Scrub => "property animator: scrubbed while paused, resumed, paused and scrubbed again",
            Demo::Autoreverse => "transaction with autoreverse requested (ignored, warning logged)",
        }
    }

    /// Build the animator and its script for a shape
    pub fn plan(&self, shape: &PropertySnapshot) -> Result<DemoPlan> {
        let shape = shape.clone();
        let plan = match self {
            Demo::BeginCommit => {
                let mut transaction = AnimationTransaction::begin(shape);
                transaction.set_duration(1.0);
                transaction.set_curve(TimingCurve::ease_in_out());
                transaction.set(key(PropertyKind::Color), Color::BLUE);
                transaction.set(key(PropertyKind::Size), Size::square(200.0));
                transaction.on_completion(|position| info!(?position, "transaction committed"));
                DemoPlan::new(transaction.commit()?)
            }
            Demo::Block => {
                let options = AnimateOptions::new(1.0)
                    .delay(0.25)
                    .curve(TimingCurve::ease_out());
                DemoPlan::new(animate(shape, options, |changes| {
                    changes
                        .set(key(PropertyKind::Position), Point::new(150.0, 250.0))
                        .set(key(PropertyKind::CornerRadius), 50.0);
                })?)
            }
            Demo::Spring => {
                let options = AnimateOptions::new(1.5).curve(TimingCurve::spring(0.3, 0.0)?);
                DemoPlan::new(animate(shape, options, |changes| {
                    changes.set(key(PropertyKind::Size), Size::square(200.0));
                })?)
            }
            Demo::Keyframes => {
                let track = KeyframeTrack::builder()
                    .segment(0.0, 0.25, key(PropertyKind::Color), Color::ORANGE)
                    .segment(0.25, 0.25, key(PropertyKind::Size), Size::square(200.0))
                    .segment(0.5, 0.25, key(PropertyKind::CornerRadius), 50.0)
                    .segment(0.75, 0.25, key(PropertyKind::Position), Point::new(100.0, 100.0))
                    .build()?;
                let mut animator =
                    PropertyAnimator::with_keyframes(shape, 2.0, TimingCurve::linear(), track)?;
                animator.start(0.0)?;
                DemoPlan::new(animator)
            }
            Demo::PropertyAnimator => {
                let descriptor = AnimationDescriptor::builder(1.0)
                    .curve(TimingCurve::ease_in())
                    .change(key(PropertyKind::Color), Color::GREEN)
                    .change(key(PropertyKind::Opacity), 0.5)
                    .build()?;
                let mut animator = PropertyAnimator::new(shape, &descriptor)?;
                animator.start(0.0)?;
                DemoPlan::new(animator)
            }
            Demo::AddAnimations => DemoPlan::new(grow_linear(shape)?).then(
                0.5,
                Action::AddAnimations {
                    changes: vec![PropertyChange::new(key(PropertyKind::CornerRadius), 50.0)?],
                    delay_factor: 0.0,
                },
            ),
            Demo::StopMidway => {
                DemoPlan::new(grow_linear(shape)?).then(1.0, Action::Stop(FinalPosition::Current))
            }
            Demo::Reverse => DemoPlan::new(grow_linear(shape)?).then(1.0, Action::Reverse(true)),
            Demo::Scrub => {
                let descriptor = grow_descriptor()?;
                DemoPlan::new(PropertyAnimator::new(shape, &descriptor)?)
                    .then(0.0, Action::Scrub(0.25))
                    .then(0.5, Action::Scrub(0.5))
                    .then(1.0, Action::Resume)
                    .then(1.25, Action::Pause)
                    .then(1.5, Action::Scrub(0.75))
                    .then(2.0, Action::Resume)
            }
            Demo::Autoreverse => {
                let mut transaction = AnimationTransaction::begin(shape);
                transaction.set_duration(1.0);
                transaction.set_autoreverses(true);
                transaction.set(key(PropertyKind::Position), Point::new(200.0, 0.0));
                DemoPlan::new(transaction.commit()?)
            }
        };
        Ok(plan)
    }
}

fn grow_descriptor() -> Result<AnimationDescriptor> {
    AnimationDescriptor::builder(2.0)
        .change(key(PropertyKind::Size), Size::square(200.0))
        .change(key(PropertyKind::Color), Color::BLUE)
        .build()
        .context("Failed to build descriptor")
}

fn grow_linear(shape: PropertySnapshot) -> Result<PropertyAnimator> {
    let mut animator = PropertyAnimator::new(shape, &grow_descriptor()?)?;
    animator.start(0.0)?;
    Ok(animator)
}

/// Something done to a demo's animator at a scripted time
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    AddAnimations {
        changes: Vec<PropertyChange>,
        delay_factor: f32,
    },
    Stop(FinalPosition),
    Pause,
    Resume,
    Reverse(bool),
    Scrub(f32),
}

impl Action {
    /// Apply to a registered animator; appended properties are claimed in
    /// the scheduler
    pub fn apply(&self, scheduler: &mut AnimationScheduler, id: AnimatorId) -> Result<()> {
        if let Action::AddAnimations {
            changes,
            delay_factor,
        } = self
        {
            scheduler.add_animations(id, changes.iter().copied(), *delay_factor)?;
            return Ok(());
        }

        let animator = scheduler
            .get_mut(id)
            .context("Demo animator left the scheduler")?;
        match self {
            Action::AddAnimations { .. } => {}
            Action::Stop(position) => animator.stop(*position)?,
            Action::Pause => animator.pause()?,
            Action::Resume => animator.start(0.0)?,
            Action::Reverse(reversed) => animator.set_reversed(*reversed)?,
            Action::Scrub(fraction) => animator.set_fraction_complete(*fraction)?,
        }
        Ok(())
    }
}

/// An action and the simulated time it is due at
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptStep {
    pub at: f32,
    pub action: Action,
}

/// Animator plus scripted actions, sorted by time
pub struct DemoPlan {
    pub animator: PropertyAnimator,
    pub script: Vec<ScriptStep>,
}

impl DemoPlan {
    pub fn new(animator: PropertyAnimator) -> Self {
        Self {
            animator,
            script: Vec::new(),
        }
    }

    pub fn then(mut self, at: f32, action: Action) -> Self {
        self.script.push(ScriptStep { at, action });
        self.script.sort_by(|a, b| a.at.total_cmp(&b.at));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShapeConfig;
    use kinetic_animation::AnimatorState;

    fn shape() -> PropertySnapshot {
        ShapeConfig::default().snapshot(SHAPE).unwrap()
    }

    #[test]
    fn names_round_trip_through_clap() {
        for demo in Demo::ALL {
            assert_eq!(Demo::from_str(demo.name(), false), Ok(demo));
        }
    }

    #[test]
    fn every_demo_builds() {
        for demo in Demo::ALL {
            let plan = demo.plan(&shape()).unwrap();
            assert_ne!(plan.animator.state(), AnimatorState::Stopped, "{}", demo.name());
        }
    }

    #[test]
    fn only_scrub_starts_inactive() {
        for demo in Demo::ALL {
            let plan = demo.plan(&shape()).unwrap();
            let inactive = plan.animator.state() == AnimatorState::Inactive;
            assert_eq!(inactive, demo == Demo::Scrub, "{}", demo.name());
        }
    }

    #[test]
    fn script_is_sorted() {
        let plan = DemoPlan::new(grow_linear(shape()).unwrap())
            .then(1.0, Action::Resume)
            .then(0.5, Action::Pause);
        let times: Vec<f32> = plan.script.iter().map(|s| s.at).collect();
        assert_eq!(times, vec![0.5, 1.0]);
    }
}
