//! Animation scheduler
//!
//! Owns every live animator, advances them each frame, and publishes
//! their animated values into a [`Scene`] that a renderer reads.

use std::time::{Duration, Instant};

use indexmap::IndexMap;
use kinetic_core::{AnimatableValue, PropertyChange, PropertyKey};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tracing::{debug, error, warn};

use crate::animator::{AnimatorState, FinalPosition, PropertyAnimator};
use crate::error::{AnimationError, Result};

new_key_type! {
    pub struct AnimatorId;
}

/// What to do when two animators drive the same property
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Warn and let the most recently added animator own the property
    #[default]
    LastWriterWins,
    /// Refuse to add the second animator
    Reject,
}

/// Rendered property values, in first-write order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    values: IndexMap<PropertyKey, AnimatableValue>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: PropertyKey, value: AnimatableValue) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: PropertyKey) -> Option<AnimatableValue> {
        self.values.get(&key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropertyKey, AnimatableValue)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Animators claiming one property, oldest first; the last one owns it
type Claimants = SmallVec<[AnimatorId; 2]>;

/// The animation scheduler that ticks all registered animators
pub struct AnimationScheduler {
    animators: SlotMap<AnimatorId, PropertyAnimator>,
    claims: FxHashMap<PropertyKey, Claimants>,
    scene: Scene,
    policy: DuplicatePolicy,
    last_frame: Instant,
    target_fps: u32,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::default())
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            animators: SlotMap::with_key(),
            claims: FxHashMap::default(),
            scene: Scene::new(),
            policy,
            last_frame: Instant::now(),
            target_fps: 60,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps.max(1);
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Time between frames at the target rate
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps as f64)
    }

    /// Register an animator and claim the properties it drives
    pub fn add(&mut self, animator: PropertyAnimator) -> Result<AnimatorId> {
        let keys = animator.animated_keys();
        self.check_claims(None, &keys)?;

        let id = self.animators.insert(animator);
        self.claim(id, keys);
        Ok(id)
    }

    /// Append changes to a registered animator and claim any new properties
    ///
    /// New properties go through the same duplicate check as [`add`](Self::add).
    pub fn add_animations(
        &mut self,
        id: AnimatorId,
        changes: impl IntoIterator<Item = PropertyChange>,
        delay_factor: f32,
    ) -> Result<()> {
        if !self.animators.contains_key(id) {
            return Err(AnimationError::UnknownAnimator(id));
        }

        let changes: Vec<PropertyChange> = changes.into_iter().collect();
        let mut keys: Vec<PropertyKey> = Vec::with_capacity(changes.len());
        for change in &changes {
            if !keys.contains(&change.key) {
                keys.push(change.key);
            }
        }
        self.check_claims(Some(id), &keys)?;

        self.animators
            .get_mut(id)
            .ok_or(AnimationError::UnknownAnimator(id))?
            .add_animations(changes, delay_factor)?;
        self.claim(id, keys);
        Ok(())
    }

    /// Apply the duplicate policy to `keys` wanted by `claimant`
    fn check_claims(&self, claimant: Option<AnimatorId>, keys: &[PropertyKey]) -> Result<()> {
        for key in keys {
            let Some(owner) = self.live_owner(*key, claimant) else {
                continue;
            };
            match self.policy {
                DuplicatePolicy::Reject => {
                    return Err(AnimationError::DuplicatePropertyTarget(*key));
                }
                DuplicatePolicy::LastWriterWins => {
                    warn!(%key, ?owner, "property already animated, last writer wins");
                }
            }
        }
        Ok(())
    }

    fn claim(&mut self, id: AnimatorId, keys: impl IntoIterator<Item = PropertyKey>) {
        for key in keys {
            let claimants = self.claims.entry(key).or_default();
            claimants.retain(|owner| *owner != id);
            claimants.push(id);
        }
    }

    /// Most recent live claimant of `key` other than `except`
    fn live_owner(&self, key: PropertyKey, except: Option<AnimatorId>) -> Option<AnimatorId> {
        self.claims
            .get(&key)?
            .iter()
            .rev()
            .copied()
            .filter(|owner| Some(*owner) != except)
            .find(|owner| {
                self.animators
                    .get(*owner)
                    .is_some_and(|a| a.state() != AnimatorState::Stopped)
            })
    }

    /// Animator currently publishing `key`
    pub fn owner(&self, key: PropertyKey) -> Option<AnimatorId> {
        self.claims.get(&key)?.last().copied()
    }

    pub fn get(&self, id: AnimatorId) -> Option<&PropertyAnimator> {
        self.animators.get(id)
    }

    pub fn get_mut(&mut self, id: AnimatorId) -> Option<&mut PropertyAnimator> {
        self.animators.get_mut(id)
    }

    /// Remove an animator, handing its properties back to earlier claimants
    pub fn remove(&mut self, id: AnimatorId) -> Option<PropertyAnimator> {
        let animator = self.animators.remove(id)?;
        self.claims.retain(|_, claimants| {
            claimants.retain(|owner| *owner != id);
            !claimants.is_empty()
        });
        Some(animator)
    }

    /// Advance every animator by `dt` seconds and publish their values
    ///
    /// An animator failing to advance is stopped in place and logged; the
    /// others keep running.
    pub fn tick(&mut self, dt: f32) {
        for (id, animator) in self.animators.iter_mut() {
            if let Err(err) = animator.advance(dt) {
                error!(?id, %err, "animator failed to advance, stopping it");
                if let Err(err) = animator.stop(FinalPosition::Current) {
                    error!(?id, %err, "animator failed to stop");
                }
            }
        }
        self.publish();
    }

    /// Tick using wall-clock time since the previous call
    pub fn tick_now(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.tick(dt);
    }

    /// Write each owned property into the scene
    ///
    /// Properties nobody has claimed yet (appended through
    /// [`get_mut`](Self::get_mut)) are adopted by the animator driving them.
    fn publish(&mut self) {
        for (id, animator) in self.animators.iter() {
            for key in animator.animated_keys() {
                let claimants = self.claims.entry(key).or_default();
                if claimants.is_empty() {
                    debug!(%key, ?id, "adopting unclaimed property");
                    claimants.push(id);
                }
                if claimants.last() != Some(&id) {
                    continue;
                }
                if let Some(value) = animator.value(key) {
                    self.scene.set(key, value);
                }
            }
        }
    }

    /// Check if any animator has not stopped yet
    pub fn has_active_animations(&self) -> bool {
        self.animators
            .values()
            .any(|a| a.state() != AnimatorState::Stopped)
    }

    /// Remove and return every stopped animator
    pub fn collect_finished(&mut self) -> Vec<(AnimatorId, PropertyAnimator)> {
        let finished: Vec<AnimatorId> = self
            .animators
            .iter()
            .filter(|(_, a)| a.state() == AnimatorState::Stopped)
            .map(|(id, _)| id)
            .collect();

        finished
            .into_iter()
            .filter_map(|id| self.remove(id).map(|animator| (id, animator)))
            .collect()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Iterate over all animators
    pub fn animators_iter(&self) -> impl Iterator<Item = (AnimatorId, &PropertyAnimator)> {
        self.animators.iter()
    }

    pub fn animator_count(&self) -> usize {
        self.animators.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
