//! Keyframe tracks
//!
//! A keyframe track subdivides one run into segments. Each segment owns a
//! window of the parent's progress (`relative_start` plus
//! `relative_duration`, both fractions of the run) and a set of property
//! changes. Segments may overlap.
//!
//! Within its window a segment eases linearly against the parent's
//! progress; the parent's timing curve is applied before segments are
//! sampled, so wrapping a track in a non-linear curve bends every segment.

use kinetic_core::{
    AnimatableValue, Interpolate, PropertyChange, PropertyError, PropertyKey, PropertySnapshot,
};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::error::{AnimationError, Result};

/// One window of a keyframe track
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeSegment {
    relative_start: f32,
    relative_duration: f32,
    changes: SmallVec<[PropertyChange; 4]>,
}

impl KeyframeSegment {
    /// Create a segment
    ///
    /// Start and duration must be within `0.0..=1.0`. A segment running
    /// past the end of the track is clamped to end at 1.0.
    pub fn new(
        relative_start: f32,
        relative_duration: f32,
        changes: impl IntoIterator<Item = PropertyChange>,
    ) -> Result<Self> {
        if !relative_start.is_finite() || !(0.0..=1.0).contains(&relative_start) {
            return Err(AnimationError::InvalidKeyframe(format!(
                "relative start must be within 0.0..=1.0, got {relative_start}"
            )));
        }
        if !relative_duration.is_finite() || !(0.0..=1.0).contains(&relative_duration) {
            return Err(AnimationError::InvalidKeyframe(format!(
                "relative duration must be within 0.0..=1.0, got {relative_duration}"
            )));
        }

        let mut relative_duration = relative_duration;
        if relative_start + relative_duration > 1.0 {
            debug!(
                relative_start,
                relative_duration, "keyframe segment runs past the track end, clamping"
            );
            relative_duration = 1.0 - relative_start;
        }

        Ok(Self {
            relative_start,
            relative_duration,
            changes: changes.into_iter().collect(),
        })
    }

    pub fn relative_start(&self) -> f32 {
        self.relative_start
    }

    pub fn relative_duration(&self) -> f32 {
        self.relative_duration
    }

    pub fn relative_end(&self) -> f32 {
        self.relative_start + self.relative_duration
    }

    pub fn changes(&self) -> &[PropertyChange] {
        &self.changes
    }

    /// Progress within this segment for a given parent progress
    ///
    /// `None` before the segment starts; saturates at 1.0 after it ends.
    pub fn local_progress(&self, parent: f32) -> Option<f32> {
        segment_progress(self.relative_start, self.relative_duration, parent)
    }
}

fn segment_progress(start: f32, duration: f32, parent: f32) -> Option<f32> {
    if parent < start {
        return None;
    }
    if duration <= 0.0 {
        return Some(1.0);
    }
    Some(((parent - start) / duration).min(1.0))
}

/// An ordered set of keyframe segments within one run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyframeTrack {
    segments: Vec<KeyframeSegment>,
}

impl KeyframeTrack {
    /// Create a track; segments are ordered by start (stable for ties)
    pub fn new(segments: impl IntoIterator<Item = KeyframeSegment>) -> Self {
        let mut segments: Vec<KeyframeSegment> = segments.into_iter().collect();
        segments.sort_by(|a, b| a.relative_start.total_cmp(&b.relative_start));
        Self { segments }
    }

    pub fn builder() -> KeyframeTrackBuilder {
        KeyframeTrackBuilder::new()
    }

    pub fn segments(&self) -> &[KeyframeSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Every property touched by the track, in first-touch order
    pub fn keys(&self) -> Vec<PropertyKey> {
        let mut keys = Vec::new();
        for change in self.segments.iter().flat_map(|s| s.changes.iter()) {
            if !keys.contains(&change.key) {
                keys.push(change.key);
            }
        }
        keys
    }

    /// Capture from-values against the values current at activation
    ///
    /// Each segment starts from the target of the previous segment touching
    /// the same property, or from `base` if none did.
    pub(crate) fn resolve(&self, base: &PropertySnapshot) -> Result<ResolvedTrack> {
        let mut latest: FxHashMap<PropertyKey, AnimatableValue> = FxHashMap::default();
        let mut initial = Vec::new();
        let mut segments = Vec::with_capacity(self.segments.len());

        for segment in &self.segments {
            let mut values = SmallVec::new();
            for change in &segment.changes {
                let from = match latest.get(&change.key) {
                    Some(value) => *value,
                    None => {
                        let value = base
                            .get(change.key)
                            .ok_or(PropertyError::UnknownProperty(change.key))?;
                        initial.push((change.key, value));
                        value
                    }
                };
                latest.insert(change.key, change.value);
                values.push(ResolvedChange {
                    key: change.key,
                    from,
                    to: change.value,
                });
            }
            segments.push(ResolvedSegment {
                start: segment.relative_start,
                duration: segment.relative_duration,
                values,
            });
        }

        Ok(ResolvedTrack { initial, segments })
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct ResolvedChange {
    pub key: PropertyKey,
    pub from: AnimatableValue,
    pub to: AnimatableValue,
}

#[derive(Clone, Debug)]
struct ResolvedSegment {
    start: f32,
    duration: f32,
    values: SmallVec<[ResolvedChange; 4]>,
}

/// A keyframe track with from-values captured
#[derive(Clone, Debug)]
pub(crate) struct ResolvedTrack {
    initial: Vec<(PropertyKey, AnimatableValue)>,
    segments: Vec<ResolvedSegment>,
}

impl ResolvedTrack {
    /// Write the track's values at `progress` into `values`
    pub(crate) fn sample(&self, progress: f32, values: &mut PropertySnapshot) -> Result<()> {
        // Untouched-so-far properties hold their activation value, which
        // also undoes later segments when progress moves backwards.
        for (key, value) in &self.initial {
            values.set(*key, *value)?;
        }
        for segment in &self.segments {
            let Some(local) = segment_progress(segment.start, segment.duration, progress) else {
                continue;
            };
            for change in &segment.values {
                values.set(change.key, change.from.lerp(&change.to, local))?;
            }
        }
        Ok(())
    }
}

/// Fluent builder for keyframe tracks
///
/// # Example
///
/// ```ignore
/// let track = KeyframeTrack::builder()
///     .segment(0.0, 0.5, color, Color::RED)
///     .segment(0.5, 0.25, size, Size::square(200.0))
///     .segment(0.75, 0.25, radius, 40.0)
///     .build()?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct KeyframeTrackBuilder {
    segments: Vec<KeyframeSegment>,
    error: Option<AnimationError>,
}

impl KeyframeTrackBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a segment with several changes
    pub fn add_keyframe(
        mut self,
        relative_start: f32,
        relative_duration: f32,
        changes: impl IntoIterator<Item = PropertyChange>,
    ) -> Self {
        if self.error.is_none() {
            match KeyframeSegment::new(relative_start, relative_duration, changes) {
                Ok(segment) => self.segments.push(segment),
                Err(err) => self.error = Some(err),
            }
        }
        self
    }

    /// Add a segment changing a single property
    pub fn segment(
        self,
        relative_start: f32,
        relative_duration: f32,
        key: PropertyKey,
        value: impl Into<AnimatableValue>,
    ) -> Self {
        match PropertyChange::new(key, value) {
            Ok(change) => self.add_keyframe(relative_start, relative_duration, [change]),
            Err(err) => {
                let mut builder = self;
                builder.error.get_or_insert(err.into());
                builder
            }
        }
    }

    /// Build the track, reporting the first invalid segment
    pub fn build(self) -> Result<KeyframeTrack> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(KeyframeTrack::new(self.segments)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_core::{Color, NodeId, PropertyKind, Size};

    fn key(kind: PropertyKind) -> PropertyKey {
        PropertyKey::new(NodeId(1), kind)
    }

    fn base() -> PropertySnapshot {
        PropertySnapshot::new()
            .with(key(PropertyKind::Color), Color::RED)
            .unwrap()
            .with(key(PropertyKind::Size), Size::square(100.0))
            .unwrap()
            .with(key(PropertyKind::CornerRadius), 0.0)
            .unwrap()
    }

    fn radius(values: &PropertySnapshot) -> f32 {
        values
            .get(key(PropertyKind::CornerRadius))
            .and_then(|v| v.as_scalar())
            .unwrap()
    }

    #[test]
    fn test_segment_window_limits_changes() {
        let track = KeyframeTrack::builder()
            .segment(0.75, 0.25, key(PropertyKind::CornerRadius), 40.0)
            .build()
            .unwrap();
        let resolved = track.resolve(&base()).unwrap();
        let mut values = base();

        for progress in [0.0, 0.3, 0.5, 0.74] {
            resolved.sample(progress, &mut values).unwrap();
            assert_eq!(radius(&values), 0.0, "progress {progress}");
        }

        resolved.sample(0.875, &mut values).unwrap();
        assert!((radius(&values) - 20.0).abs() < 1e-4);

        resolved.sample(1.0, &mut values).unwrap();
        assert_eq!(radius(&values), 40.0);
    }

    #[test]
    fn test_segments_past_end_are_clamped() {
        let segment = KeyframeSegment::new(0.75, 0.5, []).unwrap();
        assert_eq!(segment.relative_duration(), 0.25);
        assert_eq!(segment.relative_end(), 1.0);
    }

    #[test]
    fn test_rejects_out_of_range_segments() {
        assert!(matches!(
            KeyframeSegment::new(1.5, 0.1, []),
            Err(AnimationError::InvalidKeyframe(_))
        ));
        assert!(matches!(
            KeyframeSegment::new(0.2, -0.1, []),
            Err(AnimationError::InvalidKeyframe(_))
        ));
        assert!(KeyframeTrack::builder()
            .segment(0.0, 0.5, key(PropertyKind::Opacity), 0.5)
            .segment(f32::NAN, 0.5, key(PropertyKind::Opacity), 0.5)
            .build()
            .is_err());
    }

    #[test]
    fn test_builder_reports_shape_mismatch() {
        let err = KeyframeTrack::builder()
            .segment(0.0, 1.0, key(PropertyKind::Color), 1.0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            AnimationError::Property(PropertyError::PropertyTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_chained_segments_start_from_previous_target() {
        let track = KeyframeTrack::builder()
            .segment(0.0, 0.5, key(PropertyKind::CornerRadius), 10.0)
            .segment(0.5, 0.5, key(PropertyKind::CornerRadius), 30.0)
            .build()
            .unwrap();
        let resolved = track.resolve(&base()).unwrap();
        let mut values = base();

        resolved.sample(0.25, &mut values).unwrap();
        assert!((radius(&values) - 5.0).abs() < 1e-4);
        resolved.sample(0.75, &mut values).unwrap();
        assert!((radius(&values) - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_overlapping_segments_animate_independently() {
        let track = KeyframeTrack::builder()
            .segment(0.5, 0.25, key(PropertyKind::Size), Size::square(200.0))
            .segment(0.5, 0.5, key(PropertyKind::Color), Color::BLUE)
            .build()
            .unwrap();
        let resolved = track.resolve(&base()).unwrap();
        let mut values = base();

        resolved.sample(0.75, &mut values).unwrap();
        assert_eq!(
            values.get(key(PropertyKind::Size)),
            Some(Size::square(200.0).into())
        );
        let color = values
            .get(key(PropertyKind::Color))
            .and_then(|v| v.as_color())
            .unwrap();
        assert!(color.approx_eq(&Color::rgb(0.5, 0.0, 0.5), 1e-4));
    }

    #[test]
    fn test_sampling_backwards_restores_activation_values() {
        let track = KeyframeTrack::builder()
            .segment(0.5, 0.5, key(PropertyKind::CornerRadius), 40.0)
            .build()
            .unwrap();
        let resolved = track.resolve(&base()).unwrap();
        let mut values = base();

        resolved.sample(1.0, &mut values).unwrap();
        assert_eq!(radius(&values), 40.0);
        resolved.sample(0.2, &mut values).unwrap();
        assert_eq!(radius(&values), 0.0);
    }

    #[test]
    fn test_segments_sorted_and_keys_deduplicated() {
        let track = KeyframeTrack::builder()
            .segment(0.5, 0.5, key(PropertyKind::Color), Color::BLUE)
            .segment(0.0, 0.5, key(PropertyKind::Size), Size::square(50.0))
            .segment(0.25, 0.5, key(PropertyKind::Color), Color::GREEN)
            .build()
            .unwrap();
        let starts: Vec<f32> = track.segments().iter().map(|s| s.relative_start()).collect();
        assert_eq!(starts, vec![0.0, 0.25, 0.5]);
        assert_eq!(
            track.keys(),
            vec![key(PropertyKind::Size), key(PropertyKind::Color)]
        );
    }
}
