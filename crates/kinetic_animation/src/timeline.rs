//! Timeline of animation entries within one run
//!
//! Each entry has an offset and a duration in seconds measured from the
//! run's activation. Entries capture their from-values the first time
//! they are sampled past their offset, so appended animations pick up
//! wherever the properties are at that frame.

use kinetic_core::{Interpolate, PropertyChange, PropertyError, PropertyKey, PropertySnapshot};
use slotmap::{new_key_type, SlotMap};

use crate::curve::TimingCurve;
use crate::error::Result;
use crate::keyframe::{KeyframeTrack, ResolvedChange, ResolvedTrack};

new_key_type! {
    pub struct TimelineEntryId;
}

/// What an entry animates
#[derive(Clone, Debug)]
pub enum EntryBody {
    /// Plain property changes, all sharing the entry's progress
    Changes(Vec<PropertyChange>),
    /// Keyframe segments within the entry's duration
    Keyframes(KeyframeTrack),
}

impl EntryBody {
    fn keys(&self) -> Vec<PropertyKey> {
        match self {
            EntryBody::Changes(changes) => changes.iter().map(|c| c.key).collect(),
            EntryBody::Keyframes(track) => track.keys(),
        }
    }

    fn resolve(&self, values: &PropertySnapshot) -> Result<Resolved> {
        match self {
            EntryBody::Changes(changes) => changes
                .iter()
                .map(|change| {
                    let from = values
                        .get(change.key)
                        .ok_or(PropertyError::UnknownProperty(change.key))?;
                    Ok(ResolvedChange {
                        key: change.key,
                        from,
                        to: change.value,
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(Resolved::Changes),
            EntryBody::Keyframes(track) => track.resolve(values).map(Resolved::Keyframes),
        }
    }
}

#[derive(Clone, Debug)]
enum Resolved {
    Changes(Vec<ResolvedChange>),
    Keyframes(ResolvedTrack),
}

impl Resolved {
    fn apply(&self, eased: f32, values: &mut PropertySnapshot) -> Result<()> {
        match self {
            Resolved::Changes(changes) => {
                for change in changes {
                    values.set(change.key, change.from.lerp(&change.to, eased))?;
                }
                Ok(())
            }
            Resolved::Keyframes(track) => track.sample(eased, values),
        }
    }
}

/// An entry in a timeline
#[derive(Clone, Debug)]
struct TimelineEntry {
    /// Offset in seconds from run activation
    offset: f32,
    /// Duration in seconds (may be zero)
    duration: f32,
    body: EntryBody,
    resolved: Option<Resolved>,
}

impl TimelineEntry {
    /// Local linear progress, `None` before the entry starts
    fn local_progress(&self, elapsed: f32) -> Option<f32> {
        if elapsed < self.offset {
            return None;
        }
        if self.duration <= 0.0 {
            return Some(1.0);
        }
        Some(((elapsed - self.offset) / self.duration).clamp(0.0, 1.0))
    }
}

/// Ordered entries sharing one clock
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    entries: SlotMap<TimelineEntryId, TimelineEntry>,
    order: Vec<TimelineEntryId>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry at a given offset (seconds)
    pub fn add(&mut self, offset: f32, duration: f32, body: EntryBody) -> TimelineEntryId {
        let id = self.entries.insert(TimelineEntry {
            offset: offset.max(0.0),
            duration: duration.max(0.0),
            body,
            resolved: None,
        });
        self.order.push(id);
        id
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Offset and duration of an entry
    pub fn span(&self, id: TimelineEntryId) -> Option<(f32, f32)> {
        self.entries.get(id).map(|e| (e.offset, e.duration))
    }

    /// Whether an entry has captured its from-values
    pub fn is_started(&self, id: TimelineEntryId) -> bool {
        self.entries
            .get(id)
            .is_some_and(|entry| entry.resolved.is_some())
    }

    /// End of the last entry in seconds
    pub fn end_time(&self) -> f32 {
        self.entries
            .values()
            .map(|e| e.offset + e.duration)
            .fold(0.0, f32::max)
    }

    /// Every property any entry touches, in first-touch order
    pub fn keys(&self) -> Vec<PropertyKey> {
        let mut keys = Vec::new();
        for id in &self.order {
            for key in self.entries[*id].body.keys() {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    /// Write every entry's value at `elapsed` into `values`
    ///
    /// Entries are visited in insertion order; later entries win when they
    /// touch the same property.
    pub fn sample(
        &mut self,
        elapsed: f32,
        curve: &TimingCurve,
        values: &mut PropertySnapshot,
    ) -> Result<()> {
        for id in &self.order {
            let entry = &mut self.entries[*id];
            let local = match entry.local_progress(elapsed) {
                Some(local) => local,
                // Before its offset: only a started entry rewinds to its start
                None if entry.resolved.is_some() => 0.0,
                None => continue,
            };

            if entry.resolved.is_none() {
                entry.resolved = Some(entry.body.resolve(values)?);
            }
            if let Some(resolved) = &entry.resolved {
                resolved.apply(curve.apply(local), values)?;
            }
        }
        Ok(())
    }

    /// Jump every entry to its end, starting any that never ran
    pub fn finish(&mut self, values: &mut PropertySnapshot) -> Result<()> {
        for id in &self.order {
            let entry = &mut self.entries[*id];
            if entry.resolved.is_none() {
                entry.resolved = Some(entry.body.resolve(values)?);
            }
            if let Some(resolved) = &entry.resolved {
                resolved.apply(1.0, values)?;
            }
        }
        Ok(())
    }
}
