//! Kinetic Animation System
//!
//! Timing curves, keyframe tracks, and property animators, plus the three
//! API styles built on them.
//!
//! # Features
//!
//! - **Timing Curves**: linear, cubic bezier, and damped-spring easing
//! - **Keyframe Tracks**: overlapping segments within one run
//! - **Property Animators**: start, pause, reverse, scrub, append, stop
//! - **Transactions**: begin/commit style animations
//! - **Block Animations**: closure style one-shot animations
//! - **Scheduler**: frame ticking with duplicate-target detection

pub mod animator;
pub mod block;
pub mod curve;
pub mod descriptor;
pub mod error;
pub mod keyframe;
pub mod scheduler;
pub mod spring;
pub mod timeline;
pub mod transaction;

pub use animator::{AnimatorState, CompletionObserver, FinalPosition, PropertyAnimator};
pub use block::{animate, animate_with_completion, AnimateOptions, ChangeSet};
pub use curve::{CubicBezier, TimingCurve};
pub use descriptor::{AnimationDescriptor, AnimationOptions, DescriptorBuilder};
pub use error::{AnimationError, Result};
pub use keyframe::{KeyframeSegment, KeyframeTrack, KeyframeTrackBuilder};
pub use scheduler::{AnimationScheduler, AnimatorId, DuplicatePolicy, Scene};
pub use spring::SpringCurve;
pub use timeline::{EntryBody, Timeline, TimelineEntryId};
pub use transaction::AnimationTransaction;
