//! Animation error types

use kinetic_core::{PropertyError, PropertyKey};
use thiserror::Error;

use crate::animator::AnimatorState;
use crate::scheduler::AnimatorId;

/// Animation-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Malformed bezier control points or spring parameters
    #[error("Invalid curve parameters: {0}")]
    InvalidCurveParameters(String),

    /// Duration or delay out of range
    #[error("Invalid timing: {0}")]
    InvalidTiming(String),

    /// Keyframe segment outside the parent duration
    #[error("Invalid keyframe: {0}")]
    InvalidKeyframe(String),

    /// Delay factor outside 0.0..=1.0
    #[error("Delay factor must be within 0.0..=1.0, got {0}")]
    InvalidDelayFactor(f32),

    /// Two live animators drive the same property
    #[error("{0} is already driven by another animator")]
    DuplicatePropertyTarget(PropertyKey),

    /// No animator with this id is registered with the scheduler
    #[error("No animator registered as {0:?}")]
    UnknownAnimator(AnimatorId),

    /// Operation not allowed in the animator's current state
    #[error("Cannot {operation} an animator that is {state:?}")]
    InvalidState {
        operation: &'static str,
        state: AnimatorState,
    },

    /// Property lookup or shape failure
    #[error(transparent)]
    Property(#[from] PropertyError),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;

/// Validate a run duration in seconds
pub(crate) fn check_duration(duration: f32) -> Result<()> {
    if duration.is_finite() && duration > 0.0 {
        Ok(())
    } else {
        Err(AnimationError::InvalidTiming(format!(
            "duration must be a positive number of seconds, got {duration}"
        )))
    }
}

/// Validate a delay in seconds
pub(crate) fn check_delay(delay: f32) -> Result<()> {
    if delay.is_finite() && delay >= 0.0 {
        Ok(())
    } else {
        Err(AnimationError::InvalidTiming(format!(
            "delay must be a non-negative number of seconds, got {delay}"
        )))
    }
}
