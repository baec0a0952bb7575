//! Kinetic Core
//!
//! Value types shared by the animation crates:
//!
//! - **Geometry**: `Point`, `Size`, and RGBA `Color`
//! - **Interpolation**: the `Interpolate` trait for blending values
//! - **Properties**: animatable property kinds, keys, and snapshots
//!
//! # Example
//!
//! ```rust
//! use kinetic_core::{Color, NodeId, PropertyKey, PropertyKind, PropertySnapshot};
//!
//! let shape = NodeId(1);
//! let snapshot = PropertySnapshot::new()
//!     .with(PropertyKey::new(shape, PropertyKind::Color), Color::RED)
//!     .unwrap()
//!     .with(PropertyKey::new(shape, PropertyKind::Opacity), 1.0)
//!     .unwrap();
//!
//! assert_eq!(snapshot.len(), 2);
//! ```

pub mod geometry;
pub mod property;
pub mod values;

pub use geometry::{Color, Point, Size};
pub use property::{
    AnimatableValue, NodeId, PropertyChange, PropertyError, PropertyKey, PropertyKind,
    PropertySnapshot,
};
pub use values::Interpolate;
