//! Animatable properties and property snapshots
//!
//! A [`PropertySnapshot`] holds the current value of every property an
//! animator is allowed to touch. Each [`PropertyKind`] accepts exactly one
//! value shape, checked whenever a value enters a snapshot.

use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;

use crate::geometry::{Color, Point, Size};
use crate::values::Interpolate;

/// Identifier of an animated node (a view, a layer, a shape)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// The attributes that can be animated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyKind {
    Color,
    Size,
    Position,
    CornerRadius,
    Opacity,
}

impl PropertyKind {
    pub const ALL: [PropertyKind; 5] = [
        PropertyKind::Color,
        PropertyKind::Size,
        PropertyKind::Position,
        PropertyKind::CornerRadius,
        PropertyKind::Opacity,
    ];

    /// Stable lowercase name, used in logs and CLI output
    pub fn name(&self) -> &'static str {
        match self {
            PropertyKind::Color => "color",
            PropertyKind::Size => "size",
            PropertyKind::Position => "position",
            PropertyKind::CornerRadius => "corner-radius",
            PropertyKind::Opacity => "opacity",
        }
    }

    /// Check whether `value` has the shape this kind expects
    pub fn accepts(&self, value: &AnimatableValue) -> bool {
        matches!(
            (self, value),
            (PropertyKind::Color, AnimatableValue::Color(_))
                | (PropertyKind::Size, AnimatableValue::Size(_))
                | (PropertyKind::Position, AnimatableValue::Point(_))
                | (PropertyKind::CornerRadius, AnimatableValue::Scalar(_))
                | (PropertyKind::Opacity, AnimatableValue::Scalar(_))
        )
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One property on one node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyKey {
    pub node: NodeId,
    pub kind: PropertyKind,
}

impl PropertyKey {
    pub const fn new(node: NodeId, kind: PropertyKind) -> Self {
        Self { node, kind }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.node, self.kind)
    }
}

/// A value an animatable property can hold
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimatableValue {
    Scalar(f32),
    Color(Color),
    Size(Size),
    Point(Point),
}

impl AnimatableValue {
    /// Short name of the value shape
    pub fn shape(&self) -> &'static str {
        match self {
            AnimatableValue::Scalar(_) => "scalar",
            AnimatableValue::Color(_) => "color",
            AnimatableValue::Size(_) => "size",
            AnimatableValue::Point(_) => "point",
        }
    }

    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            AnimatableValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            AnimatableValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_size(&self) -> Option<Size> {
        match self {
            AnimatableValue::Size(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<Point> {
        match self {
            AnimatableValue::Point(p) => Some(*p),
            _ => None,
        }
    }
}

impl Interpolate for AnimatableValue {
    /// Endpoints are returned exactly. Mismatched shapes cannot be
    /// blended; the result snaps to `other` once `t` reaches 1.0.
    fn lerp(&self, other: &Self, t: f32) -> Self {
        if t == 0.0 {
            return *self;
        }
        if t == 1.0 {
            return *other;
        }
        match (self, other) {
            (AnimatableValue::Scalar(a), AnimatableValue::Scalar(b)) => {
                AnimatableValue::Scalar(a.lerp(b, t))
            }
            (AnimatableValue::Color(a), AnimatableValue::Color(b)) => {
                AnimatableValue::Color(a.lerp(b, t))
            }
            (AnimatableValue::Size(a), AnimatableValue::Size(b)) => {
                AnimatableValue::Size(a.lerp(b, t))
            }
            (AnimatableValue::Point(a), AnimatableValue::Point(b)) => {
                AnimatableValue::Point(a.lerp(b, t))
            }
            _ if t > 1.0 => *other,
            _ => *self,
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        match (self, other) {
            (AnimatableValue::Scalar(a), AnimatableValue::Scalar(b)) => a.approx_eq(b, epsilon),
            (AnimatableValue::Color(a), AnimatableValue::Color(b)) => a.approx_eq(b, epsilon),
            (AnimatableValue::Size(a), AnimatableValue::Size(b)) => a.approx_eq(b, epsilon),
            (AnimatableValue::Point(a), AnimatableValue::Point(b)) => a.approx_eq(b, epsilon),
            _ => false,
        }
    }
}

impl From<f32> for AnimatableValue {
    fn from(value: f32) -> Self {
        AnimatableValue::Scalar(value)
    }
}

/// Narrowing conversion so bare float literals work as scalar values
impl From<f64> for AnimatableValue {
    fn from(value: f64) -> Self {
        AnimatableValue::Scalar(value as f32)
    }
}

impl From<Color> for AnimatableValue {
    fn from(value: Color) -> Self {
        AnimatableValue::Color(value)
    }
}

impl From<Size> for AnimatableValue {
    fn from(value: Size) -> Self {
        AnimatableValue::Size(value)
    }
}

impl From<Point> for AnimatableValue {
    fn from(value: Point) -> Self {
        AnimatableValue::Point(value)
    }
}

impl fmt::Display for AnimatableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimatableValue::Scalar(v) => write!(f, "{v:.3}"),
            AnimatableValue::Color(c) => write!(f, "{} a={:.2}", c.to_hex_string(), c.a),
            AnimatableValue::Size(s) => write!(f, "{:.1}x{:.1}", s.width, s.height),
            AnimatableValue::Point(p) => write!(f, "({:.1}, {:.1})", p.x, p.y),
        }
    }
}

/// Property-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    /// The value shape does not fit the property kind
    #[error("{key} expects a {expected} value, got {actual}")]
    PropertyTypeMismatch {
        key: PropertyKey,
        expected: &'static str,
        actual: &'static str,
    },

    /// The property is not part of the snapshot
    #[error("{0} is not part of this snapshot")]
    UnknownProperty(PropertyKey),
}

/// Result type for property operations
pub type Result<T> = std::result::Result<T, PropertyError>;

fn expected_shape(kind: PropertyKind) -> &'static str {
    match kind {
        PropertyKind::Color => "color",
        PropertyKind::Size => "size",
        PropertyKind::Position => "point",
        PropertyKind::CornerRadius | PropertyKind::Opacity => "scalar",
    }
}

/// A single requested property change
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropertyChange {
    pub key: PropertyKey,
    pub value: AnimatableValue,
}

impl PropertyChange {
    /// Create a change, rejecting values whose shape does not fit the kind
    pub fn new(key: PropertyKey, value: impl Into<AnimatableValue>) -> Result<Self> {
        let value = value.into();
        check_shape(key, &value)?;
        Ok(Self { key, value })
    }
}

fn check_shape(key: PropertyKey, value: &AnimatableValue) -> Result<()> {
    if key.kind.accepts(value) {
        Ok(())
    } else {
        Err(PropertyError::PropertyTypeMismatch {
            key,
            expected: expected_shape(key.kind),
            actual: value.shape(),
        })
    }
}

/// The current values of a set of animatable properties
///
/// Iteration follows insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertySnapshot {
    values: IndexMap<PropertyKey, AnimatableValue>,
}

impl PropertySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: insert a property value
    pub fn with(mut self, key: PropertyKey, value: impl Into<AnimatableValue>) -> Result<Self> {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Insert or replace a property value
    pub fn insert(&mut self, key: PropertyKey, value: impl Into<AnimatableValue>) -> Result<()> {
        let value = value.into();
        check_shape(key, &value)?;
        self.values.insert(key, value);
        Ok(())
    }

    /// Overwrite an existing property value
    pub fn set(&mut self, key: PropertyKey, value: AnimatableValue) -> Result<()> {
        check_shape(key, &value)?;
        match self.values.get_mut(&key) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(PropertyError::UnknownProperty(key)),
        }
    }

    pub fn get(&self, key: PropertyKey) -> Option<AnimatableValue> {
        self.values.get(&key).copied()
    }

    pub fn contains(&self, key: PropertyKey) -> bool {
        self.values.contains_key(&key)
    }

    /// Validate that a change targets a known property with the right shape
    pub fn check(&self, change: &PropertyChange) -> Result<()> {
        check_shape(change.key, &change.value)?;
        if self.contains(change.key) {
            Ok(())
        } else {
            Err(PropertyError::UnknownProperty(change.key))
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = PropertyKey> + '_ {
        self.values.keys().copied()
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
