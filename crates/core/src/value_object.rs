//! Value object trait: equality by value, not identity.

/// Marker trait for typed models built from validated instances.
///
/// Value objects are immutable and compared by their attribute values. Two
/// `Location`s with the same city, state and country are the same location.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
