//! Marker types for [`DateTimeOf`].
//!
//! [`DateTimeOf`]: crate::DateTimeOf

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing a deadline something is due at.
#[derive(Clone, Copy, Debug)]
pub struct Due;

/// Marker type describing the moment something has happened.
#[derive(Clone, Copy, Debug)]
pub struct Occurrence;
