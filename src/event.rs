//! Spatiotemporal event type.
//!
//! Event cameras report per-pixel brightness changes as a sparse stream of
//! `(x, y, t)` samples rather than full frames. This module defines the
//! plain-data event type consumed by the tracker.

use serde::{Deserialize, Serialize};

/// A single sensor event: one pixel firing at one point in time.
///
/// Coordinates are integer pixel positions. The timestamp follows the
/// sensor clock (microseconds for the cameras this library was written
/// against) and is expected to be non-decreasing across an input sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Horizontal pixel coordinate
    pub x: i32,
    /// Vertical pixel coordinate
    pub y: i32,
    /// Timestamp in sensor clock units
    pub t: f64,
}

impl Event {
    /// Create a new event
    pub fn new(x: i32, y: i32, t: f64) -> Self {
        Self { x, y, t }
    }
}
