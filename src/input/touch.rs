//! Raw pointer input as delivered by the host

use crate::ui::primitives::Point;

/// Pointer / drag event from the host's gesture source
///
/// Positions are in window coordinates. Deltas and velocity are derived by
/// the controllers, the source only reports where the finger is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// First finger went down
    Began(Point),
    /// Finger moved, with the number of fingers still on the surface
    Changed(Point, usize),
    /// Finger lifted, with the number of fingers still on the surface
    Ended(Point, usize),
    /// The host took the touch away (scroll claimed it, window lost focus)
    Cancelled,
}
