//! Input handling - pointer events and drag tracking
//!
//! This module provides:
//! - The event type hosts feed into panels and rows
//! - Per-drag tracking of displacement, velocity and claimed axis

mod touch;
mod tracker;

pub use touch::*;
pub use tracker::*;
