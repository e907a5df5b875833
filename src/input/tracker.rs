//! Drag tracking - origin, last position and velocity of one touch

use std::time::Instant;

use crate::ui::primitives::{Point, Vector};

/// Axis a drag has been claimed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragAxis {
    /// No movement yet
    Undecided,
    Horizontal,
    Vertical,
}

/// Touch point tracking for a single drag
#[derive(Debug, Clone)]
pub struct DragTracker {
    pub start_pos: Point,
    pub current_pos: Point,
    pub start_time: Instant,
    pub last_time: Instant,
    /// Points per second, from the last two samples
    pub velocity: Vector,
    axis: DragAxis,
}

impl DragTracker {
    pub fn new(pos: Point) -> Self {
        Self::new_at(pos, Instant::now())
    }

    pub fn new_at(pos: Point, now: Instant) -> Self {
        Self {
            start_pos: pos,
            current_pos: pos,
            start_time: now,
            last_time: now,
            velocity: Vector::ZERO,
            axis: DragAxis::Undecided,
        }
    }

    /// Record a new position, returns the step since the previous one
    pub fn update(&mut self, pos: Point) -> Vector {
        self.update_at(pos, Instant::now())
    }

    pub fn update_at(&mut self, pos: Point, now: Instant) -> Vector {
        let step = pos - self.current_pos;
        let dt = now.duration_since(self.last_time).as_secs_f64();

        if dt > 0.001 {
            self.velocity = Vector::new(step.x / dt, step.y / dt);
        }

        self.current_pos = pos;
        self.last_time = now;
        step
    }

    /// Total displacement since the drag began
    pub fn delta(&self) -> Vector {
        self.current_pos - self.start_pos
    }

    /// Decide the axis once the drag has moved further than `min_distance`
    ///
    /// The total displacement picks the axis, so jitter under the distance
    /// leaves the drag undecided. Once decided the axis never changes.
    pub fn claim(&mut self, min_distance: f64) -> DragAxis {
        if self.axis == DragAxis::Undecided {
            let delta = self.delta();
            if delta.length() > min_distance {
                self.axis = if delta.is_horizontal() {
                    DragAxis::Horizontal
                } else {
                    DragAxis::Vertical
                };
            }
        }
        self.axis
    }
}
