//! Basic geometry and color primitives for panel and row rendering
//!
//! Provides data structures shared by the gesture controllers. The actual
//! drawing is done by whatever `RenderSink` the host plugs in.

use serde::{Deserialize, Serialize};
use std::ops::Sub;

/// A point in logical (device independent) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A displacement between two points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// True when the horizontal component dominates
    pub fn is_horizontal(&self) -> bool {
        self.x.abs() > self.y.abs()
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A simple rectangle for hit testing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Check if a point is inside this rectangle
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.x + self.width &&
        point.y >= self.y && point.y < self.y + self.height
    }

    /// Same rectangle shifted horizontally
    pub fn offset_x(&self, dx: f64) -> Rect {
        Rect::new(self.x + dx, self.y, self.width, self.height)
    }
}

/// Color in RGBA format (0.0 - 1.0)
pub type Color = [f32; 4];

/// Build a color from 0-255 channel values
pub fn rgb8(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Fixed colors that are not part of the theme
pub mod colors {
    use super::Color;

    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const GRAY: Color = [0.5, 0.5, 0.5, 1.0];
    pub const CLEAR: Color = [0.0, 0.0, 0.0, 0.0];
}

/// Easing curves for settle transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Starts fast, slows down
    #[default]
    EaseOut,
    /// Smooth start and end
    EaseInOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = clamp(t, 0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => easing::ease_out_cubic(t),
            Easing::EaseInOut => easing::ease_in_out_cubic(t),
        }
    }
}

/// Easing functions for animations
pub mod easing {
    /// Ease out cubic - starts fast, slows down
    pub fn ease_out_cubic(t: f64) -> f64 {
        1.0 - (1.0 - t).powi(3)
    }

    /// Ease in out cubic - smooth start and end
    pub fn ease_in_out_cubic(t: f64) -> f64 {
        if t < 0.5 {
            4.0 * t * t * t
        } else {
            1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
        }
    }
}

/// Linear interpolation
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Clamp a value between min and max
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(99.9, 39.9)));
        assert!(!rect.contains(Point::new(100.0, 10.0)));
        assert!(!rect.contains(Point::new(10.0, -0.1)));
    }

    #[test]
    fn test_point_difference() {
        let delta = Point::new(30.0, 10.0) - Point::new(10.0, 15.0);
        assert_eq!(delta, Vector::new(20.0, -5.0));
        assert!(delta.is_horizontal());
        assert!(!Vector::new(3.0, -3.0).is_horizontal());
    }

    #[test]
    fn test_easing_endpoints() {
        for curve in [Easing::Linear, Easing::EaseOut, Easing::EaseInOut] {
            assert!((curve.apply(0.0)).abs() < 1e-9);
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-9);
            assert!((curve.apply(2.0) - 1.0).abs() < 1e-9);
        }
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
    }
}
