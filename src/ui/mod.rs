//! Rendering-side types shared by panels and rows
//!
//! Components:
//! - Primitives (points, rects, colors, easing)
//! - Theme palette
//! - Render frames and sinks

pub mod primitives;
pub mod render;
pub mod theme;

pub use primitives::{Color, Easing, Point, Rect, Vector};
pub use render::{LogSink, PanelFrame, RenderMode, RenderSink, RowFrame};
pub use theme::Theme;
