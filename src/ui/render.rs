//! Render frames and the sinks that consume them
//!
//! Controllers never draw. They hand a frame of interpolated values to a
//! `RenderSink` after every drag update and every animation tick.

use serde::Serialize;
use tracing::trace;

use crate::animation::Interpolate;
use super::primitives::lerp;

/// How a frame reached the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Finger-following update, apply without animation
    Immediate,
    /// Intermediate or final value of a settle transition
    Settling,
}

/// Visual state of a presented panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelFrame {
    /// Height of the content area
    pub height: f64,
    /// Downward translation from the fully-open position
    pub translation_y: f64,
    /// Opacity of the dimming layer (0.0 - 1.0)
    pub backdrop_opacity: f64,
}

impl PanelFrame {
    /// Fully off-screen below the display, backdrop invisible
    pub fn hidden(height: f64) -> Self {
        Self {
            height,
            translation_y: height,
            backdrop_opacity: 0.0,
        }
    }

    /// Resting fully open
    pub fn open(height: f64) -> Self {
        Self {
            height,
            translation_y: 0.0,
            backdrop_opacity: 1.0,
        }
    }
}

impl Interpolate for PanelFrame {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Self {
            height: lerp(self.height, to.height, t),
            translation_y: lerp(self.translation_y, to.translation_y, t),
            backdrop_opacity: lerp(self.backdrop_opacity, to.backdrop_opacity, t),
        }
    }
}

/// Visual state of a swipeable row
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowFrame {
    /// Foreground displacement from its centered position
    pub foreground_x: f64,
    /// Background reveal layer displacement (mirrors the foreground)
    pub background_x: f64,
    /// Press feedback scale of the row content
    pub scale: f64,
}

impl RowFrame {
    pub fn centered(background_rest: f64) -> Self {
        Self {
            foreground_x: 0.0,
            background_x: background_rest,
            scale: 1.0,
        }
    }
}

/// Horizontal part of a row frame, animated by the swipe settle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwipeOffsets {
    pub foreground_x: f64,
    pub background_x: f64,
}

impl Interpolate for SwipeOffsets {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Self {
            foreground_x: lerp(self.foreground_x, to.foreground_x, t),
            background_x: lerp(self.background_x, to.background_x, t),
        }
    }
}

/// Consumer of rendered frames
pub trait RenderSink<F> {
    fn render(&mut self, frame: &F, mode: RenderMode);
}

/// Sink that writes every frame to the trace log as JSON
#[derive(Debug, Default)]
pub struct LogSink {
    label: String,
    frames: u64,
}

impl LogSink {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            frames: 0,
        }
    }

    /// Number of frames received so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl<F: Serialize> RenderSink<F> for LogSink {
    fn render(&mut self, frame: &F, mode: RenderMode) {
        self.frames += 1;
        match serde_json::to_string(frame) {
            Ok(json) => trace!(sink = %self.label, ?mode, frame = %json, "render"),
            Err(e) => trace!(sink = %self.label, "unserializable frame: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_frame_interpolation() {
        let from = PanelFrame::hidden(300.0);
        let to = PanelFrame::open(300.0);
        let mid = from.interpolate(&to, 0.5);
        assert!((mid.translation_y - 150.0).abs() < 1e-9);
        assert!((mid.backdrop_opacity - 0.5).abs() < 1e-9);
        assert!((mid.height - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_log_sink_counts_frames() {
        let mut sink = LogSink::new("test");
        sink.render(&PanelFrame::open(100.0), RenderMode::Immediate);
        sink.render(&RowFrame::centered(0.0), RenderMode::Settling);
        assert_eq!(sink.frames(), 2);
    }
}
