//! Immutable color palette handed to panels and rows at construction
//!
//! Colors for the shell UI live here instead of in process-wide statics, so a
//! host can load a different palette from the config file.

use serde::{Deserialize, Serialize};

use super::primitives::{rgb8, Color};

/// Palette and shape constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Main brand color (panel top bar, selected pictures)
    pub primary: Color,
    /// Green / success
    pub positive: Color,
    /// Red / failure
    pub negative: Color,
    /// Titles and other important labels
    pub text_main: Color,
    /// Secondary labels
    pub text_secondary: Color,
    /// Fill of the view carrying the row shadow
    pub shadow: Color,
    /// Dimming layer behind a presented panel, alpha is the fully-open value
    pub backdrop: Color,
    /// Drag handle line on the panel top bar
    pub handle: Color,
    pub corner_radius: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: rgb8(87, 152, 118),
            positive: rgb8(127, 169, 112),
            negative: rgb8(230, 132, 87),
            text_main: rgb8(47, 72, 88),
            text_secondary: rgb8(117, 103, 121),
            shadow: [0.1, 0.1, 0.1, 1.0],
            backdrop: [0.0, 0.0, 0.0, 0.66],
            handle: [0.78, 0.78, 0.8, 1.0],
            corner_radius: 7.0,
        }
    }
}

impl Theme {
    /// Backdrop color scaled by the current dimming opacity
    pub fn backdrop_at(&self, opacity: f64) -> Color {
        let mut color = self.backdrop;
        color[3] *= opacity.clamp(0.0, 1.0) as f32;
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backdrop_scales_alpha_only() {
        let theme = Theme::default();
        let half = theme.backdrop_at(0.5);
        assert_eq!(&half[..3], &theme.backdrop[..3]);
        assert!((half[3] - 0.33).abs() < 1e-6);
        assert_eq!(theme.backdrop_at(4.0)[3], theme.backdrop[3]);
    }
}
