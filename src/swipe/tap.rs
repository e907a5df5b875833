//! Press feedback: the row shrinks slightly while touched

use std::time::Duration;

use crate::animation::{secs, Step, TransitionAnimator};
use crate::config::TapConfig;
use crate::ui::primitives::Easing;

use super::row::TapAnimatable;

/// Which scale transition is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapPhase {
    Pressing,
    /// Restore after a completed tap, reports completion
    Releasing,
    /// Restore after a cancelled touch, silent
    Restoring,
}

/// Result of one feedback tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapProgress {
    Idle,
    /// Scale changed this frame
    Moved,
    /// The release transition finished, the tap counts as completed
    Completed,
}

#[derive(Debug)]
pub struct TapFeedback {
    config: TapConfig,
    enabled: bool,
    scale: f64,
    animator: TransitionAnimator<f64, TapPhase>,
}

impl TapFeedback {
    pub fn new(config: &TapConfig) -> Self {
        Self {
            config: config.clone(),
            enabled: true,
            scale: 1.0,
            animator: TransitionAnimator::new(),
        }
    }

    /// Reset to full size and re-read enablement
    pub fn configure(&mut self, policy: &dyn TapAnimatable) {
        self.animator.cancel();
        self.scale = 1.0;
        self.enabled = policy.tap_feedback_enabled();
    }

    pub fn press(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.animate(self.config.pressed_scale, self.config.press_duration, Easing::EaseOut, TapPhase::Pressing);
        true
    }

    /// Touch ended normally; completion is reported by `tick`
    pub fn release(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.animate(1.0, self.config.release_duration, Easing::EaseInOut, TapPhase::Releasing);
        true
    }

    /// Touch was taken away; restore without reporting a tap
    pub fn cancel(&mut self) {
        if !self.enabled || (self.scale == 1.0 && !self.animator.is_running()) {
            return;
        }
        self.animate(1.0, self.config.release_duration, Easing::EaseInOut, TapPhase::Restoring);
    }

    pub fn tick(&mut self, dt: Duration) -> TapProgress {
        match self.animator.advance(dt) {
            Step::Idle => TapProgress::Idle,
            Step::Running(scale) => {
                self.scale = scale;
                TapProgress::Moved
            }
            Step::Finished { value, kind, .. } => {
                self.scale = value;
                if kind == TapPhase::Releasing {
                    TapProgress::Completed
                } else {
                    TapProgress::Moved
                }
            }
        }
    }

    fn animate(&mut self, to: f64, duration: f64, easing: Easing, phase: TapPhase) {
        self.animator.start(self.scale, to, secs(duration), easing, phase);
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    pub fn phase(&self) -> Option<TapPhase> {
        self.animator.kind()
    }
}
