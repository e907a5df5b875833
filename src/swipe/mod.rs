//! Swipe-to-reveal rows
//!
//! A row's foreground follows the finger horizontally while the background
//! layer moves by the opposite amount, so on screen the background appears to
//! stay still and get uncovered. On release the foreground either locks open
//! at the lock distance (left or right) or returns to center.
//!
//! - `SwipeRevealController`: offsets, lock policy, background tap detection
//! - `TapFeedback`: press-to-shrink feedback
//! - `Row`: one list row combining both, fed raw pointer events
//! - `RowList`: the demo list, rows addressed by `RowId`

mod list;
mod row;
mod tap;

use std::time::Duration;

use tracing::debug;

use crate::animation::{secs, Step, TransitionAnimator};
use crate::config::SwipeConfig;
use crate::ui::primitives::{Point, Rect, Vector};
use crate::ui::render::SwipeOffsets;

pub use list::{ListItem, RowId, RowList};
pub use row::{
    BackgroundAction, Row, RowAppearance, RowEvent, RowStatus, SwipePolicy, SwipeRevealable, TapAnimatable,
    ROW_LOCK_DISTANCE,
};
pub use tap::{TapFeedback, TapPhase, TapProgress};

/// Where a released row settles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeTarget {
    /// Foreground locked at `-lock_distance`
    OpenLeft,
    /// Foreground locked at `+lock_distance`
    OpenRight,
    Closed,
}

/// How a touch that never became a drag ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapResolution {
    /// Began and ended on the uncovered background of an open row
    BackgroundAction,
    /// Plain tap on an open row, which closes it
    ClosedOpenRow,
    Plain,
}

/// Hit-test geometry of a row at rest
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    /// Foreground bounds when centered
    pub foreground: Rect,
    /// Background layer bounds, does not move on screen
    pub background: Rect,
}

impl RowLayout {
    pub fn new(bounds: Rect) -> Self {
        Self {
            foreground: bounds,
            background: bounds,
        }
    }

    /// Inside the background and outside the foreground displaced by `offset`
    pub fn hits_background(&self, point: Point, offset: f64) -> bool {
        !self.foreground.offset_x(offset).contains(point) && self.background.contains(point)
    }
}

/// Model offsets of one row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeSession {
    pub foreground_offset: f64,
    pub background_offset: f64,
    pub lock_distance: f64,
    /// A touch began on the uncovered background of the open row
    pub awaiting_action_tap: bool,
    /// Background offset when the row is centered
    pub background_rest: f64,
}

impl SwipeSession {
    fn closed(lock_distance: f64, background_rest: f64) -> Self {
        Self {
            foreground_offset: 0.0,
            background_offset: background_rest,
            lock_distance,
            awaiting_action_tap: false,
            background_rest,
        }
    }

    pub fn is_open(&self) -> bool {
        self.foreground_offset != 0.0
    }

    fn offsets(&self) -> SwipeOffsets {
        SwipeOffsets {
            foreground_x: self.foreground_offset,
            background_x: self.background_offset,
        }
    }
}

/// Horizontal drag controller for one row
#[derive(Debug)]
pub struct SwipeRevealController {
    config: SwipeConfig,
    session: SwipeSession,
    enabled: bool,
    dragging: bool,
    /// Last rendered offsets
    offsets: SwipeOffsets,
    animator: TransitionAnimator<SwipeOffsets, SwipeTarget>,
}

impl SwipeRevealController {
    pub fn new(config: &SwipeConfig) -> Self {
        let session = SwipeSession::closed(config.lock_distance, config.background_rest);
        Self {
            config: config.clone(),
            session,
            enabled: true,
            dragging: false,
            offsets: session.offsets(),
            animator: TransitionAnimator::new(),
        }
    }

    /// Reset to closed and centered, re-deriving lock distance and enablement
    pub fn configure(&mut self, policy: &dyn SwipeRevealable) {
        self.animator.cancel();
        let lock = policy.lock_distance().unwrap_or(self.config.lock_distance);
        self.session = SwipeSession::closed(lock, self.config.background_rest);
        self.offsets = self.session.offsets();
        self.enabled = policy.pan_is_enabled();
        self.dragging = false;
    }

    pub fn pan_is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn begin_drag(&mut self) -> bool {
        if !self.enabled || self.dragging {
            return false;
        }
        if let Some(reached) = self.animator.cancel() {
            self.offsets = reached;
            self.session.foreground_offset = reached.foreground_x;
            self.session.background_offset = reached.background_x;
        }
        self.session.awaiting_action_tap = false;
        self.dragging = true;
        debug!(offset = self.session.foreground_offset, "Swipe began");
        true
    }

    /// Apply one horizontal step, returns the offsets to render immediately
    pub fn update_drag(&mut self, delta: Vector) -> Option<SwipeOffsets> {
        if !self.dragging {
            return None;
        }
        self.session.foreground_offset += delta.x;
        self.session.background_offset -= delta.x;
        self.offsets = self.session.offsets();
        Some(self.offsets)
    }

    pub fn end_drag(&mut self) -> Option<SwipeTarget> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;

        let lock = self.session.lock_distance;
        let offset = self.session.foreground_offset;
        let target = if offset > lock {
            SwipeTarget::OpenRight
        } else if offset < -lock {
            SwipeTarget::OpenLeft
        } else {
            SwipeTarget::Closed
        };
        debug!(offset, ?target, "Swipe released");
        self.settle(target);
        Some(target)
    }

    /// Touch down outside a drag; arms the background action if it landed
    /// on the uncovered background of an open row
    pub fn touch_down(&mut self, point: Point, layout: &RowLayout) -> bool {
        self.session.awaiting_action_tap =
            self.session.is_open() && layout.hits_background(point, self.offsets.foreground_x);
        self.session.awaiting_action_tap
    }

    /// Touch released without becoming a drag
    pub fn touch_up(&mut self, point: Point, layout: &RowLayout) -> TapResolution {
        let armed = std::mem::take(&mut self.session.awaiting_action_tap);
        if !self.session.is_open() {
            return TapResolution::Plain;
        }

        let completed = armed && layout.hits_background(point, self.offsets.foreground_x);
        self.settle(SwipeTarget::Closed);
        if completed {
            TapResolution::BackgroundAction
        } else {
            TapResolution::ClosedOpenRow
        }
    }

    /// Return to center if open
    pub fn close(&mut self) -> bool {
        self.session.awaiting_action_tap = false;
        if !self.session.is_open() {
            return false;
        }
        self.dragging = false;
        self.settle(SwipeTarget::Closed);
        true
    }

    /// Advance the settle animation, returns true when the offsets moved
    pub fn tick(&mut self, dt: Duration) -> bool {
        match self.animator.advance(dt) {
            Step::Idle => false,
            Step::Running(offsets) | Step::Finished { value: offsets, .. } => {
                self.offsets = offsets;
                true
            }
        }
    }

    fn settle(&mut self, target: SwipeTarget) {
        let lock = self.session.lock_distance;
        let rest = self.session.background_rest;
        let foreground = match target {
            SwipeTarget::OpenRight => lock,
            SwipeTarget::OpenLeft => -lock,
            SwipeTarget::Closed => 0.0,
        };
        self.session.foreground_offset = foreground;
        self.session.background_offset = rest - foreground;

        let duration = secs(self.config.settle_duration);
        self.animator
            .start(self.offsets, self.session.offsets(), duration, self.config.easing, target);
        if duration.is_zero() {
            self.tick(Duration::ZERO);
        }
    }

    pub fn session(&self) -> &SwipeSession {
        &self.session
    }

    pub fn offsets(&self) -> SwipeOffsets {
        self.offsets
    }

    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// Target of the running settle
    pub fn settle_target(&self) -> Option<SwipeTarget> {
        self.animator.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn controller() -> SwipeRevealController {
        let mut swipe = SwipeRevealController::new(&SwipeConfig::default());
        swipe.configure(&SwipePolicy::enabled());
        swipe
    }

    fn settle(swipe: &mut SwipeRevealController) {
        for _ in 0..100 {
            swipe.tick(FRAME);
            if !swipe.is_animating() {
                return;
            }
        }
        panic!("row never settled");
    }

    fn swipe_by(swipe: &mut SwipeRevealController, dx: f64) -> Option<SwipeTarget> {
        assert!(swipe.begin_drag());
        swipe.update_drag(Vector::new(dx / 2.0, 1.0));
        swipe.update_drag(Vector::new(dx / 2.0, -1.0));
        swipe.end_drag()
    }

    fn assert_mirrored(swipe: &SwipeRevealController) {
        let s = swipe.session();
        assert!((s.background_offset - (s.background_rest - s.foreground_offset)).abs() < 1e-9);
        let o = swipe.offsets();
        assert!((o.background_x - (s.background_rest - o.foreground_x)).abs() < 1e-9);
    }

    #[test]
    fn test_lock_symmetry() {
        let cases = [
            (51.0, SwipeTarget::OpenRight, 50.0),
            (-51.0, SwipeTarget::OpenLeft, -50.0),
            (49.0, SwipeTarget::Closed, 0.0),
            (-49.0, SwipeTarget::Closed, 0.0),
            (50.0, SwipeTarget::Closed, 0.0),
        ];
        for (dx, target, offset) in cases {
            let mut swipe = controller();
            assert_eq!(swipe_by(&mut swipe, dx), Some(target), "dx = {}", dx);
            assert_eq!(swipe.session().foreground_offset, offset);
            settle(&mut swipe);
            assert!((swipe.offsets().foreground_x - offset).abs() < 1e-9);
        }
    }

    #[test]
    fn test_background_mirrors_foreground() {
        let mut config = SwipeConfig::default();
        config.background_rest = 12.0;
        let mut swipe = SwipeRevealController::new(&config);
        swipe.configure(&SwipePolicy::enabled());

        swipe.begin_drag();
        for dx in [5.0, 17.5, -3.0, 40.0] {
            swipe.update_drag(Vector::new(dx, 0.0));
            assert_mirrored(&swipe);
        }
        swipe.end_drag();
        for _ in 0..5 {
            swipe.tick(FRAME);
            assert_mirrored(&swipe);
        }
        settle(&mut swipe);
        assert_mirrored(&swipe);
        assert_eq!(swipe.session().background_offset, 12.0 - 50.0);
    }

    #[test]
    fn test_disabled_row_ignores_drag() {
        let mut swipe = SwipeRevealController::new(&SwipeConfig::default());
        swipe.configure(&SwipePolicy::disabled());
        assert!(!swipe.pan_is_enabled());
        assert!(!swipe.begin_drag());
        assert_eq!(swipe.update_drag(Vector::new(80.0, 0.0)), None);
        assert_eq!(swipe.end_drag(), None);
        assert!(!swipe.is_open());
    }

    #[test]
    fn test_reconfigure_is_idempotent() {
        let mut swipe = controller();
        swipe_by(&mut swipe, 90.0);
        swipe.tick(FRAME);

        let policy = SwipePolicy::with_lock(65.0);
        swipe.configure(&policy);
        let once = (*swipe.session(), swipe.offsets(), swipe.pan_is_enabled());
        swipe.configure(&policy);
        let twice = (*swipe.session(), swipe.offsets(), swipe.pan_is_enabled());

        assert_eq!(once, twice);
        assert!(!swipe.is_open());
        assert!(!swipe.is_animating());
        assert_eq!(swipe.session().lock_distance, 65.0);
    }

    #[test]
    fn test_drag_during_settle_adopts_offsets() {
        let mut swipe = controller();
        swipe_by(&mut swipe, 80.0);
        swipe.tick(Duration::from_millis(50));
        let reached = swipe.offsets().foreground_x;
        assert!(reached > 50.0 && reached < 80.0, "reached {}", reached);

        assert!(swipe.begin_drag());
        assert_eq!(swipe.session().foreground_offset, reached);
        swipe.update_drag(Vector::new(-10.0, 0.0));
        assert!((swipe.offsets().foreground_x - (reached - 10.0)).abs() < 1e-9);
        assert_mirrored(&swipe);
    }

    #[test]
    fn test_background_tap_on_open_row() {
        let layout = RowLayout::new(Rect::new(0.0, 0.0, 300.0, 80.0));
        let mut swipe = controller();
        swipe_by(&mut swipe, 60.0);
        settle(&mut swipe);

        // Uncovered strip is x in [0, 50)
        assert!(swipe.touch_down(Point::new(20.0, 40.0), &layout));
        assert_eq!(swipe.touch_up(Point::new(25.0, 40.0), &layout), TapResolution::BackgroundAction);
        assert!(!swipe.is_open());
        assert_eq!(swipe.settle_target(), Some(SwipeTarget::Closed));
    }

    #[test]
    fn test_background_tap_must_end_on_background() {
        let layout = RowLayout::new(Rect::new(0.0, 0.0, 300.0, 80.0));
        let mut swipe = controller();
        swipe_by(&mut swipe, 60.0);
        settle(&mut swipe);

        assert!(swipe.touch_down(Point::new(20.0, 40.0), &layout));
        assert_eq!(swipe.touch_up(Point::new(120.0, 40.0), &layout), TapResolution::ClosedOpenRow);
    }

    #[test]
    fn test_foreground_tap_closes_open_row() {
        let layout = RowLayout::new(Rect::new(0.0, 0.0, 300.0, 80.0));
        let mut swipe = controller();
        swipe_by(&mut swipe, -70.0);
        settle(&mut swipe);

        assert!(!swipe.touch_down(Point::new(100.0, 40.0), &layout));
        assert_eq!(swipe.touch_up(Point::new(100.0, 40.0), &layout), TapResolution::ClosedOpenRow);
        settle(&mut swipe);
        assert_eq!(swipe.offsets().foreground_x, 0.0);

        // Closed rows never arm the background action
        assert!(!swipe.touch_down(Point::new(5.0, 40.0), &layout));
        assert_eq!(swipe.touch_up(Point::new(5.0, 40.0), &layout), TapResolution::Plain);
    }

    #[test]
    fn test_zero_settle_duration_snaps() {
        let mut config = SwipeConfig::default();
        config.settle_duration = 0.0;
        let mut swipe = SwipeRevealController::new(&config);
        swipe.configure(&SwipePolicy::enabled());
        swipe_by(&mut swipe, 70.0);
        assert!(!swipe.is_animating());
        assert_eq!(swipe.offsets().foreground_x, 50.0);
    }
}
