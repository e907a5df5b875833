//! Drag-to-dismiss bottom panel
//!
//! The panel slides up from below the screen on first appearance and can then
//! be dragged vertically:
//! - Dragging down follows the finger and fades the backdrop
//! - Dragging up is damped (elastic overscroll)
//! - Releasing past the dismiss threshold slides the panel out, otherwise it
//!   snaps back open
//!
//! Policy targets are written to the session immediately; the rendered frame
//! catches up through the settle animation on each `tick`.

pub mod registry;

use std::time::Duration;

use tracing::{debug, info};

use crate::animation::{secs, Step, TransitionAnimator};
use crate::config::{PanelConfig, SheetConfig};
use crate::host::ContentHeightProvider;
use crate::input::{DragTracker, GestureEvent};
use crate::notify::Notifier;
use crate::ui::primitives::{clamp, colors, Color, Point};
use crate::ui::render::{PanelFrame, RenderMode, RenderSink};
use crate::ui::theme::Theme;

pub use registry::{PanelId, PanelRegistry};

/// Notifications sent to the panel's host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// A dismissal was committed (drag release, outside tap or API call)
    DismissRequested,
    /// Hosted content was reloaded and the panel resized to it
    ContentChanged,
    /// The dismiss transition finished, the session is over
    Detached,
}

/// Which settle transition is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleKind {
    /// One-shot slide up on first appearance
    Present,
    /// Return to fully open after a short drag
    SnapBack,
    /// Adapting to a new content height (reload / expand)
    Resize,
    /// Sliding out, ends in `Detached`
    Dismiss,
}

/// What a drag release decided
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseOutcome {
    SnapBack,
    /// Dismiss committed with the remaining-distance scaled duration (seconds)
    Dismiss { duration: f64 },
}

/// Panel lifecycle
#[derive(Debug, Clone)]
pub enum PanelState {
    /// Mounted below the screen, waiting for first appearance
    Hidden,
    Idle,
    Dragging {
        tracker: DragTracker,
        start_offset: f64,
    },
    Dismissing,
    /// Terminal, the session can be discarded
    Detached,
}

/// Geometry of one presentation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelSession {
    /// Height of the content area
    pub max_height: f64,
    /// Distance from the fully-open position (0 = open, max_height = off-screen)
    pub current_offset: f64,
    pub dismiss_threshold: f64,
}

/// Colors of the panel's own views, derived from the hosted content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelChrome {
    /// Strip below the panel revealed by overscroll
    pub off_screen: Color,
    pub top_bar: Color,
    pub handle: Color,
}

impl PanelChrome {
    fn from_content(content: Option<&dyn ContentHeightProvider>, theme: &Theme) -> Self {
        match content {
            Some(content) => Self {
                off_screen: content.background_color().unwrap_or(colors::WHITE),
                top_bar: content.top_bar_color().unwrap_or(colors::WHITE),
                handle: content.top_accent_line_color().unwrap_or(theme.handle),
            },
            None => Self {
                off_screen: colors::WHITE,
                top_bar: colors::WHITE,
                handle: theme.handle,
            },
        }
    }
}

/// Vertical drag controller for one presented panel
pub struct PanelGestureController {
    config: PanelConfig,
    theme: Theme,
    session: PanelSession,
    state: PanelState,
    /// Cleared by the first `appear()`
    first_appearance: bool,
    frame: PanelFrame,
    animator: TransitionAnimator<PanelFrame, SettleKind>,
    content: Option<Box<dyn ContentHeightProvider>>,
    chrome: PanelChrome,
    sink: Option<Box<dyn RenderSink<PanelFrame>>>,
    events: Notifier<PanelEvent>,
    on_before_detach: Option<Box<dyn FnOnce()>>,
}

impl PanelGestureController {
    pub fn new(config: &SheetConfig) -> Self {
        let height = config.panel.fallback_height;
        Self {
            config: config.panel.clone(),
            theme: config.theme.clone(),
            session: PanelSession {
                max_height: height,
                current_offset: height,
                dismiss_threshold: config.panel.dismiss_threshold,
            },
            state: PanelState::Hidden,
            first_appearance: true,
            frame: PanelFrame::hidden(height),
            animator: TransitionAnimator::new(),
            content: None,
            chrome: PanelChrome::from_content(None, &config.theme),
            sink: None,
            events: Notifier::new(),
            on_before_detach: None,
        }
    }

    pub fn with_content(config: &SheetConfig, content: Box<dyn ContentHeightProvider>) -> Self {
        let mut panel = Self::new(config);
        panel.load_content(content);
        panel
    }

    /// Put new content inside the panel, replacing the old one
    ///
    /// The size is not re-read until the next `appear()` or `reload()`.
    pub fn load_content(&mut self, content: Box<dyn ContentHeightProvider>) {
        if self.content.is_some() {
            debug!("Replacing hosted panel content");
        }
        self.content = Some(content);
        self.chrome = PanelChrome::from_content(self.content.as_deref(), &self.theme);
    }

    pub fn set_sink(&mut self, sink: Box<dyn RenderSink<PanelFrame>>) {
        self.sink = Some(sink);
    }

    /// Register the panel's listener, replacing any previous one
    pub fn subscribe(&mut self, listener: impl FnMut(&PanelEvent) + 'static) -> bool {
        self.events.subscribe(listener)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// First appearance: slide up from below the screen
    ///
    /// Returns false on every call after the first; later layout passes must
    /// not animate.
    pub fn appear(&mut self) -> bool {
        if !self.first_appearance {
            return false;
        }
        self.first_appearance = false;

        self.update_container();
        self.session.current_offset = 0.0;
        self.state = PanelState::Idle;
        self.frame = PanelFrame::hidden(self.session.max_height);
        info!(height = self.session.max_height, "Presenting panel");

        let target = PanelFrame::open(self.session.max_height);
        self.settle(target, self.config.base_duration, SettleKind::Present);
        true
    }

    /// Re-read the content height and re-settle fully open
    pub fn reload(&mut self) -> bool {
        if self.is_closing() {
            return false;
        }
        if self.is_dragging() {
            debug!("Reload interrupted an active drag");
        }

        self.first_appearance = false;
        self.update_container();
        self.session.current_offset = 0.0;
        self.state = PanelState::Idle;
        info!(height = self.session.max_height, "Panel content reloaded");

        let target = PanelFrame::open(self.session.max_height);
        self.settle(target, self.config.base_duration, SettleKind::Resize);
        self.events.emit(PanelEvent::ContentChanged);
        true
    }

    /// Grow by `additional_space` (e.g. the free space above the panel)
    pub fn expand(&mut self, additional_space: f64, duration: Option<f64>) -> bool {
        if self.is_closing() {
            return false;
        }

        let additional = if additional_space.is_finite() { additional_space.max(0.0) } else { 0.0 };
        self.session.max_height += additional;
        self.session.current_offset = 0.0;
        self.state = PanelState::Idle;
        debug!(additional, height = self.session.max_height, "Expanding panel");

        let target = PanelFrame::open(self.session.max_height);
        self.settle(target, duration.unwrap_or(self.config.base_duration), SettleKind::Resize);
        true
    }

    /// Slide the panel out, run `on_before_detach`, then detach
    ///
    /// Only the first dismissal of a session has any effect.
    pub fn dismiss(&mut self, duration: f64, on_before_detach: Option<Box<dyn FnOnce()>>) -> bool {
        if self.is_closing() {
            return false;
        }

        self.first_appearance = false;
        self.state = PanelState::Dismissing;
        self.session.current_offset = self.session.max_height;
        self.on_before_detach = on_before_detach;
        info!(duration, "Dismissing panel");
        self.events.emit(PanelEvent::DismissRequested);

        let target = PanelFrame {
            height: self.session.max_height,
            translation_y: self.session.max_height,
            backdrop_opacity: 0.0,
        };
        self.settle(target, duration, SettleKind::Dismiss);
        true
    }

    /// Tap on the dimmed area outside the panel
    pub fn tap_outside(&mut self) -> bool {
        if self.is_dragging() {
            debug!("Ignoring outside tap during drag");
            return false;
        }
        self.dismiss(self.config.base_duration, None)
    }

    // ------------------------------------------------------------------
    // Drag handling
    // ------------------------------------------------------------------

    /// Route a raw gesture event
    pub fn handle(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Began(point) => {
                self.begin_drag(point);
            }
            GestureEvent::Changed(point, touches) => {
                if touches == 1 {
                    self.update_drag(point);
                }
            }
            GestureEvent::Ended(point, touches) => {
                self.end_drag(point, touches);
            }
            GestureEvent::Cancelled => {
                if let PanelState::Dragging { tracker, .. } = &self.state {
                    let last = tracker.current_pos;
                    self.end_drag(last, 0);
                }
            }
        }
    }

    pub fn begin_drag(&mut self, point: Point) -> bool {
        match self.state {
            PanelState::Idle => {}
            PanelState::Dragging { .. } => return false,
            PanelState::Hidden | PanelState::Dismissing | PanelState::Detached => {
                debug!(state = ?self.state, "Drag ignored");
                return false;
            }
        }

        if self.content.is_none() && !(self.session.max_height > 0.0) {
            self.session.max_height = self.config.fallback_height;
        }

        // An in-flight settle hands its current value over to the finger
        if let Some(reached) = self.animator.cancel() {
            self.frame = reached;
            self.session.current_offset = reached.translation_y;
        }

        let start_offset = self.session.current_offset;
        debug!(start_offset, "Panel drag began");
        self.state = PanelState::Dragging {
            tracker: DragTracker::new(point),
            start_offset,
        };
        true
    }

    pub fn update_drag(&mut self, point: Point) -> bool {
        let max_height = self.session.max_height;
        let damping = self.config.overscroll_damping;
        let PanelState::Dragging { tracker, start_offset } = &mut self.state else {
            return false;
        };
        tracker.update(point);
        let delta_y = point.y - tracker.start_pos.y;

        let (offset, opacity) = if delta_y > 0.0 {
            let offset = (*start_offset + delta_y).min(max_height);
            (offset, clamp(1.0 - offset / max_height, 0.0, 1.0))
        } else {
            (*start_offset + delta_y * damping, 1.0)
        };

        self.session.current_offset = offset;
        self.frame = PanelFrame {
            height: max_height,
            translation_y: offset,
            backdrop_opacity: opacity,
        };
        self.render(RenderMode::Immediate);
        true
    }

    /// Finger lifted; acts only once no touches remain
    pub fn end_drag(&mut self, point: Point, active_touches: usize) -> Option<ReleaseOutcome> {
        if active_touches != 0 {
            return None;
        }
        let PanelState::Dragging { tracker, .. } = &mut self.state else {
            return None;
        };
        tracker.update(point);
        let displacement = point.y - tracker.start_pos.y;
        let velocity = tracker.velocity.y;
        self.state = PanelState::Idle;

        let max_height = self.session.max_height;
        if displacement > self.session.dismiss_threshold {
            let covered = clamp(self.session.current_offset / max_height, 0.0, 1.0);
            let duration = self.config.base_duration * (1.0 - covered);
            debug!(displacement, velocity, duration, "Drag released past threshold");
            self.dismiss(duration, None);
            Some(ReleaseOutcome::Dismiss { duration })
        } else {
            debug!(displacement, velocity, "Drag released, snapping back");
            self.session.current_offset = 0.0;
            self.settle(PanelFrame::open(max_height), self.config.base_duration, SettleKind::SnapBack);
            Some(ReleaseOutcome::SnapBack)
        }
    }

    // ------------------------------------------------------------------
    // Animation
    // ------------------------------------------------------------------

    /// Advance the settle animation by one frame, returns true while animating
    pub fn tick(&mut self, dt: Duration) -> bool {
        match self.animator.advance(dt) {
            Step::Idle => false,
            Step::Running(frame) => {
                self.frame = frame;
                self.render(RenderMode::Settling);
                true
            }
            Step::Finished { value, kind, .. } => {
                self.frame = value;
                self.render(RenderMode::Settling);
                if kind == SettleKind::Dismiss {
                    self.detach();
                }
                false
            }
        }
    }

    fn settle(&mut self, target: PanelFrame, duration: f64, kind: SettleKind) {
        let duration = secs(duration);
        self.animator.start(self.frame, target, duration, self.config.easing, kind);
        if duration.is_zero() {
            self.tick(Duration::ZERO);
        }
    }

    fn detach(&mut self) {
        if let Some(callback) = self.on_before_detach.take() {
            callback();
        }
        self.state = PanelState::Detached;
        info!("Panel detached");
        self.events.emit(PanelEvent::Detached);
    }

    fn update_container(&mut self) {
        match self.content.as_deref() {
            Some(content) => {
                let height = content.current_height();
                self.session.max_height = if height.is_finite() && height > 0.0 {
                    height
                } else {
                    self.config.fallback_height
                };
            }
            None => self.session.max_height = self.config.fallback_height,
        }
        self.chrome = PanelChrome::from_content(self.content.as_deref(), &self.theme);
    }

    fn render(&mut self, mode: RenderMode) {
        if let Some(sink) = self.sink.as_mut() {
            sink.render(&self.frame, mode);
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn session(&self) -> &PanelSession {
        &self.session
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Last rendered frame
    pub fn frame(&self) -> PanelFrame {
        self.frame
    }

    pub fn chrome(&self) -> PanelChrome {
        self.chrome
    }

    pub fn backdrop_color(&self) -> Color {
        self.theme.backdrop_at(self.frame.backdrop_opacity)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, PanelState::Dragging { .. })
    }

    pub fn is_detached(&self) -> bool {
        matches!(self.state, PanelState::Detached)
    }

    fn is_closing(&self) -> bool {
        matches!(self.state, PanelState::Dismissing | PanelState::Detached)
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    pub fn settle_kind(&self) -> Option<SettleKind> {
        self.animator.kind()
    }

    /// Full length of the running settle
    pub fn settle_duration(&self) -> Option<Duration> {
        self.animator.duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::FixedContent;
    use std::cell::RefCell;
    use std::rc::Rc;

    const FRAME: Duration = Duration::from_millis(16);

    fn presented(height: f64) -> PanelGestureController {
        let config = SheetConfig::default();
        let mut panel = PanelGestureController::with_content(&config, Box::new(FixedContent::new(height)));
        assert!(panel.appear());
        settle(&mut panel);
        panel
    }

    fn settle(panel: &mut PanelGestureController) {
        for _ in 0..200 {
            if !panel.tick(FRAME) {
                return;
            }
        }
        panic!("panel never settled");
    }

    fn record_events(panel: &mut PanelGestureController) -> Rc<RefCell<Vec<PanelEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        panel.subscribe(move |e| sink.borrow_mut().push(*e));
        events
    }

    fn drag(panel: &mut PanelGestureController, dy: f64) -> Option<ReleaseOutcome> {
        let start = Point::new(120.0, 400.0);
        assert!(panel.begin_drag(start));
        panel.update_drag(Point::new(120.0, 400.0 + dy / 2.0));
        panel.update_drag(Point::new(120.0, 400.0 + dy));
        panel.end_drag(Point::new(120.0, 400.0 + dy), 0)
    }

    fn assert_bounds(panel: &PanelGestureController) {
        let s = panel.session();
        assert!(s.current_offset >= 0.0 && s.current_offset <= s.max_height, "offset {} out of [0, {}]", s.current_offset, s.max_height);
    }

    struct Recorder(Rc<RefCell<Vec<(PanelFrame, RenderMode)>>>);

    impl RenderSink<PanelFrame> for Recorder {
        fn render(&mut self, frame: &PanelFrame, mode: RenderMode) {
            self.0.borrow_mut().push((*frame, mode));
        }
    }

    #[test]
    fn test_first_appearance_slides_up_once() {
        let config = SheetConfig::default();
        let mut panel = PanelGestureController::with_content(&config, Box::new(FixedContent::new(300.0)));
        assert_eq!(panel.frame().translation_y, 300.0);
        assert!(panel.appear());
        assert_eq!(panel.settle_kind(), Some(SettleKind::Present));
        settle(&mut panel);
        assert_eq!(panel.frame(), PanelFrame::open(300.0));

        // Later layout passes must not animate again
        assert!(!panel.appear());
        assert!(!panel.is_animating());
    }

    #[test]
    fn test_drag_before_appearance_ignored() {
        let mut panel = PanelGestureController::new(&SheetConfig::default());
        assert!(!panel.begin_drag(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_missing_provider_uses_fallback_height() {
        let mut panel = PanelGestureController::new(&SheetConfig::default());
        panel.appear();
        settle(&mut panel);
        assert_eq!(panel.session().max_height, 300.0);
        assert!(panel.begin_drag(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_opacity_linear_during_downward_drag() {
        let mut panel = presented(400.0);
        panel.begin_drag(Point::new(0.0, 100.0));
        panel.update_drag(Point::new(0.0, 300.0));
        assert!((panel.session().current_offset - 200.0).abs() < 1e-9);
        assert!((panel.frame().backdrop_opacity - 0.5).abs() < 1e-9);

        let backdrop = panel.backdrop_color();
        assert_eq!(&backdrop[..3], &[0.0, 0.0, 0.0]);
        assert!((backdrop[3] - 0.33).abs() < 1e-6);
    }

    #[test]
    fn test_downward_drag_clamped_to_max_height() {
        let mut panel = presented(300.0);
        panel.begin_drag(Point::new(0.0, 0.0));
        panel.update_drag(Point::new(0.0, 900.0));
        assert_eq!(panel.session().current_offset, 300.0);
        assert_eq!(panel.frame().backdrop_opacity, 0.0);
    }

    #[test]
    fn test_upward_drag_is_damped() {
        let mut panel = presented(300.0);
        panel.begin_drag(Point::new(0.0, 500.0));
        panel.update_drag(Point::new(0.0, 440.0));
        assert!((panel.session().current_offset + 30.0).abs() < 1e-9);
        assert_eq!(panel.frame().backdrop_opacity, 1.0);

        // Release resolves back inside bounds
        assert_eq!(panel.end_drag(Point::new(0.0, 440.0), 0), Some(ReleaseOutcome::SnapBack));
        assert_bounds(&panel);
    }

    #[test]
    fn test_release_ignored_while_touches_remain() {
        let mut panel = presented(300.0);
        panel.begin_drag(Point::new(0.0, 0.0));
        panel.update_drag(Point::new(0.0, 200.0));
        assert_eq!(panel.end_drag(Point::new(0.0, 200.0), 1), None);
        assert!(panel.is_dragging());
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut at = presented(300.0);
        assert_eq!(drag(&mut at, 150.0), Some(ReleaseOutcome::SnapBack));

        let mut past = presented(300.0);
        assert!(matches!(drag(&mut past, 151.0), Some(ReleaseOutcome::Dismiss { .. })));
    }

    #[test]
    fn test_short_release_snaps_back() {
        let mut panel = presented(300.0);
        let events = record_events(&mut panel);

        // Goes down 200 but is released at a net 120
        panel.begin_drag(Point::new(50.0, 300.0));
        panel.update_drag(Point::new(50.0, 500.0));
        panel.update_drag(Point::new(50.0, 420.0));
        assert_eq!(panel.end_drag(Point::new(50.0, 420.0), 0), Some(ReleaseOutcome::SnapBack));

        assert_eq!(panel.session().current_offset, 0.0);
        settle(&mut panel);
        assert_eq!(panel.frame().translation_y, 0.0);
        assert_eq!(panel.frame().backdrop_opacity, 1.0);
        assert!(events.borrow().is_empty());
        assert!(!panel.is_detached());
    }

    #[test]
    fn test_long_release_dismisses_with_scaled_duration() {
        let mut panel = presented(300.0);
        let events = record_events(&mut panel);
        let detached = Rc::new(RefCell::new(0));

        let outcome = drag(&mut panel, 180.0);
        let Some(ReleaseOutcome::Dismiss { duration }) = outcome else {
            panic!("expected dismiss, got {:?}", outcome);
        };
        assert!((duration - 0.2).abs() < 1e-9);
        let running = panel.settle_duration().unwrap().as_secs_f64();
        assert!((running - 0.2).abs() < 1e-6);
        assert_bounds(&panel);

        let counter = detached.clone();
        // A second dismissal while closing is ignored
        assert!(!panel.dismiss(0.5, Some(Box::new(move || *counter.borrow_mut() += 1))));

        settle(&mut panel);
        assert!(panel.is_detached());
        assert_eq!(*detached.borrow(), 0);
        assert_eq!(*events.borrow(), vec![PanelEvent::DismissRequested, PanelEvent::Detached]);
    }

    #[test]
    fn test_dismiss_callback_runs_before_detach() {
        let mut panel = presented(300.0);
        let order = Rc::new(RefCell::new(Vec::new()));

        let log = order.clone();
        panel.subscribe(move |e| log.borrow_mut().push(format!("{:?}", e)));
        let log = order.clone();
        panel.dismiss(0.3, Some(Box::new(move || log.borrow_mut().push("before".to_string()))));
        settle(&mut panel);

        assert_eq!(*order.borrow(), vec!["DismissRequested", "before", "Detached"]);
        assert_eq!(panel.frame().backdrop_opacity, 0.0);
        assert_eq!(panel.frame().translation_y, 300.0);
    }

    #[test]
    fn test_non_positive_duration_dismisses_immediately() {
        let mut panel = presented(300.0);
        panel.dismiss(-1.0, None);
        assert!(panel.is_detached());
        assert!(!panel.is_animating());
    }

    #[test]
    fn test_outside_tap_dismisses_unless_dragging() {
        let mut panel = presented(300.0);
        panel.begin_drag(Point::new(0.0, 0.0));
        assert!(!panel.tap_outside());
        panel.end_drag(Point::new(0.0, 10.0), 0);
        assert!(panel.tap_outside());
        assert!(matches!(panel.state(), PanelState::Dismissing));
    }

    #[test]
    fn test_drag_during_settle_adopts_animated_value() {
        let mut panel = presented(300.0);
        drag(&mut panel, 100.0);
        // Halfway through the snap-back
        for _ in 0..10 {
            panel.tick(FRAME);
        }
        let reached = panel.frame().translation_y;
        assert!(reached > 0.0 && reached < 100.0);

        assert!(panel.begin_drag(Point::new(0.0, 0.0)));
        assert!(!panel.is_animating());
        assert_eq!(panel.session().current_offset, reached);

        panel.update_drag(Point::new(0.0, 10.0));
        assert!((panel.session().current_offset - (reached + 10.0)).abs() < 1e-9);

        // The superseded snap-back never lands
        panel.end_drag(Point::new(0.0, 10.0), 0);
        assert_eq!(panel.settle_kind(), Some(SettleKind::SnapBack));
    }

    #[test]
    fn test_reload_requeries_height() {
        let config = SheetConfig::default();
        let mut panel = PanelGestureController::with_content(&config, Box::new(FixedContent::new(200.0)));
        panel.appear();
        settle(&mut panel);
        let events = record_events(&mut panel);

        panel.load_content(Box::new(FixedContent::new(350.0).with_background([0.0, 0.0, 1.0, 1.0])));
        assert_eq!(panel.session().max_height, 200.0);
        assert!(panel.reload());
        assert_eq!(panel.session().max_height, 350.0);
        settle(&mut panel);
        assert_eq!(panel.frame(), PanelFrame::open(350.0));
        assert_eq!(panel.chrome().off_screen, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(*events.borrow(), vec![PanelEvent::ContentChanged]);
    }

    #[test]
    fn test_expand_adds_available_space() {
        let mut panel = presented(300.0);
        panel.expand(250.0, Some(0.25));
        assert_eq!(panel.session().max_height, 550.0);
        assert_eq!(panel.settle_duration(), Some(Duration::from_millis(250)));
        settle(&mut panel);
        assert_eq!(panel.frame(), PanelFrame::open(550.0));

        panel.expand(-40.0, None);
        assert_eq!(panel.session().max_height, 550.0);
    }

    #[test]
    fn test_cancelled_gesture_resolves_like_release() {
        let mut panel = presented(300.0);
        panel.handle(GestureEvent::Began(Point::new(0.0, 0.0)));
        panel.handle(GestureEvent::Changed(Point::new(0.0, 200.0), 1));
        panel.handle(GestureEvent::Cancelled);
        assert!(matches!(panel.state(), PanelState::Dismissing));
    }

    #[test]
    fn test_multi_touch_changes_ignored() {
        let mut panel = presented(300.0);
        panel.handle(GestureEvent::Began(Point::new(0.0, 0.0)));
        panel.handle(GestureEvent::Changed(Point::new(0.0, 120.0), 2));
        assert_eq!(panel.session().current_offset, 0.0);
    }

    #[test]
    fn test_sink_sees_immediate_then_settling_frames() {
        let mut panel = presented(300.0);
        let frames = Rc::new(RefCell::new(Vec::new()));
        panel.set_sink(Box::new(Recorder(frames.clone())));

        drag(&mut panel, 60.0);
        settle(&mut panel);

        let frames = frames.borrow();
        assert_eq!(frames[0].1, RenderMode::Immediate);
        assert_eq!(frames.last().unwrap().1, RenderMode::Settling);
        assert_eq!(frames.last().unwrap().0, PanelFrame::open(300.0));
    }

    #[test]
    fn test_offset_bounds_hold_after_any_release() {
        for dy in [-400.0, -10.0, 0.0, 75.0, 149.0, 150.0, 151.0, 260.0, 999.0] {
            let mut panel = presented(300.0);
            drag(&mut panel, dy);
            assert_bounds(&panel);
        }
    }
}
