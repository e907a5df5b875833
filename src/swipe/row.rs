//! A list row: tap feedback plus swipe-to-reveal, driven by raw pointer events

use std::time::Duration;

use tracing::debug;

use crate::config::SheetConfig;
use crate::input::{DragAxis, DragTracker, GestureEvent};
use crate::ui::primitives::{colors, Color, Point};
use crate::ui::render::{RenderMode, RenderSink, RowFrame};
use crate::ui::theme::Theme;

use super::tap::{TapFeedback, TapProgress};
use super::{RowLayout, SwipeRevealController, TapResolution};

/// Lock distance of the demo list rows
pub const ROW_LOCK_DISTANCE: f64 = 65.0;

/// Rows that shrink while pressed
pub trait TapAnimatable {
    fn tap_feedback_enabled(&self) -> bool;
}

/// Rows that can be swiped open
pub trait SwipeRevealable {
    fn pan_is_enabled(&self) -> bool;

    /// Lock distance override, configured default when `None`
    fn lock_distance(&self) -> Option<f64> {
        None
    }
}

/// Plain swipe policy for rows that are not part of the demo list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipePolicy {
    pub enabled: bool,
    pub lock_distance: Option<f64>,
}

impl SwipePolicy {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            lock_distance: None,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            lock_distance: None,
        }
    }

    pub fn with_lock(distance: f64) -> Self {
        Self {
            enabled: true,
            lock_distance: Some(distance),
        }
    }
}

impl SwipeRevealable for SwipePolicy {
    fn pan_is_enabled(&self) -> bool {
        self.enabled
    }

    fn lock_distance(&self) -> Option<f64> {
        self.lock_distance
    }
}

/// What a demo row represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    /// Tap-only row
    Animatable { enabled: bool },
    /// Swipeable row with an enable/disable action underneath
    Swipable { selected: bool },
}

impl RowStatus {
    /// Status after the background action flips it
    pub fn toggled(self) -> Self {
        match self {
            RowStatus::Animatable { enabled } => RowStatus::Animatable { enabled: !enabled },
            RowStatus::Swipable { selected } => RowStatus::Swipable { selected: !selected },
        }
    }

    pub fn is_active(self) -> bool {
        match self {
            RowStatus::Animatable { enabled } => enabled,
            RowStatus::Swipable { selected } => selected,
        }
    }
}

impl TapAnimatable for RowStatus {
    fn tap_feedback_enabled(&self) -> bool {
        self.is_active()
    }
}

impl SwipeRevealable for RowStatus {
    fn pan_is_enabled(&self) -> bool {
        matches!(self, RowStatus::Swipable { .. })
    }

    fn lock_distance(&self) -> Option<f64> {
        Some(ROW_LOCK_DISTANCE)
    }
}

/// Action revealed under a swiped row
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundAction {
    pub label: String,
    pub icon: String,
    pub color: Color,
}

/// Everything a host needs to draw a row
#[derive(Debug, Clone, PartialEq)]
pub struct RowAppearance {
    pub title: String,
    pub description: String,
    pub icon: String,
    /// Small status dot
    pub indicator_color: Color,
    pub picture_color: Color,
    pub title_color: Color,
    pub description_color: Color,
    /// Fill of the view under the content carrying the shadow
    pub shadow_color: Color,
    pub corner_radius: f64,
    pub background_action: Option<BackgroundAction>,
    /// Opacity of title, description and picture
    pub content_alpha: f64,
}

impl RowAppearance {
    /// Empty row, used for headers and unknown rows
    pub fn neutral() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            icon: String::new(),
            indicator_color: colors::CLEAR,
            picture_color: colors::CLEAR,
            title_color: colors::CLEAR,
            description_color: colors::CLEAR,
            shadow_color: colors::CLEAR,
            corner_radius: 0.0,
            background_action: None,
            content_alpha: 1.0,
        }
    }

    pub fn for_status(status: RowStatus, theme: &Theme) -> Self {
        let active = status.is_active();
        let (title, description, icon, background_action) = match status {
            RowStatus::Animatable { enabled } => (
                "Animatable Cell",
                if enabled { "enabled" } else { "disabled" },
                "ic-touch",
                None,
            ),
            RowStatus::Swipable { selected } => {
                let action = if selected {
                    ("Disable", "ic-close", theme.negative)
                } else {
                    ("Enable", "ic-check", theme.positive)
                };
                (
                    "Swipable Cell",
                    if selected { "selected" } else { "unselected" },
                    "ic-swipe",
                    Some(BackgroundAction {
                        label: action.0.to_string(),
                        icon: action.1.to_string(),
                        color: action.2,
                    }),
                )
            }
        };

        Self {
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            indicator_color: if active { theme.positive } else { colors::GRAY },
            picture_color: if active { theme.primary } else { colors::GRAY },
            title_color: theme.text_main,
            description_color: theme.text_secondary,
            shadow_color: theme.shadow,
            corner_radius: theme.corner_radius,
            background_action,
            content_alpha: if active { 1.0 } else { 0.25 },
        }
    }
}

/// Notifications from a row to its list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEvent {
    SwipeBegan,
    BackgroundActionTapped,
    TapAnimationCompleted,
}

/// Who owns the current touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Claim {
    /// Within the claim distance, still a tap candidate
    Pending,
    Swiping,
    /// Vertical movement, the host scrolls instead
    Yielded,
}

#[derive(Debug)]
struct Pointer {
    tracker: DragTracker,
    claim: Claim,
}

pub struct Row {
    status: RowStatus,
    appearance: RowAppearance,
    layout: RowLayout,
    swipe: SwipeRevealController,
    tap: TapFeedback,
    pointer: Option<Pointer>,
    /// Movement that turns a touch into a swipe or a scroll
    claim_distance: f64,
    frame: RowFrame,
    sink: Option<Box<dyn RenderSink<RowFrame>>>,
}

impl Row {
    pub fn new(config: &SheetConfig, status: RowStatus, layout: RowLayout) -> Self {
        let mut row = Self {
            status,
            appearance: RowAppearance::neutral(),
            layout,
            swipe: SwipeRevealController::new(&config.swipe),
            tap: TapFeedback::new(&config.tap),
            pointer: None,
            claim_distance: config.swipe.claim_distance,
            frame: RowFrame::centered(config.swipe.background_rest),
            sink: None,
        };
        row.configure(status, &config.theme);
        row
    }

    /// Apply a status: closed, centered, full size, appearance re-derived
    pub fn configure(&mut self, status: RowStatus, theme: &Theme) {
        self.status = status;
        self.appearance = RowAppearance::for_status(status, theme);
        self.swipe.configure(&status);
        self.tap.configure(&status);
        self.pointer = None;
        self.render(RenderMode::Immediate);
    }

    pub fn set_sink(&mut self, sink: Box<dyn RenderSink<RowFrame>>) {
        self.sink = Some(sink);
    }

    pub fn handle(&mut self, event: GestureEvent) -> Vec<RowEvent> {
        match event {
            GestureEvent::Began(point) => {
                self.pointer_down(point);
                Vec::new()
            }
            GestureEvent::Changed(point, _) => self.pointer_moved(point),
            GestureEvent::Ended(point, _) => self.pointer_up(point),
            GestureEvent::Cancelled => self.pointer_cancelled(),
        }
    }

    pub fn pointer_down(&mut self, point: Point) {
        if self.swipe.touch_down(point, &self.layout) {
            debug!("Touch armed background action");
        }
        self.tap.press();
        self.pointer = Some(Pointer {
            tracker: DragTracker::new(point),
            claim: Claim::Pending,
        });
    }

    pub fn pointer_moved(&mut self, point: Point) -> Vec<RowEvent> {
        let mut events = Vec::new();
        let Some(pointer) = self.pointer.as_mut() else {
            return events;
        };
        let step = pointer.tracker.update(point);
        let axis = pointer.tracker.claim(self.claim_distance);
        let claim = pointer.claim;

        match claim {
            Claim::Pending => match axis {
                DragAxis::Undecided => {}
                DragAxis::Horizontal if self.swipe.pan_is_enabled() => {
                    pointer.claim = Claim::Swiping;
                    self.tap.cancel();
                    let moved = pointer.tracker.delta();
                    if self.swipe.begin_drag() {
                        events.push(RowEvent::SwipeBegan);
                    }
                    // Catch up with everything moved while undecided
                    self.swipe.update_drag(moved);
                    self.render(RenderMode::Immediate);
                }
                _ => {
                    pointer.claim = Claim::Yielded;
                    debug!(?axis, "Row yielded touch");
                    self.tap.cancel();
                    self.swipe.close();
                }
            },
            Claim::Swiping => {
                self.swipe.update_drag(step);
                self.render(RenderMode::Immediate);
            }
            Claim::Yielded => {}
        }
        events
    }

    pub fn pointer_up(&mut self, point: Point) -> Vec<RowEvent> {
        let mut events = Vec::new();
        let Some(pointer) = self.pointer.take() else {
            return events;
        };

        match pointer.claim {
            Claim::Swiping => {
                self.swipe.end_drag();
            }
            Claim::Yielded => {}
            Claim::Pending => match self.swipe.touch_up(point, &self.layout) {
                TapResolution::BackgroundAction => {
                    self.tap.cancel();
                    events.push(RowEvent::BackgroundActionTapped);
                }
                TapResolution::ClosedOpenRow | TapResolution::Plain => {
                    self.tap.release();
                }
            },
        }
        events
    }

    pub fn pointer_cancelled(&mut self) -> Vec<RowEvent> {
        if let Some(pointer) = self.pointer.take() {
            if pointer.claim == Claim::Swiping {
                self.swipe.end_drag();
            } else {
                self.tap.cancel();
                self.swipe.close();
            }
        }
        Vec::new()
    }

    /// Advance swipe settle and tap feedback by one frame
    pub fn tick(&mut self, dt: Duration) -> Vec<RowEvent> {
        let mut events = Vec::new();
        let moved = self.swipe.tick(dt);
        let progress = self.tap.tick(dt);
        if progress == TapProgress::Completed {
            events.push(RowEvent::TapAnimationCompleted);
        }
        if moved || progress != TapProgress::Idle {
            self.render(RenderMode::Settling);
        }
        events
    }

    fn render(&mut self, mode: RenderMode) {
        let offsets = self.swipe.offsets();
        self.frame = RowFrame {
            foreground_x: offsets.foreground_x,
            background_x: offsets.background_x,
            scale: self.tap.scale(),
        };
        if let Some(sink) = self.sink.as_mut() {
            sink.render(&self.frame, mode);
        }
    }

    pub fn status(&self) -> RowStatus {
        self.status
    }

    pub fn appearance(&self) -> &RowAppearance {
        &self.appearance
    }

    pub fn layout(&self) -> &RowLayout {
        &self.layout
    }

    pub fn frame(&self) -> RowFrame {
        self.frame
    }

    pub fn swipe(&self) -> &SwipeRevealController {
        &self.swipe
    }

    pub fn tap(&self) -> &TapFeedback {
        &self.tap
    }

    /// No touch in progress and nothing animating
    pub fn is_idle(&self) -> bool {
        self.pointer.is_none() && !self.swipe.is_animating() && !self.tap.is_animating()
    }
}
