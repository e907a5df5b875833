//! Timed transitions used to settle a gesture
//!
//! A `TransitionAnimator` holds at most one transition. Starting a new one
//! replaces the previous transition, which then never reports completion.
//! Time only moves when the host calls `advance` from its frame clock, so the
//! whole thing stays single-threaded and deterministic.

use std::fmt::Debug;
use std::time::Duration;

use tracing::trace;

use crate::ui::primitives::{lerp, Easing};

/// Values that can be blended between two endpoints
pub trait Interpolate: Copy {
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        lerp(*self, *to, t)
    }
}

/// Identifies one started transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionId(u64);

/// Convert a duration in seconds, non-positive or non-finite values mean "now"
pub fn secs(duration: f64) -> Duration {
    if duration.is_finite() && duration > 0.0 {
        Duration::from_secs_f64(duration)
    } else {
        Duration::ZERO
    }
}

/// Fraction of `duration` covered by `elapsed`, clamped to 0.0 - 1.0
pub fn normalized_progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
struct Transition<V, K> {
    id: TransitionId,
    from: V,
    to: V,
    kind: K,
    easing: Easing,
    elapsed: Duration,
    duration: Duration,
}

impl<V: Interpolate, K> Transition<V, K> {
    fn value(&self) -> V {
        let t = self.easing.apply(normalized_progress(self.elapsed, self.duration));
        self.from.interpolate(&self.to, t)
    }
}

/// Result of advancing the animator by one frame
#[derive(Debug, Clone, PartialEq)]
pub enum Step<V, K> {
    /// Nothing in flight
    Idle,
    /// Still animating, current value attached
    Running(V),
    /// Reached its target during this step
    Finished { id: TransitionId, value: V, kind: K },
}

/// Single-slot transition runner
#[derive(Debug, Clone)]
pub struct TransitionAnimator<V, K> {
    active: Option<Transition<V, K>>,
    next_id: u64,
}

impl<V, K> Default for TransitionAnimator<V, K> {
    fn default() -> Self {
        Self {
            active: None,
            next_id: 0,
        }
    }
}

impl<V: Interpolate, K: Copy + Debug> TransitionAnimator<V, K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start animating from `from` to `to`, superseding whatever was running
    pub fn start(&mut self, from: V, to: V, duration: Duration, easing: Easing, kind: K) -> TransitionId {
        if let Some(previous) = self.active.take() {
            trace!(id = previous.id.0, kind = ?previous.kind, "transition superseded");
        }

        let id = TransitionId(self.next_id);
        self.next_id += 1;
        trace!(id = id.0, ?kind, ?duration, "transition started");

        self.active = Some(Transition {
            id,
            from,
            to,
            kind,
            easing,
            elapsed: Duration::ZERO,
            duration,
        });
        id
    }

    /// Stop the running transition, returning the value it had reached
    pub fn cancel(&mut self) -> Option<V> {
        let transition = self.active.take()?;
        trace!(id = transition.id.0, kind = ?transition.kind, "transition cancelled");
        Some(transition.value())
    }

    /// Move time forward
    pub fn advance(&mut self, dt: Duration) -> Step<V, K> {
        let Some(transition) = self.active.as_mut() else {
            return Step::Idle;
        };

        transition.elapsed = transition.elapsed.saturating_add(dt);
        if transition.elapsed < transition.duration {
            return Step::Running(transition.value());
        }

        match self.active.take() {
            Some(done) => Step::Finished {
                id: done.id,
                value: done.to,
                kind: done.kind,
            },
            None => Step::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn kind(&self) -> Option<K> {
        self.active.as_ref().map(|t| t.kind)
    }

    /// Full length of the running transition
    pub fn duration(&self) -> Option<Duration> {
        self.active.as_ref().map(|t| t.duration)
    }
}
