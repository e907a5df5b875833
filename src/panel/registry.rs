//! Presented panels, addressed by handle
//!
//! The registry owns every live panel session. Hosts keep a `PanelId` instead
//! of a reference, so a panel that detached can be dropped here without
//! leaving anything dangling behind.

use std::time::Duration;

use tracing::{debug, info};

use super::PanelGestureController;
use crate::input::GestureEvent;

/// Handle to a presented panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(u64);

/// Stack of presented panels, last presented on top
#[derive(Default)]
pub struct PanelRegistry {
    panels: Vec<(PanelId, PanelGestureController)>,
    next_id: u64,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a panel and run its first appearance
    pub fn present(&mut self, mut panel: PanelGestureController) -> PanelId {
        let id = PanelId(self.next_id);
        self.next_id += 1;
        panel.appear();
        info!("Presented panel {:?} ({} live)", id, self.panels.len() + 1);
        self.panels.push((id, panel));
        id
    }

    pub fn get(&self, id: PanelId) -> Option<&PanelGestureController> {
        self.panels.iter().find(|(pid, _)| *pid == id).map(|(_, p)| p)
    }

    pub fn get_mut(&mut self, id: PanelId) -> Option<&mut PanelGestureController> {
        self.panels.iter_mut().find(|(pid, _)| *pid == id).map(|(_, p)| p)
    }

    /// Topmost panel, the one that receives touches
    pub fn top(&self) -> Option<PanelId> {
        self.panels.last().map(|(id, _)| *id)
    }

    pub fn contains(&self, id: PanelId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Dismiss a panel over `duration` seconds, false for unknown or already closing ids
    pub fn dismiss(&mut self, id: PanelId, duration: f64) -> bool {
        match self.get_mut(id) {
            Some(panel) => panel.dismiss(duration, None),
            None => {
                debug!("Dismiss for unknown panel {:?}", id);
                false
            }
        }
    }

    /// Deliver a gesture to the topmost panel
    pub fn handle(&mut self, event: GestureEvent) -> Option<PanelId> {
        let (id, panel) = self.panels.last_mut()?;
        panel.handle(event);
        Some(*id)
    }

    /// Outside tap lands on the topmost panel's backdrop
    pub fn tap_outside(&mut self) -> bool {
        match self.panels.last_mut() {
            Some((_, panel)) => panel.tap_outside(),
            None => false,
        }
    }

    /// Advance every panel, then drop the ones that detached
    ///
    /// Returns true while any panel is still animating.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let mut animating = false;
        for (_, panel) in self.panels.iter_mut() {
            animating |= panel.tick(dt);
        }

        let before = self.panels.len();
        self.panels.retain(|(id, panel)| {
            if panel.is_detached() {
                info!("Releasing detached panel {:?}", id);
                false
            } else {
                true
            }
        });
        if self.panels.len() != before {
            debug!("{} panel(s) live", self.panels.len());
        }
        animating
    }

    /// True when no panel is dragging or animating
    pub fn is_idle(&self) -> bool {
        self.panels.iter().all(|(_, p)| !p.is_dragging() && !p.is_animating())
    }
}
