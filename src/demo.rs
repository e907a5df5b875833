//! Scripted demo host - a phone-sized list with quote panels
//!
//! Plays a fixed timeline of touches against a `RowList` and a
//! `PanelRegistry` the way a real host would deliver them:
//! - Completed taps on a row present a quote panel
//! - Background actions toggle the row (handled by the list itself)
//! - Panel events are counted so a run can be checked afterwards

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use clap::ValueEnum;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::SheetConfig;
use crate::host::QuoteContent;
use crate::input::GestureEvent;
use crate::panel::{PanelEvent, PanelGestureController, PanelId, PanelRegistry};
use crate::swipe::{RowEvent, RowId, RowList};
use crate::ui::primitives::Point;
use crate::ui::render::LogSink;

/// Phone-sized demo screen
pub const SCREEN_WIDTH: f64 = 375.0;
pub const SCREEN_HEIGHT: f64 = 812.0;

/// Laid-out height of a quote card before capping
const QUOTE_HEIGHT: f64 = 420.0;

const QUOTES: &[(&str, &str, &[&str])] = &[
    ("Alan Kay", "The best way to predict the future is to invent it.", &["future", "invention"]),
    ("Grace Hopper", "The most dangerous phrase in the language is: we've always done it this way.", &["change"]),
    ("Edsger Dijkstra", "Simplicity is prerequisite for reliability.", &["simplicity"]),
];

/// Which part of the demo to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    Panel,
    Swipe,
    All,
}

/// One scripted input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Touch on the list
    List(GestureEvent),
    /// Touch on the topmost panel
    Panel(GestureEvent),
    /// Tap on the dimmed backdrop
    TapOutside,
    PresentQuote,
}

/// An action and when to play it, relative to the start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    pub at: Duration,
    pub action: Action,
}

fn step(ms: u64, action: Action) -> ScriptStep {
    ScriptStep {
        at: Duration::from_millis(ms),
        action,
    }
}

fn list(event: GestureEvent) -> Action {
    Action::List(event)
}

fn panel(event: GestureEvent) -> Action {
    Action::Panel(event)
}

/// Timeline for a scenario, sorted by time
pub fn script(scenario: Scenario) -> Vec<ScriptStep> {
    match scenario {
        Scenario::Swipe => swipe_script(0),
        Scenario::Panel => panel_script(0),
        Scenario::All => {
            let mut steps = swipe_script(0);
            steps.extend(panel_script(3000));
            steps
        }
    }
}

fn swipe_script(start: u64) -> Vec<ScriptStep> {
    // Fourth list item (swipable, selected) and second (animatable, enabled)
    let swipable_y = 336.0;
    let animatable_y = 160.0;
    vec![
        // Swipe right past the lock distance
        step(start, list(GestureEvent::Began(Point::new(150.0, swipable_y)))),
        step(start + 50, list(GestureEvent::Changed(Point::new(190.0, swipable_y), 1))),
        step(start + 100, list(GestureEvent::Changed(Point::new(230.0, swipable_y), 1))),
        step(start + 150, list(GestureEvent::Ended(Point::new(230.0, swipable_y), 0))),
        // Tap the uncovered action
        step(start + 600, list(GestureEvent::Began(Point::new(20.0, swipable_y)))),
        step(start + 650, list(GestureEvent::Ended(Point::new(20.0, swipable_y), 0))),
        // Tap a row, which presents a quote
        step(start + 1000, list(GestureEvent::Began(Point::new(100.0, animatable_y)))),
        step(start + 1080, list(GestureEvent::Ended(Point::new(100.0, animatable_y), 0))),
        step(start + 2200, Action::TapOutside),
    ]
}

fn panel_script(start: u64) -> Vec<ScriptStep> {
    let x = SCREEN_WIDTH / 2.0;
    vec![
        step(start, Action::PresentQuote),
        // Down 200, back up, released at 120: snaps back
        step(start + 700, panel(GestureEvent::Began(Point::new(x, 500.0)))),
        step(start + 750, panel(GestureEvent::Changed(Point::new(x, 600.0), 1))),
        step(start + 800, panel(GestureEvent::Changed(Point::new(x, 700.0), 1))),
        step(start + 850, panel(GestureEvent::Changed(Point::new(x, 620.0), 1))),
        step(start + 900, panel(GestureEvent::Ended(Point::new(x, 620.0), 0))),
        // Down 180 and release: dismisses
        step(start + 1500, panel(GestureEvent::Began(Point::new(x, 500.0)))),
        step(start + 1550, panel(GestureEvent::Changed(Point::new(x, 590.0), 1))),
        step(start + 1600, panel(GestureEvent::Changed(Point::new(x, 680.0), 1))),
        step(start + 1650, panel(GestureEvent::Ended(Point::new(x, 680.0), 0))),
        // Present again and close from the backdrop
        step(start + 2500, Action::PresentQuote),
        step(start + 3200, Action::TapOutside),
    ]
}

/// What happened during a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DemoStats {
    pub swipes_began: u32,
    pub background_actions: u32,
    pub taps_completed: u32,
    pub panels_presented: u32,
    pub dismiss_requests: u32,
    pub panels_detached: u32,
}

/// Owns the list and the presented panels
pub struct DemoHost {
    config: SheetConfig,
    list: RowList,
    panels: PanelRegistry,
    row_events: Rc<RefCell<Vec<(RowId, RowEvent)>>>,
    stats: Rc<RefCell<DemoStats>>,
    quotes_shown: usize,
}

impl DemoHost {
    pub fn new(config: &SheetConfig) -> Self {
        let mut list = RowList::demo(config, SCREEN_WIDTH);
        for index in 0..list.len() {
            if let Some(row) = list.row_mut(RowId(index)) {
                row.set_sink(Box::new(LogSink::new(format!("row-{}", index))));
            }
        }

        let row_events = Rc::new(RefCell::new(Vec::new()));
        let sink = row_events.clone();
        list.subscribe(move |event| sink.borrow_mut().push(*event));

        Self {
            config: config.clone(),
            list,
            panels: PanelRegistry::new(),
            row_events,
            stats: Rc::new(RefCell::new(DemoStats::default())),
            quotes_shown: 0,
        }
    }

    pub fn apply(&mut self, action: Action) {
        debug!(?action, "Script action");
        match action {
            Action::List(event) => {
                if !self.panels.is_empty() {
                    debug!("List is covered by a panel, touch dropped");
                    return;
                }
                self.list.handle(event);
                self.drain_row_events();
            }
            Action::Panel(event) => {
                if self.panels.handle(event).is_none() {
                    debug!("No panel to receive touch");
                }
            }
            Action::TapOutside => {
                self.panels.tap_outside();
            }
            Action::PresentQuote => {
                self.present_quote();
            }
        }
    }

    /// Advance everything by one frame, returns true while animating
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.list.tick(dt);
        self.drain_row_events();
        self.panels.tick(dt)
    }

    pub fn is_idle(&self) -> bool {
        self.list.is_idle() && self.panels.is_idle()
    }

    pub fn present_quote(&mut self) -> PanelId {
        let (author, quote, tags) = QUOTES[self.quotes_shown % QUOTES.len()];
        self.quotes_shown += 1;

        let content = QuoteContent::new(QUOTE_HEIGHT, SCREEN_HEIGHT, &self.config.theme).with_quote(author, quote, tags);
        let mut panel = PanelGestureController::with_content(&self.config, Box::new(content));
        panel.set_sink(Box::new(LogSink::new(format!("panel-{}", self.quotes_shown))));

        let stats = self.stats.clone();
        panel.subscribe(move |event| {
            let mut stats = stats.borrow_mut();
            match event {
                PanelEvent::DismissRequested => stats.dismiss_requests += 1,
                PanelEvent::Detached => stats.panels_detached += 1,
                PanelEvent::ContentChanged => {}
            }
        });

        self.stats.borrow_mut().panels_presented += 1;
        info!("Showing quote by {}", author);
        self.panels.present(panel)
    }

    fn drain_row_events(&mut self) {
        let events: Vec<_> = self.row_events.borrow_mut().drain(..).collect();
        for (id, event) in events {
            match event {
                RowEvent::SwipeBegan => self.stats.borrow_mut().swipes_began += 1,
                RowEvent::BackgroundActionTapped => self.stats.borrow_mut().background_actions += 1,
                RowEvent::TapAnimationCompleted => {
                    self.stats.borrow_mut().taps_completed += 1;
                    debug!("Row {} tapped", id.0);
                    self.present_quote();
                }
            }
        }
    }

    pub fn list(&self) -> &RowList {
        &self.list
    }

    pub fn panels(&self) -> &PanelRegistry {
        &self.panels
    }

    pub fn stats(&self) -> DemoStats {
        self.stats.borrow().clone()
    }
}

/// Play a script on a simulated frame clock, without an event loop
///
/// Returns the elapsed simulated time, or `None` if the host was still busy
/// after `limit`.
pub fn run_script(host: &mut DemoHost, steps: &[ScriptStep], frame: Duration, limit: Duration) -> Option<Duration> {
    let mut now = Duration::ZERO;
    let mut next = 0;
    while now <= limit {
        while next < steps.len() && steps[next].at <= now {
            host.apply(steps[next].action);
            next += 1;
        }
        host.tick(frame);
        if next == steps.len() && host.is_idle() {
            return Some(now);
        }
        now += frame;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swipe::RowStatus;

    const FRAME: Duration = Duration::from_millis(16);
    const LIMIT: Duration = Duration::from_secs(20);

    #[test]
    fn test_scripts_are_sorted() {
        for scenario in [Scenario::Panel, Scenario::Swipe, Scenario::All] {
            let steps = script(scenario);
            assert!(steps.windows(2).all(|w| w[0].at <= w[1].at), "{:?}", scenario);
        }
    }

    #[test]
    fn test_swipe_scenario() {
        let mut host = DemoHost::new(&SheetConfig::default());
        assert!(run_script(&mut host, &script(Scenario::Swipe), FRAME, LIMIT).is_some());

        let stats = host.stats();
        assert_eq!(stats.swipes_began, 1);
        assert_eq!(stats.background_actions, 1);
        assert_eq!(stats.taps_completed, 1);
        assert_eq!(stats.panels_presented, 1);
        assert_eq!(stats.panels_detached, 1);
        assert_eq!(host.list().status(RowId(3)), Some(RowStatus::Swipable { selected: false }));
        assert!(host.panels().is_empty());
    }

    #[test]
    fn test_panel_scenario() {
        let mut host = DemoHost::new(&SheetConfig::default());
        assert!(run_script(&mut host, &script(Scenario::Panel), FRAME, LIMIT).is_some());

        let stats = host.stats();
        assert_eq!(stats.panels_presented, 2);
        assert_eq!(stats.dismiss_requests, 2);
        assert_eq!(stats.panels_detached, 2);
        assert_eq!(stats.swipes_began, 0);
        assert!(host.panels().is_empty());
    }

    #[test]
    fn test_full_demo_settles() {
        let mut host = DemoHost::new(&SheetConfig::default());
        let elapsed = run_script(&mut host, &script(Scenario::All), FRAME, LIMIT).unwrap();
        assert!(elapsed >= Duration::from_millis(6200));

        let stats = host.stats();
        assert_eq!(stats.panels_presented, 3);
        assert_eq!(stats.dismiss_requests, 3);
        assert_eq!(stats.panels_detached, 3);
        assert!(host.is_idle());
    }

    #[test]
    fn test_list_touches_blocked_by_panel() {
        let mut host = DemoHost::new(&SheetConfig::default());
        host.present_quote();
        host.apply(Action::List(GestureEvent::Began(Point::new(150.0, 336.0))));
        host.apply(Action::List(GestureEvent::Changed(Point::new(250.0, 336.0), 1)));
        host.apply(Action::List(GestureEvent::Ended(Point::new(250.0, 336.0), 0)));
        assert_eq!(host.stats().swipes_began, 0);
    }
}
