//! Demo list: a header followed by animatable and swipable rows
//!
//! The list owns its rows and hands out `RowId`s. Rows report to the list
//! through return values, never through a reference back to it.

use std::time::Duration;

use tracing::{debug, info};

use crate::config::SheetConfig;
use crate::input::GestureEvent;
use crate::notify::Notifier;
use crate::ui::primitives::{Point, Rect};

use super::row::{Row, RowAppearance, RowEvent, RowStatus};
use super::RowLayout;

const HEADER_HEIGHT: f64 = 120.0;
const ROW_HEIGHT: f64 = 88.0;

/// Position of an item in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub usize);

pub enum ListItem {
    Header { title: String, subtitle: String },
    Row(Row),
}

impl ListItem {
    fn height(&self) -> f64 {
        match self {
            ListItem::Header { .. } => HEADER_HEIGHT,
            ListItem::Row(_) => ROW_HEIGHT,
        }
    }
}

pub struct RowList {
    config: SheetConfig,
    width: f64,
    items: Vec<ListItem>,
    /// Row that received the current touch
    active: Option<RowId>,
    events: Notifier<(RowId, RowEvent)>,
}

impl RowList {
    pub fn new(config: &SheetConfig, width: f64) -> Self {
        Self {
            config: config.clone(),
            width,
            items: Vec::new(),
            active: None,
            events: Notifier::new(),
        }
    }

    /// Header, two animatable rows and two swipable rows
    pub fn demo(config: &SheetConfig, width: f64) -> Self {
        let mut list = Self::new(config, width);
        list.push_header(
            "Header Title",
            "This is a subtitle. It's under the title and you can see me and watch me and read me with your eyes.",
        );
        list.push_row(RowStatus::Animatable { enabled: true });
        list.push_row(RowStatus::Animatable { enabled: false });
        list.push_row(RowStatus::Swipable { selected: true });
        list.push_row(RowStatus::Swipable { selected: false });
        list
    }

    pub fn push_header(&mut self, title: &str, subtitle: &str) -> RowId {
        self.items.push(ListItem::Header {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
        });
        RowId(self.items.len() - 1)
    }

    pub fn push_row(&mut self, status: RowStatus) -> RowId {
        let top = self.content_height();
        let layout = RowLayout::new(Rect::new(0.0, top, self.width, ROW_HEIGHT));
        self.items.push(ListItem::Row(Row::new(&self.config, status, layout)));
        RowId(self.items.len() - 1)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&(RowId, RowEvent)) + 'static) -> bool {
        self.events.subscribe(listener)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn content_height(&self) -> f64 {
        self.items.iter().map(ListItem::height).sum()
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        match self.items.get(id.0) {
            Some(ListItem::Row(row)) => Some(row),
            _ => None,
        }
    }

    pub fn row_mut(&mut self, id: RowId) -> Option<&mut Row> {
        match self.items.get_mut(id.0) {
            Some(ListItem::Row(row)) => Some(row),
            _ => None,
        }
    }

    pub fn item(&self, id: RowId) -> Option<&ListItem> {
        self.items.get(id.0)
    }

    pub fn status(&self, id: RowId) -> Option<RowStatus> {
        self.row(id).map(Row::status)
    }

    /// Appearance to draw; headers and unknown ids get the neutral one
    pub fn appearance(&self, id: RowId) -> RowAppearance {
        self.row(id)
            .map(|row| row.appearance().clone())
            .unwrap_or_else(RowAppearance::neutral)
    }

    /// Row under a window point
    pub fn row_at(&self, point: Point) -> Option<RowId> {
        self.items.iter().enumerate().find_map(|(index, item)| match item {
            ListItem::Row(row) if row.layout().background.contains(point) => Some(RowId(index)),
            _ => None,
        })
    }

    /// Route a pointer event to the row the touch started on
    pub fn handle(&mut self, event: GestureEvent) {
        if let GestureEvent::Began(point) = event {
            self.active = self.row_at(point);
            debug!(row = ?self.active, "Touch began");
        }
        let Some(id) = self.active else {
            return;
        };
        if matches!(event, GestureEvent::Ended(..) | GestureEvent::Cancelled) {
            self.active = None;
        }

        let events = match self.row_mut(id) {
            Some(row) => row.handle(event),
            None => Vec::new(),
        };
        self.dispatch(id, events);
    }

    /// Advance every row by one frame
    pub fn tick(&mut self, dt: Duration) {
        let mut pending = Vec::new();
        for (index, item) in self.items.iter_mut().enumerate() {
            if let ListItem::Row(row) = item {
                let events = row.tick(dt);
                if !events.is_empty() {
                    pending.push((RowId(index), events));
                }
            }
        }
        for (id, events) in pending {
            self.dispatch(id, events);
        }
    }

    pub fn is_idle(&self) -> bool {
        self.items.iter().all(|item| match item {
            ListItem::Row(row) => row.is_idle(),
            ListItem::Header { .. } => true,
        })
    }

    fn dispatch(&mut self, id: RowId, events: Vec<RowEvent>) {
        for event in events {
            if event == RowEvent::BackgroundActionTapped {
                self.toggle(id);
            }
            self.events.emit((id, event));
        }
    }

    /// Flip a row's enabled/selected flag and reconfigure it
    fn toggle(&mut self, id: RowId) {
        let theme = self.config.theme.clone();
        if let Some(row) = self.row_mut(id) {
            let status = row.status().toggled();
            row.configure(status, &theme);
            info!("Row {} is now {:?}", id.0, status);
        }
    }
}
