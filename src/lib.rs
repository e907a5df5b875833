//! Flick Sheet - touch gesture controllers for bottom panels and list rows
//!
//! Features:
//! - Drag-to-dismiss bottom panel with backdrop dimming and elastic overscroll
//! - Swipe-to-reveal rows with a tappable background action
//! - Press feedback on rows
//! - Frame-clock driven animations, no threads

pub mod animation;
pub mod config;
pub mod demo;
pub mod error;
pub mod host;
pub mod input;
pub mod notify;
pub mod panel;
pub mod swipe;
pub mod ui;

pub use config::SheetConfig;
pub use error::{Error, Result};
pub use host::ContentHeightProvider;
pub use panel::{PanelEvent, PanelGestureController, PanelId, PanelRegistry};
pub use swipe::{Row, RowEvent, RowId, RowList, SwipeRevealController};
