//! Single-listener notification slot
//!
//! Panels and row lists report what happened through a `Notifier`. There is
//! at most one listener; subscribing again replaces the previous one.

use std::fmt;

/// Holds the one registered listener for events of type `E`
pub struct Notifier<E> {
    listener: Option<Box<dyn FnMut(&E)>>,
}

impl<E> Default for Notifier<E> {
    fn default() -> Self {
        Self { listener: None }
    }
}

impl<E> fmt::Debug for Notifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribed", &self.listener.is_some())
            .finish()
    }
}

impl<E> Notifier<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the listener, returns true if one was replaced
    pub fn subscribe(&mut self, listener: impl FnMut(&E) + 'static) -> bool {
        self.listener.replace(Box::new(listener)).is_some()
    }

    pub fn is_subscribed(&self) -> bool {
        self.listener.is_some()
    }

    /// Deliver an event; without a listener this is a no-op
    pub fn emit(&mut self, event: E) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&event);
        }
    }
}
