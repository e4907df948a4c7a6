#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for async communication in emx
//!
//! All runner progress flows through events - no direct logging or printing
//! happens outside the CLI. Events are grouped by functional domain
//! (environment lifecycle, command execution, general notices) and travel
//! over an unbounded tokio mpsc channel from the runner to the CLI's
//! event loop.

pub mod events;
pub use events::{AppEvent, CommandEvent, EnvEvent, GeneralEvent};

use tokio::sync::mpsc::UnboundedSender;

/// Type alias for event sender
pub type EventSender = UnboundedSender<AppEvent>;

/// Type alias for event receiver
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<AppEvent>;

/// Create a new event channel
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events throughout emx
///
/// Implementors only supply the sender; emission helpers are shared. A
/// missing sender (or a dropped receiver) silently discards events so the
/// runner never blocks on its observer.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        if let Some(sender) = self.event_sender() {
            let _ = sender.send(event);
        }
    }

    /// Emit a debug log event
    fn emit_debug(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::Debug {
            message: message.into(),
        }));
    }

    /// Emit a warning event
    fn emit_warning(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::Warning {
            message: message.into(),
        }));
    }
}

impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_delivers_events_in_order() {
        let (tx, mut rx) = channel();
        tx.emit_debug("first");
        tx.emit_warning("second");
        match rx.try_recv().unwrap() {
            AppEvent::General(GeneralEvent::Debug { message }) => assert_eq!(message, "first"),
            other => panic!("unexpected event: {other:?}"),
        }
        match rx.try_recv().unwrap() {
            AppEvent::General(GeneralEvent::Warning { message }) => assert_eq!(message, "second"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn emit_without_receiver_is_silent() {
        let (tx, rx) = channel();
        drop(rx);
        // must not panic
        tx.emit_debug("into the void");
    }
}
