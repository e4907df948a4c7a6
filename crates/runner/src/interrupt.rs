//! Run-wide interruption signal
//!
//! A single watch shared by the whole run. The CLI triggers it from its
//! one Ctrl-C listener; the runner polls it while commands execute and
//! checks it between commands and environments, so an interrupt is never
//! dropped no matter when it arrives.

use tokio::sync::watch;

/// Cloneable interruption flag backed by a watch channel.
#[derive(Clone)]
pub struct Interrupt {
    sender: watch::Sender<bool>,
}

impl Interrupt {
    /// Create an untriggered flag.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sender: watch::channel(false).0,
        }
    }

    /// Mark the run as interrupted, waking every waiter. Idempotent.
    pub fn trigger(&self) {
        let _ = self.sender.send(true);
    }

    /// Whether the run has been interrupted.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolve once the flag is triggered; resolves immediately when it
    /// already is.
    pub async fn triggered(&self) {
        let mut receiver = self.sender.subscribe();
        // the sender lives in self, so wait_for cannot observe a closed
        // channel while this future is alive
        let _ = receiver.wait_for(|triggered| *triggered).await;
    }
}

impl Default for Interrupt {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trigger_resolves_current_and_future_waiters() {
        let interrupt = Interrupt::new();
        assert!(!interrupt.is_triggered());

        let waiter = {
            let interrupt = interrupt.clone();
            tokio::spawn(async move { interrupt.triggered().await })
        };
        interrupt.trigger();
        waiter.await.unwrap();

        assert!(interrupt.is_triggered());
        // already-triggered flag resolves immediately
        interrupt.triggered().await;
    }
}
