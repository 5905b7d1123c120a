//! Cancelable debounce timer.
//!
//! The trigger never runs the recompute itself. When the quiet window elapses it
//! posts a [`Fired`] token on a channel, and the owner decides on its own event
//! loop whether the token is still current via [`DebouncedTrigger::accept`].
//! That keeps every state transition on the owner's thread.

use std::time::Duration;

use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tracing::{debug, trace, warn};

pub const DEFAULT_WINDOW: Duration = Duration::from_millis(200);

/// Token posted when a debounce window elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    generation: u64,
}

impl Fired {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

pub type FiredReceiver = UnboundedReceiver<Fired>;

struct PendingTimer {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

pub struct DebouncedTrigger {
    window: Duration,
    tx: UnboundedSender<Fired>,
    generation: u64,
    pending: Option<PendingTimer>,
}

impl DebouncedTrigger {
    pub fn new(window: Duration) -> (Self, FiredReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let trigger = Self {
            window,
            tx,
            generation: 0,
            pending: None,
        };
        (trigger, rx)
    }

    /// Starts a fresh quiet window, discarding any window already running.
    pub fn schedule(&mut self) {
        self.abort_pending();

        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;

        // only spawn the timer if we are inside a runtime; without one the
        // window is resolved by an explicit submit or by settling
        let task = if tokio::runtime::Handle::try_current().is_ok() {
            let tx = self.tx.clone();
            let window = self.window;
            Some(tokio::spawn(async move {
                tokio::time::sleep(window).await;
                // receiver gone means the widget was dropped
                let _ = tx.send(Fired { generation });
            }))
        } else {
            warn!(generation, "no tokio runtime; debounce timer will not fire");
            None
        };

        self.pending = Some(PendingTimer { generation, task });
        debug!(generation, window = ?self.window, "recompute scheduled");
    }

    /// Discards the pending window without firing. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.abort_pending();
        if cancelled {
            debug!(generation = self.generation, "pending recompute cancelled");
        }
        cancelled
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// True while a timer task for the pending window is still running and will
    /// post its token. False when nothing is pending, when the window was
    /// scheduled outside a runtime, or when the task already finished (its token
    /// was posted, or its runtime shut down).
    pub fn has_live_timer(&self) -> bool {
        self.pending
            .as_ref()
            .and_then(|pending| pending.task.as_ref())
            .is_some_and(|task| !task.is_finished())
    }

    /// Consumes a fired token. Only the token of the currently pending window is
    /// accepted; anything older was superseded after it was posted.
    pub fn accept(&mut self, fired: Fired) -> bool {
        match &self.pending {
            Some(pending) if pending.generation == fired.generation => {
                self.pending = None;
                true
            }
            _ => {
                trace!(
                    generation = fired.generation,
                    current = self.generation,
                    "ignoring stale debounce token"
                );
                false
            }
        }
    }

    fn abort_pending(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        if let Some(task) = pending.task {
            task.abort();
        }
        true
    }
}

impl Drop for DebouncedTrigger {
    fn drop(&mut self) {
        self.abort_pending();
    }
}

#[cfg(test)]
#[path = "tests/debounce_tests.rs"]
mod tests;
