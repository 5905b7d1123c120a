//! Interaction controller: maps widget events to store actions and debounce calls.

use std::{sync::Arc, time::Duration};

use shared::{
    domain::{Flags, StatePatch, TransformState},
    error::FormError,
};
use tokio::sync::watch;
use tracing::{debug, trace};

use crate::{
    config::Settings,
    debounce::{DebouncedTrigger, Fired, FiredReceiver, DEFAULT_WINDOW},
    engine::TransformEngine,
    store::{Action, Store},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    PendingRecompute,
}

/// One per mounted widget. Owns the store and the single debounce timer.
///
/// Every method runs on the caller's thread. The timer only posts tokens,
/// which the owning event loop feeds back through [`Self::on_timer_fired`],
/// so timer-driven and user-driven recomputes are strictly serialised.
pub struct InteractionController<E> {
    store: Store<E>,
    trigger: DebouncedTrigger,
    fired_rx: FiredReceiver,
}

impl<E: TransformEngine> InteractionController<E> {
    pub fn new(engine: E) -> Self {
        Self::with_options(engine, DEFAULT_WINDOW, Flags::default())
    }

    pub fn from_settings(engine: E, settings: &Settings) -> Self {
        Self::with_options(engine, settings.debounce_window(), settings.initial_flags())
    }

    pub fn with_options(engine: E, window: Duration, flags: Flags) -> Self {
        let (trigger, fired_rx) = DebouncedTrigger::new(window);
        Self {
            store: Store::with_state(TransformState::with_flags(flags), engine),
            trigger,
            fired_rx,
        }
    }

    pub fn state(&self) -> Arc<TransformState> {
        self.store.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<TransformState>> {
        self.store.subscribe()
    }

    pub fn engine(&self) -> &E {
        self.store.engine()
    }

    pub fn phase(&self) -> Phase {
        if self.trigger.is_pending() {
            Phase::PendingRecompute
        } else {
            Phase::Idle
        }
    }

    pub fn on_input_change(&mut self, text: impl Into<String>) -> Result<bool, FormError> {
        self.update(StatePatch::input(text))
    }

    pub fn on_prepend_toggle(&mut self, value: bool) -> Result<bool, FormError> {
        self.update(StatePatch::prepend(value))
    }

    pub fn on_append_toggle(&mut self, value: bool) -> Result<bool, FormError> {
        self.update(StatePatch::append(value))
    }

    /// Explicit request: drops any pending debounced recompute and translates now.
    pub fn on_submit(&mut self) -> Result<bool, FormError> {
        if self.trigger.is_pending() {
            self.trigger.cancel();
            debug!("submit superseded pending recompute");
        }
        self.store.dispatch(Action::Translate)
    }

    /// Waits for the next timer token. Intended for the widget's event loop.
    pub async fn next_fired(&mut self) -> Option<Fired> {
        self.fired_rx.recv().await
    }

    /// Applies a timer token. Superseded tokens are dropped without recomputing.
    pub fn on_timer_fired(&mut self, fired: Fired) -> Result<bool, FormError> {
        if !self.trigger.accept(fired) {
            return Ok(false);
        }
        trace!(generation = fired.generation(), "debounce window elapsed");
        self.store.dispatch(Action::Translate)
    }

    /// Waits out the pending debounce window, if any, and applies it.
    ///
    /// When no running timer is left to deliver a token, the pending recompute
    /// is applied immediately instead of waiting on the channel.
    pub async fn settle(&mut self) -> Result<bool, FormError> {
        while self.trigger.is_pending() {
            if !self.trigger.has_live_timer() {
                // any token still queued for this window becomes stale
                self.trigger.cancel();
                return self.store.dispatch(Action::Translate);
            }
            let Some(fired) = self.fired_rx.recv().await else {
                break;
            };
            if self.trigger.accept(fired) {
                return self.store.dispatch(Action::Translate);
            }
        }
        Ok(false)
    }

    fn update(&mut self, patch: StatePatch) -> Result<bool, FormError> {
        let changed = self.store.dispatch(Action::Update(patch))?;
        if changed {
            self.trigger.schedule();
        }
        Ok(changed)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
