//! Reducer-driven state store for a single form widget.

use std::sync::Arc;

use shared::{
    domain::{StatePatch, TransformState},
    error::{EngineError, FormError},
};
use tokio::sync::watch;
use tracing::{debug, trace, warn};

use crate::engine::TransformEngine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Shallow-merge input text and/or flags. Never touches `output`.
    Update(StatePatch),
    /// Recompute `output` from the current input and flags.
    Translate,
    /// Set the input and recompute in one step. Kept for callers that do not debounce.
    InputTranslate(String),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Update(_) => "update",
            Self::Translate => "translate",
            Self::InputTranslate(_) => "input_translate",
        }
    }
}

#[derive(Debug)]
pub enum Reduction {
    /// Nothing observable changed. The caller keeps its existing `Arc`.
    Unchanged,
    Changed(Arc<TransformState>),
    /// The engine failed. The state is untouched.
    Faulted(EngineError),
}

/// Pure reducer. Engine faults come back as [`Reduction::Faulted`], so this never fails.
pub fn reduce<E>(state: &Arc<TransformState>, action: Action, engine: &E) -> Reduction
where
    E: TransformEngine + ?Sized,
{
    match action {
        Action::Update(patch) => {
            if patch.is_noop_for(state) {
                return Reduction::Unchanged;
            }
            let mut next = TransformState::clone(state);
            patch.apply_to(&mut next);
            Reduction::Changed(Arc::new(next))
        }
        Action::Translate => match compute_output(&state.input, state, engine) {
            Err(err) => Reduction::Faulted(err),
            Ok(output) if output == state.output => Reduction::Unchanged,
            Ok(output) => Reduction::Changed(Arc::new(TransformState {
                output,
                ..TransformState::clone(state)
            })),
        },
        Action::InputTranslate(text) => {
            if text == state.input {
                return Reduction::Unchanged;
            }
            match compute_output(&text, state, engine) {
                Err(err) => Reduction::Faulted(err),
                Ok(output) => Reduction::Changed(Arc::new(TransformState {
                    input: text,
                    output,
                    prepend: state.prepend,
                    append: state.append,
                })),
            }
        }
    }
}

// Empty input never reaches the engine.
fn compute_output<E>(input: &str, state: &TransformState, engine: &E) -> Result<String, EngineError>
where
    E: TransformEngine + ?Sized,
{
    if input.is_empty() {
        return Ok(String::new());
    }
    engine.transform(input, state.flags())
}

/// Owns the current state and the engine, and publishes every new state to subscribers.
pub struct Store<E> {
    state: Arc<TransformState>,
    engine: E,
    publisher: watch::Sender<Arc<TransformState>>,
}

impl<E: TransformEngine> Store<E> {
    pub fn new(engine: E) -> Self {
        Self::with_state(TransformState::default(), engine)
    }

    pub fn with_state(initial: TransformState, engine: E) -> Self {
        let state = Arc::new(initial);
        let (publisher, _) = watch::channel(Arc::clone(&state));
        Self {
            state,
            engine,
            publisher,
        }
    }

    pub fn state(&self) -> Arc<TransformState> {
        Arc::clone(&self.state)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Receives each state that differs from its predecessor.
    pub fn subscribe(&self) -> watch::Receiver<Arc<TransformState>> {
        self.publisher.subscribe()
    }

    /// Applies `action`. Returns whether the state changed.
    pub fn dispatch(&mut self, action: Action) -> Result<bool, FormError> {
        let name = action.name();
        match reduce(&self.state, action, &self.engine) {
            Reduction::Unchanged => {
                trace!(action = name, "state unchanged");
                Ok(false)
            }
            Reduction::Changed(next) => {
                debug!(
                    action = name,
                    input_len = next.input.len(),
                    prepend = next.prepend,
                    append = next.append,
                    "state updated"
                );
                self.state = Arc::clone(&next);
                self.publisher.send_replace(next);
                Ok(true)
            }
            Reduction::Faulted(err) => {
                warn!(action = name, error = %err, "transformation engine fault; keeping previous output");
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
