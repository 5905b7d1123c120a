//! Interaction and state orchestration for a live text-transformation form.
//!
//! A [`store::Store`] applies actions through a pure reducer, a
//! [`debounce::DebouncedTrigger`] coalesces bursts of edits into one recompute,
//! and an [`controller::InteractionController`] binds widget events to both.
//! The transformation itself is injected through [`engine::TransformEngine`].

pub mod config;
pub mod controller;
pub mod debounce;
pub mod engine;
pub mod store;

pub use config::{load_settings, load_settings_from, Settings};
pub use controller::{InteractionController, Phase};
pub use debounce::{DebouncedTrigger, Fired, DEFAULT_WINDOW};
pub use engine::{AffixEngine, FnEngine, PassthroughEngine, TransformEngine};
pub use store::{reduce, Action, Reduction, Store};
