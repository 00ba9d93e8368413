//! Live tuning surface for a running ant colony simulation.
//!
//! Panel groups report their full state on every edit. The
//! [`ConfigurationMerger`] folds each report into one authoritative
//! [`Configuration`], fires the engine calls registered for the edited
//! keys, and hands the serialized result to the engine.

pub mod app;
pub mod config;
pub mod configuration;
pub mod controls;
pub mod engine;
pub mod merger;
pub mod registry;
pub mod simulation;

pub use configuration::{Configuration, LocalState};
pub use controls::{ControlLayout, ControlSurface, PanelEdited, PanelGroup, PanelId};
pub use engine::{Engine, EngineError};
pub use merger::{ConfigurationMerger, DispatchError};
pub use registry::SideEffectRegistry;
