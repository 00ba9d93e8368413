use thiserror::Error;

use crate::configuration::Configuration;
use crate::controls::{ControlLayout, ControlSurface, PanelEdited};
use crate::engine::{Engine, EngineError};
use crate::registry::SideEffectRegistry;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("side effect for {key} failed: {source}")]
    SideEffect {
        key: String,
        #[source]
        source: EngineError,
    },
    #[error("engine rejected configuration: {0}")]
    Sink(#[source] EngineError),
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Owner of the authoritative configuration.
///
/// Every panel report goes through [`ConfigurationMerger::on_panel_report`],
/// which runs to completion: merge, side effects, serialization to the
/// engine, and a re-render of every panel.
pub struct ConfigurationMerger<E, S> {
    authoritative: Configuration,
    layout: ControlLayout,
    registry: SideEffectRegistry,
    engine: E,
    surface: S,
}

impl<E: Engine, S: ControlSurface> ConfigurationMerger<E, S> {
    /// Start from the default configuration. Nothing is sent to the engine yet.
    pub fn new(layout: ControlLayout, registry: SideEffectRegistry, engine: E, surface: S) -> Self {
        Self {
            authoritative: Configuration::defaults(),
            layout,
            registry,
            engine,
            surface,
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.authoritative
    }

    pub fn layout(&self) -> &ControlLayout {
        &self.layout
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Redraw every panel against the authoritative configuration
    pub fn render_all(&mut self) {
        for panel in self.layout.panels() {
            self.surface.render(panel, &self.authoritative);
        }
    }

    /// Route a single-control edit through its owning panel.
    ///
    /// Returns `Ok(false)` when no panel owns `key`.
    pub fn edit(&mut self, key: &str, value: f64) -> Result<bool, DispatchError> {
        let report = match self.layout.owner_of(key) {
            Some(panel) => panel.edit(&self.authoritative, key, value),
            None => None,
        };
        match report {
            Some(report) => self.on_panel_report(report).map(|_| true),
            None => Ok(false),
        }
    }

    pub fn on_panel_report(&mut self, report: PanelEdited) -> Result<(), DispatchError> {
        log::debug!(
            "{} reported {} value(s)",
            report.group,
            report.state.len()
        );

        let merged = self.authoritative.merged_with(&report.state);

        // A report naming its control fires that control's side effect even
        // when the value is unchanged. Otherwise only keys whose value moved.
        let candidates: Vec<&String> = match &report.edited_key {
            Some(key) => report.state.get_key_value(key).map(|(k, _)| k).into_iter().collect(),
            None => report
                .state
                .iter()
                .filter(|(key, value)| self.authoritative.get(key) != Some(**value))
                .map(|(key, _)| key)
                .collect(),
        };
        for key in candidates {
            let value = report.state[key];
            self.registry
                .dispatch(key, value, &mut self.engine)
                .map_err(|source| DispatchError::SideEffect {
                    key: key.clone(),
                    source,
                })?;
        }

        self.authoritative = merged;

        let serialized = self.authoritative.to_json()?;
        self.engine
            .accept_configuration(&serialized)
            .map_err(DispatchError::Sink)?;

        self.render_all();
        Ok(())
    }
}
