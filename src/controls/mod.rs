mod console;
mod descriptor;
mod panel;

use thiserror::Error;

use crate::configuration::Configuration;

pub use console::ConsoleSurface;
pub use descriptor::{
    ControlKind, Range, Scale, SettingDescriptor, Step, ANT_BEHAVIOR_SETTINGS,
    SIMULATION_SETTINGS, WORLD_GENERATION_SETTINGS,
};
pub use panel::{Button, Control, PanelEdited, PanelGroup, PanelId, Placement};

/// Rendering collaborator: draws a panel against the current configuration
pub trait ControlSurface {
    fn render(&mut self, panel: &PanelGroup, state: &Configuration);
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("setting {key} is claimed by both {first} and {second}")]
    DuplicateKey {
        key: String,
        first: PanelId,
        second: PanelId,
    },
}

/// The ordered set of panel groups shown to the operator.
///
/// Each setting key belongs to at most one panel; this is checked when the
/// layout is assembled.
#[derive(Clone, Debug)]
pub struct ControlLayout {
    panels: Vec<PanelGroup>,
}

impl ControlLayout {
    pub fn new(panels: Vec<PanelGroup>) -> Result<Self, LayoutError> {
        for (i, panel) in panels.iter().enumerate() {
            for earlier in &panels[..i] {
                if let Some(key) = panel.keys().find(|key| earlier.owns(key)) {
                    return Err(LayoutError::DuplicateKey {
                        key: key.to_string(),
                        first: earlier.id(),
                        second: panel.id(),
                    });
                }
            }
        }
        Ok(Self { panels })
    }

    /// Simulation controls, world generation and ant behavior, in that order
    pub fn standard(buttons: Vec<Button>) -> Result<Self, LayoutError> {
        Self::new(vec![
            PanelGroup::simulation_controls(buttons),
            PanelGroup::world_generation(),
            PanelGroup::ant_behavior(),
        ])
    }

    pub fn panels(&self) -> &[PanelGroup] {
        &self.panels
    }

    pub fn panel(&self, id: PanelId) -> Option<&PanelGroup> {
        self.panels.iter().find(|p| p.id() == id)
    }

    pub fn owner_of(&self, key: &str) -> Option<&PanelGroup> {
        self.panels.iter().find(|p| p.owns(key))
    }

    pub fn find_button(&self, id: &str) -> Option<(&PanelGroup, &Button)> {
        self.panels
            .iter()
            .find_map(|panel| panel.button(id).map(|button| (panel, button)))
    }
}
