use std::fmt;

use crate::configuration::{Configuration, LocalState};
use crate::controls::descriptor::{
    SettingDescriptor, ANT_BEHAVIOR_SETTINGS, SIMULATION_SETTINGS, WORLD_GENERATION_SETTINGS,
};

/// Width shared by every panel, in pixels
const PANEL_WIDTH: u32 = 550;

/// Identifies one of the panel groups
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelId {
    SimulationControls,
    WorldGeneration,
    AntBehavior,
}

impl PanelId {
    pub fn title(self) -> &'static str {
        match self {
            PanelId::SimulationControls => "Simulation Controls",
            PanelId::WorldGeneration => "World Generation",
            PanelId::AntBehavior => "Ant Behavior",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Screen placement of a panel, anchored to the top-right corner
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub top: u32,
    pub width: u32,
}

/// Action trigger injected by the embedding application
#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    pub id: String,
    pub label: String,
}

impl Button {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// One rendered control, in display order
#[derive(Clone, Copy, Debug)]
pub enum Control<'a> {
    Button(&'a Button),
    Setting(&'a SettingDescriptor),
}

/// Full local state reported by a panel group after an edit
#[derive(Clone, Debug, PartialEq)]
pub struct PanelEdited {
    pub group: PanelId,
    /// The control that triggered the report, when known
    pub edited_key: Option<String>,
    pub state: LocalState,
}

impl PanelEdited {
    /// Report without an originating control
    pub fn new(group: PanelId, state: LocalState) -> Self {
        Self {
            group,
            edited_key: None,
            state,
        }
    }
}

/// A titled cluster of controls over a subset of the setting keys.
///
/// Holds no values of its own: every render and every edit works against
/// the configuration it is handed.
#[derive(Clone, Debug)]
pub struct PanelGroup {
    id: PanelId,
    placement: Placement,
    buttons: Vec<Button>,
    settings: Vec<SettingDescriptor>,
}

impl PanelGroup {
    pub fn new(id: PanelId, placement: Placement, settings: &[SettingDescriptor]) -> Self {
        let mut settings = settings.to_vec();
        // Stable sort keeps declaration order for descriptors without an override
        let declared: Vec<&'static str> = settings.iter().map(|s| s.key).collect();
        settings.sort_by_key(|s| {
            s.position
                .unwrap_or_else(|| declared.iter().position(|k| *k == s.key).unwrap_or(0))
        });

        Self {
            id,
            placement,
            buttons: Vec::new(),
            settings,
        }
    }

    /// Simulation controls, with caller-supplied buttons rendered first
    pub fn simulation_controls(buttons: Vec<Button>) -> Self {
        let mut panel = Self::new(
            PanelId::SimulationControls,
            Placement { top: 0, width: PANEL_WIDTH },
            &SIMULATION_SETTINGS,
        );
        panel.buttons = buttons;
        panel
    }

    pub fn world_generation() -> Self {
        Self::new(
            PanelId::WorldGeneration,
            Placement { top: 240, width: PANEL_WIDTH },
            &WORLD_GENERATION_SETTINGS,
        )
    }

    pub fn ant_behavior() -> Self {
        Self::new(
            PanelId::AntBehavior,
            Placement { top: 423, width: PANEL_WIDTH },
            &ANT_BEHAVIOR_SETTINGS,
        )
    }

    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn title(&self) -> &'static str {
        self.id.title()
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.settings.iter().map(|s| s.key)
    }

    pub fn setting(&self, key: &str) -> Option<&SettingDescriptor> {
        self.settings.iter().find(|s| s.key == key)
    }

    pub fn owns(&self, key: &str) -> bool {
        self.setting(key).is_some()
    }

    pub fn button(&self, id: &str) -> Option<&Button> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Controls in display order: injected buttons, then settings
    pub fn controls(&self) -> impl Iterator<Item = Control<'_>> {
        self.buttons
            .iter()
            .map(Control::Button)
            .chain(self.settings.iter().map(Control::Setting))
    }

    /// Values this panel displays, read from the full configuration
    pub fn local_state(&self, displayed: &Configuration) -> LocalState {
        displayed.project(self.keys())
    }

    /// Apply a single-control edit and produce the full local state.
    ///
    /// Returns `None` when the key belongs to another panel.
    pub fn edit(&self, displayed: &Configuration, key: &str, value: f64) -> Option<PanelEdited> {
        let descriptor = self.setting(key)?;
        let mut state = self.local_state(displayed);
        state.insert(descriptor.key.to_string(), value);

        Some(PanelEdited {
            group: self.id,
            edited_key: Some(descriptor.key.to_string()),
            state,
        })
    }
}
