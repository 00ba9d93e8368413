use std::io::Write;

use crate::configuration::Configuration;
use crate::controls::{Control, ControlKind, ControlSurface, PanelGroup, Scale};

/// Text rendering of panel groups for a terminal operator
pub struct ConsoleSurface<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn write_panel(&mut self, panel: &PanelGroup, state: &Configuration) -> std::io::Result<()> {
        writeln!(self.out, "== {} ==", panel.title())?;
        for control in panel.controls() {
            match control {
                Control::Button(button) => {
                    writeln!(self.out, "  [{}] {}", button.id, button.label)?
                }
                Control::Setting(setting) => {
                    let value = state.get(setting.key).unwrap_or(f64::NAN);
                    match setting.kind {
                        ControlKind::Range(range) => {
                            let scale = match range.scale {
                                Scale::Linear => "",
                                Scale::Log => " log",
                            };
                            writeln!(
                                self.out,
                                "  {:<34} {:>10}   ({} to {}{})",
                                setting.label, value, range.min, range.max, scale
                            )?;
                        }
                    }
                }
            }
        }
        self.out.flush()
    }
}

impl<W: Write> ControlSurface for ConsoleSurface<W> {
    fn render(&mut self, panel: &PanelGroup, state: &Configuration) {
        if let Err(e) = self.write_panel(panel, state) {
            log::warn!("Failed to render {}: {}", panel.title(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::Button;

    #[test]
    fn test_renders_title_buttons_and_values() {
        let mut surface = ConsoleSurface::new(Vec::new());
        let panel = PanelGroup::simulation_controls(vec![Button::new("step", "Step once")]);
        surface.render(&panel, &Configuration::defaults());

        let text = String::from_utf8(surface.get_ref().clone()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "== Simulation Controls ==");
        assert_eq!(lines[1], "  [step] Step once");
        assert!(lines[2].starts_with("  simulation_tick_delay"));
        assert!(lines[2].contains("log"));
        assert!(lines[3].contains(" 3 "));
        assert_eq!(lines.len(), 6);
    }
}
