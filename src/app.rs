use std::collections::VecDeque;
use std::io::Write;
use std::time::Instant;

use thiserror::Error;

use crate::config::STEP_RATE_LOG_INTERVAL;
use crate::controls::{Button, ConsoleSurface, ControlLayout, LayoutError, PanelEdited};
use crate::engine::EngineError;
use crate::merger::{ConfigurationMerger, DispatchError};
use crate::registry::SideEffectRegistry;
use crate::simulation::Simulation;

pub const REGENERATE_BUTTON: &str = "regenerate";
pub const STEP_BUTTON: &str = "step";

const HELP: &str = "\
Commands:
  set <key> <value>   Edit a setting
  press <button>      Trigger a button (regenerate, step)
  show                Redraw all panels
  help                Show this help
  quit                Exit";

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("not a number: {0}")]
    InvalidNumber(String),
}

/// One line of operator input
#[derive(Debug, PartialEq)]
pub enum Command {
    Set { key: String, value: f64 },
    Press(String),
    Show,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Empty);
        };

        match verb {
            "set" => {
                let key = words.next().ok_or(CommandError::MissingArgument("key"))?;
                let raw = words.next().ok_or(CommandError::MissingArgument("value"))?;
                let value = raw
                    .parse::<f64>()
                    .map_err(|_| CommandError::InvalidNumber(raw.to_string()))?;
                Ok(Command::Set {
                    key: key.to_string(),
                    value,
                })
            }
            "press" => {
                let id = words.next().ok_or(CommandError::MissingArgument("button"))?;
                Ok(Command::Press(id.to_string()))
            }
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Operator console wired to the headless simulation.
///
/// Input lines become panel reports queued in arrival order; the queue is
/// drained one report at a time between simulation steps.
pub struct App<W: Write> {
    merger: ConfigurationMerger<Simulation, ConsoleSurface<W>>,
    pending: VecDeque<PanelEdited>,
    step_rate: StepRateCounter,
}

impl<W: Write> App<W> {
    pub fn new(out: W) -> Result<Self, AppError> {
        Self::with_simulation(Simulation::new()?, out)
    }

    pub fn with_simulation(simulation: Simulation, out: W) -> Result<Self, AppError> {
        let buttons = vec![
            Button::new(REGENERATE_BUTTON, "Regenerate world"),
            Button::new(STEP_BUTTON, "Single step"),
        ];
        let layout = ControlLayout::standard(buttons)?;
        let merger = ConfigurationMerger::new(
            layout,
            SideEffectRegistry::standard(),
            simulation,
            ConsoleSurface::new(out),
        );

        Ok(Self {
            merger,
            pending: VecDeque::new(),
            step_rate: StepRateCounter::new(),
        })
    }

    pub fn merger(&self) -> &ConfigurationMerger<Simulation, ConsoleSurface<W>> {
        &self.merger
    }

    pub fn simulation(&self) -> &Simulation {
        self.merger.engine()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn render_panels(&mut self) {
        self.merger.render_all();
    }

    /// Handle one line of input. Returns false once the operator quits.
    pub fn handle_line(&mut self, line: &str) -> bool {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(CommandError::Empty) => return true,
            Err(e) => {
                log::warn!("{} (type 'help' for commands)", e);
                return true;
            }
        };

        match command {
            Command::Set { key, value } => self.queue_edit(&key, value),
            Command::Press(id) => self.press(&id),
            Command::Show => self.merger.render_all(),
            Command::Help => log::info!("\n{}", HELP),
            Command::Quit => {
                log::info!("Quit requested, exiting...");
                return false;
            }
        }
        true
    }

    /// Constrain the value the way the slider would and queue the panel's report
    fn queue_edit(&mut self, key: &str, value: f64) {
        let displayed = self.merger.configuration();
        let Some(panel) = self.merger.layout().owner_of(key) else {
            log::warn!("Unknown setting: {}", key);
            return;
        };
        let value = match panel.setting(key) {
            Some(setting) => setting.constrain(value),
            None => value,
        };
        if let Some(report) = panel.edit(displayed, key, value) {
            self.pending.push_back(report);
        }
    }

    fn press(&mut self, id: &str) {
        if self.merger.layout().find_button(id).is_none() {
            log::warn!("Unknown button: {}", id);
            return;
        }
        let simulation = self.merger.engine_mut();
        match id {
            REGENERATE_BUTTON => simulation.regenerate(),
            STEP_BUTTON => simulation.step(),
            _ => log::warn!("Button {} has no action", id),
        }
    }

    /// Apply queued reports in arrival order, each to completion.
    ///
    /// Stops at the first engine fault, logging it before handing it back.
    pub fn process_pending(&mut self) -> Result<(), DispatchError> {
        while let Some(report) = self.pending.pop_front() {
            if let Err(e) = self.merger.on_panel_report(report) {
                log::error!("Engine fault: {}", e);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Run due simulation steps and log the step rate periodically
    pub fn update(&mut self, now: Instant) {
        let steps = self.merger.engine_mut().advance(now);
        if let Some(rate) = self.step_rate.tick(steps) {
            let grid = self.merger.engine().grid();
            log::info!(
                "{:.0} steps/s, {} food collected, {} food left",
                rate,
                grid.food_collected(),
                grid.food_remaining()
            );
        }
    }
}

/// Steps-per-second counter
struct StepRateCounter {
    last_update: Instant,
    step_count: u32,
}

impl StepRateCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            step_count: 0,
        }
    }

    /// Count `steps`, returns Some(rate) once per log interval
    fn tick(&mut self, steps: u32) -> Option<f64> {
        self.step_count += steps;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= STEP_RATE_LOG_INTERVAL {
            let rate = self.step_count as f64 / elapsed.as_secs_f64();
            self.step_count = 0;
            self.last_update = Instant::now();
            Some(rate)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FOOD_PATCH_COUNT, SCALE_FACTOR, SIMULATION_TICK_DELAY};
    use crate::configuration::LocalState;
    use crate::controls::PanelId;
    use std::time::Duration;

    fn app() -> App<Vec<u8>> {
        App::with_simulation(Simulation::with_seed(11).unwrap(), Vec::new()).unwrap()
    }

    fn output(app: &App<Vec<u8>>) -> String {
        String::from_utf8(app.merger().surface().get_ref().clone()).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("set scale_factor 7.5"),
            Ok(Command::Set {
                key: "scale_factor".to_string(),
                value: 7.5
            })
        );
        assert_eq!(Command::parse("  press step "), Ok(Command::Press("step".to_string())));
        assert_eq!(Command::parse(""), Err(CommandError::Empty));
        assert_eq!(Command::parse("set"), Err(CommandError::MissingArgument("key")));
        assert_eq!(
            Command::parse("set scale_factor big"),
            Err(CommandError::InvalidNumber("big".to_string()))
        );
        assert_eq!(Command::parse("jump"), Err(CommandError::Unknown("jump".to_string())));
    }

    #[test]
    fn test_edits_are_queued_until_processed() {
        let mut app = app();
        assert!(app.handle_line("set food_patch_count 100"));
        assert_eq!(app.pending(), 1);
        assert_eq!(app.merger().configuration().get(FOOD_PATCH_COUNT), Some(27.0));

        app.process_pending().unwrap();
        assert_eq!(app.pending(), 0);
        assert_eq!(app.merger().configuration().get(FOOD_PATCH_COUNT), Some(100.0));
        assert_eq!(app.simulation().conf().food_patch_count, 100);
    }

    #[test]
    fn test_values_are_constrained_to_range() {
        let mut app = app();
        app.handle_line("set scale_factor 99");
        app.process_pending().unwrap();

        assert_eq!(app.merger().configuration().get(SCALE_FACTOR), Some(20.0));
        assert_eq!(app.simulation().canvas().scale(), 20.0);
    }

    #[test]
    fn test_tick_delay_edit_restarts_loop() {
        let mut app = app();
        app.handle_line("set simulation_tick_delay 1000");
        app.process_pending().unwrap();

        let delay = app.merger().configuration().get(SIMULATION_TICK_DELAY).unwrap();
        assert!((delay - 1000.0).abs() < 1e-6);
        assert!(app.simulation().ticks().is_running());
        assert!(app.simulation().ticks().delay() > Duration::from_millis(900));
    }

    #[test]
    fn test_unknown_input_is_ignored() {
        let mut app = app();
        assert!(app.handle_line("set no_such_key 1"));
        assert!(app.handle_line("press nothing"));
        assert!(app.handle_line("dance"));
        assert_eq!(app.pending(), 0);
        assert!(!app.handle_line("quit"));
    }

    #[test]
    fn test_engine_fault_stops_processing() {
        let mut app = app();
        let mut bad = LocalState::new();
        bad.insert(SCALE_FACTOR.to_string(), -1.0);
        app.pending.push_back(PanelEdited::new(PanelId::SimulationControls, bad));
        app.handle_line("set food_patch_count 100");

        let err = app.process_pending().unwrap_err();
        assert!(matches!(
            err,
            DispatchError::SideEffect { source: EngineError::InvalidScale(_), .. }
        ));
        assert_eq!(app.merger().configuration().get(SCALE_FACTOR), Some(3.0));
        // The report behind the faulty one is still queued
        assert_eq!(app.pending(), 1);
    }

    #[test]
    fn test_step_button_advances_simulation() {
        let mut app = app();
        app.handle_line("press step");
        assert_eq!(app.simulation().steps(), 1);
    }

    #[test]
    fn test_report_rerenders_all_panels() {
        let mut app = app();
        app.handle_line("set wander_transition_chance_percent 10");
        app.process_pending().unwrap();

        let text = output(&app);
        assert!(text.contains("== Simulation Controls =="));
        assert!(text.contains("== World Generation =="));
        assert!(text.contains("== Ant Behavior =="));
        assert!(text.contains("[regenerate] Regenerate world"));
    }
}
