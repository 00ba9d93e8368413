mod canvas;
mod cell;
mod grid;
mod tick;
mod user_conf;

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{
    DEFAULT_SCALE_FACTOR, DEFAULT_TICK_DELAY, WORLD_HEIGHT, WORLD_SEED, WORLD_WIDTH,
};
use crate::engine::{Engine, EngineError};

pub use canvas::Canvas;
pub use cell::Cell;
pub use grid::{Ant, Grid};
pub use tick::TickLoop;
pub use user_conf::UserConf;

/// Headless ant colony driven by the control layer
pub struct Simulation {
    conf: UserConf,
    ticks: TickLoop,
    grid: Grid,
    canvas: Canvas,
    rng: StdRng,
    steps: u64,
    steps_since_decay: u64,
}

impl Simulation {
    /// Generate the world from the default configuration and start the tick loop
    pub fn new() -> Result<Self, EngineError> {
        Self::with_seed(WORLD_SEED)
    }

    pub fn with_seed(seed: u64) -> Result<Self, EngineError> {
        let conf = UserConf::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = Grid::generate(WORLD_WIDTH, WORLD_HEIGHT, &conf, &mut rng);
        let canvas = Canvas::new(WORLD_WIDTH, WORLD_HEIGHT, DEFAULT_SCALE_FACTOR)?;

        let mut ticks = TickLoop::new();
        ticks.resume(DEFAULT_TICK_DELAY, Instant::now())?;

        log::info!(
            "World {}x{} generated: {} food units, {} barrier cells",
            WORLD_WIDTH,
            WORLD_HEIGHT,
            grid.food_remaining(),
            grid.count_cells(|c| c == Cell::Barrier)
        );

        Ok(Self {
            conf,
            ticks,
            grid,
            canvas,
            rng,
            steps: 0,
            steps_since_decay: 0,
        })
    }

    pub fn conf(&self) -> &UserConf {
        &self.conf
    }

    pub fn ticks(&self) -> &TickLoop {
        &self.ticks
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Run every step due at `now`, returning how many ran
    pub fn advance(&mut self, now: Instant) -> u32 {
        let due = self.ticks.advance(now);
        for _ in 0..due {
            self.step();
        }
        due
    }

    /// One simulation step, using the active configuration
    pub fn step(&mut self) {
        self.grid.step(&self.conf, &mut self.rng);
        self.steps += 1;
        self.steps_since_decay += 1;

        let interval = self.conf.pheremone_decay_interval.max(1.0) as u64;
        if self.steps_since_decay >= interval {
            self.grid.decay_pheromones(self.conf.pheremone_decay_multiplier);
            self.steps_since_decay = 0;
        }
    }

    /// Rebuild the world from the active world-generation settings
    pub fn regenerate(&mut self) {
        self.grid = Grid::generate(WORLD_WIDTH, WORLD_HEIGHT, &self.conf, &mut self.rng);
        self.steps_since_decay = 0;
        log::info!(
            "World regenerated: {} food units, {} barrier cells",
            self.grid.food_remaining(),
            self.grid.count_cells(|c| c == Cell::Barrier)
        );
    }

    /// Paint the current world onto the canvas.
    ///
    /// The console host never paints; an embedder that displays frames calls
    /// this when it wants one.
    pub fn render(&mut self) -> &Canvas {
        self.canvas.render(&self.grid);
        &self.canvas
    }
}

impl Engine for Simulation {
    fn pause(&mut self) {
        self.ticks.pause();
        log::debug!("Tick loop paused");
    }

    fn resume(&mut self, delay: f64) -> Result<(), EngineError> {
        self.ticks.resume(delay, Instant::now())?;
        log::debug!("Tick loop resumed, {} ms per step", delay);
        Ok(())
    }

    fn set_render_scale(&mut self, factor: f64) -> Result<(), EngineError> {
        if self.canvas.set_scale(factor)? {
            log::info!(
                "Render scale {}: canvas {}x{}",
                factor,
                self.canvas.width(),
                self.canvas.height()
            );
        }
        Ok(())
    }

    fn accept_configuration(&mut self, serialized: &str) -> Result<(), EngineError> {
        self.conf = UserConf::from_json(serialized)?;
        log::debug!("Configuration accepted: {:?}", self.conf);
        Ok(())
    }
}
