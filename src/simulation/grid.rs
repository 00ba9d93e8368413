use rand::Rng;

use crate::config::{ANT_COUNT, NEST_RADIUS, PHEROMONE_DEPOSIT};
use crate::simulation::cell::Cell;
use crate::simulation::UserConf;

/// Pheromone below this level is cleared on decay
const PHEROMONE_FLOOR: f32 = 1e-3;

/// Unit moves for the eight compass headings, clockwise from east
const HEADINGS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ant {
    pub x: i32,
    pub y: i32,
    /// Index into the eight compass headings
    pub heading: usize,
    pub carrying: bool,
}

/// World grid: terrain, pheromone field and the colony
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    pheromones: Vec<f32>,
    ants: Vec<Ant>,
    food_collected: u64,
}

impl Grid {
    /// An empty world with no ants
    pub fn empty(width: u32, height: u32) -> Self {
        let cell_count = (width * height) as usize;
        Self {
            width,
            height,
            cells: vec![Cell::Empty; cell_count],
            pheromones: vec![0.0; cell_count],
            ants: Vec::new(),
            food_collected: 0,
        }
    }

    /// Generate barriers, food patches and the colony from `conf`
    pub fn generate<R: Rng>(width: u32, height: u32, conf: &UserConf, rng: &mut R) -> Self {
        let mut grid = Self::empty(width, height);
        if width == 0 || height == 0 {
            return grid;
        }

        for _ in 0..conf.barrier_patch_count {
            let start = grid.random_point(rng);
            grid.grow_blob(start, conf.barrier_patch_size, Cell::Barrier, rng);
        }

        let capacity = conf.food_patch_capacity.min(u32::MAX as usize) as u32;
        if capacity > 0 {
            let low = conf.food_patch_size.saturating_sub(conf.food_patch_size_variance);
            let high = conf.food_patch_size.saturating_add(conf.food_patch_size_variance);
            for _ in 0..conf.food_patch_count {
                let start = grid.random_point(rng);
                let size = rng.gen_range(low..=high);
                grid.grow_blob(start, size, Cell::Food(capacity), rng);
            }
        }

        let (nest_x, nest_y) = grid.nest();
        grid.ants = (0..ANT_COUNT)
            .map(|_| Ant {
                x: nest_x,
                y: nest_y,
                heading: rng.gen_range(0..HEADINGS.len()),
                carrying: false,
            })
            .collect();

        grid
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn nest(&self) -> (i32, i32) {
        (self.width as i32 / 2, self.height as i32 / 2)
    }

    pub fn in_nest(&self, x: i32, y: i32) -> bool {
        let (nest_x, nest_y) = self.nest();
        let (dx, dy) = (x - nest_x, y - nest_y);
        dx * dx + dy * dy <= NEST_RADIUS * NEST_RADIUS
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn pheromone(&self, x: i32, y: i32) -> f32 {
        self.index(x, y).map_or(0.0, |i| self.pheromones[i])
    }

    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    pub fn add_ant(&mut self, ant: Ant) {
        self.ants.push(ant);
    }

    pub fn food_collected(&self) -> u64 {
        self.food_collected
    }

    pub fn food_remaining(&self) -> u64 {
        self.cells
            .iter()
            .map(|cell| match cell {
                Cell::Food(units) => *units as u64,
                _ => 0,
            })
            .sum()
    }

    pub fn count_cells(&self, predicate: impl Fn(Cell) -> bool) -> usize {
        self.cells.iter().filter(|cell| predicate(**cell)).count()
    }

    fn random_point<R: Rng>(&self, rng: &mut R) -> (i32, i32) {
        (
            rng.gen_range(0..self.width) as i32,
            rng.gen_range(0..self.height) as i32,
        )
    }

    /// Random walk from `start`, filling empty cells outside the nest
    fn grow_blob<R: Rng>(&mut self, start: (i32, i32), size: usize, fill: Cell, rng: &mut R) {
        let (mut x, mut y) = start;
        let mut placed = 0;
        let max_attempts = size.saturating_mul(8);

        for _ in 0..max_attempts {
            if placed == size {
                break;
            }
            if let Some(i) = self.index(x, y) {
                if self.cells[i] == Cell::Empty && !self.in_nest(x, y) {
                    self.cells[i] = fill;
                    placed += 1;
                }
            }
            let (dx, dy) = HEADINGS[rng.gen_range(0..HEADINGS.len())];
            x = (x + dx).clamp(0, self.width as i32 - 1);
            y = (y + dy).clamp(0, self.height as i32 - 1);
        }
    }

    /// Move every ant one cell
    pub fn step<R: Rng>(&mut self, conf: &UserConf, rng: &mut R) {
        let turn_chance = (conf.wander_transition_chance_percent / 100.0).clamp(0.0, 1.0);
        let nest = self.nest();

        for i in 0..self.ants.len() {
            let mut ant = self.ants[i];

            if ant.carrying {
                if let Some(heading) = heading_toward((ant.x, ant.y), nest) {
                    ant.heading = heading;
                }
            }
            if rng.gen::<f32>() < turn_chance {
                ant.heading = rng.gen_range(0..HEADINGS.len());
            }

            let (dx, dy) = HEADINGS[ant.heading];
            let (nx, ny) = (ant.x + dx, ant.y + dy);
            match self.index(nx, ny) {
                Some(idx) if self.cells[idx].is_passable() => {
                    ant.x = nx;
                    ant.y = ny;
                    if ant.carrying {
                        self.pheromones[idx] += PHEROMONE_DEPOSIT;
                        if self.in_nest(nx, ny) {
                            ant.carrying = false;
                            ant.heading = reverse(ant.heading);
                            self.food_collected += 1;
                        }
                    } else if let Cell::Food(units) = self.cells[idx] {
                        self.cells[idx] = if units > 1 {
                            Cell::Food(units - 1)
                        } else {
                            Cell::Empty
                        };
                        ant.carrying = true;
                        ant.heading = reverse(ant.heading);
                    }
                }
                // Blocked by a barrier or the world edge
                _ => ant.heading = rng.gen_range(0..HEADINGS.len()),
            }

            self.ants[i] = ant;
        }
    }

    pub fn decay_pheromones(&mut self, multiplier: f32) {
        for level in &mut self.pheromones {
            *level *= multiplier;
            if *level < PHEROMONE_FLOOR {
                *level = 0.0;
            }
        }
    }
}

fn reverse(heading: usize) -> usize {
    (heading + HEADINGS.len() / 2) % HEADINGS.len()
}

fn heading_toward(from: (i32, i32), to: (i32, i32)) -> Option<usize> {
    let step = ((to.0 - from.0).signum(), (to.1 - from.1).signum());
    HEADINGS.iter().position(|h| *h == step)
}
