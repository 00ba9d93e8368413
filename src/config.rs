// ============================================
// Setting keys
// ============================================

pub const SIMULATION_TICK_DELAY: &str = "simulation_tick_delay";
pub const SCALE_FACTOR: &str = "scale_factor";
pub const PHEREMONE_DECAY_INTERVAL: &str = "pheremone_decay_interval";
pub const PHEREMONE_DECAY_MULTIPLIER: &str = "pheremone_decay_multiplier";
pub const FOOD_PATCH_COUNT: &str = "food_patch_count";
pub const FOOD_PATCH_SIZE: &str = "food_patch_size";
pub const FOOD_PATCH_SIZE_VARIANCE: &str = "food_patch_size_variance";
pub const FOOD_PATCH_CAPACITY: &str = "food_patch_capacity";
pub const BARRIER_PATCH_COUNT: &str = "barrier_patch_count";
pub const BARRIER_PATCH_SIZE: &str = "barrier_patch_size";
pub const WANDER_TRANSITION_CHANCE_PERCENT: &str = "wander_transition_chance_percent";

// ============================================
// Defaults
// ============================================

/// Milliseconds between simulation steps at startup
pub const DEFAULT_TICK_DELAY: f64 = 10.0;

/// Canvas pixels per world cell at startup
pub const DEFAULT_SCALE_FACTOR: f64 = 3.0;

/// Literal default for every known setting, in panel order.
pub const DEFAULT_SETTINGS: [(&str, f64); 11] = [
    // simulation controls
    (SIMULATION_TICK_DELAY, DEFAULT_TICK_DELAY),
    (SCALE_FACTOR, DEFAULT_SCALE_FACTOR),
    (PHEREMONE_DECAY_INTERVAL, 500.0),
    (PHEREMONE_DECAY_MULTIPLIER, 0.9),
    // world generation
    (FOOD_PATCH_COUNT, 27.0),
    (FOOD_PATCH_SIZE, 60.0),
    (FOOD_PATCH_SIZE_VARIANCE, 3.0),
    (FOOD_PATCH_CAPACITY, 50.0),
    (BARRIER_PATCH_COUNT, 36.0),
    (BARRIER_PATCH_SIZE, 128.0),
    // ant behavior
    (WANDER_TRANSITION_CHANCE_PERCENT, 4.25),
];

// ============================================
// Engine parameters
// ============================================

/// World dimensions in cells
pub const WORLD_WIDTH: u32 = 160;
pub const WORLD_HEIGHT: u32 = 160;

/// Number of ants spawned at the nest
pub const ANT_COUNT: usize = 400;

/// Cells within this distance of the world center are never blocked
pub const NEST_RADIUS: i32 = 6;

/// Pheromone laid per step by an ant carrying food
pub const PHEROMONE_DEPOSIT: f32 = 1.0;

/// Seed for world generation and ant movement
pub const WORLD_SEED: u64 = 0x5eed_a175;

/// Steps per second are logged this often (seconds)
pub const STEP_RATE_LOG_INTERVAL: f64 = 5.0;
