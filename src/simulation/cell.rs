/// RGBA colors used when painting the canvas
pub const EMPTY_COLOR: [u8; 4] = [24, 20, 16, 255];
pub const FOOD_COLOR: [u8; 4] = [72, 190, 64, 255];
pub const BARRIER_COLOR: [u8; 4] = [120, 120, 128, 255];
pub const ANT_COLOR: [u8; 4] = [220, 60, 40, 255];
pub const NEST_COLOR: [u8; 4] = [96, 64, 32, 255];

/// Pheromone level drawn at full intensity
const PHEROMONE_SATURATION: f32 = 8.0;

/// Contents of one world cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    /// Food with the number of units left
    Food(u32),
    Barrier,
}

impl Cell {
    pub fn is_passable(self) -> bool {
        !matches!(self, Cell::Barrier)
    }

    /// Base color, with empty ground tinted blue by pheromone level
    pub fn color(self, pheromone: f32) -> [u8; 4] {
        match self {
            Cell::Empty if pheromone > 0.0 => {
                let t = (pheromone / PHEROMONE_SATURATION).min(1.0);
                [
                    lerp(EMPTY_COLOR[0], 40, t),
                    lerp(EMPTY_COLOR[1], 90, t),
                    lerp(EMPTY_COLOR[2], 230, t),
                    255,
                ]
            }
            Cell::Empty => EMPTY_COLOR,
            Cell::Food(_) => FOOD_COLOR,
            Cell::Barrier => BARRIER_COLOR,
        }
    }
}

fn lerp(from: u8, to: u8, t: f32) -> u8 {
    (from as f32 + (to as f32 - from as f32) * t).round() as u8
}
