use crate::engine::EngineError;
use crate::simulation::cell::{Cell, ANT_COLOR, NEST_COLOR};
use crate::simulation::grid::Grid;

/// RGBA pixel buffer showing the world at `scale` pixels per cell.
///
/// The buffer is only allocated when the world is painted, so rescaling an
/// unpainted canvas costs nothing.
pub struct Canvas {
    scale: f64,
    world_width: u32,
    world_height: u32,
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Canvas {
    pub fn new(world_width: u32, world_height: u32, scale: f64) -> Result<Self, EngineError> {
        validate_scale(scale)?;
        let mut canvas = Self {
            scale,
            world_width,
            world_height,
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        canvas.resize();
        Ok(canvas)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Change the scale; returns false when it was already `scale`
    pub fn set_scale(&mut self, scale: f64) -> Result<bool, EngineError> {
        validate_scale(scale)?;
        if scale == self.scale {
            return Ok(false);
        }
        self.scale = scale;
        self.resize();
        Ok(true)
    }

    fn resize(&mut self) {
        self.width = scaled(self.world_width, self.scale);
        self.height = scaled(self.world_height, self.scale);
        self.pixels = Vec::new();
    }

    /// Whether the buffer holds a frame at the current size
    pub fn is_painted(&self) -> bool {
        !self.pixels.is_empty()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Raw RGBA bytes of the last painted frame, row-major. Empty until
    /// the first `render` at the current size.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Paint the grid with nearest-neighbor upscaling
    pub fn render(&mut self, grid: &Grid) {
        let (cols, rows) = (grid.width(), grid.height());
        if cols == 0 || rows == 0 {
            return;
        }
        let len = (self.width * self.height) as usize;
        if self.pixels.len() != len {
            self.pixels = vec![[0, 0, 0, 255]; len];
        }

        // One color per world cell, then upscale
        let mut cell_colors = Vec::with_capacity((cols * rows) as usize);
        for y in 0..rows as i32 {
            for x in 0..cols as i32 {
                let cell = grid.cell(x, y).unwrap_or(Cell::Empty);
                let color = if cell == Cell::Empty && grid.in_nest(x, y) {
                    NEST_COLOR
                } else {
                    cell.color(grid.pheromone(x, y))
                };
                cell_colors.push(color);
            }
        }
        for ant in grid.ants() {
            let i = ant.y as usize * cols as usize + ant.x as usize;
            if let Some(color) = cell_colors.get_mut(i) {
                *color = ANT_COLOR;
            }
        }

        for py in 0..self.height {
            let cy = ((py as f64 / self.scale) as u32).min(rows - 1);
            for px in 0..self.width {
                let cx = ((px as f64 / self.scale) as u32).min(cols - 1);
                self.pixels[(py * self.width + px) as usize] =
                    cell_colors[(cy * cols + cx) as usize];
            }
        }
    }
}

fn validate_scale(scale: f64) -> Result<(), EngineError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidScale(scale))
    }
}

fn scaled(cells: u32, scale: f64) -> u32 {
    (cells as f64 * scale).round().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::cell::{BARRIER_COLOR, EMPTY_COLOR};

    #[test]
    fn test_canvas_size_follows_scale() {
        let grid = Grid::empty(100, 50);
        let mut canvas = Canvas::new(100, 50, 3.0).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (300, 150));
        canvas.render(&grid);
        assert_eq!(canvas.as_bytes().len(), 300 * 150 * 4);

        assert!(canvas.set_scale(7.5).unwrap());
        assert_eq!((canvas.width(), canvas.height()), (750, 375));
        canvas.render(&grid);
        assert_eq!(canvas.as_bytes().len(), 750 * 375 * 4);
    }

    #[test]
    fn test_rescale_defers_allocation_until_painted() {
        let mut canvas = Canvas::new(160, 160, 3.0).unwrap();
        assert!(!canvas.is_painted());

        canvas.set_scale(20.0).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (3200, 3200));
        assert!(canvas.as_bytes().is_empty());
        assert_eq!(canvas.pixel(0, 0), None);

        canvas.render(&Grid::empty(160, 160));
        assert!(canvas.is_painted());
        canvas.set_scale(4.0).unwrap();
        assert!(!canvas.is_painted());
    }

    #[test]
    fn test_same_scale_is_a_no_op() {
        let mut canvas = Canvas::new(10, 10, 4.0).unwrap();
        let mut grid = Grid::empty(10, 10);
        grid.set_cell(0, 0, Cell::Barrier);
        canvas.render(&grid);
        let before = canvas.as_bytes().to_vec();

        assert!(!canvas.set_scale(4.0).unwrap());
        assert_eq!(canvas.as_bytes(), &before[..]);
    }

    #[test]
    fn test_invalid_scale_rejected() {
        assert!(matches!(Canvas::new(10, 10, 0.0), Err(EngineError::InvalidScale(_))));
        let mut canvas = Canvas::new(10, 10, 3.0).unwrap();
        assert!(canvas.set_scale(f64::NAN).is_err());
        assert_eq!(canvas.scale(), 3.0);
    }

    #[test]
    fn test_render_upscales_cells() {
        let mut grid = Grid::empty(20, 20);
        grid.set_cell(0, 0, Cell::Barrier);
        let mut canvas = Canvas::new(20, 20, 3.0).unwrap();
        canvas.render(&grid);

        for p in 0..3 {
            assert_eq!(canvas.pixel(p, p), Some(BARRIER_COLOR));
        }
        assert_eq!(canvas.pixel(3, 0), Some(EMPTY_COLOR));
        assert_eq!(canvas.pixel(60, 0), None);
    }
}
