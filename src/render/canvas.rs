use super::color::Color;

/// The size of the virtual square the visual layers draw in.
pub const STAGE_SIZE: f32 = 320.0;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

/// A single terminal cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub fg: Color,
    pub bg: Option<Color>,
}

impl Default for Cell {
    fn default() -> Self {
        Self { glyph: ' ', fg: Color::WHITE, bg: None }
    }
}

/// A grid of cells the scene is drawn into before being flushed to the terminal.
///
/// Layers draw using stage coordinates, a 320x320 square centered on the canvas and scaled so it
/// fits in it.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![Cell::default(); width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Cell> {
        if col < self.width && row < self.height { self.cells.get(row * self.width + col) } else { None }
    }

    fn get_mut(&mut self, col: usize, row: usize) -> Option<&mut Cell> {
        if col < self.width && row < self.height { self.cells.get_mut(row * self.width + col) } else { None }
    }

    /// Set the background of a cell, keeping its glyph.
    pub fn paint_bg(&mut self, col: usize, row: usize, color: Color) {
        if let Some(cell) = self.get_mut(col, row) {
            cell.bg = Some(color);
        }
    }

    /// Draw a glyph in a cell, keeping its background.
    pub fn put(&mut self, col: usize, row: usize, glyph: char, fg: Color) {
        if let Some(cell) = self.get_mut(col, row) {
            cell.glyph = glyph;
            cell.fg = fg;
        }
    }

    /// Draw a string starting at the given cell, clipping at the right edge.
    pub fn put_str(&mut self, col: usize, row: usize, text: &str, fg: Color) {
        for (offset, glyph) in text.chars().enumerate() {
            self.put(col + offset, row, glyph, fg);
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    /// How many stage units a single cell row spans.
    pub fn stage_units_per_row(&self) -> f32 {
        let rows = (self.height as f32).min(self.width as f32 / CELL_ASPECT).max(1.0);
        STAGE_SIZE / rows
    }

    /// Map a stage point to the cell containing it.
    pub fn stage_to_cell(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let unit = self.stage_units_per_row();
        let center = STAGE_SIZE / 2.0;
        let col = self.width as f32 / 2.0 + (x - center) / unit * CELL_ASPECT;
        let row = self.height as f32 / 2.0 + (y - center) / unit;
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        (col < self.width && row < self.height).then_some((col, row))
    }

    /// Map the center of a cell to stage coordinates.
    pub fn cell_to_stage(&self, col: usize, row: usize) -> (f32, f32) {
        let unit = self.stage_units_per_row();
        let center = STAGE_SIZE / 2.0;
        let x = center + (col as f32 + 0.5 - self.width as f32 / 2.0) / CELL_ASPECT * unit;
        let y = center + (row as f32 + 0.5 - self.height as f32 / 2.0) * unit;
        (x, y)
    }
}
