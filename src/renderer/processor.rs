use super::cell::CellData;
use crate::core::color::Color;
use crate::core::grid::Grid;

/// Packs two grid rows into each terminal row with half-block glyphs.
pub struct GridProcessor {
    /// Fills the missing bottom half when the grid has an odd height.
    pub pad: Color,
}

impl GridProcessor {
    pub fn new(pad: Color) -> Self {
        Self { pad }
    }

    /// Returns `(cells, columns)`; rows are `ceil(height / 2)` long.
    pub fn process(&self, grid: &Grid) -> (Vec<CellData>, usize) {
        let w = grid.width();
        let term_height = grid.height().div_ceil(2);
        let mut cells = vec![CellData::default(); w * term_height];
        self.process_into(grid, &mut cells);
        (cells, w)
    }

    pub fn process_into(&self, grid: &Grid, cells: &mut [CellData]) {
        let w = grid.width();
        let term_height = grid.height().div_ceil(2);

        if cells.len() != w * term_height {
            return;
        }

        for (idx, cell) in cells.iter_mut().enumerate() {
            let cx = idx % w;
            let cy = idx / w;

            let top = grid.get(cx, cy * 2).unwrap_or(self.pad);
            let bottom = grid.get(cx, cy * 2 + 1).unwrap_or(self.pad);

            *cell = CellData::half_block(top, bottom);
        }
    }
}
