use anyhow::{bail, Result};
use serde::Serialize;

use super::color::Color;
use super::error::ImportError;
use crate::shared::constants;

/// Rectangular grid of cell colors, stored row-major.
///
/// Always holds at least one cell and every row has the same length.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Color>>,
}

impl Grid {
    pub fn new(width: usize, height: usize, fill: Color) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            rows: vec![vec![fill; width]; height],
        })
    }

    pub fn filled(size: usize, fill: Color) -> Result<Self> {
        Self::new(size, size, fill)
    }

    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Color>] {
        &self.rows
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    pub fn cells(&self) -> impl Iterator<Item = Color> + '_ {
        self.rows.iter().flatten().copied()
    }

    /// Sets one cell. Returns `true` when the cell changed; coordinates
    /// outside the grid are ignored.
    pub fn paint(&mut self, x: usize, y: usize, color: Color) -> bool {
        match self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            Some(cell) if *cell != color => {
                *cell = color;
                true
            }
            _ => false,
        }
    }

    /// Fresh grid of the requested size. Painted content is not carried over.
    pub fn resize(&self, width: usize, height: usize, fill: Color) -> Result<Self> {
        Self::new(width, height, fill)
    }

    pub fn fill(&mut self, color: Color) {
        for row in &mut self.rows {
            row.fill(color);
        }
    }

    pub fn to_json(&self) -> String {
        // Vec<Vec<Color>> with string leaves cannot fail to serialize.
        serde_json::to_string(&self.rows).unwrap_or_default()
    }

    pub fn from_json(text: &str) -> Result<Self, ImportError> {
        let raw: Vec<Vec<String>> = serde_json::from_str(text.trim())?;
        Self::from_raw_rows(raw)
    }

    fn from_raw_rows(raw: Vec<Vec<String>>) -> Result<Self, ImportError> {
        let height = raw.len();
        let width = raw.first().map(Vec::len).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(ImportError::Empty);
        }

        let max = constants::MAX_GRID_DIMENSION;
        if width > max || height > max {
            return Err(ImportError::TooLarge { width, height, max });
        }

        let mut rows = Vec::with_capacity(height);
        for (row_idx, row) in raw.into_iter().enumerate() {
            if row.len() != width {
                return Err(ImportError::Ragged {
                    row: row_idx,
                    expected: width,
                    found: row.len(),
                });
            }

            let parsed = row
                .iter()
                .enumerate()
                .map(|(col_idx, cell)| {
                    Color::parse(cell).map_err(|source| ImportError::Cell {
                        row: row_idx,
                        col: col_idx,
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(parsed);
        }

        Ok(Self { rows })
    }
}

impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<Vec<String>>::deserialize(deserializer)?;
        Grid::from_raw_rows(raw).map_err(serde::de::Error::custom)
    }
}

/// Width and height of a grid, persisted as the grid-size preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
}

impl GridSize {
    pub fn square(size: usize) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    pub fn of(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
        }
    }

    pub fn is_valid(&self) -> bool {
        check_dimensions(self.width, self.height).is_ok()
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    let max = constants::MAX_GRID_DIMENSION;
    if width == 0 || height == 0 {
        bail!("grid dimensions must be positive, got {}x{}", width, height);
    }
    if width > max || height > max {
        bail!("grid dimensions {}x{} exceed the {}x{} limit", width, height, max, max);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Color {
        Color::parse(constants::DEFAULT_COLOR).unwrap()
    }

    fn red() -> Color {
        Color::parse("#cc3232").unwrap()
    }

    #[test]
    fn test_paint_replaces_single_cell() {
        let mut grid = Grid::filled(4, base()).unwrap();
        assert!(grid.paint(1, 2, red()));
        assert!(!grid.paint(1, 2, red()));
        assert!(!grid.paint(4, 0, red()));

        assert_eq!(grid.get(1, 2), Some(red()));
        assert_eq!(grid.cells().filter(|c| *c == red()).count(), 1);
    }

    #[test]
    fn test_resize_discards_content() {
        let mut grid = Grid::filled(16, base()).unwrap();
        grid.paint(0, 0, red());

        let resized = grid.resize(8, 5, base()).unwrap();
        assert_eq!(resized.width(), 8);
        assert_eq!(resized.height(), 5);
        assert!(resized.cells().all(|c| c == base()));

        assert!(grid.resize(0, 5, base()).is_err());
        assert!(grid.resize(constants::MAX_GRID_DIMENSION + 1, 5, base()).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let mut grid = Grid::new(3, 2, base()).unwrap();
        grid.paint(2, 1, red());
        grid.paint(0, 0, Color::parse("#12345678").unwrap());

        let text = grid.to_json();
        assert!(text.starts_with("[[\"#12345678\",\"#2b2b2b\""));
        assert_eq!(Grid::from_json(&text).unwrap(), grid);
    }

    #[test]
    fn test_import_accepts_mixed_case() {
        let grid = Grid::from_json(r##"[["#FFF","#CC3232"]]"##).unwrap();
        assert_eq!(grid.to_json(), r##"[["#ffffff","#cc3232"]]"##);
    }

    #[test]
    fn test_import_rejects_malformed_data() {
        assert!(matches!(Grid::from_json("not json"), Err(ImportError::Json(_))));
        assert!(matches!(Grid::from_json("[]"), Err(ImportError::Empty)));
        assert!(matches!(Grid::from_json("[[]]"), Err(ImportError::Empty)));
        assert!(matches!(
            Grid::from_json(r##"[["#fff","#fff"],["#fff"]]"##),
            Err(ImportError::Ragged { row: 1, expected: 2, found: 1 })
        ));
        assert!(matches!(
            Grid::from_json(r##"[["#fff","blue"]]"##),
            Err(ImportError::Cell { row: 0, col: 1, .. })
        ));
        assert!(matches!(Grid::from_json(r#"{"a": 1}"#), Err(ImportError::Json(_))));
    }

    #[test]
    fn test_deserialize_enforces_invariants() {
        assert!(serde_json::from_str::<Grid>(r##"[["#fff"],["#fff","#000"]]"##).is_err());
        let grid: Grid = serde_json::from_str(r##"[["#fff"]]"##).unwrap();
        assert_eq!(serde_json::to_string(&grid).unwrap(), r##"[["#ffffff"]]"##);
    }
}
