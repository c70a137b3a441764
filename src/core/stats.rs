use std::fmt::Write as _;

use super::color::Color;
use super::grid::Grid;

/// Tile counts per color, in the order colors first appear (row-major).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridStats {
    pub width: usize,
    pub height: usize,
    counts: Vec<(Color, usize)>,
}

impl GridStats {
    pub fn collect(grid: &Grid) -> Self {
        let mut counts: Vec<(Color, usize)> = Vec::new();
        for color in grid.cells() {
            match counts.iter_mut().find(|(c, _)| *c == color) {
                Some((_, n)) => *n += 1,
                None => counts.push((color, 1)),
            }
        }

        Self {
            width: grid.width(),
            height: grid.height(),
            counts,
        }
    }

    pub fn counts(&self) -> &[(Color, usize)] {
        &self.counts
    }

    pub fn count_of(&self, color: Color) -> usize {
        self.counts
            .iter()
            .find(|(c, _)| *c == color)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    pub fn report(&self) -> String {
        let mut out = format!("Grid Size: {} x {}\nTile Counts:\n", self.width, self.height);
        for (color, count) in &self.counts {
            let _ = writeln!(out, "{}: {} {}", color, count, tile_word(*count));
        }
        out
    }
}

pub fn tile_word(count: usize) -> &'static str {
    if count == 1 {
        "tile"
    } else {
        "tiles"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_in_first_seen_order() {
        let grid = Grid::from_json(r##"[["#000","#fff","#000"],["#cc3232","#000","#fff"]]"##).unwrap();
        let stats = GridStats::collect(&grid);

        let hexes: Vec<_> = stats.counts().iter().map(|(c, n)| (c.to_hex(), *n)).collect();
        assert_eq!(
            hexes,
            [("#000000".to_string(), 3), ("#ffffff".to_string(), 2), ("#cc3232".to_string(), 1)]
        );
        assert_eq!(stats.total(), 6);
        assert_eq!(stats.count_of(Color::parse("#fff").unwrap()), 2);
        assert_eq!(stats.count_of(Color::parse("#123").unwrap()), 0);
    }

    #[test]
    fn test_report_text() {
        let grid = Grid::from_json(r##"[["#000","#000","#fff"]]"##).unwrap();
        assert_eq!(
            GridStats::collect(&grid).report(),
            "Grid Size: 3 x 1\nTile Counts:\n#000000: 2 tiles\n#ffffff: 1 tile\n"
        );
    }
}
