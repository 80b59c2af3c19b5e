//! Fixed-size block grid
//!
//! Cells are stored row-major in a flat arena. All coordinate access is
//! bounds-checked here; anything outside `[0, width) x [0, height)` reads as
//! `None` and counts as solid for collision.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::block::BlockKind;

/// Row-major nullable form used for persistence (`null` = empty cell)
pub type GridRows = Vec<Vec<Option<BlockKind>>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "GridRows", try_from = "GridRows")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<BlockKind>,
}

impl Grid {
    /// Create an all-empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![BlockKind::Empty; width * height],
        }
    }

    /// Build a grid by evaluating `f(x, y)` for every cell, row by row
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> BlockKind) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    /// Block at (x, y), `None` when out of bounds
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<BlockKind> {
        self.index(x, y).map(|i| self.cells[i])
    }

    #[inline]
    pub fn get_cell(&self, cell: IVec2) -> Option<BlockKind> {
        self.get(cell.x, cell.y)
    }

    /// Collision query: out-of-bounds cells are solid
    #[inline]
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_none_or(BlockKind::is_solid)
    }

    /// Write a block. Returns false (and writes nothing) when the cell is
    /// out of bounds or holds bedrock.
    pub fn set(&mut self, x: i32, y: i32, kind: BlockKind) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        if self.cells[i] == BlockKind::Bedrock {
            return false;
        }
        self.cells[i] = kind;
        true
    }

    #[inline]
    pub fn set_cell(&mut self, cell: IVec2, kind: BlockKind) -> bool {
        self.set(cell.x, cell.y, kind)
    }

    /// One row of cells, left to right
    pub fn row(&self, y: usize) -> &[BlockKind] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Count cells holding `kind`
    pub fn count(&self, kind: BlockKind) -> usize {
        self.cells.iter().filter(|&&k| k == kind).count()
    }
}

impl From<Grid> for GridRows {
    fn from(grid: Grid) -> Self {
        (0..grid.height)
            .map(|y| {
                grid.row(y)
                    .iter()
                    .map(|&k| if k.is_empty() { None } else { Some(k) })
                    .collect()
            })
            .collect()
    }
}

impl TryFrom<GridRows> for Grid {
    type Error = String;

    fn try_from(rows: GridRows) -> Result<Self, Self::Error> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err("grid has no cells".to_string());
        }
        if let Some(y) = rows.iter().position(|r| r.len() != width) {
            return Err(format!(
                "row {} has {} cells, expected {}",
                y,
                rows[y].len(),
                width
            ));
        }
        let cells = rows
            .into_iter()
            .flatten()
            .map(|c| c.unwrap_or(BlockKind::Empty))
            .collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_is_solid() {
        let grid = Grid::new(4, 3);
        assert!(!grid.is_solid(0, 0));
        assert!(grid.is_solid(-1, 0));
        assert!(grid.is_solid(0, 3));
        assert!(grid.is_solid(4, 1));
        assert_eq!(grid.get(4, 1), None);
    }

    #[test]
    fn test_set_rejects_out_of_bounds_and_bedrock() {
        let mut grid = Grid::new(4, 3);
        assert!(!grid.set(-1, 0, BlockKind::Dirt));
        assert!(!grid.set(0, 5, BlockKind::Dirt));
        assert!(grid.set(1, 2, BlockKind::Bedrock));
        assert!(!grid.set(1, 2, BlockKind::Empty));
        assert_eq!(grid.get(1, 2), Some(BlockKind::Bedrock));
    }

    #[test]
    fn test_serializes_row_major_with_nulls() {
        let mut grid = Grid::new(3, 2);
        grid.set(2, 0, BlockKind::Wood);
        grid.set(0, 1, BlockKind::Dirt);
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, r#"[[null,null,"wood"],["dirt",null,null]]"#);
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let result: Result<Grid, _> = serde_json::from_str(r#"[[null,"dirt"],[null]]"#);
        assert!(result.is_err());
        let result: Result<Grid, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }
}
