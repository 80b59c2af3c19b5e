//! Procedural world generation
//!
//! Layout, top to bottom:
//! - open sky
//! - a scatter band where each cell is stone with a small chance
//! - a one-row stone stratum
//! - solid dirt from the surface row down
//! - (deep worlds) a bedrock floor on the last row
//!
//! Trees grow from the stone stratum on columns away from the world edges.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::block::BlockKind;
use super::grid::Grid;

/// Generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenParams {
    pub width: usize,
    pub height: usize,
    /// Surface row distance from the bottom (`S = height - surface_offset`)
    pub surface_offset: usize,
    /// Rows above the stone stratum that may hold scattered stone
    pub scatter_depth: usize,
    /// Per-cell stone chance inside the scatter band
    pub stone_chance: f64,
    /// Per-column tree chance
    pub tree_chance: f64,
    /// Columns this close to either edge never get a tree
    pub tree_margin: usize,
    /// Trunk height range (inclusive)
    pub trunk_min: i32,
    pub trunk_max: i32,
    /// Bottom row is immutable bedrock
    pub bedrock_floor: bool,
}

impl GenParams {
    /// Small finite world, redrawn with a full scan
    pub fn classic() -> Self {
        Self {
            width: 60,
            height: 30,
            bedrock_floor: false,
            ..Self::deep()
        }
    }

    /// Large world with a bedrock floor, redrawn with culling
    pub fn deep() -> Self {
        Self {
            width: 120,
            height: 80,
            surface_offset: 5,
            scatter_depth: 8,
            stone_chance: 0.05,
            tree_chance: 0.07,
            tree_margin: 3,
            trunk_min: 4,
            trunk_max: 6,
            bedrock_floor: true,
        }
    }

    /// Surface row index: this row and everything below is solid
    pub fn surface_row(&self) -> usize {
        self.height.saturating_sub(self.surface_offset)
    }

    /// Row of the thin stone stratum directly above the surface
    pub fn stratum_row(&self) -> Option<usize> {
        self.surface_row().checked_sub(1)
    }
}

impl Default for GenParams {
    fn default() -> Self {
        Self::deep()
    }
}

/// Generate a fully populated grid
pub fn generate<R: Rng>(params: &GenParams, rng: &mut R) -> Grid {
    let h = params.height;
    let surface = params.surface_row();
    let stratum = params.stratum_row();
    let scatter_top = surface.saturating_sub(1 + params.scatter_depth);

    let mut grid = Grid::from_fn(params.width, h, |_, y| {
        if params.bedrock_floor && y + 1 == h {
            BlockKind::Bedrock
        } else if y >= surface {
            BlockKind::Dirt
        } else if Some(y) == stratum {
            BlockKind::Stone
        } else if y >= scatter_top && rng.random_bool(params.stone_chance) {
            BlockKind::Stone
        } else {
            BlockKind::Empty
        }
    });

    let mut trees = 0;
    if let Some(base) = stratum {
        let first = params.tree_margin;
        let last = params.width.saturating_sub(params.tree_margin);
        for x in first..last {
            if rng.random_bool(params.tree_chance) {
                add_tree(&mut grid, params, x as i32, base as i32, rng);
                trees += 1;
            }
        }
    }

    log::debug!(
        "Generated {}x{} world (surface row {}, {} trees, bedrock floor: {})",
        params.width,
        h,
        surface,
        trees,
        params.bedrock_floor
    );
    grid
}

/// Plant a tree whose trunk starts at (x, base) and grows upward
pub fn add_tree<R: Rng>(grid: &mut Grid, params: &GenParams, x: i32, base: i32, rng: &mut R) {
    let trunk_height = rng.random_range(params.trunk_min..=params.trunk_max);

    for dy in 0..trunk_height {
        // set() is bounds-checked and leaves bedrock alone
        grid.set(x, base - dy, BlockKind::Wood);
    }

    // Rounded canopy: three rows above the trunk top, trimmed at the corners
    let canopy = base - trunk_height;
    for dy in -2i32..=0 {
        for dx in -2i32..=2 {
            if dx.abs() + dy.abs() < 4 {
                grid.set(x + dx, canopy + dy, BlockKind::Leaf);
            }
        }
    }
}
