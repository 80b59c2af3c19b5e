//! Camera and world-to-screen mapping
//!
//! All drawn entities share one affine transform:
//! `screen = (world - camera) * block_size + screen_size / 2`.
//! Culling turns the visible screen rectangle back into a clamped cell
//! rectangle so the renderer only iterates what can be seen.

use glam::{IVec2, Vec2};

use super::grid::Grid;
use crate::consts::{BLOCK_SIZE, CAMERA_FOLLOW, CULL_MARGIN, FULL_SCAN_MAX_AREA};

/// Smoothed view centre in grid units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
}

impl Camera {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }

    /// Move a fixed fraction of the remaining distance toward `target`
    pub fn follow(&mut self, target: Vec2) {
        self.pos += (target - self.pos) * CAMERA_FOLLOW;
    }
}

/// Screen dimensions and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Screen size in pixels
    pub size: Vec2,
    /// Pixels per grid cell
    pub block_size: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            block_size: BLOCK_SIZE,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.size / 2.0
    }

    /// World position (grid units) to screen pixels
    #[inline]
    pub fn world_to_screen(&self, camera: &Camera, world: Vec2) -> Vec2 {
        (world - camera.pos) * self.block_size + self.center()
    }

    /// Screen pixels to world position (grid units)
    #[inline]
    pub fn screen_to_world(&self, camera: &Camera, screen: Vec2) -> Vec2 {
        camera.pos + (screen - self.center()) / self.block_size
    }

    /// Grid cell under a screen-space cursor (may be out of bounds)
    #[inline]
    pub fn cursor_cell(&self, camera: &Camera, cursor: Vec2) -> IVec2 {
        crate::cell_at(self.screen_to_world(camera, cursor))
    }

    /// Cells whose screen rectangle can intersect the screen, expanded by
    /// `CULL_MARGIN` and clamped to the grid
    pub fn visible_cells(&self, camera: &Camera, grid: &Grid) -> CellRect {
        let half = self.center() / self.block_size;
        let min = camera.pos - half;
        let max = camera.pos + half;
        CellRect {
            x0: min.x.floor() as i32 - CULL_MARGIN,
            y0: min.y.floor() as i32 - CULL_MARGIN,
            x1: max.x.ceil() as i32 + CULL_MARGIN,
            y1: max.y.ceil() as i32 + CULL_MARGIN,
        }
        .clamp_to(grid)
    }

    /// Cells to iterate this frame under the given policy
    pub fn cells_to_draw(&self, camera: &Camera, grid: &Grid, policy: RedrawPolicy) -> CellRect {
        match policy {
            RedrawPolicy::FullScan => CellRect::full(grid),
            RedrawPolicy::Culled => self.visible_cells(camera, grid),
        }
    }
}

/// Half-open cell rectangle `[x0, x1) x [y0, y1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl CellRect {
    pub fn full(grid: &Grid) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: grid.width() as i32,
            y1: grid.height() as i32,
        }
    }

    pub fn clamp_to(self, grid: &Grid) -> Self {
        let w = grid.width() as i32;
        let h = grid.height() as i32;
        let x0 = self.x0.clamp(0, w);
        let y0 = self.y0.clamp(0, h);
        Self {
            x0,
            y0,
            x1: self.x1.clamp(x0, w),
            y1: self.y1.clamp(y0, h),
        }
    }

    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= self.x0 && cell.x < self.x1 && cell.y >= self.y0 && cell.y < self.y1
    }

    pub fn area(&self) -> usize {
        ((self.x1 - self.x0).max(0) * (self.y1 - self.y0).max(0)) as usize
    }

    /// Cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = IVec2> + use<> {
        let CellRect { x0, y0, x1, y1 } = *self;
        (y0..y1).flat_map(move |y| (x0..x1).map(move |x| IVec2::new(x, y)))
    }
}

/// How much of the grid the block pass walks each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawPolicy {
    /// Every cell, every frame (small grids only)
    FullScan,
    /// Only the visible rectangle plus margin
    Culled,
}

impl RedrawPolicy {
    pub fn for_grid(grid: &Grid) -> Self {
        if grid.area() <= FULL_SCAN_MAX_AREA {
            RedrawPolicy::FullScan
        } else {
            RedrawPolicy::Culled
        }
    }
}
