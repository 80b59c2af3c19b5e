//! The stickman

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::consts::{ACTOR_HEIGHT, ACTOR_WIDTH};

/// The single player-controlled body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Body centre in grid units
    pub pos: Vec2,
    /// Velocity in cells/s
    pub vel: Vec2,
    /// Body width and height in grid units
    pub size: Vec2,
    /// Standing on a solid cell since the last vertical move
    pub grounded: bool,
    /// +1 facing right, -1 facing left
    pub facing: f32,
}

impl Actor {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::new(ACTOR_WIDTH, ACTOR_HEIGHT),
            grounded: false,
            facing: 1.0,
        }
    }

    /// Spawn above the highest solid cell of the centre column, with the
    /// collision sample in the empty cell on top of it
    pub fn spawn(grid: &Grid) -> Self {
        let x = grid.width() as i32 / 2;
        let top = (0..grid.height() as i32)
            .find(|&y| grid.is_solid(x, y))
            .unwrap_or(grid.height() as i32);
        let mut actor = Self::new(Vec2::new(x as f32 + 0.5, 0.0));
        actor.pos.y = top as f32 - 0.5 - actor.feet_offset();
        actor
    }

    /// Vertical offset from the body centre to the collision sample point
    #[inline]
    pub fn feet_offset(&self) -> f32 {
        self.size.y / 2.0
    }
}
