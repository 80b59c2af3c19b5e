//! Actor physics against the block grid
//!
//! Horizontal velocity is set directly from input each tick; vertical
//! velocity integrates gravity up to terminal speed. Each axis moves only if
//! the candidate position is free:
//! - a blocked horizontal move is dropped for the tick (velocity kept)
//! - a blocked vertical move zeroes vy and lands the actor if it was falling
//!
//! Collision samples a single point at the actor's feet.

use glam::{IVec2, Vec2};

use super::actor::Actor;
use super::grid::Grid;
use super::tick::TickInput;
use crate::consts::{GRAVITY, JUMP_VEL, MAX_FALL, MOVE_SPEED};

/// What happened during one actor step (drives sound cues)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Left the ground this tick
    pub jumped: bool,
    /// Moving horizontally while grounded
    pub walking: bool,
}

/// Cell sampled for collision when the actor's centre is at `pos`
#[inline]
pub fn sample_cell(pos: Vec2, feet_offset: f32) -> IVec2 {
    IVec2::new(pos.x.floor() as i32, (pos.y + feet_offset).floor() as i32)
}

/// Whether an actor centred at `pos` would overlap a solid (or out-of-bounds) cell
#[inline]
pub fn collides(grid: &Grid, pos: Vec2, feet_offset: f32) -> bool {
    let cell = sample_cell(pos, feet_offset);
    grid.is_solid(cell.x, cell.y)
}

/// Advance the actor by one tick of `dt` seconds
pub fn step_actor(actor: &mut Actor, grid: &Grid, input: &TickInput, dt: f32) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    let feet = actor.feet_offset();

    actor.vel.x = 0.0;
    if input.left {
        actor.vel.x -= MOVE_SPEED;
        actor.facing = -1.0;
    }
    if input.right {
        actor.vel.x += MOVE_SPEED;
        actor.facing = 1.0;
    }
    actor.vel.y = (actor.vel.y + GRAVITY * dt).min(MAX_FALL);

    let next = Vec2::new(actor.pos.x + actor.vel.x * dt, actor.pos.y);
    if !collides(grid, next, feet) {
        actor.pos = next;
    }

    let next = Vec2::new(actor.pos.x, actor.pos.y + actor.vel.y * dt);
    if !collides(grid, next, feet) {
        actor.pos = next;
        actor.grounded = false;
    } else {
        if actor.vel.y > 0.0 {
            actor.grounded = true;
        }
        actor.vel.y = 0.0;
    }

    if input.jump && actor.grounded {
        actor.vel.y = JUMP_VEL;
        actor.grounded = false;
        outcome.jumped = true;
    }

    outcome.walking = actor.vel.x != 0.0 && actor.grounded;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::block::BlockKind;

    /// 20x10 grid with a dirt floor on row 8
    fn floor_grid() -> Grid {
        let mut grid = Grid::new(20, 10);
        for x in 0..20 {
            grid.set(x, 8, BlockKind::Dirt);
            grid.set(x, 9, BlockKind::Dirt);
        }
        grid
    }

    fn settle(actor: &mut Actor, grid: &Grid) {
        for _ in 0..120 {
            step_actor(actor, grid, &TickInput::default(), SIM_DT);
        }
    }

    #[test]
    fn test_falls_and_lands() {
        let grid = floor_grid();
        let mut actor = Actor::new(Vec2::new(10.5, 2.0));
        settle(&mut actor, &grid);
        assert!(actor.grounded);
        assert_eq!(actor.vel.y, 0.0);
        assert_eq!(sample_cell(actor.pos, actor.feet_offset()).y, 7);
    }

    #[test]
    fn test_fall_speed_is_clamped() {
        let grid = Grid::new(4, 10_000);
        let mut actor = Actor::new(Vec2::new(2.0, 1.0));
        for _ in 0..600 {
            step_actor(&mut actor, &grid, &TickInput::default(), SIM_DT);
        }
        assert_eq!(actor.vel.y, MAX_FALL);
    }

    #[test]
    fn test_horizontal_velocity_is_instantaneous() {
        let grid = floor_grid();
        let mut actor = Actor::new(Vec2::new(10.5, 2.0));
        settle(&mut actor, &grid);

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let x0 = actor.pos.x;
        let outcome = step_actor(&mut actor, &grid, &right, SIM_DT);
        assert_eq!(actor.vel.x, MOVE_SPEED);
        assert!((actor.pos.x - (x0 + MOVE_SPEED * SIM_DT)).abs() < 1e-5);
        assert!(outcome.walking);
        assert_eq!(actor.facing, 1.0);

        let outcome = step_actor(&mut actor, &grid, &TickInput::default(), SIM_DT);
        assert_eq!(actor.vel.x, 0.0);
        assert!(!outcome.walking);
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let grid = floor_grid();
        let mut actor = Actor::new(Vec2::new(10.5, 2.0));
        settle(&mut actor, &grid);
        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        let x0 = actor.pos.x;
        step_actor(&mut actor, &grid, &both, SIM_DT);
        assert_eq!(actor.vel.x, 0.0);
        assert_eq!(actor.pos.x, x0);
    }

    #[test]
    fn test_wall_blocks_without_zeroing_velocity() {
        let mut grid = floor_grid();
        grid.set(11, 7, BlockKind::Stone);
        let mut actor = Actor::new(Vec2::new(10.95, 2.0));
        settle(&mut actor, &grid);

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let x0 = actor.pos.x;
        step_actor(&mut actor, &grid, &right, SIM_DT);
        assert_eq!(actor.pos.x, x0);
        assert_eq!(actor.vel.x, MOVE_SPEED);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let grid = floor_grid();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };

        let mut airborne = Actor::new(Vec2::new(10.5, 2.0));
        let outcome = step_actor(&mut airborne, &grid, &jump, SIM_DT);
        assert!(!outcome.jumped);

        let mut actor = Actor::new(Vec2::new(10.5, 2.0));
        settle(&mut actor, &grid);
        let outcome = step_actor(&mut actor, &grid, &jump, SIM_DT);
        assert!(outcome.jumped);
        assert!(!actor.grounded);
        assert_eq!(actor.vel.y, JUMP_VEL);

        // Rises on the next tick
        let y0 = actor.pos.y;
        step_actor(&mut actor, &grid, &TickInput::default(), SIM_DT);
        assert!(actor.pos.y < y0);
    }

    #[test]
    fn test_ceiling_stops_rise() {
        let mut grid = floor_grid();
        let mut actor = Actor::new(Vec2::new(10.5, 2.0));
        settle(&mut actor, &grid);
        // Block two cells above the feet sample
        let feet = sample_cell(actor.pos, actor.feet_offset());
        grid.set(feet.x, feet.y - 2, BlockKind::Stone);

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        step_actor(&mut actor, &grid, &jump, SIM_DT);
        for _ in 0..30 {
            step_actor(&mut actor, &grid, &TickInput::default(), SIM_DT);
            let cell = sample_cell(actor.pos, actor.feet_offset());
            assert!(!grid.is_solid(cell.x, cell.y));
        }
    }

    #[test]
    fn test_world_edges_are_solid() {
        let grid = floor_grid();
        let mut actor = Actor::new(Vec2::new(0.2, 2.0));
        settle(&mut actor, &grid);
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..60 {
            step_actor(&mut actor, &grid, &left, SIM_DT);
        }
        assert!(actor.pos.x >= 0.0);
        assert_eq!(actor.facing, -1.0);
    }
}
