//! Per-frame simulation tick
//!
//! Order: sky, camera, actor physics, particles. The frame driver calls
//! `tick` once per animation frame and renders afterwards; nothing here
//! schedules itself.

use super::physics::step_actor;
use super::sound::{SoundCue, SoundSink};
use super::state::World;

/// Held movement intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &TickInput, dt: f32, sound: &mut impl SoundSink) {
    world.time_ticks += 1;

    world.sky.advance();
    world.camera.follow(world.actor.pos);

    let outcome = step_actor(&mut world.actor, &world.grid, input, dt);
    if outcome.jumped {
        sound.play(SoundCue::Jump);
    }
    if outcome.walking {
        sound.play(SoundCue::Walk);
    }

    world.particles.step();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::block::BlockKind;
    use crate::sim::grid::Grid;
    use crate::sim::sound::Silent;
    use crate::sim::worldgen::GenParams;
    use glam::IVec2;

    fn settled_world(seed: u64) -> World {
        let mut world = World::generate(&GenParams::deep(), seed);
        for _ in 0..120 {
            tick(&mut world, &TickInput::default(), SIM_DT, &mut Silent);
        }
        world
    }

    #[test]
    fn test_actor_settles_on_ground() {
        let world = settled_world(12345);
        assert!(world.actor.grounded);
        let below = world.actor_cell() + IVec2::Y;
        assert!(world.grid.is_solid(below.x, below.y));
        assert_eq!(world.time_ticks, 120);
    }

    /// Settled actor on a flat dirt floor
    fn flat_world() -> World {
        let mut grid = Grid::new(40, 12);
        for x in 0..40 {
            grid.set(x, 10, BlockKind::Dirt);
        }
        let mut world = World::from_grid(grid, 7);
        for _ in 0..120 {
            tick(&mut world, &TickInput::default(), SIM_DT, &mut Silent);
        }
        world
    }

    #[test]
    fn test_walk_cue_every_tick() {
        let mut world = flat_world();
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let mut cues = Vec::new();
        for _ in 0..3 {
            tick(&mut world, &right, SIM_DT, &mut cues);
        }
        assert_eq!(cues, vec![SoundCue::Walk; 3]);

        // A blocked move keeps vx, so the cue still fires against a wall
        let ahead = world.actor_cell() + IVec2::X;
        world.grid.set(ahead.x, ahead.y, BlockKind::Stone);
        let x0 = world.actor.pos.x;
        cues.clear();
        for _ in 0..10 {
            tick(&mut world, &right, SIM_DT, &mut cues);
        }
        assert_eq!(cues, vec![SoundCue::Walk; 10]);
        assert!(world.actor.pos.x < ahead.x as f32);
        assert!(world.actor.pos.x - x0 < 1.0);
    }

    #[test]
    fn test_jump_cue_without_walk() {
        let mut world = flat_world();
        let jump = TickInput {
            jump: true,
            right: true,
            ..Default::default()
        };
        let mut cues = Vec::new();
        tick(&mut world, &jump, SIM_DT, &mut cues);
        assert_eq!(cues, vec![SoundCue::Jump]);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput {
                left: true,
                jump: true,
                ..Default::default()
            },
        ];
        let mut a = World::generate(&GenParams::deep(), 31337);
        let mut b = World::generate(&GenParams::deep(), 31337);
        for i in 0..600 {
            let input = inputs[i % inputs.len()];
            tick(&mut a, &input, SIM_DT, &mut Silent);
            tick(&mut b, &input, SIM_DT, &mut Silent);
        }
        assert_eq!(a.actor, b.actor);
        assert_eq!(a.camera, b.camera);
        assert_eq!(a.grid, b.grid);
    }
}
