//! World state
//!
//! Everything the simulation mutates lives in one `World`, owned by the
//! frame driver and passed into each component call.

use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::Actor;
use super::block::BlockKind;
use super::grid::Grid;
use super::inventory::{Inventory, Selection};
use super::mutation;
use super::particles::ParticleSystem;
use super::sky::DayCycle;
use super::sound::SoundSink;
use super::viewport::{Camera, RedrawPolicy, Viewport};
use super::worldgen::{self, GenParams};

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    /// Seed the world was generated from
    pub seed: u64,
    pub grid: Grid,
    pub actor: Actor,
    pub camera: Camera,
    pub inventory: Inventory,
    pub selection: Selection,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleSystem,
    pub sky: DayCycle,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Block pass strategy, fixed by grid area
    pub redraw: RedrawPolicy,
    pub(crate) rng: Pcg32,
}

impl World {
    /// Generate a new world from a seed
    pub fn generate(params: &GenParams, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let grid = worldgen::generate(params, &mut rng);
        let world = Self::with_rng(grid, seed, rng);
        log::info!(
            "World generated: {}x{} seed {} ({:?})",
            world.grid.width(),
            world.grid.height(),
            seed,
            world.redraw
        );
        world
    }

    /// Wrap an existing grid (empty inventory, actor at spawn)
    pub fn from_grid(grid: Grid, seed: u64) -> Self {
        Self::with_rng(grid, seed, Pcg32::seed_from_u64(seed))
    }

    fn with_rng(grid: Grid, seed: u64, rng: Pcg32) -> Self {
        let actor = Actor::spawn(&grid);
        let camera = Camera::new(actor.pos);
        let redraw = RedrawPolicy::for_grid(&grid);
        Self {
            seed,
            grid,
            actor,
            camera,
            inventory: Inventory::default(),
            selection: Selection::default(),
            particles: ParticleSystem::new(),
            sky: DayCycle::default(),
            time_ticks: 0,
            redraw,
            rng,
        }
    }

    /// Replace the grid and/or inventory with restored state.
    ///
    /// The actor goes back to spawn if the restored grid would leave it
    /// outside the bounds or embedded in a block.
    pub fn restore(&mut self, grid: Option<Grid>, inventory: Option<Inventory>) {
        if let Some(grid) = grid {
            self.grid = grid;
            self.redraw = RedrawPolicy::for_grid(&self.grid);
            let cell = self.actor_cell();
            if self.grid.is_solid(cell.x, cell.y) {
                self.actor = Actor::spawn(&self.grid);
                self.camera = Camera::new(self.actor.pos);
            }
            self.particles.clear();
        }
        if let Some(inventory) = inventory {
            self.inventory = inventory;
        }
    }

    /// Break the block under a screen-space cursor
    pub fn break_at(&mut self, viewport: &Viewport, cursor: Vec2, sound: &mut impl SoundSink) -> bool {
        let cell = viewport.cursor_cell(&self.camera, cursor);
        mutation::break_block(self, cell, sound)
    }

    /// Place the selected block under a screen-space cursor
    pub fn place_at(&mut self, viewport: &Viewport, cursor: Vec2, sound: &mut impl SoundSink) -> bool {
        let cell = viewport.cursor_cell(&self.camera, cursor);
        mutation::place_block(self, cell, sound)
    }

    /// Select hotbar slot 1-4
    pub fn select_slot(&mut self, number: u32) -> bool {
        self.selection.select_number(number)
    }

    #[inline]
    pub fn selected_kind(&self) -> BlockKind {
        self.selection.kind()
    }

    /// Cell the actor's collision sample currently sits in
    pub fn actor_cell(&self) -> IVec2 {
        super::physics::sample_cell(self.actor.pos, self.actor.feet_offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_spawns_in_free_cell() {
        let world = World::generate(&GenParams::deep(), 1234);
        let cell = world.actor_cell();
        assert_eq!(world.grid.get_cell(cell), Some(BlockKind::Empty));
        assert_eq!(world.camera.pos, world.actor.pos);
        assert_eq!(world.redraw, RedrawPolicy::Culled);
    }

    #[test]
    fn test_classic_uses_full_scan() {
        let world = World::generate(&GenParams::classic(), 1);
        assert_eq!(world.redraw, RedrawPolicy::FullScan);
    }

    #[test]
    fn test_restore_keeps_missing_parts() {
        let mut world = World::generate(&GenParams::deep(), 5);
        world.inventory.stone = 4;
        let grid = world.grid.clone();
        world.restore(None, Some(Inventory {
            dirt: 1,
            ..Default::default()
        }));
        assert_eq!(world.grid, grid);
        assert_eq!(world.inventory.dirt, 1);
        assert_eq!(world.inventory.stone, 0);

        world.restore(Some(Grid::new(10, 10)), None);
        assert_eq!(world.grid.width(), 10);
        assert_eq!(world.inventory.dirt, 1);
        assert_eq!(world.redraw, RedrawPolicy::FullScan);
    }
}
