//! Break and place
//!
//! Both operations are silent no-ops when their preconditions fail; the only
//! observable result of a failed request is the absence of side effects.

use glam::IVec2;

use super::block::BlockKind;
use super::physics::sample_cell;
use super::sound::{SoundCue, SoundSink};
use super::state::World;

/// Break the block at `cell` into the inventory.
///
/// Applies only to placeable kinds: empty cells, bedrock and out-of-bounds
/// targets are left alone. Emits a particle burst and the break cue.
pub fn break_block(world: &mut World, cell: IVec2, sound: &mut impl SoundSink) -> bool {
    let Some(kind) = world.grid.get_cell(cell) else {
        return false;
    };
    if !kind.is_placeable() {
        return false;
    }
    if !world.grid.set_cell(cell, BlockKind::Empty) {
        return false;
    }
    world.inventory.add(kind);
    world
        .particles
        .spawn_burst(cell, kind.color(), &mut world.rng);
    sound.play(SoundCue::Break);
    log::debug!("Broke {} at ({}, {})", kind.as_str(), cell.x, cell.y);
    true
}

/// Place the selected block at `cell` from the inventory.
///
/// Requires an in-bounds empty cell that is not the actor's own collision
/// cell, and at least one block of the selected kind.
pub fn place_block(world: &mut World, cell: IVec2, sound: &mut impl SoundSink) -> bool {
    let kind = world.selection.kind();
    if !kind.is_placeable() || world.inventory.count(kind) == 0 {
        return false;
    }
    if world.grid.get_cell(cell) != Some(BlockKind::Empty) {
        return false;
    }
    if sample_cell(world.actor.pos, world.actor.feet_offset()) == cell {
        return false;
    }
    if !world.grid.set_cell(cell, kind) {
        return false;
    }
    world.inventory.take(kind);
    sound.play(SoundCue::Place);
    log::debug!("Placed {} at ({}, {})", kind.as_str(), cell.x, cell.y);
    true
}
