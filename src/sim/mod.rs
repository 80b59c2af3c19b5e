//! World simulation module
//!
//! All gameplay logic lives here. This module must stay free of platform
//! dependencies:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Sound, drawing and storage go through collaborator traits

pub mod actor;
pub mod block;
pub mod grid;
pub mod inventory;
pub mod mutation;
pub mod particles;
pub mod physics;
pub mod sky;
pub mod sound;
pub mod state;
pub mod tick;
pub mod viewport;
pub mod worldgen;

pub use actor::Actor;
pub use block::{BlockKind, PLACEABLE};
pub use grid::Grid;
pub use inventory::{Inventory, Selection};
pub use mutation::{break_block, place_block};
pub use particles::{Particle, ParticleSystem};
pub use physics::{StepOutcome, collides, sample_cell, step_actor};
pub use sky::DayCycle;
pub use sound::{Silent, SoundCue, SoundSink};
pub use state::World;
pub use tick::{TickInput, tick};
pub use viewport::{Camera, CellRect, RedrawPolicy, Viewport};
pub use worldgen::{GenParams, generate};
