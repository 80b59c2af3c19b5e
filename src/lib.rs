//! Block Sandbox - a tile-based 2D world with a stickman
//!
//! Core modules:
//! - `sim`: World simulation (grid, generation, physics, mutation, particles, camera)
//! - `renderer`: Draw sink, culled scene pass and WebGPU quad pipeline
//! - `platform`: Input translation, HUD markup and browser storage
//! - `persistence`: Save/load of grid + inventory through a key-value store
//! - `settings`: Persisted player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use persistence::{KeyValueStore, MemoryStore, PersistError};
pub use settings::{Settings, WorldPreset};

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Simulation timestep: one animation frame at 60 Hz
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Side of one block in screen pixels
    pub const BLOCK_SIZE: f32 = 32.0;

    /// Horizontal walk speed (cells/s)
    pub const MOVE_SPEED: f32 = 7.5;
    /// Gravity acceleration (cells/s²)
    pub const GRAVITY: f32 = 56.25;
    /// Terminal fall speed (cells/s)
    pub const MAX_FALL: f32 = 22.5;
    /// Vertical velocity applied on jump (cells/s, negative is up)
    pub const JUMP_VEL: f32 = -18.75;

    /// Stickman body size in cells (18 x 40 px)
    pub const ACTOR_WIDTH: f32 = 18.0 / BLOCK_SIZE;
    pub const ACTOR_HEIGHT: f32 = 40.0 / BLOCK_SIZE;

    /// Fraction of the remaining distance the camera covers each tick
    pub const CAMERA_FOLLOW: f32 = 0.08;
    /// Extra cells drawn around the visible rectangle
    pub const CULL_MARGIN: i32 = 1;
    /// Grids up to this many cells are redrawn with a full scan
    pub const FULL_SCAN_MAX_AREA: usize = 4096;

    /// Particles emitted per broken block
    pub const BREAK_PARTICLES: usize = 8;
    /// Particle lifetime range in ticks (min inclusive, max exclusive)
    pub const PARTICLE_LIFE_MIN: u32 = 15;
    pub const PARTICLE_LIFE_MAX: u32 = 25;
    /// Visual drag applied to particle displacement
    pub const PARTICLE_DAMPING: f32 = 0.1;
    /// Per-tick downward velocity gain for particles
    pub const PARTICLE_GRAVITY: f32 = 0.05;
    /// Particle square side in pixels
    pub const PARTICLE_SIZE: f32 = 6.0;

    /// Day/night phase advance per tick
    pub const DAY_CYCLE_STEP: f32 = 0.0002;

    /// Key-value store keys
    pub const WORLD_KEY: &str = "sandbox_world";
    pub const INVENTORY_KEY: &str = "sandbox_inv";
    pub const SETTINGS_KEY: &str = "sandbox_settings";
}

/// Grid cell containing a continuous world position
#[inline]
pub fn cell_at(pos: Vec2) -> IVec2 {
    IVec2::new(pos.x.floor() as i32, pos.y.floor() as i32)
}

/// Linear interpolation between two RGB colors, rounded per channel
#[inline]
pub fn lerp_rgb(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    std::array::from_fn(|i| (a[i] as f32 * (1.0 - t) + b[i] as f32 * t).round() as u8)
}

/// Convert an 8-bit RGB color to a linear-ish float RGBA quad color
#[inline]
pub fn rgb_to_f32(rgb: [u8; 3]) -> [f32; 4] {
    [
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
        1.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_at_floors_negative() {
        assert_eq!(cell_at(Vec2::new(-0.5, 2.9)), IVec2::new(-1, 2));
        assert_eq!(cell_at(Vec2::new(3.0, 0.0)), IVec2::new(3, 0));
    }

    #[test]
    fn test_lerp_rgb_endpoints() {
        let a = [0x87, 0xce, 0xeb];
        let b = [0x23, 0x2d, 0x4b];
        assert_eq!(lerp_rgb(a, b, 0.0), a);
        assert_eq!(lerp_rgb(a, b, 1.0), b);
        assert_eq!(lerp_rgb([0, 0, 0], [255, 255, 255], 0.5), [128, 128, 128]);
    }
}
