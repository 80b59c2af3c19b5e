//! Decorative block-break particles
//!
//! Particles live in grid units and count their life in ticks. They never
//! collide and never affect gameplay.

use glam::{IVec2, Vec2};
use rand::Rng;

use crate::consts::{
    BREAK_PARTICLES, PARTICLE_DAMPING, PARTICLE_GRAVITY, PARTICLE_LIFE_MAX, PARTICLE_LIFE_MIN,
};

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// Velocity in cells/tick (before damping)
    pub vel: Vec2,
    pub color: [f32; 4],
    /// Remaining ticks
    pub life: u32,
}

impl Particle {
    /// Integrate one tick
    #[inline]
    fn step(&mut self) {
        self.pos += self.vel * PARTICLE_DAMPING;
        self.vel.y += PARTICLE_GRAVITY;
        self.life = self.life.saturating_sub(1);
    }
}

/// Live particle collection
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Emit the break burst for a cell: outward velocities in [-1, 1) and a
    /// lifetime in [PARTICLE_LIFE_MIN, PARTICLE_LIFE_MAX) ticks
    pub fn spawn_burst<R: Rng>(&mut self, cell: IVec2, color: [f32; 4], rng: &mut R) {
        let origin = cell.as_vec2();
        self.particles.reserve(BREAK_PARTICLES);
        for _ in 0..BREAK_PARTICLES {
            let vel = Vec2::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            );
            self.particles.push(Particle {
                pos: origin,
                vel,
                color,
                life: rng.random_range(PARTICLE_LIFE_MIN..PARTICLE_LIFE_MAX),
            });
        }
    }

    /// Advance every particle by one tick and drop the expired ones
    pub fn step(&mut self) {
        for particle in self.particles.iter_mut() {
            particle.step();
        }
        self.particles.retain(|p| p.life > 0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn particle(life: u32) -> Particle {
        Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            color: [1.0; 4],
            life,
        }
    }

    #[test]
    fn test_lives_exactly_its_life() {
        let mut system = ParticleSystem::new();
        system.push(particle(3));
        system.step();
        system.step();
        assert_eq!(system.len(), 1);
        system.step();
        assert!(system.is_empty());
    }

    #[test]
    fn test_motion_is_damped_and_falls() {
        let mut system = ParticleSystem::new();
        system.push(particle(10));
        system.step();
        let p = system.iter().next().unwrap();
        assert!((p.pos.x - PARTICLE_DAMPING).abs() < 1e-6);
        assert_eq!(p.pos.y, 0.0);
        assert!((p.vel.y - PARTICLE_GRAVITY).abs() < 1e-6);
        assert_eq!(p.life, 9);
    }

    #[test]
    fn test_burst() {
        let mut system = ParticleSystem::new();
        let mut rng = Pcg32::seed_from_u64(4);
        system.spawn_burst(IVec2::new(5, 6), [0.5; 4], &mut rng);
        assert_eq!(system.len(), BREAK_PARTICLES);
        for p in system.iter() {
            assert_eq!(p.pos, Vec2::new(5.0, 6.0));
            assert!((PARTICLE_LIFE_MIN..PARTICLE_LIFE_MAX).contains(&p.life));
            assert!(p.vel.x >= -1.0 && p.vel.x < 1.0);
            assert!(p.vel.y >= -1.0 && p.vel.y < 1.0);
        }
    }
}
