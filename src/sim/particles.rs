//! Transient cosmetic particles
//!
//! Bursts spawned on thrust, impact and destruction. Not gameplay-affecting,
//! but decay is fixed per frame so runs stay reproducible.

use glam::Vec2;
use rand::Rng;

use crate::consts::PARTICLE_DECAY;
use crate::polar_to_cartesian;
use crate::renderer::{DrawSurface, Rgba, colors};

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at spawn, removed once it reaches 0
    pub life: f32,
    pub color: Rgba,
}

/// Bounded particle pool owned by one simulation
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    cap: usize,
}

impl ParticleSystem {
    pub fn new(cap: usize) -> Self {
        Self {
            particles: Vec::new(),
            cap,
        }
    }

    /// Spawn `count` particles flying out in random directions
    /// with speeds uniform in [0, max_speed)
    pub fn burst<R: Rng>(&mut self, rng: &mut R, origin: Vec2, count: usize, color: Rgba, max_speed: f32) {
        for _ in 0..count {
            let angle = rng.random::<f32>() * std::f32::consts::TAU;
            let speed = rng.random::<f32>() * max_speed;
            self.push(Particle {
                pos: origin,
                vel: polar_to_cartesian(speed, angle),
                life: 1.0,
                color,
            });
        }
    }

    /// Spawn `count` particles with each velocity component uniform in
    /// [-spread/2, spread/2)
    pub fn scatter<R: Rng>(&mut self, rng: &mut R, origin: Vec2, count: usize, color: Rgba, spread: f32) {
        for _ in 0..count {
            let vel = Vec2::new(
                (rng.random::<f32>() - 0.5) * spread,
                (rng.random::<f32>() - 0.5) * spread,
            );
            self.push(Particle {
                pos: origin,
                vel,
                life: 1.0,
                color,
            });
        }
    }

    fn push(&mut self, particle: Particle) {
        if self.particles.len() < self.cap {
            self.particles.push(particle);
        }
    }

    /// Move and age every particle by one frame, dropping dead ones
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.life -= PARTICLE_DECAY;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    /// Draw as fading dots
    pub fn render(&self, surface: &mut dyn DrawSurface, radius: f32) {
        for p in &self.particles {
            surface.circle(p.pos, radius, colors::with_alpha(p.color, p.life.clamp(0.0, 1.0)));
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_particles_expire_after_fixed_frames() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut system = ParticleSystem::new(64);
        system.burst(&mut rng, Vec2::new(10.0, 10.0), 8, colors::DEBRIS, 5.0);
        assert_eq!(system.len(), 8);

        // 1.0 / 0.02 = 50 frames; f32 accumulation leaves a sliver after the 50th
        for _ in 0..50 {
            system.update();
        }
        assert_eq!(system.len(), 8);
        system.update();
        assert!(system.is_empty());
    }

    #[test]
    fn test_burst_speed_bounded() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut system = ParticleSystem::new(100);
        system.burst(&mut rng, Vec2::ZERO, 50, colors::EXHAUST, 2.0);
        assert!(system.iter().all(|p| p.vel.length() < 2.0 + 1e-5));
    }

    #[test]
    fn test_scatter_is_reproducible() {
        let run = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut system = ParticleSystem::new(16);
            system.scatter(&mut rng, Vec2::ONE, 8, colors::PRIMARY, 5.0);
            system.update();
            system.iter().map(|p| p.pos).collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
        assert!(run(42).iter().all(|p| (p.x - 1.0).abs() <= 2.5 && (p.y - 1.0).abs() <= 2.5));
    }

    #[test]
    fn test_cap_respected() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut system = ParticleSystem::new(10);
        system.burst(&mut rng, Vec2::ZERO, 50, colors::DEBRIS, 5.0);
        assert_eq!(system.len(), 10);
    }
}
