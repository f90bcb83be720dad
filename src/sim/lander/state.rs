//! Lander state: vessel, terrain, status and tuning

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::terrain::Terrain;
use crate::sim::particles::ParticleSystem;

/// Lander constants (pixels and frames, y down)
pub mod consts {
    pub const GRAVITY: f32 = 0.05;
    pub const THRUST_POWER: f32 = 0.12;
    /// Radians per frame while a turn key is held
    pub const ROTATION_SPEED: f32 = 0.05;
    pub const FUEL_BURN: f32 = 0.2;
    pub const INITIAL_FUEL: f32 = 100.0;

    /// Distance from the vessel center to its feet
    pub const HALF_HEIGHT: f32 = 15.0;
    /// Pad slack on each side
    pub const PAD_MARGIN: f32 = 10.0;
    pub const SPAWN_Y: f32 = 50.0;
    pub const WALL_RESTITUTION: f32 = -0.5;
    pub const TERRAIN_SEGMENTS: usize = 10;

    /// Touchdown limits that decide the outcome
    pub const MAX_DESCENT_SPEED: f32 = 3.0;
    pub const MAX_TILT: f32 = 0.8;
    /// Stricter limits shown as HUD warnings
    pub const SAFE_LANDING_SPEED: f32 = 1.5;
    pub const SAFE_LANDING_ANGLE: f32 = 0.5;

    pub const EXHAUST_PER_FRAME: usize = 2;
    pub const EXHAUST_SPEED: f32 = 2.0;
    pub const DEBRIS_COUNT: usize = 50;
    pub const DEBRIS_SPEED: f32 = 5.0;
    pub const STAR_COUNT: usize = 50;
}

/// Data-driven lander tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanderConfig {
    pub gravity: f32,
    pub thrust_power: f32,
    pub rotation_speed: f32,
    pub fuel_burn: f32,
    pub initial_fuel: f32,
    pub half_height: f32,
    pub pad_margin: f32,
    pub max_descent_speed: f32,
    pub max_tilt: f32,
    pub safe_landing_speed: f32,
    pub safe_landing_angle: f32,
    pub terrain_segments: usize,
    pub star_count: usize,
    pub max_particles: usize,
}

impl Default for LanderConfig {
    fn default() -> Self {
        use consts::*;
        Self {
            gravity: GRAVITY,
            thrust_power: THRUST_POWER,
            rotation_speed: ROTATION_SPEED,
            fuel_burn: FUEL_BURN,
            initial_fuel: INITIAL_FUEL,
            half_height: HALF_HEIGHT,
            pad_margin: PAD_MARGIN,
            max_descent_speed: MAX_DESCENT_SPEED,
            max_tilt: MAX_TILT,
            safe_landing_speed: SAFE_LANDING_SPEED,
            safe_landing_angle: SAFE_LANDING_ANGLE,
            terrain_segments: TERRAIN_SEGMENTS,
            star_count: STAR_COUNT,
            max_particles: crate::consts::MAX_PARTICLES,
        }
    }
}

/// Held keys for one frame; `Default` is everything released
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LanderInput {
    pub thrust: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
}

impl LanderInput {
    /// -1 left, +1 right, 0 for neither or both
    pub fn turn_sign(&self) -> f32 {
        match (self.rotate_left, self.rotate_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanderStatus {
    Ready,
    Descending,
    Landed,
    Destroyed,
}

impl LanderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Landed | Self::Destroyed)
    }
}

/// The rigid body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vessel {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Radians, 0 is upright, positive tilts right
    pub angle: f32,
    pub fuel: f32,
}

/// Background star, cosmetic only
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec2,
    pub size: f32,
    pub brightness: f32,
}

/// Everything one lander run owns; `start` swaps it all at once
#[derive(Debug, Clone)]
pub struct LanderState {
    pub config: LanderConfig,
    pub status: LanderStatus,
    pub vessel: Vessel,
    pub terrain: Terrain,
    pub stars: Vec<Star>,
    pub particles: ParticleSystem,
    /// Set once on a successful landing
    pub score: Option<u32>,
    /// Surface size of the latest frame
    pub width: f32,
    pub height: f32,
    /// Frames stepped while descending
    pub frames: u64,
    pub(crate) rng: Pcg32,
}

impl LanderState {
    /// Idle state waiting for `start`
    pub fn new(seed: u64, config: LanderConfig) -> Self {
        Self::ready(Pcg32::seed_from_u64(seed), config)
    }

    fn ready(rng: Pcg32, config: LanderConfig) -> Self {
        Self {
            vessel: Vessel {
                position: Vec2::new(0.0, consts::SPAWN_Y),
                velocity: Vec2::ZERO,
                angle: 0.0,
                fuel: config.initial_fuel,
            },
            status: LanderStatus::Ready,
            terrain: Terrain::default(),
            stars: Vec::new(),
            particles: ParticleSystem::new(config.max_particles),
            score: None,
            width: 0.0,
            height: 0.0,
            frames: 0,
            rng,
            config,
        }
    }

    /// Fresh terrain, stars and vessel at (width/2, 50), status Descending.
    ///
    /// Valid from any status; the previous run is discarded whole. A surface
    /// with no area leaves the state untouched.
    pub fn start(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) {
            log::warn!("Lander not launched: surface is {width}x{height}");
            return;
        }
        let mut next = Self::ready(self.rng.clone(), self.config.clone());
        next.terrain = Terrain::generate(&mut next.rng, width, height, next.config.terrain_segments);
        next.stars = (0..next.config.star_count)
            .map(|_| Star {
                position: Vec2::new(next.rng.random::<f32>() * width, next.rng.random::<f32>() * height),
                size: next.rng.random::<f32>() * 2.0,
                brightness: next.rng.random::<f32>(),
            })
            .collect();
        next.vessel.position = Vec2::new(width / 2.0, consts::SPAWN_Y);
        next.width = width;
        next.height = height;
        next.status = LanderStatus::Descending;

        log::info!("Lander launched on {width}x{height}");
        *self = next;
    }

    /// Convenience: a state already started
    pub fn launched(seed: u64, config: LanderConfig, width: f32, height: f32) -> Self {
        let mut state = Self::new(seed, config);
        state.start(width, height);
        state
    }

    /// Height above the bottom of the surface
    pub fn altitude(&self) -> f32 {
        (self.height - self.vessel.position.y).max(0.0)
    }
}
