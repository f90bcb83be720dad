//! Flock state: agents, traits and tuning

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Flocking constants
pub mod consts {
    pub const POPULATION: usize = 150;
    pub const VISUAL_RADIUS: f32 = 5.0;
    pub const BASE_SPEED: f32 = 0.08;
    /// Share of agents drawn as leaders
    pub const LEADER_FRACTION: f32 = 0.05;
    /// Weight of a leader neighbor in every accumulation
    pub const LEADER_INFLUENCE: f32 = 2.5;
    /// Leaders fly this much faster
    pub const LEADER_SPEED_BOOST: f32 = 1.2;

    pub const SEPARATION_WEIGHT: f32 = 1.5;
    pub const ALIGNMENT_WEIGHT: f32 = 1.2;
    pub const COHESION_WEIGHT: f32 = 1.0;
    /// Share of current velocity subtracted from each steering direction
    pub const STEER_DAMPING: f32 = 0.5;

    pub const WANDER_STRENGTH: f32 = 0.5;
    /// Max per-frame change of each wander angle
    pub const WANDER_JITTER: f32 = 0.1;

    /// Beyond this distance from the origin agents are pulled back
    pub const BOUNDARY_RADIUS: f32 = 20.0;
    pub const BOUNDARY_PULL: f32 = 0.0001;

    /// Neighbors closer than this (squared) are ignored
    pub const MIN_DISTANCE_SQ: f32 = 0.001;
    /// Roll applied per radian of wander theta away from PI
    pub const BANK_FACTOR: f32 = 0.2;
}

/// Data-driven flock tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockConfig {
    pub population: usize,
    pub visual_radius: f32,
    pub base_speed: f32,
    pub leader_fraction: f32,
    pub leader_influence: f32,
    pub leader_speed_boost: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub steer_damping: f32,
    pub wander_strength: f32,
    pub wander_jitter: f32,
    pub boundary_radius: f32,
    pub boundary_pull: f32,
    pub min_distance_sq: f32,
    pub bank_factor: f32,
    /// Full extent of the initial spawn box, centered on the origin
    pub spawn_extent: Vec3,
}

impl Default for FlockConfig {
    fn default() -> Self {
        use consts::*;
        Self {
            population: POPULATION,
            visual_radius: VISUAL_RADIUS,
            base_speed: BASE_SPEED,
            leader_fraction: LEADER_FRACTION,
            leader_influence: LEADER_INFLUENCE,
            leader_speed_boost: LEADER_SPEED_BOOST,
            separation_weight: SEPARATION_WEIGHT,
            alignment_weight: ALIGNMENT_WEIGHT,
            cohesion_weight: COHESION_WEIGHT,
            steer_damping: STEER_DAMPING,
            wander_strength: WANDER_STRENGTH,
            wander_jitter: WANDER_JITTER,
            boundary_radius: BOUNDARY_RADIUS,
            boundary_pull: BOUNDARY_PULL,
            min_distance_sq: MIN_DISTANCE_SQ,
            bank_factor: BANK_FACTOR,
            spawn_extent: Vec3::new(20.0, 10.0, 10.0),
        }
    }
}

/// One bird
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Reset at the start of every step
    pub acceleration: Vec3,
    /// Personal speed limit factor in [0.8, 1.2], fixed at creation
    pub speed_multiplier: f32,
    pub leader: bool,
    /// Persistent (theta, phi) heading drift
    pub wander: Vec2,
}

impl Agent {
    /// Agent at rest with neutral traits
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec3::ZERO,
            speed_multiplier: 1.0,
            leader: false,
            wander: Vec2::new(std::f32::consts::PI, 0.0),
        }
    }

    /// Random agent inside the spawn box
    pub fn random<R: Rng>(rng: &mut R, config: &FlockConfig) -> Self {
        let mut centered = || rng.random::<f32>() - 0.5;
        let position = Vec3::new(centered(), centered(), centered()) * config.spawn_extent;
        let velocity = Vec3::new(centered(), centered(), centered()) * config.base_speed;

        Self {
            position,
            velocity,
            acceleration: Vec3::ZERO,
            speed_multiplier: 0.8 + rng.random::<f32>() * 0.4,
            leader: rng.random::<f32>() < config.leader_fraction,
            wander: Vec2::new(
                rng.random::<f32>() * std::f32::consts::TAU,
                rng.random::<f32>() * std::f32::consts::PI,
            ),
        }
    }

    /// Velocity magnitude cap for this agent
    pub fn max_speed(&self, config: &FlockConfig) -> f32 {
        let boost = if self.leader {
            config.leader_speed_boost
        } else {
            1.0
        };
        config.base_speed * self.speed_multiplier * boost
    }

    /// Neighbor weight this agent carries
    pub fn influence(&self, config: &FlockConfig) -> f32 {
        if self.leader {
            config.leader_influence
        } else {
            1.0
        }
    }
}

/// Complete flock state (fixed population)
#[derive(Debug, Clone)]
pub struct FlockState {
    pub config: FlockConfig,
    pub agents: Vec<Agent>,
    /// Frames stepped
    pub frames: u64,
    /// Seed the run was created with
    pub seed: u64,
    pub(crate) rng: Pcg32,
}

impl FlockState {
    /// Spawn `config.population` random agents
    pub fn new(seed: u64, config: FlockConfig) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let agents = (0..config.population)
            .map(|_| Agent::random(&mut rng, &config))
            .collect::<Vec<_>>();

        let leaders = agents.iter().filter(|a| a.leader).count();
        log::info!(
            "Flock spawned: {} agents ({} leaders), seed {}",
            agents.len(),
            leaders,
            seed
        );

        Self {
            config,
            agents,
            frames: 0,
            seed,
            rng,
        }
    }

    /// Flock from explicit agents; the rng only drives wander
    pub fn with_agents(seed: u64, config: FlockConfig, agents: Vec<Agent>) -> Self {
        Self {
            config,
            agents,
            frames: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn leader_count(&self) -> usize {
        self.agents.iter().filter(|a| a.leader).count()
    }
}
