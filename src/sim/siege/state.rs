//! Siege state: targets, health, score and tuning

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::renderer::Rgba;
use crate::sim::particles::ParticleSystem;

/// Siege constants (ms, pixels per frame)
pub mod consts {
    pub const INITIAL_SPAWN_INTERVAL_MS: f64 = 2000.0;
    pub const MIN_SPAWN_INTERVAL_MS: f64 = 500.0;
    /// Interval shrinks by score / this
    pub const SPAWN_INTERVAL_SCORE_DIVISOR: f64 = 10.0;

    pub const BASE_SPEED: f32 = 0.5;
    /// Speed grows by score / this, fixed at spawn
    pub const SPEED_SCORE_DIVISOR: f32 = 5000.0;

    /// Horizontal padding for spawn positions
    pub const SPAWN_MARGIN_X: f32 = 50.0;
    pub const SPAWN_Y: f32 = -50.0;
    /// Targets below `height - BASELINE_MARGIN` hit the player
    pub const BASELINE_MARGIN: f32 = 50.0;

    pub const MAX_HEALTH: i32 = 100;
    pub const HEALTH_PENALTY: i32 = 10;
    pub const POINTS_PER_LETTER: u32 = 10;

    pub const BURST_PARTICLES: usize = 8;
    pub const BURST_SPREAD: f32 = 5.0;

    pub const FONT_SIZE: f32 = 20.0;
}

/// Data-driven siege tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiegeConfig {
    pub initial_spawn_interval_ms: f64,
    pub min_spawn_interval_ms: f64,
    pub base_speed: f32,
    pub max_health: i32,
    pub health_penalty: i32,
    pub points_per_letter: u32,
    pub baseline_margin: f32,
    pub max_particles: usize,
}

impl Default for SiegeConfig {
    fn default() -> Self {
        use consts::*;
        Self {
            initial_spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            base_speed: BASE_SPEED,
            max_health: MAX_HEALTH,
            health_penalty: HEALTH_PENALTY,
            points_per_letter: POINTS_PER_LETTER,
            baseline_margin: BASELINE_MARGIN,
            max_particles: crate::consts::MAX_PARTICLES,
        }
    }
}

impl SiegeConfig {
    /// Spawn interval after reaching `score`
    pub fn spawn_interval_ms(&self, score: u32) -> f64 {
        let shrink = f64::from(score) / consts::SPAWN_INTERVAL_SCORE_DIVISOR;
        (self.initial_spawn_interval_ms - shrink).max(self.min_spawn_interval_ms)
    }

    /// Fall speed for a target spawned at `score`
    pub fn target_speed(&self, score: u32) -> f32 {
        self.base_speed + score as f32 / consts::SPEED_SCORE_DIVISOR
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiegePhase {
    Start,
    Playing,
    GameOver,
}

/// A falling word
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub id: u32,
    pub word: String,
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub color: Rgba,
    /// Leading characters typed so far; only grows
    pub matched: usize,
}

impl Target {
    pub fn is_locked(&self) -> bool {
        self.matched > 0
    }

    /// Next character the player must type, None once complete
    pub fn next_char(&self) -> Option<char> {
        self.word
            .chars()
            .nth(self.matched)
            .map(|c| c.to_ascii_lowercase())
    }

    pub fn is_complete(&self) -> bool {
        self.matched >= self.word.chars().count()
    }

    pub fn points(&self, per_letter: u32) -> u32 {
        self.word.chars().count() as u32 * per_letter
    }
}

/// Everything one siege run owns
#[derive(Debug, Clone)]
pub struct SiegeState {
    pub config: SiegeConfig,
    pub phase: SiegePhase,
    pub targets: Vec<Target>,
    pub particles: ParticleSystem,
    pub score: u32,
    /// Clamped to [0, max_health]
    pub health: i32,
    /// Best score seen so far, carried across runs
    pub high_score: u32,
    /// Set when a finished run beat the previous best
    pub new_high_score: bool,
    /// Simulation time of the last spawn, None before the first
    pub last_spawn_ms: Option<f64>,
    pub spawn_interval_ms: f64,
    pub(crate) next_id: u32,
    pub(crate) rng: Pcg32,
}

impl SiegeState {
    /// Waiting on the start screen
    pub fn new(seed: u64, config: SiegeConfig, high_score: u32) -> Self {
        Self::fresh(Pcg32::seed_from_u64(seed), config, high_score)
    }

    fn fresh(rng: Pcg32, config: SiegeConfig, high_score: u32) -> Self {
        Self {
            phase: SiegePhase::Start,
            targets: Vec::new(),
            particles: ParticleSystem::new(config.max_particles),
            score: 0,
            health: config.max_health,
            high_score,
            new_high_score: false,
            last_spawn_ms: None,
            spawn_interval_ms: config.initial_spawn_interval_ms,
            next_id: 0,
            rng,
            config,
        }
    }

    /// Begin a new run; score, health and targets are replaced, the best
    /// score is kept
    pub fn start(&mut self) {
        let mut next = Self::fresh(self.rng.clone(), self.config.clone(), self.high_score);
        next.phase = SiegePhase::Playing;
        log::info!("Siege started (best {})", next.high_score);
        *self = next;
    }

    /// A run already in progress
    pub fn playing(seed: u64, config: SiegeConfig, high_score: u32) -> Self {
        let mut state = Self::new(seed, config, high_score);
        state.start();
        state
    }

    pub fn locked_count(&self) -> usize {
        self.targets.iter().filter(|t| t.is_locked()).count()
    }

    pub fn health_percent(&self) -> f32 {
        if self.config.max_health <= 0 {
            return 0.0;
        }
        self.health as f32 / self.config.max_health as f32 * 100.0
    }
}
