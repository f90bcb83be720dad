//! Portfolio Sims - frame-stepped simulations for a portfolio site
//!
//! Core modules:
//! - `sim`: Deterministic simulations (flock, lander, siege, sorting) and the frame loop
//! - `renderer`: Drawing surface abstraction, shape tessellation, WebGPU pipeline
//! - `platform`: Browser glue (keyboard mapping, Canvas2D surface)
//! - `persistence`: LocalStorage helpers
//! - `tuning`: Data-driven simulation balance

pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::Error;
pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::{Vec2, Vec3};

/// Shared frame and effect constants
pub mod consts {
    /// Nominal frame duration used for the first frame after (re)start (ms)
    pub const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest frame delta fed to simulation timers (ms), prevents spiral after tab switches
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;
    /// Consecutive frames without a drawing surface before the loop gives up
    pub const MAX_MISSED_SURFACE_FRAMES: u32 = 120;

    /// Life lost by a transient particle every frame
    pub const PARTICLE_DECAY: f32 = 0.02;
    /// Default cap on live particles per simulation
    pub const MAX_PARTICLES: usize = 500;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Unit vector from the (theta, phi) pair used for wander headings
///
/// theta is measured from +Z, phi around Z starting at +X.
#[inline]
pub fn spherical_to_cartesian(theta: f32, phi: f32) -> Vec3 {
    Vec3::new(
        theta.sin() * phi.cos(),
        theta.sin() * phi.sin(),
        theta.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(2.0, FRAC_PI_2);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_spherical_is_unit() {
        for &(t, p) in &[(0.0, 0.0), (FRAC_PI_2, 0.0), (1.3, 2.1), (PI, PI)] {
            let v = spherical_to_cartesian(t, p);
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
        let up = spherical_to_cartesian(0.0, 1.0);
        assert!((up - Vec3::Z).length() < 1e-6);
    }
}
