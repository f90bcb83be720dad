//! Gravity lander
//!
//! One rigid body under gravity and thrust over generated terrain. A run
//! moves `Ready -> Descending -> Landed | Destroyed` and only `start` leaves
//! a terminal status.

pub mod render;
pub mod state;
pub mod terrain;
pub mod tick;

pub use state::{LanderConfig, LanderInput, LanderState, LanderStatus, Vessel};
pub use terrain::{LandingPad, Terrain};

use serde::Serialize;

use super::frame_loop::{Frame, Simulation};
use crate::renderer::DrawSurface;

/// HUD values, refreshed every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LanderTelemetry {
    pub status: LanderStatus,
    pub fuel_percent: f32,
    pub vx: f32,
    pub vy: f32,
    pub altitude: f32,
    pub angle: f32,
    pub score: Option<u32>,
    /// Descending faster than the advertised safe speed
    pub descent_warning: bool,
    /// Within the advertised safe tilt
    pub attitude_ok: bool,
}

impl LanderState {
    pub fn telemetry(&self) -> LanderTelemetry {
        let v = self.vessel;
        let fuel_percent = if self.config.initial_fuel > 0.0 {
            (v.fuel / self.config.initial_fuel * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        LanderTelemetry {
            status: self.status,
            fuel_percent,
            vx: v.velocity.x,
            vy: v.velocity.y,
            altitude: self.altitude(),
            angle: v.angle,
            score: self.score,
            descent_warning: v.velocity.y > self.config.safe_landing_speed,
            attitude_ok: v.angle.abs() < self.config.safe_landing_angle,
        }
    }
}

impl Simulation for LanderState {
    type Input = LanderInput;

    fn tick(&mut self, input: &LanderInput, frame: &Frame) {
        tick::tick(self, input, frame.width, frame.height);
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        render::render(self, surface);
    }

    fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::VertexBatch;
    use crate::sim::frame_loop::{FrameLoop, FrameOutcome, LoopStatus, StopReason};

    #[test]
    fn test_loop_stops_after_touchdown() {
        let state = LanderState::launched(17, LanderConfig::default(), 800.0, 600.0);
        let mut lp = FrameLoop::new(state);
        let mut batch = VertexBatch::new(800.0, 600.0);

        let mut frames = 0;
        while lp.on_frame(frames as f64 * 16.0, &LanderInput::default(), Some(&mut batch)) == FrameOutcome::Continue {
            frames += 1;
            assert!(frames < 2000);
        }
        assert_eq!(lp.status(), LoopStatus::Stopped(StopReason::Finished));
        // Free fall from the top never lands softly
        assert_eq!(lp.sim().status, LanderStatus::Destroyed);

        let before = lp.sim().particles.len();
        assert_eq!(lp.on_frame(1e6, &LanderInput::default(), Some(&mut batch)), FrameOutcome::Stop);
        assert_eq!(lp.sim().particles.len(), before);
    }

    #[test]
    fn test_telemetry_flags() {
        let mut state = LanderState::launched(2, LanderConfig::default(), 800.0, 600.0);
        state.vessel.velocity.y = 2.0;
        state.vessel.angle = 0.3;
        state.vessel.fuel = 25.0;
        let t = state.telemetry();
        assert!(t.descent_warning);
        assert!(t.attitude_ok);
        assert_eq!(t.fuel_percent, 25.0);
        assert_eq!(t.status, LanderStatus::Descending);

        let json = serde_json::to_string(&t).expect("serializable");
        assert!(json.contains("\"Descending\""));
    }
}
