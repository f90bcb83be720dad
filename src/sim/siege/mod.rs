//! Falling-word typing defense
//!
//! Words drop from the top; typing them letter by letter destroys them, and
//! letting one reach the baseline costs health.

pub mod render;
pub mod state;
pub mod tick;
pub mod words;

pub use state::{SiegeConfig, SiegePhase, SiegeState, Target};
pub use tick::type_char;

use serde::Serialize;

use super::frame_loop::{Frame, Simulation};
use crate::renderer::DrawSurface;

/// HUD values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SiegeTelemetry {
    pub phase: SiegePhase,
    pub score: u32,
    pub health_percent: f32,
    pub high_score: u32,
    pub new_high_score: bool,
    pub targets: usize,
    pub locked: usize,
}

impl SiegeState {
    pub fn telemetry(&self) -> SiegeTelemetry {
        SiegeTelemetry {
            phase: self.phase,
            score: self.score,
            health_percent: self.health_percent(),
            high_score: self.high_score,
            new_high_score: self.new_high_score,
            targets: self.targets.len(),
            locked: self.locked_count(),
        }
    }
}

impl Simulation for SiegeState {
    /// Characters typed since the previous frame, in order
    type Input = Vec<char>;

    fn tick(&mut self, typed: &Vec<char>, frame: &Frame) {
        tick::tick(self, typed, frame.elapsed_ms, frame.width, frame.height);
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        render::render(self, surface);
    }

    fn is_active(&self) -> bool {
        self.phase != SiegePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::VertexBatch;
    use crate::sim::frame_loop::{FrameLoop, FrameOutcome};

    #[test]
    fn test_unattended_run_ends_and_loop_stops() {
        let config = SiegeConfig {
            max_health: 20,
            ..Default::default()
        };
        let mut lp = FrameLoop::new(SiegeState::playing(3, config, 10));
        let mut batch = VertexBatch::new(800.0, 300.0);

        let mut frames = 0u32;
        while lp.on_frame(frames as f64 * 16.0, &Vec::new(), Some(&mut batch)) == FrameOutcome::Continue {
            frames += 1;
            assert!(frames < 20_000);
        }
        let sim = lp.sim();
        assert_eq!(sim.phase, SiegePhase::GameOver);
        assert_eq!(sim.health, 0);
        assert_eq!(sim.score, 0);
        assert_eq!(sim.high_score, 10);
        assert!(!sim.telemetry().new_high_score);
    }

    #[test]
    fn test_start_phase_waits() {
        let mut lp = FrameLoop::new(SiegeState::new(3, SiegeConfig::default(), 0));
        let mut batch = VertexBatch::new(800.0, 600.0);
        for i in 0..10 {
            lp.on_frame(i as f64 * 16.0, &vec!['a'], Some(&mut batch));
        }
        assert!(lp.sim().targets.is_empty());
        assert_eq!(lp.sim().telemetry().phase, SiegePhase::Start);
    }
}
