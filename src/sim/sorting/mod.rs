//! Sorting visualizer
//!
//! Algorithms compile to a script of compare/swap/overwrite steps which the
//! player replays over the bars a few steps per frame.

pub mod algorithms;
pub mod render;
pub mod state;

pub use algorithms::{Algorithm, AnimationStep};
pub use state::{Highlight, HighlightKind, SortConfig, SortPhase, SortState};

use serde::Serialize;

use super::frame_loop::{Frame, Simulation};
use crate::renderer::DrawSurface;

/// Panel values next to the bars
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortTelemetry {
    pub algorithm: Algorithm,
    pub name: &'static str,
    pub complexity: &'static str,
    pub phase: SortPhase,
    pub comparisons: u64,
    pub accesses: u64,
    pub active_line: Option<usize>,
    pub progress: f32,
}

impl SortState {
    pub fn telemetry(&self) -> SortTelemetry {
        SortTelemetry {
            algorithm: self.algorithm,
            name: self.algorithm.name(),
            complexity: self.algorithm.complexity(),
            phase: self.phase,
            comparisons: self.comparisons,
            accesses: self.accesses,
            active_line: self.active_line,
            progress: self.progress(),
        }
    }
}

/// Host commands applied at the start of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCommand {
    Run,
    Reset,
    Select(Algorithm),
}

impl Simulation for SortState {
    type Input = Option<SortCommand>;

    fn tick(&mut self, command: &Option<SortCommand>, _frame: &Frame) {
        match *command {
            Some(SortCommand::Run) => {
                self.run();
            }
            Some(SortCommand::Reset) => self.reset(),
            Some(SortCommand::Select(algorithm)) => {
                self.select(algorithm);
            }
            None => {}
        }
        self.step();
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        render::render(self, surface);
    }

    /// The widget stays on screen between runs
    fn is_active(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::VertexBatch;
    use crate::sim::frame_loop::FrameLoop;

    #[test]
    fn test_commands_through_frame_loop() {
        let config = SortConfig {
            steps_per_frame: 50,
            ..Default::default()
        };
        let mut lp = FrameLoop::new(SortState::new(4, config));
        let mut batch = VertexBatch::new(800.0, 500.0);

        lp.on_frame(0.0, &Some(SortCommand::Select(Algorithm::Heap)), Some(&mut batch));
        assert_eq!(lp.sim().algorithm, Algorithm::Heap);

        lp.on_frame(16.0, &Some(SortCommand::Run), Some(&mut batch));
        assert_eq!(lp.sim().phase, SortPhase::Sorting);
        // Selecting mid-run is refused
        lp.on_frame(32.0, &Some(SortCommand::Select(Algorithm::Bubble)), Some(&mut batch));
        assert_eq!(lp.sim().algorithm, Algorithm::Heap);

        let mut t = 48.0;
        while lp.sim().phase == SortPhase::Sorting {
            lp.on_frame(t, &None, Some(&mut batch));
            t += 16.0;
        }
        let telemetry = lp.sim().telemetry();
        assert_eq!(telemetry.phase, SortPhase::Finishing);
        assert_eq!(telemetry.progress, 1.0);
        assert!(telemetry.comparisons > 0);

        lp.on_frame(t, &Some(SortCommand::Reset), Some(&mut batch));
        assert_eq!(lp.sim().phase, SortPhase::Idle);
        assert_eq!(lp.sim().comparisons, 0);
    }
}
