//! Ambient boids background
//!
//! A fixed population of agents steered by separation, alignment and
//! cohesion, with leaders that weigh more and fly faster.

pub mod render;
pub mod state;
pub mod tick;

pub use render::{AgentTransform, BirdInstance};
pub use state::{Agent, FlockConfig, FlockState};

use super::frame_loop::{Frame, Simulation};
use crate::renderer::DrawSurface;

impl Simulation for FlockState {
    type Input = ();

    fn tick(&mut self, _input: &(), _frame: &Frame) {
        tick::tick(self);
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        render::render(self, surface);
    }

    /// The background never finishes on its own
    fn is_active(&self) -> bool {
        true
    }
}
