//! Browser glue
//!
//! - `input`: keyboard code/key mapping for the lander, siege and the konami hook
//! - `canvas`: Canvas2D [`DrawSurface`](crate::renderer::DrawSurface) (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod input;

pub use input::{KeyState, SequenceDetector, lander_captures, siege_char};
