//! Drawing surfaces and the WebGPU pipeline
//!
//! Simulations render through [`DrawSurface`], an immediate-mode 2D context in
//! pixel coordinates (origin top-left, y down). Implementations:
//! - [`VertexBatch`]: tessellates into triangles for the wgpu pipeline
//! - `platform::canvas::CanvasSurface`: browser Canvas2D (wasm only)

pub mod batch;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use batch::VertexBatch;
pub use pipeline::RenderState;
pub use vertex::{Rgba, Vertex, colors};

use glam::Vec2;

/// Immediate-mode 2D drawing context
pub trait DrawSurface {
    /// Pixel dimensions (width, height), queried every frame
    fn size(&self) -> (f32, f32);

    /// Fill the whole surface
    fn clear(&mut self, color: Rgba);

    /// Axis-aligned filled rectangle
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba);

    /// Straight line segment
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);

    /// Open polyline through `points`
    fn polyline(&mut self, points: &[Vec2], width: f32, color: Rgba) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], width, color);
        }
    }

    /// Filled simple polygon (may be concave)
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba);

    /// Filled circle
    fn circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Text with its left end of the baseline at `pos`
    fn text(&mut self, pos: Vec2, text: &str, size: f32, color: Rgba);

    /// Advance width of `text` at `size` pixels
    fn measure_text(&self, text: &str, size: f32) -> f32;
}
