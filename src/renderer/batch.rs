//! Vertex batch surface
//!
//! Collects tessellated primitives for one frame; the wgpu pipeline uploads
//! the result. Also serves as the headless surface on native builds.

use glam::Vec2;

use super::shapes;
use super::vertex::{Rgba, Vertex, colors};
use super::DrawSurface;

/// Approximate monospace advance as a fraction of font size
const GLYPH_ADVANCE: f32 = 0.6;

/// A [`DrawSurface`] that records triangles
#[derive(Debug, Clone)]
pub struct VertexBatch {
    width: f32,
    height: f32,
    clear_color: Rgba,
    vertices: Vec<Vertex>,
    /// Text draw calls this frame (text is not tessellated)
    text_calls: usize,
}

impl VertexBatch {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            clear_color: colors::FLOCK_BACKGROUND,
            vertices: Vec::new(),
            text_calls: 0,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn clear_color(&self) -> Rgba {
        self.clear_color
    }

    pub fn text_calls(&self) -> usize {
        self.text_calls
    }
}

impl DrawSurface for VertexBatch {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgba) {
        self.vertices.clear();
        self.text_calls = 0;
        self.clear_color = color;
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.vertices.extend(shapes::rect(origin, size, color));
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.vertices.extend(shapes::line(from, to, width, color));
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        self.vertices.extend(shapes::polygon(points, color));
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        self.vertices.extend(shapes::circle(
            center,
            radius,
            color,
            shapes::circle_segments(radius),
        ));
    }

    fn text(&mut self, _pos: Vec2, _text: &str, _size: f32, _color: Rgba) {
        self.text_calls += 1;
    }

    fn measure_text(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * GLYPH_ADVANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_resets_frame() {
        let mut batch = VertexBatch::new(100.0, 50.0);
        batch.circle(Vec2::new(10.0, 10.0), 4.0, colors::WHITE);
        batch.text(Vec2::ZERO, "hi", 12.0, colors::WHITE);
        assert!(!batch.vertices().is_empty());
        assert_eq!(batch.text_calls(), 1);

        batch.clear(colors::SPACE);
        assert!(batch.vertices().is_empty());
        assert_eq!(batch.text_calls(), 0);
        assert_eq!(batch.clear_color(), colors::SPACE);
        assert_eq!(batch.size(), (100.0, 50.0));
    }

    #[test]
    fn test_measure_text_monospace() {
        let batch = VertexBatch::new(10.0, 10.0);
        assert!((batch.measure_text("const", 20.0) - 60.0).abs() < 1e-4);
        assert_eq!(batch.measure_text("", 20.0), 0.0);
    }
}
