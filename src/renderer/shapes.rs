//! Shape tessellation for 2D primitives
//!
//! Everything is emitted as a triangle list.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Rgba, Vertex};

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Rgba, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Segment count that keeps small circles cheap and large ones round
pub fn circle_segments(radius: f32) -> u32 {
    ((radius * 1.5) as u32).clamp(6, 48)
}

/// Axis-aligned rectangle as two triangles
pub fn rect(origin: Vec2, size: Vec2, color: Rgba) -> Vec<Vertex> {
    let a = origin;
    let b = origin + Vec2::new(size.x, 0.0);
    let c = origin + size;
    let d = origin + Vec2::new(0.0, size.y);
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(a.x, a.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Thick line segment as a quad; degenerate segments produce nothing
pub fn line(from: Vec2, to: Vec2, width: f32, color: Rgba) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let v1a = from + perp;
    let v1b = from - perp;
    let v2a = to + perp;
    let v2b = to - perp;

    vec![
        Vertex::new(v1a.x, v1a.y, color),
        Vertex::new(v1b.x, v1b.y, color),
        Vertex::new(v2a.x, v2a.y, color),
        Vertex::new(v2a.x, v2a.y, color),
        Vertex::new(v1b.x, v1b.y, color),
        Vertex::new(v2b.x, v2b.y, color),
    ]
}

/// Filled simple polygon via ear clipping
///
/// Handles concave outlines such as terrain profiles. Collinear and
/// duplicate points are tolerated; self-intersecting input falls back to a
/// fan over whatever ears remain.
pub fn polygon(points: &[Vec2], color: Rgba) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }

    let mut indices: Vec<usize> = (0..points.len()).collect();
    // Work counter-clockwise in math orientation
    if signed_area(points) < 0.0 {
        indices.reverse();
    }

    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    let mut guard = 0;

    while indices.len() > 3 && guard < points.len() * points.len() {
        guard += 1;
        let n = indices.len();
        let mut clipped = false;

        for i in 0..n {
            let prev = points[indices[(i + n - 1) % n]];
            let cur = points[indices[i]];
            let next = points[indices[(i + 1) % n]];

            if cross(prev, cur, next) <= 0.0 {
                continue; // Reflex or collinear
            }
            let contains_other = indices.iter().any(|&k| {
                let p = points[k];
                p != prev && p != cur && p != next && in_triangle(p, prev, cur, next)
            });
            if contains_other {
                continue;
            }

            push_triangle(&mut vertices, prev, cur, next, color);
            indices.remove(i);
            clipped = true;
            break;
        }

        if !clipped {
            // Degenerate remainder: drop a collinear point and keep going
            indices.remove(0);
        }
    }

    if indices.len() == 3 {
        let (a, b, c) = (points[indices[0]], points[indices[1]], points[indices[2]]);
        if cross(a, b, c).abs() > f32::EPSILON {
            push_triangle(&mut vertices, a, b, c, color);
        }
    }

    vertices
}

fn push_triangle(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: Rgba) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f32>()
        / 2.0
}

#[inline]
fn cross(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - b)
}

fn in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = (b - a).perp_dot(p - a);
    let d2 = (c - b).perp_dot(p - b);
    let d3 = (a - c).perp_dot(p - c);
    d1 >= 0.0 && d2 >= 0.0 && d3 >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_area_sum(vertices: &[Vertex]) -> f32 {
        vertices
            .chunks(3)
            .map(|t| {
                let a = Vec2::from(t[0].position);
                let b = Vec2::from(t[1].position);
                let c = Vec2::from(t[2].position);
                ((b - a).perp_dot(c - a) / 2.0).abs()
            })
            .sum()
    }

    #[test]
    fn test_rect_area() {
        let v = rect(Vec2::new(10.0, 10.0), Vec2::new(4.0, 3.0), [1.0; 4]);
        assert_eq!(v.len(), 6);
        assert!((triangle_area_sum(&v) - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_line_degenerate() {
        assert!(line(Vec2::ONE, Vec2::ONE, 2.0, [1.0; 4]).is_empty());
        let v = line(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0, [1.0; 4]);
        assert!((triangle_area_sum(&v) - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_concave_polygon_area() {
        // Terrain-like profile with a dip, closed along the bottom (y down)
        let pts = [
            Vec2::new(0.0, 5.0),
            Vec2::new(2.0, 8.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(6.0, 6.0),
            Vec2::new(6.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        let v = polygon(&pts, [1.0; 4]);
        assert_eq!(v.len() % 3, 0);
        assert!((triangle_area_sum(&v) - signed_area(&pts).abs()).abs() < 1e-3);
    }

    #[test]
    fn test_polygon_too_small() {
        assert!(polygon(&[Vec2::ZERO, Vec2::ONE], [1.0; 4]).is_empty());
    }
}
