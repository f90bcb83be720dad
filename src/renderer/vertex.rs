//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Linear RGBA color, components in 0..=1
pub type Rgba = [f32; 4];

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Rgba) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Site palette and per-widget colors
pub mod colors {
    use super::Rgba;

    /// Build a color from a 0xRRGGBB literal
    pub const fn hex(rgb: u32) -> Rgba {
        [
            ((rgb >> 16) & 0xFF) as f32 / 255.0,
            ((rgb >> 8) & 0xFF) as f32 / 255.0,
            (rgb & 0xFF) as f32 / 255.0,
            1.0,
        ]
    }

    /// Same color with a replaced alpha
    pub const fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
        [color[0], color[1], color[2], alpha]
    }

    pub const PRIMARY: Rgba = hex(0xE84A5F);
    pub const ACCENT: Rgba = hex(0x99B898);
    pub const SECONDARY: Rgba = hex(0xFECEAB);
    pub const SECONDARY_DARK: Rgba = hex(0xFF847C);
    pub const BACKGROUND_DARK: Rgba = hex(0x2A363B);
    pub const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];

    pub const FLOCK_LEADER: Rgba = hex(0xFFD700); // Gold
    pub const FLOCK_FOLLOWER: Rgba = PRIMARY;
    pub const FLOCK_BACKGROUND: Rgba = [0.0, 0.0, 0.0, 1.0];

    pub const SPACE: Rgba = hex(0x0B1015);
    pub const SHIP: Rgba = WHITE;
    pub const SHIP_LEGS: Rgba = hex(0x999999);
    pub const EXHAUST: Rgba = hex(0xFFA500);
    pub const DEBRIS: Rgba = hex(0xFF4444);

    pub const SIEGE_BACKGROUND: Rgba = hex(0x111111);
    pub const SIEGE_GRID: Rgba = hex(0x222222);

    pub const BAR_IDLE: Rgba = [1.0, 1.0, 1.0, 0.1];
}
