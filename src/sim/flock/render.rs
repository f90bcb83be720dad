//! Flock orientation and projection
//!
//! Orientation is derived from velocity at render time and never feeds back
//! into the simulation.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Quat, Vec2, Vec3};

use super::state::{Agent, FlockConfig, FlockState};
use crate::renderer::{DrawSurface, Rgba, colors};

/// Camera sits on +Z looking at the origin
pub const CAMERA_Z: f32 = 20.0;
pub const FOV_Y: f32 = std::f32::consts::FRAC_PI_4;
pub const NEAR: f32 = 0.1;
pub const FOG_NEAR: f32 = 10.0;
pub const FOG_FAR: f32 = 40.0;

/// World-space bird dimensions
const BODY_RADIUS: f32 = 0.2;
const WING_SPAN: f32 = 0.9;
const BODY_LENGTH: f32 = 0.6;

/// Position and facing of one agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

/// Per-instance data for instanced drawing
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BirdInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// Rotation that points local +Z along `forward` with +Y as up
fn look_rotation(forward: Vec3) -> Quat {
    let z = forward.normalize_or_zero();
    if z == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let mut x = Vec3::Y.cross(z);
    if x.length_squared() < 1e-8 {
        // Flying straight up or down
        x = Vec3::X;
    }
    let x = x.normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

/// Face along the velocity, then bank by the wander heading
pub fn agent_transform(agent: &Agent, config: &FlockConfig) -> AgentTransform {
    let bank = (agent.wander.x - std::f32::consts::PI) * config.bank_factor;
    AgentTransform {
        position: agent.position,
        rotation: look_rotation(agent.velocity) * Quat::from_rotation_z(bank),
    }
}

pub fn agent_color(agent: &Agent) -> Rgba {
    if agent.leader {
        colors::FLOCK_LEADER
    } else {
        colors::FLOCK_FOLLOWER
    }
}

/// Transforms for every agent, in agent order
pub fn transforms(state: &FlockState) -> Vec<AgentTransform> {
    state
        .agents
        .iter()
        .map(|a| agent_transform(a, &state.config))
        .collect()
}

/// Instance buffer contents for the whole flock
pub fn instances(state: &FlockState) -> Vec<BirdInstance> {
    state
        .agents
        .iter()
        .map(|a| {
            let t = agent_transform(a, &state.config);
            BirdInstance {
                model: Mat4::from_rotation_translation(t.rotation, t.position).to_cols_array_2d(),
                color: agent_color(a),
            }
        })
        .collect()
}

/// Pinhole projection into pixel space
#[derive(Debug, Clone, Copy)]
struct Camera {
    focal: f32,
    half: Vec2,
}

impl Camera {
    fn new(width: f32, height: f32) -> Self {
        Self {
            focal: 1.0 / (FOV_Y * 0.5).tan(),
            half: Vec2::new(width, height) * 0.5,
        }
    }

    /// Screen position and pixels-per-unit at that depth, None behind the camera
    fn project(&self, p: Vec3) -> Option<(Vec2, f32)> {
        let depth = CAMERA_Z - p.z;
        if depth <= NEAR {
            return None;
        }
        let scale = self.focal / depth * self.half.y;
        let screen = Vec2::new(self.half.x + p.x * scale, self.half.y - p.y * scale);
        Some((screen, scale))
    }
}

/// Linear fog: 1 before FOG_NEAR, 0 past FOG_FAR
pub fn fog_factor(depth: f32) -> f32 {
    1.0 - ((depth - FOG_NEAR) / (FOG_FAR - FOG_NEAR)).clamp(0.0, 1.0)
}

/// Draw the flock far to near on a 2D surface
pub fn render(state: &FlockState, surface: &mut dyn DrawSurface) {
    let (width, height) = surface.size();
    surface.clear(colors::FLOCK_BACKGROUND);
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    let camera = Camera::new(width, height);

    let mut order: Vec<(f32, usize)> = state
        .agents
        .iter()
        .enumerate()
        .map(|(i, a)| (CAMERA_Z - a.position.z, i))
        .collect();
    order.sort_by(|a, b| b.0.total_cmp(&a.0));

    for (depth, i) in order {
        let agent = &state.agents[i];
        let Some((center, scale)) = camera.project(agent.position) else {
            continue;
        };
        let fog = fog_factor(depth);
        if fog <= 0.0 {
            continue;
        }
        let t = agent_transform(agent, &state.config);
        let color = colors::with_alpha(agent_color(agent), fog);

        let right = t.rotation * Vec3::X * (WING_SPAN * 0.5);
        let nose = t.rotation * Vec3::Z * (BODY_LENGTH * 0.5);
        if let (Some((left_tip, _)), Some((right_tip, _))) = (
            camera.project(t.position - right),
            camera.project(t.position + right),
        ) {
            surface.line(left_tip, right_tip, (scale * 0.08).max(1.0), color);
        }
        if let Some((beak, _)) = camera.project(t.position + nose) {
            surface.line(center, beak, (scale * 0.1).max(1.0), color);
        }
        surface.circle(center, (BODY_RADIUS * scale).max(1.0), color);
    }
}
