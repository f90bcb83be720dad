//! Per-frame flock update
//!
//! Agents update in index order and in place: agent i sees the positions
//! and velocities agents before it already reached this frame. The scan is
//! O(N²); fine for a few hundred birds, a spatial grid would be needed
//! beyond that.

use glam::Vec3;
use rand::Rng;

use super::state::{Agent, FlockConfig, FlockState};
use crate::spherical_to_cartesian;

/// Advance every agent by one frame
pub fn tick(state: &mut FlockState) {
    for i in 0..state.agents.len() {
        let flocking = flocking_force(i, &state.agents, &state.config);

        let config = &state.config;
        let agent = &mut state.agents[i];
        let wander = wander_force(agent, &mut state.rng, config);
        let boundary = boundary_force(agent.position, config);

        agent.acceleration = flocking + wander + boundary;
        let acceleration = agent.acceleration;
        integrate(agent, acceleration, config);
    }

    state.frames += 1;
}

/// Separation + alignment + cohesion on `agents[index]` from neighbors in
/// the visual radius
fn flocking_force(index: usize, agents: &[Agent], config: &FlockConfig) -> Vec3 {
    let agent = &agents[index];
    let radius_sq = config.visual_radius * config.visual_radius;

    let mut separation = Vec3::ZERO;
    let mut alignment = Vec3::ZERO;
    let mut cohesion = Vec3::ZERO;
    let mut count = 0.0;

    for (j, other) in agents.iter().enumerate() {
        if j == index {
            continue;
        }
        let offset = agent.position - other.position;
        let dist_sq = offset.length_squared();
        // Coincident agents are skipped rather than divided by zero
        if dist_sq >= radius_sq || dist_sq <= config.min_distance_sq {
            continue;
        }
        let dist = dist_sq.sqrt();
        let influence = other.influence(config);

        // Away from the neighbor, stronger when closer
        separation += (offset / dist) * (influence / dist);
        alignment += other.velocity * influence;
        cohesion += other.position * influence;
        count += influence;
    }

    if count <= 0.0 {
        return Vec3::ZERO;
    }

    let alignment_dir = (alignment / count).normalize_or_zero();
    let cohesion_dir = (cohesion / count - agent.position).normalize_or_zero();
    let damped = agent.velocity * config.steer_damping;

    separation * config.separation_weight
        + (alignment_dir - damped) * config.alignment_weight
        + (cohesion_dir - damped) * config.cohesion_weight
}

/// Nudge the wander angles and return the drift force
fn wander_force<R: Rng>(agent: &mut Agent, rng: &mut R, config: &FlockConfig) -> Vec3 {
    agent.wander.x += (rng.random::<f32>() - 0.5) * config.wander_jitter;
    agent.wander.y += (rng.random::<f32>() - 0.5) * config.wander_jitter;
    spherical_to_cartesian(agent.wander.x, agent.wander.y) * config.wander_strength
}

/// Soft spring toward the origin once outside the boundary radius
fn boundary_force(position: Vec3, config: &FlockConfig) -> Vec3 {
    let limit_sq = config.boundary_radius * config.boundary_radius;
    if position.length_squared() > limit_sq {
        -position * config.boundary_pull
    } else {
        Vec3::ZERO
    }
}

/// Euler step with the agent's personal speed cap
pub fn integrate(agent: &mut Agent, acceleration: Vec3, config: &FlockConfig) {
    agent.velocity += acceleration;
    agent.velocity = agent.velocity.clamp_length_max(agent.max_speed(config));
    agent.position += agent.velocity;
}
