//! Per-frame lander update

use glam::Vec2;

use super::state::{LanderConfig, LanderInput, LanderState, LanderStatus, Vessel, consts};
use super::terrain::LandingPad;
use crate::renderer::colors;

/// Outcome of touching ground
pub fn classify(vessel: &Vessel, pad: &LandingPad, config: &LanderConfig) -> LanderStatus {
    let on_pad = pad.contains(vessel.position.x, config.pad_margin);
    let soft = vessel.velocity.y < config.max_descent_speed;
    let upright = vessel.angle.abs() < config.max_tilt;
    if on_pad && soft && upright {
        LanderStatus::Landed
    } else {
        LanderStatus::Destroyed
    }
}

/// More fuel left and less drift score higher
pub fn landing_score(vessel: &Vessel) -> u32 {
    (vessel.fuel * 100.0 + 1000.0 / (vessel.velocity.x.abs() + 1.0)).floor() as u32
}

/// Step one frame on a surface of the given size
pub fn tick(state: &mut LanderState, input: &LanderInput, width: f32, height: f32) {
    state.width = width;
    state.height = height;

    if state.status == LanderStatus::Descending {
        step_vessel(state, input);
        state.frames += 1;
    }

    state.particles.update();
}

fn step_vessel(state: &mut LanderState, input: &LanderInput) {
    let config = &state.config;
    let vessel = &mut state.vessel;

    vessel.angle += config.rotation_speed * input.turn_sign();

    if input.thrust && vessel.fuel > 0.0 {
        let (sin, cos) = vessel.angle.sin_cos();
        vessel.velocity.x += sin * config.thrust_power;
        vessel.velocity.y -= cos * config.thrust_power;
        vessel.fuel = (vessel.fuel - config.fuel_burn).max(0.0);

        let nozzle = vessel.position + Vec2::new(-sin, cos) * config.half_height;
        state.particles.burst(
            &mut state.rng,
            nozzle,
            consts::EXHAUST_PER_FRAME,
            colors::EXHAUST,
            consts::EXHAUST_SPEED,
        );
    }

    vessel.velocity.y += config.gravity;
    vessel.position += vessel.velocity;

    // Screen edges
    if vessel.position.x < 0.0 {
        vessel.position.x = 0.0;
        vessel.velocity.x *= consts::WALL_RESTITUTION;
    }
    if vessel.position.x > state.width {
        vessel.position.x = state.width;
        vessel.velocity.x *= consts::WALL_RESTITUTION;
    }
    if vessel.position.y < 0.0 {
        vessel.position.y = 0.0;
        vessel.velocity.y = 0.0;
    }

    if !state
        .terrain
        .collides(vessel.position, config.half_height, state.height)
    {
        return;
    }

    let status = classify(vessel, &state.terrain.pad, config);
    state.status = status;
    match status {
        LanderStatus::Landed => {
            let score = landing_score(vessel);
            state.score = Some(score);
            log::info!(
                "Touchdown at vx={:.2} vy={:.2}, score {}",
                vessel.velocity.x,
                vessel.velocity.y,
                score
            );
        }
        _ => {
            log::info!(
                "Vessel destroyed at x={:.1} vy={:.2} angle={:.2}",
                vessel.position.x,
                vessel.velocity.y,
                vessel.angle
            );
            state.particles.burst(
                &mut state.rng,
                vessel.position,
                consts::DEBRIS_COUNT,
                colors::DEBRIS,
                consts::DEBRIS_SPEED,
            );
        }
    }
}
