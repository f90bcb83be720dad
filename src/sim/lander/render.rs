//! Lander drawing

use glam::Vec2;

use super::state::{LanderState, LanderStatus};
use crate::renderer::{DrawSurface, colors};

/// Hull outline in ship space, nose up
const HULL: [Vec2; 4] = [
    Vec2::new(0.0, -15.0),
    Vec2::new(10.0, 10.0),
    Vec2::new(0.0, 5.0),
    Vec2::new(-10.0, 10.0),
];
/// Leg segments (hip, foot) in ship space
const LEGS: [(Vec2, Vec2); 2] = [
    (Vec2::new(-10.0, 10.0), Vec2::new(-12.0, 18.0)),
    (Vec2::new(10.0, 10.0), Vec2::new(12.0, 18.0)),
];
const PAD_MARKER_HEIGHT: f32 = 40.0;

pub fn render(state: &LanderState, surface: &mut dyn DrawSurface) {
    surface.clear(colors::SPACE);

    for star in &state.stars {
        surface.fill_rect(
            star.position,
            Vec2::splat(star.size),
            colors::with_alpha(colors::WHITE, star.brightness),
        );
    }

    if !state.terrain.points.is_empty() {
        surface.fill_polygon(&state.terrain.points, colors::BACKGROUND_DARK);
        surface.polyline(state.terrain.surface(), 2.0, colors::PRIMARY);

        let pad = state.terrain.pad;
        let left = Vec2::new(pad.x, pad.y);
        surface.line(left, left + Vec2::new(pad.width, 0.0), 4.0, colors::ACCENT);
        // Slow pulse over the pad
        let pulse = 0.2 + (state.frames as f32 / 12.0).sin() * 0.1;
        surface.fill_rect(
            left - Vec2::new(0.0, PAD_MARKER_HEIGHT),
            Vec2::new(pad.width, PAD_MARKER_HEIGHT),
            colors::with_alpha(colors::ACCENT, pulse),
        );
    }

    state.particles.render(surface, 2.0);

    if matches!(state.status, LanderStatus::Descending | LanderStatus::Landed) {
        let rotation = Vec2::from_angle(state.vessel.angle);
        let to_screen = |p: Vec2| state.vessel.position + rotation.rotate(p);

        let hull = HULL.map(to_screen);
        surface.fill_polygon(&hull, colors::SHIP);
        for (hip, foot) in LEGS {
            surface.line(to_screen(hip), to_screen(foot), 2.0, colors::SHIP_LEGS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::VertexBatch;
    use crate::sim::lander::state::LanderConfig;

    #[test]
    fn test_ready_state_draws_background_only() {
        let state = LanderState::new(1, LanderConfig::default());
        let mut batch = VertexBatch::new(800.0, 600.0);
        render(&state, &mut batch);
        assert_eq!(batch.clear_color(), colors::SPACE);
        assert!(batch.vertices().is_empty());
    }

    #[test]
    fn test_ship_hidden_after_crash() {
        let mut state = LanderState::launched(1, LanderConfig::default(), 800.0, 600.0);
        let mut flying = VertexBatch::new(800.0, 600.0);
        render(&state, &mut flying);

        state.status = LanderStatus::Destroyed;
        let mut crashed = VertexBatch::new(800.0, 600.0);
        render(&state, &mut crashed);
        assert!(crashed.vertices().len() < flying.vertices().len());
    }

    #[test]
    fn test_hull_rotates_with_angle() {
        let rotation = Vec2::from_angle(std::f32::consts::FRAC_PI_2);
        // Nose (0, -15) turned a quarter right points along +x
        assert!(rotation.rotate(HULL[0]).abs_diff_eq(Vec2::new(15.0, 0.0), 1e-5));
    }
}
