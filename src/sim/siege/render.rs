//! Siege drawing

use glam::Vec2;

use super::state::{SiegeState, consts};
use crate::renderer::{DrawSurface, colors};

const GRID_SPACING: f32 = 40.0;
const BUG_RADIUS: f32 = 12.0;
const BUG_OFFSET: f32 = 25.0;
const BASE_HEIGHT: f32 = 10.0;
const HEALTH_BAR_HEIGHT: f32 = 5.0;

pub fn render(state: &SiegeState, surface: &mut dyn DrawSurface) {
    let (width, height) = surface.size();
    surface.clear(colors::SIEGE_BACKGROUND);

    let mut x = 0.0;
    while x < width {
        surface.line(Vec2::new(x, 0.0), Vec2::new(x, height), 1.0, colors::SIEGE_GRID);
        x += GRID_SPACING;
    }
    let mut y = 0.0;
    while y < height {
        surface.line(Vec2::new(0.0, y), Vec2::new(width, y), 1.0, colors::SIEGE_GRID);
        y += GRID_SPACING;
    }

    for target in &state.targets {
        let split = target
            .word
            .char_indices()
            .nth(target.matched)
            .map_or(target.word.len(), |(i, _)| i);
        let (typed, remaining) = target.word.split_at(split);

        let full = surface.measure_text(&target.word, consts::FONT_SIZE);
        let left = target.x - full / 2.0;
        surface.text(Vec2::new(left, target.y), typed, consts::FONT_SIZE, colors::WHITE);
        let offset = surface.measure_text(typed, consts::FONT_SIZE);
        surface.text(
            Vec2::new(left + offset, target.y),
            remaining,
            consts::FONT_SIZE,
            target.color,
        );

        surface.circle(Vec2::new(target.x, target.y - BUG_OFFSET), BUG_RADIUS, target.color);
    }

    state.particles.render(surface, 3.0);

    surface.fill_rect(
        Vec2::new(0.0, height - BASE_HEIGHT),
        Vec2::new(width, BASE_HEIGHT),
        colors::BACKGROUND_DARK,
    );
    let healthy = state.health_percent() > 50.0;
    surface.fill_rect(
        Vec2::new(0.0, height - HEALTH_BAR_HEIGHT),
        Vec2::new(width * state.health_percent() / 100.0, HEALTH_BAR_HEIGHT),
        if healthy { colors::ACCENT } else { colors::PRIMARY },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::VertexBatch;
    use crate::sim::siege::state::{SiegeConfig, Target};

    #[test]
    fn test_each_target_draws_two_text_runs() {
        let mut state = SiegeState::playing(1, SiegeConfig::default(), 0);
        for (i, word) in ["let", "var"].iter().enumerate() {
            state.targets.push(Target {
                id: i as u32,
                word: word.to_string(),
                x: 200.0,
                y: 100.0,
                speed: 1.0,
                color: colors::SECONDARY,
                matched: i,
            });
        }
        let mut batch = VertexBatch::new(800.0, 600.0);
        render(&state, &mut batch);
        assert_eq!(batch.text_calls(), 4);
        assert_eq!(batch.clear_color(), colors::SIEGE_BACKGROUND);
    }
}
