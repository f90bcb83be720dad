//! Bar chart drawing

use glam::Vec2;

use super::state::{HighlightKind, SortState};
use crate::renderer::{DrawSurface, Rgba, colors};

const PAD_X: f32 = 48.0;
const PAD_TOP: f32 = 72.0;
const PAD_BOTTOM: f32 = 32.0;
const BAR_GAP: f32 = 2.0;
const GRID_LINES: usize = 8;
const HUD_FONT: f32 = 14.0;

fn bar_color(kind: Option<HighlightKind>) -> Rgba {
    match kind {
        None => colors::BAR_IDLE,
        Some(HighlightKind::Compare | HighlightKind::Wave) => colors::PRIMARY,
        Some(HighlightKind::Swap) => colors::SECONDARY,
        Some(HighlightKind::Overwrite) => colors::ACCENT,
    }
}

/// Bar rectangles (origin, size) for a surface, tallest value fills the area
pub fn bar_rects(values: &[u32], max_value: u32, width: f32, height: f32) -> Vec<(Vec2, Vec2)> {
    let n = values.len();
    if n == 0 || max_value == 0 {
        return Vec::new();
    }
    let area_w = (width - 2.0 * PAD_X).max(0.0);
    let area_h = (height - PAD_TOP - PAD_BOTTOM).max(0.0);
    let slot = area_w / n as f32;
    let bar_w = (slot - BAR_GAP).max(1.0);
    let floor = height - PAD_BOTTOM;

    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let h = area_h * v as f32 / max_value as f32;
            (Vec2::new(PAD_X + i as f32 * slot, floor - h), Vec2::new(bar_w, h))
        })
        .collect()
}

pub fn render(state: &SortState, surface: &mut dyn DrawSurface) {
    let (width, height) = surface.size();
    surface.clear(colors::BACKGROUND_DARK);

    let grid = colors::with_alpha(colors::WHITE, 0.05);
    let area_h = height - PAD_TOP - PAD_BOTTOM;
    for i in 0..GRID_LINES {
        let y = PAD_TOP + area_h * i as f32 / (GRID_LINES - 1) as f32;
        surface.line(Vec2::new(PAD_X, y), Vec2::new(width - PAD_X, y), 1.0, grid);
    }

    let rects = bar_rects(&state.values, state.config.max_value, width, height);
    for (i, (origin, size)) in rects.into_iter().enumerate() {
        let kind = state.highlights.get(i).copied().flatten().map(|h| h.kind);
        surface.fill_rect(origin, size, bar_color(kind));
    }

    let title = format!("{}  {}", state.algorithm.name(), state.algorithm.complexity());
    surface.text(Vec2::new(PAD_X, 28.0), &title, HUD_FONT * 1.4, colors::WHITE);
    let counters = format!("comparisons {}   accesses {}", state.comparisons, state.accesses);
    surface.text(Vec2::new(PAD_X, 52.0), &counters, HUD_FONT, colors::SECONDARY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::VertexBatch;
    use crate::sim::sorting::state::SortConfig;

    #[test]
    fn test_bar_heights_proportional() {
        let rects = bar_rects(&[50, 100], 100, 296.0, 304.0);
        assert_eq!(rects.len(), 2);
        let area_h = 304.0 - PAD_TOP - PAD_BOTTOM;
        assert!((rects[1].1.y - area_h).abs() < 1e-4);
        assert!((rects[0].1.y - area_h / 2.0).abs() < 1e-4);
        // Bars stand on the same floor
        assert!((rects[0].0.y + rects[0].1.y - (rects[1].0.y + rects[1].1.y)).abs() < 1e-3);
        assert!(rects[1].0.x > rects[0].0.x);
    }

    #[test]
    fn test_highlight_colors() {
        assert_eq!(bar_color(None), colors::BAR_IDLE);
        assert_eq!(bar_color(Some(HighlightKind::Swap)), colors::SECONDARY);
        assert_eq!(bar_color(Some(HighlightKind::Overwrite)), colors::ACCENT);
    }

    #[test]
    fn test_render_draws_hud() {
        let state = SortState::new(1, SortConfig::default());
        let mut batch = VertexBatch::new(800.0, 500.0);
        render(&state, &mut batch);
        assert_eq!(batch.text_calls(), 2);
        assert!(!batch.vertices().is_empty());
        assert!(bar_rects(&[], 100, 800.0, 500.0).is_empty());
    }
}
