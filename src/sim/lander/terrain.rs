//! Procedural ground profile with one flat landing pad

use glam::Vec2;
use rand::Rng;

/// Flat stretch where touchdown can succeed
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LandingPad {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

impl LandingPad {
    /// Horizontal containment with `margin` of slack on each side (exclusive)
    pub fn contains(&self, x: f32, margin: f32) -> bool {
        x > self.x - margin && x < self.x + self.width + margin
    }
}

/// Closed polygon: surface points left to right, then the two bottom corners
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Terrain {
    pub points: Vec<Vec2>,
    pub pad: LandingPad,
    /// Index of the pad's left point in `points`
    pub pad_index: usize,
}

impl Terrain {
    /// Generate a profile with `segments` surface segments.
    ///
    /// The pad's left point index is drawn from `1..=segments-2` so the pad
    /// never touches either edge.
    pub fn generate<R: Rng>(rng: &mut R, width: f32, height: f32, segments: usize) -> Self {
        let segments = segments.max(3);
        let segment_width = width / segments as f32;
        let pad_index = rng.random_range(1..=segments - 2);
        let pad_y = height * 0.75;

        let mut points = Vec::with_capacity(segments + 3);
        points.push(Vec2::new(0.0, height * 0.8));
        for i in 1..=segments {
            let x = i as f32 * segment_width;
            let y = if i == pad_index || i == pad_index + 1 {
                pad_y
            } else {
                height * 0.6 + rng.random::<f32>() * height * 0.4
            };
            points.push(Vec2::new(x, y));
        }

        let pad = LandingPad {
            x: points[pad_index].x,
            y: pad_y,
            width: points[pad_index + 1].x - points[pad_index].x,
        };

        points.push(Vec2::new(width, height));
        points.push(Vec2::new(0.0, height));

        log::debug!(
            "Terrain generated: {} segments, pad at x={:.1} width={:.1}",
            segments,
            pad.x,
            pad.width
        );

        Self {
            points,
            pad,
            pad_index,
        }
    }

    /// Ground height under `x` from the first segment spanning it.
    ///
    /// Zero-width segments are skipped, so the result is always finite.
    pub fn height_at(&self, x: f32) -> Option<f32> {
        self.points.windows(2).find_map(|seg| {
            let (a, b) = (seg[0], seg[1]);
            let span = b.x - a.x;
            if span.abs() <= f32::EPSILON || x < a.x || x > b.x {
                return None;
            }
            let t = (x - a.x) / span;
            Some(a.y + t * (b.y - a.y))
        })
    }

    /// Whether a body at `position` with the given half height touches ground.
    ///
    /// Where no segment spans `position.x` the `floor` line counts as ground.
    pub fn collides(&self, position: Vec2, half_height: f32, floor: f32) -> bool {
        let ground = self.height_at(position.x).unwrap_or(floor);
        position.y + half_height >= ground
    }

    /// Surface points only, without the closing bottom corners
    pub fn surface(&self) -> &[Vec2] {
        let end = self.points.len().saturating_sub(2);
        &self.points[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_pad_flat_and_width_matches_points() {
        for seed in 0..200 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let terrain = Terrain::generate(&mut rng, 800.0, 600.0, 10);
            let k = terrain.pad_index;
            let (a, b) = (terrain.points[k], terrain.points[k + 1]);

            assert!((1..=8).contains(&k), "pad index {k} touches an edge");
            assert_eq!(a.y, b.y);
            assert_eq!(a.y, 450.0);
            assert_eq!(terrain.pad.width, b.x - a.x);
            assert_eq!(terrain.pad.x, a.x);
            assert_eq!(terrain.pad.y, a.y);
            assert_eq!(terrain.points.len(), 13);
        }
    }

    #[test]
    fn test_exactly_one_flat_pair_at_pad_height() {
        let mut rng = Pcg32::seed_from_u64(99);
        let terrain = Terrain::generate(&mut rng, 1000.0, 500.0, 10);
        let flat = terrain
            .surface()
            .windows(2)
            .filter(|s| s[0].y == 375.0 && s[1].y == 375.0)
            .count();
        assert_eq!(flat, 1);
        assert_eq!(terrain.points[0].y, 400.0);
    }

    #[test]
    fn test_heights_within_band() {
        let mut rng = Pcg32::seed_from_u64(5);
        let terrain = Terrain::generate(&mut rng, 800.0, 600.0, 10);
        for p in terrain.surface() {
            assert!((360.0..600.0).contains(&p.y), "{p}");
        }
        let n = terrain.points.len();
        assert_eq!(terrain.points[n - 2], Vec2::new(800.0, 600.0));
        assert_eq!(terrain.points[n - 1], Vec2::new(0.0, 600.0));
    }

    #[test]
    fn test_height_interpolates() {
        let terrain = Terrain {
            points: vec![Vec2::new(0.0, 100.0), Vec2::new(100.0, 200.0)],
            ..Default::default()
        };
        assert_eq!(terrain.height_at(50.0), Some(150.0));
        assert_eq!(terrain.height_at(150.0), None);
        assert!(terrain.collides(Vec2::new(50.0, 135.0), 15.0, 600.0));
        assert!(!terrain.collides(Vec2::new(50.0, 134.0), 15.0, 600.0));
    }

    #[test]
    fn test_floor_stands_in_past_the_profile() {
        let terrain = Terrain {
            points: vec![Vec2::new(0.0, 100.0), Vec2::new(100.0, 200.0)],
            ..Default::default()
        };
        assert!(!terrain.collides(Vec2::new(150.0, 500.0), 15.0, 600.0));
        assert!(terrain.collides(Vec2::new(150.0, 585.0), 15.0, 600.0));
        assert!(Terrain::default().collides(Vec2::new(10.0, 0.0), 15.0, 0.0));
    }

    #[test]
    fn test_zero_width_segment_skipped() {
        let terrain = Terrain {
            points: vec![
                Vec2::new(0.0, 100.0),
                Vec2::new(50.0, 100.0),
                Vec2::new(50.0, 300.0),
                Vec2::new(100.0, 300.0),
            ],
            ..Default::default()
        };
        // x = 50 hits the first segment's right end, never the vertical one
        assert_eq!(terrain.height_at(50.0), Some(100.0));
        assert!(terrain.height_at(75.0).is_some_and(f32::is_finite));
    }

    #[test]
    fn test_pad_margin_is_exclusive() {
        let pad = LandingPad {
            x: 100.0,
            y: 0.0,
            width: 80.0,
        };
        assert!(pad.contains(91.0, 10.0));
        assert!(!pad.contains(90.0, 10.0));
        assert!(pad.contains(189.0, 10.0));
        assert!(!pad.contains(190.0, 10.0));
    }
}
