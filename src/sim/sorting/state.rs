//! Sort visualizer player
//!
//! Plays a compiled script a few steps per frame. Bar highlights count down
//! in frames, so a reset can never be undone by a stale revert.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::algorithms::{Algorithm, AnimationStep};

pub mod consts {
    pub const ARRAY_SIZE: usize = 60;
    pub const MIN_VALUE: u32 = 10;
    pub const MAX_VALUE: u32 = 100;
    pub const STEPS_PER_FRAME: usize = 2;
    /// How long a compare/swap/overwrite flash stays lit
    pub const HIGHLIGHT_FRAMES: u32 = 3;
    /// Pause between the last step and the finishing wave
    pub const FINISH_DELAY_FRAMES: u32 = 6;
    /// How long each bar stays lit during the wave
    pub const WAVE_HOLD_FRAMES: u32 = 30;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    pub array_size: usize,
    pub min_value: u32,
    pub max_value: u32,
    pub steps_per_frame: usize,
    pub highlight_frames: u32,
    pub finish_delay_frames: u32,
    pub wave_hold_frames: u32,
    pub algorithm: Algorithm,
}

impl Default for SortConfig {
    fn default() -> Self {
        use consts::*;
        Self {
            array_size: ARRAY_SIZE,
            min_value: MIN_VALUE,
            max_value: MAX_VALUE,
            steps_per_frame: STEPS_PER_FRAME,
            highlight_frames: HIGHLIGHT_FRAMES,
            finish_delay_frames: FINISH_DELAY_FRAMES,
            wave_hold_frames: WAVE_HOLD_FRAMES,
            algorithm: Algorithm::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortPhase {
    Idle,
    Sorting,
    /// Script done, the wave is sweeping the bars
    Finishing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HighlightKind {
    Compare,
    Swap,
    Overwrite,
    Wave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub kind: HighlightKind,
    pub frames_left: u32,
}

#[derive(Debug, Clone)]
pub struct SortState {
    pub config: SortConfig,
    pub algorithm: Algorithm,
    pub values: Vec<u32>,
    pub highlights: Vec<Option<Highlight>>,
    pub phase: SortPhase,
    pub comparisons: u64,
    pub accesses: u64,
    /// 1-based line in the algorithm listing, None when idle
    pub active_line: Option<usize>,
    script: Vec<AnimationStep>,
    cursor: usize,
    finish_frames: u32,
    rng: Pcg32,
}

impl SortState {
    pub fn new(seed: u64, config: SortConfig) -> Self {
        let mut state = Self {
            algorithm: config.algorithm,
            values: Vec::new(),
            highlights: Vec::new(),
            phase: SortPhase::Idle,
            comparisons: 0,
            accesses: 0,
            active_line: None,
            script: Vec::new(),
            cursor: 0,
            finish_frames: 0,
            rng: Pcg32::seed_from_u64(seed),
            config,
        };
        state.reset();
        state
    }

    /// New random bars; cancels any run in progress
    pub fn reset(&mut self) {
        let (lo, hi) = (self.config.min_value, self.config.max_value.max(self.config.min_value));
        let rng = &mut self.rng;
        self.values = (0..self.config.array_size)
            .map(|_| rng.random_range(lo..=hi))
            .collect();
        self.highlights = vec![None; self.values.len()];
        self.script.clear();
        self.cursor = 0;
        self.finish_frames = 0;
        self.comparisons = 0;
        self.accesses = 0;
        self.active_line = None;
        self.phase = SortPhase::Idle;
    }

    /// Compile the current algorithm and start playing; false unless idle
    pub fn run(&mut self) -> bool {
        if self.phase != SortPhase::Idle {
            return false;
        }
        self.script = self.algorithm.compile(&self.values);
        self.cursor = 0;
        self.comparisons = 0;
        self.accesses = 0;
        self.phase = SortPhase::Sorting;
        log::info!(
            "{}: {} steps for {} bars",
            self.algorithm.name(),
            self.script.len(),
            self.values.len()
        );
        true
    }

    /// Switch algorithm and reshuffle; false unless idle
    pub fn select(&mut self, algorithm: Algorithm) -> bool {
        if self.phase != SortPhase::Idle {
            return false;
        }
        self.algorithm = algorithm;
        self.reset();
        true
    }

    pub fn script_len(&self) -> usize {
        self.script.len()
    }

    /// Steps played so far
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 0..=1 through the script
    pub fn progress(&self) -> f32 {
        match self.phase {
            SortPhase::Idle if self.script.is_empty() => 0.0,
            SortPhase::Sorting if !self.script.is_empty() => self.cursor as f32 / self.script.len() as f32,
            _ => 1.0,
        }
    }

    fn light(&mut self, index: usize, kind: HighlightKind, frames: u32) {
        if let Some(slot) = self.highlights.get_mut(index) {
            *slot = Some(Highlight {
                kind,
                frames_left: frames,
            });
        }
    }

    fn age_highlights(&mut self) {
        for slot in &mut self.highlights {
            if let Some(h) = slot {
                h.frames_left = h.frames_left.saturating_sub(1);
                if h.frames_left == 0 {
                    *slot = None;
                }
            }
        }
    }

    fn play(&mut self, step: AnimationStep) {
        let frames = self.config.highlight_frames;
        self.active_line = Some(self.algorithm.highlight_line(&step));
        match step {
            AnimationStep::Compare(a, b) => {
                self.light(a, HighlightKind::Compare, frames);
                self.light(b, HighlightKind::Compare, frames);
                self.comparisons += 1;
            }
            AnimationStep::Swap {
                indices: (a, b),
                values: (va, vb),
            } => {
                self.values[a] = va;
                self.values[b] = vb;
                self.light(a, HighlightKind::Swap, frames);
                self.light(b, HighlightKind::Swap, frames);
                self.accesses += 2;
            }
            AnimationStep::Overwrite { index, value } => {
                self.values[index] = value;
                self.light(index, HighlightKind::Overwrite, frames);
                self.accesses += 1;
            }
        }
    }

    /// Advance one frame
    pub fn step(&mut self) {
        self.age_highlights();

        match self.phase {
            SortPhase::Idle => {}
            SortPhase::Sorting => {
                for _ in 0..self.config.steps_per_frame.max(1) {
                    let Some(&step) = self.script.get(self.cursor) else {
                        break;
                    };
                    self.play(step);
                    self.cursor += 1;
                }
                if self.cursor >= self.script.len() {
                    log::debug!(
                        "Sort finished: {} comparisons, {} accesses",
                        self.comparisons,
                        self.accesses
                    );
                    self.phase = SortPhase::Finishing;
                    self.finish_frames = 0;
                    self.active_line = None;
                }
            }
            SortPhase::Finishing => {
                self.finish_frames += 1;
                let delay = self.config.finish_delay_frames;
                if let Some(bar) = self.finish_frames.checked_sub(delay + 1) {
                    self.light(bar as usize, HighlightKind::Wave, self.config.wave_hold_frames);
                }
                let total = delay + self.values.len() as u32 + self.config.wave_hold_frames;
                if self.finish_frames >= total {
                    self.phase = SortPhase::Idle;
                }
            }
        }
    }
}
