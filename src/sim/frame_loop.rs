//! Scoped animation loop
//!
//! The host owns the real frame callback (`requestAnimationFrame`) and calls
//! [`FrameLoop::on_frame`] once per display refresh. The loop decides whether
//! the host should re-arm: a stopped or finished simulation returns
//! [`FrameOutcome::Stop`] from the top of the frame and nothing else runs.

use crate::consts::{MAX_FRAME_DELTA_MS, MAX_MISSED_SURFACE_FRAMES, NOMINAL_FRAME_MS};
use crate::renderer::DrawSurface;

/// Per-frame timing and surface information handed to a simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Frames stepped since the loop was (re)started
    pub index: u64,
    /// Host timestamp (ms)
    pub timestamp_ms: f64,
    /// Clamped delta since the previous stepped frame (ms)
    pub dt_ms: f64,
    /// Simulation time: sum of clamped deltas (ms)
    pub elapsed_ms: f64,
    /// Surface width in pixels
    pub width: f32,
    /// Surface height in pixels
    pub height: f32,
}

impl Frame {
    /// A frame at a fixed size, mostly for driving simulations headless
    pub fn fixed(index: u64, width: f32, height: f32) -> Self {
        let elapsed_ms = (index + 1) as f64 * NOMINAL_FRAME_MS;
        Self {
            index,
            timestamp_ms: elapsed_ms,
            dt_ms: NOMINAL_FRAME_MS,
            elapsed_ms,
            width,
            height,
        }
    }
}

/// A frame-stepped simulation: mutate in `tick`, read in `render`
pub trait Simulation {
    /// Input sampled for one frame (key state, typed characters, ...)
    type Input;

    /// Advance the state by exactly one frame
    fn tick(&mut self, input: &Self::Input, frame: &Frame);

    /// Draw the current state; must not mutate it
    fn render(&self, surface: &mut dyn DrawSurface);

    /// Whether the loop should keep scheduling frames
    fn is_active(&self) -> bool;
}

/// Converts host timestamps into clamped simulation time
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
    elapsed_ms: f64,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for a new host timestamp and produce the frame descriptor
    pub fn advance(&mut self, timestamp_ms: f64, width: f32, height: f32) -> Frame {
        let dt_ms = match self.last_timestamp {
            Some(last) => (timestamp_ms - last).clamp(0.0, MAX_FRAME_DELTA_MS),
            None => NOMINAL_FRAME_MS,
        };
        self.last_timestamp = Some(timestamp_ms);
        self.elapsed_ms += dt_ms;

        let frame = Frame {
            index: self.frames,
            timestamp_ms,
            dt_ms,
            elapsed_ms: self.elapsed_ms,
            width,
            height,
        };
        self.frames += 1;
        frame
    }

    /// Forget the last timestamp so time spent paused is not counted
    pub fn pause(&mut self) {
        self.last_timestamp = None;
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Why a loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `stop()` was called
    Requested,
    /// The simulation reported itself inactive (game over, landed, ...)
    Finished,
    /// The drawing surface never materialized
    SurfaceUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    Running,
    Stopped(StopReason),
}

/// What the host should do after a frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule another frame
    Continue,
    /// Do not reschedule
    Stop,
}

/// Owns one simulation and drives it one frame per host callback
#[derive(Debug)]
pub struct FrameLoop<S> {
    sim: S,
    clock: FrameClock,
    status: LoopStatus,
    missed_surface_frames: u32,
}

impl<S: Simulation> FrameLoop<S> {
    pub fn new(sim: S) -> Self {
        Self {
            sim,
            clock: FrameClock::new(),
            status: LoopStatus::Running,
            missed_surface_frames: 0,
        }
    }

    /// Run one frame callback
    pub fn on_frame(
        &mut self,
        timestamp_ms: f64,
        input: &S::Input,
        surface: Option<&mut dyn DrawSurface>,
    ) -> FrameOutcome {
        if let LoopStatus::Stopped(_) = self.status {
            return FrameOutcome::Stop;
        }
        if !self.sim.is_active() {
            log::info!("Simulation finished after {} frames", self.clock.frames());
            self.status = LoopStatus::Stopped(StopReason::Finished);
            return FrameOutcome::Stop;
        }

        let Some(surface) = surface else {
            self.missed_surface_frames += 1;
            if self.missed_surface_frames >= MAX_MISSED_SURFACE_FRAMES {
                log::warn!(
                    "Drawing surface missing for {} frames, stopping loop",
                    self.missed_surface_frames
                );
                self.status = LoopStatus::Stopped(StopReason::SurfaceUnavailable);
                return FrameOutcome::Stop;
            }
            // Retry next frame without counting the gap as simulation time
            self.clock.pause();
            return FrameOutcome::Continue;
        };
        self.missed_surface_frames = 0;

        let (width, height) = surface.size();
        let frame = self.clock.advance(timestamp_ms, width, height);
        self.sim.tick(input, &frame);
        self.sim.render(surface);

        FrameOutcome::Continue
    }

    /// Stop scheduling; checked at the top of the next frame
    pub fn stop(&mut self) {
        if self.status == LoopStatus::Running {
            self.status = LoopStatus::Stopped(StopReason::Requested);
        }
    }

    /// Resume after `stop()`, returns true if the host should re-arm
    pub fn resume(&mut self) -> bool {
        match self.status {
            LoopStatus::Stopped(StopReason::Requested) => {
                self.clock.pause();
                self.status = LoopStatus::Running;
                true
            }
            LoopStatus::Running => false,
            LoopStatus::Stopped(_) => false,
        }
    }

    /// Replace the whole simulation state and restart the clock
    pub fn reset(&mut self, sim: S) {
        self.sim = sim;
        self.clock = FrameClock::new();
        self.status = LoopStatus::Running;
        self.missed_surface_frames = 0;
    }

    pub fn status(&self) -> LoopStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == LoopStatus::Running
    }

    pub fn sim(&self) -> &S {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{VertexBatch, colors};
    use glam::Vec2;

    /// Counts ticks and stops itself after `limit`
    #[derive(Debug, Default)]
    struct Counter {
        ticks: u32,
        limit: u32,
        last_frame: Option<Frame>,
    }

    impl Simulation for Counter {
        type Input = ();

        fn tick(&mut self, _input: &(), frame: &Frame) {
            self.ticks += 1;
            self.last_frame = Some(*frame);
        }

        fn render(&self, surface: &mut dyn DrawSurface) {
            surface.clear(colors::SPACE);
            surface.circle(Vec2::new(1.0, 1.0), 1.0, colors::WHITE);
        }

        fn is_active(&self) -> bool {
            self.ticks < self.limit
        }
    }

    fn counter(limit: u32) -> FrameLoop<Counter> {
        FrameLoop::new(Counter {
            limit,
            ..Default::default()
        })
    }

    #[test]
    fn test_runs_until_inactive() {
        let mut lp = counter(3);
        let mut batch = VertexBatch::new(320.0, 200.0);
        let mut outcomes = Vec::new();
        for i in 0..5 {
            outcomes.push(lp.on_frame(i as f64 * 16.0, &(), Some(&mut batch)));
        }
        assert_eq!(
            outcomes,
            vec![
                FrameOutcome::Continue,
                FrameOutcome::Continue,
                FrameOutcome::Continue,
                FrameOutcome::Stop,
                FrameOutcome::Stop,
            ]
        );
        assert_eq!(lp.sim().ticks, 3);
        assert_eq!(lp.status(), LoopStatus::Stopped(StopReason::Finished));
    }

    #[test]
    fn test_stop_checked_at_frame_top() {
        let mut lp = counter(100);
        let mut batch = VertexBatch::new(10.0, 10.0);
        lp.on_frame(0.0, &(), Some(&mut batch));
        lp.stop();
        assert_eq!(lp.on_frame(16.0, &(), Some(&mut batch)), FrameOutcome::Stop);
        assert_eq!(lp.sim().ticks, 1);

        assert!(lp.resume());
        assert_eq!(lp.on_frame(5000.0, &(), Some(&mut batch)), FrameOutcome::Continue);
        // Paused wall time does not leak into the frame delta
        let frame = lp.sim().last_frame.expect("ticked");
        assert!((frame.dt_ms - NOMINAL_FRAME_MS).abs() < 1e-9);
    }

    #[test]
    fn test_frame_carries_surface_size() {
        let mut lp = counter(10);
        let mut batch = VertexBatch::new(640.0, 360.0);
        lp.on_frame(0.0, &(), Some(&mut batch));
        let frame = lp.sim().last_frame.expect("ticked");
        assert_eq!((frame.width, frame.height), (640.0, 360.0));
        assert!(!batch.vertices().is_empty());
    }

    #[test]
    fn test_missing_surface_retries_then_gives_up() {
        let mut lp = counter(1000);
        for i in 0..MAX_MISSED_SURFACE_FRAMES - 1 {
            assert_eq!(lp.on_frame(i as f64, &(), None), FrameOutcome::Continue);
        }
        assert_eq!(lp.sim().ticks, 0);

        // Surface shows up in time: counter resets
        let mut batch = VertexBatch::new(10.0, 10.0);
        assert_eq!(lp.on_frame(200.0, &(), Some(&mut batch)), FrameOutcome::Continue);
        assert_eq!(lp.sim().ticks, 1);

        for i in 0..MAX_MISSED_SURFACE_FRAMES {
            lp.on_frame(300.0 + i as f64, &(), None);
        }
        assert_eq!(lp.status(), LoopStatus::Stopped(StopReason::SurfaceUnavailable));
        assert!(!lp.resume());
    }

    #[test]
    fn test_reset_replaces_state() {
        let mut lp = counter(1);
        let mut batch = VertexBatch::new(10.0, 10.0);
        lp.on_frame(0.0, &(), Some(&mut batch));
        assert_eq!(lp.on_frame(16.0, &(), Some(&mut batch)), FrameOutcome::Stop);

        lp.reset(Counter {
            limit: 2,
            ..Default::default()
        });
        assert!(lp.is_running());
        assert_eq!(lp.sim().ticks, 0);
        assert_eq!(lp.clock().frames(), 0);
        assert_eq!(lp.on_frame(32.0, &(), Some(&mut batch)), FrameOutcome::Continue);
    }

    #[test]
    fn test_clock_clamps_delta() {
        let mut clock = FrameClock::new();
        let first = clock.advance(1000.0, 1.0, 1.0);
        assert!((first.dt_ms - NOMINAL_FRAME_MS).abs() < 1e-9);
        let second = clock.advance(1016.0, 1.0, 1.0);
        assert!((second.dt_ms - 16.0).abs() < 1e-9);
        let jump = clock.advance(60_000.0, 1.0, 1.0);
        assert_eq!(jump.dt_ms, MAX_FRAME_DELTA_MS);
        let backwards = clock.advance(10.0, 1.0, 1.0);
        assert_eq!(backwards.dt_ms, 0.0);
        assert_eq!(backwards.index, 3);
        assert!((clock.elapsed_ms() - (NOMINAL_FRAME_MS + 116.0)).abs() < 1e-9);
    }
}
