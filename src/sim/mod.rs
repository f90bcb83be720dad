//! Frame-stepped simulations
//!
//! Each simulation owns its state, advances it in a deterministic `tick` and
//! draws it in a `render` that only reads. Rules:
//! - Seeded RNG only (`Pcg32` per simulation)
//! - One tick per host frame; timers run on clamped simulation time
//! - No platform dependencies

pub mod flock;
pub mod frame_loop;
pub mod lander;
pub mod particles;
pub mod siege;
pub mod sorting;

pub use flock::{FlockConfig, FlockState};
pub use frame_loop::{Frame, FrameClock, FrameLoop, FrameOutcome, LoopStatus, Simulation, StopReason};
pub use lander::{LanderConfig, LanderInput, LanderState, LanderStatus, LanderTelemetry};
pub use particles::{Particle, ParticleSystem};
pub use siege::{SiegeConfig, SiegePhase, SiegeState, SiegeTelemetry};
pub use sorting::{Algorithm, SortCommand, SortConfig, SortPhase, SortState, SortTelemetry};
