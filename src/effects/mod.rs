// Visual effects
// Confetti model and run state are platform-free; the canvas and launcher
// modules bind them to the browser.

pub mod canvas_surface;
pub mod confetti;
pub mod errors;
pub mod launcher;
pub mod particle;

pub use confetti::{ConfettiHandle, ConfettiRun, DrawSurface, FrameOutcome, OverlapPolicy, DEFAULT_DURATION_MS};
pub use errors::EffectError;
pub use particle::{Particle, Viewport, PARTICLE_COUNT};
