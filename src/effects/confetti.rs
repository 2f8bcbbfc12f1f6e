//! Confetti run state machine
//!
//! A `ConfettiRun` owns one batch of particles and is driven one frame at a
//! time by whatever scheduler the host provides (`requestAnimationFrame` in the
//! browser, a plain loop in tests). Drawing goes through the `DrawSurface`
//! trait so the run never needs to know about canvases.

use super::particle::{seed_batch, Particle, Viewport};
use rand::Rng;
use serde::Deserialize;
use std::cell::Cell;
use std::rc::Rc;

/// Default run length in milliseconds
pub const DEFAULT_DURATION_MS: f64 = 1800.0;

/// Anything the confetti can be drawn on
pub trait DrawSurface {
    /// Reset the transform, size the backing buffer to the viewport and
    /// scale so drawing happens in CSS pixels
    fn fit(&mut self, viewport: Viewport);

    /// Clear the visible area
    fn clear(&mut self);

    /// Draw one particle, isolated from the transforms of the others
    fn draw(&mut self, particle: &Particle);

    /// Take the surface off the page
    fn remove(&mut self);
}

/// A missing surface swallows drawing; removing it drops the inner surface.
impl<S: DrawSurface> DrawSurface for Option<S> {
    fn fit(&mut self, viewport: Viewport) {
        if let Some(surface) = self {
            surface.fit(viewport);
        }
    }

    fn clear(&mut self) {
        if let Some(surface) = self {
            surface.clear();
        }
    }

    fn draw(&mut self, particle: &Particle) {
        if let Some(surface) = self {
            surface.draw(particle);
        }
    }

    fn remove(&mut self) {
        if let Some(mut surface) = self.take() {
            surface.remove();
        }
    }
}

/// Result of driving a run for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule another frame
    Continue,
    /// The run ended (duration elapsed or cancelled) and removed the surface
    Completed,
    /// A newer run took over; the surface was left in place
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Running,
    Cancelled,
    Superseded,
    Finished,
}

/// Cancellation handle for a running animation
#[derive(Debug, Clone)]
pub struct ConfettiHandle {
    state: Rc<Cell<RunState>>,
}

impl ConfettiHandle {
    /// Stop at the next frame and remove the surface
    pub fn cancel(&self) {
        if self.state.get() == RunState::Running {
            self.state.set(RunState::Cancelled);
        }
    }

    /// Stop at the next frame without touching the surface
    ///
    /// Also applies to a cancelled run that has not reached its next frame
    /// yet, so it no longer tears down a surface a newer run is using.
    pub fn supersede(&self) {
        if self.holds_surface() {
            self.state.set(RunState::Superseded);
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.get() == RunState::Running
    }

    /// Whether the run will still touch the surface on its next frame
    pub fn holds_surface(&self) -> bool {
        matches!(self.state.get(), RunState::Running | RunState::Cancelled)
    }
}

/// What to do when a launch arrives while another run is still active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Let both runs draw to the shared surface
    Stack,
    /// Stop the older run and hand the surface to the new one
    #[default]
    Supersede,
    /// Ignore the new launch
    Reject,
}

/// Decision taken by `admit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Start,
    SupersedeAndStart,
    Reject,
}

/// Decide whether a new run may start given the currently tracked one
///
/// A cancelled run that has not torn down yet is always superseded, whatever
/// the policy, so its pending removal cannot hit the new run's surface.
pub fn admit(current: Option<&ConfettiHandle>, policy: OverlapPolicy) -> Admission {
    match current {
        Some(handle) if handle.is_active() => match policy {
            OverlapPolicy::Stack => Admission::Start,
            OverlapPolicy::Supersede => Admission::SupersedeAndStart,
            OverlapPolicy::Reject => Admission::Reject,
        },
        Some(handle) if handle.holds_surface() => Admission::SupersedeAndStart,
        _ => Admission::Start,
    }
}

/// Tracks the latest run and applies the overlap policy to new launches
#[derive(Debug, Default)]
pub struct RunTracker {
    current: Option<ConfettiHandle>,
    policy: OverlapPolicy,
}

impl RunTracker {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self {
            current: None,
            policy,
        }
    }

    pub fn set_policy(&mut self, policy: OverlapPolicy) {
        self.policy = policy;
    }

    /// Returns whether a new run may start, superseding the tracked one if needed
    pub fn begin(&mut self) -> bool {
        match admit(self.current.as_ref(), self.policy) {
            Admission::Reject => {
                log::debug!("Confetti already running, launch rejected");
                false
            }
            Admission::SupersedeAndStart => {
                if let Some(previous) = self.current.take() {
                    previous.supersede();
                    log::debug!("Superseding previous confetti run");
                }
                true
            }
            Admission::Start => true,
        }
    }

    /// Record the run that just started
    pub fn track(&mut self, handle: ConfettiHandle) {
        self.current = Some(handle);
    }
}

/// One confetti animation from seeding to teardown
#[derive(Debug)]
pub struct ConfettiRun {
    particles: Vec<Particle>,
    started_at: f64,
    duration_ms: f64,
    frames: u64,
    state: Rc<Cell<RunState>>,
}

impl ConfettiRun {
    /// Seed a new run
    ///
    /// # Arguments
    /// * `rng` - Random source for the particle batch
    /// * `viewport` - Current viewport, used for spawn positions
    /// * `started_at` - Clock reading in milliseconds, same clock as `frame`
    /// * `duration_ms` - How long the run keeps scheduling frames
    pub fn seed<R: Rng + ?Sized>(
        rng: &mut R,
        viewport: &Viewport,
        started_at: f64,
        duration_ms: f64,
    ) -> Self {
        Self {
            particles: seed_batch(rng, viewport),
            started_at,
            duration_ms,
            frames: 0,
            state: Rc::new(Cell::new(RunState::Running)),
        }
    }

    pub fn handle(&self) -> ConfettiHandle {
        ConfettiHandle {
            state: Rc::clone(&self.state),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.state.get() != RunState::Running
    }

    /// Drive one frame at clock time `now`
    pub fn frame<S: DrawSurface + ?Sized>(&mut self, now: f64, surface: &mut S) -> FrameOutcome {
        match self.state.get() {
            RunState::Running => {}
            RunState::Cancelled => {
                self.state.set(RunState::Finished);
                surface.remove();
                return FrameOutcome::Completed;
            }
            RunState::Superseded => return FrameOutcome::Stopped,
            RunState::Finished => return FrameOutcome::Completed,
        }

        let elapsed = now - self.started_at;
        surface.clear();
        for particle in self.particles.iter_mut() {
            particle.step();
            surface.draw(particle);
        }
        self.frames += 1;

        if elapsed < self.duration_ms {
            FrameOutcome::Continue
        } else {
            self.state.set(RunState::Finished);
            surface.remove();
            FrameOutcome::Completed
        }
    }
}
