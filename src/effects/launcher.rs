//! Browser driver for confetti runs
//!
//! Owns the canvas slot and the handle of the latest run, and drives each run
//! with `requestAnimationFrame` until it reports completion.

use super::canvas_surface::{current_viewport, CanvasSurface};
use super::confetti::{ConfettiHandle, ConfettiRun, DrawSurface, FrameOutcome, OverlapPolicy, RunTracker};
use super::errors::EffectError;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

type SurfaceSlot = Rc<RefCell<Option<CanvasSurface>>>;
type RafClosure = Closure<dyn FnMut(f64)>;

thread_local! {
    static LAUNCHER: RefCell<ConfettiLauncher> = RefCell::new(ConfettiLauncher::new(OverlapPolicy::default()));
}

/// Launch on the page-wide launcher
///
/// Returns `Ok(None)` when the overlap policy rejected the launch.
pub fn launch(duration_ms: f64) -> Result<Option<ConfettiHandle>, EffectError> {
    LAUNCHER.with(|launcher| launcher.borrow_mut().launch(duration_ms))
}

/// Change how the page-wide launcher treats overlapping launches
pub fn set_overlap_policy(policy: OverlapPolicy) {
    LAUNCHER.with(|launcher| launcher.borrow_mut().runs.set_policy(policy));
}

pub struct ConfettiLauncher {
    surface: SurfaceSlot,
    runs: RunTracker,
}

impl ConfettiLauncher {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self {
            surface: Rc::new(RefCell::new(None)),
            runs: RunTracker::new(policy),
        }
    }

    /// Seed a run and start driving it
    pub fn launch(&mut self, duration_ms: f64) -> Result<Option<ConfettiHandle>, EffectError> {
        if !self.runs.begin() {
            return Ok(None);
        }

        let window = web_sys::window().ok_or(EffectError::NoWindow)?;
        let viewport = current_viewport(&window)?;
        self.prepare_surface(&window)?;
        self.surface.borrow_mut().fit(viewport);

        let started_at = window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now);
        let run = ConfettiRun::seed(&mut rand::thread_rng(), &viewport, started_at, duration_ms);
        let handle = run.handle();

        drive(run, Rc::clone(&self.surface), &window)?;
        log::debug!("Confetti launched for {}ms", duration_ms);

        self.runs.track(handle.clone());
        Ok(Some(handle))
    }

    /// Make sure the slot holds a canvas that is still on the page
    fn prepare_surface(&self, window: &Window) -> Result<(), EffectError> {
        let mut slot = self.surface.borrow_mut();
        if slot.as_ref().is_some_and(CanvasSurface::is_attached) {
            return Ok(());
        }
        let document = window.document().ok_or(EffectError::NoDocument)?;
        // Dropping a detached surface unregisters its resize listener
        *slot = Some(CanvasSurface::acquire(window, &document)?);
        Ok(())
    }
}

/// Schedule frames until the run completes, then release the frame closure
fn drive(mut run: ConfettiRun, surface: SurfaceSlot, window: &Window) -> Result<(), EffectError> {
    let next: Rc<RefCell<Option<RafClosure>>> = Rc::new(RefCell::new(None));
    let first = Rc::clone(&next);

    *first.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        let outcome = run.frame(now, &mut *surface.borrow_mut());
        if outcome == FrameOutcome::Continue {
            let scheduled = match (web_sys::window(), next.borrow().as_ref()) {
                (Some(window), Some(callback)) => window
                    .request_animation_frame(callback.as_ref().unchecked_ref())
                    .is_ok(),
                _ => false,
            };
            if scheduled {
                return;
            }
            log::warn!("Could not schedule confetti frame, stopping");
            run.handle().cancel();
            run.frame(now, &mut *surface.borrow_mut());
        }
        // Breaks the closure's reference to itself; the drop is deferred
        // until this invocation returns
        let _ = next.borrow_mut().take();
    }) as Box<dyn FnMut(f64)>));

    let scheduled = match first.borrow().as_ref() {
        Some(callback) => window.request_animation_frame(callback.as_ref().unchecked_ref()),
        None => Ok(0),
    };
    if let Err(e) = scheduled {
        first.borrow_mut().take();
        return Err(e.into());
    }
    Ok(())
}
