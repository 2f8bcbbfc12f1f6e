//! Full-viewport canvas the confetti is drawn on
//!
//! - Reuses an existing `#confettiCanvas` element, otherwise creates one
//! - Owns its `resize` listener; the listener lives exactly as long as the
//!   surface and is unregistered on `remove()` or drop

use super::confetti::DrawSurface;
use super::errors::EffectError;
use super::particle::{Particle, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

/// Element id of the confetti canvas
pub const CANVAS_ID: &str = "confettiCanvas";

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    viewport: Viewport,
    on_resize: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

impl CanvasSurface {
    /// Find or create the canvas and register its resize listener
    pub fn acquire(window: &Window, document: &Document) -> Result<Self, EffectError> {
        let canvas = match document
            .get_element_by_id(CANVAS_ID)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        {
            Some(canvas) => canvas,
            None => {
                let canvas = document
                    .create_element("canvas")?
                    .dyn_into::<HtmlCanvasElement>()
                    .map_err(|_| EffectError::Js("created element is not a canvas".to_string()))?;
                canvas.set_id(CANVAS_ID);
                document
                    .body()
                    .ok_or(EffectError::NoBody)?
                    .append_child(&canvas)?;
                log::debug!("Created #{} surface", CANVAS_ID);
                canvas
            }
        };

        let ctx = canvas
            .get_context("2d")?
            .ok_or(EffectError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EffectError::ContextUnavailable)?;

        let viewport = current_viewport(window)?;

        let on_resize = {
            let canvas = canvas.clone();
            let ctx = ctx.clone();
            Closure::wrap(Box::new(move |_e: web_sys::Event| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                match current_viewport(&window) {
                    Ok(viewport) => apply_fit(&canvas, &ctx, viewport),
                    Err(e) => log::warn!("Skipping confetti resize: {}", e),
                }
            }) as Box<dyn FnMut(web_sys::Event)>)
        };
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

        Ok(Self {
            canvas,
            ctx,
            viewport,
            on_resize: Some(on_resize),
        })
    }

    /// Whether the canvas is still part of the page
    pub fn is_attached(&self) -> bool {
        self.canvas.is_connected()
    }

    fn unregister_resize(&mut self) {
        if let Some(callback) = self.on_resize.take() {
            if let Some(window) = web_sys::window() {
                window
                    .remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
                    .ok();
            }
        }
    }
}

impl DrawSurface for CanvasSurface {
    fn fit(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        apply_fit(&self.canvas, &self.ctx, viewport);
    }

    fn clear(&mut self) {
        // The resize listener may have refit the canvas since the last fit
        if let Some(viewport) = web_sys::window().and_then(|w| current_viewport(&w).ok()) {
            self.viewport = viewport;
        }
        self.ctx
            .clear_rect(0.0, 0.0, self.viewport.width, self.viewport.height);
    }

    fn draw(&mut self, particle: &Particle) {
        let ctx = &self.ctx;
        let (x, y, w, h) = particle.rect();
        ctx.save();
        if ctx.translate(particle.x, particle.y).is_ok() && ctx.rotate(particle.rotation).is_ok() {
            ctx.set_global_alpha(particle.opacity);
            ctx.set_fill_style_str(particle.color);
            ctx.fill_rect(x, y, w, h);
        }
        ctx.restore();
    }

    fn remove(&mut self) {
        self.unregister_resize();
        self.canvas.remove();
        log::debug!("Removed #{} surface", CANVAS_ID);
    }
}

impl Drop for CanvasSurface {
    fn drop(&mut self) {
        self.unregister_resize();
    }
}

/// Read the viewport size and device pixel ratio from the window
pub fn current_viewport(window: &Window) -> Result<Viewport, EffectError> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Viewport::new(width, height, window.device_pixel_ratio()))
}

fn apply_fit(canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d, viewport: Viewport) {
    let (buffer_width, buffer_height) = viewport.buffer_size();
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    canvas.set_width(buffer_width);
    canvas.set_height(buffer_height);
    let style = canvas.style();
    style
        .set_property("width", &format!("{}px", viewport.width))
        .ok();
    style
        .set_property("height", &format!("{}px", viewport.height))
        .ok();
    ctx.scale(viewport.pixel_ratio, viewport.pixel_ratio).ok();
}
