//! Page effects for the wishes share pages
//!
//! Loaded as a wasm module next to server-rendered markup. It exposes
//! `copyShareUrl()` for the share button and `launchConfetti()` for scripts,
//! and wires the `#revealBox` click-to-reveal card on start.

use wasm_bindgen::prelude::*;

pub mod components;
pub mod effects;
pub mod stores;
pub mod utils;

use effects::{ConfettiHandle as RunHandle, DEFAULT_DURATION_MS};
use stores::PageConfig;

/// Handle returned to JS by `launchConfetti`
#[wasm_bindgen]
pub struct ConfettiHandle {
    inner: RunHandle,
}

#[wasm_bindgen]
impl ConfettiHandle {
    /// Stop the animation at the next frame and remove the canvas
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    /// Whether the animation is still running
    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.inner.is_active()
    }
}

/// Select and copy the contents of `#shareUrl`; never throws
#[wasm_bindgen(js_name = copyShareUrl)]
pub fn copy_share_url() {
    let _ = utils::copy_share_url();
}

/// Global name of `copy_share_url`, used by inline `onclick` handlers
pub const COPY_SHARE_URL_GLOBAL: &str = "copyShareUrl";

/// Global name of `launch_confetti`
pub const LAUNCH_CONFETTI_GLOBAL: &str = "launchConfetti";

/// Start the confetti animation (default 1800 ms)
#[wasm_bindgen(js_name = launchConfetti)]
pub fn launch_confetti(duration_ms: Option<f64>) -> Option<ConfettiHandle> {
    match effects::launcher::launch(resolve_duration(duration_ms)) {
        Ok(handle) => handle.map(|inner| ConfettiHandle { inner }),
        Err(e) => {
            log::error!("Failed to launch confetti: {}", e);
            None
        }
    }
}

/// Duration passed from JS, or the default when missing or not a number
fn resolve_duration(duration_ms: Option<f64>) -> f64 {
    duration_ms
        .filter(|d| d.is_finite())
        .unwrap_or(DEFAULT_DURATION_MS)
}

/// Put `copyShareUrl` and `launchConfetti` on `window`
///
/// Module exports are not visible to inline handlers such as
/// `onclick="copyShareUrl()"`. The closures live for the rest of the page.
pub fn install_globals() {
    let Some(window) = web_sys::window() else {
        log::warn!("No window, page functions not installed");
        return;
    };

    let copy = Closure::wrap(Box::new(|| {
        copy_share_url();
    }) as Box<dyn FnMut()>);
    expose(&window, COPY_SHARE_URL_GLOBAL, copy);

    let launch = Closure::wrap(Box::new(|duration_ms: JsValue| -> JsValue {
        launch_confetti(duration_ms.as_f64())
            .map(JsValue::from)
            .unwrap_or(JsValue::UNDEFINED)
    }) as Box<dyn FnMut(JsValue) -> JsValue>);
    expose(&window, LAUNCH_CONFETTI_GLOBAL, launch);
}

fn expose<T: ?Sized + wasm_bindgen::closure::WasmClosure>(window: &web_sys::Window, name: &str, callback: Closure<T>) {
    match js_sys::Reflect::set(window, &name.into(), callback.as_ref()) {
        Ok(true) => {
            callback.forget();
            log::debug!("Installed window.{}", name);
        }
        Ok(false) => log::error!("window.{} is not writable", name),
        Err(e) => log::error!("Failed to install window.{}: {:?}", name, e),
    }
}

/// Install logging and the panic hook
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    }
}

/// Install the page functions, read the configuration and wire the reveal
/// box once the DOM is ready
pub fn init_page() {
    install_globals();

    let config = PageConfig::from_window();
    effects::launcher::set_overlap_policy(config.overlap);

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("No document, page effects disabled");
        return;
    };

    if document.ready_state() != "loading" {
        utils::wire_reveal_box(&document, config.reveal);
        return;
    }

    let target = document.clone();
    let on_ready = Closure::once(move || {
        utils::wire_reveal_box(&target, config.reveal);
    });
    match document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref()) {
        Ok(()) => on_ready.forget(),
        Err(e) => log::error!("Failed to wait for DOMContentLoaded: {:?}", e),
    }
}

#[cfg(all(target_arch = "wasm32", feature = "autostart", not(feature = "showcase")))]
#[wasm_bindgen(start)]
pub fn start() {
    init_logging();
    log::info!("Starting bwh page effects");
    init_page();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_names_match_page_markup() {
        assert_eq!(COPY_SHARE_URL_GLOBAL, "copyShareUrl");
        assert_eq!(LAUNCH_CONFETTI_GLOBAL, "launchConfetti");
    }

    #[test]
    fn test_duration_defaults_when_missing_or_nan() {
        assert_eq!(resolve_duration(None), DEFAULT_DURATION_MS);
        assert_eq!(resolve_duration(Some(f64::NAN)), DEFAULT_DURATION_MS);
        assert_eq!(resolve_duration(Some(f64::INFINITY)), DEFAULT_DURATION_MS);
        assert_eq!(resolve_duration(Some(2400.0)), 2400.0);
    }
}
