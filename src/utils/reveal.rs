//! Click-to-reveal interaction
//!
//! A click marks the reveal element with the `revealed` class and, unless the
//! page disabled it, launches confetti. The handler stays attached, so every
//! click re-applies the class and may launch again.

use crate::effects::launcher;
use crate::stores::RevealConfig;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Element id of the reveal box
pub const REVEAL_BOX_ID: &str = "revealBox";

/// Class applied on reveal
pub const REVEALED_CLASS: &str = "revealed";

/// Something that can show itself as revealed
pub trait RevealTarget {
    /// Idempotent
    fn mark_revealed(&self);
}

/// Something that can start the confetti effect
pub trait EffectLauncher {
    fn launch(&self, duration_ms: f64);
}

/// Handle one click on the reveal element
///
/// Returns whether confetti was launched.
pub fn handle_reveal_click<T, L>(target: &T, config: &RevealConfig, launcher: &L) -> bool
where
    T: RevealTarget + ?Sized,
    L: EffectLauncher + ?Sized,
{
    target.mark_revealed();
    if !config.enabled {
        return false;
    }
    launcher.launch(config.duration_ms);
    true
}

impl RevealTarget for web_sys::Element {
    fn mark_revealed(&self) {
        if let Err(e) = self.class_list().add_1(REVEALED_CLASS) {
            log::warn!("Failed to mark reveal box: {:?}", e);
        }
    }
}

/// Launches on the page-wide confetti launcher
pub struct PageConfetti;

impl EffectLauncher for PageConfetti {
    fn launch(&self, duration_ms: f64) {
        if let Err(e) = launcher::launch(duration_ms) {
            log::error!("Failed to launch confetti: {}", e);
        }
    }
}

/// Attach the click handler to `#revealBox`, if the page has one
///
/// The handler lives for the rest of the page. Returns whether it was attached.
pub fn wire_reveal_box(document: &web_sys::Document, config: RevealConfig) -> bool {
    let Some(reveal_box) = document.get_element_by_id(REVEAL_BOX_ID) else {
        log::debug!("No #{} on this page", REVEAL_BOX_ID);
        return false;
    };

    let target = reveal_box.clone();
    let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        handle_reveal_click(&target, &config, &PageConfetti);
    }));

    match reveal_box.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref()) {
        Ok(()) => {
            onclick.forget();
            log::info!("Reveal box wired (confetti {})", if config.enabled { "on" } else { "off" });
            true
        }
        Err(e) => {
            log::error!("Failed to wire reveal box: {:?}", e);
            false
        }
    }
}
