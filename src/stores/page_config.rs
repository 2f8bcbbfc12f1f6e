use crate::effects::{OverlapPolicy, DEFAULT_DURATION_MS};
use serde::Deserialize;

/// Global flag that turns the reveal confetti off when set to `false`
pub const REVEAL_FLAG: &str = "BWH_REVEAL_ENABLED";

/// Optional global object with effect tuning
pub const EFFECTS_OPTIONS: &str = "BWH_EFFECTS";

/// Effect tuning read from `window.BWH_EFFECTS`
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectsOptions {
    pub confetti_duration_ms: f64,
    pub overlap: OverlapPolicy,
}

impl Default for EffectsOptions {
    fn default() -> Self {
        Self {
            confetti_duration_ms: DEFAULT_DURATION_MS,
            overlap: OverlapPolicy::default(),
        }
    }
}

/// Configuration handed to the reveal handler at wiring time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealConfig {
    pub enabled: bool,
    pub duration_ms: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: DEFAULT_DURATION_MS,
        }
    }
}

/// Everything the page configures, read once at start-up
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PageConfig {
    pub reveal: RevealConfig,
    pub overlap: OverlapPolicy,
}

impl PageConfig {
    /// Combine the raw flag and options into a config
    ///
    /// Only an explicit boolean `false` disables the reveal confetti; a
    /// non-positive or non-finite duration falls back to the default.
    pub fn from_parts(flag: Option<bool>, options: EffectsOptions) -> Self {
        let duration_ms = if options.confetti_duration_ms.is_finite() && options.confetti_duration_ms > 0.0 {
            options.confetti_duration_ms
        } else {
            DEFAULT_DURATION_MS
        };
        Self {
            reveal: RevealConfig {
                enabled: flag != Some(false),
                duration_ms,
            },
            overlap: options.overlap,
        }
    }

    /// Read `BWH_REVEAL_ENABLED` and `BWH_EFFECTS` from the window
    pub fn from_window() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };

        let flag = js_sys::Reflect::get(&window, &REVEAL_FLAG.into())
            .ok()
            .and_then(|value| value.as_bool());

        let options = match js_sys::Reflect::get(&window, &EFFECTS_OPTIONS.into()) {
            Ok(value) if value.is_undefined() || value.is_null() => EffectsOptions::default(),
            Ok(value) => serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed {}: {}", EFFECTS_OPTIONS, e);
                EffectsOptions::default()
            }),
            Err(_) => EffectsOptions::default(),
        };

        let config = Self::from_parts(flag, options);
        log::info!("Loaded page config: {:?}", config);
        config
    }
}
