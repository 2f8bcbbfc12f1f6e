//! Effect error types
//!
//! Typed errors for the browser plumbing behind the effects. None of these
//! reach the page: the exported functions log and drop them.

use std::fmt;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq)]
pub enum EffectError {
    /// No global `window` (worker or non-browser context)
    NoWindow,
    /// Window without a document
    NoDocument,
    /// Document without a body to attach the canvas to
    NoBody,
    /// The canvas refused to hand out a 2d context
    ContextUnavailable,
    /// A browser API threw
    Js(String),
}

impl fmt::Display for EffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "No window available"),
            Self::NoDocument => write!(f, "No document available"),
            Self::NoBody => write!(f, "Document has no body"),
            Self::ContextUnavailable => write!(f, "2d canvas context unavailable"),
            Self::Js(msg) => write!(f, "Browser API error: {}", msg),
        }
    }
}

impl std::error::Error for EffectError {}

impl From<JsValue> for EffectError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(EffectError::NoBody.to_string(), "Document has no body");
        assert_eq!(
            EffectError::Js("SecurityError".to_string()).to_string(),
            "Browser API error: SecurityError"
        );
    }
}
