//! Clipboard utilities for the share link
//!
//! `copy_share_url` selects the contents of `#shareUrl` and asks the browser
//! to copy the selection. Failures never propagate: the caller gets a
//! `CopyOutcome` it is free to ignore.

use wasm_bindgen::{JsCast, JsValue};

/// Element id of the share link field
pub const SHARE_FIELD_ID: &str = "shareUrl";

/// Selection end used to cover the whole field regardless of its length
pub const SELECTION_END: u32 = 99_999;

/// A text field whose contents can be selected
pub trait TextSelection {
    fn select_all(&self);
    fn set_selection_range(&self, start: u32, end: u32);
}

/// The platform "copy current selection" action
pub trait CopyCommand {
    /// `Ok(false)` means the browser declined without throwing
    fn copy_selection(&self) -> Result<bool, String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// No share field on the page
    NoTarget,
    /// The copy command ran but reported failure
    Rejected,
    /// The copy command threw
    Failed(String),
}

impl CopyOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(self, CopyOutcome::Copied)
    }
}

/// Select the whole field and copy the selection
pub fn copy_selection<T, C>(field: Option<&T>, command: &C) -> CopyOutcome
where
    T: TextSelection + ?Sized,
    C: CopyCommand + ?Sized,
{
    let Some(field) = field else {
        return CopyOutcome::NoTarget;
    };

    field.select_all();
    field.set_selection_range(0, SELECTION_END);

    match command.copy_selection() {
        Ok(true) => CopyOutcome::Copied,
        Ok(false) => CopyOutcome::Rejected,
        Err(reason) => CopyOutcome::Failed(reason),
    }
}

/// `#shareUrl` as either an input or a textarea
pub enum ShareField {
    Input(web_sys::HtmlInputElement),
    TextArea(web_sys::HtmlTextAreaElement),
}

impl ShareField {
    pub fn find(document: &web_sys::Document) -> Option<Self> {
        let element = document.get_element_by_id(SHARE_FIELD_ID)?;
        match element.dyn_into::<web_sys::HtmlInputElement>() {
            Ok(input) => Some(Self::Input(input)),
            Err(element) => element
                .dyn_into::<web_sys::HtmlTextAreaElement>()
                .ok()
                .map(Self::TextArea),
        }
    }
}

impl TextSelection for ShareField {
    fn select_all(&self) {
        match self {
            Self::Input(input) => input.select(),
            Self::TextArea(area) => area.select(),
        }
    }

    fn set_selection_range(&self, start: u32, end: u32) {
        // Inputs like type=email throw here; the select() above still applies
        let result = match self {
            Self::Input(input) => input.set_selection_range(start, end),
            Self::TextArea(area) => area.set_selection_range(start, end),
        };
        if let Err(e) = result {
            log::debug!("set_selection_range unsupported: {:?}", e);
        }
    }
}

/// `document.execCommand("copy")`
pub struct ExecCommandCopy(web_sys::HtmlDocument);

impl CopyCommand for ExecCommandCopy {
    fn copy_selection(&self) -> Result<bool, String> {
        self.0
            .exec_command("copy")
            .map_err(|e| e.as_string().unwrap_or_else(|| format!("{:?}", e)))
    }
}

/// Copy the page's share link via the current selection
pub fn copy_share_url() -> CopyOutcome {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return CopyOutcome::NoTarget;
    };
    let field = ShareField::find(&document);
    let Ok(html_document) = document.dyn_into::<web_sys::HtmlDocument>() else {
        return CopyOutcome::Failed("document is not an HTML document".to_string());
    };

    let outcome = copy_selection(field.as_ref(), &ExecCommandCopy(html_document));
    if !outcome.is_copied() {
        log::debug!("Share link copy did not succeed: {:?}", outcome);
    }
    outcome
}

/// Copy text to the system clipboard
///
/// Uses the async Clipboard API; only available in secure contexts.
///
/// # Returns
/// * `Ok(())` if the text was successfully copied
/// * `Err(JsValue)` if the operation failed
pub async fn copy_to_clipboard(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let clipboard = window.navigator().clipboard();
    wasm_bindgen_futures::JsFuture::from(clipboard.write_text(text))
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct FakeField {
        value: String,
        selected_all: Cell<bool>,
        range: RefCell<Option<(u32, u32)>>,
    }

    impl TextSelection for FakeField {
        fn select_all(&self) {
            self.selected_all.set(true);
        }

        fn set_selection_range(&self, start: u32, end: u32) {
            *self.range.borrow_mut() = Some((start, end));
        }
    }

    struct FakeCopy {
        result: Result<bool, String>,
        calls: Cell<u32>,
    }

    impl FakeCopy {
        fn new(result: Result<bool, String>) -> Self {
            Self {
                result,
                calls: Cell::new(0),
            }
        }
    }

    impl CopyCommand for FakeCopy {
        fn copy_selection(&self) -> Result<bool, String> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    #[test]
    fn test_missing_field_is_a_no_op() {
        let copy = FakeCopy::new(Ok(true));
        let outcome = copy_selection(None::<&FakeField>, &copy);
        assert_eq!(outcome, CopyOutcome::NoTarget);
        assert_eq!(copy.calls.get(), 0);
    }

    #[test]
    fn test_selects_full_content() {
        let field = FakeField {
            value: "https://example.com/wishes/share/abc123".to_string(),
            ..Default::default()
        };
        let outcome = copy_selection(Some(&field), &FakeCopy::new(Ok(true)));
        assert_eq!(outcome, CopyOutcome::Copied);
        assert!(field.selected_all.get());

        let (start, end) = field.range.borrow().expect("selection range set");
        assert_eq!(start, 0);
        assert!(end as usize >= field.value.len());
    }

    #[test]
    fn test_declined_copy_is_reported_not_raised() {
        let field = FakeField::default();
        let outcome = copy_selection(Some(&field), &FakeCopy::new(Ok(false)));
        assert_eq!(outcome, CopyOutcome::Rejected);
        assert!(field.selected_all.get());
    }

    #[test]
    fn test_throwing_copy_is_swallowed() {
        let field = FakeField::default();
        let outcome = copy_selection(
            Some(&field),
            &FakeCopy::new(Err("NotAllowedError".to_string())),
        );
        assert_eq!(outcome, CopyOutcome::Failed("NotAllowedError".to_string()));
        assert!(!outcome.is_copied());
    }
}
