// Page helpers
// Share-link copy and the reveal interaction

pub mod clipboard;
pub mod reveal;

pub use clipboard::{copy_share_url, CopyOutcome};
pub use reveal::{handle_reveal_click, wire_reveal_box};
