pub mod reveal_box;
pub mod share_url_field;

pub use reveal_box::RevealBox;
pub use share_url_field::ShareUrlField;
