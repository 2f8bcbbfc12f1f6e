pub mod page_config;

pub use page_config::{EffectsOptions, PageConfig, RevealConfig};
