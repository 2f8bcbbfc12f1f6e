#![allow(non_snake_case)]

use dioxus::prelude::*;
use bwh_effects::components::{RevealBox, ShareUrlField};
use bwh_effects::stores::PageConfig;

fn main() {
    // Panic hook and console logger
    bwh_effects::init_logging();

    log::info!("Starting bwh effects showcase");

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Read once; the reveal box gets it explicitly
    let config = use_hook(|| {
        let config = PageConfig::from_window();
        bwh_effects::effects::launcher::set_overlap_policy(config.overlap);
        config
    });

    rsx! {
        div {
            class: "max-w-xl mx-auto p-6 space-y-6",
            h1 {
                class: "text-2xl font-bold",
                "Your wish is ready"
            }
            ShareUrlField { url: "https://example.com/w/demo-wish".to_string() }
            RevealBox {
                config: config.reveal,
                div {
                    class: "p-8 rounded-xl border border-border text-center",
                    "Tap to reveal your wish"
                }
            }
        }
    }
}
