use dioxus::prelude::*;
use crate::stores::RevealConfig;
use crate::utils::reveal::{handle_reveal_click, PageConfetti, RevealTarget, REVEALED_CLASS, REVEAL_BOX_ID};

impl RevealTarget for Signal<bool> {
    fn mark_revealed(&self) {
        let mut revealed = *self;
        if !*revealed.peek() {
            revealed.set(true);
        }
    }
}

/// Click-to-reveal card
///
/// The first click adds the `revealed` class; every click launches confetti
/// while `config.enabled` is set.
#[component]
pub fn RevealBox(config: RevealConfig, children: Element) -> Element {
    let revealed = use_signal(|| false);

    let class = if *revealed.read() {
        format!("reveal-box cursor-pointer {}", REVEALED_CLASS)
    } else {
        "reveal-box cursor-pointer".to_string()
    };

    rsx! {
        div {
            id: REVEAL_BOX_ID,
            class: "{class}",
            onclick: move |_| {
                handle_reveal_click(&revealed, &config, &PageConfetti);
            },
            {children}
        }
    }
}
