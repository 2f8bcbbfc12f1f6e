use dioxus::prelude::*;
use crate::utils::clipboard::{copy_share_url, copy_to_clipboard, CopyOutcome, SHARE_FIELD_ID};

/// Read-only share link with a copy button
///
/// The input carries the `shareUrl` id so the page-level `copyShareUrl()`
/// works on it too.
#[component]
pub fn ShareUrlField(
    /// Link to share
    url: String,
) -> Element {
    let mut copied = use_signal(|| false);

    let handle_copy = {
        let url = url.clone();
        move |_| {
            let mut flash_copied = move || {
                copied.set(true);
                spawn(async move {
                    gloo_timers::future::TimeoutFuture::new(2000).await;
                    copied.set(false);
                });
            };

            match copy_share_url() {
                CopyOutcome::Copied => flash_copied(),
                CopyOutcome::NoTarget => {
                    log::warn!("Share field not mounted");
                }
                outcome => {
                    // execCommand refused; try the async Clipboard API
                    log::debug!("Falling back to Clipboard API after {:?}", outcome);
                    let url = url.clone();
                    spawn(async move {
                        match copy_to_clipboard(&url).await {
                            Ok(_) => {
                                copied.set(true);
                                gloo_timers::future::TimeoutFuture::new(2000).await;
                                copied.set(false);
                            }
                            Err(e) => {
                                log::debug!("Clipboard API copy failed: {:?}", e);
                            }
                        }
                    });
                }
            }
        }
    };

    rsx! {
        div {
            class: "flex items-center gap-2",
            input {
                id: SHARE_FIELD_ID,
                class: "flex-1 px-3 py-2 rounded-lg border border-border bg-background text-sm",
                r#type: "text",
                readonly: true,
                value: "{url}",
            }
            button {
                class: "px-3 py-2 rounded-lg border border-border hover:bg-accent transition text-sm",
                onclick: handle_copy,
                if *copied.read() { "Copied!" } else { "Copy link" }
            }
        }
    }
}
