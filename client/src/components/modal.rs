//! Generic modal dialog.
//!
//! Closes on backdrop click or Escape. Escape is heard on the window, so it
//! works without the dialog holding focus. Page scrolling is locked while open.

#[cfg(test)]
#[path = "modal_test.rs"]
mod modal_test;

use leptos::prelude::*;

use crate::util::browser::lock_body_scroll;

#[component]
pub fn Modal(
    #[prop(into)] open: Signal<bool>,
    on_close: Callback<()>,
    #[prop(into)] title: String,
    children: ChildrenFn,
) -> impl IntoView {
    Effect::new(move || lock_body_scroll(open.get()));
    on_cleanup(|| lock_body_scroll(false));

    let keys = window_event_listener(leptos::ev::keydown, move |ev| {
        if closes_on_key(open.get_untracked(), &ev.key()) {
            ev.prevent_default();
            on_close.run(());
        }
    });
    on_cleanup(move || keys.remove());

    view! {
        <Show when=move || open.get()>
            <div class="modal__backdrop" on:click=move |_| on_close.run(())>
                <div
                    class="modal"
                    role="dialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:click=move |ev| ev.stop_propagation()
                >
                    <div class="modal__header">
                        <h2>{title.clone()}</h2>
                        <button class="modal__close" title="Close" on:click=move |_| on_close.run(())>
                            "✕"
                        </button>
                    </div>
                    <div class="modal__body">{children()}</div>
                </div>
            </div>
        </Show>
    }
}

/// Whether a key press should dismiss the dialog.
pub fn closes_on_key(open: bool, key: &str) -> bool {
    open && matches!(key, "Escape" | "Esc")
}
