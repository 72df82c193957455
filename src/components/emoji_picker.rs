//! Emoji overlay shown above the message input.

use leptos::prelude::*;

use crate::app::SessionHandle;
use crate::state::view::ViewState;

/// Grid of glyphs; clicking one appends it to the message input.
#[component]
pub fn EmojiPicker() -> impl IntoView {
    let view_state = expect_context::<RwSignal<ViewState>>();
    let session = expect_context::<SessionHandle>();

    move || {
        let glyphs = view_state.with(|v| v.emoji_picker.clone())?;
        let buttons = glyphs
            .into_iter()
            .map(|glyph| {
                let label = glyph.clone();
                view! {
                    <button
                        class="emoji-picker__glyph"
                        type="button"
                        on:click=move |_| session.update(|s| s.on_emoji_selected(&glyph))
                    >
                        {label}
                    </button>
                }
            })
            .collect::<Vec<_>>();
        Some(view! { <div class="emoji-picker">{buttons}</div> })
    }
}
