//! Chat widget: connect controls, message list, public and private inputs.

use leptos::prelude::*;

use crate::app::SessionHandle;
use crate::components::emoji_picker::EmojiPicker;
use crate::state::chat::ConnectionStatus;
use crate::state::view::{ViewState, message_count, message_list};

/// Whole chat widget. Input fields write straight into the view state; the
/// buttons hand off to the session, which reads them back through `View`.
#[component]
pub fn ChatPanel() -> impl IntoView {
    let view_state = expect_context::<RwSignal<ViewState>>();
    let session = expect_context::<SessionHandle>();
    let messages_ref = NodeRef::<leptos::html::Div>::new();
    let messages = message_list(view_state);
    let message_count = message_count(view_state);

    // Keep the newest message in sight.
    Effect::new(move || {
        message_count.track();
        if let Some(el) = messages_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    let status_label = move || match view_state.with(|v| v.status) {
        ConnectionStatus::Connected => "Connected",
        ConnectionStatus::Connecting => "Connecting...",
        ConnectionStatus::Disconnected => "Disconnected",
    };

    let on_connect = move |_| session.run(|s| s.on_connect_clicked());
    let on_disconnect = move |_| session.update(|s| s.disconnect());
    let on_send = move |_| session.update(|s| s.on_send_clicked());
    let on_send_private = move |_| session.run(|s| s.on_send_private_clicked());
    let on_emoji = move |_| session.update(|s| s.on_emoji_picker_clicked());

    let on_message_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            session.update(|s| s.on_send_clicked());
        }
    };

    let on_private_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            session.run(|s| s.on_send_private_clicked());
        }
    };

    view! {
        <div class="chat-panel">
            <div class="chat-panel__connect">
                <input
                    class="chat-panel__username"
                    type="text"
                    placeholder="Username"
                    prop:value=move || view_state.with(|v| v.username.clone())
                    on:input=move |ev| view_state.update(|v| v.username = event_target_value(&ev))
                    disabled=move || !view_state.with(ViewState::connect_enabled)
                />
                <button
                    class="btn btn--primary"
                    on:click=on_connect
                    disabled=move || !view_state.with(ViewState::connect_enabled)
                >
                    "Connect"
                </button>
                <button
                    class="btn"
                    on:click=on_disconnect
                    disabled=move || !view_state.with(ViewState::disconnect_enabled)
                >
                    "Disconnect"
                </button>
                <span class="chat-panel__status">{status_label}</span>
            </div>

            <Show when=move || view_state.with(ViewState::chat_area_visible)>
                <div class="chat-panel__messages" node_ref=messages_ref>
                    {move || {
                        messages
                            .get()
                            .into_iter()
                            .map(|msg| {
                                view! {
                                    <div class=format!("chat-panel__message {}", msg.style.css_class())>
                                        <strong class="chat-panel__author">{msg.label}</strong>
                                        ": "
                                        <span class="chat-panel__text">{msg.content}</span>
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </div>

                <div class="chat-panel__input-row">
                    <input
                        class="chat-panel__input"
                        type="text"
                        placeholder="Type a message..."
                        prop:value=move || view_state.with(|v| v.message.clone())
                        on:input=move |ev| view_state.update(|v| v.message = event_target_value(&ev))
                        on:keydown=on_message_keydown
                    />
                    <button class="btn chat-panel__emoji" type="button" on:click=on_emoji>
                        "😀"
                    </button>
                    <button class="btn btn--primary chat-panel__send" on:click=on_send>
                        "Send"
                    </button>
                </div>
                <EmojiPicker/>

                <div class="chat-panel__private-row">
                    <input
                        class="chat-panel__receiver"
                        type="text"
                        placeholder="Receiver"
                        prop:value=move || view_state.with(|v| v.private_receiver.clone())
                        on:input=move |ev| {
                            view_state.update(|v| v.private_receiver = event_target_value(&ev));
                        }
                    />
                    <input
                        class="chat-panel__private-input"
                        type="text"
                        placeholder="Private message..."
                        prop:value=move || view_state.with(|v| v.private_message.clone())
                        on:input=move |ev| {
                            view_state.update(|v| v.private_message = event_target_value(&ev));
                        }
                        on:keydown=on_private_keydown
                    />
                    <button class="btn chat-panel__send-private" on:click=on_send_private>
                        "Send Private"
                    </button>
                </div>
            </Show>
        </div>
    }
}
