//! Document Chat - View Component

use super::state::{Entry, EntryKind};
use super::view_model::DocumentChatVm;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, Flex, FlexAlign, FlexJustify, Input};

#[component]
#[allow(non_snake_case)]
pub fn DocumentChat() -> impl IntoView {
    let vm = DocumentChatVm::new();
    let is_chatting = Memo::new(move |_| vm.state.with(|s| s.is_chatting()));
    let file_name = Memo::new(move |_| {
        vm.state
            .with(|s| s.session().map(|session| session.file_name.clone()))
    });

    view! {
        <div class="doc-chat">
            <header class="doc-chat__header">
                <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                    <h1 class="doc-chat__title">"Document Chat"</h1>
                    <Show when=move || is_chatting.get()>
                        <Flex align=FlexAlign::Center style="gap: 12px;">
                            <span class="file-info">
                                {move || format!("📄 {}", file_name.get().unwrap_or_default())}
                            </span>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| vm.reset()
                            >
                                {icon("upload")}
                                " New upload"
                            </Button>
                        </Flex>
                    </Show>
                </Flex>
            </header>

            <Show
                when=move || is_chatting.get()
                fallback=move || view! { <UploadPanel vm=vm /> }
            >
                <ChatPanel vm=vm />
            </Show>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
fn UploadPanel(vm: DocumentChatVm) -> impl IntoView {
    let selected = move || {
        vm.state.with(|s| {
            s.selected_file()
                .map(|name| format!("Selected: {}", name))
                .unwrap_or_default()
        })
    };

    view! {
        <section class="upload-section">
            <label class="file-picker" for="fileInput">
                {icon("document")}
                <span>"Choose a document to chat about"</span>
            </label>
            <input
                id="fileInput"
                type="file"
                class="file-picker__input"
                node_ref=vm.file_input
                on:change=move |_| vm.on_file_change()
            />
            <div class="selected-file">{selected}</div>

            <Show when=move || vm.state.with(|s| s.upload_visible())>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || vm.state.with(|s| s.is_uploading()))
                    on_click=move |_| vm.upload()
                >
                    {move || vm.state.with(|s| s.upload_label())}
                </Button>
            </Show>
        </section>
    }
}

#[component]
#[allow(non_snake_case)]
fn ChatPanel(vm: DocumentChatVm) -> impl IntoView {
    let entries = Memo::new(move |_| vm.state.with(|s| s.entries().to_vec()));
    let typing = Memo::new(move |_| vm.state.with(|s| s.is_typing()));
    let sending = Memo::new(move |_| vm.state.with(|s| s.is_sending()));

    Effect::new(move |_| {
        entries.track();
        if typing.get() || !entries.with(|e| e.is_empty()) {
            vm.scroll_to_bottom();
        }
    });

    view! {
        <section class="chat-section">
            <div class="chat-messages" node_ref=vm.messages_container>
                <For each=move || entries.get() key=|entry| entry.id let:entry>
                    {render_entry(entry)}
                </For>
                <div class="typing-indicator" class:show=move || typing.get()>
                    <span></span>
                    <span></span>
                    <span></span>
                </div>
            </div>

            <div class="chat-input">
                <div class="message-input" node_ref=vm.message_box>
                    <Input
                        value=vm.new_message
                        placeholder="Ask something about the document..."
                        disabled=Signal::derive(move || sending.get())
                        attr:style="width: 100%;"
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if submits_message(&ev.key(), ev.is_composing()) {
                                ev.prevent_default();
                                vm.send();
                            }
                        }
                    />
                </div>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || sending.get())
                    on_click=move |_| vm.send()
                >
                    {icon("send")}
                    " Send"
                </Button>
            </div>
        </section>
    }
}

/// Enter sends, except while an IME composition is being confirmed.
fn submits_message(key: &str, composing: bool) -> bool {
    key == "Enter" && !composing
}

/// Text goes in as a text node, never as markup.
fn render_entry(entry: Entry) -> AnyView {
    match entry.kind {
        EntryKind::Message(role) => view! {
            <div class=format!("message {}", role.as_str())>
                <div class="message-content">{entry.text}</div>
            </div>
        }
        .into_any(),
        EntryKind::ErrorBanner => view! { <div class="error-message">{entry.text}</div> }.into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_submits_message() {
        assert!(submits_message("Enter", false));
    }

    #[test]
    fn test_enter_during_composition_is_ignored() {
        assert!(!submits_message("Enter", true));
    }

    #[test]
    fn test_other_keys_do_not_submit() {
        assert!(!submits_message("a", false));
        assert!(!submits_message("Tab", false));
    }
}
