use crate::domain::a001_document_chat::ui::chat::DocumentChat;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <main class="app">
            <DocumentChat />
        </main>
    }
}
