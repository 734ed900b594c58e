//! Document Chat - View Model

use super::banner_timers::BannerTimers;
use super::model::{send_chat, upload_document};
use super::state::{ChatState, SendOutcome, UploadOutcome, BANNER_LIFETIME_MS};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

#[derive(Clone, Copy)]
pub struct DocumentChatVm {
    pub state: RwSignal<ChatState>,
    pub new_message: RwSignal<String>,
    pub file_input: NodeRef<leptos::html::Input>,
    /// Wrapper around the message input, used to move focus into it.
    pub message_box: NodeRef<leptos::html::Div>,
    pub messages_container: NodeRef<leptos::html::Div>,
    banner_timers: StoredValue<BannerTimers<Timeout>, LocalStorage>,
}

impl DocumentChatVm {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(ChatState::new()),
            new_message: RwSignal::new(String::new()),
            file_input: NodeRef::new(),
            message_box: NodeRef::new(),
            messages_container: NodeRef::new(),
            banner_timers: StoredValue::new_local(BannerTimers::new()),
        }
    }

    fn picked_file(&self) -> Option<web_sys::File> {
        self.file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
    }

    pub fn on_file_change(&self) {
        let name = self.picked_file().map(|f| f.name());
        self.state.update(|s| s.select_file(name.as_deref()));
    }

    pub fn upload(&self) {
        let Some(file) = self.picked_file() else {
            return;
        };
        let Some(ticket) = self.state.try_update(|s| s.begin_upload()).flatten() else {
            return;
        };

        let vm = *self;
        wasm_bindgen_futures::spawn_local(async move {
            let result = upload_document(&file).await;
            match vm.state.try_update(|s| s.finish_upload(ticket, result)) {
                Some(UploadOutcome::Started(session)) => {
                    log::info!(
                        "document '{}' uploaded, thread {}",
                        session.file_name,
                        session.thread_id
                    );
                    vm.scroll_to_bottom();
                    vm.focus_message_input();
                }
                Some(UploadOutcome::Rejected(text)) => {
                    log::error!("{}", text);
                    if let Some(window) = web_sys::window() {
                        let _ = window.alert_with_message(&text);
                    }
                }
                Some(UploadOutcome::Stale) | None => {
                    log::debug!("upload settled after reset, result dropped");
                }
            }
        });
    }

    pub fn send(&self) {
        let text = self.new_message.get_untracked();
        let Some(ticket) = self.state.try_update(|s| s.begin_send(&text)).flatten() else {
            return;
        };
        self.new_message.set(String::new());
        self.scroll_to_bottom();

        let vm = *self;
        wasm_bindgen_futures::spawn_local(async move {
            let result = send_chat(&ticket.request).await;
            match vm.state.try_update(|s| s.finish_send(&ticket, result)) {
                Some(SendOutcome::Answered) => {}
                Some(SendOutcome::Failed { banner_id, message }) => {
                    log::error!("Error: {}", message);
                    vm.schedule_banner_removal(banner_id);
                }
                Some(SendOutcome::Stale) | None => {
                    log::debug!("chat answer for a discarded session dropped");
                    return;
                }
            }
            vm.scroll_to_bottom();
            vm.focus_message_input();
        });
    }

    pub fn reset(&self) {
        let banners = self.state.try_update(|s| s.reset()).unwrap_or_default();
        self.banner_timers.update_value(|timers| timers.cancel(banners));
        self.new_message.set(String::new());
        if let Some(input) = self.file_input.get_untracked() {
            input.set_value("");
        }
        log::info!("session reset");
    }

    fn schedule_banner_removal(&self, banner_id: u64) {
        let state = self.state;
        let timeout = Timeout::new(BANNER_LIFETIME_MS, move || {
            state.try_update(|s| s.dismiss_banner(banner_id));
        });

        self.banner_timers.update_value(|timers| {
            timers.schedule(banner_id, timeout, |id| {
                state.with_untracked(|s| s.has_entry(id))
            });
        });
    }

    pub fn scroll_to_bottom(&self) {
        if let Some(container) = self.messages_container.get_untracked() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    }

    fn focus_message_input(&self) {
        let message_box = self.message_box;
        request_animation_frame(move || {
            let input = message_box
                .get_untracked()
                .and_then(|wrapper| wrapper.query_selector("input").ok().flatten())
                .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());
            if let Some(input) = input {
                let _ = input.focus();
            }
        });
    }
}
