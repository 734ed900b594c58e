//! Document Chat - controller state
//!
//! All transitions of the upload/chat screen live here, free of DOM and
//! network code, so the view only forwards events and performs the side
//! effects an outcome asks for (alert, focus, timer).
//!
//! Every request is issued with a ticket carrying the session epoch. `reset`
//! bumps the epoch, so an answer that arrives for a discarded session is
//! dropped instead of being rendered into the next one.

use super::model::ApiError;
use contracts::domain::a001_document_chat::{
    ChatRequest, ChatResponse, ChatRole, UploadResponse,
};

/// How long an error banner stays in the message list.
pub const BANNER_LIFETIME_MS: u32 = 5_000;

pub const UPLOAD_LABEL: &str = "Upload & Start Chat";
pub const UPLOAD_BUSY_LABEL: &str = "Uploading...";

/// Active conversation about one uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub thread_id: String,
    pub file_name: String,
}

/// Which screen is shown. A chat screen always owns its session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Upload,
    Chat(Session),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Message(ChatRole),
    ErrorBanner,
}

/// One rendered row of the message list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: u64,
    pub kind: EntryKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket {
    epoch: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTicket {
    epoch: u64,
    pub request: ChatRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Chat screen is up; focus the message box.
    Started(Session),
    /// Show a blocking alert with this text.
    Rejected(String),
    /// The screen was reset while the upload was in flight.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Answered,
    /// A banner was added; schedule its removal.
    Failed { banner_id: u64, message: String },
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatState {
    screen: Screen,
    selected_file: Option<String>,
    uploading: bool,
    sending: bool,
    typing: bool,
    entries: Vec<Entry>,
    next_entry_id: u64,
    epoch: u64,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.screen {
            Screen::Chat(session) => Some(session),
            Screen::Upload => None,
        }
    }

    pub fn is_chatting(&self) -> bool {
        self.session().is_some()
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.selected_file.as_deref()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Upload action is offered only once a file is picked.
    pub fn upload_visible(&self) -> bool {
        self.selected_file.is_some()
    }

    pub fn upload_label(&self) -> &'static str {
        if self.uploading {
            UPLOAD_BUSY_LABEL
        } else {
            UPLOAD_LABEL
        }
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn has_entry(&self, id: u64) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// File picker changed. `None` means the selection was cleared.
    pub fn select_file(&mut self, name: Option<&str>) {
        self.selected_file = name.map(str::to_string);
    }

    /// Marks the upload control busy. `None` when there is nothing to upload.
    pub fn begin_upload(&mut self) -> Option<UploadTicket> {
        if self.uploading || self.is_chatting() || self.selected_file.is_none() {
            return None;
        }
        self.uploading = true;
        Some(UploadTicket { epoch: self.epoch })
    }

    pub fn finish_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<UploadResponse, ApiError>,
    ) -> UploadOutcome {
        if ticket.epoch != self.epoch {
            return UploadOutcome::Stale;
        }
        self.uploading = false;

        match result {
            Ok(resp) => {
                let session = Session {
                    thread_id: resp.thread_id,
                    file_name: resp.filename,
                };
                self.screen = Screen::Chat(session.clone());
                self.push(EntryKind::Message(ChatRole::System), resp.message);
                UploadOutcome::Started(session)
            }
            Err(e) => UploadOutcome::Rejected(format!("Error: {}", e)),
        }
    }

    /// Takes `text` as the next user message.
    ///
    /// Blank text and text without a session are ignored. Otherwise the
    /// input is locked, the message is rendered and the typing indicator
    /// shown; the caller clears its input box when a ticket comes back.
    pub fn begin_send(&mut self, text: &str) -> Option<ChatTicket> {
        if self.sending {
            return None;
        }
        let message = text.trim().to_string();
        if message.is_empty() {
            return None;
        }
        let thread_id = self.session()?.thread_id.clone();

        self.sending = true;
        self.push(EntryKind::Message(ChatRole::User), message.clone());
        self.typing = true;

        Some(ChatTicket {
            epoch: self.epoch,
            request: ChatRequest { message, thread_id },
        })
    }

    pub fn finish_send(
        &mut self,
        ticket: &ChatTicket,
        result: Result<ChatResponse, ApiError>,
    ) -> SendOutcome {
        if ticket.epoch != self.epoch {
            return SendOutcome::Stale;
        }
        self.typing = false;
        self.sending = false;

        match result {
            Ok(resp) => {
                self.push(EntryKind::Message(ChatRole::Assistant), resp.response);
                SendOutcome::Answered
            }
            Err(e) => {
                let message = e.to_string();
                let banner_id = self.push(EntryKind::ErrorBanner, format!("Error: {}", message));
                SendOutcome::Failed { banner_id, message }
            }
        }
    }

    /// Back to the upload screen with nothing kept.
    ///
    /// Returns the ids of banners that were still shown so their removal
    /// timers can be cancelled.
    pub fn reset(&mut self) -> Vec<u64> {
        let banners = self
            .entries
            .iter()
            .filter(|e| e.kind == EntryKind::ErrorBanner)
            .map(|e| e.id)
            .collect();

        *self = Self {
            next_entry_id: self.next_entry_id,
            epoch: self.epoch + 1,
            ..Self::default()
        };
        banners
    }

    /// Removes a banner whose display window elapsed.
    pub fn dismiss_banner(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|e| !(e.id == id && e.kind == EntryKind::ErrorBanner));
        self.entries.len() != before
    }

    fn push(&mut self, kind: EntryKind, text: String) -> u64 {
        let id = self.next_entry_id;
        self.next_entry_id += 1;
        self.entries.push(Entry { id, kind, text });
        id
    }
}
