//! crates/site_builder_core/src/components/sidebar.rs
//!
//! Conversation list with the "new conversation" dialog.
//!
//! The list is fetched once on mount. It is only fetched again on an
//! explicit `reload` or after this sidebar created a conversation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::domain::Conversation;
use crate::ports::{ChatApi, Navigator};

const PREVIEW_CHARS: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub id: String,
    pub title: String,
    pub last_message: Option<String>,
    pub updated: Option<String>,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateDialog {
    pub open: bool,
    pub title: String,
    pub creating: bool,
}

pub struct Sidebar {
    chat: Arc<dyn ChatApi>,
    navigator: Arc<dyn Navigator>,
    conversations: Vec<Conversation>,
    loaded: bool,
    loading: bool,
    error: Option<String>,
    dialog: CreateDialog,
}

impl Sidebar {
    pub fn new(chat: Arc<dyn ChatApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            chat,
            navigator,
            conversations: Vec::new(),
            loaded: false,
            loading: false,
            error: None,
            dialog: CreateDialog::default(),
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dialog(&self) -> &CreateDialog {
        &self.dialog
    }

    /// Mount-time fetch. A second call is a no-op.
    pub async fn load(&mut self) {
        if self.loaded {
            return;
        }
        self.reload().await;
    }

    pub async fn reload(&mut self) {
        self.loading = true;
        self.error = None;
        match self.chat.list_chats().await {
            Ok(envelope) if envelope.success => {
                self.conversations = envelope.data.unwrap_or_default();
                self.loaded = true;
            }
            Ok(envelope) => {
                self.error = Some(
                    envelope
                        .message
                        .unwrap_or_else(|| "Failed to load conversations".to_string()),
                );
            }
            Err(e) => {
                error!("error fetching conversations: {}", e);
                self.error = Some("Failed to load conversations".to_string());
            }
        }
        self.loading = false;
    }

    pub fn open_create_dialog(&mut self) {
        self.dialog = CreateDialog {
            open: true,
            ..CreateDialog::default()
        };
    }

    pub fn close_create_dialog(&mut self) {
        self.dialog = CreateDialog::default();
    }

    pub fn set_new_title(&mut self, title: impl Into<String>) {
        self.dialog.title = title.into();
    }

    /// Creates a conversation from the dialog title and navigates to it.
    /// Returns the new conversation id.
    pub async fn create(&mut self) -> Option<String> {
        let title = self.dialog.title.trim().to_string();
        if title.is_empty() || self.dialog.creating {
            return None;
        }

        self.dialog.creating = true;
        let created = match self.chat.create_chat(&title).await {
            Ok(envelope) => envelope.success_data(),
            Err(e) => {
                error!("error creating conversation: {}", e);
                None
            }
        };
        self.dialog.creating = false;

        let conversation = created?;
        info!(conversation_id = %conversation.id, "conversation created");
        self.close_create_dialog();
        self.navigator.push(&chat_href(&conversation.id));
        self.reload().await;
        Some(conversation.id)
    }

    /// Rows to render. `current_path` marks the open conversation.
    pub fn entries(&self, current_path: &str, now: DateTime<Utc>) -> Vec<SidebarEntry> {
        self.conversations
            .iter()
            .map(|conversation| {
                let href = chat_href(&conversation.id);
                SidebarEntry {
                    id: conversation.id.clone(),
                    title: conversation.title.clone(),
                    last_message: conversation
                        .last_message()
                        .map(|message| truncate(&message.text, PREVIEW_CHARS)),
                    updated: conversation
                        .last_message_at
                        .map(|at| relative_time(at, now)),
                    active: current_path == href,
                    href,
                }
            })
            .collect()
    }
}

fn chat_href(id: &str) -> String {
    format!("/chat/{}", id)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

/// Coarse "time ago" label.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{} min ago", minutes)
    } else if hours < 24 {
        format!("{} hour{} ago", hours, plural(hours))
    } else {
        format!("{} day{} ago", days, plural(days))
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
