//! crates/site_builder_core/src/controller.rs
//!
//! State machine behind the chat page of one conversation: loading the
//! conversation and its code, sending plain or code-generating messages,
//! saving edited code and keeping the live preview in sync.
//!
//! Every mutation is followed by a full refetch of the affected resources;
//! nothing is updated optimistically. Each step of a refresh sequence is
//! independent, so a failed step is logged and the next one still runs.
//! Operations take `&mut self`, so a controller never has two requests in
//! flight and a slow response cannot overwrite a newer one.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::components::chat_message::ChatBubble;
use crate::domain::{CodeSnapshot, CodeState, CodeUpdate, Conversation};
use crate::ports::{ChatApi, PortResult, PreviewApi, SessionStore};

pub const LOGIN_REQUIRED: &str = "Please log in to view conversations";
pub const LOAD_FAILED: &str = "Failed to load conversation";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChatTab {
    #[default]
    Chat,
    Code,
    Preview,
}

/// What happened to a send or save. The page itself stays silent on
/// failures; callers decide whether to surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    /// The backend answered with `success: false`.
    Rejected(Option<String>),
    /// The request itself failed.
    Failed,
    /// Nothing to send, or a send is already running.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSummary {
    pub has_code: bool,
    pub sections: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyView {
    pub title: String,
    pub message_count: usize,
    pub bubbles: Vec<ChatBubble>,
    pub code: CodeSummary,
}

/// What the page should render right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatView {
    Loading,
    /// Load failure, offered with a retry action.
    Error { message: String },
    NotFound,
    Ready(ReadyView),
}

pub struct ChatPageController {
    chat: Arc<dyn ChatApi>,
    preview: Arc<dyn PreviewApi>,
    store: Arc<dyn SessionStore>,
    conversation_id: String,
    conversation: Option<Conversation>,
    loading: bool,
    error: Option<String>,
    draft: String,
    sending: bool,
    current_code: CodeState,
    preview_document: String,
    active_tab: ChatTab,
    preview_loading: bool,
}

impl ChatPageController {
    pub fn new(
        conversation_id: impl Into<String>,
        chat: Arc<dyn ChatApi>,
        preview: Arc<dyn PreviewApi>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            chat,
            preview,
            store,
            conversation_id: conversation_id.into(),
            conversation: None,
            loading: true,
            error: None,
            draft: String::new(),
            sending: false,
            current_code: CodeState::default(),
            preview_document: String::new(),
            active_tab: ChatTab::default(),
            preview_loading: false,
        }
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    pub fn conversation(&self) -> Option<&Conversation> {
        self.conversation.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn current_code(&self) -> &CodeState {
        &self.current_code
    }

    pub fn preview_document(&self) -> &str {
        &self.preview_document
    }

    pub fn active_tab(&self) -> ChatTab {
        self.active_tab
    }

    pub fn is_preview_loading(&self) -> bool {
        self.preview_loading
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Mount sequence: login check, conversation, then current code.
    pub async fn load(&mut self) {
        if !self.store.is_logged_in() {
            self.error = Some(LOGIN_REQUIRED.to_string());
            self.loading = false;
            return;
        }

        self.loading = true;
        self.error = None;
        if self.refresh_conversation().await {
            self.fetch_current_code().await;
        }
        self.loading = false;
    }

    /// Clears the page error and runs the mount sequence again.
    pub async fn retry(&mut self) {
        self.error = None;
        self.load().await;
    }

    /// Refetches the conversation. Returns false when the request failed.
    pub async fn refresh_conversation(&mut self) -> bool {
        match self.chat.get_chat(&self.conversation_id).await {
            Ok(envelope) => {
                if !envelope.success {
                    warn!(
                        conversation_id = %self.conversation_id,
                        "conversation lookup declined: {:?}", envelope.message
                    );
                }
                self.conversation = envelope.success_data();
                debug!(
                    conversation_id = %self.conversation_id,
                    messages = self.conversation.as_ref().map_or(0, |c| c.messages.len()),
                    "conversation refreshed"
                );
                true
            }
            Err(e) => {
                error!(conversation_id = %self.conversation_id, "error fetching conversation: {}", e);
                self.error = Some(LOAD_FAILED.to_string());
                false
            }
        }
    }

    pub async fn fetch_current_code(&mut self) {
        match self.preview.current_code(&self.conversation_id).await {
            Ok(envelope) => match envelope.success_data() {
                Some(current) => self.current_code = current.current_code,
                None => debug!("no current code for conversation"),
            },
            Err(e) => error!(conversation_id = %self.conversation_id, "error fetching current code: {}", e),
        }
    }

    pub async fn fetch_preview(&mut self) {
        self.preview_loading = true;
        match self.preview.preview(&self.conversation_id).await {
            Ok(envelope) => match envelope.success_data() {
                Some(payload) if !payload.preview_document.is_empty() => {
                    debug!(length = payload.preview_document.len(), "preview document updated");
                    self.preview_document = payload.preview_document;
                }
                _ => debug!("no preview document in response"),
            },
            Err(e) => error!(conversation_id = %self.conversation_id, "error fetching preview: {}", e),
        }
        self.preview_loading = false;
    }

    /// Switching to the preview tab always fetches a fresh document.
    pub async fn select_tab(&mut self, tab: ChatTab) {
        self.active_tab = tab;
        if tab == ChatTab::Preview {
            self.fetch_preview().await;
        }
    }

    /// Shows the preview as it was right after the given message.
    pub async fn show_message_preview(&mut self, message_id: &str) {
        self.active_tab = ChatTab::Preview;
        self.preview_loading = true;
        match self
            .preview
            .preview_by_message(&self.conversation_id, message_id)
            .await
        {
            Ok(envelope) => {
                if let Some(payload) = envelope.success_data() {
                    self.preview_document = payload.preview_document;
                }
            }
            Err(e) => error!(message_id, "error fetching message preview: {}", e),
        }
        self.preview_loading = false;
    }

    /// Loads the artifact of a code-generation message into the page's code state.
    pub async fn restore_message_code(&mut self, message_id: &str) -> SendOutcome {
        match self
            .chat
            .get_generated_code(&self.conversation_id, message_id)
            .await
        {
            Ok(envelope) if envelope.success => match envelope.data {
                Some(generated) => {
                    self.current_code = generated.code();
                    SendOutcome::Sent
                }
                None => SendOutcome::Rejected(None),
            },
            Ok(envelope) => SendOutcome::Rejected(envelope.message),
            Err(e) => {
                error!(message_id, "error fetching generated code: {}", e);
                SendOutcome::Failed
            }
        }
    }

    pub async fn code_history(&self) -> PortResult<Vec<CodeSnapshot>> {
        self.preview
            .code_history(&self.conversation_id)
            .await?
            .into_result()
    }

    /// Plain chat turn, followed by a conversation refetch.
    pub async fn send_chat_message(&mut self) -> SendOutcome {
        let Some(prompt) = self.take_prompt() else {
            return SendOutcome::Skipped;
        };

        self.sending = true;
        let outcome = match self.chat.send_chat_message(&self.conversation_id, &prompt).await {
            Ok(envelope) if envelope.success => {
                self.draft.clear();
                self.refresh_conversation().await;
                SendOutcome::Sent
            }
            Ok(envelope) => SendOutcome::Rejected(envelope.message),
            Err(e) => {
                error!("error sending message: {}", e);
                SendOutcome::Failed
            }
        };
        self.sending = false;
        outcome
    }

    /// Code-generating turn, followed by conversation, code and preview refetches.
    pub async fn send_code_generation(&mut self) -> SendOutcome {
        let Some(prompt) = self.take_prompt() else {
            return SendOutcome::Skipped;
        };

        self.sending = true;
        debug!(prompt = %prompt, "requesting code generation");
        let outcome = match self.chat.generate_code(&self.conversation_id, &prompt).await {
            Ok(envelope) if envelope.success => {
                self.draft.clear();
                self.refresh_conversation().await;
                self.fetch_current_code().await;
                self.fetch_preview().await;
                SendOutcome::Sent
            }
            Ok(envelope) => {
                error!("code generation failed: {:?}", envelope.message);
                SendOutcome::Rejected(envelope.message)
            }
            Err(e) => {
                error!("error generating code: {}", e);
                SendOutcome::Failed
            }
        };
        self.sending = false;
        outcome
    }

    /// Saves edited code. Adopted locally only once the backend accepted it.
    pub async fn update_code(&mut self, code: CodeState) -> SendOutcome {
        let update = CodeUpdate::from(&code);
        match self.chat.update_code(&self.conversation_id, &update).await {
            Ok(envelope) if envelope.success => {
                self.current_code = code;
                self.fetch_preview().await;
                SendOutcome::Sent
            }
            Ok(envelope) => SendOutcome::Rejected(envelope.message),
            Err(e) => {
                error!("error updating code: {}", e);
                SendOutcome::Failed
            }
        }
    }

    pub fn view(&self) -> ChatView {
        if self.loading {
            return ChatView::Loading;
        }
        if let Some(message) = &self.error {
            return ChatView::Error {
                message: message.clone(),
            };
        }
        let Some(conversation) = &self.conversation else {
            return ChatView::NotFound;
        };
        ChatView::Ready(ReadyView {
            title: conversation.title.clone(),
            message_count: conversation.messages.len(),
            bubbles: conversation.messages.iter().map(ChatBubble::from).collect(),
            code: CodeSummary {
                has_code: !self.current_code.is_empty(),
                sections: self.current_code.available_sections(),
            },
        })
    }

    fn take_prompt(&self) -> Option<String> {
        let prompt = self.draft.trim();
        if prompt.is_empty() || self.sending {
            return None;
        }
        Some(prompt.to_string())
    }
}
