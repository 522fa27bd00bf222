//! crates/site_builder_core/src/ports.rs
//!
//! Defines the service contracts (traits) the client logic talks through.
//! The backend API groups, the browser-style session storage and page
//! navigation are all ports, so the session provider, the chat page and the
//! components stay independent of the HTTP stack that serves them.

use async_trait::async_trait;

use crate::domain::{
    AuthGrant, ChatExchange, CodeGeneration, CodeSnapshot, CodeUpdate, CodeState, Conversation,
    Credentials, CurrentCode, GeneratedCode, Message, PreviewPayload, Registration, User,
};
use crate::envelope::Envelope;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Could not decode response: {0}")]
    Decode(String),
    #[error("Backend responded with status {status}: {message}")]
    Backend { status: u16, message: String },
    #[error("Request rejected: {0}")]
    Rejected(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Backend API Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> PortResult<Envelope<AuthGrant>>;

    async fn register(&self, registration: &Registration) -> PortResult<Envelope<AuthGrant>>;

    async fn profile(&self) -> PortResult<Envelope<User>>;
}

#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn list_chats(&self) -> PortResult<Envelope<Vec<Conversation>>>;

    async fn create_chat(&self, title: &str) -> PortResult<Envelope<Conversation>>;

    async fn get_chat(&self, chat_id: &str) -> PortResult<Envelope<Conversation>>;

    /// Appends a user message without asking the assistant for a reply.
    async fn send_message(&self, chat_id: &str, text: &str) -> PortResult<Envelope<Message>>;

    /// Plain chat turn: the assistant answers without producing code.
    async fn send_chat_message(
        &self,
        chat_id: &str,
        prompt: &str,
    ) -> PortResult<Envelope<ChatExchange>>;

    /// Chat turn that produces a new HTML/CSS/JS artifact.
    async fn generate_code(
        &self,
        chat_id: &str,
        prompt: &str,
    ) -> PortResult<Envelope<CodeGeneration>>;

    async fn get_generated_code(
        &self,
        chat_id: &str,
        message_id: &str,
    ) -> PortResult<Envelope<GeneratedCode>>;

    async fn update_code(
        &self,
        chat_id: &str,
        update: &CodeUpdate,
    ) -> PortResult<Envelope<CodeState>>;
}

#[async_trait]
pub trait PreviewApi: Send + Sync {
    async fn preview(&self, chat_id: &str) -> PortResult<Envelope<PreviewPayload>>;

    async fn preview_by_message(
        &self,
        chat_id: &str,
        message_id: &str,
    ) -> PortResult<Envelope<PreviewPayload>>;

    async fn code_history(&self, chat_id: &str) -> PortResult<Envelope<Vec<CodeSnapshot>>>;

    async fn current_code(&self, chat_id: &str) -> PortResult<Envelope<CurrentCode>>;
}

#[async_trait]
pub trait GenerateApi: Send + Sync {
    /// Standalone generation outside any conversation.
    async fn generate(&self, prompt: &str) -> PortResult<Envelope<GeneratedCode>>;
}

//=========================================================================================
// Client Environment Ports
//=========================================================================================

/// Storage key of the bearer token, in local storage and as a cookie name.
pub const TOKEN_KEY: &str = "authToken";
/// Storage key of the serialized user record.
pub const USER_DATA_KEY: &str = "userData";
/// Lifetime of the token cookie.
pub const TOKEN_COOKIE_DAYS: i64 = 7;

/// Tab-lifetime client storage: local storage plus the token cookie mirror.
///
/// `set_token` and `remove_token` always write both places so that the
/// route gate and the API client never see different tokens through this
/// interface.
pub trait SessionStore: Send + Sync {
    fn token(&self) -> Option<String>;

    fn set_token(&self, token: &str);

    fn remove_token(&self);

    /// The token as the route gate sees it.
    fn cookie_token(&self) -> Option<String>;

    fn user_data(&self) -> Option<String>;

    fn set_user_data(&self, serialized: &str);

    fn remove_user_data(&self);

    fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }
}

/// Page navigation.
pub trait Navigator: Send + Sync {
    /// Client-side navigation that keeps in-memory state.
    fn push(&self, path: &str);

    /// Hard navigation: the current page and all in-memory state are discarded.
    fn replace(&self, path: &str);

    /// Reloads the current location, discarding in-memory state.
    fn reload(&self);
}
