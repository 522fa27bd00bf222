//! services/gateway/src/adapters/backend.rs
//!
//! This module contains the HTTP adapter for the site builder backend.
//! It implements the `AuthApi`, `ChatApi`, `PreviewApi` and `GenerateApi`
//! ports from the `core` crate on top of `reqwest`.
//!
//! Every request carries the stored bearer token when one exists. A 401 from
//! any endpoint clears the stored token and sends the user to the login page
//! before the error is returned to the caller.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use site_builder_core::{
    domain::{
        AuthGrant, ChatExchange, CodeGeneration, CodeSnapshot, CodeState, CodeUpdate,
        Conversation, Credentials, CurrentCode, GeneratedCode, Message, NewConversation,
        OutgoingMessage, PreviewPayload, PromptRequest, Registration, Sender, User,
    },
    envelope::Envelope,
    ports::{
        AuthApi, ChatApi, GenerateApi, Navigator, PortError, PortResult, PreviewApi,
        SessionStore,
    },
};
use std::sync::Arc;
use tracing::{error, warn};
use url::Url;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the backend API ports over HTTP.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl HttpBackend {
    /// Creates a new `HttpBackend` rooted at `base_url`.
    pub fn new(
        client: Client,
        base_url: Url,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            client,
            base_url,
            session,
            navigator,
        }
    }

    fn endpoint(&self, segments: &[&str]) -> PortResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PortError::Unexpected(format!("Invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> PortResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        let builder = self.client.request(method, url);
        Ok(match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> PortResult<Envelope<T>> {
        let request = self.request(Method::GET, segments)?;
        self.execute(request).await
    }

    async fn send<B, T>(&self, method: Method, segments: &[&str], body: &B) -> PortResult<Envelope<T>>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method, segments)?.json(body);
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> PortResult<Envelope<T>> {
        let response = request.send().await.map_err(|e| {
            error!("Backend request failed: {}", e);
            PortError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("Backend rejected the stored token; signing out");
            self.session.remove_token();
            self.navigator.replace("/login");
            return Err(PortError::Unauthorized);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PortError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = failure_message(&bytes, status);
            if status == StatusCode::NOT_FOUND {
                return Err(PortError::NotFound(message));
            }
            return Err(PortError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            error!("Could not decode backend response: {}", e);
            PortError::Decode(e.to_string())
        })
    }
}

/// The envelope's `message` when the failure body carries one, else the status reason.
fn failure_message(body: &[u8], status: StatusCode) -> String {
    serde_json::from_slice::<Envelope<serde_json::Value>>(body)
        .ok()
        .and_then(|envelope| envelope.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string())
}

//=========================================================================================
// Port Implementations
//=========================================================================================

#[async_trait]
impl AuthApi for HttpBackend {
    async fn login(&self, credentials: &Credentials) -> PortResult<Envelope<AuthGrant>> {
        self.send(Method::POST, &["api", "login"], credentials).await
    }

    async fn register(&self, registration: &Registration) -> PortResult<Envelope<AuthGrant>> {
        self.send(Method::POST, &["api", "register"], registration)
            .await
    }

    async fn profile(&self) -> PortResult<Envelope<User>> {
        self.get(&["api", "profile"]).await
    }
}

#[async_trait]
impl ChatApi for HttpBackend {
    async fn list_chats(&self) -> PortResult<Envelope<Vec<Conversation>>> {
        self.get(&["api", "chat"]).await
    }

    async fn create_chat(&self, title: &str) -> PortResult<Envelope<Conversation>> {
        let body = NewConversation {
            title: title.to_string(),
        };
        self.send(Method::POST, &["api", "chat", "create"], &body)
            .await
    }

    async fn get_chat(&self, chat_id: &str) -> PortResult<Envelope<Conversation>> {
        self.get(&["api", "chat", chat_id]).await
    }

    async fn send_message(&self, chat_id: &str, text: &str) -> PortResult<Envelope<Message>> {
        let body = OutgoingMessage {
            sender: Sender::User,
            text: text.to_string(),
        };
        self.send(Method::POST, &["api", "chat", chat_id, "message"], &body)
            .await
    }

    async fn send_chat_message(
        &self,
        chat_id: &str,
        prompt: &str,
    ) -> PortResult<Envelope<ChatExchange>> {
        let body = PromptRequest {
            prompt: prompt.to_string(),
        };
        self.send(Method::POST, &["api", "chat", chat_id, "chat"], &body)
            .await
    }

    async fn generate_code(
        &self,
        chat_id: &str,
        prompt: &str,
    ) -> PortResult<Envelope<CodeGeneration>> {
        let body = PromptRequest {
            prompt: prompt.to_string(),
        };
        self.send(Method::POST, &["api", "chat", chat_id, "generate"], &body)
            .await
    }

    async fn get_generated_code(
        &self,
        chat_id: &str,
        message_id: &str,
    ) -> PortResult<Envelope<GeneratedCode>> {
        self.get(&["api", "chat", chat_id, "code", message_id]).await
    }

    async fn update_code(
        &self,
        chat_id: &str,
        update: &CodeUpdate,
    ) -> PortResult<Envelope<CodeState>> {
        self.send(Method::PUT, &["api", "chat", chat_id, "code"], update)
            .await
    }
}

#[async_trait]
impl PreviewApi for HttpBackend {
    async fn preview(&self, chat_id: &str) -> PortResult<Envelope<PreviewPayload>> {
        self.get(&["api", "preview", chat_id]).await
    }

    async fn preview_by_message(
        &self,
        chat_id: &str,
        message_id: &str,
    ) -> PortResult<Envelope<PreviewPayload>> {
        self.get(&["api", "preview", chat_id, "message", message_id])
            .await
    }

    async fn code_history(&self, chat_id: &str) -> PortResult<Envelope<Vec<CodeSnapshot>>> {
        self.get(&["api", "preview", chat_id, "history"]).await
    }

    async fn current_code(&self, chat_id: &str) -> PortResult<Envelope<CurrentCode>> {
        self.get(&["api", "preview", chat_id, "current"]).await
    }
}

#[async_trait]
impl GenerateApi for HttpBackend {
    async fn generate(&self, prompt: &str) -> PortResult<Envelope<GeneratedCode>> {
        let body = PromptRequest {
            prompt: prompt.to_string(),
        };
        self.send(Method::POST, &["api", "generate"], &body).await
    }
}
