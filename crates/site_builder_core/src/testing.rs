//! Scripted in-memory backend used by the unit tests of this crate.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::*;
use crate::envelope::Envelope;
use crate::ports::*;

#[derive(Clone)]
pub(crate) enum Reply<T> {
    Ok(Envelope<T>),
    Fail,
}

impl<T> Default for Reply<T> {
    fn default() -> Self {
        Reply::Fail
    }
}

impl<T: Clone> Reply<T> {
    pub(crate) fn data(data: T) -> Self {
        Reply::Ok(Envelope::ok(data))
    }

    pub(crate) fn rejected(message: &str) -> Self {
        Reply::Ok(Envelope::failure(message))
    }

    fn get(&self) -> PortResult<Envelope<T>> {
        match self {
            Reply::Ok(envelope) => Ok(envelope.clone()),
            Reply::Fail => Err(PortError::Transport("backend unreachable".to_string())),
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    pub calls: Mutex<Vec<String>>,
    pub login: Mutex<Reply<AuthGrant>>,
    pub register: Mutex<Reply<AuthGrant>>,
    pub profile: Mutex<Reply<User>>,
    pub chats: Mutex<Reply<Vec<Conversation>>>,
    pub create: Mutex<Reply<Conversation>>,
    pub chat: Mutex<Reply<Conversation>>,
    pub chat_message: Mutex<Reply<ChatExchange>>,
    pub generate: Mutex<Reply<CodeGeneration>>,
    pub generated_code: Mutex<Reply<GeneratedCode>>,
    pub update: Mutex<Reply<CodeState>>,
    pub last_update: Mutex<Option<CodeUpdate>>,
    pub preview: Mutex<Reply<PreviewPayload>>,
    pub message_preview: Mutex<Reply<PreviewPayload>>,
    pub history: Mutex<Reply<Vec<CodeSnapshot>>>,
    pub current: Mutex<Reply<CurrentCode>>,
}

impl FakeBackend {
    fn log(&self, call: String) {
        self.calls.lock().push(call);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl AuthApi for FakeBackend {
    async fn login(&self, credentials: &Credentials) -> PortResult<Envelope<AuthGrant>> {
        self.log(format!("login {}", credentials.email));
        self.login.lock().get()
    }

    async fn register(&self, registration: &Registration) -> PortResult<Envelope<AuthGrant>> {
        self.log(format!("register {}", registration.email));
        self.register.lock().get()
    }

    async fn profile(&self) -> PortResult<Envelope<User>> {
        self.log("profile".to_string());
        self.profile.lock().get()
    }
}

#[async_trait]
impl ChatApi for FakeBackend {
    async fn list_chats(&self) -> PortResult<Envelope<Vec<Conversation>>> {
        self.log("list_chats".to_string());
        self.chats.lock().get()
    }

    async fn create_chat(&self, title: &str) -> PortResult<Envelope<Conversation>> {
        self.log(format!("create_chat {}", title));
        self.create.lock().get()
    }

    async fn get_chat(&self, chat_id: &str) -> PortResult<Envelope<Conversation>> {
        self.log(format!("get_chat {}", chat_id));
        self.chat.lock().get()
    }

    async fn send_message(&self, chat_id: &str, text: &str) -> PortResult<Envelope<Message>> {
        self.log(format!("send_message {} {}", chat_id, text));
        Err(PortError::Unexpected("send_message is not scripted".to_string()))
    }

    async fn send_chat_message(
        &self,
        chat_id: &str,
        prompt: &str,
    ) -> PortResult<Envelope<ChatExchange>> {
        self.log(format!("send_chat_message {} {}", chat_id, prompt));
        self.chat_message.lock().get()
    }

    async fn generate_code(
        &self,
        chat_id: &str,
        prompt: &str,
    ) -> PortResult<Envelope<CodeGeneration>> {
        self.log(format!("generate_code {} {}", chat_id, prompt));
        self.generate.lock().get()
    }

    async fn get_generated_code(
        &self,
        chat_id: &str,
        message_id: &str,
    ) -> PortResult<Envelope<GeneratedCode>> {
        self.log(format!("get_generated_code {} {}", chat_id, message_id));
        self.generated_code.lock().get()
    }

    async fn update_code(
        &self,
        chat_id: &str,
        update: &CodeUpdate,
    ) -> PortResult<Envelope<CodeState>> {
        self.log(format!("update_code {}", chat_id));
        *self.last_update.lock() = Some(update.clone());
        self.update.lock().get()
    }
}

#[async_trait]
impl PreviewApi for FakeBackend {
    async fn preview(&self, chat_id: &str) -> PortResult<Envelope<PreviewPayload>> {
        self.log(format!("preview {}", chat_id));
        self.preview.lock().get()
    }

    async fn preview_by_message(
        &self,
        chat_id: &str,
        message_id: &str,
    ) -> PortResult<Envelope<PreviewPayload>> {
        self.log(format!("preview_by_message {} {}", chat_id, message_id));
        self.message_preview.lock().get()
    }

    async fn code_history(&self, chat_id: &str) -> PortResult<Envelope<Vec<CodeSnapshot>>> {
        self.log(format!("code_history {}", chat_id));
        self.history.lock().get()
    }

    async fn current_code(&self, chat_id: &str) -> PortResult<Envelope<CurrentCode>> {
        self.log(format!("current_code {}", chat_id));
        self.current.lock().get()
    }
}

pub(crate) fn conversation(id: &str, title: &str, messages: Vec<Message>) -> Conversation {
    Conversation {
        id: id.to_string(),
        title: title.to_string(),
        messages,
        last_message_at: None,
    }
}

pub(crate) fn message(id: &str, sender: Sender, text: &str) -> Message {
    Message {
        id: id.to_string(),
        sender,
        text: text.to_string(),
        timestamp: chrono::DateTime::parse_from_rfc3339("2024-05-01T09:05:00Z")
            .map(|t| t.with_timezone(&chrono::Utc))
            .unwrap_or_default(),
        kind: MessageKind::Text,
        generated_code: None,
    }
}
