pub mod components;
pub mod controller;
pub mod cookies;
pub mod domain;
pub mod envelope;
pub mod markup;
pub mod navigation;
pub mod ports;
pub mod session;
pub mod storage;
pub mod token;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{ChatPageController, ChatTab, ChatView, SendOutcome};
pub use domain::{
    AuthGrant, ChatExchange, CodeGeneration, CodeSnapshot, CodeState, CodeUpdate, Conversation,
    Credentials, CurrentCode, GeneratedCode, Message, MessageKind, PreviewPayload, Registration,
    Sender, User,
};
pub use envelope::Envelope;
pub use navigation::HistoryNavigator;
pub use ports::{
    AuthApi, ChatApi, GenerateApi, Navigator, PortError, PortResult, PreviewApi, SessionStore,
};
pub use session::{AuthDiagnostics, AuthSession, AuthStatus};
pub use storage::MemorySessionStore;
