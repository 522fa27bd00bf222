//! crates/site_builder_core/src/domain.rs
//!
//! Defines the records the backend owns and the client mirrors into its
//! session state, plus the request payloads sent back to it.
//! Field names follow the backend's camelCase JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//=========================================================================================
// Conversations and Messages
//=========================================================================================

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// Whether a message is plain chat or produced a code artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Text,
    CodeGeneration,
}

/// The HTML/CSS/JS artifact attached to a code-generation message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCode {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub js: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

impl GeneratedCode {
    pub fn code(&self) -> CodeState {
        CodeState {
            html: self.html.clone(),
            css: self.css.clone(),
            js: self.js.clone(),
        }
    }
}

/// A single chat message. Immutable once the backend has created it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(alias = "_id")]
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "messageType", default)]
    pub kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_code: Option<GeneratedCode>,
}

impl Message {
    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }

    pub fn has_code(&self) -> bool {
        self.kind == MessageKind::CodeGeneration
    }
}

/// A chat thread. Messages are append-only and ordered oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub last_message_at: Option<DateTime<Utc>>,
}

impl Conversation {
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

//=========================================================================================
// Code State and Preview
//=========================================================================================

/// The current code of a conversation. Replaced wholesale on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeState {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub js: String,
}

impl CodeState {
    pub fn is_empty(&self) -> bool {
        self.html.is_empty() && self.css.is_empty() && self.js.is_empty()
    }

    /// Labels of the sections that currently hold code, in editor order.
    pub fn available_sections(&self) -> Vec<&'static str> {
        [("HTML", &self.html), ("CSS", &self.css), ("JS", &self.js)]
            .into_iter()
            .filter(|(_, body)| !body.is_empty())
            .map(|(label, _)| label)
            .collect()
    }
}

/// Response payload of the current-code endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentCode {
    #[serde(default)]
    pub current_code: CodeState,
}

/// Response payload of the preview endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewPayload {
    #[serde(default)]
    pub preview_document: String,
}

/// One entry of a conversation's code history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSnapshot {
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(flatten)]
    pub code: CodeState,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

/// Reply payload of the plain chat endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatExchange {
    #[serde(default)]
    pub user_message: Option<Message>,
    #[serde(default)]
    pub ai_message: Option<Message>,
}

/// Reply payload of the in-conversation code generation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeGeneration {
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub generated_code: Option<GeneratedCode>,
}

//=========================================================================================
// Users and Auth
//=========================================================================================

/// The signed-in user as mirrored into session storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "name", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl User {
    /// Username when set, then email, then a generic label.
    pub fn display_name(&self) -> &str {
        match self.username.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ if !self.email.is_empty() => &self.email,
            _ => "User",
        }
    }
}

/// Response payload of login and register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthGrant {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

//=========================================================================================
// Request Payloads
//=========================================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewConversation {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub sender: Sender,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

/// A partial code update; absent sections are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub js: Option<String>,
}

impl From<&CodeState> for CodeUpdate {
    fn from(code: &CodeState) -> Self {
        Self {
            html: Some(code.html.clone()),
            css: Some(code.css.clone()),
            js: Some(code.js.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_accepts_backend_field_names() {
        let message: Message = serde_json::from_value(json!({
            "_id": "m1",
            "sender": "ai",
            "text": "Here is your page",
            "timestamp": "2024-05-01T10:15:00Z",
            "messageType": "code_generation",
            "generatedCode": {
                "html": "<h1>Hi</h1>",
                "css": "",
                "js": "",
                "prompt": "a heading",
                "generatedAt": "2024-05-01T10:15:00Z"
            }
        }))
        .unwrap();

        assert_eq!(message.id, "m1");
        assert!(!message.is_from_user());
        assert!(message.has_code());
        assert_eq!(message.generated_code.unwrap().code().html, "<h1>Hi</h1>");
    }

    #[test]
    fn conversation_defaults_to_no_messages() {
        let conversation: Conversation =
            serde_json::from_value(json!({ "id": "c1", "title": "Test Page" })).unwrap();
        assert!(conversation.messages.is_empty());
        assert!(conversation.last_message().is_none());
    }

    #[test]
    fn code_state_reports_present_sections() {
        let code = CodeState {
            html: "<p>x</p>".into(),
            css: String::new(),
            js: "alert(1)".into(),
        };
        assert_eq!(code.available_sections(), vec!["HTML", "JS"]);
        assert!(!code.is_empty());
        assert!(CodeState::default().is_empty());
    }

    #[test]
    fn code_update_omits_missing_sections() {
        let update = CodeUpdate {
            css: Some("body{}".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "css": "body{}" }));
    }

    #[test]
    fn display_name_falls_back_in_order() {
        let mut user = User {
            id: "u1".into(),
            email: "a@b.c".into(),
            username: Some("ana".into()),
        };
        assert_eq!(user.display_name(), "ana");
        user.username = Some(String::new());
        assert_eq!(user.display_name(), "a@b.c");
        user.email.clear();
        assert_eq!(user.display_name(), "User");
    }

    #[test]
    fn code_snapshot_flattens_code_fields() {
        let snapshot: CodeSnapshot = serde_json::from_value(json!({
            "messageId": "m2",
            "html": "<div></div>",
            "css": "div{}",
            "js": "",
            "prompt": "a div"
        }))
        .unwrap();
        assert_eq!(snapshot.code.css, "div{}");
        assert_eq!(snapshot.message_id.as_deref(), Some("m2"));
    }
}
