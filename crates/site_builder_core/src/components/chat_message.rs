//! crates/site_builder_core/src/components/chat_message.rs
//!
//! A single chat bubble.

use chrono::{DateTime, Utc};

use crate::domain::Message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatBubble {
    pub message_id: String,
    pub text: String,
    pub is_user: bool,
    /// Avatar fallback label: `U` for the user, `AI` for the assistant.
    pub avatar: &'static str,
    pub timestamp: String,
    /// Set on code-generation messages.
    pub has_code: bool,
}

impl From<&Message> for ChatBubble {
    fn from(message: &Message) -> Self {
        let is_user = message.is_from_user();
        Self {
            message_id: message.id.clone(),
            text: message.text.clone(),
            is_user,
            avatar: if is_user { "U" } else { "AI" },
            timestamp: format_timestamp(&message.timestamp),
            has_code: message.has_code(),
        }
    }
}

/// Hours and minutes, 24h clock, UTC.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageKind, Sender};
    use crate::testing::message;

    #[test]
    fn assistant_code_message_renders_left_with_badge() {
        let mut msg = message("m1", Sender::Ai, "Done!");
        msg.kind = MessageKind::CodeGeneration;
        let bubble = ChatBubble::from(&msg);

        assert!(!bubble.is_user);
        assert_eq!(bubble.avatar, "AI");
        assert!(bubble.has_code);
        assert_eq!(bubble.timestamp, "09:05");
    }
}
