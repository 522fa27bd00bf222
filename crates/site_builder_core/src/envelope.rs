//! crates/site_builder_core/src/envelope.rs
//!
//! The one response shape every backend endpoint answers with:
//! `{ "success": bool, "message"?: string, "data"?: T }`.

use serde::{Deserialize, Serialize};

use crate::ports::{PortError, PortResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }

    /// The payload of a successful envelope, if it carried one.
    pub fn success_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }

    /// Converts a declared failure or a missing payload into a `PortError`.
    pub fn into_result(self) -> PortResult<T> {
        if !self.success {
            return Err(PortError::Rejected(
                self.message.unwrap_or_else(|| "request was not successful".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| PortError::Decode("response carried no data".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_data_and_message_default_to_none() {
        let envelope: Envelope<String> = serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(envelope.success);
        assert!(envelope.data.is_none());
        assert!(matches!(envelope.into_result(), Err(PortError::Decode(_))));
    }

    #[test]
    fn declared_failure_keeps_backend_message() {
        let envelope: Envelope<String> =
            serde_json::from_value(json!({ "success": false, "message": "Chat not found" })).unwrap();
        match envelope.into_result() {
            Err(PortError::Rejected(message)) => assert_eq!(message, "Chat not found"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn success_data_ignores_payload_of_failures() {
        let envelope = Envelope {
            success: false,
            message: None,
            data: Some(3),
        };
        assert_eq!(envelope.success_data(), None);
        assert_eq!(Envelope::ok(3).success_data(), Some(3));
    }
}
