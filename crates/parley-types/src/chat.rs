//! Conversation session and history entry types for Parley.
//!
//! A conversation is a [`SessionId`] issued by the backend plus an ordered
//! log of [`Message`]s. Messages carry raw text only; rendering is derived
//! from that text on demand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Opaque backend-issued token correlating follow-up calls to one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
    SystemError,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
            MessageRole::SystemError => write!(f, "system_error"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            "system_error" => Ok(MessageRole::SystemError),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// Whether an entry is a placeholder awaiting a backend answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageState {
    Pending,
    Final,
}

/// Text shown in place of the failed answer when a backend call fails.
pub const FAILURE_TEXT: &str = "Error: Failed to fetch response from server";

/// An entry about to be written to the history log (no position yet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub role: MessageRole,
    pub state: MessageState,
    pub raw_content: String,
}

impl Entry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            state: MessageState::Final,
            raw_content: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            state: MessageState::Final,
            raw_content: text.into(),
        }
    }

    /// Placeholder for an answer that has not arrived yet.
    pub fn pending_assistant() -> Self {
        Self {
            role: MessageRole::Assistant,
            state: MessageState::Pending,
            raw_content: String::new(),
        }
    }

    /// Final entry recording a failed backend call.
    pub fn system_error() -> Self {
        Self {
            role: MessageRole::SystemError,
            state: MessageState::Final,
            raw_content: FAILURE_TEXT.to_string(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == MessageState::Pending
    }
}

/// A positioned entry in the history log.
///
/// `order` is dense from 0 and survives replacement of the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub order: u64,
    pub role: MessageRole,
    pub state: MessageState,
    pub raw_content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn from_entry(order: u64, entry: Entry) -> Self {
        Self {
            order,
            role: entry.role,
            state: entry.state,
            raw_content: entry.raw_content,
            created_at: Utc::now(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == MessageState::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::SystemError,
        ] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
        assert!("robot".parse::<MessageRole>().is_err());
    }

    #[test]
    fn test_message_serialize() {
        let msg = Message::from_entry(3, Entry::system_error());
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"role\":\"system_error\""));
        assert!(json.contains("\"state\":\"final\""));
        assert!(json.contains("\"order\":3"));
    }

    #[test]
    fn test_pending_assistant_is_empty() {
        let entry = Entry::pending_assistant();
        assert!(entry.is_pending());
        assert!(entry.raw_content.is_empty());
        assert_eq!(entry.role, MessageRole::Assistant);
    }

    #[test]
    fn test_session_id_is_transparent() {
        let id = SessionId::new("abc-123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc-123\"");
        assert_eq!(id.to_string(), "abc-123");
    }
}
