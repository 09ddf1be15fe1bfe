//! Chat message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::Profile;

/// Who authored a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// Classification attached to an assistant reply.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Emergency,
    Warning,
    Info,
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Emergency => write!(f, "emergency"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// One turn in the conversation. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MessageKind>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quick_replies: Vec<String>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender: Sender::User,
            created_at: Utc::now(),
            kind: None,
            quick_replies: Vec::new(),
        }
    }

    pub fn assistant(
        text: impl Into<String>,
        kind: Option<MessageKind>,
        quick_replies: &[&str],
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender: Sender::Assistant,
            created_at: Utc::now(),
            kind,
            quick_replies: quick_replies.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    pub fn is_assistant(&self) -> bool {
        self.sender == Sender::Assistant
    }
}

/// Opening message shown when the chat starts.
///
/// Display-only: it is never appended to a [`Conversation`](super::Conversation),
/// so every logged assistant message is a reply to a user message.
pub fn greeting(profile: &Profile) -> Message {
    Message::assistant(
        format!(
            "Namaste {}! I'm your personal health assistant. I can help you with health \
             information, symptom checking, vaccination schedules, and emergency guidance. \
             How can I assist you today?",
            profile.name
        ),
        None,
        &[
            "Check symptoms",
            "Vaccination info",
            "Health tips",
            "Emergency help",
        ],
    )
}

/// Footer shown under the input line.
pub const DISCLAIMER: &str = "⚠️ This is not a substitute for professional medical advice";
