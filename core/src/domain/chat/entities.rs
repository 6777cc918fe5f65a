use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

/// One entry of the append-only chat history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub content: String,
    pub image_path: Option<String>,
    /// Set on a user message whose delivery failed, so the presentation
    /// layer can offer a resend.
    pub retryable: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

impl From<&str> for ChatRole {
    fn from(s: &str) -> Self {
        match s {
            "user" => ChatRole::User,
            _ => ChatRole::Assistant,
        }
    }
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: String, image_path: Option<String>) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            role,
            content,
            image_path,
            retryable: false,
            created_at: now,
        }
    }

    pub fn user(content: String, image_path: Option<String>) -> Self {
        Self::new(ChatRole::User, content, image_path)
    }

    pub fn assistant(content: String) -> Self {
        Self::new(ChatRole::Assistant, content, None)
    }
}
