use serde::{Deserialize, Serialize};

use crate::domain::analysis::entities::{MessageType, ProfileSnapshot};

/// JSON text/chat request sent to the webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysisRequest {
    pub message: String,
    pub user_profile: ProfileSnapshot,
    pub user_id: String,
    pub is_first_message_of_day: bool,
    pub message_type: MessageType,
}

/// Multipart photo request sent to the webhook; the profile, caption and
/// flags travel as form fields next to the binary image part.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoAnalysisRequest {
    pub image: Vec<u8>,
    pub caption: String,
    pub user_profile: ProfileSnapshot,
    pub user_id: String,
    pub is_first_message_of_day: bool,
    pub message_type: MessageType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Webhook reply: a status plus an answer that is itself either JSON or
/// freeform text (`parser::parse_answer`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WebhookAnswer {
    pub status: ResponseStatus,
    pub answer: String,
}
