use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    chat::{entities::ChatMessage, value_objects::SendMessageInput},
    common::entities::app_errors::CoreError,
};

/// Repository trait for the append-only chat history
#[cfg_attr(test, mockall::automock)]
pub trait ChatMessageRepository: Send + Sync {
    fn append(
        &self,
        message: ChatMessage,
    ) -> impl Future<Output = Result<ChatMessage, CoreError>> + Send;

    /// Full history in chronological order.
    fn list(&self) -> impl Future<Output = Result<Vec<ChatMessage>, CoreError>> + Send;

    fn count_on_date(&self, date: NaiveDate)
        -> impl Future<Output = Result<u64, CoreError>> + Send;

    fn mark_retryable(&self, id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn delete(&self, id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn clear(&self) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Service trait for the assistant conversation
pub trait ChatService: Send + Sync {
    /// Persist the user message, call the webhook, persist and return the
    /// assistant reply. On failure the user message is flagged retryable
    /// and the error propagates.
    fn send_message(
        &self,
        input: SendMessageInput,
    ) -> impl Future<Output = Result<ChatMessage, CoreError>> + Send;

    fn get_history(&self) -> impl Future<Output = Result<Vec<ChatMessage>, CoreError>> + Send;

    fn delete_message(&self, id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn clear_history(&self) -> impl Future<Output = Result<(), CoreError>> + Send;
}
