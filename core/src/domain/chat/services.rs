use tracing::{debug, warn};

use crate::domain::{
    analysis::{
        helpers::classify_message,
        ports::AnalysisClient,
        value_objects::{ResponseStatus, TextAnalysisRequest},
    },
    chat::{
        entities::ChatMessage,
        ports::{ChatMessageRepository, ChatService},
        value_objects::SendMessageInput,
    },
    common::{entities::app_errors::CoreError, generate_random_string, services::Service},
    food::ports::MealRepository,
    user::ports::UserProfileRepository,
};
use uuid::Uuid;

impl<U, M, C, A> Service<U, M, C, A>
where
    U: UserProfileRepository,
    M: MealRepository,
    C: ChatMessageRepository,
    A: AnalysisClient,
{
    /// The delivery error is what the caller must see; a failed flag write
    /// is logged, never propagated in its place.
    async fn flag_retryable(&self, id: Uuid) {
        if let Err(err) = self.chat_message_repository.mark_retryable(id).await {
            warn!("failed to flag message {} for retry: {}", id, err);
        }
    }
}

impl<U, M, C, A> ChatService for Service<U, M, C, A>
where
    U: UserProfileRepository,
    M: MealRepository,
    C: ChatMessageRepository,
    A: AnalysisClient,
{
    async fn send_message(&self, input: SendMessageInput) -> Result<ChatMessage, CoreError> {
        if input.text.trim().is_empty() {
            return Err(CoreError::Validation("message must not be blank".into()));
        }

        let message_type = classify_message(&input.text);
        debug!("classified outgoing message as {}", message_type.as_str());

        // The first-message flag must reflect the history before this
        // message is appended.
        let is_first_message_of_day = self.is_first_message_of_day().await?;

        let user_message = self
            .chat_message_repository
            .append(ChatMessage::user(input.text.clone(), input.image_path))
            .await?;

        let request = TextAnalysisRequest {
            message: input.text,
            user_profile: self.profile_snapshot().await?,
            user_id: generate_random_string(16),
            is_first_message_of_day,
            message_type,
        };

        let answer = match self.analysis_client.analyze_text(request).await {
            Ok(answer) => answer,
            Err(err) => {
                self.flag_retryable(user_message.id).await;
                return Err(err);
            }
        };

        if answer.status == ResponseStatus::Error {
            self.flag_retryable(user_message.id).await;
            return Err(CoreError::AiAnalysis(answer.answer));
        }

        self.chat_message_repository
            .append(ChatMessage::assistant(answer.answer))
            .await
    }

    async fn get_history(&self) -> Result<Vec<ChatMessage>, CoreError> {
        self.chat_message_repository.list().await
    }

    async fn delete_message(&self, id: Uuid) -> Result<(), CoreError> {
        self.chat_message_repository.delete(id).await
    }

    async fn clear_history(&self) -> Result<(), CoreError> {
        self.chat_message_repository.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        analysis::{
            entities::MessageType, ports::MockAnalysisClient, value_objects::WebhookAnswer,
        },
        chat::{entities::ChatRole, ports::MockChatMessageRepository},
        food::ports::MockMealRepository,
        user::ports::MockUserProfileRepository,
    };

    fn service(
        chat_repo: MockChatMessageRepository,
        client: MockAnalysisClient,
    ) -> Service<
        MockUserProfileRepository,
        MockMealRepository,
        MockChatMessageRepository,
        MockAnalysisClient,
    > {
        let mut user_repo = MockUserProfileRepository::new();
        user_repo
            .expect_get_profile()
            .returning(|| Box::pin(async { Ok(None) }));

        Service::new(user_repo, MockMealRepository::new(), chat_repo, client)
    }

    fn input(text: &str) -> SendMessageInput {
        SendMessageInput {
            text: text.into(),
            image_path: None,
        }
    }

    #[tokio::test]
    async fn successful_send_appends_both_messages() {
        let mut chat_repo = MockChatMessageRepository::new();
        chat_repo
            .expect_count_on_date()
            .returning(|_| Box::pin(async { Ok(3) }));
        chat_repo.expect_append().times(2).returning(|message| Box::pin(async move { Ok(message) }));

        let mut client = MockAnalysisClient::new();
        client
            .expect_analyze_text()
            .withf(|req| req.message_type == MessageType::Chat && !req.is_first_message_of_day)
            .returning(|_| {
                Box::pin(async {
                    Ok(WebhookAnswer {
                        status: ResponseStatus::Success,
                        answer: "Привет! Чем помочь?".into(),
                    })
                })
            });

        let reply = service(chat_repo, client)
            .send_message(input("Привет"))
            .await
            .unwrap();

        assert_eq!(reply.role, ChatRole::Assistant);
        assert_eq!(reply.content, "Привет! Чем помочь?");
    }

    #[tokio::test]
    async fn network_failure_flags_the_user_message_retryable() {
        let mut chat_repo = MockChatMessageRepository::new();
        chat_repo
            .expect_count_on_date()
            .returning(|_| Box::pin(async { Ok(0) }));

        chat_repo.expect_append().times(1).returning(|message| Box::pin(async move { Ok(message) }));
        chat_repo
            .expect_mark_retryable()
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        let mut client = MockAnalysisClient::new();
        client
            .expect_analyze_text()
            .returning(|_| Box::pin(async { Err(CoreError::Network("timeout".into())) }));

        let result = service(chat_repo, client).send_message(input("Привет")).await;

        assert!(matches!(result, Err(CoreError::Network(_))));
    }

    #[tokio::test]
    async fn error_status_flags_retryable_and_surfaces_ai_error() {
        let mut chat_repo = MockChatMessageRepository::new();
        chat_repo
            .expect_count_on_date()
            .returning(|_| Box::pin(async { Ok(0) }));
        chat_repo.expect_append().times(1).returning(|message| Box::pin(async move { Ok(message) }));
        chat_repo
            .expect_mark_retryable()
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        let mut client = MockAnalysisClient::new();
        client.expect_analyze_text().returning(|_| {
            Box::pin(async {
                Ok(WebhookAnswer {
                    status: ResponseStatus::Error,
                    answer: "workflow failed".into(),
                })
            })
        });

        let result = service(chat_repo, client).send_message(input("Привет")).await;

        assert!(matches!(result, Err(CoreError::AiAnalysis(_))));
    }

    #[tokio::test]
    async fn original_error_survives_a_failed_retry_flag() {
        let mut chat_repo = MockChatMessageRepository::new();
        chat_repo
            .expect_count_on_date()
            .returning(|_| Box::pin(async { Ok(0) }));
        chat_repo.expect_append().times(1).returning(|message| Box::pin(async move { Ok(message) }));
        chat_repo
            .expect_mark_retryable()
            .times(1)
            .returning(|_| Box::pin(async { Err(CoreError::Storage("disk".into())) }));

        let mut client = MockAnalysisClient::new();
        client
            .expect_analyze_text()
            .returning(|_| Box::pin(async { Err(CoreError::Network("timeout".into())) }));

        let result = service(chat_repo, client).send_message(input("Привет")).await;

        // The delivery failure wins over the secondary storage failure.
        assert!(matches!(result, Err(CoreError::Network(_))));
    }

    #[tokio::test]
    async fn blank_message_is_rejected_without_side_effects() {
        let chat_repo = MockChatMessageRepository::new();
        let client = MockAnalysisClient::new();

        let result = service(chat_repo, client).send_message(input("   ")).await;

        assert!(matches!(result, Err(CoreError::Validation(_))));
    }
}
