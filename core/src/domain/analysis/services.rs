use chrono::Utc;

use crate::domain::{
    analysis::{
        entities::{MessageType, ParsedAnswer, ProfileSnapshot},
        parser::parse_answer,
        ports::{AnalysisClient, FoodAnalysisService},
        value_objects::{PhotoAnalysisRequest, ResponseStatus, TextAnalysisRequest},
    },
    chat::ports::ChatMessageRepository,
    common::{entities::app_errors::CoreError, generate_random_string, services::Service},
    food::{
        entities::{Food, FoodSource},
        ports::MealRepository,
    },
    user::ports::UserProfileRepository,
};

fn food_from_answer(parsed: ParsedAnswer, source: FoodSource) -> Result<Food, CoreError> {
    let facts = parsed.into_facts();

    Food::new(
        facts.name,
        facts.calories,
        facts.protein_g,
        facts.fat_g,
        facts.carbs_g,
        facts.weight,
        source,
        facts.opinion,
    )
    .map_err(|err| CoreError::AiAnalysis(format!("answer did not yield a valid food: {err}")))
}

impl<U, M, C, A> Service<U, M, C, A>
where
    U: UserProfileRepository,
    M: MealRepository,
    C: ChatMessageRepository,
    A: AnalysisClient,
{
    pub(crate) async fn profile_snapshot(&self) -> Result<ProfileSnapshot, CoreError> {
        let profile = self.user_profile_repository.get_profile().await?;
        let today = Utc::now().date_naive();

        Ok(ProfileSnapshot::from_profile(profile.as_ref(), today))
    }

    pub(crate) async fn is_first_message_of_day(&self) -> Result<bool, CoreError> {
        let today = Utc::now().date_naive();
        let sent_today = self.chat_message_repository.count_on_date(today).await?;

        Ok(sent_today == 0)
    }
}

impl<U, M, C, A> FoodAnalysisService for Service<U, M, C, A>
where
    U: UserProfileRepository,
    M: MealRepository,
    C: ChatMessageRepository,
    A: AnalysisClient,
{
    async fn analyze_text(&self, description: String) -> Result<Food, CoreError> {
        let request = TextAnalysisRequest {
            message: description,
            user_profile: self.profile_snapshot().await?,
            user_id: generate_random_string(16),
            is_first_message_of_day: self.is_first_message_of_day().await?,
            message_type: MessageType::Analysis,
        };

        let answer = self.analysis_client.analyze_text(request).await?;
        if answer.status == ResponseStatus::Error {
            return Err(CoreError::AiAnalysis(answer.answer));
        }

        food_from_answer(parse_answer(&answer.answer), FoodSource::TextAnalysis)
    }

    async fn analyze_photo(&self, image: Vec<u8>, caption: String) -> Result<Food, CoreError> {
        if image.is_empty() {
            return Err(CoreError::Validation("photo must not be empty".into()));
        }

        let request = PhotoAnalysisRequest {
            image,
            message_type: MessageType::Analysis,
            user_profile: self.profile_snapshot().await?,
            user_id: generate_random_string(16),
            is_first_message_of_day: self.is_first_message_of_day().await?,
            caption,
        };

        let answer = self.analysis_client.analyze_photo(request).await?;
        if answer.status == ResponseStatus::Error {
            return Err(CoreError::AiAnalysis(answer.answer));
        }

        food_from_answer(parse_answer(&answer.answer), FoodSource::PhotoAnalysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        analysis::{ports::MockAnalysisClient, value_objects::WebhookAnswer},
        chat::ports::MockChatMessageRepository,
        food::ports::MockMealRepository,
        user::ports::MockUserProfileRepository,
    };

    fn service(
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
        let mut chat_repo = MockChatMessageRepository::new();
        chat_repo
            .expect_count_on_date()
            .returning(|_| Box::pin(async { Ok(0) }));

        Service::new(user_repo, MockMealRepository::new(), chat_repo, client)
    }

    #[tokio::test]
    async fn structured_answer_becomes_a_food() {
        let mut client = MockAnalysisClient::new();
        client
            .expect_analyze_text()
            .withf(|req| {
                req.message_type == MessageType::Analysis
                    && req.is_first_message_of_day
                    && req.user_id.len() == 16
            })
            .returning(|_| {
                Box::pin(async {
                    Ok(WebhookAnswer {
                        status: ResponseStatus::Success,
                        answer:
                            r#"{"name":"Apple","calories":95,"protein":0.5,"fat":0.3,"carbs":25.0}"#
                                .into(),
                    })
                })
            });

        let food = service(client)
            .analyze_text("одно яблоко".into())
            .await
            .unwrap();

        assert_eq!(food.name, "Apple");
        assert_eq!(food.calories, 95);
        assert_eq!(food.source, FoodSource::TextAnalysis);
        assert_eq!(food.ai_opinion, None);
    }

    #[tokio::test]
    async fn fallback_answer_keeps_raw_text_as_opinion() {
        let raw = "Это яблоко, calories: 95";
        let mut client = MockAnalysisClient::new();
        client.expect_analyze_photo().returning(move |_| {
            Box::pin(async move {
                Ok(WebhookAnswer {
                    status: ResponseStatus::Success,
                    answer: raw.into(),
                })
            })
        });

        let food = service(client)
            .analyze_photo(vec![0xFF, 0xD8], String::new())
            .await
            .unwrap();

        assert_eq!(food.calories, 95);
        assert_eq!(food.source, FoodSource::PhotoAnalysis);
        assert_eq!(food.ai_opinion.as_deref(), Some(raw));
    }

    #[tokio::test]
    async fn error_status_maps_to_ai_analysis_error() {
        let mut client = MockAnalysisClient::new();
        client.expect_analyze_text().returning(|_| {
            Box::pin(async {
                Ok(WebhookAnswer {
                    status: ResponseStatus::Error,
                    answer: "unable to analyze".into(),
                })
            })
        });

        let result = service(client).analyze_text("борщ".into()).await;

        assert!(matches!(result, Err(CoreError::AiAnalysis(_))));
    }

    #[tokio::test]
    async fn empty_photo_is_rejected_before_any_call() {
        let client = MockAnalysisClient::new();

        let result = service(client).analyze_photo(vec![], String::new()).await;

        assert!(matches!(result, Err(CoreError::Validation(_))));
    }
}
