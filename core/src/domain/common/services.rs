use crate::domain::{
    analysis::ports::AnalysisClient, chat::ports::ChatMessageRepository,
    food::ports::MealRepository, user::ports::UserProfileRepository,
};

/// Aggregate holding every port implementation. Domain service traits are
/// implemented on this struct in each module's `services.rs`.
#[derive(Debug, Clone)]
pub struct Service<U, M, C, A>
where
    U: UserProfileRepository,
    M: MealRepository,
    C: ChatMessageRepository,
    A: AnalysisClient,
{
    pub user_profile_repository: U,
    pub meal_repository: M,
    pub chat_message_repository: C,
    pub analysis_client: A,
}

impl<U, M, C, A> Service<U, M, C, A>
where
    U: UserProfileRepository,
    M: MealRepository,
    C: ChatMessageRepository,
    A: AnalysisClient,
{
    pub fn new(
        user_profile_repository: U,
        meal_repository: M,
        chat_message_repository: C,
        analysis_client: A,
    ) -> Self {
        Self {
            user_profile_repository,
            meal_repository,
            chat_message_repository,
            analysis_client,
        }
    }
}
