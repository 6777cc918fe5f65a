use chrono::Utc;

use crate::domain::{
    analysis::ports::AnalysisClient,
    chat::ports::ChatMessageRepository,
    common::{entities::app_errors::CoreError, services::Service},
    food::ports::MealRepository,
    nutrition::entities::NutritionTargets,
    user::{
        entities::UserProfile,
        ports::{UserProfileRepository, UserService},
        value_objects::UpdateProfileInput,
    },
};

fn validate_profile_input(input: &UpdateProfileInput) -> Result<(), CoreError> {
    if let Some(height) = input.height_cm {
        if !height.is_finite() || height <= 0.0 {
            return Err(CoreError::Validation("height must be positive".into()));
        }
    }

    if let Some(weight) = input.weight_kg {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(CoreError::Validation("weight must be positive".into()));
        }
    }

    if let Some(birthday) = input.birthday {
        if birthday > Utc::now().date_naive() {
            return Err(CoreError::Validation(
                "birthday cannot be in the future".into(),
            ));
        }
    }

    Ok(())
}

impl<U, M, C, A> UserService for Service<U, M, C, A>
where
    U: UserProfileRepository,
    M: MealRepository,
    C: ChatMessageRepository,
    A: AnalysisClient,
{
    async fn get_profile(&self) -> Result<UserProfile, CoreError> {
        self.user_profile_repository
            .get_profile()
            .await?
            .ok_or_else(|| CoreError::DataNotFound("user profile".into()))
    }

    async fn save_profile(&self, input: UpdateProfileInput) -> Result<UserProfile, CoreError> {
        validate_profile_input(&input)?;

        let mut profile = self
            .user_profile_repository
            .get_profile()
            .await?
            .unwrap_or_default();

        profile.height_cm = input.height_cm.or(profile.height_cm);
        profile.weight_kg = input.weight_kg.or(profile.weight_kg);
        profile.birthday = input.birthday.or(profile.birthday);
        profile.gender = input.gender.or(profile.gender);
        profile.activity_level = input.activity_level.or(profile.activity_level);
        profile.goal = input.goal.or(profile.goal);
        profile.body_feeling = input.body_feeling.or(profile.body_feeling);
        profile.setup_complete = profile.has_complete_biometrics();
        profile.updated_at = Utc::now();

        // Targets are stored alongside the profile and recomputed on every
        // save, never incrementally adjusted.
        let today = Utc::now().date_naive();
        profile.targets = profile
            .recommended_calories(today)
            .map(NutritionTargets::from_calories);

        self.user_profile_repository.save_profile(profile).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Days, NaiveDate, Utc};

    use crate::domain::{
        analysis::ports::MockAnalysisClient,
        chat::ports::MockChatMessageRepository,
        common::{entities::app_errors::CoreError, services::Service},
        food::ports::MockMealRepository,
        user::{
            entities::{ActivityLevel, Gender, Goal},
            ports::{MockUserProfileRepository, UserService},
            value_objects::UpdateProfileInput,
        },
    };

    fn service(
        user_repo: MockUserProfileRepository,
    ) -> Service<
        MockUserProfileRepository,
        MockMealRepository,
        MockChatMessageRepository,
        MockAnalysisClient,
    > {
        Service::new(
            user_repo,
            MockMealRepository::new(),
            MockChatMessageRepository::new(),
            MockAnalysisClient::new(),
        )
    }

    #[tokio::test]
    async fn get_profile_maps_absence_to_data_not_found() {
        let mut user_repo = MockUserProfileRepository::new();
        user_repo.expect_get_profile().returning(|| Box::pin(async { Ok(None) }));

        let result = service(user_repo).get_profile().await;

        assert!(matches!(result, Err(CoreError::DataNotFound(_))));
    }

    #[tokio::test]
    async fn save_rejects_non_positive_weight() {
        let user_repo = MockUserProfileRepository::new();
        let input = UpdateProfileInput {
            weight_kg: Some(-70.0),
            ..Default::default()
        };

        let result = service(user_repo).save_profile(input).await;

        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn save_rejects_non_positive_height() {
        let user_repo = MockUserProfileRepository::new();
        let input = UpdateProfileInput {
            height_cm: Some(0.0),
            ..Default::default()
        };

        let result = service(user_repo).save_profile(input).await;

        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn save_rejects_future_birthday() {
        let user_repo = MockUserProfileRepository::new();
        let tomorrow = Utc::now()
            .date_naive()
            .checked_add_days(Days::new(1))
            .unwrap();
        let input = UpdateProfileInput {
            birthday: Some(tomorrow),
            ..Default::default()
        };

        let result = service(user_repo).save_profile(input).await;

        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn complete_save_stores_recomputed_targets() {
        let mut user_repo = MockUserProfileRepository::new();
        user_repo.expect_get_profile().returning(|| Box::pin(async { Ok(None) }));
        user_repo
            .expect_save_profile()
            .withf(|profile| profile.setup_complete && profile.targets.is_some())
            .returning(|profile| Box::pin(async move { Ok(profile) }));

        let input = UpdateProfileInput {
            height_cm: Some(170.0),
            weight_kg: Some(60.0),
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1),
            gender: Some(Gender::Female),
            activity_level: Some(ActivityLevel::Light),
            goal: Some(Goal::LoseWeight),
            body_feeling: None,
        };

        let saved = service(user_repo).save_profile(input).await.unwrap();

        assert!(saved.setup_complete);
        let targets = saved.targets.unwrap();
        assert!(targets.calories > 0);
    }
}
