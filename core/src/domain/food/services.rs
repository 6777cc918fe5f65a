use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::{
    analysis::ports::AnalysisClient,
    chat::ports::ChatMessageRepository,
    common::{entities::app_errors::CoreError, services::Service},
    food::{
        entities::{Food, Meal, MealType},
        ports::{FoodService, MealRepository},
        value_objects::NewFoodInput,
    },
    user::ports::UserProfileRepository,
};

fn food_from_input(input: NewFoodInput) -> Result<Food, CoreError> {
    Food::new(
        input.name,
        input.calories,
        input.protein_g,
        input.fat_g,
        input.carbs_g,
        input.weight,
        input.source,
        input.ai_opinion,
    )
}

impl<U, M, C, A> FoodService for Service<U, M, C, A>
where
    U: UserProfileRepository,
    M: MealRepository,
    C: ChatMessageRepository,
    A: AnalysisClient,
{
    async fn add_food(
        &self,
        date: NaiveDate,
        meal_type: MealType,
        input: NewFoodInput,
    ) -> Result<Food, CoreError> {
        let food = food_from_input(input)?;

        let mut meal = self
            .meal_repository
            .get_by_date_and_type(date, meal_type)
            .await?
            .unwrap_or_else(|| Meal::new(date, meal_type));

        meal.foods.push(food.clone());
        meal.updated_at = Utc::now();
        self.meal_repository.save(meal).await?;

        Ok(food)
    }

    async fn update_food(
        &self,
        date: NaiveDate,
        food_id: Uuid,
        input: NewFoodInput,
    ) -> Result<Food, CoreError> {
        let mut replacement = food_from_input(input)?;
        replacement.id = food_id;

        let meals = self.meal_repository.get_by_date(date).await?;
        let mut meal = meals
            .into_iter()
            .find(|meal| meal.foods.iter().any(|f| f.id == food_id))
            .ok_or_else(|| CoreError::DataNotFound(format!("food {food_id}")))?;

        for food in &mut meal.foods {
            if food.id == food_id {
                *food = replacement.clone();
            }
        }
        meal.updated_at = Utc::now();
        self.meal_repository.save(meal).await?;

        Ok(replacement)
    }

    async fn remove_food(&self, date: NaiveDate, food_id: Uuid) -> Result<(), CoreError> {
        let meals = self.meal_repository.get_by_date(date).await?;
        let mut meal = meals
            .into_iter()
            .find(|meal| meal.foods.iter().any(|f| f.id == food_id))
            .ok_or_else(|| CoreError::DataNotFound(format!("food {food_id}")))?;

        meal.foods.retain(|f| f.id != food_id);
        meal.updated_at = Utc::now();

        // A meal with no foods left is removed instead of kept empty.
        if meal.foods.is_empty() {
            self.meal_repository.delete(meal.id).await?;
        } else {
            self.meal_repository.save(meal).await?;
        }

        Ok(())
    }

    async fn get_meals(&self, date: NaiveDate) -> Result<Vec<Meal>, CoreError> {
        self.meal_repository.get_by_date(date).await
    }

    async fn delete_meal(&self, meal_id: Uuid) -> Result<(), CoreError> {
        self.meal_repository.delete(meal_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        analysis::ports::MockAnalysisClient, chat::ports::MockChatMessageRepository,
        food::entities::FoodSource, food::ports::MockMealRepository,
        user::ports::MockUserProfileRepository,
    };

    fn service(
        meal_repo: MockMealRepository,
    ) -> Service<
        MockUserProfileRepository,
        MockMealRepository,
        MockChatMessageRepository,
        MockAnalysisClient,
    > {
        Service::new(
            MockUserProfileRepository::new(),
            meal_repo,
            MockChatMessageRepository::new(),
            MockAnalysisClient::new(),
        )
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[tokio::test]
    async fn add_food_creates_meal_when_day_has_none() {
        let mut meal_repo = MockMealRepository::new();
        meal_repo
            .expect_get_by_date_and_type()
            .returning(|_, _| Box::pin(async { Ok(None) }));
        meal_repo
            .expect_save()
            .withf(|meal| meal.foods.len() == 1 && meal.meal_type == MealType::Lunch)
            .returning(|meal| Box::pin(async move { Ok(meal) }));

        let food = service(meal_repo)
            .add_food(
                date(),
                MealType::Lunch,
                NewFoodInput::manual("Суп".into(), 200, 8.0, 5.0, 20.0, "300г".into()),
            )
            .await
            .unwrap();

        assert_eq!(food.calories, 200);
        assert_eq!(food.source, FoodSource::Manual);
    }

    #[tokio::test]
    async fn add_food_rejects_invalid_input_before_any_write() {
        // No repository expectations: validation must fail first.
        let meal_repo = MockMealRepository::new();

        let result = service(meal_repo)
            .add_food(
                date(),
                MealType::Lunch,
                NewFoodInput::manual("".into(), 200, 8.0, 5.0, 20.0, "300г".into()),
            )
            .await;

        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn update_food_replaces_in_place_keeping_id() {
        let existing = Food::new(
            "Каша".into(),
            150,
            4.0,
            3.0,
            25.0,
            "200г".into(),
            FoodSource::Manual,
            None,
        )
        .unwrap();
        let food_id = existing.id;

        let mut meal = Meal::new(date(), MealType::Breakfast);
        meal.foods.push(existing);

        let mut meal_repo = MockMealRepository::new();
        let stored = meal.clone();
        meal_repo
            .expect_get_by_date()
            .returning(move |_| {
                let stored = stored.clone();
                Box::pin(async move { Ok(vec![stored]) })
            });
        meal_repo
            .expect_save()
            .withf(move |m| m.foods.len() == 1 && m.foods[0].id == food_id)
            .returning(|meal| Box::pin(async move { Ok(meal) }));

        let updated = service(meal_repo)
            .update_food(
                date(),
                food_id,
                NewFoodInput::manual("Каша с маслом".into(), 220, 4.0, 9.0, 25.0, "200г".into()),
            )
            .await
            .unwrap();

        assert_eq!(updated.id, food_id);
        assert_eq!(updated.calories, 220);
    }

    #[tokio::test]
    async fn remove_last_food_deletes_the_meal() {
        let existing = Food::new(
            "Кофе".into(),
            5,
            0.1,
            0.0,
            0.5,
            "200г".into(),
            FoodSource::Manual,
            None,
        )
        .unwrap();
        let food_id = existing.id;

        let mut meal = Meal::new(date(), MealType::Snack);
        meal.foods.push(existing);
        let meal_id = meal.id;

        let mut meal_repo = MockMealRepository::new();
        let stored = meal.clone();
        meal_repo
            .expect_get_by_date()
            .returning(move |_| {
                let stored = stored.clone();
                Box::pin(async move { Ok(vec![stored]) })
            });
        meal_repo
            .expect_delete()
            .withf(move |id| *id == meal_id)
            .returning(|_| Box::pin(async { Ok(()) }));

        service(meal_repo).remove_food(date(), food_id).await.unwrap();
    }

    #[tokio::test]
    async fn remove_food_reports_missing_id() {
        let mut meal_repo = MockMealRepository::new();
        meal_repo
            .expect_get_by_date()
            .returning(|_| Box::pin(async { Ok(vec![]) }));

        let result = service(meal_repo).remove_food(date(), Uuid::new_v4()).await;

        assert!(matches!(result, Err(CoreError::DataNotFound(_))));
    }
}
