use chrono::{NaiveDate, Utc};
use tracing::warn;

use crate::domain::{
    analysis::ports::AnalysisClient,
    chat::ports::ChatMessageRepository,
    common::{entities::app_errors::CoreError, services::Service},
    food::ports::MealRepository,
    nutrition::{
        entities::{NutritionIntake, NutritionTargets},
        ports::NutritionService,
        value_objects::{DateRange, IntakeStatistics, NutrientTrends, TrendPoint},
    },
    user::ports::UserProfileRepository,
};

fn goal_met(intake: &NutritionIntake, tolerance: f64) -> bool {
    let Some(targets) = intake.targets else {
        return false;
    };

    let goal = f64::from(targets.calories);
    let total = f64::from(intake.total_calories());

    total >= goal * (1.0 - tolerance) && total <= goal * (1.0 + tolerance)
}

impl<U, M, C, A> NutritionService for Service<U, M, C, A>
where
    U: UserProfileRepository,
    M: MealRepository,
    C: ChatMessageRepository,
    A: AnalysisClient,
{
    async fn get_daily_intake(&self, date: NaiveDate) -> Result<NutritionIntake, CoreError> {
        let meals = self.meal_repository.get_by_date(date).await?;

        // Absent profile means absent targets, not an error.
        let targets = self
            .user_profile_repository
            .get_profile()
            .await?
            .and_then(|profile| profile.targets);

        Ok(NutritionIntake::new(date, meals, targets))
    }

    async fn get_date_range_intake(
        &self,
        range: DateRange,
    ) -> Result<Vec<NutritionIntake>, CoreError> {
        let mut intakes = Vec::with_capacity(range.day_count() as usize);

        for date in range.days() {
            let intake = match self.get_daily_intake(date).await {
                Ok(intake) => intake,
                Err(err) => {
                    // Availability over completeness: calendar views get an
                    // explicit empty day instead of a propagated failure.
                    warn!("substituting empty intake for {date}: {err}");
                    NutritionIntake::empty(date)
                }
            };
            intakes.push(intake);
        }

        Ok(intakes)
    }

    async fn get_statistics(
        &self,
        range: DateRange,
        tolerance: f64,
    ) -> Result<IntakeStatistics, CoreError> {
        let intakes = self.get_date_range_intake(range).await?;

        let with_data: Vec<_> = intakes.iter().filter(|i| i.has_data()).collect();
        let days_with_data = with_data.len() as u64;

        if days_with_data == 0 {
            return Ok(IntakeStatistics::zero());
        }

        let divisor = days_with_data as f64;
        let goal_met_days = with_data.iter().filter(|i| goal_met(i, tolerance)).count();

        Ok(IntakeStatistics {
            days_with_data,
            avg_calories: with_data
                .iter()
                .map(|i| f64::from(i.total_calories()))
                .sum::<f64>()
                / divisor,
            avg_protein: with_data.iter().map(|i| i.total_protein()).sum::<f64>() / divisor,
            avg_fat: with_data.iter().map(|i| i.total_fat()).sum::<f64>() / divisor,
            avg_carbs: with_data.iter().map(|i| i.total_carbs()).sum::<f64>() / divisor,
            goal_achievement_rate: goal_met_days as f64 / divisor,
        })
    }

    async fn get_trends(&self, range: DateRange) -> Result<NutrientTrends, CoreError> {
        let intakes = self.get_date_range_intake(range).await?;

        let point = |date: NaiveDate, value: f64| TrendPoint { date, value };

        Ok(NutrientTrends {
            calories: intakes
                .iter()
                .map(|i| point(i.date, f64::from(i.total_calories())))
                .collect(),
            protein: intakes
                .iter()
                .map(|i| point(i.date, i.total_protein()))
                .collect(),
            fat: intakes.iter().map(|i| point(i.date, i.total_fat())).collect(),
            carbs: intakes
                .iter()
                .map(|i| point(i.date, i.total_carbs()))
                .collect(),
        })
    }

    async fn calculate_targets(&self) -> Result<NutritionTargets, CoreError> {
        let profile = self
            .user_profile_repository
            .get_profile()
            .await?
            .ok_or_else(|| CoreError::DataNotFound("user profile".into()))?;

        let today = Utc::now().date_naive();
        let calories = profile.recommended_calories(today).ok_or_else(|| {
            CoreError::BusinessLogic(
                "profile is missing the biometrics required to compute targets".into(),
            )
        })?;

        Ok(NutritionTargets::from_calories(calories))
    }
}
