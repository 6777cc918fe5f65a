use std::future::Future;

use chrono::NaiveDate;

use crate::domain::{
    common::entities::app_errors::CoreError,
    nutrition::{
        entities::{NutritionIntake, NutritionTargets},
        value_objects::{DateRange, IntakeStatistics, NutrientTrends},
    },
};

/// Service trait for daily/range aggregation and target derivation
pub trait NutritionService: Send + Sync {
    fn get_daily_intake(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<NutritionIntake, CoreError>> + Send;

    /// One intake per calendar day, inclusive; failed days come back as
    /// explicit empty intakes, never as gaps or errors.
    fn get_date_range_intake(
        &self,
        range: DateRange,
    ) -> impl Future<Output = Result<Vec<NutritionIntake>, CoreError>> + Send;

    /// `tolerance` is the relative calorie band counted as goal-met,
    /// e.g. 0.1 for ±10%.
    fn get_statistics(
        &self,
        range: DateRange,
        tolerance: f64,
    ) -> impl Future<Output = Result<IntakeStatistics, CoreError>> + Send;

    fn get_trends(
        &self,
        range: DateRange,
    ) -> impl Future<Output = Result<NutrientTrends, CoreError>> + Send;

    fn calculate_targets(
        &self,
    ) -> impl Future<Output = Result<NutritionTargets, CoreError>> + Send;
}
