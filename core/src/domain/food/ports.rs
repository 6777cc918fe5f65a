use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food::{
        entities::{Food, Meal, MealType},
        value_objects::NewFoodInput,
    },
};

/// Repository trait for daily meal records, keyed by calendar day
#[cfg_attr(test, mockall::automock)]
pub trait MealRepository: Send + Sync {
    fn get_by_date(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Meal>, CoreError>> + Send;

    fn get_by_date_and_type(
        &self,
        date: NaiveDate,
        meal_type: MealType,
    ) -> impl Future<Output = Result<Option<Meal>, CoreError>> + Send;

    fn save(&self, meal: Meal) -> impl Future<Output = Result<Meal, CoreError>> + Send;

    fn delete(&self, meal_id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Service trait for food record management
pub trait FoodService: Send + Sync {
    fn add_food(
        &self,
        date: NaiveDate,
        meal_type: MealType,
        input: NewFoodInput,
    ) -> impl Future<Output = Result<Food, CoreError>> + Send;

    /// Edit-and-replace: the food keeps its id but every other field comes
    /// from the input.
    fn update_food(
        &self,
        date: NaiveDate,
        food_id: Uuid,
        input: NewFoodInput,
    ) -> impl Future<Output = Result<Food, CoreError>> + Send;

    fn remove_food(
        &self,
        date: NaiveDate,
        food_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn get_meals(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Meal>, CoreError>> + Send;

    fn delete_meal(&self, meal_id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;
}
