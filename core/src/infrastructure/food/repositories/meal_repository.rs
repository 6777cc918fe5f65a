use chrono::NaiveDate;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        food::entities::{Meal, MealType},
        food::ports::MealRepository,
    },
    entity::meals::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct SqliteMealRepository {
    pub db: DatabaseConnection,
}

impl SqliteMealRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn active_model(meal: &Meal) -> Result<ActiveModel, CoreError> {
    let foods = serde_json::to_value(&meal.foods).map_err(|e| {
        error!("Failed to serialize foods: {}", e);
        CoreError::Storage(format!("failed to serialize foods: {e}"))
    })?;

    Ok(ActiveModel {
        id: Set(meal.id),
        date: Set(meal.date.to_string()),
        meal_type: Set(meal.meal_type.as_str().to_owned()),
        foods: Set(foods),
        created_at: Set(meal.created_at),
        updated_at: Set(meal.updated_at),
    })
}

impl MealRepository for SqliteMealRepository {
    async fn get_by_date(&self, date: NaiveDate) -> Result<Vec<Meal>, CoreError> {
        let meals = Entity::find()
            .filter(Column::Date.eq(date.to_string()))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch meals for {}: {}", date, e);
                CoreError::Storage(format!("failed to fetch meals: {e}"))
            })?
            .iter()
            .map(Meal::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(meals)
    }

    async fn get_by_date_and_type(
        &self,
        date: NaiveDate,
        meal_type: MealType,
    ) -> Result<Option<Meal>, CoreError> {
        let meal = Entity::find()
            .filter(Column::Date.eq(date.to_string()))
            .filter(Column::MealType.eq(meal_type.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch meal for {}: {}", date, e);
                CoreError::Storage(format!("failed to fetch meal: {e}"))
            })?
            .as_ref()
            .map(Meal::try_from)
            .transpose()?;

        Ok(meal)
    }

    async fn save(&self, meal: Meal) -> Result<Meal, CoreError> {
        let exists = Entity::find_by_id(meal.id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to look up meal: {}", e);
                CoreError::Storage(format!("failed to look up meal: {e}"))
            })?
            .is_some();

        let model = active_model(&meal)?;
        if exists {
            Entity::update(model).exec(&self.db).await.map_err(|e| {
                error!("Failed to update meal: {}", e);
                CoreError::Storage(format!("failed to update meal: {e}"))
            })?;
        } else {
            Entity::insert(model).exec(&self.db).await.map_err(|e| {
                error!("Failed to insert meal: {}", e);
                CoreError::Storage(format!("failed to insert meal: {e}"))
            })?;
        }

        Ok(meal)
    }

    async fn delete(&self, meal_id: Uuid) -> Result<(), CoreError> {
        Entity::delete_by_id(meal_id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete meal: {}", e);
                CoreError::Storage(format!("failed to delete meal: {e}"))
            })?;

        Ok(())
    }
}
