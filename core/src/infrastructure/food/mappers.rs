use tracing::error;

use crate::{
    domain::{common::entities::app_errors::CoreError, food::entities::Meal},
    entity::meals,
};

impl TryFrom<&meals::Model> for Meal {
    type Error = CoreError;

    fn try_from(model: &meals::Model) -> Result<Self, CoreError> {
        let foods = serde_json::from_value(model.foods.clone()).map_err(|e| {
            error!("Corrupt foods column in meal {}: {}", model.id, e);
            CoreError::Storage(format!("corrupt foods column in meal {}: {e}", model.id))
        })?;

        let date = model.date.parse().map_err(|e| {
            error!("Corrupt date in meal {}: {}", model.id, e);
            CoreError::Storage(format!("corrupt date in meal {}: {e}", model.id))
        })?;

        Ok(Self {
            id: model.id,
            date,
            meal_type: model.meal_type.as_str().into(),
            foods,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<meals::Model> for Meal {
    type Error = CoreError;

    fn try_from(model: meals::Model) -> Result<Self, CoreError> {
        Self::try_from(&model)
    }
}
