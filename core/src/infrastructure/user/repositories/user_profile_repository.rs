use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait};
use tracing::error;

use crate::{
    domain::{common::entities::app_errors::CoreError, user::entities::UserProfile},
    entity::user_profiles::{ActiveModel, Entity},
};

#[derive(Debug, Clone)]
pub struct SqliteUserProfileRepository {
    pub db: DatabaseConnection,
}

impl SqliteUserProfileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn active_model(profile: &UserProfile) -> ActiveModel {
    ActiveModel {
        id: Set(profile.id),
        height_cm: Set(profile.height_cm),
        weight_kg: Set(profile.weight_kg),
        birthday: Set(profile.birthday),
        gender: Set(profile.gender.map(|g| g.as_str().to_owned())),
        activity_level: Set(profile.activity_level.map(|a| a.as_str().to_owned())),
        goal: Set(profile.goal.map(|g| g.as_str().to_owned())),
        body_feeling: Set(profile.body_feeling.map(|b| b.as_str().to_owned())),
        target_calories: Set(profile.targets.map(|t| t.calories)),
        target_protein_g: Set(profile.targets.map(|t| t.protein_g)),
        target_fat_g: Set(profile.targets.map(|t| t.fat_g)),
        target_carbs_g: Set(profile.targets.map(|t| t.carbs_g)),
        setup_complete: Set(profile.setup_complete),
        created_at: Set(profile.created_at),
        updated_at: Set(profile.updated_at),
    }
}

impl crate::domain::user::ports::UserProfileRepository for SqliteUserProfileRepository {
    async fn get_profile(&self) -> Result<Option<UserProfile>, CoreError> {
        let profile = Entity::find()
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to load user profile: {}", e);
                CoreError::Storage(format!("failed to load user profile: {e}"))
            })?
            .map(UserProfile::from);

        Ok(profile)
    }

    async fn save_profile(&self, profile: UserProfile) -> Result<UserProfile, CoreError> {
        let exists = Entity::find_by_id(profile.id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to look up user profile: {}", e);
                CoreError::Storage(format!("failed to look up user profile: {e}"))
            })?
            .is_some();

        let model = active_model(&profile);
        if exists {
            Entity::update(model).exec(&self.db).await.map_err(|e| {
                error!("Failed to update user profile: {}", e);
                CoreError::Storage(format!("failed to update user profile: {e}"))
            })?;
        } else {
            Entity::insert(model).exec(&self.db).await.map_err(|e| {
                error!("Failed to insert user profile: {}", e);
                CoreError::Storage(format!("failed to insert user profile: {e}"))
            })?;
        }

        Ok(profile)
    }
}
