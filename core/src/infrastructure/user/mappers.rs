use crate::{
    domain::{nutrition::entities::NutritionTargets, user::entities::UserProfile},
    entity::user_profiles,
};

impl From<&user_profiles::Model> for UserProfile {
    fn from(model: &user_profiles::Model) -> Self {
        let targets = match (
            model.target_calories,
            model.target_protein_g,
            model.target_fat_g,
            model.target_carbs_g,
        ) {
            (Some(calories), Some(protein_g), Some(fat_g), Some(carbs_g)) => {
                Some(NutritionTargets {
                    calories,
                    protein_g,
                    fat_g,
                    carbs_g,
                })
            }
            _ => None,
        };

        Self {
            id: model.id,
            height_cm: model.height_cm,
            weight_kg: model.weight_kg,
            birthday: model.birthday,
            gender: model.gender.as_deref().map(Into::into),
            activity_level: model.activity_level.as_deref().map(Into::into),
            goal: model.goal.as_deref().map(Into::into),
            body_feeling: model.body_feeling.as_deref().map(Into::into),
            targets,
            setup_complete: model.setup_complete,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<user_profiles::Model> for UserProfile {
    fn from(model: user_profiles::Model) -> Self {
        Self::from(&model)
    }
}
