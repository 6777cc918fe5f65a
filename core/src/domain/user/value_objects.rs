use chrono::NaiveDate;

use crate::domain::user::entities::{ActivityLevel, BodyFeeling, Gender, Goal};

/// Full profile snapshot supplied by an explicit profile-save operation.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub birthday: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
    pub body_feeling: Option<BodyFeeling>,
}
