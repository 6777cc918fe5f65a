use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{common::generate_timestamp, nutrition::entities::NutritionTargets};

/// The single per-installation user profile. Biometric fields stay `None`
/// until profile setup completes; target derivation requires all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub birthday: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
    pub body_feeling: Option<BodyFeeling>,
    pub targets: Option<NutritionTargets>,
    pub setup_complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl From<&str> for Gender {
    fn from(s: &str) -> Self {
        match s {
            "male" => Gender::Male,
            _ => Gender::Female,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    /// TDEE multiplier applied on top of BMR.
    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

impl From<&str> for ActivityLevel {
    fn from(s: &str) -> Self {
        match s {
            "sedentary" => ActivityLevel::Sedentary,
            "light" => ActivityLevel::Light,
            "active" => ActivityLevel::Active,
            "very_active" => ActivityLevel::VeryActive,
            _ => ActivityLevel::Moderate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    MaintainWeight,
    GainWeight,
}

impl Goal {
    pub fn as_str(&self) -> &str {
        match self {
            Goal::LoseWeight => "lose_weight",
            Goal::MaintainWeight => "maintain_weight",
            Goal::GainWeight => "gain_weight",
        }
    }

    /// Calorie adjustment applied to maintenance TDEE.
    pub fn adjustment(&self) -> f64 {
        match self {
            Goal::LoseWeight => 0.85,
            Goal::MaintainWeight => 1.0,
            Goal::GainWeight => 1.15,
        }
    }
}

impl From<&str> for Goal {
    fn from(s: &str) -> Self {
        match s {
            "lose_weight" => Goal::LoseWeight,
            "gain_weight" => Goal::GainWeight,
            _ => Goal::MaintainWeight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyFeeling {
    Great,
    Okay,
    Tired,
    Bad,
}

impl BodyFeeling {
    pub fn as_str(&self) -> &str {
        match self {
            BodyFeeling::Great => "great",
            BodyFeeling::Okay => "okay",
            BodyFeeling::Tired => "tired",
            BodyFeeling::Bad => "bad",
        }
    }
}

impl From<&str> for BodyFeeling {
    fn from(s: &str) -> Self {
        match s {
            "great" => BodyFeeling::Great,
            "tired" => BodyFeeling::Tired,
            "bad" => BodyFeeling::Bad,
            _ => BodyFeeling::Okay,
        }
    }
}

impl UserProfile {
    pub fn new() -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            height_cm: None,
            weight_kg: None,
            birthday: None,
            gender: None,
            activity_level: None,
            goal: None,
            body_feeling: None,
            targets: None,
            setup_complete: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full years between birthday and `today`.
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        let birthday = self.birthday?;
        let mut age = today.year() - birthday.year();
        if (today.month(), today.day()) < (birthday.month(), birthday.day()) {
            age -= 1;
        }
        Some(age)
    }

    /// Recommended daily calories: Mifflin-St Jeor BMR scaled by activity
    /// factor and goal adjustment. `None` while the profile is incomplete.
    pub fn recommended_calories(&self, today: NaiveDate) -> Option<i32> {
        let weight = self.weight_kg?;
        let height = self.height_cm?;
        let age = self.age_on(today)?;
        let gender = self.gender?;
        let activity = self.activity_level?;
        let goal = self.goal?;

        if weight <= 0.0 || height <= 0.0 || age < 0 {
            return None;
        }

        let gender_offset = match gender {
            Gender::Male => 5.0,
            Gender::Female => -161.0,
        };

        let bmr = 10.0 * weight + 6.25 * height - 5.0 * f64::from(age) + gender_offset;
        let calories = bmr * activity.factor() * goal.adjustment();

        Some(calories.round() as i32)
    }

    pub fn has_complete_biometrics(&self) -> bool {
        self.weight_kg.is_some()
            && self.height_cm.is_some()
            && self.birthday.is_some()
            && self.gender.is_some()
            && self.activity_level.is_some()
            && self.goal.is_some()
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::new()
    }
}
