use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{entities::app_errors::CoreError, generate_timestamp};

/// One nutrition record. Constructed only through `Food::new`, which
/// enforces the validation rules, so a `Food` attached to a meal is always
/// well-formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: Uuid,
    pub name: String,
    pub calories: i32,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
    pub weight: String,
    pub source: FoodSource,
    pub ai_opinion: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodSource {
    Manual,
    PhotoAnalysis,
    TextAnalysis,
}

impl FoodSource {
    pub fn as_str(&self) -> &str {
        match self {
            FoodSource::Manual => "manual",
            FoodSource::PhotoAnalysis => "photo_analysis",
            FoodSource::TextAnalysis => "text_analysis",
        }
    }
}

impl From<&str> for FoodSource {
    fn from(s: &str) -> Self {
        match s {
            "photo_analysis" => FoodSource::PhotoAnalysis,
            "text_analysis" => FoodSource::TextAnalysis,
            _ => FoodSource::Manual,
        }
    }
}

impl Food {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        calories: i32,
        protein_g: f64,
        fat_g: f64,
        carbs_g: f64,
        weight: String,
        source: FoodSource,
        ai_opinion: Option<String>,
    ) -> Result<Self, CoreError> {
        validate_food(&name, calories, protein_g, fat_g, carbs_g)?;

        let (now, timestamp) = generate_timestamp();

        Ok(Self {
            id: Uuid::new_v7(timestamp),
            name,
            calories,
            protein_g,
            fat_g,
            carbs_g,
            weight,
            source,
            ai_opinion,
            created_at: now,
        })
    }

    /// Scale per-100g macros to an actual portion size.
    pub fn portion(&self, grams: f64) -> Result<Self, CoreError> {
        if !grams.is_finite() || grams <= 0.0 {
            return Err(CoreError::Validation(
                "portion weight must be positive".into(),
            ));
        }

        let ratio = grams / 100.0;
        let mut scaled = self.clone();
        scaled.calories = (f64::from(self.calories) * ratio).round() as i32;
        scaled.protein_g = self.protein_g * ratio;
        scaled.fat_g = self.fat_g * ratio;
        scaled.carbs_g = self.carbs_g * ratio;
        scaled.weight = format!("{}г", grams.round() as i64);

        Ok(scaled)
    }
}

pub fn validate_food(
    name: &str,
    calories: i32,
    protein_g: f64,
    fat_g: f64,
    carbs_g: f64,
) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("food name must not be blank".into()));
    }

    if calories < 0 {
        return Err(CoreError::Validation(
            "calories must not be negative".into(),
        ));
    }

    for (label, value) in [
        ("protein", protein_g),
        ("fat", fat_g),
        ("carbs", carbs_g),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::Validation(format!(
                "{label} grams must be finite and non-negative"
            )));
        }
    }

    // Atwater energy from the stated macros must stay in the same ballpark
    // as the stated calories.
    let macro_energy = protein_g * 4.0 + fat_g * 9.0 + carbs_g * 4.0;
    if calories > 0 && macro_energy > f64::from(calories) * 2.0 {
        return Err(CoreError::Validation(
            "macro grams are inconsistent with stated calories".into(),
        ));
    }

    Ok(())
}

/// A tagged group of foods for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: Uuid,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub foods: Vec<Food>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl From<&str> for MealType {
    fn from(s: &str) -> Self {
        match s {
            "breakfast" => MealType::Breakfast,
            "lunch" => MealType::Lunch,
            "dinner" => MealType::Dinner,
            _ => MealType::Snack,
        }
    }
}

impl Meal {
    pub fn new(date: NaiveDate, meal_type: MealType) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            date,
            meal_type,
            foods: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn total_calories(&self) -> i32 {
        self.foods.iter().map(|f| f.calories).sum()
    }

    pub fn total_protein(&self) -> f64 {
        self.foods.iter().map(|f| f.protein_g).sum()
    }

    pub fn total_fat(&self) -> f64 {
        self.foods.iter().map(|f| f.fat_g).sum()
    }

    pub fn total_carbs(&self) -> f64 {
        self.foods.iter().map(|f| f.carbs_g).sum()
    }
}
