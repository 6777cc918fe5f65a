use crate::domain::food::entities::FoodSource;

/// Candidate food data, validated when turned into a `Food`.
#[derive(Debug, Clone)]
pub struct NewFoodInput {
    pub name: String,
    pub calories: i32,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
    pub weight: String,
    pub source: FoodSource,
    pub ai_opinion: Option<String>,
}

impl NewFoodInput {
    pub fn manual(
        name: String,
        calories: i32,
        protein_g: f64,
        fat_g: f64,
        carbs_g: f64,
        weight: String,
    ) -> Self {
        Self {
            name,
            calories,
            protein_g,
            fat_g,
            carbs_g,
            weight,
            source: FoodSource::Manual,
            ai_opinion: None,
        }
    }
}
