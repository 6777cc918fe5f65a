use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::food::entities::Meal;

/// Daily calorie and macro goals derived from the profile biometrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionTargets {
    pub calories: i32,
    pub protein_g: i32,
    pub fat_g: i32,
    pub carbs_g: i32,
}

impl NutritionTargets {
    /// Fixed macro split: 25% of calories as protein (4 kcal/g), 30% as fat
    /// (9 kcal/g), the calories left after the rounded grams as carbs.
    pub fn from_calories(calories: i32) -> Self {
        let calories_f = f64::from(calories.max(0));
        let protein_g = (calories_f * 0.25 / 4.0).round() as i32;
        let fat_g = (calories_f * 0.30 / 9.0).round() as i32;
        let remaining = (calories_f - f64::from(protein_g) * 4.0 - f64::from(fat_g) * 9.0).max(0.0);
        let carbs_g = (remaining / 4.0).round() as i32;

        Self {
            calories: calories.max(0),
            protein_g,
            fat_g,
            carbs_g,
        }
    }
}

/// All meals of one calendar day plus the targets in effect. A day with no
/// recorded data is represented by `NutritionIntake::empty`, never by a
/// missing entry; totals are always recomputed from the meals list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionIntake {
    pub date: NaiveDate,
    pub meals: Vec<Meal>,
    pub targets: Option<NutritionTargets>,
}

impl NutritionIntake {
    pub fn new(date: NaiveDate, meals: Vec<Meal>, targets: Option<NutritionTargets>) -> Self {
        Self {
            date,
            meals,
            targets,
        }
    }

    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            meals: Vec::new(),
            targets: None,
        }
    }

    pub fn has_data(&self) -> bool {
        !self.meals.is_empty()
    }

    pub fn total_calories(&self) -> i32 {
        self.meals.iter().map(Meal::total_calories).sum()
    }

    pub fn total_protein(&self) -> f64 {
        self.meals.iter().map(Meal::total_protein).sum()
    }

    pub fn total_fat(&self) -> f64 {
        self.meals.iter().map(Meal::total_fat).sum()
    }

    pub fn total_carbs(&self) -> f64 {
        self.meals.iter().map(Meal::total_carbs).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::food::entities::{Food, FoodSource, MealType};

    #[test]
    fn target_split_for_2000_calories() {
        let targets = NutritionTargets::from_calories(2000);

        assert_eq!(targets.calories, 2000);
        assert_eq!(targets.protein_g, 125); // 2000 * 0.25 / 4
        assert_eq!(targets.fat_g, 67); // 2000 * 0.30 / 9, rounded
        assert_eq!(targets.carbs_g, 224); // (2000 - 500 - 603) / 4
    }

    #[test]
    fn target_split_never_goes_negative() {
        let targets = NutritionTargets::from_calories(0);

        assert_eq!(targets.protein_g, 0);
        assert_eq!(targets.fat_g, 0);
        assert_eq!(targets.carbs_g, 0);
    }

    #[test]
    fn intake_totals_are_recomputed_from_meals() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut breakfast = Meal::new(date, MealType::Breakfast);
        breakfast.foods.push(
            Food::new(
                "Омлет".into(),
                300,
                18.0,
                22.0,
                3.0,
                "150г".into(),
                FoodSource::Manual,
                None,
            )
            .unwrap(),
        );
        let mut dinner = Meal::new(date, MealType::Dinner);
        dinner.foods.push(
            Food::new(
                "Рис".into(),
                200,
                4.0,
                0.5,
                44.0,
                "150г".into(),
                FoodSource::Manual,
                None,
            )
            .unwrap(),
        );

        let intake = NutritionIntake::new(date, vec![breakfast, dinner], None);

        assert_eq!(intake.total_calories(), 500);
        assert!((intake.total_protein() - 22.0).abs() < 1e-9);
        assert!((intake.total_carbs() - 47.0).abs() < 1e-9);
        assert!(intake.has_data());
    }

    #[test]
    fn empty_intake_has_zero_totals() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let intake = NutritionIntake::empty(date);

        assert!(!intake.has_data());
        assert_eq!(intake.total_calories(), 0);
    }
}
