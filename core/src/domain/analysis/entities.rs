use serde::{Deserialize, Serialize};

use crate::domain::user::entities::UserProfile;

/// Classification of an outgoing message, derived from the user's text by a
/// fixed keyword rule (`helpers::classify_message`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Analysis,
    WatchMyfood,
    Recipe,
    Chat,
}

impl MessageType {
    pub fn as_str(&self) -> &str {
        match self {
            MessageType::Analysis => "analysis",
            MessageType::WatchMyfood => "watch_myfood",
            MessageType::Recipe => "recipe",
            MessageType::Chat => "chat",
        }
    }
}

/// Biometric snapshot attached to every webhook request. Field names follow
/// the webhook contract, defaults cover the not-yet-set-up profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSnapshot {
    pub age: i32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub gender: String,
    pub activity_level: String,
    pub goal: String,
}

impl ProfileSnapshot {
    pub fn from_profile(profile: Option<&UserProfile>, today: chrono::NaiveDate) -> Self {
        let Some(profile) = profile else {
            return Self::default();
        };

        Self {
            age: profile.age_on(today).unwrap_or(0),
            weight_kg: profile.weight_kg.unwrap_or(0.0),
            height_cm: profile.height_cm.unwrap_or(0.0),
            gender: profile
                .gender
                .map(|g| g.as_str().to_owned())
                .unwrap_or_default(),
            activity_level: profile
                .activity_level
                .map(|a| a.as_str().to_owned())
                .unwrap_or_default(),
            goal: profile
                .goal
                .map(|g| g.as_str().to_owned())
                .unwrap_or_default(),
        }
    }
}

impl Default for ProfileSnapshot {
    fn default() -> Self {
        Self {
            age: 0,
            weight_kg: 0.0,
            height_cm: 0.0,
            gender: String::new(),
            activity_level: String::new(),
            goal: String::new(),
        }
    }
}

/// Nutrition facts extracted from a webhook answer, before validation turns
/// them into a `Food`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodFacts {
    pub name: String,
    pub calories: i32,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
    pub weight: String,
    pub opinion: Option<String>,
}

/// Two-stage parse result. `Structured` means the answer body was a JSON
/// object; `FallbackExtracted` means regex extraction over the raw text was
/// used, in which case `opinion` is always the entire raw answer.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedAnswer {
    Structured(FoodFacts),
    FallbackExtracted(FoodFacts),
}

impl ParsedAnswer {
    pub fn facts(&self) -> &FoodFacts {
        match self {
            ParsedAnswer::Structured(facts) | ParsedAnswer::FallbackExtracted(facts) => facts,
        }
    }

    pub fn into_facts(self) -> FoodFacts {
        match self {
            ParsedAnswer::Structured(facts) | ParsedAnswer::FallbackExtracted(facts) => facts,
        }
    }
}
