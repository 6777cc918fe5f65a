use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::analysis::entities::{FoodFacts, ParsedAnswer};

/// Placeholder for an answer that carries no food name.
pub const UNKNOWN_FOOD_NAME: &str = "Неизвестный продукт";
const DEFAULT_WEIGHT: &str = "100г";

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)"?name"?\s*[:=]\s*"?([^",\n{}]+)"?"#).expect("valid regex")
});
static CALORIES_RE: LazyLock<Regex> = LazyLock::new(|| number_regex("calories"));
static PROTEIN_RE: LazyLock<Regex> = LazyLock::new(|| number_regex("protein"));
static FAT_RE: LazyLock<Regex> = LazyLock::new(|| number_regex("fat"));
static CARBS_RE: LazyLock<Regex> = LazyLock::new(|| number_regex("carbs"));
static WEIGHT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)"?weight"?\s*[:=]\s*"?([^",\n{}]+)"?"#).expect("valid regex")
});

fn number_regex(key: &str) -> Regex {
    Regex::new(&format!(r#"(?i)"?{key}"?\s*[:=]\s*(-?\d+(?:[.,]\d+)?)"#))
        .expect("valid regex")
}

/// Parse a webhook answer into food facts. JSON objects take the structured
/// path; anything else falls back to regex extraction over the raw text,
/// where the opinion is always the entire raw answer.
pub fn parse_answer(raw: &str) -> ParsedAnswer {
    match serde_json::from_str::<Value>(raw.trim()) {
        Ok(Value::Object(map)) => ParsedAnswer::Structured(facts_from_object(&map)),
        _ => ParsedAnswer::FallbackExtracted(facts_from_text(raw)),
    }
}

fn facts_from_object(map: &serde_json::Map<String, Value>) -> FoodFacts {
    let name = map
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_FOOD_NAME)
        .to_owned();

    FoodFacts {
        name,
        calories: json_number(map.get("calories")).round() as i32,
        protein_g: json_number(map.get("protein")),
        fat_g: json_number(map.get("fat")),
        carbs_g: json_number(map.get("carbs")),
        weight: map
            .get("weight")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_WEIGHT)
            .to_owned(),
        opinion: map
            .get("opinion")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_owned),
    }
}

/// Numeric fields may arrive as JSON numbers or as numeric strings.
fn json_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().replace(',', ".").parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn facts_from_text(raw: &str) -> FoodFacts {
    let capture_string = |re: &Regex| {
        re.captures(raw)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_owned())
            .filter(|s| !s.is_empty())
    };
    let capture_number = |re: &Regex| {
        re.captures(raw)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().replace(',', ".").parse::<f64>().ok())
            .unwrap_or(0.0)
    };

    FoodFacts {
        name: capture_string(&NAME_RE).unwrap_or_else(|| UNKNOWN_FOOD_NAME.to_owned()),
        calories: capture_number(&CALORIES_RE).round() as i32,
        protein_g: capture_number(&PROTEIN_RE),
        fat_g: capture_number(&FAT_RE),
        carbs_g: capture_number(&CARBS_RE),
        weight: capture_string(&WEIGHT_RE).unwrap_or_else(|| DEFAULT_WEIGHT.to_owned()),
        opinion: Some(raw.to_owned()),
    }
}
