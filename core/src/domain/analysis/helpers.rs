use crate::domain::analysis::entities::MessageType;

const ANALYSIS_KEYWORDS: &[&str] = &[
    "калори",
    "кбжу",
    "бжу",
    "белк",
    "жир",
    "углевод",
    "ккал",
    "сколько в",
];

const WATCH_MYFOOD_KEYWORDS: &[&str] = &[
    "что я ел",
    "что я сегодня ел",
    "мой рацион",
    "дневник питания",
    "итоги дня",
    "сводка за день",
];

const RECIPE_KEYWORDS: &[&str] = &["рецепт", "как приготовить", "как сделать", "приготовь"];

/// Fixed keyword classification of a user message. Case-insensitive;
/// analysis keywords are checked before watch_myfood and recipe, first
/// match wins, default is chat.
pub fn classify_message(text: &str) -> MessageType {
    let lowered = text.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

    if contains_any(ANALYSIS_KEYWORDS) {
        MessageType::Analysis
    } else if contains_any(WATCH_MYFOOD_KEYWORDS) {
        MessageType::WatchMyfood
    } else if contains_any(RECIPE_KEYWORDS) {
        MessageType::Recipe
    } else {
        MessageType::Chat
    }
}
