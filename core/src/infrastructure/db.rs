use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use tracing::{error, info};

use crate::domain::common::entities::app_errors::CoreError;

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS user_profiles (
    id BLOB PRIMARY KEY NOT NULL,
    height_cm REAL,
    weight_kg REAL,
    birthday TEXT,
    gender TEXT,
    activity_level TEXT,
    goal TEXT,
    body_feeling TEXT,
    target_calories INTEGER,
    target_protein_g INTEGER,
    target_fat_g INTEGER,
    target_carbs_g INTEGER,
    setup_complete INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS meals (
    id BLOB PRIMARY KEY NOT NULL,
    date TEXT NOT NULL,
    meal_type TEXT NOT NULL,
    foods TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_meals_date ON meals (date);

CREATE TABLE IF NOT EXISTS chat_messages (
    id BLOB PRIMARY KEY NOT NULL,
    role TEXT NOT NULL,
    content TEXT NOT NULL,
    image_path TEXT,
    retryable INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);
";

/// Open the on-device SQLite store and make sure the schema exists.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, CoreError> {
    let db = Database::connect(database_url).await.map_err(|e| {
        error!("Failed to open database {}: {}", database_url, e);
        CoreError::Storage(format!("failed to open database: {e}"))
    })?;

    db.execute_unprepared(SCHEMA).await.map_err(|e| {
        error!("Failed to initialize schema: {}", e);
        CoreError::Storage(format!("failed to initialize schema: {e}"))
    })?;

    info!("database ready at {}", database_url);
    Ok(db)
}
