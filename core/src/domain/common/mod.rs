use chrono::{DateTime, Utc};
use rand::{Rng, distributions::Alphanumeric};
use std::time::Duration;
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct NutrilogConfig {
    pub database: DatabaseConfig,
    pub webhook: WebhookConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Clone, Debug)]
pub struct WebhookConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub text_timeout_fallback: TextTimeoutFallback,
}

/// Policy for the text-analysis path when the webhook call times out.
/// The photo path always fails terminally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextTimeoutFallback {
    /// Propagate the timeout as a network error.
    #[default]
    Fail,
    /// Substitute a locally synthesized answer after the timeout window.
    SyntheticAnswer,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}

pub fn generate_random_string(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
