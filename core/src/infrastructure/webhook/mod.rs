pub mod client;

pub use client::WebhookAnalysisClient;
