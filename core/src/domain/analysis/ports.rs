use std::future::Future;

use crate::domain::{
    analysis::value_objects::{PhotoAnalysisRequest, TextAnalysisRequest, WebhookAnswer},
    common::entities::app_errors::CoreError,
    food::entities::Food,
};

/// Client trait for the external analysis webhook
#[cfg_attr(test, mockall::automock)]
pub trait AnalysisClient: Send + Sync {
    fn analyze_text(
        &self,
        request: TextAnalysisRequest,
    ) -> impl Future<Output = Result<WebhookAnswer, CoreError>> + Send;

    fn analyze_photo(
        &self,
        request: PhotoAnalysisRequest,
    ) -> impl Future<Output = Result<WebhookAnswer, CoreError>> + Send;
}

/// Service trait turning a photo or text description into a `Food`
pub trait FoodAnalysisService: Send + Sync {
    fn analyze_text(
        &self,
        description: String,
    ) -> impl Future<Output = Result<Food, CoreError>> + Send;

    fn analyze_photo(
        &self,
        image: Vec<u8>,
        caption: String,
    ) -> impl Future<Output = Result<Food, CoreError>> + Send;
}
