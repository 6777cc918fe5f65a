use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

use crate::domain::{
    analysis::{
        parser::UNKNOWN_FOOD_NAME,
        ports::AnalysisClient,
        value_objects::{PhotoAnalysisRequest, TextAnalysisRequest, WebhookAnswer},
    },
    common::{entities::app_errors::CoreError, TextTimeoutFallback, WebhookConfig},
};

/// Client for the fixed workflow-automation webhook that performs the food
/// analysis. Text requests go as JSON, photo requests as multipart.
#[derive(Debug, Clone)]
pub struct WebhookAnalysisClient {
    endpoint: String,
    timeout: Duration,
    text_timeout_fallback: TextTimeoutFallback,
    client: Client,
}

impl WebhookAnalysisClient {
    pub fn new(config: WebhookConfig) -> Self {
        Self {
            endpoint: config.endpoint,
            timeout: config.timeout,
            text_timeout_fallback: config.text_timeout_fallback,
            client: Client::new(),
        }
    }

    async fn read_answer(&self, response: reqwest::Response) -> Result<WebhookAnswer, CoreError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Webhook returned {}: {}", status, body);
            return Err(CoreError::Network(format!(
                "webhook returned {status}: {body}"
            )));
        }

        response.json::<WebhookAnswer>().await.map_err(|e| {
            tracing::error!("Failed to parse webhook response: {}", e);
            CoreError::AiAnalysis(format!("malformed webhook response: {e}"))
        })
    }

    /// Locally synthesized answer substituted when the text path times out
    /// under the `SyntheticAnswer` policy.
    fn synthetic_answer() -> WebhookAnswer {
        WebhookAnswer {
            status: crate::domain::analysis::value_objects::ResponseStatus::Success,
            answer: format!(
                r#"{{"name":"{UNKNOWN_FOOD_NAME}","calories":0,"protein":0,"fat":0,"carbs":0,"weight":"100г","opinion":"Сервис анализа не ответил вовремя, попробуйте ещё раз."}}"#
            ),
        }
    }
}

impl AnalysisClient for WebhookAnalysisClient {
    async fn analyze_text(&self, request: TextAnalysisRequest) -> Result<WebhookAnswer, CoreError> {
        let send = self.client.post(&self.endpoint).json(&request).send();

        let response = match tokio::time::timeout(self.timeout, send).await {
            Ok(result) => result.map_err(|e| {
                tracing::error!("Webhook request failed: {}", e);
                CoreError::Network(format!("webhook request failed: {e}"))
            })?,
            Err(_) => {
                return match self.text_timeout_fallback {
                    TextTimeoutFallback::SyntheticAnswer => {
                        warn!(
                            "webhook timed out after {:?}, substituting synthetic answer",
                            self.timeout
                        );
                        Ok(Self::synthetic_answer())
                    }
                    TextTimeoutFallback::Fail => Err(CoreError::Network(format!(
                        "webhook timed out after {:?}",
                        self.timeout
                    ))),
                };
            }
        };

        self.read_answer(response).await
    }

    async fn analyze_photo(
        &self,
        request: PhotoAnalysisRequest,
    ) -> Result<WebhookAnswer, CoreError> {
        let profile_json = serde_json::to_string(&request.user_profile).map_err(|e| {
            CoreError::AiAnalysis(format!("failed to serialize profile snapshot: {e}"))
        })?;

        let photo = Part::bytes(request.image)
            .file_name("photo.jpg")
            .mime_str("image/jpeg")
            .map_err(|e| CoreError::Network(format!("failed to build photo part: {e}")))?;

        let form = Form::new()
            .part("photo", photo)
            .text("userProfile", profile_json)
            .text("caption", request.caption)
            .text("userId", request.user_id)
            .text("messageType", request.message_type.as_str().to_owned())
            .text(
                "isFirstMessageOfDay",
                request.is_first_message_of_day.to_string(),
            );

        let send = self.client.post(&self.endpoint).multipart(form).send();

        // No fallback on the photo path: a timeout is terminal.
        let response = tokio::time::timeout(self.timeout, send)
            .await
            .map_err(|_| {
                CoreError::Network(format!("webhook timed out after {:?}", self.timeout))
            })?
            .map_err(|e| {
                tracing::error!("Webhook photo upload failed: {}", e);
                CoreError::Network(format!("webhook photo upload failed: {e}"))
            })?;

        self.read_answer(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::entities::{MessageType, ParsedAnswer, ProfileSnapshot};
    use crate::domain::analysis::parser::parse_answer;
    use crate::domain::analysis::value_objects::ResponseStatus;
    use tokio::net::TcpListener;

    /// Listener that accepts connections and holds them open without ever
    /// answering, so the client request hangs until its timeout fires.
    async fn silent_endpoint() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        format!("http://{addr}/analyze")
    }

    fn client(endpoint: String, fallback: TextTimeoutFallback) -> WebhookAnalysisClient {
        WebhookAnalysisClient::new(WebhookConfig {
            endpoint,
            timeout: Duration::from_millis(100),
            text_timeout_fallback: fallback,
        })
    }

    fn text_request() -> TextAnalysisRequest {
        TextAnalysisRequest {
            message: "одно яблоко".into(),
            user_profile: ProfileSnapshot::default(),
            user_id: "test".into(),
            is_first_message_of_day: true,
            message_type: MessageType::Analysis,
        }
    }

    #[tokio::test]
    async fn text_timeout_with_fail_policy_is_a_network_error() {
        let endpoint = silent_endpoint().await;

        let result = client(endpoint, TextTimeoutFallback::Fail)
            .analyze_text(text_request())
            .await;

        assert!(matches!(result, Err(CoreError::Network(_))));
    }

    #[tokio::test]
    async fn text_timeout_with_fallback_yields_the_synthetic_answer() {
        let endpoint = silent_endpoint().await;

        let answer = client(endpoint, TextTimeoutFallback::SyntheticAnswer)
            .analyze_text(text_request())
            .await
            .unwrap();

        assert_eq!(answer.status, ResponseStatus::Success);
        let ParsedAnswer::Structured(facts) = parse_answer(&answer.answer) else {
            panic!("synthetic answer must be well-formed JSON");
        };
        assert_eq!(facts.name, UNKNOWN_FOOD_NAME);
        assert_eq!(facts.calories, 0);
        assert!(facts.opinion.is_some());
    }

    #[tokio::test]
    async fn photo_timeout_is_always_a_network_error() {
        let endpoint = silent_endpoint().await;

        let request = PhotoAnalysisRequest {
            image: vec![0xFF, 0xD8],
            caption: String::new(),
            user_profile: ProfileSnapshot::default(),
            user_id: "test".into(),
            is_first_message_of_day: false,
            message_type: MessageType::Analysis,
        };

        let result = client(endpoint, TextTimeoutFallback::SyntheticAnswer)
            .analyze_photo(request)
            .await;

        assert!(matches!(result, Err(CoreError::Network(_))));
    }
}
