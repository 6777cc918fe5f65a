use thiserror::Error;

/// Domain error kinds. Every repository and service operation returns one of
/// these; raw sea-orm/reqwest/serde errors never cross a port boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("network error: {0}")]
    Network(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("AI analysis error: {0}")]
    AiAnalysis(String),

    #[error("business logic error: {0}")]
    BusinessLogic(String),

    #[error("not found: {0}")]
    DataNotFound(String),
}
