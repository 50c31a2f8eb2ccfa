use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check if the backend server is running.";
pub const MALFORMED_RESPONSE_MESSAGE: &str =
    "Received an unreadable response from the evaluation service.";
pub const SERVICE_FALLBACK_MESSAGE: &str = "Failed to analyze resume";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    MissingFile,
    MissingJobDescription,
    Network,
    MalformedResponse,
    Service,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a resume file")]
    MissingFile,
    #[error("Please provide a job description")]
    MissingJobDescription,
}

/// Every way an evaluation request can fail. The payload of the transport
/// and decoding variants is diagnostic detail for logs, not for users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("transport failure: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("{0}")]
    Service(String),
}

impl EvaluationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(ValidationError::MissingFile) => ErrorCode::MissingFile,
            Self::Validation(ValidationError::MissingJobDescription) => {
                ErrorCode::MissingJobDescription
            }
            Self::Network(_) => ErrorCode::Network,
            Self::MalformedResponse(_) => ErrorCode::MalformedResponse,
            Self::Service(_) => ErrorCode::Service,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            Self::MalformedResponse(_) => MALFORMED_RESPONSE_MESSAGE.to_string(),
            Self::Service(message) if message.trim().is_empty() => {
                SERVICE_FALLBACK_MESSAGE.to_string()
            }
            Self::Service(message) => message.clone(),
        }
    }
}

/// What the presentation layer gets to see about a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorReport {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<&EvaluationError> for ErrorReport {
    fn from(value: &EvaluationError) -> Self {
        Self::new(value.code(), value.user_message())
    }
}

impl From<EvaluationError> for ErrorReport {
    fn from(value: EvaluationError) -> Self {
        Self::from(&value)
    }
}

impl From<ValidationError> for ErrorReport {
    fn from(value: ValidationError) -> Self {
        Self::from(EvaluationError::from(value))
    }
}
