//! Backend-to-UI events and error labelling for the desktop GUI.

use shared::{
    domain::EvaluationResult,
    error::{ErrorCode, EvaluationError},
};

pub enum UiEvent {
    Info(String),
    EvaluationFinished(Result<EvaluationResult, EvaluationError>),
    BackendUnavailable(String),
}

pub fn error_label(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::MissingFile | ErrorCode::MissingJobDescription => "Validation",
        ErrorCode::Network => "Network",
        ErrorCode::MalformedResponse => "Unexpected response",
        ErrorCode::Service => "Evaluation service",
    }
}

pub fn classify_startup_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("runtime") {
        "Backend worker startup failure; restart the app and retry.".to_string()
    } else {
        format!("Backend unavailable: {message}")
    }
}
