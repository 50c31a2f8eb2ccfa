use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode,
};
use shared::{
    domain::{EvaluationInput, EvaluationResult, ResumeFile},
    error::{EvaluationError, ValidationError, SERVICE_FALLBACK_MESSAGE},
    protocol::{EvaluateResponse, DEFAULT_MIME_TYPE, FILE_FIELD, JOB_DESCRIPTION_FIELD},
};
use tracing::{debug, info, warn};

pub mod config;
pub mod controller;
pub mod validator;

pub use config::{load_settings, ClientSettings};
pub use controller::{RequestLifecycleController, RequestState};
pub use validator::{validate, ACCEPTED_EXTENSIONS};

/// The one network operation the lifecycle controller depends on.
#[async_trait]
pub trait EvaluationService: Send + Sync {
    async fn submit(&self, input: &EvaluationInput) -> Result<EvaluationResult, EvaluationError>;
}

pub struct EvaluationClient {
    http: Client,
    endpoint: String,
}

impl EvaluationClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build evaluation HTTP client")?;
        Ok(Self::with_http_client(endpoint, http))
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        Self::new(settings.service_url.clone(), settings.request_timeout())
    }

    pub fn with_http_client(endpoint: impl Into<String>, http: Client) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl EvaluationService for EvaluationClient {
    async fn submit(&self, input: &EvaluationInput) -> Result<EvaluationResult, EvaluationError> {
        validate(input)?;
        let resume = input
            .resume_file
            .as_ref()
            .ok_or(ValidationError::MissingFile)?;
        let job_description = input.job_description.trim();

        let form = Form::new()
            .part(FILE_FIELD, resume_part(resume))
            .text(JOB_DESCRIPTION_FIELD, job_description.to_string());

        debug!(
            endpoint = %self.endpoint,
            filename = %resume.filename,
            size_bytes = resume.size_bytes(),
            "sending evaluation request"
        );
        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                warn!(endpoint = %self.endpoint, "evaluation request failed: {err}");
                EvaluationError::Network(err.to_string())
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|err| {
            warn!(%status, "failed to read evaluation response body: {err}");
            EvaluationError::Network(err.to_string())
        })?;

        match interpret_response(status, &body) {
            Ok(result) => {
                info!(
                    score = result.suitability_score,
                    sections = result.section_count(),
                    "evaluation received"
                );
                Ok(result)
            }
            Err(err) => {
                warn!(%status, "evaluation rejected: {err}");
                Err(err)
            }
        }
    }
}

fn resume_part(resume: &ResumeFile) -> Part {
    let bare = || Part::bytes(resume.bytes.clone()).file_name(resume.filename.clone());
    let mime_type = resume.mime_type.as_deref().unwrap_or(DEFAULT_MIME_TYPE);
    bare().mime_str(mime_type).unwrap_or_else(|_| {
        warn!(mime_type, "invalid MIME type on resume file; sending as binary");
        bare()
            .mime_str(DEFAULT_MIME_TYPE)
            .unwrap_or_else(|_| bare())
    })
}

/// Maps an HTTP status and raw body onto the client's result contract.
pub fn interpret_response(
    status: StatusCode,
    body: &[u8],
) -> Result<EvaluationResult, EvaluationError> {
    let http_fallback = || format!("Evaluation service returned HTTP {}", status.as_u16());

    let parsed: EvaluateResponse = match serde_json::from_slice(body) {
        Ok(parsed) => parsed,
        Err(_) if !status.is_success() => return Err(EvaluationError::Service(http_fallback())),
        Err(err) => return Err(EvaluationError::MalformedResponse(err.to_string())),
    };

    match parsed.success {
        Some(true) => {
            let sections = parsed.sections.unwrap_or_default();
            let evaluation = parsed.evaluation.ok_or_else(|| {
                EvaluationError::MalformedResponse("success response without evaluation".into())
            })?;
            Ok(evaluation.into_result(sections))
        }
        Some(false) => Err(EvaluationError::Service(
            parsed
                .failure_message()
                .unwrap_or_else(|| SERVICE_FALLBACK_MESSAGE.to_string()),
        )),
        None if !status.is_success() => Err(EvaluationError::Service(
            parsed.failure_message().unwrap_or_else(http_fallback),
        )),
        None => Err(EvaluationError::MalformedResponse(
            "response has no success flag".into(),
        )),
    }
}

/// Reads a résumé from disk, guessing its MIME type from the extension.
pub fn load_resume_file(path: &Path) -> Result<ResumeFile> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read resume '{}'", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume".to_string());
    let file = ResumeFile::new(filename, bytes);
    Ok(match mime_guess::from_path(path).first_raw() {
        Some(mime_type) => file.with_mime_type(mime_type),
        None => file,
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
