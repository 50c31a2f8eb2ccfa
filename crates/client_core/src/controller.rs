//! Request lifecycle: validation, a single in-flight submission, and the
//! observable state the presentation layer renders.

use std::sync::Arc;

use shared::{
    domain::{EvaluationInput, EvaluationResult, ResumeFile},
    error::{ErrorReport, EvaluationError},
};
use tracing::{debug, info, warn};

use crate::{validator::validate, EvaluationService};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Submitting,
    Succeeded(EvaluationResult),
    Failed(ErrorReport),
}

impl RequestState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn result(&self) -> Option<&EvaluationResult> {
        match self {
            Self::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&ErrorReport> {
        match self {
            Self::Failed(report) => Some(report),
            _ => None,
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        self.failure().map(|report| report.message.as_str())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

pub struct RequestLifecycleController {
    service: Arc<dyn EvaluationService>,
    input: EvaluationInput,
    state: RequestState,
    // Set by input edits, cleared when a submission is accepted.
    input_dirty: bool,
    accepted_submissions: u64,
}

impl RequestLifecycleController {
    pub fn new(service: Arc<dyn EvaluationService>) -> Self {
        Self {
            service,
            input: EvaluationInput::default(),
            state: RequestState::Idle,
            input_dirty: false,
            accepted_submissions: 0,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn input(&self) -> &EvaluationInput {
        &self.input
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    /// True when the inputs changed since the last accepted submission.
    pub fn has_unsubmitted_changes(&self) -> bool {
        self.input_dirty
    }

    pub fn accepted_submissions(&self) -> u64 {
        self.accepted_submissions
    }

    pub fn select_file(&mut self, file: Option<ResumeFile>) {
        self.input.resume_file = file;
        self.mark_input_changed();
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.input.job_description = text.into();
        self.mark_input_changed();
    }

    fn mark_input_changed(&mut self) {
        self.input_dirty = true;
        if matches!(
            self.state,
            RequestState::Succeeded(_) | RequestState::Failed(_)
        ) {
            debug!(from = self.state.label(), "input changed; clearing previous outcome");
            self.state = RequestState::Idle;
        }
    }

    /// Synchronous half of a submit trigger. Returns the input to send when the
    /// submission is accepted; `None` when it was ignored or failed validation.
    pub fn begin_submit(&mut self) -> Option<EvaluationInput> {
        if self.state.is_submitting() {
            debug!("submit ignored; a request is already in flight");
            return None;
        }

        if let Err(err) = validate(&self.input) {
            info!(reason = %err, "submission rejected by validation");
            self.state = RequestState::Failed(err.into());
            return None;
        }

        self.accepted_submissions += 1;
        self.input_dirty = false;
        self.state = RequestState::Submitting;
        info!(
            submission = self.accepted_submissions,
            "evaluation submission accepted"
        );
        Some(self.input.clone())
    }

    /// Applies the outcome of the in-flight request. Returns false when there
    /// was nothing in flight to complete.
    pub fn complete(&mut self, outcome: Result<EvaluationResult, EvaluationError>) -> bool {
        if !self.state.is_submitting() {
            warn!(
                state = self.state.label(),
                "dropping evaluation outcome with no request in flight"
            );
            return false;
        }

        self.state = match outcome {
            Ok(result) => RequestState::Succeeded(result),
            Err(err) => RequestState::Failed(ErrorReport::from(&err)),
        };
        true
    }

    /// Validates, sends at most one request, and applies its outcome.
    pub async fn submit(&mut self) -> &RequestState {
        if let Some(input) = self.begin_submit() {
            let outcome = self.service.submit(&input).await;
            self.complete(outcome);
        }
        &self.state
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
