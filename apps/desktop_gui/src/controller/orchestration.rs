//! Command orchestration helpers from UI actions to backend command queue.

use client_core::RequestLifecycleController;
use crossbeam_channel::{Sender, TrySendError};
use shared::error::EvaluationError;

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend worker disconnected (possible startup/runtime failure)".to_string();
            false
        }
    }
}

/// Runs the synchronous half of a submit on the UI thread and hands the
/// accepted input to the backend worker. A request that cannot be queued is
/// failed immediately so the controller never stays stuck in `Submitting`.
pub fn submit_evaluation(
    controller: &mut RequestLifecycleController,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut String,
) {
    let Some(input) = controller.begin_submit() else {
        return;
    };
    if !dispatch_backend_command(cmd_tx, BackendCommand::Evaluate { input }, status) {
        controller.complete(Err(EvaluationError::Network(status.clone())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crossbeam_channel::bounded;
    use shared::{
        domain::{EvaluationInput, EvaluationResult, ResumeFile},
        error::ErrorCode,
    };
    use std::sync::Arc;

    struct UnusedService;

    #[async_trait]
    impl client_core::EvaluationService for UnusedService {
        async fn submit(
            &self,
            _input: &EvaluationInput,
        ) -> Result<EvaluationResult, EvaluationError> {
            Err(EvaluationError::Service("not expected".into()))
        }
    }

    fn ready_controller() -> RequestLifecycleController {
        let mut controller = RequestLifecycleController::new(Arc::new(UnusedService));
        controller.select_file(Some(ResumeFile::new("cv.pdf", b"%PDF".to_vec())));
        controller.set_job_description("Rust engineer");
        controller
    }

    #[test]
    fn queues_one_command_per_accepted_submit() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let mut controller = ready_controller();
        let mut status = String::new();

        submit_evaluation(&mut controller, &cmd_tx, &mut status);
        submit_evaluation(&mut controller, &cmd_tx, &mut status);

        assert!(controller.is_submitting());
        assert_eq!(cmd_rx.len(), 1);
        match cmd_rx.try_recv().expect("command") {
            BackendCommand::Evaluate { input } => {
                assert_eq!(input.job_description, "Rust engineer");
            }
        }
    }

    #[test]
    fn invalid_input_queues_nothing() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let mut controller = RequestLifecycleController::new(Arc::new(UnusedService));
        let mut status = String::new();

        submit_evaluation(&mut controller, &cmd_tx, &mut status);

        assert!(cmd_rx.is_empty());
        assert_eq!(
            controller.state().failure().map(|report| report.code),
            Some(ErrorCode::MissingFile)
        );
    }

    #[test]
    fn disconnected_worker_fails_the_submission() {
        let (cmd_tx, cmd_rx) = bounded(1);
        drop(cmd_rx);
        let mut controller = ready_controller();
        let mut status = String::new();

        submit_evaluation(&mut controller, &cmd_tx, &mut status);

        assert!(status.contains("disconnected"));
        assert_eq!(
            controller.state().failure().map(|report| report.code),
            Some(ErrorCode::Network)
        );
    }

    #[test]
    fn full_queue_reports_retry_status() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        let mut status = String::new();
        assert!(dispatch_backend_command(
            &cmd_tx,
            BackendCommand::Evaluate {
                input: EvaluationInput::default()
            },
            &mut status
        ));
        assert!(!dispatch_backend_command(
            &cmd_tx,
            BackendCommand::Evaluate {
                input: EvaluationInput::default()
            },
            &mut status
        ));
        assert_eq!(status, "UI command queue is full; please retry");
    }
}
