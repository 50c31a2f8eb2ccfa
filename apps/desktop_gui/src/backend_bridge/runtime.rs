//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::EvaluationService;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{classify_startup_failure, UiEvent};

pub fn launch(
    service: Arc<dyn EvaluationService>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(classify_startup_failure(
                    &format!("failed to build backend runtime: {err}"),
                )));
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Evaluate { input } => {
                        let outcome = service.submit(&input).await;
                        if ui_tx.send(UiEvent::EvaluationFinished(outcome)).is_err() {
                            tracing::debug!("ui event receiver dropped; stopping backend worker");
                            break;
                        }
                    }
                }
            }
        });
        tracing::debug!("backend worker exited");
    })
}
