//! Backend commands queued from UI to backend worker.

use shared::domain::EvaluationInput;

pub enum BackendCommand {
    Evaluate { input: EvaluationInput },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Evaluate { .. } => "evaluate",
        }
    }
}
