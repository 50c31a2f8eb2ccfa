use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use client_core::{
    config::normalize_service_url, load_settings, EvaluationClient, EvaluationService,
    RequestLifecycleController,
};
use crossbeam_channel::bounded;
use eframe::egui;
use storage::{open_preferences, ThemeStore};
use tracing_subscriber::EnvFilter;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::{ResumeEvalApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(name = "resume-eval-gui", about = "Desktop resume evaluator")]
struct Args {
    #[arg(long)]
    service_url: Option<String>,
    #[arg(long)]
    preferences: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(raw) = &args.service_url {
        settings.service_url = normalize_service_url(raw)
            .with_context(|| format!("invalid --service-url '{raw}'"))?;
    }
    if let Some(path) = args.preferences {
        settings.preferences_path = Some(path);
    }
    tracing::info!(service_url = %settings.service_url, "starting desktop evaluator");

    let service: Arc<dyn EvaluationService> = Arc::new(EvaluationClient::from_settings(&settings)?);
    let request_controller = RequestLifecycleController::new(service.clone());
    let theme_store = ThemeStore::new(open_preferences(settings.preferences_path.as_deref()));

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    let _worker = backend_bridge::runtime::launch(service, cmd_rx, ui_tx);

    let startup = StartupConfig {
        service_url: settings.service_url.clone(),
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Resume Evaluator")
            .with_inner_size([720.0, 860.0])
            .with_min_inner_size([480.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Resume Evaluator",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(ResumeEvalApp::new(
                cmd_tx,
                ui_rx,
                request_controller,
                theme_store,
                startup,
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("desktop GUI exited with error: {err}"))
}
