use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::normalize_service_url, load_resume_file, load_settings, EvaluationClient,
    RequestLifecycleController, RequestState,
};
use shared::{domain::EvaluationResult, error::ErrorReport};
use storage::{open_preferences, ThemeStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "resume-eval", about = "Evaluate a resume against a job description")]
struct Args {
    /// Evaluation endpoint; overrides resume_eval.toml and environment.
    #[arg(long, global = true)]
    service_url: Option<String>,
    /// Preferences file holding the theme setting.
    #[arg(long, global = true)]
    preferences: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a resume and print the evaluation.
    Evaluate {
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long, conflicts_with = "job_description_file")]
        job_description: Option<String>,
        #[arg(long)]
        job_description_file: Option<PathBuf>,
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Print the result (or error) as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Read or flip the persisted light/dark preference.
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum ThemeAction {
    Show,
    Toggle,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
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
    tracing::debug!(
        service_url = %settings.service_url,
        timeout_secs = settings.request_timeout_secs,
        "resolved client settings"
    );

    match args.command {
        Command::Theme { action } => {
            let mut themes = ThemeStore::new(open_preferences(settings.preferences_path.as_deref()));
            let current = themes.load();
            let shown = match action {
                ThemeAction::Show => current,
                ThemeAction::Toggle => themes.toggle(current),
            };
            println!("{shown}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Evaluate {
            file,
            job_description,
            job_description_file,
            timeout_secs,
            json,
        } => {
            if let Some(secs) = timeout_secs.filter(|secs| *secs > 0) {
                settings.request_timeout_secs = secs;
            }
            let job_description = match (job_description, job_description_file) {
                (Some(text), _) => text,
                (None, Some(path)) => read_job_description(&path)?,
                (None, None) => String::new(),
            };

            let client = EvaluationClient::from_settings(&settings)?;
            let mut controller = RequestLifecycleController::new(Arc::new(client));
            if let Some(path) = file {
                controller.select_file(Some(load_resume_file(&path)?));
            }
            controller.set_job_description(job_description);

            if !json {
                eprintln!("Your resume is being analyzed...");
            }
            let state = controller.submit().await;
            print_outcome(state, json)
        }
    }
}

fn read_job_description(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read job description '{}'", path.display()))
}

fn print_outcome(state: &RequestState, json: bool) -> Result<ExitCode> {
    match state {
        RequestState::Succeeded(result) => {
            if json {
                println!("{}", serde_json::to_string_pretty(result)?);
            } else {
                print!("{}", render_report(result));
            }
            Ok(ExitCode::SUCCESS)
        }
        RequestState::Failed(report) => {
            if json {
                println!("{}", serde_json::to_string_pretty(report)?);
            } else {
                eprintln!("{}", render_failure(report));
            }
            Ok(ExitCode::FAILURE)
        }
        other => anyhow::bail!("evaluation ended in unexpected state '{}'", other.label()),
    }
}

fn render_failure(report: &ErrorReport) -> String {
    format!("Error: {}", report.message)
}

fn render_report(result: &EvaluationResult) -> String {
    let mut out = String::new();
    let metrics = &result.technical_metrics;
    let _ = writeln!(out, "Analysis Complete!");
    let _ = writeln!(
        out,
        "Found {} sections in your resume",
        result.section_count()
    );
    let _ = writeln!(out, "Suitability score: {}/10", result.suitability_score);
    if !result.reasoning.is_empty() {
        let _ = writeln!(out, "\n{}", result.reasoning);
    }
    for (title, items) in [
        ("Strengths", &result.strengths),
        ("Weaknesses", &result.weaknesses),
        ("Recommendations", &result.recommendations),
    ] {
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{title}:");
        for item in items {
            let _ = writeln!(out, "  - {item}");
        }
    }
    let _ = writeln!(out, "\nTechnical metrics:");
    let _ = writeln!(out, "  cosine similarity:   {:.2}", metrics.cosine_similarity);
    let _ = writeln!(out, "  keyword density:     {:.2}", metrics.keyword_density);
    let _ = writeln!(out, "  knockout violations: {}", metrics.knockout_violations);
    out
}
