use std::{path::PathBuf, time::Duration};

use client_core::{load_resume_file, RequestLifecycleController, RequestState, ACCEPTED_EXTENSIONS};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::{CornerRadius, RichText};
use shared::{
    domain::{EvaluationResult, ThemePreference},
    error::{ErrorCode, EvaluationError},
};
use storage::{KeyValueStore, ThemeStore};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{error_label, UiEvent};
use crate::controller::orchestration::submit_evaluation;
use crate::ui::theme::{egui_theme, palette, toggle_label, visuals_for_theme, ERROR_COLOR};

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub service_url: String,
}

pub type PreferenceThemeStore = ThemeStore<Box<dyn KeyValueStore + Send>>;

pub struct ResumeEvalApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    controller: RequestLifecycleController,
    job_description: String,
    selected_path: Option<PathBuf>,

    theme_store: PreferenceThemeStore,
    theme: ThemePreference,
    applied_theme: Option<ThemePreference>,

    status: String,
    startup: StartupConfig,
}

impl ResumeEvalApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        controller: RequestLifecycleController,
        theme_store: PreferenceThemeStore,
        startup: StartupConfig,
    ) -> Self {
        let theme = theme_store.load();
        tracing::info!(theme = %theme, "restored theme preference");
        Self {
            cmd_tx,
            ui_rx,
            controller,
            job_description: String::new(),
            selected_path: None,
            theme_store,
            theme,
            applied_theme: None,
            status: String::new(),
            startup,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    tracing::debug!("{message}");
                }
                UiEvent::EvaluationFinished(outcome) => {
                    self.controller.complete(outcome);
                }
                UiEvent::BackendUnavailable(message) => {
                    if self.controller.is_submitting() {
                        self.controller
                            .complete(Err(EvaluationError::Network(message.clone())));
                    }
                    self.status = message;
                }
            }
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_theme == Some(self.theme) {
            return;
        }

        ctx.set_theme(egui_theme(self.theme));
        let mut style = (*ctx.style()).clone();
        style.visuals = visuals_for_theme(self.theme);
        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
        style.spacing.button_padding = egui::vec2(14.0, 8.0);
        ctx.set_style(style);
        self.applied_theme = Some(self.theme);
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme_store.toggle(self.theme);
    }

    fn pick_resume(&mut self) {
        let mut dialog = rfd::FileDialog::new().add_filter("Resume", ACCEPTED_EXTENSIONS);
        if let Some(dir) = self.selected_path.as_ref().and_then(|path| path.parent()) {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.pick_file() else {
            return;
        };

        match load_resume_file(&path) {
            Ok(file) => {
                self.controller.select_file(Some(file));
                self.selected_path = Some(path);
                self.status.clear();
            }
            Err(err) => {
                tracing::warn!("failed to load resume: {err:#}");
                self.status = format!("{err:#}");
            }
        }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        let colors = palette(self.theme);
        let mut toggle_clicked = false;
        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::new()
                    .fill(colors.card)
                    .stroke(egui::Stroke::new(1.0, colors.border))
                    .inner_margin(egui::Margin::symmetric(24, 12)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Resume Evaluator").size(19.0).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        toggle_clicked = ui
                            .button(toggle_label(self.theme))
                            .on_hover_text("Toggle dark/light mode")
                            .clicked();
                    });
                });
            });
        if toggle_clicked {
            self.toggle_theme();
        }
    }

    fn show_main(&mut self, ctx: &egui::Context) {
        let colors = palette(self.theme);
        let submitting = self.controller.is_submitting();
        let mut pick_clicked = false;
        let mut submit_clicked = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(48.0);
                ui.vertical_centered(|ui| {
                    ui.set_max_width(460.0);
                    egui::Frame::new()
                        .fill(colors.card)
                        .stroke(egui::Stroke::new(1.0, colors.border))
                        .corner_radius(CornerRadius::same(20))
                        .inner_margin(egui::Margin::same(28))
                        .show(ui, |ui| {
                            ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                                ui.label(RichText::new("Upload Your Resume").size(17.0).strong());
                                ui.horizontal(|ui| {
                                    pick_clicked = ui
                                        .add_enabled(!submitting, egui::Button::new("Choose file…"))
                                        .clicked();
                                    match self.controller.input().resume_file.as_ref() {
                                        Some(file) => ui.label(format!(
                                            "{} ({})",
                                            file.filename,
                                            human_readable_bytes(file.size_bytes() as u64)
                                        )),
                                        None => ui.weak("No file selected"),
                                    };
                                });
                                ui.add_space(12.0);

                                ui.label(
                                    RichText::new("Paste Job Description").size(17.0).strong(),
                                );
                                let response = ui.add(
                                    egui::TextEdit::multiline(&mut self.job_description)
                                        .desired_rows(5)
                                        .desired_width(f32::INFINITY)
                                        .hint_text(
                                            "Paste the job description to compare your resume",
                                        ),
                                );
                                if response.changed() {
                                    self.controller
                                        .set_job_description(self.job_description.clone());
                                }
                                ui.add_space(12.0);

                                let label = if submitting {
                                    "Analyzing..."
                                } else {
                                    "Evaluate Resume"
                                };
                                let button = egui::Button::new(
                                    RichText::new(label).strong().color(colors.button_text),
                                )
                                .fill(colors.button)
                                .corner_radius(CornerRadius::same(12));
                                submit_clicked = ui.add_enabled(!submitting, button).clicked();
                            });
                        });

                    ui.add_space(16.0);
                    show_request_state(ui, self.controller.state());
                    if let Some(note) = stale_outcome_note(&self.controller) {
                        ui.weak(note);
                    }

                    if !self.status.is_empty() {
                        ui.add_space(8.0);
                        ui.weak(self.status.as_str());
                    }
                    ui.add_space(16.0);
                    ui.small(format!(
                        "{} evaluation service: {}",
                        server_environment_label(&self.startup.service_url),
                        self.startup.service_url
                    ));
                });
            });
        });

        if pick_clicked {
            self.pick_resume();
        }
        if submit_clicked {
            submit_evaluation(&mut self.controller, &self.cmd_tx, &mut self.status);
        }
    }
}

/// Shown under an outcome whose inputs were edited while it was in flight.
fn stale_outcome_note(controller: &RequestLifecycleController) -> Option<&'static str> {
    if !controller.has_unsubmitted_changes() {
        return None;
    }
    match controller.state() {
        RequestState::Succeeded(_) => Some(STALE_OUTCOME_NOTE),
        RequestState::Failed(report)
            if !matches!(
                report.code,
                ErrorCode::MissingFile | ErrorCode::MissingJobDescription
            ) =>
        {
            Some(STALE_OUTCOME_NOTE)
        }
        _ => None,
    }
}

const STALE_OUTCOME_NOTE: &str =
    "Inputs changed since this evaluation was sent; evaluate again to refresh it.";

fn show_request_state(ui: &mut egui::Ui, state: &RequestState) {
    match state {
        RequestState::Idle => {}
        RequestState::Submitting => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Your resume is being analyzed...");
            });
        }
        RequestState::Failed(report) => {
            ui.colored_label(ERROR_COLOR, format!("Error: {}", report.message));
            ui.small(error_label(report.code));
        }
        RequestState::Succeeded(result) => show_result(ui, result),
    }
}

fn show_result(ui: &mut egui::Ui, result: &EvaluationResult) {
    ui.label(RichText::new("Analysis Complete!").strong());
    ui.label(format!(
        "Found {} sections in your resume",
        result.section_count()
    ));
    ui.add(
        egui::ProgressBar::new(result.suitability_score as f32 / 10.0)
            .text(format!("Suitability {}/10", result.suitability_score)),
    );
    if !result.reasoning.is_empty() {
        ui.label(result.reasoning.as_str());
    }

    for (title, items) in [
        ("Strengths", &result.strengths),
        ("Weaknesses", &result.weaknesses),
        ("Recommendations", &result.recommendations),
    ] {
        if items.is_empty() {
            continue;
        }
        ui.collapsing(title, |ui| {
            for item in items {
                ui.label(format!("• {item}"));
            }
        });
    }

    let metrics = &result.technical_metrics;
    egui::Grid::new("technical_metrics")
        .num_columns(2)
        .show(ui, |ui| {
            ui.label("Cosine similarity");
            ui.label(format!("{:.2}", metrics.cosine_similarity));
            ui.end_row();
            ui.label("Keyword density");
            ui.label(format!("{:.2}", metrics.keyword_density));
            ui.end_row();
            ui.label("Knockout violations");
            ui.label(metrics.knockout_violations.to_string());
            ui.end_row();
        });
}

fn server_environment_label(service_url: &str) -> &'static str {
    let server = service_url.to_ascii_lowercase();
    if server.contains("127.0.0.1") || server.contains("localhost") {
        "Local"
    } else if server.contains("staging") {
        "Staging"
    } else {
        "Remote"
    }
}

fn human_readable_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes < KB {
        return format!("{bytes} B");
    }
    if bytes < MB {
        return format_scaled_unit(bytes, KB, "KB");
    }
    format_scaled_unit(bytes, MB, "MB")
}

fn format_scaled_unit(bytes: u64, unit_size: u64, unit_label: &str) -> String {
    let value = bytes as f64 / unit_size as f64;
    let value_text = format!("{value:.1}");
    let compact_value = value_text.strip_suffix(".0").unwrap_or(&value_text);
    format!("{compact_value} {unit_label}")
}

impl eframe::App for ResumeEvalApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);

        self.show_header(ctx);
        self.show_main(ctx);

        if self.controller.is_submitting() {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
