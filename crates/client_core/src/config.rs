use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use url::Url;

pub const SETTINGS_FILE: &str = "resume_eval.toml";
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8000/evaluate";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub service_url: String,
    pub request_timeout_secs: u64,
    pub preferences_path: Option<PathBuf>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            preferences_path: None,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Defaults, then `resume_eval.toml` in the working directory, then environment.
pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from(
    settings_file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(settings_file) {
        match raw.parse::<toml::Table>() {
            Ok(table) => {
                let file_cfg = flatten_table(&table);
                if let Some(v) = file_cfg.get("service_url") {
                    apply_service_url(&mut settings, v);
                }
                if let Some(v) = file_cfg.get("request_timeout_secs") {
                    apply_timeout(&mut settings, v);
                }
                if let Some(v) = file_cfg.get("preferences_path") {
                    apply_preferences_path(&mut settings, v);
                }
            }
            Err(err) => tracing::warn!(
                "ignoring unreadable settings file '{}': {err}",
                settings_file.display()
            ),
        }
    }

    for name in ["RESUME_EVAL_SERVICE_URL", "APP__SERVICE_URL"] {
        if let Some(v) = env(name) {
            apply_service_url(&mut settings, &v);
        }
    }
    for name in ["RESUME_EVAL_TIMEOUT_SECS", "APP__TIMEOUT_SECS"] {
        if let Some(v) = env(name) {
            apply_timeout(&mut settings, &v);
        }
    }
    if let Some(v) = env("RESUME_EVAL_PREFERENCES_PATH") {
        apply_preferences_path(&mut settings, &v);
    }

    settings
}

// Only scalar values are meaningful here; nested tables are ignored.
fn flatten_table(table: &toml::Table) -> HashMap<String, String> {
    table
        .iter()
        .filter_map(|(key, value)| {
            let value = match value {
                toml::Value::String(text) => text.clone(),
                toml::Value::Integer(number) => number.to_string(),
                _ => return None,
            };
            Some((key.clone(), value))
        })
        .collect()
}

pub fn normalize_service_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}

fn apply_service_url(settings: &mut ClientSettings, raw: &str) {
    match normalize_service_url(raw) {
        Some(url) => settings.service_url = url,
        None => tracing::warn!(value = raw, "ignoring invalid service url"),
    }
}

fn apply_timeout(settings: &mut ClientSettings, raw: &str) {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => settings.request_timeout_secs = secs,
        _ => tracing::warn!(value = raw, "ignoring invalid request timeout"),
    }
}

fn apply_preferences_path(settings: &mut ClientSettings, raw: &str) {
    let raw = raw.trim();
    if !raw.is_empty() {
        settings.preferences_path = Some(PathBuf::from(raw));
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
