use super::*;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_when_no_file_or_env() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(&dir.path().join("missing.toml"), no_env);
    assert_eq!(settings, ClientSettings::default());
    assert_eq!(settings.request_timeout(), Duration::from_secs(60));
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("resume_eval.toml");
    fs::write(
        &path,
        r#"
service_url = "https://eval.example.com/evaluate"
request_timeout_secs = "15"
preferences_path = "/tmp/prefs.json"
"#,
    )
    .expect("write settings");

    let settings = load_settings_from(&path, no_env);
    assert_eq!(settings.service_url, "https://eval.example.com/evaluate");
    assert_eq!(settings.request_timeout_secs, 15);
    assert_eq!(
        settings.preferences_path,
        Some(PathBuf::from("/tmp/prefs.json"))
    );
}

#[test]
fn env_overrides_file_and_app_prefix_wins_last() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("resume_eval.toml");
    fs::write(&path, "service_url = \"http://file.local/evaluate\"\n").expect("write settings");

    let settings = load_settings_from(&path, |name| match name {
        "RESUME_EVAL_SERVICE_URL" => Some("http://env.local/evaluate".into()),
        "APP__SERVICE_URL" => Some("http://app.local/evaluate".into()),
        "RESUME_EVAL_TIMEOUT_SECS" => Some("5".into()),
        _ => None,
    });
    assert_eq!(settings.service_url, "http://app.local/evaluate");
    assert_eq!(settings.request_timeout_secs, 5);
}

#[test]
fn invalid_values_keep_previous_layer() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(&dir.path().join("missing.toml"), |name| match name {
        "RESUME_EVAL_SERVICE_URL" => Some("ftp://files.local/evaluate".into()),
        "APP__TIMEOUT_SECS" => Some("0".into()),
        "RESUME_EVAL_TIMEOUT_SECS" => Some("soon".into()),
        "RESUME_EVAL_PREFERENCES_PATH" => Some("   ".into()),
        _ => None,
    });
    assert_eq!(settings, ClientSettings::default());
}

#[test]
fn malformed_settings_file_is_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("resume_eval.toml");
    fs::write(&path, "service_url = [1, 2").expect("write settings");

    let settings = load_settings_from(&path, no_env);
    assert_eq!(settings, ClientSettings::default());
}

#[test]
fn normalizes_service_urls() {
    assert_eq!(
        normalize_service_url(" http://localhost:8000/evaluate "),
        Some("http://localhost:8000/evaluate".to_string())
    );
    assert_eq!(
        normalize_service_url("http://localhost:8000"),
        Some("http://localhost:8000/".to_string())
    );
    assert_eq!(normalize_service_url("localhost:8000"), None);
    assert_eq!(normalize_service_url("not a url"), None);
}

#[test]
fn integer_timeout_in_file_is_accepted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("resume_eval.toml");
    fs::write(&path, "request_timeout_secs = 20\n").expect("write settings");

    let settings = load_settings_from(&path, no_env);
    assert_eq!(settings.request_timeout_secs, 20);
}
