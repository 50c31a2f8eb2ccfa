use shared::domain::ThemePreference;
use storage::{open_preferences, FileKeyValueStore, KeyValueStore, ThemeStore, THEME_STORAGE_KEY};

#[test]
fn theme_survives_restart_through_preferences_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("resume_eval").join("preferences.json");

    // First session: default, then the user switches to dark.
    let mut first = ThemeStore::new(open_preferences(Some(path.as_path())));
    let initial = first.load();
    assert_eq!(initial, ThemePreference::Light);
    let toggled = first.toggle(initial);
    drop(first);

    // Second session reads what the first one wrote.
    let second = ThemeStore::new(open_preferences(Some(path.as_path())));
    assert_eq!(second.load(), toggled);

    let raw = FileKeyValueStore::new(&path)
        .get_string(THEME_STORAGE_KEY)
        .expect("read stored label");
    assert_eq!(raw.as_deref(), Some(toggled.as_str()));
}
