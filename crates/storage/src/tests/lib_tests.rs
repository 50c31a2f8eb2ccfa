use super::*;
use anyhow::anyhow;

struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get_string(&self, _key: &str) -> Result<Option<String>> {
        Err(anyhow!("storage unavailable"))
    }

    fn set_string(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("storage unavailable"))
    }
}

fn store_with_theme(label: &str) -> MemoryKeyValueStore {
    let mut store = MemoryKeyValueStore::new();
    store
        .set_string(THEME_STORAGE_KEY, label)
        .expect("seed theme");
    store
}

#[test]
fn load_defaults_to_light_when_nothing_is_stored() {
    let themes = ThemeStore::new(MemoryKeyValueStore::new());
    for _ in 0..3 {
        assert_eq!(themes.load(), ThemePreference::Light);
    }
}

#[test]
fn load_restores_stored_dark_preference() {
    let themes = ThemeStore::new(store_with_theme("dark"));
    assert_eq!(themes.load(), ThemePreference::Dark);
}

#[test]
fn load_treats_unrecognized_label_as_absent() {
    for label in ["purple", "DARK", "", " dark", "dark\n", " light ", "{\"theme\":1}"] {
        let themes = ThemeStore::new(store_with_theme(label));
        assert_eq!(themes.load(), ThemePreference::Light, "label {label:?}");
    }
}

#[test]
fn toggle_persists_the_returned_value() {
    let mut themes = ThemeStore::new(MemoryKeyValueStore::new());
    let updated = themes.toggle(ThemePreference::Light);
    assert_eq!(updated, ThemePreference::Dark);
    assert_eq!(
        themes
            .store()
            .get_string(THEME_STORAGE_KEY)
            .expect("read")
            .as_deref(),
        Some("dark")
    );
    assert_eq!(themes.load(), updated);
}

#[test]
fn toggling_twice_returns_to_original_preference() {
    let mut themes = ThemeStore::new(MemoryKeyValueStore::new());
    let original = themes.load();
    let once = themes.toggle(original);
    let twice = themes.toggle(once);
    assert_ne!(once, original);
    assert_eq!(twice, original);
    assert_eq!(themes.load(), original);
}

#[test]
fn storage_failures_are_swallowed() {
    let mut themes = ThemeStore::new(UnavailableStore);
    assert_eq!(themes.load(), ThemePreference::Light);
    assert_eq!(themes.toggle(ThemePreference::Light), ThemePreference::Dark);
    assert_eq!(themes.toggle(ThemePreference::Dark), ThemePreference::Light);
}

#[test]
fn file_store_round_trips_across_instances() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("preferences.json");

    let mut themes = ThemeStore::new(FileKeyValueStore::new(&path));
    assert_eq!(themes.load(), ThemePreference::Light);
    themes.toggle(ThemePreference::Light);
    assert!(path.exists(), "preferences file should exist: {}", path.display());

    let reopened = ThemeStore::new(FileKeyValueStore::new(&path));
    assert_eq!(reopened.load(), ThemePreference::Dark);
}

#[test]
fn file_store_keeps_unrelated_entries() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("preferences.json");
    fs::write(&path, r#"{"window_width":"1024"}"#).expect("seed");

    let mut store = FileKeyValueStore::new(&path);
    store.set_string(THEME_STORAGE_KEY, "dark").expect("write");

    assert_eq!(
        store.get_string("window_width").expect("read").as_deref(),
        Some("1024")
    );
    assert_eq!(
        store.get_string(THEME_STORAGE_KEY).expect("read").as_deref(),
        Some("dark")
    );
}

#[test]
fn corrupt_file_reads_as_light_and_is_replaced_on_toggle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("preferences.json");
    fs::write(&path, "not json at all").expect("seed");

    let mut themes = ThemeStore::new(FileKeyValueStore::new(&path));
    assert_eq!(themes.load(), ThemePreference::Light);
    assert_eq!(themes.toggle(ThemePreference::Light), ThemePreference::Dark);
    assert_eq!(themes.load(), ThemePreference::Dark);
}

#[test]
fn non_string_theme_value_is_treated_as_absent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("preferences.json");
    fs::write(&path, r#"{"theme":true}"#).expect("seed");

    let themes = ThemeStore::new(FileKeyValueStore::new(&path));
    assert_eq!(themes.load(), ThemePreference::Light);
}

#[test]
fn boxed_store_delegates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("preferences.json");
    let mut themes = ThemeStore::new(open_preferences(Some(path.as_path())));
    themes.toggle(ThemePreference::Light);
    assert_eq!(
        FileKeyValueStore::new(&path)
            .get_string(THEME_STORAGE_KEY)
            .expect("read")
            .as_deref(),
        Some("dark")
    );
}
