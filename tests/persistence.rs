//! Integration tests for preference persistence and the controller
//! lifecycle against real storage.

use nightswitch::{ColorMode, FileStore, ManualAmbient, ThemeController, ThemeMode};

#[test]
fn test_preference_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("theme.toml");

    let mut first = ThemeController::new(FileStore::at(&path), ManualAmbient::new(None));
    first.initialize();
    first.set_mode(ThemeMode::Dark);
    drop(first);

    // A fresh controller over the same storage reads the selection back.
    let mut second = ThemeController::new(FileStore::at(&path), ManualAmbient::new(None));
    second.initialize();
    assert_eq!(second.mode(), ThemeMode::Dark);
}

#[test]
fn test_first_run_defaults_to_system() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::at(dir.path().join("theme.toml"));

    let mut controller = ThemeController::new(store, ManualAmbient::new(None));
    controller.initialize();
    assert_eq!(controller.mode(), ThemeMode::System);
}

#[test]
fn test_fresh_environment_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("theme.toml");
    let ambient = ManualAmbient::new(Some(ColorMode::Dark));

    let mut controller = ThemeController::new(FileStore::at(&path), ambient.clone());
    controller.initialize();

    // Fresh environment: no record, dark ambient.
    assert_eq!(controller.mode(), ThemeMode::System);
    assert_eq!(controller.resolved_mode(), ColorMode::Dark);

    // Explicit selection persists and pins the resolution.
    controller.set_mode(ThemeMode::Light);
    assert_eq!(controller.mode(), ThemeMode::Light);
    assert_eq!(controller.resolved_mode(), ColorMode::Light);
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains(r#"theme = "light""#));

    // Ambient flip has no effect while the mode is explicit.
    ambient.set(ColorMode::Light);
    assert_eq!(controller.resolved_mode(), ColorMode::Light);

    // Returning to system tracks the ambient again.
    controller.set_mode(ThemeMode::System);
    assert_eq!(controller.resolved_mode(), ColorMode::Light);
    ambient.set(ColorMode::Dark);
    assert_eq!(controller.resolved_mode(), ColorMode::Dark);
}
