use std::env;
use std::fs;
use std::path::PathBuf;
use stripwatch::Settings;
use tempfile::TempDir;

#[test]
fn test_env_override_with_double_underscore() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("settings.toml");
    fs::write(&config_path, "[watch]\ndirectory = \"from-file\"\n").unwrap();

    unsafe {
        // Double underscore separates nested levels
        env::set_var("STRIPWATCH_WATCH__DIRECTORY", "from-env");
    }

    let settings = Settings::load_from(&config_path).unwrap();

    unsafe {
        env::remove_var("STRIPWATCH_WATCH__DIRECTORY");
    }

    // Environment variable should override config file
    assert_eq!(settings.watch.directory, Some(PathBuf::from("from-env")));
    assert_eq!(settings.resolve_directory(None), PathBuf::from("from-env"));
}

#[test]
fn test_file_values_survive_unrelated_env() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("settings.toml");
    fs::write(&config_path, "version = 3\n[logging]\ndefault = \"warn\"\n").unwrap();

    let settings = Settings::load_from(&config_path).unwrap();

    assert_eq!(settings.version, 3);
    assert_eq!(settings.logging.default, "warn");
}
