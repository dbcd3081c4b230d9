use super::*;
use seeds_endpoint::config::{BASE_URL_ENV_VAR, TIMEOUT_ENV_VAR};
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

fn set_endpoint_env(base_url: Option<&str>, timeout: Option<&str>) {
    unsafe {
        match base_url {
            Some(url) => std::env::set_var(BASE_URL_ENV_VAR, url),
            None => std::env::remove_var(BASE_URL_ENV_VAR),
        }
        match timeout {
            Some(seconds) => std::env::set_var(TIMEOUT_ENV_VAR, seconds),
            None => std::env::remove_var(TIMEOUT_ENV_VAR),
        }
    }
}

#[test]
fn test_app_config_default() {
    let config = AppConfig::default();

    assert_eq!(config.endpoint, EndpointSettings::default());
    assert!(config.endpoint.base_url.is_none());
}

#[test]
fn test_app_config_load_invalid_toml() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("invalid_config.toml");

    fs::write(&config_path, "invalid = toml = syntax").expect("Failed to write invalid TOML");

    let result = AppConfig::load(&config_path);

    if let Err(Error::Config(msg)) = result {
        assert!(msg.contains("Failed to parse configuration file"));
    } else {
        panic!("Expected Config error");
    }
}

#[test]
fn test_app_config_load_nonexistent_file() {
    let nonexistent_path = PathBuf::from("nonexistent_seeds_config.toml");
    let result = AppConfig::load(&nonexistent_path);

    if let Err(Error::Config(msg)) = result {
        assert!(msg.contains("Configuration file not found"));
    } else {
        panic!("Expected Config error");
    }
}

#[test]
fn test_app_config_load_endpoint_table() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("seeds.toml");
    fs::write(
        &config_path,
        "[endpoint]\nbase_url = \"http://seeds.test/api\"\ntimeout_seconds = 4\n",
    )
    .expect("Failed to write config");

    let config = AppConfig::load(&config_path).expect("Failed to load config");

    assert_eq!(
        config.endpoint.base_url.as_deref(),
        Some("http://seeds.test/api")
    );
    assert_eq!(config.endpoint.timeout_seconds, Some(4));
}

#[test]
fn test_app_config_save_and_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("seeds.toml");

    let original_config = AppConfig::with_base_url("http://localhost:4000/seeds");
    original_config
        .save(&config_path)
        .expect("Failed to save config");

    assert!(config_path.exists());
    let written = fs::read_to_string(&config_path).unwrap();
    assert!(written.contains("[endpoint]"));
    assert!(!written.contains("timeout_seconds"));

    let loaded_config = AppConfig::load(&config_path).expect("Failed to load config");
    assert_eq!(loaded_config.endpoint, original_config.endpoint);
}

#[test]
fn test_endpoint_config_override_wins() {
    let config = AppConfig {
        endpoint: EndpointSettings {
            base_url: Some("http://from-file/seeds".to_string()),
            timeout_seconds: Some(9),
        },
    };

    let endpoint = config
        .endpoint_config(Some("http://from-flag/seeds"))
        .expect("endpoint config should resolve");

    assert_eq!(endpoint.base_url, "http://from-flag/seeds");
    assert_eq!(endpoint.timeout_seconds, 9);
}

#[test]
fn test_endpoint_config_from_file() {
    let config = AppConfig::with_base_url("http://from-file/seeds");

    let endpoint = config.endpoint_config(None).unwrap();

    assert_eq!(endpoint.base_url, "http://from-file/seeds");
    assert_eq!(endpoint.timeout_seconds, 30);
}

#[test]
fn test_get_config_path() {
    assert_eq!(
        get_config_path(Some("custom.toml")),
        PathBuf::from("custom.toml")
    );
    assert!(get_config_path(None).ends_with(DEFAULT_CONFIG_FILENAME));
}

#[test]
fn test_resolve_endpoint_config_requires_named_file() {
    let result = resolve_endpoint_config(
        Some("definitely/not/here/seeds.toml"),
        Some("http://localhost/seeds"),
    );

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_resolve_endpoint_config_reads_named_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("seeds.toml");
    AppConfig::with_base_url("http://named/seeds")
        .save(&config_path)
        .unwrap();

    let endpoint = resolve_endpoint_config(config_path.to_str(), None).unwrap();

    assert_eq!(endpoint.base_url, "http://named/seeds");
}

#[test]
#[serial]
fn test_resolve_endpoint_config_falls_back_to_environment() {
    set_endpoint_env(Some("http://from-env/seeds"), Some("12"));

    let endpoint = resolve_endpoint_config(None, None);

    set_endpoint_env(None, None);
    let endpoint = endpoint.expect("environment should provide the endpoint");
    assert_eq!(endpoint.base_url, "http://from-env/seeds");
    assert_eq!(endpoint.timeout_seconds, 12);
}

#[test]
#[serial]
fn test_file_timeout_applies_to_environment_url() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("seeds.toml");
    fs::write(&config_path, "[endpoint]\ntimeout_seconds = 3\n").expect("Failed to write config");
    set_endpoint_env(Some("http://from-env/seeds"), Some("12"));

    let endpoint = resolve_endpoint_config(config_path.to_str(), None);

    set_endpoint_env(None, None);
    let endpoint = endpoint.expect("environment should provide the base URL");
    assert_eq!(endpoint.base_url, "http://from-env/seeds");
    assert_eq!(endpoint.timeout_seconds, 3);
}

#[test]
#[serial]
fn test_missing_environment_without_file_or_flag() {
    set_endpoint_env(None, None);

    let result = AppConfig::default().endpoint_config(None);

    assert!(matches!(result, Err(Error::Endpoint(_))));
}
