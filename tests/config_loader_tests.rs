//! Layered configuration loading tests.

use gateway::config::ConfigLoader;
use std::fs;
use tempfile::TempDir;

#[test]
fn missing_env_files_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let config = ConfigLoader::with_base_dir(dir.path().to_path_buf())
        .load()
        .unwrap();

    assert_eq!(config.profile, "local");
    assert_eq!(config.api_bind_addr, "0.0.0.0:8080");
    assert_eq!(config.session_ttl_seconds, 86400);
    assert!(config.payment_provider_secret.is_none());
}

#[test]
fn env_file_values_are_picked_up() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".env"),
        "GATEWAY_API_BIND_ADDR=127.0.0.1:9999\nGATEWAY_SESSION_TTL_SECONDS=120\nIGNORED_KEY=nope\n",
    )
    .unwrap();

    let config = ConfigLoader::with_base_dir(dir.path().to_path_buf())
        .load()
        .unwrap();

    assert_eq!(config.api_bind_addr, "127.0.0.1:9999");
    assert_eq!(config.session_ttl_seconds, 120);
}

#[test]
fn local_layer_overrides_base_layer() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "GATEWAY_LOG_LEVEL=info\n").unwrap();
    fs::write(dir.path().join(".env.local"), "GATEWAY_LOG_LEVEL=debug\n").unwrap();

    let config = ConfigLoader::with_base_dir(dir.path().to_path_buf())
        .load()
        .unwrap();

    assert_eq!(config.log_level, "debug");
}

#[test]
fn profile_layer_overrides_local() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".env"),
        "GATEWAY_PROFILE=staging\nGATEWAY_LOG_FORMAT=json\n",
    )
    .unwrap();
    fs::write(dir.path().join(".env.staging"), "GATEWAY_LOG_FORMAT=pretty\n").unwrap();

    let config = ConfigLoader::with_base_dir(dir.path().to_path_buf())
        .load()
        .unwrap();

    assert_eq!(config.profile, "staging");
    assert_eq!(config.log_format, "pretty");
}

#[test]
fn load_rejects_weak_session_secret() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "GATEWAY_SESSION_SECRET=short\n").unwrap();

    let err = ConfigLoader::with_base_dir(dir.path().to_path_buf())
        .load()
        .unwrap_err();

    assert!(err.to_string().contains("session secret"));
}

#[test]
fn load_rejects_zero_session_ttl() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "GATEWAY_SESSION_TTL_SECONDS=0\n").unwrap();

    assert!(
        ConfigLoader::with_base_dir(dir.path().to_path_buf())
            .load()
            .is_err()
    );
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".env"),
        "GATEWAY_DATABASE_URL=\nGATEWAY_PAYMENT_PROVIDER_SECRET=   \n",
    )
    .unwrap();

    let config = ConfigLoader::with_base_dir(dir.path().to_path_buf())
        .load()
        .unwrap();

    assert!(config.database_url.starts_with("postgresql://"));
    assert!(config.payment_provider_secret.is_none());
}
