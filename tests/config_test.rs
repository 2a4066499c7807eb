use std::collections::HashMap;
use std::fs;
use user_registry::config::ConfigLoader;
use user_registry::RegistryError;

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_defaults_with_plain_variables() {
    let dir = tempfile::tempdir().unwrap();
    let config = ConfigLoader::new()
        .with_directory(dir.path())
        .with_environment("test")
        .with_vars(vars(&[
            ("DATABASE_URL", "postgresql://bot:pw@db/registry"),
            ("BOT_TOKEN", "123:abc"),
        ]))
        .load()
        .expect("config should load");

    assert_eq!(config.database.url, "postgresql://bot:pw@db/registry");
    assert_eq!(config.database.max_connections, 10);
    assert_eq!(config.telegram.bot_token, "123:abc");
    assert!(config.telegram.fetch_profile_photos);
    assert!(!config.logging.json);
}

#[test]
fn test_missing_token_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let result = ConfigLoader::new()
        .with_directory(dir.path())
        .with_environment("test")
        .with_vars(HashMap::new())
        .load();

    assert!(matches!(result, Err(RegistryError::Configuration(_))));
}

#[test]
fn test_file_layering_and_env_overrides() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("registry_bot.toml"),
        r#"
[database]
url = "postgresql://localhost/from_base_file"
max_connections = 4

[telegram]
bot_token = "file-token"
fetch_profile_photos = false
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("registry_bot.production.toml"),
        r#"
[database]
max_connections = 20

[logging]
level = "info"
json = true
"#,
    )
    .unwrap();

    let config = ConfigLoader::new()
        .with_directory(dir.path())
        .with_environment("production")
        .with_vars(vars(&[("REGISTRY_BOT__DATABASE__ACQUIRE_TIMEOUT_SECONDS", "5")]))
        .load()
        .expect("layered config should load");

    assert_eq!(config.database.url, "postgresql://localhost/from_base_file");
    assert_eq!(config.database.max_connections, 20);
    assert_eq!(config.database.acquire_timeout_seconds, 5);
    assert_eq!(config.telegram.bot_token, "file-token");
    assert!(!config.telegram.fetch_profile_photos);
    assert_eq!(config.logging.level.as_deref(), Some("info"));
    assert!(config.logging.json);

    // Plain variables beat files
    let overridden = ConfigLoader::new()
        .with_directory(dir.path())
        .with_environment("development")
        .with_vars(vars(&[("BOT_TOKEN", "env-token")]))
        .load()
        .unwrap();
    assert_eq!(overridden.telegram.bot_token, "env-token");
    assert_eq!(overridden.database.max_connections, 4);
}

#[test]
fn test_invalid_pool_size_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let result = ConfigLoader::new()
        .with_directory(dir.path())
        .with_environment("test")
        .with_vars(vars(&[
            ("BOT_TOKEN", "123:abc"),
            ("REGISTRY_BOT__DATABASE__MAX_CONNECTIONS", "0"),
        ]))
        .load();

    assert!(matches!(result, Err(RegistryError::Configuration(_))));
}
