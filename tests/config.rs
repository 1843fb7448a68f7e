// configuration integration tests

use desa_upload::config::{load_configuration, validate_configuration, AppConfig, Cli, Command};
use desa_upload::upload::PathResolver;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn cli(config_file: Option<PathBuf>) -> Cli {
    Cli {
        config_file,
        api_base_url: None,
        verbose: 0,
        quiet: 0,
        command: Command::Preview {
            value: "/uploads/x.jpg".to_string(),
        },
    }
}

#[test]
fn config_file_drives_resolver() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
[api]
base_url = "https://api.desa-sukamaju.id/api/"

[assets]
root = "/assets/img"
upload_prefix = "/storage/"
placeholder = "/assets/img/kosong.png"

[endpoints]
image = "/media/upload"
"#,
    )
    .unwrap();

    let config = load_configuration(&cli(Some(config_path))).unwrap();
    assert_eq!(config.backend_origin(), "https://api.desa-sukamaju.id");
    assert_eq!(
        config.image_endpoint(),
        "https://api.desa-sukamaju.id/api/media/upload"
    );

    let resolver = PathResolver::from_config(&config);
    assert_eq!(
        resolver.resolve("/storage/galeri/a.jpg", "galeri"),
        "https://api.desa-sukamaju.id/storage/galeri/a.jpg"
    );
    assert_eq!(resolver.resolve("a.jpg", "galeri"), "/assets/img/galeri/a.jpg");
    // the old default prefix is no longer served
    assert_eq!(
        resolver.display_url(Some("/uploads/galeri/a.jpg")),
        "/assets/img/kosong.png"
    );
}

#[test]
fn session_store_must_exist() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            r#"
[session]
store = "{}"
"#,
            temp_dir.path().join("missing.json").display()
        ),
    )
    .unwrap();

    assert!(load_configuration(&cli(Some(config_path))).is_err());
}

#[test]
fn session_store_and_key_are_loaded() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("session.json");
    fs::write(&store, r#"{ "adminToken": "abc" }"#).unwrap();

    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            r#"
[session]
store = "{}"
token_key = "adminToken"
"#,
            store.display()
        ),
    )
    .unwrap();

    let config = load_configuration(&cli(Some(config_path))).unwrap();
    assert_eq!(config.session.store, Some(store));
    assert_eq!(config.session.token_key, "adminToken");
}

#[test]
fn invalid_values_are_rejected() {
    let mut config = AppConfig::default();
    assert!(validate_configuration(&config).is_ok());

    config.api.base_url = "https://api.example.id".to_string();
    assert!(validate_configuration(&config).is_err());

    let mut config = AppConfig::default();
    config.assets.upload_prefix = "uploads".to_string();
    assert!(validate_configuration(&config).is_err());

    let mut config = AppConfig::default();
    config.endpoints.document = "  ".to_string();
    assert!(validate_configuration(&config).is_err());
}

#[test]
fn malformed_config_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[api\nbase_url = ").unwrap();

    assert!(load_configuration(&cli(Some(config_path))).is_err());
}
