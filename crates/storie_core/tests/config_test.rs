use std::io::Write;
use storie_core::StorieConfig;

#[test]
fn defaults_match_bundled_file() {
    let config = StorieConfig::default();
    assert_eq!(config.backend.bucket, "story-images");
    assert_eq!(config.text.model, "gpt-4o-mini");
    assert_eq!(config.text.temperature, 0.7);
    assert_eq!(config.image.max_attempts, 3);
    assert_eq!(config.image.backoff_step_ms, 2000);
    assert_eq!(config.storybook.poll_interval_ms, 3000);
    assert_eq!(config.storybook.title_max_chars, 50);
}

#[test]
fn partial_toml_keeps_defaults() {
    let config = StorieConfig::from_toml_str(
        r#"
        [text]
        api_key = "sk-test"

        [image]
        max_attempts = 5
        "#,
    )
    .unwrap();

    assert_eq!(config.text.require_api_key().unwrap(), "sk-test");
    assert_eq!(config.text.model, "gpt-4o-mini");
    assert_eq!(config.image.max_attempts, 5);
    assert_eq!(config.image.backoff_step_ms, 2000);
    assert_eq!(config.backend.bucket, "story-images");
}

#[test]
fn missing_secrets_are_reported_by_key() {
    let config = StorieConfig::default();

    let err = config.text.require_api_key().unwrap_err();
    assert!(err.message.contains("text.api_key"));

    let err = config.image.require_api_key().unwrap_err();
    assert!(err.message.contains("image.api_key"));

    assert!(config.backend.require_base_url().is_err());
    assert!(config.backend.require_anon_key().is_err());
}

#[test]
fn blank_secret_counts_as_missing() {
    let config = StorieConfig::from_toml_str("[image]\napi_key = \"  \"\n").unwrap();
    assert!(config.image.require_api_key().is_err());
}

#[test]
fn from_file_reads_backend_section() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(
        file,
        "[backend]\nbase_url = \"https://books.example.app\"\nanon_key = \"anon\"\nbucket = \"pages\""
    )?;

    let config = StorieConfig::from_file(file.path())?;
    assert_eq!(config.backend.require_base_url()?, "https://books.example.app");
    assert_eq!(config.backend.require_anon_key()?, "anon");
    assert_eq!(config.backend.bucket, "pages");
    Ok(())
}

#[test]
fn malformed_toml_is_a_config_error() {
    let err = StorieConfig::from_toml_str("[text\nmodel = ").unwrap_err();
    assert!(err.to_string().contains("Configuration Error"));
}
