//! Configuration loading from disk

use anyhow::Result;
use promptcraft::category::Category;
use promptcraft::config::Config;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_has_defaults() -> Result<()> {
    let config = Config::default();

    assert_eq!(config.store.provider, "supabase");
    assert!(config.store.url.is_none());
    assert!(config.store.timeout_secs > 0);
    for category in Category::ALL {
        assert_eq!(
            config.limits.to_counts().get(category),
            category.daily_allotment()
        );
    }

    Ok(())
}

#[test]
fn test_load_from_explicit_path() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("promptcraft.toml");
    fs::write(
        &path,
        r#"
[store]
provider = "supabase"
url = "https://abc.supabase.co"
anon_key_env = "none"
timeout_secs = 10

[limits]
image = 2
"#,
    )?;

    let config = Config::load_with_path(Some(path.to_string_lossy().to_string()))?;
    assert_eq!(config.store.url.as_deref(), Some("https://abc.supabase.co"));
    assert_eq!(config.store.timeout_secs, 10);
    assert_eq!(config.get_anon_key()?, "");
    assert_eq!(config.limits.image, 2);
    assert_eq!(config.limits.video, 4);
    assert_eq!(config.store.user_id_env, "PROMPTCRAFT_USER_ID");

    Ok(())
}

#[test]
fn test_empty_file_uses_defaults() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("empty.toml");
    fs::write(&path, "")?;

    let config = Config::load_with_path(Some(path.to_string_lossy().to_string()))?;
    assert_eq!(config.store.provider, "supabase");
    assert_eq!(config.limits.app, 3);

    Ok(())
}

#[test]
fn test_missing_explicit_path_is_error() {
    let result = Config::load_with_path(Some("/nonexistent/promptcraft.toml".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_invalid_toml_is_error() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[store\nprovider = ")?;

    assert!(Config::load_with_path(Some(path.to_string_lossy().to_string())).is_err());

    Ok(())
}
