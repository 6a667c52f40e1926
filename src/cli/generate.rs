use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::assembler::{AppFields, ImageFields, MusicFields, PromptFields, VideoFields};
use crate::category::Category;
use crate::config::Config;
use crate::gate::QuotaGate;
use crate::store::factory;
use crate::workflow::Builder;

pub async fn run(
    category: String,
    fields_path: Option<String>,
    core_override: Option<String>,
    tags: Vec<String>,
    config_path: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let category = Category::from_str(&category)?;
    info!("Category: {}", category);
    info!("Dry run: {}", dry_run);

    let config = Config::load_with_path(config_path)?;
    let gate = connect(&config, dry_run).await?;

    let prompt = match category {
        Category::Image => build::<ImageFields>(fields_path, core_override, &tags, &gate).await?,
        Category::Video => build::<VideoFields>(fields_path, core_override, &tags, &gate).await?,
        Category::Music => build::<MusicFields>(fields_path, core_override, &tags, &gate).await?,
        Category::App => build::<AppFields>(fields_path, core_override, &tags, &gate).await?,
    };

    println!("{}", prompt);
    info!(
        "Daily limit: {} {} prompts remaining today",
        gate.remaining_count(category),
        category
    );
    Ok(())
}

/// Build a gate for the configured store and load the signed-in user's profile.
pub(crate) async fn connect(config: &Config, dry_run: bool) -> Result<QuotaGate> {
    let store = factory::create_store(config, dry_run)?;
    let session = Arc::new(factory::create_session(config, dry_run));
    let gate = QuotaGate::new(session, store);
    if let Err(err) = gate.sync_session().await {
        bail!("{}", err);
    }
    Ok(gate)
}

async fn build<F>(
    fields_path: Option<String>,
    core_override: Option<String>,
    tags: &[String],
    gate: &QuotaGate,
) -> Result<String>
where
    F: PromptFields + DeserializeOwned + Default,
{
    let mut fields: F = match fields_path {
        Some(path) => load_fields(&path)?,
        None => F::default(),
    };
    if let Some(core) = core_override {
        *fields.core_mut() = core;
    }
    for tag in tags {
        fields.insert_structure_tag(tag)?;
    }

    let mut builder = Builder::new(fields);
    match builder.generate(gate).await {
        Ok(prompt) => Ok(prompt.to_string()),
        Err(err) => bail!("{}", err),
    }
}

fn load_fields<F: DeserializeOwned>(path: &str) -> Result<F> {
    let file = Path::new(path);
    if !file.is_file() {
        bail!("Fields file not found: {}", path);
    }
    let content = fs::read_to_string(file)?;
    toml::from_str(&content).with_context(|| format!("Invalid fields file: {}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_fields_missing_file() {
        let err = load_fields::<ImageFields>("/tmp/nonexistent-promptcraft-fields.toml").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_music_fields() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("song.toml");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"core_idea = "a song about rain"
genres = ["Lo-fi Hip Hop"]
tempo = 90"#
        )
        .unwrap();

        let fields: MusicFields = load_fields(path.to_str().unwrap()).unwrap();
        assert_eq!(fields.core_idea, "a song about rain");
        assert_eq!(fields.genres, vec!["Lo-fi Hip Hop".to_string()]);
        assert_eq!(fields.tempo, 90);
    }

    #[test]
    fn test_load_fields_rejects_bad_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "tempo = \"fast\"").unwrap();
        let err = load_fields::<MusicFields>(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Invalid fields file"));
    }

    #[tokio::test]
    async fn test_dry_run_generates() {
        let config = Config::default();
        let gate = connect(&config, true).await.unwrap();
        let prompt = build::<ImageFields>(None, Some("a wizard".into()), &[], &gate)
            .await
            .unwrap();
        assert_eq!(prompt, "a wizard");
        assert_eq!(gate.remaining_count(Category::Image), 9);
    }

    #[tokio::test]
    async fn test_dry_run_requires_core() {
        let gate = connect(&Config::default(), true).await.unwrap();
        let err = build::<VideoFields>(None, None, &[], &gate).await.unwrap_err();
        assert!(err.to_string().contains("core_scene is required"));
    }

    #[tokio::test]
    async fn test_out_of_range_tempo_rejected_before_gate() {
        let gate = connect(&Config::default(), true).await.unwrap();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("song.toml");
        fs::write(&path, "core_idea = \"x\"\ntempo = 300").unwrap();
        let err = build::<MusicFields>(Some(path.to_str().unwrap().to_string()), None, &[], &gate)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("300 BPM"));
        assert_eq!(gate.remaining_count(Category::Music), 5);
    }

    #[tokio::test]
    async fn test_structure_tags_follow_core() {
        let gate = connect(&Config::default(), true).await.unwrap();
        let tags = vec!["[Verse]".to_string()];
        let prompt = build::<MusicFields>(None, Some("rain on the roof".into()), &tags, &gate)
            .await
            .unwrap();
        assert_eq!(prompt, "rain on the roof\n[Verse]\n, Tempo: 120 BPM");

        let err = build::<ImageFields>(None, Some("a wizard".into()), &tags, &gate)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("do not take structure tags"));
        assert_eq!(gate.remaining_count(Category::Image), 10);
    }
}
