use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use promptcraft::cli;

#[derive(Parser)]
#[command(name = "promptcraft", version)]
#[command(about = "Build prompts for AI image, video, music and app tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Spend one daily generation and print the assembled prompt
    Generate {
        /// Category: image, video, music, app
        category: String,

        /// TOML file with the builder fields
        #[arg(short = 'f', long = "fields")]
        fields: Option<String>,

        /// Core idea / scene / project goal (overrides the fields file)
        #[arg(long)]
        core: Option<String>,

        /// Structure tag appended to the lyrics, e.g. "[Chorus]" (music only, repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Path to config file (defaults to ./promptcraft.toml or ~/.config/promptcraft/config.toml)
        #[arg(long)]
        config: Option<String>,

        /// Use an in-memory store and a demo user
        #[arg(long)]
        dry_run: bool,
    },
    /// Show remaining generations for today
    Status {
        #[arg(long)]
        config: Option<String>,

        #[arg(long)]
        dry_run: bool,
    },
    /// List target platforms and preset options for a category
    Options {
        category: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            category,
            fields,
            core,
            tags,
            config,
            dry_run,
        } => {
            cli::generate::run(category, fields, core, tags, config, dry_run).await?;
        }
        Commands::Status { config, dry_run } => {
            cli::status::run(config, dry_run).await?;
        }
        Commands::Options { category } => {
            cli::options::run(&category)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_generate_defaults() {
        let cli = Cli::try_parse_from(["promptcraft", "generate", "image"]).unwrap();
        match cli.command {
            Commands::Generate {
                category,
                fields,
                core,
                dry_run,
                ..
            } => {
                assert_eq!(category, "image");
                assert!(fields.is_none());
                assert!(core.is_none());
                assert!(!dry_run);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_parse_generate_with_all_args() {
        let cli = Cli::try_parse_from([
            "promptcraft",
            "generate",
            "music",
            "-f",
            "song.toml",
            "--core",
            "a song about rain",
            "--tag",
            "[Verse]",
            "--tag",
            "[Chorus]",
            "--config",
            "pc.toml",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                category,
                fields,
                core,
                tags,
                config,
                dry_run,
            } => {
                assert_eq!(category, "music");
                assert_eq!(tags, vec!["[Verse]", "[Chorus]"]);
                assert_eq!(fields.unwrap(), "song.toml");
                assert_eq!(core.unwrap(), "a song about rain");
                assert_eq!(config.unwrap(), "pc.toml");
                assert!(dry_run);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_parse_status() {
        let cli = Cli::try_parse_from(["promptcraft", "status", "--dry-run"]).unwrap();
        assert!(matches!(cli.command, Commands::Status { dry_run: true, .. }));
    }

    #[test]
    fn test_parse_generate_requires_category() {
        assert!(Cli::try_parse_from(["promptcraft", "generate"]).is_err());
    }

    #[test]
    fn test_parse_missing_subcommand() {
        assert!(Cli::try_parse_from(["promptcraft"]).is_err());
    }
}
