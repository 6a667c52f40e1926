use anyhow::Result;

use super::generate::connect;
use crate::category::Category;
use crate::config::Config;
use crate::gate::QuotaGate;

pub async fn run(config_path: Option<String>, dry_run: bool) -> Result<()> {
    let config = Config::load_with_path(config_path)?;
    let gate = connect(&config, dry_run).await?;
    for line in status_lines(&gate, &config) {
        println!("{}", line);
    }
    Ok(())
}

fn status_lines(gate: &QuotaGate, config: &Config) -> Vec<String> {
    let limits = config.limits.to_counts();
    if !gate.is_authenticated() {
        let mut lines = vec!["Not signed in.".to_string()];
        for category in Category::ALL {
            lines.push(format!(
                "  {:<6} {} prompts per user per day",
                category,
                limits.get(category)
            ));
        }
        return lines;
    }

    let mut lines = Vec::new();
    if let Some(name) = gate.profile().and_then(|p| p.username) {
        lines.push(format!("Signed in as {}", name));
    }
    for category in Category::ALL {
        lines.push(format!(
            "  {:<6} {}/{} remaining today",
            category,
            gate.remaining_count(category),
            limits.get(category)
        ));
    }
    lines
}
