use anyhow::Result;
use std::str::FromStr;

use crate::assembler::catalog::catalog;
use crate::category::Category;

pub fn run(category: &str) -> Result<()> {
    let category = Category::from_str(category)?;
    for line in render(category) {
        println!("{}", line);
    }
    Ok(())
}

fn render(category: Category) -> Vec<String> {
    let catalog = catalog(category);
    let mut lines = vec![
        format!("{} prompt builder", category),
        format!("Platforms: {}", catalog.platforms.join(", ")),
    ];
    for group in catalog.groups {
        lines.push(format!("{} ({}):", group.label, group.field));
        lines.extend(group.choices.iter().map(|c| format!("  - {}", c)));
    }
    lines
}
