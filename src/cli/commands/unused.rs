use anyhow::{Context, Result};
use std::path::Path;

use super::load_project;
use crate::ui::Style;
use crate::unused::find_unused_keys;

/// Prints every source message key not referenced under `dir`, one per line.
pub fn run_unused(dir: &Path) -> Result<()> {
    let project = load_project()?;
    let dir = project.root.join(dir);

    let unused = find_unused_keys(&project, &dir)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;

    if unused.is_empty() {
        crate::status!("{}", Style::success("No unused messages found"));
        return Ok(());
    }

    crate::status!(
        "{}",
        Style::header(format!("{} unused messages:", unused.len()))
    );
    for key in &unused {
        println!("{key}");
    }
    Ok(())
}
