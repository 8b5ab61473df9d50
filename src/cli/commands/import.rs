use anyhow::{Context, Result};
use std::path::PathBuf;

use super::load_project;
use crate::format::formatter_for;
use crate::importer::import_messages;
use crate::ui::Style;

pub struct ImportOptions {
    pub file: PathBuf,
    pub lang: String,
}

pub fn run_import(options: &ImportOptions) -> Result<()> {
    let project = load_project()?;
    let formatter = formatter_for(&project.config);

    let summary = import_messages(&project, &options.file, &options.lang, formatter.as_ref())
        .with_context(|| format!("Failed to import {}", options.file.display()))?;

    for key in &summary.dropped {
        crate::status!(
            "{} {}",
            Style::warning("Skipped key not found in source messages:"),
            Style::key(key)
        );
    }
    for path in &summary.written {
        crate::status!("{} {}", Style::success("Wrote"), Style::path(path.display()));
    }

    println!(
        "Imported {} messages into {}",
        summary.imported,
        Style::code(&options.lang)
    );
    Ok(())
}
