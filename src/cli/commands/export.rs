use anyhow::{Context, Result};
use std::path::PathBuf;

use super::{load_project, target_langs};
use crate::exporter::export_messages;
use crate::ui::Style;

pub struct ExportOptions {
    pub lang: Option<String>,
    pub output: Option<PathBuf>,
}

/// Default output file for a locale.
fn default_output(lang: &str) -> PathBuf {
    PathBuf::from(format!("export-{lang}.tsv"))
}

pub fn run_export(options: &ExportOptions) -> Result<()> {
    let project = load_project()?;

    for lang in target_langs(&project, options.lang.as_deref()) {
        let output = options
            .output
            .clone()
            .unwrap_or_else(|| default_output(&lang));

        let count = export_messages(&project, &lang, &output)
            .with_context(|| format!("Failed to export messages for {lang}"))?;

        println!(
            "Exported {count} untranslated messages for {} to {}",
            Style::code(&lang),
            Style::path(output.display())
        );
    }
    Ok(())
}
