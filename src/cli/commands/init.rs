//! Project scaffolding.

use anyhow::{Context, Result, bail};
use serde_json::json;
use std::path::{Path, PathBuf};

use crate::config::{CONFIG_FILE_JSON, Project, ProjectConfig};
use crate::format::JsonFormatter;
use crate::fs::atomic_write;
use crate::messages::MessageStore;
use crate::ui::Style;

/// Sample source-locale file created next to the configuration.
const SAMPLE_FILE: &str = "common";

/// Writes the default configuration and a sample message file under `root`.
///
/// Returns the configuration path. An existing configuration is only
/// replaced when `force` is set; existing message files are never touched.
pub fn init_project(root: &Path, force: bool) -> Result<PathBuf> {
    let project = Project::new(root, ProjectConfig::default());
    let config_path = project.kiwi_dir().join(CONFIG_FILE_JSON);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}\n\n\
             Use 'kiwi init --force' to overwrite it.",
            config_path.display()
        );
    }

    let mut contents = serde_json::to_string_pretty(&project.config)
        .context("Failed to serialize default config")?;
    contents.push('\n');
    atomic_write(&config_path, &contents)?;

    let store = MessageStore::for_project(&project);
    let src_lang = &project.config.src_lang;
    if !store.file_path(src_lang, SAMPLE_FILE).exists() {
        let sample = json!({ "test": "测试" });
        if let Some(tree) = sample.as_object() {
            store.write_file(src_lang, SAMPLE_FILE, tree, &JsonFormatter::default())?;
        }
    }

    Ok(config_path)
}

pub fn run_init(force: bool) -> Result<()> {
    let root = std::env::current_dir().context("Failed to determine current directory")?;
    let config_path = init_project(&root, force)?;

    println!(
        "{} {}",
        Style::success("Created"),
        Style::path(config_path.display())
    );
    crate::info!(
        "{}",
        Style::hint("Edit it to set srcLang, distLangs and googleApiKey.")
    );
    Ok(())
}
