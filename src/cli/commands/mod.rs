//! Subcommand implementations.

use anyhow::{Context, Result};

use crate::config::{ConfigManager, ConfigSource, Project};

/// Export command handler.
pub mod export;

/// Import command handler.
pub mod import;

/// Init command handler.
pub mod init;

/// Sync command handler.
pub mod sync;

/// Unused-key command handler.
pub mod unused;

/// Loads the project rooted at the current directory.
pub(crate) fn load_project() -> Result<Project> {
    let project = ConfigManager::from_current_dir()?
        .load()
        .context("Failed to load project configuration")?;

    if let ConfigSource::File(path) = &project.source {
        crate::info!("Using config {}", crate::ui::Style::path(path.display()));
    }
    Ok(project)
}

/// Destination locales to act on: the requested one, or all configured.
pub(crate) fn target_langs(project: &Project, lang: Option<&str>) -> Vec<String> {
    lang.map_or_else(
        || project.config.dist_langs.clone(),
        |lang| vec![lang.to_string()],
    )
}
