use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::types::ProjectConfig;
use crate::error::{Error, Result};

/// Preferred configuration file name.
pub const CONFIG_FILE_TOML: &str = "kiwi-config.toml";

/// Configuration file name written by `kiwi init`.
pub const CONFIG_FILE_JSON: &str = "kiwi-config.json";

/// Directories never searched for a configuration file.
const SKIPPED_DIRS: &[&str] = &[".git", "node_modules"];

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Default,
}

/// A project: its root directory plus the configuration that applies to it.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: ProjectConfig,
    pub source: ConfigSource,
}

impl Project {
    /// Builds a project from an explicit configuration.
    pub fn new(root: impl Into<PathBuf>, config: ProjectConfig) -> Self {
        Self {
            root: root.into(),
            config,
            source: ConfigSource::Default,
        }
    }

    /// Resource directory, resolved against the project root.
    pub fn kiwi_dir(&self) -> PathBuf {
        self.root.join(&self.config.kiwi_dir)
    }

    /// Directory holding the message files of `lang`.
    pub fn lang_dir(&self, lang: &str) -> PathBuf {
        self.kiwi_dir().join(lang)
    }
}

/// Finds and loads the project configuration.
pub struct ConfigManager {
    root: PathBuf,
}

impl ConfigManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Uses the current working directory as the project root.
    pub fn from_current_dir() -> Result<Self> {
        let root = std::env::current_dir().map_err(|e| Error::io(".", e))?;
        Ok(Self::new(root))
    }

    /// Locates the configuration file, preferring TOML over JSON.
    pub fn find(&self) -> Option<PathBuf> {
        look_for_file(&self.root, CONFIG_FILE_TOML)
            .or_else(|| look_for_file(&self.root, CONFIG_FILE_JSON))
    }

    /// Loads the project configuration.
    ///
    /// Falls back to the built-in defaults when no configuration file exists.
    /// A file that exists but cannot be parsed is an error.
    pub fn load(&self) -> Result<Project> {
        let Some(path) = self.find() else {
            return Ok(Project {
                root: self.root.clone(),
                config: ProjectConfig::default(),
                source: ConfigSource::Default,
            });
        };

        let config = parse_config_file(&path)?;
        Ok(Project {
            root: self.root.clone(),
            config,
            source: ConfigSource::File(path),
        })
    }
}

fn parse_config_file(path: &Path) -> Result<ProjectConfig> {
    let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    let parsed = if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str(&contents).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&contents).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| Error::Config {
        path: path.to_path_buf(),
        message,
    })
}

/// Depth-first search for a regular file called `file_name` under `dir`.
///
/// Entries are visited in file-name order; `.git` and `node_modules` are
/// never entered.
pub fn look_for_file(dir: &Path, file_name: &str) -> Option<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !SKIPPED_DIRS.iter().any(|skip| entry.file_name() == *skip)
        })
        .filter_map(std::result::Result::ok)
        .find(|entry| entry.file_type().is_file() && entry.file_name() == file_name)
        .map(walkdir::DirEntry::into_path)
}
