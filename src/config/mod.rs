//! Project configuration: discovery, defaults and parsing.

mod manager;
mod types;

pub use manager::{
    CONFIG_FILE_JSON, CONFIG_FILE_TOML, ConfigManager, ConfigSource, Project, look_for_file,
};
pub use types::{
    DEFAULT_KIWI_DIR, DEFAULT_TIMEOUT_MS, IgnoreDirs, ProjectConfig, RequestOptions,
    TranslateOptions,
};
