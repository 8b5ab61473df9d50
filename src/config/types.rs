use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default resource directory, relative to the project root.
pub const DEFAULT_KIWI_DIR: &str = "./.kiwi";

/// Default bound on a single translation call, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Directories to skip while scanning. Accepts a single string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IgnoreDirs {
    One(String),
    Many(Vec<String>),
}

impl IgnoreDirs {
    /// Returns the non-empty entries as a sequence.
    pub fn entries(&self) -> Vec<&str> {
        match self {
            Self::One(dir) => vec![dir.as_str()],
            Self::Many(dirs) => dirs.iter().map(String::as_str).collect(),
        }
        .into_iter()
        .filter(|dir| !dir.is_empty())
        .collect()
    }
}

impl Default for IgnoreDirs {
    fn default() -> Self {
        Self::One(String::new())
    }
}

/// Raw HTTP options for the translation client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    /// Override for the translation API endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Proxy URL applied to every request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    /// Per-call timeout in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

/// Options controlling translation requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslateOptions {
    /// Maximum number of translation calls in flight.
    pub concurrent_limit: usize,
    pub request_options: RequestOptions,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            concurrent_limit: 10,
            request_options: RequestOptions::default(),
        }
    }
}

/// The configuration file structure.
///
/// Corresponds to `kiwi-config.json` (or `kiwi-config.toml`). Every field is
/// optional in the file and falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectConfig {
    /// Resource directory holding one subdirectory per locale.
    pub kiwi_dir: PathBuf,
    /// Source locale code.
    pub src_lang: String,
    /// Destination locale codes.
    pub dist_langs: Vec<String>,
    pub google_api_key: String,
    pub translate_options: TranslateOptions,
    /// Import statement used by source files to reach the messages.
    #[serde(rename = "importI18N")]
    pub import_i18n: String,
    pub ignore_dir: IgnoreDirs,
    /// Literal path suffix, or a regular expression written as `/pattern/`.
    pub ignore_file: String,
    /// External formatter command line; the built-in JSON formatter is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_command: Option<Vec<String>>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            kiwi_dir: PathBuf::from(DEFAULT_KIWI_DIR),
            src_lang: "zh-CN".to_string(),
            dist_langs: vec!["en-US".to_string(), "zh-TW".to_string()],
            google_api_key: String::new(),
            translate_options: TranslateOptions::default(),
            import_i18n: "import I18N from 'src/utils/I18N';".to_string(),
            ignore_dir: IgnoreDirs::default(),
            ignore_file: String::new(),
            format_command: None,
        }
    }
}
