use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::tree::{FlatMessages, MessageTree, traverse};
use crate::config::Project;
use crate::error::{Error, Result};
use crate::format::{Formatter, format_or_original};
use crate::fs::atomic_write;

/// Extension of message files.
pub const MESSAGE_EXTENSION: &str = "json";

/// Per-locale file that is never read as a message file.
pub const INDEX_FILE: &str = "index.json";

/// Decides which messages `get_all_messages_filtered` keeps.
pub trait MessageFilter {
    fn keep(&self, message: &str, key: &str) -> bool;
}

impl<F> MessageFilter for F
where
    F: Fn(&str, &str) -> bool,
{
    fn keep(&self, message: &str, key: &str) -> bool {
        self(message, key)
    }
}

/// Keeps every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepAll;

impl MessageFilter for KeepAll {
    fn keep(&self, _message: &str, _key: &str) -> bool {
        true
    }
}

/// Reads and writes the message files under a resource directory.
///
/// Layout: `<kiwi_dir>/<locale>/<name>.json`, one tree per file.
#[derive(Debug, Clone)]
pub struct MessageStore {
    kiwi_dir: PathBuf,
}

impl MessageStore {
    pub fn new(kiwi_dir: impl Into<PathBuf>) -> Self {
        Self {
            kiwi_dir: kiwi_dir.into(),
        }
    }

    pub fn for_project(project: &Project) -> Self {
        Self::new(project.kiwi_dir())
    }

    pub fn lang_dir(&self, lang: &str) -> PathBuf {
        self.kiwi_dir.join(lang)
    }

    pub fn file_path(&self, lang: &str, name: &str) -> PathBuf {
        self.lang_dir(lang)
            .join(format!("{name}.{MESSAGE_EXTENSION}"))
    }

    /// Message files of `lang`, sorted, excluding the index file.
    pub fn message_files(&self, lang: &str) -> Result<Vec<PathBuf>> {
        let dir = self.lang_dir(lang);
        let entries = fs::read_dir(&dir).map_err(|e| Error::io(&dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| Error::io(&dir, e))?.path();
            let is_message_file = path.is_file()
                && path.extension().is_some_and(|ext| ext == MESSAGE_EXTENSION)
                && path.file_name().is_some_and(|name| name != INDEX_FILE);
            if is_message_file {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Loads one message file.
    pub fn read_file(&self, lang: &str, name: &str) -> Result<MessageTree> {
        read_tree(&self.file_path(lang, name))
    }

    /// Like [`Self::read_file`], but a missing file is an empty tree.
    pub fn read_file_or_empty(&self, lang: &str, name: &str) -> Result<MessageTree> {
        match self.read_file(lang, name) {
            Err(Error::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                Ok(MessageTree::new())
            }
            other => other,
        }
    }

    /// All messages of `lang`, keyed `<file>.<path>`.
    pub fn get_all_messages(&self, lang: &str) -> Result<FlatMessages> {
        self.get_all_messages_filtered(lang, &KeepAll)
    }

    /// All messages of `lang` accepted by `filter`, keyed `<file>.<path>`.
    ///
    /// Two files sharing a prefix (`a.json`, `a.extra.json`) are an error.
    pub fn get_all_messages_filtered<F>(&self, lang: &str, filter: &F) -> Result<FlatMessages>
    where
        F: MessageFilter + ?Sized,
    {
        let mut all = FlatMessages::new();
        let mut owners: BTreeMap<String, PathBuf> = BTreeMap::new();
        for path in self.message_files(lang)? {
            let prefix = file_base_name(&path);
            if let Some(owner) = owners.get(&prefix) {
                return Err(Error::MessageFile {
                    path,
                    message: format!(
                        "key prefix '{prefix}' is already used by {}",
                        owner.display()
                    ),
                });
            }
            owners.insert(prefix.clone(), path.clone());

            let tree = read_tree(&path)?;
            traverse(&tree, |message, key| {
                let key = format!("{prefix}.{key}");
                if filter.keep(message, &key) {
                    all.insert(key, message.to_string());
                }
            });
        }
        Ok(all)
    }

    /// Serializes, formats and atomically writes a tree to `<lang>/<name>.json`.
    pub fn write_file(
        &self,
        lang: &str,
        name: &str,
        tree: &MessageTree,
        formatter: &dyn Formatter,
    ) -> Result<PathBuf> {
        let path = self.file_path(lang, name);
        let content = serde_json::to_string(tree).map_err(|e| Error::MessageFile {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let content = format_or_original(formatter, &content);
        atomic_write(&path, &content)?;
        Ok(path)
    }
}

/// Text before the first `.` of the file name.
fn file_base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .unwrap_or_default()
}

fn read_tree(path: &Path) -> Result<MessageTree> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| Error::MessageFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
