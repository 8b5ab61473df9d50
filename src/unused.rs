//! Finding source-locale keys that no project file references.

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::config::Project;
use crate::error::{Error, Result};
use crate::messages::{FlatMessages, MessageStore};
use crate::scanner::{IgnoreFile, scan_files};

/// Binding used when the import template names none.
pub const DEFAULT_IDENTIFIER: &str = "I18N";

#[allow(clippy::expect_used)]
static IMPORT_BINDING: LazyLock<Regex> = LazyLock::new(|| {
    // expect is safe: the pattern is a compile-time constant
    Regex::new(r"import\s+(?:\*\s+as\s+)?([A-Za-z_$][\w$]*)").expect("valid import pattern")
});

/// The name source files use for the messages object, taken from the
/// configured import statement (`import I18N from '...'` gives `I18N`).
pub fn i18n_identifier(import_statement: &str) -> String {
    IMPORT_BINDING
        .captures(import_statement)
        .and_then(|captures| captures.get(1))
        .map_or_else(|| DEFAULT_IDENTIFIER.to_string(), |m| m.as_str().to_string())
}

/// Keys of `messages` that appear as `<identifier>.<key>` in none of `sources`.
pub fn unused_keys(messages: &FlatMessages, sources: &[String], identifier: &str) -> Vec<String> {
    messages
        .keys()
        .filter(|key| {
            let reference = format!("{identifier}.{key}");
            !sources
                .iter()
                .any(|source| references(source, &reference))
        })
        .cloned()
        .collect()
}

/// Whether `source` contains `reference` as a whole member path, so that
/// `I18N.common.okay` does not count as a use of `I18N.common.ok`.
fn references(source: &str, reference: &str) -> bool {
    source.match_indices(reference).any(|(start, matched)| {
        let before = source[..start].chars().next_back();
        let after = source[start + matched.len()..].chars().next();
        !before.is_some_and(is_identifier_char)
            && !after.is_some_and(|c| c == '.' || is_identifier_char(c))
    })
}

const fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$')
}

/// Scans `dir` with the project's ignore rules and lists unused source keys.
pub fn find_unused_keys(project: &Project, dir: &Path) -> Result<Vec<String>> {
    let config = &project.config;
    let ignore_file = IgnoreFile::parse(&config.ignore_file)?;
    let files = scan_files(dir, &config.ignore_dir, ignore_file.as_ref())?;

    let mut sources = Vec::with_capacity(files.len());
    for file in &files {
        let bytes = fs::read(file).map_err(|e| Error::io(file, e))?;
        sources.push(String::from_utf8_lossy(&bytes).into_owned());
    }

    let messages = MessageStore::for_project(project).get_all_messages(&config.src_lang)?;
    Ok(unused_keys(
        &messages,
        &sources,
        &i18n_identifier(&config.import_i18n),
    ))
}
