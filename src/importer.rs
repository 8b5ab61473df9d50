//! Importing externally edited translations from a TSV file.
//!
//! An import runs in three stages and stops at the first failure:
//!
//! 1. parse the TSV into a key/value map, rejecting bad escapes and repeated keys
//! 2. keep only keys known to the source locale and group them by file
//! 3. rebuild each affected destination file in the source file's shape and write it

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Project;
use crate::error::{Error, Result};
use crate::format::Formatter;
use crate::messages::{FlatMessages, MessageStore, MessageTree, get_path, set_path, traverse};

/// Outcome of a successful import.
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    /// Number of imported messages that matched a source key.
    pub imported: usize,
    /// Imported keys with no counterpart in the source locale.
    pub dropped: Vec<String>,
    /// Destination files that were rewritten.
    pub written: Vec<PathBuf>,
}

/// Imported messages grouped by the file they belong to.
#[derive(Debug, Clone, Default)]
pub struct Reconciled {
    /// File name to the imported subtree for that file.
    pub by_file: BTreeMap<String, MessageTree>,
    pub dropped: Vec<String>,
}

impl Reconciled {
    pub fn message_count(&self) -> usize {
        self.by_file
            .values()
            .map(|tree| {
                let mut count = 0;
                traverse(tree, |_, _| count += 1);
                count
            })
            .sum()
    }
}

/// Decodes a value written with JSON string escapes (`\n`, `\"`, `\u4e2d`, ...).
pub fn unescape_value(value: &str) -> Option<String> {
    serde_json::from_str(&format!("\"{value}\"")).ok()
}

/// Parses TSV rows of `key<TAB>escaped value`, in file order.
pub fn parse_import_rows(content: &str) -> Result<Vec<(String, String)>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);
        let key = record.get(0).unwrap_or_default();
        let raw = record.get(1).ok_or_else(|| Error::IllegalMessage {
            line,
            value: String::new(),
        })?;
        let value = unescape_value(raw).ok_or_else(|| Error::IllegalMessage {
            line,
            value: raw.to_string(),
        })?;
        rows.push((key.to_string(), value));
    }
    Ok(rows)
}

/// Builds the import map. Every repeated key is reported at once.
pub fn build_import_map(rows: Vec<(String, String)>) -> Result<FlatMessages> {
    let mut messages = FlatMessages::new();
    let mut duplicates: Vec<String> = Vec::new();

    for (key, value) in rows {
        if messages.contains_key(&key) && !duplicates.contains(&key) {
            duplicates.push(key.clone());
        }
        messages.insert(key, value);
    }

    if duplicates.is_empty() {
        Ok(messages)
    } else {
        Err(Error::DuplicateKeys(duplicates))
    }
}

/// Reads an import file into a key/value map.
pub fn read_messages_to_import(path: &Path) -> Result<FlatMessages> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    build_import_map(parse_import_rows(&content)?)
}

/// Keeps imported keys present in `canonical` and groups them by file name
/// (the first dotted component).
pub fn reconcile(imported: FlatMessages, canonical: &FlatMessages) -> Reconciled {
    let mut reconciled = Reconciled::default();

    for (key, value) in imported {
        let known = canonical.contains_key(&key);
        match key.split_once('.') {
            Some((file, path)) if known => {
                let tree = reconciled.by_file.entry(file.to_string()).or_default();
                set_path(tree, path, value);
            }
            _ => reconciled.dropped.push(key),
        }
    }

    reconciled
}

/// Rebuilds a destination file in the shape of `source`.
///
/// For each source message the imported value wins when non-empty, then the
/// previous destination value; keys with neither are left out.
pub fn rebuild_file(
    source: &MessageTree,
    imported: &MessageTree,
    previous: &MessageTree,
) -> MessageTree {
    let mut rebuilt = MessageTree::new();
    traverse(source, |_, path| {
        let value = get_path(imported, path)
            .filter(|value| !value.is_empty())
            .or_else(|| get_path(previous, path));
        if let Some(value) = value {
            set_path(&mut rebuilt, path, value.to_string());
        }
    });
    rebuilt
}

/// Rebuilds and writes every destination file that received messages.
pub fn write_reconciled(
    store: &MessageStore,
    src_lang: &str,
    lang: &str,
    reconciled: &Reconciled,
    formatter: &dyn Formatter,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(reconciled.by_file.len());
    for (file, imported) in &reconciled.by_file {
        let source = store.read_file(src_lang, file)?;
        let previous = store.read_file_or_empty(lang, file)?;
        let rebuilt = rebuild_file(&source, imported, &previous);
        written.push(store.write_file(lang, file, &rebuilt, formatter)?);
    }
    Ok(written)
}

/// Imports the TSV at `file` into `lang`.
pub fn import_messages(
    project: &Project,
    file: &Path,
    lang: &str,
    formatter: &dyn Formatter,
) -> Result<ImportSummary> {
    let to_import = read_messages_to_import(file)?;

    let store = MessageStore::for_project(project);
    let src_lang = &project.config.src_lang;
    let canonical = store.get_all_messages(src_lang)?;
    let reconciled = reconcile(to_import, &canonical);

    let written = write_reconciled(&store, src_lang, lang, &reconciled, formatter)?;

    Ok(ImportSummary {
        imported: reconciled.message_count(),
        dropped: reconciled.dropped,
        written,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ProjectConfig;
    use crate::format::JsonFormatter;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn tree(value: Value) -> MessageTree {
        value.as_object().unwrap().clone()
    }

    fn flat(pairs: &[(&str, &str)]) -> FlatMessages {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    /// A project with `zh-CN` as source and the given files.
    fn project_with(files: &[(&str, Value)]) -> (TempDir, Project) {
        let temp_dir = TempDir::new().unwrap();
        let config = ProjectConfig {
            kiwi_dir: PathBuf::from("locales"),
            ..ProjectConfig::default()
        };
        let project = Project::new(temp_dir.path(), config);
        for (relative, content) in files {
            let path = project.kiwi_dir().join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content.to_string()).unwrap();
        }
        (temp_dir, project)
    }

    #[test]
    fn test_unescape_value() {
        assert_eq!(unescape_value(r"line\nbreak"), Some("line\nbreak".to_string()));
        assert_eq!(unescape_value(r#"say \"hi\""#), Some("say \"hi\"".to_string()));
        assert_eq!(unescape_value(r"\u4e2d"), Some("中".to_string()));
        assert_eq!(unescape_value(r"bad \x escape"), None);
        assert_eq!(unescape_value(r#"raw " quote"#), None);
    }

    #[test]
    fn test_parse_import_rows() {
        let rows = parse_import_rows("common.ok\tOK\ncommon.multi\tline one\\nline two\n").unwrap();

        assert_eq!(
            rows,
            vec![
                ("common.ok".to_string(), "OK".to_string()),
                ("common.multi".to_string(), "line one\nline two".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_import_rows_illegal_value() {
        let result = parse_import_rows("common.ok\tOK\ncommon.bad\tbroken \\q\n");

        match result {
            Err(Error::IllegalMessage { line, value }) => {
                assert_eq!(line, 2);
                assert_eq!(value, "broken \\q");
            }
            other => panic!("expected illegal message, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_import_rows_missing_value() {
        let result = parse_import_rows("common.ok\n");
        assert!(matches!(result, Err(Error::IllegalMessage { line: 1, .. })));
    }

    #[test]
    fn test_duplicate_keys_are_reported_together() {
        let rows = vec![
            ("k".to_string(), "1".to_string()),
            ("other".to_string(), "x".to_string()),
            ("k".to_string(), "2".to_string()),
            ("k".to_string(), "3".to_string()),
        ];

        match build_import_map(rows) {
            Err(Error::DuplicateKeys(keys)) => assert_eq!(keys, vec!["k".to_string()]),
            other => panic!("expected duplicate keys, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_error_message_lists_keys() {
        let err = Error::DuplicateKeys(vec!["a.x".to_string(), "b.y".to_string()]);
        assert_eq!(err.to_string(), "Duplicate messages detected: \na.x\nb.y");
    }

    #[test]
    fn test_reconcile_drops_unknown_keys_and_groups_by_file() {
        let canonical = flat(&[("a.x", "甲"), ("a.nested.y", "乙"), ("b.z", "丙")]);
        let imported = flat(&[("a.x", "X"), ("a.nested.y", "Y"), ("b.z", "Z"), ("c.q", "?")]);

        let reconciled = reconcile(imported, &canonical);

        assert_eq!(reconciled.dropped, vec!["c.q".to_string()]);
        assert_eq!(reconciled.message_count(), 3);
        assert_eq!(
            Value::Object(reconciled.by_file["a"].clone()),
            json!({ "nested": { "y": "Y" }, "x": "X" })
        );
        assert_eq!(
            Value::Object(reconciled.by_file["b"].clone()),
            json!({ "z": "Z" })
        );
    }

    #[test]
    fn test_rebuild_prefers_import_then_previous() {
        let source = tree(json!({ "x": "源x", "y": "源y" }));
        let imported = tree(json!({ "x": "new" }));
        let previous = tree(json!({ "x": "old" }));

        let rebuilt = rebuild_file(&source, &imported, &previous);

        assert_eq!(Value::Object(rebuilt), json!({ "x": "new" }));
    }

    #[test]
    fn test_rebuild_follows_source_shape() {
        let source = tree(json!({ "b": "源b", "group": { "a": "源a" }, "gone": "源" }));
        let imported = tree(json!({ "group": { "a": "A" }, "extra": "E" }));
        let previous = tree(json!({ "b": "old b", "stale": "S" }));

        let rebuilt = rebuild_file(&source, &imported, &previous);

        assert_eq!(
            Value::Object(rebuilt),
            json!({ "b": "old b", "group": { "a": "A" } })
        );
    }

    #[test]
    fn test_rebuild_empty_import_falls_back() {
        let source = tree(json!({ "x": "源" }));
        let imported = tree(json!({ "x": "" }));
        let previous = tree(json!({ "x": "kept" }));

        let rebuilt = rebuild_file(&source, &imported, &previous);

        assert_eq!(get_path(&rebuilt, "x"), Some("kept"));
    }

    #[test]
    fn test_import_messages_end_to_end() {
        let (temp_dir, project) = project_with(&[
            ("zh-CN/a.json", json!({ "x": "甲", "y": "乙" })),
            ("zh-CN/b.json", json!({ "z": "丙" })),
            ("en-US/a.json", json!({ "x": "old" })),
            ("en-US/b.json", json!({ "z": "untouched" })),
        ]);
        let tsv = temp_dir.path().join("import.tsv");
        fs::write(&tsv, "a.x\tnew\nunknown.key\tignored\n").unwrap();

        let summary =
            import_messages(&project, &tsv, "en-US", &JsonFormatter::default()).unwrap();

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.dropped, vec!["unknown.key".to_string()]);
        assert_eq!(summary.written.len(), 1);

        let store = MessageStore::for_project(&project);
        assert_eq!(
            Value::Object(store.read_file("en-US", "a").unwrap()),
            json!({ "x": "new" })
        );
        assert_eq!(
            Value::Object(store.read_file("en-US", "b").unwrap()),
            json!({ "z": "untouched" })
        );
    }

    #[test]
    fn test_import_with_duplicates_writes_nothing() {
        let (temp_dir, project) = project_with(&[
            ("zh-CN/a.json", json!({ "k": "甲" })),
            ("en-US/a.json", json!({ "k": "old" })),
        ]);
        let tsv = temp_dir.path().join("import.tsv");
        fs::write(&tsv, "a.k\t1\na.k\t2\n").unwrap();

        let result = import_messages(&project, &tsv, "en-US", &JsonFormatter::default());

        assert!(matches!(result, Err(Error::DuplicateKeys(ref keys)) if keys == &["a.k"]));
        let content = fs::read_to_string(project.lang_dir("en-US").join("a.json")).unwrap();
        assert_eq!(content, json!({ "k": "old" }).to_string());
    }

    #[test]
    fn test_import_creates_missing_destination_file() {
        let (temp_dir, project) = project_with(&[("zh-CN/a.json", json!({ "k": "甲" }))]);
        let tsv = temp_dir.path().join("import.tsv");
        fs::write(&tsv, "a.k\tfirst\n").unwrap();

        import_messages(&project, &tsv, "ja", &JsonFormatter::default()).unwrap();

        let store = MessageStore::for_project(&project);
        assert_eq!(get_path(&store.read_file("ja", "a").unwrap(), "k"), Some("first"));
    }
}
