//! Exporting untranslated messages to a TSV file the importer accepts.

use std::io::Write;
use std::path::Path;

use crate::config::Project;
use crate::error::{Error, Result};
use crate::messages::{FlatMessages, MessageStore};

/// Escapes a value with JSON string rules, without the surrounding quotes.
pub fn escape_value(value: &str) -> String {
    let quoted = serde_json::Value::String(value.to_string()).to_string();
    quoted
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(quoted.as_str())
        .to_string()
}

/// Source messages that still need a translation in the destination:
/// missing there, or identical to the source text.
pub fn untranslated(source: &FlatMessages, destination: &FlatMessages) -> FlatMessages {
    source
        .iter()
        .filter(|(key, message)| destination.get(*key).is_none_or(|dst| dst == *message))
        .map(|(key, message)| (key.clone(), message.clone()))
        .collect()
}

/// Writes `key<TAB>escaped value` rows, in key order.
pub fn write_tsv<W: Write>(writer: W, messages: &FlatMessages) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);
    for (key, message) in messages {
        wtr.write_record([key.as_str(), escape_value(message).as_str()])?;
    }
    wtr.flush().map_err(|e| Error::io("<tsv output>", e))?;
    Ok(())
}

/// Exports the messages `lang` is missing to `path`. Returns how many were written.
pub fn export_messages(project: &Project, lang: &str, path: &Path) -> Result<usize> {
    let store = MessageStore::for_project(project);
    let source = store.get_all_messages(&project.config.src_lang)?;
    let destination = if store.lang_dir(lang).is_dir() {
        store.get_all_messages(lang)?
    } else {
        FlatMessages::new()
    };

    let pending = untranslated(&source, &destination);
    let file = std::fs::File::create(path).map_err(|e| Error::io(path, e))?;
    write_tsv(file, &pending)?;
    Ok(pending.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ProjectConfig;
    use crate::format::JsonFormatter;
    use crate::importer::{import_messages, parse_import_rows};
    use crate::messages::get_path;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn flat(pairs: &[(&str, &str)]) -> FlatMessages {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_escape_value() {
        assert_eq!(escape_value("plain"), "plain");
        assert_eq!(escape_value("a\nb\t\"c\""), r#"a\nb\t\"c\""#);
        assert_eq!(escape_value("中文"), "中文");
    }

    #[test]
    fn test_untranslated() {
        let source = flat(&[("a.x", "甲"), ("a.y", "乙"), ("a.z", "丙")]);
        let destination = flat(&[("a.x", "A"), ("a.y", "乙")]);

        let pending = untranslated(&source, &destination);

        assert_eq!(pending, flat(&[("a.y", "乙"), ("a.z", "丙")]));
    }

    #[test]
    fn test_write_tsv_parses_back() {
        let messages = flat(&[("a.quote", "say \"hi\""), ("a.lines", "one\ntwo")]);
        let mut buffer = Vec::new();

        write_tsv(&mut buffer, &messages).unwrap();
        let rows = parse_import_rows(&String::from_utf8(buffer).unwrap()).unwrap();

        assert_eq!(
            rows,
            vec![
                ("a.lines".to_string(), "one\ntwo".to_string()),
                ("a.quote".to_string(), "say \"hi\"".to_string()),
            ]
        );
    }

    #[test]
    fn test_export_then_import() {
        let temp_dir = TempDir::new().unwrap();
        let project = Project::new(temp_dir.path(), ProjectConfig::default());
        let src_dir = project.lang_dir("zh-CN");
        fs::create_dir_all(&src_dir).unwrap();
        fs::write(
            src_dir.join("common.json"),
            json!({ "ok": "确定", "tip": "第一行\n第二行" }).to_string(),
        )
        .unwrap();

        let tsv = temp_dir.path().join("export.tsv");
        let count = export_messages(&project, "en-US", &tsv).unwrap();
        assert_eq!(count, 2);

        import_messages(&project, &tsv, "en-US", &JsonFormatter::default()).unwrap();

        let store = MessageStore::for_project(&project);
        let written = store.read_file("en-US", "common").unwrap();
        assert_eq!(get_path(&written, "tip"), Some("第一行\n第二行"));
        assert_eq!(get_path(&written, "ok"), Some("确定"));
    }
}
