//! Recursive file listing with ignore rules.

use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::IgnoreDirs;
use crate::error::{Error, Result};

/// Rule excluding individual files from a scan.
#[derive(Debug, Clone)]
pub enum IgnoreFile {
    /// Excludes paths ending with this suffix (compared with a leading `/`).
    Suffix(String),
    /// Excludes paths matching the expression.
    Pattern(Regex),
}

impl IgnoreFile {
    /// Parses a configured rule. `/expr/` is a regular expression, anything
    /// else a literal suffix. An empty rule ignores nothing.
    pub fn parse(rule: &str) -> Result<Option<Self>> {
        if rule.is_empty() {
            return Ok(None);
        }
        if rule.len() > 2
            && let Some(pattern) = rule.strip_prefix('/').and_then(|r| r.strip_suffix('/'))
        {
            return Ok(Some(Self::Pattern(Regex::new(pattern)?)));
        }
        Ok(Some(Self::Suffix(rule.to_string())))
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            Self::Suffix(suffix) => with_leading_slash(path).ends_with(&with_leading_slash(suffix)),
            Self::Pattern(regex) => regex.is_match(path),
        }
    }
}

fn with_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

fn with_surrounding_slashes(dir: &str) -> String {
    let mut dir = with_leading_slash(dir);
    if !dir.ends_with('/') {
        dir.push('/');
    }
    dir
}

fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Lists every regular file under `dir`, depth-first in file-name order.
///
/// A file is skipped when its parent directory contains one of `ignore_dirs`
/// (both normalized to `/dir/`) or when its path matches `ignore_file`.
pub fn scan_files(
    dir: &Path,
    ignore_dirs: &IgnoreDirs,
    ignore_file: Option<&IgnoreFile>,
) -> Result<Vec<PathBuf>> {
    let ignored: Vec<String> = ignore_dirs
        .entries()
        .into_iter()
        .map(with_surrounding_slashes)
        .collect();

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            Error::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let parent = path.parent().map(slash_path).unwrap_or_default();
        let parent = with_surrounding_slashes(&parent);
        if ignored.iter().any(|d| parent.contains(d.as_str())) {
            continue;
        }
        if ignore_file.is_some_and(|rule| rule.matches(&slash_path(path))) {
            continue;
        }

        files.push(entry.into_path());
    }

    Ok(files)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| slash_path(f.strip_prefix(root).unwrap()))
            .collect()
    }

    fn fixture() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for file in [
            "src/app.ts",
            "src/components/button.tsx",
            "src/components/button.test.tsx",
            "src/mock/data.ts",
            "dist/bundle.js",
        ] {
            touch(temp_dir.path(), file);
        }
        temp_dir
    }

    #[test]
    fn test_scan_lists_all_files_in_order() {
        let temp_dir = fixture();

        let files = scan_files(temp_dir.path(), &IgnoreDirs::default(), None).unwrap();

        assert_eq!(
            relative(temp_dir.path(), &files),
            vec![
                "dist/bundle.js",
                "src/app.ts",
                "src/components/button.test.tsx",
                "src/components/button.tsx",
                "src/mock/data.ts",
            ]
        );
    }

    #[test]
    fn test_scan_ignores_single_directory() {
        let temp_dir = fixture();

        let files =
            scan_files(temp_dir.path(), &IgnoreDirs::One("mock".to_string()), None).unwrap();

        let files = relative(temp_dir.path(), &files);
        assert!(!files.contains(&"src/mock/data.ts".to_string()));
        assert_eq!(files.len(), 4);
    }

    #[test]
    fn test_scan_ignore_directory_matches_whole_segments() {
        let temp_dir = fixture();

        // "ock" is not a directory name, so nothing is skipped
        let files =
            scan_files(temp_dir.path(), &IgnoreDirs::One("ock".to_string()), None).unwrap();

        assert_eq!(files.len(), 5);
    }

    #[test]
    fn test_scan_ignores_directory_list() {
        let temp_dir = fixture();
        let dirs = IgnoreDirs::Many(vec!["/dist/".to_string(), "src/components".to_string()]);

        let files = scan_files(temp_dir.path(), &dirs, None).unwrap();

        assert_eq!(
            relative(temp_dir.path(), &files),
            vec!["src/app.ts", "src/mock/data.ts"]
        );
    }

    #[test]
    fn test_scan_ignores_file_suffix() {
        let temp_dir = fixture();
        let rule = IgnoreFile::parse("button.tsx").unwrap().unwrap();

        let files = scan_files(temp_dir.path(), &IgnoreDirs::default(), Some(&rule)).unwrap();

        let files = relative(temp_dir.path(), &files);
        assert!(!files.contains(&"src/components/button.tsx".to_string()));
        assert!(files.contains(&"src/components/button.test.tsx".to_string()));
    }

    #[test]
    fn test_scan_ignores_file_pattern() {
        let temp_dir = fixture();
        let rule = IgnoreFile::parse(r"/\.test\.tsx?$/").unwrap().unwrap();
        assert!(matches!(rule, IgnoreFile::Pattern(_)));

        let files = scan_files(temp_dir.path(), &IgnoreDirs::default(), Some(&rule)).unwrap();

        let files = relative(temp_dir.path(), &files);
        assert_eq!(files.len(), 4);
        assert!(!files.contains(&"src/components/button.test.tsx".to_string()));
    }

    #[test]
    fn test_ignore_file_parse() {
        assert!(IgnoreFile::parse("").unwrap().is_none());
        assert!(matches!(
            IgnoreFile::parse("/").unwrap(),
            Some(IgnoreFile::Suffix(_))
        ));
        assert!(matches!(IgnoreFile::parse("/[/"), Err(Error::Pattern(_))));
    }

    #[test]
    fn test_scan_missing_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();

        let result = scan_files(
            &temp_dir.path().join("missing"),
            &IgnoreDirs::default(),
            None,
        );

        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
