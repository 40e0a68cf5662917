//! Filesystem full-text search provider
//!
//! Walks the configured note directories and matches a pattern line by line,
//! reporting file, line, column, and the match with its trailing context.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;
use walkdir::WalkDir;

use margin_core::providers::{ProviderError, ProviderResult};
use margin_core::{RawMatch, SearchProvider};

/// Line-oriented search over note files
pub struct GrepSearch {
    extensions: Vec<String>,
}

impl GrepSearch {
    /// Search files carrying one of the given extensions; an empty list
    /// means every file
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    fn is_note_file(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.extensions
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    fn collect_matches(&self, regex: &Regex, file: &Path, matches: &mut Vec<RawMatch>) {
        let content = match fs::read_to_string(file) {
            Ok(content) => content,
            Err(err) => {
                // unreadable or non-UTF-8 files are skipped, not fatal
                debug!("Skipping {}: {}", file.display(), err);
                return;
            }
        };
        for (i, line) in content.lines().enumerate() {
            if let Some(found) = regex.find(line) {
                matches.push(RawMatch {
                    file: Some(file.to_path_buf()),
                    line: (i + 1) as u32,
                    column: Some((found.start() + 1) as u32),
                    text: line[found.start()..].to_string(),
                });
            }
        }
    }

    fn compile(pattern: &str) -> ProviderResult<Regex> {
        Regex::new(pattern).map_err(|err| ProviderError::InvalidPattern(err.to_string()))
    }
}

impl SearchProvider for GrepSearch {
    fn search(&self, pattern: &str, scope: &[PathBuf]) -> ProviderResult<Vec<RawMatch>> {
        let regex = Self::compile(pattern)?;
        let mut matches = Vec::new();
        for dir in scope {
            let walk = WalkDir::new(dir).sort_by_file_name();
            for entry in walk.into_iter().filter_map(|e| e.ok()) {
                if entry.file_type().is_file() && self.is_note_file(entry.path()) {
                    self.collect_matches(&regex, entry.path(), &mut matches);
                }
            }
        }
        debug!("Search for '{}' found {} match(es)", pattern, matches.len());
        Ok(matches)
    }

    fn search_within(&self, pattern: &str, files: &[PathBuf]) -> ProviderResult<Vec<RawMatch>> {
        let regex = Self::compile(pattern)?;
        let mut matches = Vec::new();
        for file in files {
            self.collect_matches(&regex, file, &mut matches);
        }
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_search_reports_file_line_column() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "reading.org",
            "first line\nsee [cite:@shannon1948 p. 3] here\n",
        );

        let search = GrepSearch::new(vec!["org".to_string()]);
        let matches = search
            .search(r"cite:@shannon1948\b", &[dir.path().to_path_buf()])
            .unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].file.as_deref(), Some(dir.path().join("reading.org").as_path()));
        assert_eq!(matches[0].line, 2);
        assert_eq!(matches[0].column, Some(6));
        assert!(matches[0].text.starts_with("cite:@shannon1948 p. 3]"));
    }

    #[test]
    fn test_search_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "reading.org", "cite:@shannon1948\n");
        write(dir.path(), "reading.log", "cite:@shannon1948\n");

        let search = GrepSearch::new(vec!["org".to_string()]);
        let matches = search
            .search("cite:@shannon1948", &[dir.path().to_path_buf()])
            .unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_search_walks_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("books")).unwrap();
        write(
            &dir.path().join("books"),
            "deep.md",
            "cite:@shannon1948 p. 9]\n",
        );

        let search = GrepSearch::new(vec!["org".to_string(), "md".to_string()]);
        let matches = search
            .search("cite:@shannon1948", &[dir.path().to_path_buf()])
            .unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_search_within_restricts_files() {
        let dir = tempfile::tempdir().unwrap();
        let wanted = write(dir.path(), "a.org", "entropy of a channel\n");
        write(dir.path(), "b.org", "entropy again\n");

        let search = GrepSearch::new(vec!["org".to_string()]);
        let matches = search.search_within("entropy", &[wanted.clone()]).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].file.as_deref(), Some(wanted.as_path()));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let search = GrepSearch::new(Vec::new());
        let err = search.search("cite:@(", &[]).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidPattern(_)));
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let search = GrepSearch::new(Vec::new());
        let matches = search
            .search_within("entropy", &[PathBuf::from("/nonexistent/notes.org")])
            .unwrap();
        assert!(matches.is_empty());
    }
}
