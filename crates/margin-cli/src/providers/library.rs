//! Bibliography provider backed by a TOML library file
//!
//! ```toml
//! [entries.shannon1948]
//! files = ["/papers/shannon1948.pdf"]
//! urls = ["https://example.com/shannon1948.pdf"]
//! ```
//!
//! A missing file behaves as an empty library; a file that exists but does
//! not parse is an error.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use margin_core::providers::{Bibliography, ProviderError, ProviderResult};

#[derive(Debug, Default, Deserialize)]
struct LibraryFile {
    #[serde(default)]
    entries: HashMap<String, Entry>,
}

#[derive(Debug, Default, Deserialize)]
struct Entry {
    #[serde(default)]
    files: Vec<PathBuf>,
    #[serde(default)]
    urls: Vec<String>,
}

/// Bibliography entries loaded from a TOML file
pub struct TomlLibrary {
    path: Option<PathBuf>,
}

impl TomlLibrary {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    fn read(&self) -> ProviderResult<LibraryFile> {
        let Some(ref path) = self.path else {
            return Ok(LibraryFile::default());
        };
        if !path.exists() {
            return Ok(LibraryFile::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ProviderError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|err| ProviderError::MalformedLibrary {
            path: path.clone(),
            details: err.to_string(),
        })
    }
}

impl Bibliography for TomlLibrary {
    fn files(&self) -> ProviderResult<HashMap<String, Vec<PathBuf>>> {
        Ok(self
            .read()?
            .entries
            .into_iter()
            .map(|(citekey, entry)| (citekey, entry.files))
            .collect())
    }

    fn urls(&self) -> ProviderResult<HashMap<String, Vec<String>>> {
        Ok(self
            .read()?
            .entries
            .into_iter()
            .map(|(citekey, entry)| (citekey, entry.urls))
            .collect())
    }
}
