//! Collaborator interfaces
//!
//! The engine consumes search, bibliography, viewer, and player capabilities
//! through these traits; the implementations live with the host application.
//! "Nothing found" is an empty collection or `None`, never an error — the
//! error type covers only genuinely failing collaborators.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{Region, SourceHandle};

/// Errors from collaborator calls
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Failed to read a file the collaborator needed
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The bibliography file exists but cannot be parsed
    #[error("Malformed bibliography '{path}': {details}")]
    MalformedLibrary { path: PathBuf, details: String },

    /// The search pattern is not a valid expression
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),

    /// A collaborator could not be reached or refused the request
    #[error("{collaborator} unavailable: {details}")]
    Unavailable {
        collaborator: &'static str,
        details: String,
    },

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for collaborator calls
pub type ProviderResult<T> = Result<T, ProviderError>;

/// One raw full-text match, prior to classification
#[derive(Debug, Clone, PartialEq)]
pub struct RawMatch {
    /// Source file, when the provider could resolve one
    pub file: Option<PathBuf>,
    /// 1-based line number
    pub line: u32,
    /// 1-based column of the match start, when known
    pub column: Option<u32>,
    /// The matched citation text with its trailing context
    pub text: String,
}

impl RawMatch {
    /// Handle capable of re-opening this match location
    ///
    /// `None` when the provider could not resolve a source file; such matches
    /// are dropped during loading.
    pub fn handle(&self) -> Option<SourceHandle> {
        self.file.as_ref().map(|file| SourceHandle {
            file: file.clone(),
            line: self.line,
            column: self.column,
        })
    }
}

/// Full-text search over the note documents
pub trait SearchProvider {
    /// Search for `pattern` under the given directories
    fn search(&self, pattern: &str, scope: &[PathBuf]) -> ProviderResult<Vec<RawMatch>>;

    /// Search restricted to the given files
    fn search_within(&self, pattern: &str, files: &[PathBuf]) -> ProviderResult<Vec<RawMatch>>;
}

/// Citekey to resource mappings
pub trait Bibliography {
    /// citekey → file resources
    fn files(&self) -> ProviderResult<HashMap<String, Vec<PathBuf>>>;

    /// citekey → URL resources
    fn urls(&self) -> ProviderResult<HashMap<String, Vec<String>>>;
}

/// Document display capability
pub trait DocumentViewer {
    /// Show a page of `file`, optionally highlighting a region
    fn show_page(&self, file: &Path, page: u32, region: Option<&Region>) -> ProviderResult<()>;

    /// Open the exact location a note's text came from
    fn show_location(&self, handle: &SourceHandle) -> ProviderResult<()>;
}

/// Media playback capability
pub trait MediaPlayer {
    /// Seek `resource` to the given `H:MM[:SS]` timestamp
    fn seek(&self, resource: &str, timestamp: &str) -> ProviderResult<()>;

    /// The resource currently playing, if any
    fn current_path(&self) -> ProviderResult<Option<String>>;
}
