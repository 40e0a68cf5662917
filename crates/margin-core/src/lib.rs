//! Margin core library
//!
//! This crate provides the core functionality for margin, a tool that indexes
//! free-form annotations referencing external resources (documents, media,
//! URLs) by bibliographic citekey, and navigates between a resource and the
//! notes that point into it in a stable, deterministic order.
//!
//! # Architecture
//!
//! Annotations live as citation strings inside plain-text note files. Nothing
//! is persisted: every session rebuilds its index from the search provider.
//!
//! # Quick Start
//!
//! ```text
//! let mut session = Session::new()?;
//!
//! // Index the annotations for a citekey
//! let container = session.load_citekey("shannon1948", &search, &library)?;
//!
//! // Walk the notes
//! while let Some(view) = session.advance(Direction::Next) {
//!     println!("[{}/{}] {}", view.ordinal, view.total, view.note.annotation);
//! }
//! ```
//!
//! # Modules
//!
//! - `session`: container loading and navigation (main entry point)
//! - `models`: notes, annotations, containers, resources
//! - `locator`: extraction of pages, regions, timestamps, and citekeys
//! - `order`: deterministic note ordering per container kind
//! - `index`: citekey/resource lookup tables and the container cache
//! - `cite`: the citation string formats written into note documents
//! - `providers`: collaborator interfaces (search, bibliography, viewer, player)
//! - `config`: application configuration

pub mod cite;
pub mod config;
pub mod index;
pub mod locator;
pub mod models;
pub mod order;
pub mod providers;
pub mod session;

pub use config::Config;
pub use index::LibraryIndex;
pub use models::{
    Annotation, Container, ContainerKey, ContainerKind, Note, Region, Resource, SourceHandle,
};
pub use providers::{
    Bibliography, DocumentViewer, MediaPlayer, ProviderError, ProviderResult, RawMatch,
    SearchProvider,
};
pub use session::{perform_jump, Direction, JumpTarget, NoteView, Session};
