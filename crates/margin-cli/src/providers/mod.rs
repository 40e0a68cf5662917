//! Concrete collaborator implementations
//!
//! The engine only consumes capabilities through traits; these are the
//! implementations the CLI wires in: a filesystem grep for search and a TOML
//! file for the bibliography.

pub mod library;
pub mod search;

pub use library::TomlLibrary;
pub use search::GrepSearch;
