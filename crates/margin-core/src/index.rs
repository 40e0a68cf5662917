//! Resource and citekey lookup tables
//!
//! Four independent mappings, owned by a [`Session`](crate::session::Session)
//! rather than living in globals so tests can build isolated instances:
//!
//! - the two forward bibliography mappings (citekey → files, citekey → URLs),
//!   each replaced wholesale on refresh
//! - the reverse note-file → citekeys mapping, filled in as containers load
//! - the loaded-resource → citekey mapping
//! - the container cache, which grows for the process lifetime

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::models::{Container, ContainerKey, Resource};
use crate::providers::{Bibliography, ProviderResult};

/// Lookup tables tying citekeys, resources, and containers together
#[derive(Debug, Default)]
pub struct LibraryIndex {
    /// citekey → file resources
    files: HashMap<String, Vec<PathBuf>>,
    /// citekey → URL resources
    urls: HashMap<String, Vec<String>>,
    /// note file → citekeys found in it
    file_keys: HashMap<PathBuf, Vec<String>>,
    /// resource → the citekey it was loaded under
    loaded: HashMap<Resource, String>,
    /// container cache
    containers: HashMap<ContainerKey, Container>,
}

impl LibraryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both forward mappings from the bibliography provider
    pub fn refresh(&mut self, bibliography: &dyn Bibliography) -> ProviderResult<()> {
        self.files = bibliography.files()?;
        self.urls = bibliography.urls()?;
        debug!(
            "Bibliography refreshed: {} file entries, {} url entries",
            self.files.len(),
            self.urls.len()
        );
        Ok(())
    }

    /// File resources known for a citekey
    pub fn files_for(&self, citekey: &str) -> &[PathBuf] {
        self.files.get(citekey).map(Vec::as_slice).unwrap_or(&[])
    }

    /// URL resources known for a citekey
    pub fn urls_for(&self, citekey: &str) -> &[String] {
        self.urls.get(citekey).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All resources known for a citekey, files first
    pub fn resources_for(&self, citekey: &str) -> Vec<Resource> {
        let mut resources: Vec<Resource> = self
            .files_for(citekey)
            .iter()
            .map(|path| Resource::File(path.clone()))
            .collect();
        resources.extend(
            self.urls_for(citekey)
                .iter()
                .map(|url| Resource::Url(url.clone())),
        );
        resources
    }

    /// Citekeys registered for a note file
    pub fn citekeys_in(&self, file: &Path) -> &[String] {
        self.file_keys.get(file).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Register `citekey` under a note file (union semantics: a file already
    /// mapped to the citekey is not duplicated)
    pub(crate) fn register_note_file(&mut self, file: &Path, citekey: &str) {
        let keys = self.file_keys.entry(file.to_path_buf()).or_default();
        if !keys.iter().any(|k| k == citekey) {
            keys.push(citekey.to_string());
        }
    }

    /// Mark `resource` as loaded under `citekey`
    pub(crate) fn mark_loaded(&mut self, resource: Resource, citekey: &str) {
        self.loaded.insert(resource, citekey.to_string());
    }

    /// The citekey a resource was loaded under, if any
    pub fn loaded_citekey(&self, resource: &Resource) -> Option<&str> {
        self.loaded.get(resource).map(String::as_str)
    }

    pub fn container(&self, key: &ContainerKey) -> Option<&Container> {
        self.containers.get(key)
    }

    pub fn container_mut(&mut self, key: &ContainerKey) -> Option<&mut Container> {
        self.containers.get_mut(key)
    }

    pub(crate) fn insert_container(&mut self, container: Container) {
        self.containers.insert(container.key().clone(), container);
    }

    /// Number of cached containers
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Number of citekeys with at least one resource
    pub fn citekey_count(&self) -> usize {
        self.files
            .keys()
            .chain(self.urls.keys())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Resolve the citekey for a raw resource identifier
    ///
    /// Checks the loaded-resource table, then refreshes the forward mappings
    /// and scans them by file name, absolute path, and raw identifier, in
    /// that order. Returns `None` when still absent; the reverse tables are
    /// left untouched either way.
    pub fn resolve_citekey(
        &mut self,
        resource_id: &str,
        bibliography: &dyn Bibliography,
    ) -> ProviderResult<Option<String>> {
        let resource = Resource::from_identifier(resource_id);
        if let Some(citekey) = self.loaded.get(&resource) {
            return Ok(Some(citekey.clone()));
        }

        self.refresh(bibliography)?;

        // scan in key order so ambiguous identifiers resolve the same way
        // every time
        let mut file_keys: Vec<&String> = self.files.keys().collect();
        file_keys.sort();
        let mut url_keys: Vec<&String> = self.urls.keys().collect();
        url_keys.sort();

        if let Some(name) = Path::new(resource_id).file_name() {
            for citekey in &file_keys {
                if self.files[*citekey]
                    .iter()
                    .any(|path| path.file_name() == Some(name))
                {
                    return Ok(Some((*citekey).clone()));
                }
            }
        }

        let path = Path::new(resource_id);
        for citekey in &file_keys {
            if self.files[*citekey].iter().any(|known| known == path) {
                return Ok(Some((*citekey).clone()));
            }
        }

        for citekey in &url_keys {
            if self.urls[*citekey].iter().any(|url| url == resource_id) {
                return Ok(Some((*citekey).clone()));
            }
        }

        Ok(None)
    }
}
