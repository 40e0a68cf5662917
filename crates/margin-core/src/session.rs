//! Navigation session
//!
//! The `Session` owns the lookup tables and the navigation state machine:
//! which container is active and which of its notes the user is on. It is an
//! explicit value owned by the caller, so multiple isolated sessions can
//! coexist in tests.
//!
//! ## Loading
//!
//! A container load maps raw search matches through the locator extractor,
//! fixes the container kind from the first note, registers reverse-index
//! entries, and sorts once. Re-loading replaces notes and resources
//! wholesale; only the navigation position survives, clamped to the new note
//! count.
//!
//! ## Navigation
//!
//! `advance` clamps at both ends instead of wrapping. Transitions without an
//! active container, or on an empty container, are silent no-ops returning
//! `None`.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cite;
use crate::config::Config;
use crate::index::LibraryIndex;
use crate::locator;
use crate::models::{Annotation, Container, ContainerKey, Note, Region, Resource, SourceHandle};
use crate::order;
use crate::providers::{
    Bibliography, DocumentViewer, MediaPlayer, ProviderResult, RawMatch, SearchProvider,
};

/// Direction of an [`advance`](Session::advance) transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
    First,
    Last,
}

/// A note plus its display position within the active container
#[derive(Debug, Clone, Copy)]
pub struct NoteView<'a> {
    pub note: &'a Note,
    /// 1-based position
    pub ordinal: usize,
    pub total: usize,
}

/// Where a jump lands, resolved from the active note's kind
#[derive(Debug, Clone, PartialEq)]
pub enum JumpTarget {
    /// Show a page of a document resource, optionally narrowed to a region
    Page {
        file: PathBuf,
        page: u32,
        region: Option<Region>,
    },
    /// Seek a media resource to a timestamp
    Seek {
        resource: Resource,
        timestamp: String,
    },
    /// Open the note's own source location
    Location { handle: SourceHandle },
}

impl JumpTarget {
    /// The resource this target lands on, if it lands on one
    pub fn resource(&self) -> Option<Resource> {
        match self {
            JumpTarget::Page { file, .. } => Some(Resource::File(file.clone())),
            JumpTarget::Seek { resource, .. } => Some(resource.clone()),
            JumpTarget::Location { .. } => None,
        }
    }
}

/// Owns the lookup tables and the active container/note state
pub struct Session {
    config: Config,
    index: LibraryIndex,
    active: Option<ContainerKey>,
}

impl Session {
    /// Open a session using the configuration from the default location
    pub fn new() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Ok(Self::with_config(config))
    }

    /// Open a session with a specific configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            index: LibraryIndex::new(),
            active: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn index(&self) -> &LibraryIndex {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut LibraryIndex {
        &mut self.index
    }

    // ==================== Loading ====================

    /// Load (or reload) the container for `citekey` and make it active
    pub fn load_citekey(
        &mut self,
        citekey: &str,
        search: &dyn SearchProvider,
        bibliography: &dyn Bibliography,
    ) -> Result<&Container> {
        let pattern = cite::citekey_pattern(citekey);
        let matches = search
            .search(&pattern, &self.config.notes_dirs)
            .with_context(|| format!("Annotation search for '{}' failed", citekey))?;
        self.index
            .refresh(bibliography)
            .context("Bibliography refresh failed")?;
        let resources = self.index.resources_for(citekey);

        let key = ContainerKey::Citekey(citekey.to_string());
        self.load(key.clone(), matches, resources);
        self.active = Some(key.clone());
        Ok(self
            .index
            .container(&key)
            .expect("container was just inserted"))
    }

    /// Build an ad-hoc container from a search pattern and make it active
    pub fn load_pattern(
        &mut self,
        pattern: &str,
        search: &dyn SearchProvider,
    ) -> Result<&Container> {
        let matches = search
            .search(pattern, &self.config.notes_dirs)
            .with_context(|| format!("Search for '{}' failed", pattern))?;

        let key = ContainerKey::Pattern(pattern.to_string());
        self.load(key.clone(), matches, Vec::new());
        self.active = Some(key.clone());
        Ok(self
            .index
            .container(&key)
            .expect("container was just inserted"))
    }

    /// Pattern search restricted to the active container's note files
    ///
    /// `None` when there is no active container or it has no files to search.
    pub fn refine(
        &mut self,
        pattern: &str,
        search: &dyn SearchProvider,
    ) -> Result<Option<&Container>> {
        let files = match self.active_container() {
            Some(container) => {
                let mut seen = HashSet::new();
                let mut files = Vec::new();
                for note in container.notes() {
                    if seen.insert(note.file.clone()) {
                        files.push(note.file.clone());
                    }
                }
                files
            }
            None => return Ok(None),
        };
        if files.is_empty() {
            return Ok(None);
        }

        let matches = search
            .search_within(pattern, &files)
            .with_context(|| format!("Refining search for '{}' failed", pattern))?;

        let key = ContainerKey::Pattern(pattern.to_string());
        self.load(key.clone(), matches, Vec::new());
        self.active = Some(key.clone());
        Ok(self.index.container(&key))
    }

    /// Re-run the active container's load, replacing notes and resources
    ///
    /// The recorded position survives, clamped to the new note count.
    pub fn reload(
        &mut self,
        search: &dyn SearchProvider,
        bibliography: &dyn Bibliography,
    ) -> Result<Option<&Container>> {
        match self.active.clone() {
            Some(ContainerKey::Citekey(citekey)) => self
                .load_citekey(&citekey, search, bibliography)
                .map(Some),
            Some(ContainerKey::Pattern(pattern)) => {
                self.load_pattern(&pattern, search).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Resolve the citekey for a resource identifier
    pub fn resolve_citekey(
        &mut self,
        resource_id: &str,
        bibliography: &dyn Bibliography,
    ) -> ProviderResult<Option<String>> {
        self.index.resolve_citekey(resource_id, bibliography)
    }

    fn load(&mut self, key: ContainerKey, matches: Vec<RawMatch>, resources: Vec<Resource>) {
        let total = matches.len();
        let mut notes = Vec::with_capacity(total);
        for raw in matches {
            // a match with no resolvable source file is dropped, not an error
            let Some(handle) = raw.handle() else {
                continue;
            };
            notes.push(Note {
                annotation: locator::classify(&raw.text),
                file: handle.file.clone(),
                line: handle.line,
                handle,
            });
        }
        if notes.len() < total {
            debug!(
                "Dropped {} match(es) with no source file",
                total - notes.len()
            );
        }

        if let ContainerKey::Citekey(ref citekey) = key {
            for note in &notes {
                self.index.register_note_file(&note.file, citekey);
            }
        }

        let (previous_index, previous_resource) = match self.index.container(&key) {
            Some(previous) => (previous.active_index(), previous.active_resource().cloned()),
            None => (None, None),
        };

        let mut container = Container::new(key);
        container.replace_notes(notes);
        order::sort_container(&mut container);
        if let Some(index) = previous_index {
            container.set_active_index(index);
        }
        if let Some(resource) = previous_resource {
            container.set_active_resource(resource);
        }

        if !resources.is_empty() {
            if let ContainerKey::Citekey(citekey) = container.key().clone() {
                for resource in &resources {
                    self.index.mark_loaded(resource.clone(), &citekey);
                }
            }
            container.replace_resources(resources);
        }

        info!(
            "Loaded {} note(s) for {}",
            container.note_count(),
            container.key()
        );
        self.index.insert_container(container);
    }

    // ==================== Navigation ====================

    /// Make a cached container active, resuming its recorded position
    pub fn select(&mut self, key: &ContainerKey) -> Option<&Container> {
        if self.index.container(key).is_none() {
            return None;
        }
        self.active = Some(key.clone());
        self.index.container(key)
    }

    /// The container navigation currently operates on
    pub fn active_container(&self) -> Option<&Container> {
        self.index.container(self.active.as_ref()?)
    }

    fn active_container_mut(&mut self) -> Option<&mut Container> {
        let key = self.active.clone()?;
        self.index.container_mut(&key)
    }

    /// Move the active note and return it with its display position
    ///
    /// Clamps at both ends instead of wrapping. A container not yet visited
    /// starts on its first note.
    pub fn advance(&mut self, direction: Direction) -> Option<NoteView<'_>> {
        let container = self.active_container_mut()?;
        let total = container.note_count();
        if total == 0 {
            return None;
        }

        let target = match (direction, container.active_index()) {
            (Direction::First, _) => 0,
            (Direction::Last, _) => total - 1,
            (Direction::Next, Some(current)) => (current + 1).min(total - 1),
            (Direction::Previous, Some(current)) => current.saturating_sub(1),
            (Direction::Next | Direction::Previous, None) => 0,
        };
        container.set_active_index(target);

        let note = container.notes().get(target)?;
        Some(NoteView {
            note,
            ordinal: target + 1,
            total,
        })
    }

    /// Resolve the active note into a jump target
    ///
    /// Document notes land on a page of the citekey's document resource,
    /// media notes seek the citekey's media resource, plain notes go back to
    /// their own source location. `None` when there is no active note or no
    /// resource to land on.
    pub fn jump(&mut self) -> Option<JumpTarget> {
        let note = self.active_container()?.active_note()?;
        let annotation = note.annotation.clone();
        let handle = note.handle.clone();

        let target = match annotation {
            Annotation::Document { page, region } => {
                let file = self.document_resource()?;
                JumpTarget::Page { file, page, region }
            }
            Annotation::Media { timestamp, .. } => {
                let resource = self.media_resource()?;
                JumpTarget::Seek {
                    resource,
                    timestamp,
                }
            }
            Annotation::Plain => JumpTarget::Location { handle },
        };

        if let Some(resource) = target.resource() {
            if let Some(container) = self.active_container_mut() {
                container.set_active_resource(resource);
            }
        }
        Some(target)
    }

    fn document_resource(&self) -> Option<PathBuf> {
        let container = self.active_container()?;
        if let Some(Resource::File(path)) = container.active_resource() {
            return Some(path.clone());
        }
        for resource in container.resources() {
            if let Resource::File(path) = resource {
                return Some(path.clone());
            }
        }
        if let ContainerKey::Citekey(citekey) = container.key() {
            if let Some(path) = self.index.files_for(citekey).first() {
                return Some(path.clone());
            }
        }
        None
    }

    fn media_resource(&self) -> Option<Resource> {
        let container = self.active_container()?;
        if let Some(resource @ Resource::Url(_)) = container.active_resource() {
            return Some(resource.clone());
        }
        for resource in container.resources() {
            if let Resource::Url(_) = resource {
                return Some(resource.clone());
            }
        }
        if let ContainerKey::Citekey(citekey) = container.key() {
            if let Some(url) = self.index.urls_for(citekey).first() {
                return Some(Resource::Url(url.clone()));
            }
        }
        container.resources().first().cloned()
    }
}

/// Dispatch a jump target to the viewer and player collaborators
pub fn perform_jump(
    target: &JumpTarget,
    viewer: &dyn DocumentViewer,
    player: &dyn MediaPlayer,
) -> ProviderResult<()> {
    match target {
        JumpTarget::Page { file, page, region } => viewer.show_page(file, *page, region.as_ref()),
        JumpTarget::Seek {
            resource,
            timestamp,
        } => player.seek(&resource.to_string(), timestamp),
        JumpTarget::Location { handle } => viewer.show_location(handle),
    }
}
