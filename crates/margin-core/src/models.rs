//! Data models for margin
//!
//! Defines the core data structures: Note, Annotation, Container, and the
//! identifiers that tie them to citekeys and resources.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A coordinate region on a document page
///
/// Parsed from a parenthesized numeric tuple such as `(3.4 5.6)` and written
/// back in exactly that form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region(Vec<f64>);

impl Region {
    /// Create a region from its coordinates, `None` if there are none
    pub fn new(coords: Vec<f64>) -> Option<Self> {
        if coords.is_empty() {
            None
        } else {
            Some(Self(coords))
        }
    }

    /// The primary component, used for ordering within a page
    pub fn first(&self) -> f64 {
        self.0[0]
    }

    /// All components in order
    pub fn coords(&self) -> &[f64] {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, coord) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", coord)?;
        }
        write!(f, ")")
    }
}

/// What a note points at within its resource
///
/// A closed set: branching on the annotation is always exhaustive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Annotation {
    /// A page in a document, optionally narrowed to a region on that page
    Document { page: u32, region: Option<Region> },
    /// A position in a media stream; `bucket` is the coarse position
    /// (timestamp without seconds), `timestamp` the exact one
    Media {
        bucket: Option<String>,
        timestamp: String,
    },
    /// An arbitrary match with no recognized locator
    Plain,
}

impl Annotation {
    /// The container kind this annotation belongs to
    pub fn kind(&self) -> ContainerKind {
        match self {
            Annotation::Document { .. } => ContainerKind::Document,
            Annotation::Media { .. } => ContainerKind::Media,
            Annotation::Plain => ContainerKind::Plain,
        }
    }

    /// Coarse locator: page number or time bucket
    pub fn locator(&self) -> Option<String> {
        match self {
            Annotation::Document { page, .. } => Some(page.to_string()),
            Annotation::Media { bucket, .. } => bucket.clone(),
            Annotation::Plain => None,
        }
    }

    /// Fine-grained locator: page region or exact timestamp
    pub fn precise_locator(&self) -> Option<String> {
        match self {
            Annotation::Document { region, .. } => region.as_ref().map(|r| r.to_string()),
            Annotation::Media { timestamp, .. } => Some(timestamp.clone()),
            Annotation::Plain => None,
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Annotation::Document {
                page,
                region: Some(region),
            } => write!(f, "p. {} {}", page, region),
            Annotation::Document { page, region: None } => write!(f, "p. {}", page),
            Annotation::Media { timestamp, .. } => write!(f, "{}", timestamp),
            Annotation::Plain => write!(f, "plain"),
        }
    }
}

/// A re-open capability for the exact location a match came from
///
/// Only used to get back to the match; never compared or sorted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceHandle {
    /// File the match was found in
    pub file: PathBuf,
    /// 1-based line number
    pub line: u32,
    /// 1-based column of the match start, when the provider reports one
    pub column: Option<u32>,
}

/// One parsed annotation instance
///
/// Immutable after construction; a container replaces its notes wholesale on
/// reload instead of editing them in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// The classified locator information
    pub annotation: Annotation,
    /// File the note text lives in (not the resource it annotates)
    pub file: PathBuf,
    /// 1-based line number within `file`
    pub line: u32,
    /// Capability to re-open the exact match location
    pub handle: SourceHandle,
}

impl Note {
    /// The container kind this note belongs to
    pub fn kind(&self) -> ContainerKind {
        self.annotation.kind()
    }
}

/// A file or URL that a citekey's notes refer to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    File(PathBuf),
    Url(String),
}

impl Resource {
    /// Classify a raw identifier: anything with a URL scheme is a URL
    pub fn from_identifier(identifier: &str) -> Self {
        if identifier.contains("://") {
            Resource::Url(identifier.to_string())
        } else {
            Resource::File(PathBuf::from(identifier))
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::File(path) => write!(f, "{}", path.display()),
            Resource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// What a container is scoped to: a citekey or an ad-hoc search pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKey {
    Citekey(String),
    Pattern(String),
}

impl fmt::Display for ContainerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKey::Citekey(key) => write!(f, "{}", key),
            ContainerKey::Pattern(pattern) => write!(f, "pattern '{}'", pattern),
        }
    }
}

/// The dominant note kind of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Document,
    Media,
    Plain,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::Document => write!(f, "document"),
            ContainerKind::Media => write!(f, "media"),
            ContainerKind::Plain => write!(f, "plain"),
        }
    }
}

/// The notes and resources associated with one citekey or search pattern
///
/// Holds the navigation position for its notes. The note list and resource
/// list are replaced wholesale on reload; the position survives, clamped to
/// the new note count.
#[derive(Debug, Clone, Serialize)]
pub struct Container {
    key: ContainerKey,
    kind: Option<ContainerKind>,
    notes: Vec<Note>,
    resources: Vec<Resource>,
    active_resource: Option<Resource>,
    active: Option<usize>,
}

impl Container {
    /// Create an empty container for the given key
    pub fn new(key: ContainerKey) -> Self {
        Self {
            key,
            kind: None,
            notes: Vec::new(),
            resources: Vec::new(),
            active_resource: None,
            active: None,
        }
    }

    pub fn key(&self) -> &ContainerKey {
        &self.key
    }

    /// Kind fixed from the first note at load time, `None` while empty
    pub fn kind(&self) -> Option<ContainerKind> {
        self.kind
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Last-visited resource, informational only
    pub fn active_resource(&self) -> Option<&Resource> {
        self.active_resource.as_ref()
    }

    pub fn set_active_resource(&mut self, resource: Resource) {
        self.active_resource = Some(resource);
    }

    /// Current navigation position, `None` until first visited or while empty
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Record a navigation position, clamped into the note range
    ///
    /// A no-op on an empty container: the position stays unset.
    pub fn set_active_index(&mut self, index: usize) {
        if self.notes.is_empty() {
            self.active = None;
        } else {
            self.active = Some(index.min(self.notes.len() - 1));
        }
    }

    /// The note at the current navigation position
    pub fn active_note(&self) -> Option<&Note> {
        self.active.and_then(|i| self.notes.get(i))
    }

    /// Replace all notes, re-deriving the kind from the first one
    ///
    /// An existing navigation position is clamped to the new count.
    pub(crate) fn replace_notes(&mut self, notes: Vec<Note>) {
        self.kind = notes.first().map(Note::kind);
        self.notes = notes;
        if let Some(index) = self.active {
            self.set_active_index(index);
        }
    }

    /// Replace the associated resources
    pub(crate) fn replace_resources(&mut self, resources: Vec<Resource>) {
        self.resources = resources;
    }

    pub(crate) fn notes_mut(&mut self) -> &mut [Note] {
        &mut self.notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(annotation: Annotation) -> Note {
        Note {
            annotation,
            file: PathBuf::from("/notes/reading.org"),
            line: 4,
            handle: SourceHandle {
                file: PathBuf::from("/notes/reading.org"),
                line: 4,
                column: Some(1),
            },
        }
    }

    #[test]
    fn test_region_display_roundtrip() {
        let region = Region::new(vec![3.4, 5.6]).unwrap();
        assert_eq!(region.to_string(), "(3.4 5.6)");
        assert_eq!(region.first(), 3.4);

        let whole = Region::new(vec![2.0, 3.0]).unwrap();
        assert_eq!(whole.to_string(), "(2 3)");
    }

    #[test]
    fn test_region_empty() {
        assert!(Region::new(Vec::new()).is_none());
    }

    #[test]
    fn test_annotation_locators() {
        let doc = Annotation::Document {
            page: 12,
            region: Region::new(vec![3.4, 5.6]),
        };
        assert_eq!(doc.kind(), ContainerKind::Document);
        assert_eq!(doc.locator().as_deref(), Some("12"));
        assert_eq!(doc.precise_locator().as_deref(), Some("(3.4 5.6)"));

        let media = Annotation::Media {
            bucket: Some("12:04".to_string()),
            timestamp: "12:04:05".to_string(),
        };
        assert_eq!(media.kind(), ContainerKind::Media);
        assert_eq!(media.locator().as_deref(), Some("12:04"));
        assert_eq!(media.precise_locator().as_deref(), Some("12:04:05"));

        assert_eq!(Annotation::Plain.locator(), None);
        assert_eq!(Annotation::Plain.precise_locator(), None);
    }

    #[test]
    fn test_resource_from_identifier() {
        assert_eq!(
            Resource::from_identifier("https://example.com/talk"),
            Resource::Url("https://example.com/talk".to_string())
        );
        assert_eq!(
            Resource::from_identifier("/papers/shannon1948.pdf"),
            Resource::File(PathBuf::from("/papers/shannon1948.pdf"))
        );
    }

    #[test]
    fn test_container_kind_from_first_note() {
        let mut container = Container::new(ContainerKey::Citekey("shannon1948".to_string()));
        assert_eq!(container.kind(), None);

        container.replace_notes(vec![
            note(Annotation::Document {
                page: 3,
                region: None,
            }),
            note(Annotation::Plain),
        ]);
        assert_eq!(container.kind(), Some(ContainerKind::Document));
        assert_eq!(container.note_count(), 2);
    }

    #[test]
    fn test_container_active_index_clamps() {
        let mut container = Container::new(ContainerKey::Citekey("shannon1948".to_string()));
        container.replace_notes(vec![
            note(Annotation::Plain),
            note(Annotation::Plain),
            note(Annotation::Plain),
        ]);

        container.set_active_index(10);
        assert_eq!(container.active_index(), Some(2));

        // shrinking the note list pulls the position back into range
        container.replace_notes(vec![note(Annotation::Plain)]);
        assert_eq!(container.active_index(), Some(0));

        container.replace_notes(Vec::new());
        assert_eq!(container.active_index(), None);
        assert!(container.active_note().is_none());
    }

    #[test]
    fn test_empty_container_has_no_position() {
        let mut container = Container::new(ContainerKey::Pattern("entropy".to_string()));
        container.set_active_index(0);
        assert_eq!(container.active_index(), None);
    }

    #[test]
    fn test_note_serialization() {
        let original = note(Annotation::Document {
            page: 7,
            region: Region::new(vec![1.5]),
        });
        let json = serde_json::to_string(&original).unwrap();
        let parsed: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_annotation_serialization_tags() {
        let json = serde_json::to_string(&Annotation::Plain).unwrap();
        assert!(json.contains("\"kind\":\"plain\""));

        let media = Annotation::Media {
            bucket: None,
            timestamp: "9:00".to_string(),
        };
        let json = serde_json::to_string(&media).unwrap();
        assert!(json.contains("\"kind\":\"media\""));
    }
}
