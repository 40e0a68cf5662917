//! Note ordering within a container
//!
//! Comparison rules dispatched on the container kind. Sorting is stable, so
//! notes the comparator cannot distinguish keep the order the search provider
//! returned them in.

use std::cmp::Ordering;

use crate::models::{Annotation, Container, ContainerKind, Note};

/// Sort a container's notes according to its kind
///
/// Plain containers keep provider order untouched.
pub fn sort_container(container: &mut Container) {
    let Some(kind) = container.kind() else {
        return;
    };
    match kind {
        ContainerKind::Document => container.notes_mut().sort_by(by_position),
        ContainerKind::Media => container.notes_mut().sort_by(by_timestamp),
        ContainerKind::Plain => {}
    }
}

/// Document order: page ascending, then region-bearing notes before bare
/// ones, then by the first region component
fn by_position(a: &Note, b: &Note) -> Ordering {
    match (position(a), position(b)) {
        (Some((page_a, region_a)), Some((page_b, region_b))) => page_a
            .cmp(&page_b)
            .then_with(|| compare_components(region_a, region_b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn position(note: &Note) -> Option<(u32, Option<f64>)> {
    match &note.annotation {
        Annotation::Document { page, region } => Some((*page, region.as_ref().map(|r| r.first()))),
        _ => None,
    }
}

fn compare_components(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Media order: raw string comparison of the timestamp, matching how the
/// timestamps appear in the annotation text rather than clock order
fn by_timestamp(a: &Note, b: &Note) -> Ordering {
    match (timestamp(a), timestamp(b)) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn timestamp(note: &Note) -> Option<&str> {
    match &note.annotation {
        Annotation::Media { timestamp, .. } => Some(timestamp.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContainerKey, Region, SourceHandle};
    use std::path::PathBuf;

    fn note(annotation: Annotation, line: u32) -> Note {
        Note {
            annotation,
            file: PathBuf::from("/notes/reading.org"),
            line,
            handle: SourceHandle {
                file: PathBuf::from("/notes/reading.org"),
                line,
                column: None,
            },
        }
    }

    fn document(page: u32, region: Option<Vec<f64>>, line: u32) -> Note {
        note(
            Annotation::Document {
                page,
                region: region.and_then(Region::new),
            },
            line,
        )
    }

    fn media(timestamp: &str, line: u32) -> Note {
        note(
            Annotation::Media {
                bucket: None,
                timestamp: timestamp.to_string(),
            },
            line,
        )
    }

    fn sorted(notes: Vec<Note>) -> Container {
        let mut container = Container::new(ContainerKey::Citekey("shannon1948".to_string()));
        container.replace_notes(notes);
        sort_container(&mut container);
        container
    }

    #[test]
    fn test_document_sorts_by_page_then_region() {
        let container = sorted(vec![
            document(3, None, 1),
            document(1, Some(vec![2.0, 3.0]), 2),
            document(1, Some(vec![0.0, 1.0]), 3),
        ]);

        let pages: Vec<String> = container
            .notes()
            .iter()
            .map(|n| n.annotation.to_string())
            .collect();
        assert_eq!(pages, vec!["p. 1 (0 1)", "p. 1 (2 3)", "p. 3"]);
    }

    #[test]
    fn test_document_region_before_bare_page() {
        let container = sorted(vec![
            document(5, None, 1),
            document(5, Some(vec![7.7]), 2),
        ]);
        assert_eq!(container.notes()[0].line, 2);
        assert_eq!(container.notes()[1].line, 1);
    }

    #[test]
    fn test_document_equal_pages_stay_stable() {
        let container = sorted(vec![
            document(4, None, 1),
            document(4, None, 2),
            document(2, None, 3),
        ]);
        let lines: Vec<u32> = container.notes().iter().map(|n| n.line).collect();
        assert_eq!(lines, vec![3, 1, 2]);
    }

    #[test]
    fn test_unclassified_notes_sort_after_pages() {
        let container = sorted(vec![
            document(9, None, 2),
            note(Annotation::Plain, 1),
            document(2, None, 3),
        ]);
        let lines: Vec<u32> = container.notes().iter().map(|n| n.line).collect();
        assert_eq!(lines, vec![3, 2, 1]);
    }

    #[test]
    fn test_media_order_is_string_order() {
        let container = sorted(vec![
            media("9:00:00", 1),
            media("10:00:00", 2),
            media("11:30:00", 3),
        ]);

        // raw string comparison: "10:..." and "11:..." sort before "9:..."
        let stamps: Vec<String> = container
            .notes()
            .iter()
            .map(|n| n.annotation.to_string())
            .collect();
        assert_eq!(stamps, vec!["10:00:00", "11:30:00", "9:00:00"]);
    }

    #[test]
    fn test_media_sequence_is_non_decreasing_strings() {
        let container = sorted(vec![
            media("12:04:05", 1),
            media("1:00", 2),
            media("12:04", 3),
            media("02:30:00", 4),
        ]);
        let stamps: Vec<&str> = container
            .notes()
            .iter()
            .filter_map(|n| match &n.annotation {
                Annotation::Media { timestamp, .. } => Some(timestamp.as_str()),
                _ => None,
            })
            .collect();
        for pair in stamps.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_plain_keeps_provider_order() {
        let container = sorted(vec![
            note(Annotation::Plain, 9),
            note(Annotation::Plain, 1),
            note(Annotation::Plain, 5),
        ]);
        let lines: Vec<u32> = container.notes().iter().map(|n| n.line).collect();
        assert_eq!(lines, vec![9, 1, 5]);
    }
}
