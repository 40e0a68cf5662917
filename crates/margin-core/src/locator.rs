//! Locator extraction from raw match text
//!
//! Pulls page numbers, coordinate regions, timestamps, and citekey tokens out
//! of the text surrounding a citation match.
//!
//! # Rules
//!
//! 1. A page marker is `p.` or `pp.` followed by a number; a range such as
//!    `p. 12-15` keeps the first endpoint.
//! 2. A coordinate region is a parenthesized numeric tuple directly after the
//!    page marker, e.g. `(3.4 5.6)`.
//! 3. A timestamp is an `H:MM` or `H:MM:SS` substring.
//! 4. A citekey token follows `cite:@` and ends at a space, semicolon, or `]`.
//!
//! Extraction is independent per field: a missing pattern yields `None` for
//! that field, never an error. Classification prefers timestamps over page
//! markers, so text carrying both becomes a media annotation.

use chrono::{NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Annotation, Region};

static PAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bpp?\.?\s*(\d+)(?:\s*[-–]\s*\d+)?").unwrap());

// brackets may sit between the page marker and the tuple, as in
// `p. 12] [[(3.4 5.6)][label]]`
static REGION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\s\[\]]*\(([^)]*)\)").unwrap());

static TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2}:[0-5]\d(?::[0-5]\d)?)\b").unwrap());

static CITEKEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"cite:@([^\s;\]]+)").unwrap());

/// First page number in `text`; ranges keep the first endpoint
pub fn page(text: &str) -> Option<u32> {
    let captures = PAGE.captures(text)?;
    captures[1].parse().ok()
}

/// Coordinate tuple directly following the first page marker
pub fn region(text: &str) -> Option<Region> {
    let page_match = PAGE.find(text)?;
    let rest = &text[page_match.end()..];
    let captures = REGION.captures(rest)?;
    let coords: Option<Vec<f64>> = captures[1]
        .split_whitespace()
        .map(|token| token.parse().ok())
        .collect();
    Region::new(coords?)
}

/// First `H:MM` or `H:MM:SS` substring
pub fn timestamp(text: &str) -> Option<&str> {
    TIMESTAMP
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Citekey token after a `cite:@` marker
pub fn citekey(text: &str) -> Option<&str> {
    CITEKEY
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Coarse time bucket for a timestamp: the seconds component is dropped
pub fn bucket(timestamp: &str) -> String {
    match timestamp.rfind(':') {
        Some(last) if timestamp.matches(':').count() == 2 => timestamp[..last].to_string(),
        _ => timestamp.to_string(),
    }
}

/// Seconds from the start represented by an `H:MM[:SS]` timestamp
pub fn timestamp_seconds(timestamp: &str) -> Option<u32> {
    let time = NaiveTime::parse_from_str(timestamp, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(timestamp, "%H:%M"))
        .ok()?;
    Some(time.num_seconds_from_midnight())
}

/// Classify a raw match into its annotation
///
/// Timestamp wins over page marker; text with neither is a plain match.
pub fn classify(text: &str) -> Annotation {
    if let Some(ts) = timestamp(text) {
        return Annotation::Media {
            bucket: Some(bucket(ts)),
            timestamp: ts.to_string(),
        };
    }
    if let Some(page) = page(text) {
        return Annotation::Document {
            page,
            region: region(text),
        };
    }
    Annotation::Plain
}
