//! Citation string formats
//!
//! The exact forms annotations take inside note documents. These strings are
//! the contract with existing notes: [`crate::locator`] must round-trip what
//! this module writes.

use crate::models::Region;

/// `[cite:@<citekey> p. <page>]`
pub fn page_citation(citekey: &str, page: u32) -> String {
    format!("[cite:@{} p. {}]", citekey, page)
}

/// `[cite:@<citekey> p. <page>] [[<coordinates>][<label>]]`
pub fn region_citation(citekey: &str, page: u32, region: &Region, label: &str) -> String {
    format!("{} [[{}][{}]]", page_citation(citekey, page), region, label)
}

/// `[[cite:@<citekey> <url-encoded-resource>][<timestamp>]]`
pub fn media_annotation(citekey: &str, resource: &str, timestamp: &str) -> String {
    format!(
        "[[cite:@{} {}][{}]]",
        citekey,
        urlencoding::encode(resource),
        timestamp
    )
}

/// Search pattern matching any citation of `citekey`
pub fn citekey_pattern(citekey: &str) -> String {
    format!(r"cite:@{}\b", regex::escape(citekey))
}
