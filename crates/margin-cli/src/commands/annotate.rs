//! Annotate command handler
//!
//! Produces an annotation string in one of the citation formats, ready to
//! paste into a note file.

use anyhow::{bail, Result};

use margin_core::providers::MediaPlayer;
use margin_core::{cite, locator, Region};

use crate::output::Output;
use crate::viewer::ShellPlayer;

pub fn run(
    citekey: &str,
    page: Option<u32>,
    region: Option<String>,
    label: Option<String>,
    timestamp: Option<String>,
    resource: Option<String>,
    output: &Output,
) -> Result<()> {
    let annotation = if let Some(timestamp) = timestamp {
        media(citekey, &timestamp, resource)?
    } else if let Some(page) = page {
        document(citekey, page, region, label)?
    } else {
        bail!("Pass --page or --timestamp to choose the annotation form.");
    };

    output.print_annotation(&annotation);
    Ok(())
}

fn document(
    citekey: &str,
    page: u32,
    region: Option<String>,
    label: Option<String>,
) -> Result<String> {
    match region {
        Some(coords) => {
            let region = parse_region(&coords)?;
            let label = label.unwrap_or_else(|| format!("p. {}", page));
            Ok(cite::region_citation(citekey, page, &region, &label))
        }
        None => Ok(cite::page_citation(citekey, page)),
    }
}

fn media(citekey: &str, timestamp: &str, resource: Option<String>) -> Result<String> {
    if locator::timestamp(timestamp) != Some(timestamp) {
        bail!("Timestamp must be H:MM or H:MM:SS, got '{}'", timestamp);
    }

    let resource = match resource {
        Some(resource) => resource,
        None => match ShellPlayer.current_path()? {
            Some(path) => path,
            None => bail!("No media resource given and nothing is playing. Pass --resource."),
        },
    };

    Ok(cite::media_annotation(citekey, &resource, timestamp))
}

fn parse_region(coords: &str) -> Result<Region> {
    let parsed: Option<Vec<f64>> = coords
        .split_whitespace()
        .map(|token| token.parse().ok())
        .collect();
    match parsed.and_then(Region::new) {
        Some(region) => Ok(region),
        None => bail!(
            "Region must be a space-separated list of numbers, got '{}'",
            coords
        ),
    }
}
