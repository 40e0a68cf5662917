//! Search command handler

use anyhow::Result;

use margin_core::{Config, Session};

use crate::output::Output;
use crate::providers::GrepSearch;

/// Build an ad-hoc note container from a search pattern
pub fn run(config: &Config, pattern: &str, output: &Output) -> Result<()> {
    let search = GrepSearch::new(config.extensions.clone());

    let mut session = Session::with_config(config.clone());
    let container = session.load_pattern(pattern, &search)?;

    output.print_container(container);
    Ok(())
}
