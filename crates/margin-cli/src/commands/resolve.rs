//! Resolve and resources command handlers

use std::io::{self, Write};

use anyhow::Result;

use margin_core::{Config, Session};

use crate::output::Output;
use crate::providers::{GrepSearch, TomlLibrary};

/// Resolve the citekey associated with a resource
///
/// When nothing resolves and stdin is a terminal, asks for a citekey and
/// shows its notes instead.
pub fn run(config: &Config, resource: &str, output: &Output) -> Result<()> {
    let library = TomlLibrary::new(config.library.clone());
    let mut session = Session::with_config(config.clone());

    if let Some(citekey) = session.resolve_citekey(resource, &library)? {
        output.print_resolved(resource, &citekey);
        return Ok(());
    }

    if output.should_prompt() && atty::is(atty::Stream::Stdin) {
        if let Some(citekey) = prompt_citekey(resource)? {
            let search = GrepSearch::new(config.extensions.clone());
            let container = session.load_citekey(&citekey, &search, &library)?;
            output.print_container(container);
            return Ok(());
        }
    }

    output.message(&format!("No citekey found for {}", resource));
    Ok(())
}

/// List the resources associated with a citekey
pub fn resources(config: &Config, citekey: &str, output: &Output) -> Result<()> {
    let library = TomlLibrary::new(config.library.clone());

    let mut session = Session::with_config(config.clone());
    session.index_mut().refresh(&library)?;
    let resources = session.index().resources_for(citekey);

    output.print_resources(citekey, &resources);
    Ok(())
}

/// Ask for a citekey on stdin, `None` when left empty
fn prompt_citekey(resource: &str) -> Result<Option<String>> {
    print!("Citekey for {}: ", resource);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    if input.is_empty() {
        Ok(None)
    } else {
        Ok(Some(input.to_string()))
    }
}
