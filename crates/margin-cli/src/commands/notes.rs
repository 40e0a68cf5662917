//! Notes command handler

use anyhow::Result;

use margin_core::{Config, Session};

use crate::output::Output;
use crate::providers::{GrepSearch, TomlLibrary};

/// List the notes indexed for a citekey
pub fn run(config: &Config, citekey: &str, output: &Output) -> Result<()> {
    let search = GrepSearch::new(config.extensions.clone());
    let library = TomlLibrary::new(config.library.clone());

    let mut session = Session::with_config(config.clone());
    let container = session.load_citekey(citekey, &search, &library)?;

    output.print_container(container);
    Ok(())
}
