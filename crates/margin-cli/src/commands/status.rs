//! Status command handler

use std::collections::HashSet;

use anyhow::Result;

use margin_core::providers::Bibliography;
use margin_core::Config;

use crate::output::{Output, OutputFormat};
use crate::providers::TomlLibrary;

/// Show configuration and library status
pub fn show(config: &Config, output: &Output) -> Result<()> {
    let library = TomlLibrary::new(config.library.clone());
    let files = library.files()?;
    let urls = library.urls()?;

    let citekeys: HashSet<&String> = files.keys().chain(urls.keys()).collect();
    let file_total: usize = files.values().map(Vec::len).sum();
    let url_total: usize = urls.values().map(Vec::len).sum();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "notes_dirs": config.notes_dirs,
                    "extensions": config.extensions,
                    "library": config.library,
                    "citekeys": citekeys.len(),
                    "file_resources": file_total,
                    "url_resources": url_total,
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", citekeys.len());
        }
        OutputFormat::Human => {
            println!("Margin Status");
            println!("=============");
            println!();
            println!("Notes:");
            for dir in &config.notes_dirs {
                println!("  Directory:  {}", dir.display());
            }
            println!("  Extensions: {}", config.extensions.join(", "));
            println!();
            println!("Library:");
            match &config.library {
                Some(path) => println!("  File:      {}", path.display()),
                None => println!("  File:      (not set)"),
            }
            println!("  Citekeys:  {}", citekeys.len());
            println!(
                "  Resources: {} file(s), {} url(s)",
                file_total, url_total
            );
        }
    }

    Ok(())
}
