//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Result};

use margin_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load()?;

    match output.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        _ => {
            println!("Config file: {}", Config::config_file_path().display());
            println!();
            for dir in &config.notes_dirs {
                println!("notes_dir:  {}", dir.display());
            }
            match &config.library {
                Some(path) => println!("library:    {}", path.display()),
                None => println!("library:    (not set)"),
            }
            println!("extensions: {}", config.extensions.join(", "));
        }
    }
    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, output: &Output) -> Result<()> {
    let mut config = Config::load()?;

    match key.as_str() {
        "notes_dirs" => {
            config.notes_dirs = value.split(':').map(PathBuf::from).collect();
        }
        "library" => {
            config.library = if value.is_empty() {
                None
            } else {
                Some(PathBuf::from(value))
            };
        }
        "extensions" => {
            config.extensions = value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        _ => bail!(
            "Unknown configuration key: {} (notes_dirs, library, extensions)",
            key
        ),
    }

    config.save()?;
    output.success(&format!("Set {}", key));
    Ok(())
}
