//! Viewer and player collaborators
//!
//! Shell adapters: documents and media open through the desktop handler,
//! page and seek requests are reported on stdout, and a note's own location
//! opens in $EDITOR.

use std::env;
use std::path::Path;
use std::process::Command;

use tracing::info;

use margin_core::locator;
use margin_core::models::{Region, SourceHandle};
use margin_core::providers::{DocumentViewer, MediaPlayer, ProviderError, ProviderResult};

/// Opens documents with the desktop handler and reports page requests
pub struct ShellViewer;

impl DocumentViewer for ShellViewer {
    fn show_page(&self, file: &Path, page: u32, region: Option<&Region>) -> ProviderResult<()> {
        match region {
            Some(region) => println!("Opening {} at page {} {}", file.display(), page, region),
            None => println!("Opening {} at page {}", file.display(), page),
        }
        open::that(file).map_err(|err| ProviderError::Unavailable {
            collaborator: "document viewer",
            details: err.to_string(),
        })
    }

    fn show_location(&self, handle: &SourceHandle) -> ProviderResult<()> {
        let editor = find_editor()?;
        info!("Opening {}:{} in {}", handle.file.display(), handle.line, editor);
        let status = Command::new(&editor)
            .arg(format!("+{}", handle.line))
            .arg(&handle.file)
            .status()
            .map_err(|err| ProviderError::Unavailable {
                collaborator: "editor",
                details: err.to_string(),
            })?;
        if !status.success() {
            return Err(ProviderError::Unavailable {
                collaborator: "editor",
                details: format!("'{}' exited with {}", editor, status),
            });
        }
        Ok(())
    }
}

/// Opens media with the desktop handler and reports seek requests
pub struct ShellPlayer;

impl MediaPlayer for ShellPlayer {
    fn seek(&self, resource: &str, timestamp: &str) -> ProviderResult<()> {
        match locator::timestamp_seconds(timestamp) {
            Some(seconds) => println!("Opening {} at {} ({}s in)", resource, timestamp, seconds),
            None => println!("Opening {} at {}", resource, timestamp),
        }
        open::that(resource).map_err(|err| ProviderError::Unavailable {
            collaborator: "media player",
            details: err.to_string(),
        })
    }

    fn current_path(&self) -> ProviderResult<Option<String>> {
        // no live player integration; scripts can set MARGIN_MEDIA_PATH
        Ok(env::var("MARGIN_MEDIA_PATH").ok().filter(|p| !p.is_empty()))
    }
}

/// Find the user's preferred editor
fn find_editor() -> ProviderResult<String> {
    if let Ok(editor) = env::var("EDITOR") {
        if !editor.is_empty() {
            return Ok(editor);
        }
    }

    if let Ok(visual) = env::var("VISUAL") {
        if !visual.is_empty() {
            return Ok(visual);
        }
    }

    let common_editors = ["nano", "vim", "vi", "emacs"];
    for editor in common_editors {
        if command_exists(editor) {
            return Ok(editor.to_string());
        }
    }

    Err(ProviderError::Unavailable {
        collaborator: "editor",
        details: "set $EDITOR to choose one".to_string(),
    })
}

/// Check if a command exists in PATH
fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_editor_does_not_panic() {
        // depends on the environment, just verify it returns
        let _ = find_editor();
    }

    #[test]
    fn test_command_exists() {
        #[cfg(unix)]
        assert!(command_exists("ls"));

        assert!(!command_exists("definitely_not_a_real_command_12345"));
    }
}
