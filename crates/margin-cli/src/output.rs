//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use margin_core::{Container, NoteView, Resource};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if we should prompt for missing information
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print a container's notes
    pub fn print_container(&self, container: &Container) {
        match self.format {
            OutputFormat::Human => {
                if container.is_empty() {
                    println!("No notes found for {}.", container.key());
                    return;
                }
                let kind = container
                    .kind()
                    .map(|k| k.to_string())
                    .unwrap_or_else(|| "empty".to_string());
                println!("Notes for {} ({})", container.key(), kind);
                println!();
                for (i, note) in container.notes().iter().enumerate() {
                    println!(
                        "{:>4}. {:<20} {}:{}",
                        i + 1,
                        note.annotation.to_string(),
                        note.file.display(),
                        note.line
                    );
                }
                println!();
                println!("{} note(s)", container.note_count());
                if !container.resources().is_empty() {
                    let resources: Vec<String> = container
                        .resources()
                        .iter()
                        .map(Resource::to_string)
                        .collect();
                    println!("Resources: {}", resources.join(", "));
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(container).unwrap());
            }
            OutputFormat::Quiet => {
                for note in container.notes() {
                    println!("{}:{}", note.file.display(), note.line);
                }
            }
        }
    }

    /// Print the active note with its position
    pub fn print_note_view(&self, view: &NoteView<'_>) {
        match self.format {
            OutputFormat::Human => {
                println!(
                    "[{}/{}] {}  {}:{}",
                    view.ordinal,
                    view.total,
                    view.note.annotation,
                    view.note.file.display(),
                    view.note.line
                );
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "ordinal": view.ordinal,
                        "total": view.total,
                        "note": view.note,
                    })
                );
            }
            OutputFormat::Quiet => {
                println!("{}:{}", view.note.file.display(), view.note.line);
            }
        }
    }

    /// Print the resources known for a citekey
    pub fn print_resources(&self, citekey: &str, resources: &[Resource]) {
        match self.format {
            OutputFormat::Human => {
                if resources.is_empty() {
                    println!("No resources found for {}.", citekey);
                    return;
                }
                for resource in resources {
                    println!("{}", resource);
                }
                println!("\n{} resource(s)", resources.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(resources).unwrap());
            }
            OutputFormat::Quiet => {
                for resource in resources {
                    println!("{}", resource);
                }
            }
        }
    }

    /// Print a resolved resource → citekey association
    pub fn print_resolved(&self, resource: &str, citekey: &str) {
        match self.format {
            OutputFormat::Human => println!("{} is cited as {}", resource, citekey),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({ "resource": resource, "citekey": citekey })
                );
            }
            OutputFormat::Quiet => println!("{}", citekey),
        }
    }

    /// Print a generated annotation string
    pub fn print_annotation(&self, annotation: &str) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "annotation": annotation }));
            }
            _ => println!("{}", annotation),
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_should_prompt_only_in_human_mode() {
        assert!(Output::new(OutputFormat::Human).should_prompt());
        assert!(!Output::new(OutputFormat::Json).should_prompt());
        assert!(!Output::new(OutputFormat::Quiet).should_prompt());
    }
}
