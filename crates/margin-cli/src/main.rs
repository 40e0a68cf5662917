//! Margin CLI
//!
//! Command-line interface for margin - citation-anchored note navigation.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use margin_core::Config;

mod commands;
mod output;
mod providers;
mod viewer;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "margin")]
#[command(about = "Margin - navigate citation-anchored notes")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the notes indexed for a citekey
    Notes {
        /// Citekey to load annotations for
        citekey: String,
    },
    /// Build an ad-hoc note container from a search pattern
    Search {
        /// Regular expression searched across the note directories
        pattern: String,
    },
    /// Resolve the citekey associated with a file or URL
    Resolve {
        /// File path or URL
        resource: String,
    },
    /// List the resources associated with a citekey
    Resources {
        /// Citekey to look up
        citekey: String,
    },
    /// Browse a citekey's notes interactively
    Browse {
        /// Citekey to load annotations for
        citekey: String,
    },
    /// Produce an annotation string ready to paste into a note file
    Annotate {
        /// Citekey the annotation refers to
        citekey: String,
        /// Page number for a document annotation
        #[arg(long, conflicts_with = "timestamp")]
        page: Option<u32>,
        /// Coordinate region, e.g. "3.4 5.6"
        #[arg(long, requires = "page")]
        region: Option<String>,
        /// Link label for a region annotation
        #[arg(long, requires = "region")]
        label: Option<String>,
        /// Timestamp for a media annotation (H:MM or H:MM:SS)
        #[arg(long)]
        timestamp: Option<String>,
        /// Media resource (defaults to the currently playing one)
        #[arg(long, requires = "timestamp")]
        resource: Option<String>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show configuration and library status
    Status,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (notes_dirs, library, extensions)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands work without a loaded configuration
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), &output);
    }

    let config = Config::load()?;

    match cli.command {
        Commands::Notes { citekey } => commands::notes::run(&config, &citekey, &output),
        Commands::Search { pattern } => commands::search::run(&config, &pattern, &output),
        Commands::Resolve { resource } => commands::resolve::run(&config, &resource, &output),
        Commands::Resources { citekey } => commands::resolve::resources(&config, &citekey, &output),
        Commands::Browse { citekey } => commands::browse::run(&config, &citekey, &output),
        Commands::Annotate {
            citekey,
            page,
            region,
            label,
            timestamp,
            resource,
        } => commands::annotate::run(&citekey, page, region, label, timestamp, resource, &output),
        Commands::Config { .. } => unreachable!(), // handled above
        Commands::Status => commands::status::show(&config, &output),
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}
