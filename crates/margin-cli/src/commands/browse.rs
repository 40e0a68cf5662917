//! Interactive note navigation
//!
//! A prompt loop over the navigation state machine. An empty line advances
//! to the next note, so holding Enter walks the container.

use std::io::{self, Write};

use anyhow::Result;

use margin_core::{perform_jump, Config, Direction, DocumentViewer, Session};

use crate::output::Output;
use crate::providers::{GrepSearch, TomlLibrary};
use crate::viewer::{ShellPlayer, ShellViewer};

/// Browse a citekey's notes interactively
pub fn run(config: &Config, citekey: &str, output: &Output) -> Result<()> {
    let search = GrepSearch::new(config.extensions.clone());
    let library = TomlLibrary::new(config.library.clone());
    let viewer = ShellViewer;
    let player = ShellPlayer;

    let mut session = Session::with_config(config.clone());
    let container = session.load_citekey(citekey, &search, &library)?;
    if container.is_empty() {
        output.message(&format!("No notes found for {}", citekey));
        return Ok(());
    }
    output.message(&format!(
        "{} note(s) for {}",
        container.note_count(),
        citekey
    ));
    print_help();

    loop {
        print!("margin> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let input = input.trim();

        if let Some(pattern) = input.strip_prefix('/') {
            let pattern = pattern.trim();
            if pattern.is_empty() {
                println!("Usage: /<pattern>");
                continue;
            }
            match session.refine(pattern, &search)? {
                Some(container) => {
                    println!("{} match(es) for '{}'", container.note_count(), pattern)
                }
                None => println!("Nothing to search within."),
            }
            continue;
        }

        let direction = match input {
            "n" | "next" | "" => Direction::Next,
            "p" | "prev" | "previous" => Direction::Previous,
            "f" | "first" => Direction::First,
            "l" | "last" => Direction::Last,
            "j" | "jump" => {
                match session.jump() {
                    Some(target) => {
                        if let Err(err) = perform_jump(&target, &viewer, &player) {
                            eprintln!("Jump failed: {}", err);
                        }
                    }
                    None => println!("Nothing to jump to."),
                }
                continue;
            }
            "o" | "open" => {
                match session.active_container().and_then(|c| c.active_note()) {
                    Some(note) => {
                        if let Err(err) = viewer.show_location(&note.handle) {
                            eprintln!("Could not open note: {}", err);
                        }
                    }
                    None => println!("No active note."),
                }
                continue;
            }
            "r" | "reload" => {
                match session.reload(&search, &library)? {
                    Some(container) => println!("Reloaded: {} note(s)", container.note_count()),
                    None => println!("Nothing to reload."),
                }
                continue;
            }
            "h" | "?" | "help" => {
                print_help();
                continue;
            }
            "q" | "quit" => break,
            other => {
                println!("Unknown command: {} (try 'h')", other);
                continue;
            }
        };

        match session.advance(direction) {
            Some(view) => output.print_note_view(&view),
            None => println!("No notes to navigate."),
        }
    }

    Ok(())
}

fn print_help() {
    println!("  n/p    next/previous note     f/l  first/last note");
    println!("  j      jump to the resource   o    open the note itself");
    println!("  /pat   search within notes    r    reload");
    println!("  h      help                   q    quit");
}
