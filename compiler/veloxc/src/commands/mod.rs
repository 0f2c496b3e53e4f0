//! Command handlers for the Velox CLI.
//!
//! Each submodule implements one command. Shared helpers for reading
//! scripts and reporting diagnostics live here.

use std::io::IsTerminal;

use velox_diagnostic::{ColorMode, Diagnostic, TerminalEmitter};

mod debug;
mod run;

pub use debug::{lex_file, parse_file};
pub use run::{execute, parse_run_options, run_file, RunOptions};

/// Read a file from disk, exiting with a user-friendly error message on failure.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Write `diagnostic` to stderr, quoting lines of `source`.
pub(crate) fn report(diagnostic: &Diagnostic, source: &str) {
    let is_tty = std::io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::stderr(ColorMode::Auto, is_tty).with_source(source);
    if let Err(e) = emitter.emit(diagnostic).and_then(|()| emitter.flush()) {
        eprintln!("error: failed to write diagnostic: {e}");
    }
}
