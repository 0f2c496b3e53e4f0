//! The `run` command: parse and execute a Velox script.

use std::path::Path;

use tracing::debug;
use velox_diagnostic::Diagnostic;
use velox_eval::{
    silent_handler, stdout_handler, Item, ScriptContext, SharedPrintHandler,
    DEFAULT_MAX_CALL_DEPTH,
};
use velox_ir::SharedInterner;
use velox_parse::SourceLoader;

use super::{read_file, report};
use crate::FileLoader;

/// Options accepted by `velox run`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Maximum number of nested calls before the script is aborted.
    pub max_call_depth: usize,
    /// Discard `print` output.
    pub quiet: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            quiet: false,
        }
    }
}

/// Split `velox run` arguments into options and the script path.
pub fn parse_run_options(args: &[String]) -> Result<(RunOptions, Option<String>), String> {
    let mut options = RunOptions::default();
    let mut path = None;
    for arg in args {
        if let Some(depth) = arg.strip_prefix("--max-depth=") {
            options.max_call_depth = depth
                .parse()
                .map_err(|_| format!("invalid call depth '{depth}'"))?;
        } else if arg == "--quiet" || arg == "-q" {
            options.quiet = true;
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        } else if path.is_none() {
            path = Some(arg.clone());
        } else {
            return Err(format!("unexpected argument '{arg}'"));
        }
    }
    Ok((options, path))
}

/// Parse and run `source` in a fresh context.
///
/// Returns the value of a top-level `return`, or the diagnostic for the
/// first parse or run-time error.
pub fn execute(
    source: &str,
    loader: &dyn SourceLoader,
    options: &RunOptions,
    output: SharedPrintHandler,
) -> Result<Item, Diagnostic> {
    let interner = SharedInterner::default();
    let program = velox_parse::parse_source(source, &interner, Some(loader))
        .map_err(|e| e.to_diagnostic())?;
    debug!(statements = program.statements().len(), "parsed script");

    let mut ctx = ScriptContext::builder(interner)
        .max_call_depth(options.max_call_depth)
        .print_handler(output)
        .build();
    ctx.run(&program).map_err(|e| e.to_diagnostic())
}

/// Run a script file, exiting with status 1 on failure.
pub fn run_file(path: &str, options: &RunOptions) {
    let source = read_file(path);
    let loader = FileLoader::for_script(Path::new(path));
    let output = if options.quiet {
        silent_handler()
    } else {
        stdout_handler()
    };
    if let Err(diagnostic) = execute(&source, &loader, options, output) {
        report(&diagnostic, &source);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn options_and_path() {
        let (options, path) =
            parse_run_options(&args(&["--max-depth=64", "main.vx", "-q"])).unwrap();
        assert_eq!(
            options,
            RunOptions {
                max_call_depth: 64,
                quiet: true,
            }
        );
        assert_eq!(path.as_deref(), Some("main.vx"));
    }

    #[test]
    fn defaults() {
        let (options, path) = parse_run_options(&[]).unwrap();
        assert_eq!(options, RunOptions::default());
        assert!(path.is_none());
    }

    #[test]
    fn bad_options() {
        assert_eq!(
            parse_run_options(&args(&["--max-depth=lots"])).unwrap_err(),
            "invalid call depth 'lots'"
        );
        assert!(parse_run_options(&args(&["--fast"])).is_err());
        assert!(parse_run_options(&args(&["a.vx", "b.vx"])).is_err());
    }
}
