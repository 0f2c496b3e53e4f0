//! Velox CLI
//!
//! Runs scripts and exposes the front end for debugging.

use veloxc::commands::{lex_file, parse_file, parse_run_options, run_file, RunOptions};

fn main() {
    veloxc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let (options, path) = match parse_run_options(&args[2..]) {
                Ok(parsed) => parsed,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    eprintln!("Usage: velox run <file.vx> [--max-depth=N] [--quiet]");
                    std::process::exit(1);
                }
            };
            let Some(path) = path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: velox run <file.vx> [--max-depth=N] [--quiet]");
                std::process::exit(1);
            };
            run_file(&path, &options);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: velox parse <file.vx>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: velox lex <file.vx>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("Velox {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // If it looks like a script, run it
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("vx"))
            {
                run_file(command, &RunOptions::default());
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("Velox script runner");
    println!();
    println!("Usage: velox <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.vx>        Run a script");
    println!("  parse <file.vx>      Parse and display a tree summary");
    println!("  lex <file.vx>        Tokenize and display tokens");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --max-depth=<n>      Call depth limit (default: 2048)");
    println!("  --quiet, -q          Discard print output");
    println!();
    println!("Examples:");
    println!("  velox run main.vx");
    println!("  velox main.vx");
    println!("  RUST_LOG=velox_eval=debug velox run main.vx");
}
