//! Debug commands: `parse` and `lex` for inspecting the front end.

use velox_ir::{SharedInterner, StmtKind};

use super::{read_file, report};

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    let interner = SharedInterner::default();
    let output = velox_lexer::lex(&content, &interner);

    println!("Tokens for '{}' ({} tokens):", path, output.tokens.len());
    for tok in output.tokens.iter() {
        println!("  {:?} @ {}", tok.kind, tok.span);
    }

    if output.has_errors() {
        println!();
        println!("Errors:");
        for error in &output.errors {
            println!("  {}: {}", error.span, error);
        }
    }
}

/// Parse a file and display a summary of the tree.
///
/// `include` is not followed; the parse reports it as an error instead.
pub fn parse_file(path: &str) {
    let content = read_file(path);
    let interner = SharedInterner::default();
    let program = match velox_parse::parse_source(&content, &interner, None) {
        Ok(program) => program,
        Err(e) => {
            report(&e.to_diagnostic(), &content);
            std::process::exit(1);
        }
    };

    println!("Parse result for '{path}':");
    println!("  Statements: {}", program.arena.stmt_count());
    println!("  Expressions: {}", program.arena.expr_count());
    println!("  Top level: {}", program.statements().len());

    let mut definitions = Vec::new();
    for &id in program.statements() {
        let stmt = program.arena.get_stmt(id);
        match stmt.kind {
            StmtKind::Function { name, params, .. } => {
                let params: Vec<_> = program
                    .arena
                    .get_params(params)
                    .iter()
                    .map(|p| interner.lookup(p.name))
                    .collect();
                definitions.push(format!(
                    "function {}({})",
                    interner.lookup(name),
                    params.join(", ")
                ));
            }
            StmtKind::Class { name, methods } => definitions.push(format!(
                "class {} ({} methods)",
                interner.lookup(name),
                program.arena.get_stmt_list(methods).len()
            )),
            StmtKind::Instant { name, .. } => {
                definitions.push(format!("instant {}", interner.lookup(name)));
            }
            _ => {}
        }
    }

    if !definitions.is_empty() {
        println!();
        println!("Definitions:");
        for definition in definitions {
            println!("  {definition}");
        }
    }
}
