//! End-to-end runs through the CLI library: files on disk, includes and
//! diagnostics.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use velox_diagnostic::ErrorCode;
use velox_eval::buffer_handler;
use veloxc::commands::{execute, RunOptions};
use veloxc::FileLoader;

#[test]
fn runs_with_includes_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("shapes.vx"),
        "class Square {
             function Square(side) { this.side = side; }
             function area() { return side * side; }
         }",
    )
    .unwrap();

    let loader = FileLoader::new(dir.path());
    let output = buffer_handler();
    let result = execute(
        r#"include "shapes.vx";
           s = new Square(3);
           print(s.area());
           return s.side;"#,
        &loader,
        &RunOptions::default(),
        output.clone(),
    )
    .unwrap();

    assert_eq!(output.get_output(), "9\n");
    assert_eq!(result.to_integer().unwrap(), 3);
}

#[test]
fn missing_include_is_a_parse_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let loader = FileLoader::new(dir.path());
    let diagnostic = execute(
        r#"include "missing.vx";"#,
        &loader,
        &RunOptions::default(),
        buffer_handler(),
    )
    .unwrap_err();
    assert!(diagnostic.code.is_parser_error());
}

#[test]
fn runtime_errors_become_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let loader = FileLoader::new(dir.path());
    let options = RunOptions {
        max_call_depth: 16,
        quiet: true,
    };
    let diagnostic = execute(
        "function spin() { spin(); }
         spin();",
        &loader,
        &options,
        buffer_handler(),
    )
    .unwrap_err();
    assert_eq!(diagnostic.code, ErrorCode::E2010);
    assert_eq!(diagnostic.labels[0].span.line, 1);
}
