//! Core parser tests: precedence, statement forms and structural errors.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use velox_diagnostic::ErrorCode;
use velox_ir::{
    AssignOp, BinaryOp, ExprId, ExprKind, SharedInterner, StmtKind, UnaryOp, UpdateOp,
};

use crate::{parse_source, ParseError, Program};

fn parse_ok(source: &str) -> Program {
    let interner = SharedInterner::new();
    parse_source(source, &interner, None).expect("parse failed")
}

fn parse_err(source: &str) -> ParseError {
    let interner = SharedInterner::new();
    parse_source(source, &interner, None).expect_err("parse should fail")
}

fn single_stmt(program: &Program) -> &StmtKind {
    let stmts = program.statements();
    assert_eq!(stmts.len(), 1);
    &program.arena.get_stmt(stmts[0]).kind
}

fn expr_kind(program: &Program, id: ExprId) -> &ExprKind {
    &program.arena.get_expr(id).kind
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let program = parse_ok("x = 2 + 3 * 4;");
    let StmtKind::Assign { op, value, .. } = single_stmt(&program) else {
        panic!("expected assignment");
    };
    assert_eq!(*op, AssignOp::Assign);
    let ExprKind::Binary {
        op: BinaryOp::Add,
        left,
        right,
    } = expr_kind(&program, *value)
    else {
        panic!("expected addition at the root");
    };
    assert_eq!(expr_kind(&program, *left), &ExprKind::Int(2));
    assert!(matches!(
        expr_kind(&program, *right),
        ExprKind::Binary {
            op: BinaryOp::Mul,
            ..
        }
    ));
}

#[test]
fn logical_operators_share_one_left_associative_level() {
    let program = parse_ok("a || b && c;");
    let StmtKind::Expr(root) = single_stmt(&program) else {
        panic!("expected expression statement");
    };
    let ExprKind::Binary {
        op: BinaryOp::And,
        left,
        ..
    } = expr_kind(&program, *root)
    else {
        panic!("expected && at the root");
    };
    assert!(matches!(
        expr_kind(&program, *left),
        ExprKind::Binary {
            op: BinaryOp::Or,
            ..
        }
    ));
}

#[test]
fn relational_operators_do_not_chain() {
    let err = parse_err("x = a < b < c;");
    assert_eq!(err.code, ErrorCode::E1001);
    assert!(err.message.contains("cannot be chained"));
}

#[test]
fn postfix_chain_and_updates() {
    let program = parse_ok("a.b[1]++;\nf(1)(2).c;");
    let stmts = program.statements();
    let StmtKind::Expr(root) = program.arena.get_stmt(stmts[0]).kind else {
        panic!("expected expression statement");
    };
    let ExprKind::Update {
        op: UpdateOp::Increment,
        target,
        postfix: true,
    } = expr_kind(&program, root)
    else {
        panic!("expected postfix increment");
    };
    let ExprKind::Index { receiver, .. } = expr_kind(&program, *target) else {
        panic!("expected index target");
    };
    assert!(matches!(expr_kind(&program, *receiver), ExprKind::Member { .. }));

    let StmtKind::Expr(root) = program.arena.get_stmt(stmts[1]).kind else {
        panic!("expected expression statement");
    };
    let ExprKind::Member { receiver, .. } = expr_kind(&program, root) else {
        panic!("expected member access");
    };
    assert!(matches!(expr_kind(&program, *receiver), ExprKind::Call { .. }));
}

#[test]
fn update_of_non_location_is_rejected() {
    let err = parse_err("f()++;");
    assert_eq!(err.code, ErrorCode::E1005);
    assert_eq!(err.message, "lvalue required");

    let err = parse_err("--3;");
    assert_eq!(err.code, ErrorCode::E1005);
}

#[test]
fn unary_operators_nest() {
    let program = parse_ok("x = -!y;");
    let StmtKind::Assign { value, .. } = single_stmt(&program) else {
        panic!("expected assignment");
    };
    let ExprKind::Unary {
        op: UnaryOp::Neg,
        operand,
    } = expr_kind(&program, *value)
    else {
        panic!("expected negation");
    };
    assert!(matches!(
        expr_kind(&program, *operand),
        ExprKind::Unary {
            op: UnaryOp::Not,
            ..
        }
    ));
}

#[test]
fn literal_forms() {
    let program = parse_ok("l = [1, 2.5, \"s\", true, undefined, <1, 2>, |255, 0, 0|, |0xff00ff|];");
    let StmtKind::Assign { value, .. } = single_stmt(&program) else {
        panic!("expected assignment");
    };
    let ExprKind::List(range) = expr_kind(&program, *value) else {
        panic!("expected list literal");
    };
    let elements = program.arena.get_expr_list(*range);
    assert_eq!(elements.len(), 8);
    assert_eq!(expr_kind(&program, elements[1]), &ExprKind::Real(2.5f64.to_bits()));
    assert!(matches!(expr_kind(&program, elements[5]), ExprKind::Vector { .. }));
    let ExprKind::Color(components) = expr_kind(&program, elements[6]) else {
        panic!("expected color literal");
    };
    assert_eq!(components.len(), 3);
    let ExprKind::Color(packed) = expr_kind(&program, elements[7]) else {
        panic!("expected packed color literal");
    };
    assert_eq!(packed.len(), 1);
}

#[test]
fn vector_components_may_use_additive_expressions() {
    let program = parse_ok("v = <a + 1, b * 2>;");
    let StmtKind::Assign { value, .. } = single_stmt(&program) else {
        panic!("expected assignment");
    };
    assert!(matches!(expr_kind(&program, *value), ExprKind::Vector { .. }));
}

#[test]
fn color_component_count_is_checked() {
    let err = parse_err("c = |1, 2|;");
    assert!(err.message.contains("1, 3 or 4 components"));
}

#[test]
fn assignment_requires_location() {
    let err = parse_err("x = 1;\n1 + 2 = 3;");
    assert_eq!(err.code, ErrorCode::E1005);
    assert_eq!(err.line(), 2);
    assert_eq!(err.to_string(), "line 2: lvalue required");
}

#[test]
fn compound_assignment_operators() {
    for (src, expected) in [
        ("x += 1;", AssignOp::Add),
        ("x -= 1;", AssignOp::Sub),
        ("x *= 1;", AssignOp::Mul),
        ("x /= 1;", AssignOp::Div),
        ("x %= 1;", AssignOp::Mod),
    ] {
        let program = parse_ok(src);
        let StmtKind::Assign { op, .. } = single_stmt(&program) else {
            panic!("expected assignment for {src}");
        };
        assert_eq!(*op, expected, "{src}");
    }
}

#[test]
fn missing_delimiters_report_line() {
    let err = parse_err("if (x {\n}");
    assert_eq!(err.code, ErrorCode::E1003);
    assert_eq!(err.line(), 1);

    let err = parse_err("function f() {\n  return 1;\n");
    assert_eq!(err.code, ErrorCode::E1003);
    assert_eq!(err.line(), 3);

    let err = parse_err("x = 1\ny = 2;");
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(err.line(), 2);
}

#[test]
fn unknown_statement_start() {
    let err = parse_err(") x;");
    assert_eq!(err.code, ErrorCode::E1002);
}

#[test]
fn lexer_errors_surface_as_parse_errors() {
    let err = parse_err("x = 1;\ny = #;");
    assert_eq!(err.code, ErrorCode::E0002);
    assert_eq!(err.line(), 2);
}

#[test]
fn control_statements() {
    let program = parse_ok(
        "while (i < 3) { if (i == 1) break; else continue; }
         do { i--; } while (i > 0);
         for (var i = 0; i < 3; i++) ;
         for (;;) { break; }
         loop { return; }",
    );
    let kinds: Vec<&StmtKind> = program
        .statements()
        .iter()
        .map(|&id| &program.arena.get_stmt(id).kind)
        .collect();
    assert!(matches!(kinds[0], StmtKind::While { .. }));
    assert!(matches!(kinds[1], StmtKind::DoWhile { .. }));
    let StmtKind::For {
        init: Some(init),
        cond: Some(_),
        step: Some(_),
        ..
    } = kinds[2]
    else {
        panic!("expected full for header");
    };
    assert!(matches!(
        program.arena.get_stmt(*init).kind,
        StmtKind::Var { init: Some(_), .. }
    ));
    assert!(matches!(
        kinds[3],
        StmtKind::For {
            init: None,
            cond: None,
            step: None,
            ..
        }
    ));
    assert!(matches!(kinds[4], StmtKind::Loop { .. }));
}

#[test]
fn break_outside_loop_is_rejected() {
    let err = parse_err("break;");
    assert_eq!(err.code, ErrorCode::E1008);

    // A function body resets loop nesting.
    let err = parse_err("while (true) { function f() { continue; } }");
    assert_eq!(err.code, ErrorCode::E1008);
    assert_eq!(err.message, "`continue` outside of a loop");
}

#[test]
fn function_definition_with_defaults() {
    let program = parse_ok("function f(a, b = 5) { return a + b; }");
    let StmtKind::Function { params, body, .. } = single_stmt(&program) else {
        panic!("expected function");
    };
    let params = program.arena.get_params(*params);
    assert_eq!(params.len(), 2);
    assert!(params[0].default.is_none());
    assert!(params[1].default.is_some());
    assert!(matches!(
        program.arena.get_stmt(*body).kind,
        StmtKind::Sequence(_)
    ));
}

#[test]
fn duplicate_parameter_is_rejected() {
    let err = parse_err("function f(a, a) { }");
    assert_eq!(err.code, ErrorCode::E1007);
    assert_eq!(err.message, "duplicate parameter `a`");
}

#[test]
fn class_members_must_be_functions() {
    let program = parse_ok("class C { function C(v) { this.v = v; } function get() { return this.v; } }");
    let StmtKind::Class { methods, .. } = single_stmt(&program) else {
        panic!("expected class");
    };
    assert_eq!(methods.len(), 2);

    let err = parse_err("class C { x = 1; }");
    assert_eq!(err.code, ErrorCode::E1011);
    assert_eq!(err.context.as_deref(), Some("while parsing class `C`"));
}

#[test]
fn ambiguous_function_names_are_rejected() {
    let err = parse_err("class C {\n function f() {}\n function f() {}\n}");
    assert_eq!(err.code, ErrorCode::E1006);
    assert_eq!(err.line(), 3);

    let err = parse_err("instant I { function g() {} function g() {} }");
    assert_eq!(err.code, ErrorCode::E1006);
}

#[test]
fn realization_needs_block_lookahead() {
    let program = parse_ok("obj { x = 1; function f() { return x; } }\nobj.x = 2;");
    let stmts = program.statements();
    assert_eq!(stmts.len(), 2);
    let StmtKind::Realize { body, .. } = program.arena.get_stmt(stmts[0]).kind else {
        panic!("expected realization");
    };
    assert_eq!(body.len(), 2);
    assert!(matches!(
        program.arena.get_stmt(stmts[1]).kind,
        StmtKind::Assign { .. }
    ));
}

#[test]
fn instant_and_global_and_var() {
    let program = parse_ok("instant Counter { n = 0; function inc() { n++; } }\nglobal g;\nvar v = 3;");
    let kinds: Vec<&StmtKind> = program
        .statements()
        .iter()
        .map(|&id| &program.arena.get_stmt(id).kind)
        .collect();
    assert!(matches!(kinds[0], StmtKind::Instant { .. }));
    assert!(matches!(kinds[1], StmtKind::Global(_)));
    assert!(matches!(kinds[2], StmtKind::Var { init: Some(_), .. }));
}

#[test]
fn statement_lines_are_recorded() {
    let program = parse_ok("a = 1;\n\nb = 2;\n");
    let lines: Vec<u32> = program
        .statements()
        .iter()
        .map(|&id| program.arena.get_stmt(id).span.line)
        .collect();
    assert_eq!(lines, vec![1, 3]);
}

#[test]
fn deep_nesting_does_not_overflow() {
    let depth = 5_000;
    let source = format!("x = {}1{};", "(".repeat(depth), ")".repeat(depth));
    let program = parse_ok(&source);
    assert_eq!(program.statements().len(), 1);
}

#[test]
fn program_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Program>();
}
