use pretty_assertions::assert_eq;

use super::{output_of, result_of, Harness};

#[test]
fn while_with_break_and_continue() {
    let out = output_of(
        "i = 0;
         sum = 0;
         while (true) {
             i++;
             if (i % 2 == 0) continue;
             if (i > 7) break;
             sum += i;
         }
         print(sum);
         print(i);",
    );
    assert_eq!(out, "16\n9\n");
}

#[test]
fn for_loop_with_declared_counter() {
    let out = output_of(
        "sum = 0;
         for (var k = 0; k < 5; k++) sum += k;
         print(sum);",
    );
    assert_eq!(out, "10\n");
}

#[test]
fn for_loop_with_empty_clauses() {
    let out = output_of(
        "n = 0;
         for (;;) {
             n++;
             if (n == 4) break;
         }
         print(n);",
    );
    assert_eq!(out, "4\n");
}

#[test]
fn do_while_runs_body_first() {
    let out = output_of(
        "n = 0;
         do { n++; } while (false);
         print(n);
         do n += 10; while (n < 35);
         print(n);",
    );
    assert_eq!(out, "1\n41\n");
}

#[test]
fn loop_until_break() {
    let out = output_of(
        "n = 0;
         loop {
             n++;
             if (n == 3) break;
         }
         print(n);",
    );
    assert_eq!(out, "3\n");
}

#[test]
fn break_leaves_only_the_inner_loop() {
    let out = output_of(
        "count = 0;
         for (var i = 0; i < 3; i++) {
             for (var j = 0; j < 10; j++) {
                 if (j == 1) break;
                 count++;
             }
         }
         print(count);",
    );
    assert_eq!(out, "3\n");
}

#[test]
fn continue_in_for_still_runs_step() {
    let out = output_of(
        "n = 0;
         for (var i = 0; i < 10; i++) {
             if (i < 2) continue;
             n++;
         }
         print(n);",
    );
    assert_eq!(out, "8\n");
}

#[test]
fn statements_after_break_are_skipped() {
    let out = output_of(
        r#"loop {
               print("before");
               {
                   break;
                   print("nested");
               }
               print("after");
           }
           print("done");"#,
    );
    assert_eq!(out, "before\ndone\n");
}

#[test]
fn return_from_inside_a_loop() {
    let out = output_of(
        "function find(limit) {
             var i = 0;
             while (true) {
                 if (i * i > limit) return i;
                 i++;
             }
         }
         print(find(10));
         print(find(0));",
    );
    assert_eq!(out, "4\n1\n");
}

#[test]
fn if_else_chains() {
    let out = output_of(
        r#"function sign(n) {
               if (n < 0) return "neg";
               else if (n == 0) return "zero";
               else return "pos";
           }
           print(sign(-3));
           print(sign(0));
           print(sign(8));"#,
    );
    assert_eq!(out, "neg\nzero\npos\n");
}

#[test]
fn function_without_return_yields_undefined() {
    let out = output_of(
        "function noop() {}
         print(noop());",
    );
    assert_eq!(out, "undefined\n");
}

#[test]
fn top_level_return_stops_the_program() {
    let mut harness = Harness::new();
    let value = harness
        .run(
            "x = 1;
             if (x == 1) { return 2; }
             x = 3;",
        )
        .unwrap();
    assert_eq!(value.to_integer().unwrap(), 2);
    assert_eq!(harness.ctx.global("x").unwrap().to_integer().unwrap(), 1);
    assert!(harness.ctx.flags().is_empty());
}

#[test]
fn return_from_a_block() {
    assert_eq!(result_of("{ return 5; }").to_integer().unwrap(), 5);
    assert!(result_of("x = 1;").is_undefined());
}
