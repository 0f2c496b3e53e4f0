use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;
use velox_ir::SharedInterner;
use velox_parse::SourceLoader;

use super::Harness;
use crate::{buffer_handler, silent_handler, EvalErrorKind, Item, ItemState, ScriptContext};

#[test]
fn one_program_many_contexts() {
    let interner = SharedInterner::default();
    let program =
        velox_parse::parse_source("counter = 1; print(counter);", &interner, None).unwrap();

    let out_a = buffer_handler();
    let out_b = buffer_handler();
    let mut a = ScriptContext::builder(interner.clone())
        .print_handler(out_a.clone())
        .build();
    let mut b = ScriptContext::builder(interner)
        .print_handler(out_b.clone())
        .build();

    a.run(&program).unwrap();
    b.run(&program).unwrap();
    a.global("counter").unwrap().set(ItemState::Integer(5));

    assert_eq!(b.global("counter").unwrap().to_integer().unwrap(), 1);
    assert_eq!(out_a.get_output(), "1\n");
    assert_eq!(out_b.get_output(), "1\n");
}

#[test]
fn one_program_on_many_threads() {
    let interner = SharedInterner::default();
    let program = velox_parse::parse_source(
        "function fib(n) {
             if (n < 2) return n;
             return fib(n - 1) + fib(n - 2);
         }
         print(fib(15));",
        &interner,
        None,
    )
    .unwrap();

    let outputs: Vec<String> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let program = &program;
                scope.spawn(move || {
                    let output = buffer_handler();
                    let mut ctx = ScriptContext::builder(program.interner.clone())
                        .print_handler(output.clone())
                        .build();
                    ctx.run(program).unwrap();
                    output.get_output()
                })
            })
            .collect();
        workers
            .into_iter()
            .map(|worker| worker.join().unwrap())
            .collect()
    });

    assert_eq!(outputs, vec!["610\n".to_string(); 4]);
}

#[test]
fn host_natives() {
    let mut harness = Harness::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    harness.ctx.register_native("shout", &["text"], move |ctx| {
        let text = ctx.argument("text")?.to_string().to_uppercase();
        log.borrow_mut().push(text.clone());
        Ok(Item::from(text + "!"))
    });

    harness.run(r#"print(shout("hi"));"#).unwrap();

    assert_eq!(harness.output(), "HI!\n");
    assert_eq!(*seen.borrow(), vec!["HI".to_string()]);
}

#[test]
fn host_calls_script_functions() {
    let mut harness = Harness::new();
    harness
        .run(
            "function add(a, b = 10) { return a + b; }
             function fill(list) { append(list, 1); }",
        )
        .unwrap();

    let sum = harness.ctx.call("add", vec![Item::from(1i64)]).unwrap();
    assert_eq!(sum.to_integer().unwrap(), 11);

    let list = Item::list(Vec::new());
    harness.ctx.call("fill", vec![list.clone()]).unwrap();
    assert_eq!(list.as_list().unwrap().borrow().len(), 1);

    let print = harness.ctx.global("print").unwrap();
    harness
        .ctx
        .call_item(&print, vec![Item::from("direct")])
        .unwrap();
    assert_eq!(harness.output(), "direct\n");
}

#[test]
fn state_persists_across_runs() {
    let mut harness = Harness::new();
    harness.run("total = 1;").unwrap();
    let total = harness.run("total += 2; return total;").unwrap();
    assert_eq!(total.to_integer().unwrap(), 3);
}

#[test]
fn reset_forgets_script_definitions() {
    let mut harness = Harness::new();
    harness.run("x = 1; class C {}").unwrap();
    harness.ctx.reset();

    assert!(harness.ctx.global("x").is_none());
    let err = harness.run("c = new C();").unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::UnknownClass { .. }));
    harness.run("print(1);").unwrap();
    assert_eq!(harness.output(), "1\n");
}

#[test]
fn global_layers_hold_temporary_definitions() {
    let mut harness = Harness::new();
    harness.run("base = 1;").unwrap();

    harness.ctx.push_global_layer();
    harness.run("temp = 2; print(base + temp);").unwrap();
    harness.ctx.pop_global_layer();

    let err = harness.run("print(temp);").unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::UnknownIdentifier { .. }));
    assert_eq!(harness.output(), "3\n");
}

#[test]
fn silent_output() {
    let interner = SharedInterner::default();
    let program = velox_parse::parse_source(r#"print("x");"#, &interner, None).unwrap();
    let handler = silent_handler();
    let mut ctx = ScriptContext::builder(interner)
        .print_handler(handler.clone())
        .build();
    ctx.run(&program).unwrap();
    assert_eq!(handler.get_output(), "");
}

struct MemoryLoader(FxHashMap<&'static str, &'static str>);

impl SourceLoader for MemoryLoader {
    fn load(&self, path: &str) -> io::Result<String> {
        self.0
            .get(path)
            .map(|source| (*source).to_string())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
    }
}

#[test]
fn included_definitions_are_hoisted() {
    let mut files = FxHashMap::default();
    files.insert(
        "lib.vx",
        "function helper(n) { return n * 10; }
         loaded = true;",
    );
    let loader = MemoryLoader(files);

    let mut harness = Harness::new();
    let interner = harness.ctx.interner().clone();
    let program = velox_parse::parse_source(
        r#"print(helper(1));
           include "lib.vx";
           print(loaded);"#,
        &interner,
        Some(&loader),
    )
    .unwrap();
    harness.ctx.run(&program).unwrap();

    assert_eq!(harness.output(), "10\ntrue\n");
}
