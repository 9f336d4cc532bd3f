//! End-to-end execution of modules: values, output, control flow and
//! the error surface.

mod common;

use common::*;
use sona_ir::BinaryOp;
use sona_runtime::{Engine, RuntimeConfig, Session, Value};

fn run(stmts: Vec<sona_ir::Stmt>) -> Result<(Option<Value>, String), String> {
    let engine = Engine::new();
    let mut session = Session::new(&engine);
    let result = session.exec_module(&module(stmts))?;
    Ok((result.value, result.output))
}

#[test]
fn last_expression_is_the_result() {
    let (value, _) = run(vec![
        decl("x", int(40)),
        expr_stmt(binary(BinaryOp::Add, ident("x"), int(2))),
    ])
    .unwrap();
    assert_eq!(value, Some(Value::Int(42)));
}

#[test]
fn println_appends_to_output() {
    let (_, output) = run(vec![
        expr_stmt(call("println", vec![text("hello"), int(7)])),
        expr_stmt(call("print", vec![text("done")])),
    ])
    .unwrap();
    assert_eq!(output, "hello 7\ndone");
}

#[test]
fn while_loop_with_break_and_continue() {
    // Sum odd numbers below 10, stopping at 7.
    let (value, _) = run(vec![
        decl("sum", int(0)),
        decl("i", int(0)),
        while_stmt(
            binary(BinaryOp::Lt, ident("i"), int(10)),
            vec![
                assign("i", binary(BinaryOp::Add, ident("i"), int(1))),
                if_stmt(
                    binary(
                        BinaryOp::Eq,
                        binary(BinaryOp::Mod, ident("i"), int(2)),
                        int(0),
                    ),
                    vec![sona_ir::Stmt::Continue],
                    None,
                ),
                if_stmt(
                    binary(BinaryOp::Gt, ident("i"), int(7)),
                    vec![sona_ir::Stmt::Break],
                    None,
                ),
                assign("sum", binary(BinaryOp::Add, ident("sum"), ident("i"))),
            ],
        ),
        expr_stmt(ident("sum")),
    ])
    .unwrap();
    // 1 + 3 + 5 + 7
    assert_eq!(value, Some(Value::Int(16)));
}

#[test]
fn recursion_works_and_is_bounded() {
    let fib = func(
        "fib",
        &["n"],
        vec![
            if_stmt(
                binary(BinaryOp::Lt, ident("n"), int(2)),
                vec![ret(ident("n"))],
                None,
            ),
            ret(binary(
                BinaryOp::Add,
                call("fib", vec![binary(BinaryOp::Sub, ident("n"), int(1))]),
                call("fib", vec![binary(BinaryOp::Sub, ident("n"), int(2))]),
            )),
        ],
    );
    let (value, _) = run(vec![fib.clone(), expr_stmt(call("fib", vec![int(10)]))]).unwrap();
    assert_eq!(value, Some(Value::Int(55)));

    let engine = Engine::new();
    let mut session = Session::with_config(
        &engine,
        &sona_runtime::builtins_registry::BuiltinRegistry::with_std(),
        RuntimeConfig {
            max_call_depth: 8,
            ..RuntimeConfig::default()
        },
    );
    let err = session
        .exec_module(&module(vec![fib, expr_stmt(call("fib", vec![int(100)]))]))
        .unwrap_err();
    assert_eq!(err, "Recursion limit exceeded");
}

#[test]
fn integer_overflow_promotes_and_normalizes_back() {
    let (value, _) = run(vec![expr_stmt(binary(
        BinaryOp::Sub,
        binary(BinaryOp::Add, int(i64::MAX), int(1)),
        int(1),
    ))])
    .unwrap();
    // Through a big intermediate and back down to a machine integer.
    assert_eq!(value, Some(Value::Int(i64::MAX)));

    let (value, _) = run(vec![expr_stmt(binary(
        BinaryOp::Mul,
        int(i64::MAX),
        int(2),
    ))])
    .unwrap();
    match value {
        Some(Value::Big(_)) => {}
        other => panic!("expected a big integer, got {:?}", other),
    }
}

#[test]
fn division_by_zero_is_an_error() {
    let err = run(vec![expr_stmt(binary(BinaryOp::Div, int(1), int(0)))]).unwrap_err();
    assert_eq!(err, "Division by zero");
}

#[test]
fn plus_concatenates_text() {
    let (value, _) = run(vec![expr_stmt(binary(
        BinaryOp::Add,
        text("n = "),
        int(3),
    ))])
    .unwrap();
    assert_eq!(value, Some(Value::str("n = 3")));
}

#[test]
fn type_mismatch_reports_both_sides() {
    let err = run(vec![expr_stmt(binary(
        BinaryOp::Sub,
        text("a"),
        int(1),
    ))])
    .unwrap_err();
    assert_eq!(err, "Type mismatch: '-' is not defined for text and int");
}

#[test]
fn strict_vars_rejects_assignment_to_unbound_names() {
    let err = run(vec![assign("ghost", int(1))]).unwrap_err();
    assert_eq!(err, "Undefined identifier: ghost");
}

#[test]
fn missing_arguments_bind_null_and_extras_are_ignored() {
    let (value, _) = run(vec![
        func(
            "second_is_null",
            &["a", "b"],
            vec![ret(call("is_null", vec![ident("b")]))],
        ),
        expr_stmt(call("second_is_null", vec![int(1)])),
    ])
    .unwrap();
    assert_eq!(value, Some(Value::Bool(true)));

    let (value, _) = run(vec![
        func("first", &["a"], vec![ret(ident("a"))]),
        expr_stmt(call("first", vec![int(1), int(2), int(3)])),
    ])
    .unwrap();
    assert_eq!(value, Some(Value::Int(1)));
}

#[test]
fn function_locals_do_not_leak_into_callers() {
    let err = run(vec![
        func(
            "leaky",
            &[],
            vec![decl("local", int(1)), ret(int(0))],
        ),
        expr_stmt(call("leaky", vec![])),
        expr_stmt(ident("local")),
    ])
    .unwrap_err();
    assert_eq!(err, "Undefined identifier: local");
}

#[test]
fn functions_see_globals_but_not_caller_locals() {
    let (value, _) = run(vec![
        decl("g", int(10)),
        func("read_g", &[], vec![ret(ident("g"))]),
        func(
            "outer",
            &[],
            vec![decl("hidden", int(99)), ret(call("inner", vec![]))],
        ),
        func("inner", &[], vec![ret(ident("hidden"))]),
        expr_stmt(call("read_g", vec![])),
    ])
    .unwrap();
    assert_eq!(value, Some(Value::Int(10)));

    let err = run(vec![
        func(
            "outer",
            &[],
            vec![decl("hidden", int(99)), ret(call("inner", vec![]))],
        ),
        func("inner", &[], vec![ret(ident("hidden"))]),
        expr_stmt(call("outer", vec![])),
    ])
    .unwrap_err();
    assert_eq!(err, "Undefined identifier: hidden");
}

#[test]
fn top_level_break_is_rejected() {
    let err = run(vec![sona_ir::Stmt::Break]).unwrap_err();
    assert_eq!(err, "Break or continue is not allowed at top level");
}

#[test]
fn conditions_must_be_boolean() {
    let err = run(vec![if_stmt(int(1), vec![], None)]).unwrap_err();
    assert_eq!(err, "Condition must be of type bool, but got int");
}

#[test]
fn builtin_arity_is_checked() {
    let err = run(vec![expr_stmt(call("type_of", vec![]))]).unwrap_err();
    assert_eq!(
        err,
        "Argument count mismatch for 'type_of': expected 1 but got 0"
    );
}

#[test]
fn object_builtins_round_out_the_model() {
    let (value, output) = run(vec![
        decl("o", call("new", vec![])),
        assign_member(member(ident("o"), "name"), text("sona")),
        expr_stmt(call(
            "println",
            vec![
                call("type_of", vec![ident("o")]),
                call("has_property", vec![ident("o"), text("name")]),
            ],
        )),
        expr_stmt(call(
            "remove_property",
            vec![ident("o"), text("name")],
        )),
        expr_stmt(call("has_property", vec![ident("o"), text("name")])),
    ])
    .unwrap();
    assert_eq!(output, "object true\n");
    assert_eq!(value, Some(Value::Bool(false)));
}

#[test]
fn min_max_and_abs() {
    let (value, _) = run(vec![expr_stmt(call(
        "min",
        vec![int(3), int(-2), int(7)],
    ))])
    .unwrap();
    assert_eq!(value, Some(Value::Int(-2)));

    let (value, _) = run(vec![expr_stmt(call("max", vec![int(3), int(7)]))]).unwrap();
    assert_eq!(value, Some(Value::Int(7)));

    let (value, _) = run(vec![expr_stmt(call("abs", vec![int(-5)]))]).unwrap();
    assert_eq!(value, Some(Value::Int(5)));

    let (value, _) = run(vec![expr_stmt(call("abs", vec![int(i64::MIN)]))]).unwrap();
    match value {
        Some(Value::Big(_)) => {}
        other => panic!("expected a big integer, got {:?}", other),
    }
}

#[test]
fn short_circuit_skips_the_right_operand() {
    // The right side would be a division by zero if evaluated.
    let (value, _) = run(vec![expr_stmt(binary(
        BinaryOp::And,
        sona_ir::Expr::Bool(false),
        binary(
            BinaryOp::Eq,
            binary(BinaryOp::Div, int(1), int(0)),
            int(0),
        ),
    ))])
    .unwrap();
    assert_eq!(value, Some(Value::Bool(false)));
}
