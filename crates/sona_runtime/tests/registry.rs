//! Function registry behavior: handle identity, redefinition and
//! idempotent batch registration.

mod common;

use common::*;
use sona_runtime::{Engine, Session, Value};

#[test]
fn calling_an_undefined_function_reports_it() {
    let engine = Engine::new();
    let mut session = Session::new(&engine);
    let module = module(vec![expr_stmt(call("missing", vec![]))]);
    let err = session.exec_module(&module).unwrap_err();
    assert_eq!(err, "Undefined function: missing");
}

#[test]
fn handles_are_identity_stable_across_redefinition() {
    let engine = Engine::new();
    let mut session = Session::new(&engine);

    let first = module(vec![func("answer", &[], vec![ret(int(1))])]);
    session.exec_module(&first).unwrap();
    let handle = session.functions().get("answer").unwrap();
    assert_eq!(
        session.call_function(&handle, &[]).unwrap(),
        Value::Int(1)
    );

    // Redefine through a different module instance. The old handle
    // sees the new body.
    let second = module(vec![func("answer", &[], vec![ret(int(2))])]);
    session.exec_module(&second).unwrap();
    assert!(std::rc::Rc::ptr_eq(
        &handle,
        &session.functions().get("answer").unwrap()
    ));
    assert_eq!(
        session.call_function(&handle, &[]).unwrap(),
        Value::Int(2)
    );
}

#[test]
fn reexecuting_a_module_does_not_bump_versions() {
    let engine = Engine::new();
    let mut session = Session::new(&engine);

    let module = module(vec![func("f", &[], vec![ret(int(7))])]);
    session.exec_module(&module).unwrap();
    let handle = session.functions().get("f").unwrap();
    let version = handle.version();

    session.exec_module(&module).unwrap();
    session.exec_module(&module).unwrap();
    assert_eq!(handle.version(), version);
}

#[test]
fn redefinition_from_a_new_module_bumps_the_version() {
    let engine = Engine::new();
    let mut session = Session::new(&engine);

    session
        .exec_module(&module(vec![func("f", &[], vec![ret(int(1))])]))
        .unwrap();
    let handle = session.functions().get("f").unwrap();
    let version = handle.version();

    session
        .exec_module(&module(vec![func("f", &[], vec![ret(int(2))])]))
        .unwrap();
    assert_eq!(handle.version(), version + 1);
}

#[test]
fn forward_reference_resolves_once_defined() {
    let engine = Engine::new();
    let mut session = Session::new(&engine);

    // A call creates the handle before any definition exists.
    let err = session
        .exec_module(&module(vec![expr_stmt(call("later", vec![]))]))
        .unwrap_err();
    assert_eq!(err, "Undefined function: later");
    let handle = session.functions().get("later").unwrap();
    assert!(!handle.is_defined());

    session
        .exec_module(&module(vec![func("later", &[], vec![ret(int(42))])]))
        .unwrap();
    // Same handle, now defined.
    assert!(handle.is_defined());
    assert_eq!(
        session.call_function(&handle, &[]).unwrap(),
        Value::Int(42)
    );
}

#[test]
fn listing_is_sorted_by_name() {
    let engine = Engine::new();
    let mut session = Session::new(&engine);
    session
        .exec_module(&module(vec![
            func("zeta", &[], vec![]),
            func("alpha", &[], vec![]),
            func("mid", &[], vec![]),
        ]))
        .unwrap();

    let names: Vec<String> = session
        .functions()
        .list()
        .iter()
        .map(|f| f.name().to_string())
        .collect();
    let user: Vec<&String> = names
        .iter()
        .filter(|n| ["zeta", "alpha", "mid"].contains(&n.as_str()))
        .collect();
    assert_eq!(user, ["alpha", "mid", "zeta"]);
    // Builtins are interleaved in the same sorted order.
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn function_registries_are_per_session() {
    let engine = Engine::new();
    let mut a = Session::new(&engine);
    let b = Session::new(&engine);

    a.exec_module(&module(vec![func("only_in_a", &[], vec![ret(int(1))])]))
        .unwrap();
    assert!(a.functions().get("only_in_a").is_some());
    assert!(b.functions().get("only_in_a").is_none());
}
