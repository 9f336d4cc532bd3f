//! AST construction helpers shared by the integration tests.

#![allow(dead_code)]

use std::rc::Rc;

use sona_ir::{
    AssignStmt, BinaryOp, CallExpr, Expr, FuncDef, IfStmt, MemberExpr, Module, Stmt, WhileStmt,
};

pub fn module(stmts: Vec<Stmt>) -> Rc<Module> {
    Rc::new(Module {
        stmts: stmts.into_boxed_slice(),
    })
}

pub fn func(name: &str, params: &[&str], body: Vec<Stmt>) -> Stmt {
    Stmt::FuncDef(Rc::new(FuncDef {
        name: name.to_string(),
        params: params.iter().map(|p| p.to_string()).collect(),
        body: body.into_boxed_slice(),
    }))
}

pub fn ident(name: &str) -> Expr {
    Expr::Ident(name.to_string())
}

pub fn int(value: i64) -> Expr {
    Expr::Int(value)
}

pub fn text(value: &str) -> Expr {
    Expr::Str(value.to_string())
}

pub fn call(name: &str, args: Vec<Expr>) -> Expr {
    call_on(ident(name), args)
}

pub fn call_on(callee: Expr, args: Vec<Expr>) -> Expr {
    Expr::Call(Box::new(CallExpr {
        callee: Box::new(callee),
        args: args.into_boxed_slice(),
    }))
}

pub fn member(object: Expr, field: &str) -> Expr {
    Expr::Member(Box::new(MemberExpr {
        object: Box::new(object),
        field: field.to_string(),
    }))
}

pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::Expr(expr)
}

pub fn decl(name: &str, value: Expr) -> Stmt {
    Stmt::Assign(Box::new(AssignStmt {
        target: ident(name),
        value,
        decl: true,
    }))
}

pub fn assign(name: &str, value: Expr) -> Stmt {
    Stmt::Assign(Box::new(AssignStmt {
        target: ident(name),
        value,
        decl: false,
    }))
}

pub fn assign_member(target: Expr, value: Expr) -> Stmt {
    Stmt::Assign(Box::new(AssignStmt {
        target,
        value,
        decl: false,
    }))
}

pub fn ret(expr: Expr) -> Stmt {
    Stmt::Return(Some(expr))
}

pub fn if_stmt(cond: Expr, then_branch: Vec<Stmt>, else_branch: Option<Vec<Stmt>>) -> Stmt {
    Stmt::If(Box::new(IfStmt {
        cond,
        then_branch: then_branch.into_boxed_slice(),
        else_branch: else_branch.map(|b| b.into_boxed_slice()),
    }))
}

pub fn while_stmt(cond: Expr, body: Vec<Stmt>) -> Stmt {
    Stmt::While(Box::new(WhileStmt {
        cond,
        body: body.into_boxed_slice(),
    }))
}

/// The call node inside an expression, for cache inspection.
pub fn as_call(expr: &Expr) -> &CallExpr {
    match expr {
        Expr::Call(call) => call,
        other => panic!("not a call expression: {:?}", other),
    }
}

/// The member node inside an expression, for cache inspection.
pub fn as_member(expr: &Expr) -> &MemberExpr {
    match expr {
        Expr::Member(member) => member,
        other => panic!("not a member expression: {:?}", other),
    }
}
