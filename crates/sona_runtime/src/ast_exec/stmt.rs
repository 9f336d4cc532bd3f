//! Statement execution.

use sona_ir::{AssignStmt, Expr, Stmt};
use sona_syntax::{DiagnosticKind, DiagnosticsFormatter};

use crate::core::value::Value;
use crate::runtime::{Executable, Flow, Session};

impl Session {
    /// Execute a statement list without opening a scope. Used for
    /// function bodies, whose frame already is the scope.
    pub(crate) fn exec_block_flow(&mut self, stmts: &[Stmt]) -> Result<Flow, String> {
        for stmt in stmts {
            match self.exec_stmt(stmt)? {
                Flow::None => {}
                flow => return Ok(flow),
            }
        }
        Ok(Flow::None)
    }

    fn exec_scoped_block(&mut self, stmts: &[Stmt]) -> Result<Flow, String> {
        self.env.push_scope();
        let flow = self.exec_block_flow(stmts);
        self.env.pop_scope();
        flow
    }

    pub(crate) fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Flow, String> {
        match stmt {
            Stmt::FuncDef(def) => {
                // Same Rc as the batch registration, so re-executing the
                // definition does not bump the version.
                self.functions()
                    .define(&def.name, Executable::Ast(def.clone()));
                Ok(Flow::None)
            }
            Stmt::If(stmt) => {
                if self.eval_condition(&stmt.cond)? {
                    self.exec_scoped_block(&stmt.then_branch)
                } else if let Some(else_branch) = &stmt.else_branch {
                    self.exec_scoped_block(else_branch)
                } else {
                    Ok(Flow::None)
                }
            }
            Stmt::While(stmt) => {
                while self.eval_condition(&stmt.cond)? {
                    match self.exec_scoped_block(&stmt.body)? {
                        Flow::None | Flow::Continue => {}
                        Flow::Break => break,
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }
                Ok(Flow::None)
            }
            Stmt::Return(expr) => {
                let value = match expr {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            }
            Stmt::Break => Ok(Flow::Break),
            Stmt::Continue => Ok(Flow::Continue),
            Stmt::Assign(stmt) => {
                self.exec_assign(stmt)?;
                Ok(Flow::None)
            }
            Stmt::Block(stmts) => self.exec_scoped_block(stmts),
            Stmt::Expr(expr) => {
                self.eval_expr(expr)?;
                Ok(Flow::None)
            }
            Stmt::Error(_) => Err(DiagnosticsFormatter::format(&DiagnosticKind::Raw(
                "Cannot execute a statement with syntax errors".to_string(),
            ))),
        }
    }

    fn exec_assign(&mut self, stmt: &AssignStmt) -> Result<(), String> {
        match &stmt.target {
            Expr::Ident(name) => {
                let value = self.eval_expr(&stmt.value)?;
                if stmt.decl {
                    self.env.define(name, value);
                } else if !self.env.assign(name, value.clone()) {
                    if self.config().strict_vars {
                        return Err(DiagnosticsFormatter::format(
                            &DiagnosticKind::UndefinedIdentifier(name.clone()),
                        ));
                    }
                    self.env.define_global(name, value);
                }
                Ok(())
            }
            Expr::Member(member) => {
                let value = self.eval_expr(&stmt.value)?;
                self.store_member(member, value)
            }
            other => Err(DiagnosticsFormatter::format(&DiagnosticKind::Raw(format!(
                "Invalid assignment target: {:?}",
                other
            )))),
        }
    }

    pub(crate) fn eval_condition(&mut self, expr: &Expr) -> Result<bool, String> {
        let value = self.eval_expr(expr)?;
        value.as_bool().ok_or_else(|| {
            DiagnosticsFormatter::format(&DiagnosticKind::InvalidConditionType(
                value.type_name().to_string(),
            ))
        })
    }
}
