//! Expression evaluation.

use sona_ir::{BinaryOp, Expr, UnaryOp};
use sona_syntax::{DiagnosticKind, DiagnosticsFormatter};

use crate::core::value::Value;
use crate::runtime::Session;
use crate::runtime::binary;

impl Session {
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> Result<Value, String> {
        match expr {
            Expr::Ident(name) => self.eval_ident(name),
            Expr::FuncRef(name) => Ok(Value::Function(self.functions().handle(name))),
            Expr::Int(i) => Ok(Value::Int(*i)),
            Expr::Float(x) => Ok(Value::Float(*x)),
            Expr::Str(s) => Ok(Value::str(s)),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Null => Ok(Value::Null),
            Expr::Member(member) => self.load_member(member),
            Expr::Call(call) => self.eval_call(call),
            Expr::Unary { op, expr } => {
                let value = self.eval_expr(expr)?;
                match op {
                    UnaryOp::Neg => binary::eval_negate(&value),
                    UnaryOp::Not => binary::eval_not(&value),
                }
            }
            Expr::Binary { op, left, right } => match op {
                BinaryOp::And => self.eval_logical(left, right, false),
                BinaryOp::Or => self.eval_logical(left, right, true),
                _ => {
                    let left = self.eval_expr(left)?;
                    let right = self.eval_expr(right)?;
                    binary::eval_binary(*op, &left, &right)
                }
            },
            Expr::Group(inner) => self.eval_expr(inner),
            Expr::Error(_) => Err(DiagnosticsFormatter::format(&DiagnosticKind::Raw(
                "Cannot evaluate an expression with syntax errors".to_string(),
            ))),
        }
    }

    /// A bare identifier resolves to a variable first, then falls back
    /// to an already-known function. The fallback never creates a
    /// handle; an unknown name here is an error.
    fn eval_ident(&mut self, name: &str) -> Result<Value, String> {
        if let Some(value) = self.env.get(name) {
            return Ok(value.clone());
        }
        if let Some(func) = self.functions().get(name) {
            return Ok(Value::Function(func));
        }
        Err(DiagnosticsFormatter::format(
            &DiagnosticKind::UndefinedIdentifier(name.to_string()),
        ))
    }

    /// Short-circuiting `and`/`or`. Both operands must be bool; the
    /// right one is only evaluated, and only checked, when reached.
    fn eval_logical(&mut self, left: &Expr, right: &Expr, is_or: bool) -> Result<Value, String> {
        let op: &'static str = if is_or { "or" } else { "and" };
        let lhs = self.eval_expr(left)?;
        let lhs = lhs.as_bool().ok_or_else(|| bool_mismatch(op, &lhs))?;
        if lhs == is_or {
            return Ok(Value::Bool(lhs));
        }
        let rhs = self.eval_expr(right)?;
        let rhs = rhs.as_bool().ok_or_else(|| bool_mismatch(op, &rhs))?;
        Ok(Value::Bool(rhs))
    }
}

fn bool_mismatch(op: &'static str, value: &Value) -> String {
    DiagnosticsFormatter::format(&DiagnosticKind::TypeMismatch {
        op,
        left: "bool".to_string(),
        right: value.type_name().to_string(),
    })
}
