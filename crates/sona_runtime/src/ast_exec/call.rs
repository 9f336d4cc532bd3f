//! Call-site dispatch through the call inline cache.

use std::rc::Rc;

use smallvec::SmallVec;
use sona_ir::{CallExpr, Expr};
use sona_syntax::{DiagnosticKind, DiagnosticsFormatter};

use crate::core::value::Value;
use crate::runtime::{Function, Session};

impl Session {
    pub(crate) fn eval_call(&mut self, call: &CallExpr) -> Result<Value, String> {
        let target = self.resolve_callee(&call.callee)?;

        let mut args: SmallVec<[Value; 4]> = SmallVec::with_capacity(call.args.len());
        for arg in call.args.iter() {
            args.push(self.eval_expr(arg)?);
        }

        if let Some(executable) = self.call_ic_mut(call).lookup(&target) {
            return self.invoke_executable(&executable, &args);
        }

        // Slow path: resolve through the handle, then teach the cache.
        let executable = match target.executable() {
            Some(executable) => executable,
            None => return self.engine().undefined_stub(target.name()).invoke(),
        };
        self.call_ic_mut(call).record(&target, executable.clone());
        self.invoke_executable(&executable, &args)
    }

    /// Resolve the callee expression to a function handle.
    ///
    /// A bare name prefers a variable binding; an unbound name falls
    /// through to the registry with create-if-absent semantics, which
    /// is what lets a call site reference a function defined later.
    fn resolve_callee(&mut self, callee: &Expr) -> Result<Rc<Function>, String> {
        match callee {
            Expr::Ident(name) => match self.env.get(name) {
                Some(Value::Function(func)) => Ok(func.clone()),
                Some(other) => Err(DiagnosticsFormatter::format(&DiagnosticKind::NotCallable(
                    other.type_name().to_string(),
                ))),
                None => Ok(self.functions().handle(name)),
            },
            Expr::FuncRef(name) => Ok(self.functions().handle(name)),
            other => match self.eval_expr(other)? {
                Value::Function(func) => Ok(func),
                value => Err(DiagnosticsFormatter::format(&DiagnosticKind::NotCallable(
                    value.type_name().to_string(),
                ))),
            },
        }
    }
}
