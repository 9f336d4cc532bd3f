//! Session: the single-threaded execution context.
//!
//! A session is created from an [`Engine`] and owns everything the
//! engine does not share: the function registry, the variable
//! environment, accumulated output and the per-site inline caches.
//! Sessions hold `Rc` values and are not `Send`; concurrency happens by
//! running one session per thread over a shared engine.

use std::rc::Rc;

use sona_ir::{CallExpr, MemberExpr, Module};
use sona_syntax::{DiagnosticKind, DiagnosticsFormatter};

use crate::builtins_registry::BuiltinRegistry;
use crate::core::env::{Env, Scope};
use crate::core::value::{FastHashMap, Value, fast_map_new};
use crate::engine::Engine;
use crate::runtime::cache::{CallSiteCache, PropertySiteCache};
use crate::runtime::config::RuntimeConfig;
use crate::runtime::registry::{Executable, Function, FunctionRegistry};

/// Result of executing a module: the value of its last expression
/// statement, if any, and everything the run printed.
#[derive(Debug)]
pub struct ExecResult {
    pub value: Option<Value>,
    pub output: String,
}

/// Control-flow signal threaded through statement execution.
pub enum Flow {
    None,
    Return(Value),
    Break,
    Continue,
}

pub struct Session {
    engine: Engine,
    functions: FunctionRegistry,
    pub(crate) env: Env,
    config: RuntimeConfig,
    output: String,
    pub(crate) call_depth: usize,
    /// Per-site inline caches, keyed on the AST node's address. The
    /// registry pins every executed module, so a key stays valid for
    /// the session's lifetime and is never handed to a second node.
    call_ics: FastHashMap<usize, CallSiteCache>,
    prop_ics: FastHashMap<usize, PropertySiteCache>,
}

fn call_site_key(call: &CallExpr) -> usize {
    call as *const CallExpr as usize
}

fn member_site_key(member: &MemberExpr) -> usize {
    member as *const MemberExpr as usize
}

impl Session {
    pub fn new(engine: &Engine) -> Self {
        Self::with_config(engine, &BuiltinRegistry::with_std(), RuntimeConfig::default())
    }

    pub fn with_config(engine: &Engine, builtins: &BuiltinRegistry, config: RuntimeConfig) -> Self {
        engine.session_started();
        let session = Session {
            engine: engine.clone(),
            functions: FunctionRegistry::new(),
            env: Env::new(),
            config,
            output: String::new(),
            call_depth: 0,
            call_ics: fast_map_new(),
            prop_ics: fast_map_new(),
        };
        for descriptor in builtins.descriptors() {
            let callable = session.engine.builtin_callable(descriptor);
            session
                .functions
                .define(descriptor.name, Executable::Builtin(callable));
        }
        session
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn write_output(&mut self, text: &str) {
        self.output.push_str(text);
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Register the module's functions and execute its top-level
    /// statements. Running the same `Rc<Module>` again re-executes the
    /// statements but does not re-register the functions.
    pub fn exec_module(&mut self, module: &Rc<Module>) -> Result<ExecResult, String> {
        self.functions.register_batch(module);
        let mut last = None;
        for stmt in module.stmts.iter() {
            if let sona_ir::Stmt::Expr(expr) = stmt {
                last = Some(self.eval_expr(expr)?);
                continue;
            }
            match self.exec_stmt(stmt)? {
                Flow::None => {}
                Flow::Return(value) => {
                    last = Some(value);
                    break;
                }
                Flow::Break | Flow::Continue => {
                    return Err(DiagnosticsFormatter::format(
                        &DiagnosticKind::TopLevelBreakContinue,
                    ));
                }
            }
        }
        Ok(ExecResult {
            value: last,
            output: self.take_output(),
        })
    }

    /// Call a function through its handle, outside any call site.
    pub fn call_function(&mut self, func: &Rc<Function>, args: &[Value]) -> Result<Value, String> {
        match func.executable() {
            Some(executable) => self.invoke_executable(&executable, args),
            None => self.engine.undefined_stub(func.name()).invoke(),
        }
    }

    pub(crate) fn invoke_executable(
        &mut self,
        executable: &Executable,
        args: &[Value],
    ) -> Result<Value, String> {
        if self.call_depth >= self.config.max_call_depth {
            return Err(DiagnosticsFormatter::format(
                &DiagnosticKind::RecursionLimitExceeded,
            ));
        }
        match executable {
            Executable::Builtin(callable) => {
                let callable = callable.clone();
                self.call_depth += 1;
                let result = callable.invoke(self, args);
                self.call_depth -= 1;
                result
            }
            Executable::Ast(def) => {
                let mut params = Scope::new();
                for (i, name) in def.params.iter().enumerate() {
                    // Missing arguments bind null, extras are ignored.
                    let value = args.get(i).cloned().unwrap_or(Value::Null);
                    params.define(name, value);
                }
                self.call_depth += 1;
                let saved = self.env.enter_call(params);
                let flow = self.exec_block_flow(&def.body);
                self.env.exit_call(saved);
                self.call_depth -= 1;
                match flow? {
                    Flow::Return(value) => Ok(value),
                    Flow::None => Ok(Value::Null),
                    Flow::Break => Err(DiagnosticsFormatter::format(
                        &DiagnosticKind::UnexpectedControlFlowInFunction("break"),
                    )),
                    Flow::Continue => Err(DiagnosticsFormatter::format(
                        &DiagnosticKind::UnexpectedControlFlowInFunction("continue"),
                    )),
                }
            }
        }
    }

    /// This session's cache for a call site, created on first use.
    pub(crate) fn call_ic_mut(&mut self, call: &CallExpr) -> &mut CallSiteCache {
        self.call_ics
            .entry(call_site_key(call))
            .or_insert_with(CallSiteCache::new)
    }

    pub(crate) fn prop_ic_mut(&mut self, member: &MemberExpr) -> &mut PropertySiteCache {
        self.prop_ics
            .entry(member_site_key(member))
            .or_insert_with(PropertySiteCache::new)
    }

    /// Cache state for a call site, for inspection. `None` until the
    /// site has executed in this session.
    pub fn call_cache_for(&self, call: &CallExpr) -> Option<&CallSiteCache> {
        self.call_ics.get(&call_site_key(call))
    }

    pub fn property_cache_for(&self, member: &MemberExpr) -> Option<&PropertySiteCache> {
        self.prop_ics.get(&member_site_key(member))
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.engine.session_finished();
    }
}
