//! Function registry.
//!
//! A [`Function`] is an identity-stable handle: the `Rc<Function>` a
//! caller obtained before a redefinition keeps working after it, and
//! the same name always resolves to the same handle within a session.
//! The current definition lives behind the handle and is swapped in
//! place; a version counter bumps on every real retarget so inline
//! caches can tell a stale entry from a fresh one.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use sona_ir::{FuncDef, Module};

use crate::builtins_registry::BuiltinCallable;
use crate::core::value::{FastHashMap, fast_map_new};

#[derive(Clone)]
pub enum Executable {
    Ast(Rc<FuncDef>),
    Builtin(Arc<BuiltinCallable>),
}

impl Executable {
    /// Whether both executables refer to the same underlying target.
    pub fn same_target(&self, other: &Executable) -> bool {
        match (self, other) {
            (Executable::Ast(a), Executable::Ast(b)) => Rc::ptr_eq(a, b),
            (Executable::Builtin(a), Executable::Builtin(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

pub struct Function {
    name: Box<str>,
    executable: RefCell<Option<Executable>>,
    version: Cell<u64>,
}

impl Function {
    fn undefined(name: &str) -> Self {
        Function {
            name: Box::from(name),
            executable: RefCell::new(None),
            version: Cell::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u64 {
        self.version.get()
    }

    pub fn is_defined(&self) -> bool {
        self.executable.borrow().is_some()
    }

    pub fn executable(&self) -> Option<Executable> {
        self.executable.borrow().clone()
    }

    /// Swap in a new definition. Redefining to the exact same target is
    /// a no-op and does not bump the version.
    pub fn redefine(&self, executable: Executable) {
        let mut slot = self.executable.borrow_mut();
        if let Some(current) = slot.as_ref() {
            if current.same_target(&executable) {
                return;
            }
        }
        *slot = Some(executable);
        self.version.set(self.version.get() + 1);
    }
}

pub struct FunctionRegistry {
    functions: RefCell<FastHashMap<String, Rc<Function>>>,
    /// Modules already registered, keyed by allocation address. Keeping
    /// the `Rc` alive pins the address for the registry's lifetime.
    batches: RefCell<FastHashMap<usize, Rc<Module>>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        FunctionRegistry {
            functions: RefCell::new(fast_map_new()),
            batches: RefCell::new(fast_map_new()),
        }
    }

    /// Handle for `name` if one exists, defined or not.
    pub fn get(&self, name: &str) -> Option<Rc<Function>> {
        self.functions.borrow().get(name).cloned()
    }

    /// Handle for `name`, creating an undefined one on first use. This
    /// is what makes forward references work: the handle exists before
    /// the definition does, and the later definition fills it in.
    pub fn handle(&self, name: &str) -> Rc<Function> {
        let mut functions = self.functions.borrow_mut();
        if let Some(f) = functions.get(name) {
            return f.clone();
        }
        let f = Rc::new(Function::undefined(name));
        functions.insert(name.to_string(), f.clone());
        f
    }

    /// Define or redefine `name`, preserving any existing handle.
    pub fn define(&self, name: &str, executable: Executable) -> Rc<Function> {
        let f = self.handle(name);
        f.redefine(executable);
        f
    }

    /// Register every top-level function of a module. Idempotent per
    /// module instance: a second call with the same `Rc<Module>` does
    /// nothing and returns false, so re-running a module cannot bump
    /// function versions.
    pub fn register_batch(&self, module: &Rc<Module>) -> bool {
        let key = Rc::as_ptr(module) as usize;
        {
            let mut batches = self.batches.borrow_mut();
            if batches.contains_key(&key) {
                return false;
            }
            batches.insert(key, module.clone());
        }
        for def in module.functions() {
            self.define(&def.name, Executable::Ast(def.clone()));
        }
        true
    }

    /// All known functions sorted by name. Diagnostic listing only,
    /// never on a hot path.
    pub fn list(&self) -> Vec<Rc<Function>> {
        let mut all: Vec<Rc<Function>> = self.functions.borrow().values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }

    pub fn len(&self) -> usize {
        self.functions.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.borrow().is_empty()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
