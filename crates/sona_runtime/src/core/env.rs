//! Variable environment: a global scope plus a stack of block scopes
//! for the currently executing function frame.

use super::value::{FastHashMap, Value, fast_map_new};

#[derive(Default)]
pub struct Scope {
    vars: FastHashMap<String, Value>,
}

impl Scope {
    pub fn new() -> Self {
        Scope { vars: fast_map_new() }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn define(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_string(), value);
    }

    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        match self.vars.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }
}

pub struct Env {
    globals: Scope,
    /// Block scopes of the active frame, innermost last. Empty at the
    /// top level, where `globals` is the only scope.
    frames: Vec<Scope>,
}

impl Env {
    pub fn new() -> Self {
        Env {
            globals: Scope::new(),
            frames: Vec::new(),
        }
    }

    pub fn push_scope(&mut self) {
        self.frames.push(Scope::new());
    }

    pub fn pop_scope(&mut self) {
        self.frames.pop();
    }

    /// Swap in a fresh frame for a function call, returning the caller's
    /// scopes. Function bodies see their own locals and globals only.
    pub fn enter_call(&mut self, params: Scope) -> Vec<Scope> {
        std::mem::replace(&mut self.frames, vec![params])
    }

    pub fn exit_call(&mut self, saved: Vec<Scope>) {
        self.frames = saved;
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        for scope in self.frames.iter().rev() {
            if let Some(v) = scope.get(name) {
                return Some(v);
            }
        }
        self.globals.get(name)
    }

    /// Define in the innermost scope, shadowing any outer binding.
    pub fn define(&mut self, name: &str, value: Value) {
        match self.frames.last_mut() {
            Some(scope) => scope.define(name, value),
            None => self.globals.define(name, value),
        }
    }

    pub fn define_global(&mut self, name: &str, value: Value) {
        self.globals.define(name, value);
    }

    /// Assign to the nearest existing binding. Returns false when the
    /// name is not bound anywhere.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        for scope in self.frames.iter_mut().rev() {
            if scope.assign(name, value.clone()) {
                return true;
            }
        }
        self.globals.assign(name, value)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.frames.iter().any(|s| s.contains(name)) || self.globals.contains(name)
    }
}
