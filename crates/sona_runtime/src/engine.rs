//! Engine: state shared by every session created from it.
//!
//! The engine owns the shape table, the canonical builtin callables and
//! the undefined-function stubs. All of it is thread safe; sessions
//! themselves are single threaded and hold an `Engine` clone.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use sona_syntax::{DiagnosticKind, DiagnosticsFormatter};

use crate::builtins_registry::{BuiltinCallable, BuiltinDescriptor};
use crate::core::shape::ShapeTable;
use crate::core::value::{FastHashMap, fast_map_new};

/// Placeholder target for a function that has a registry handle but no
/// definition yet. One stub per name, shared engine-wide; invoking it
/// reports the undefined function.
pub struct UndefinedStub {
    name: Arc<str>,
}

impl UndefinedStub {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn invoke<T>(&self) -> Result<T, String> {
        Err(DiagnosticsFormatter::format(
            &DiagnosticKind::UndefinedFunction(self.name.to_string()),
        ))
    }
}

struct EngineShared {
    shapes: ShapeTable,
    builtins: RwLock<FastHashMap<&'static str, Arc<BuiltinCallable>>>,
    stubs: RwLock<FastHashMap<Arc<str>, Arc<UndefinedStub>>>,
    active_sessions: AtomicUsize,
    /// Latched the first time two sessions overlap. Never cleared.
    multi_session_seen: AtomicBool,
}

#[derive(Clone)]
pub struct Engine {
    shared: Arc<EngineShared>,
}

impl Engine {
    pub fn new() -> Self {
        Engine {
            shared: Arc::new(EngineShared {
                shapes: ShapeTable::new(),
                builtins: RwLock::new(fast_map_new()),
                stubs: RwLock::new(fast_map_new()),
                active_sessions: AtomicUsize::new(0),
                multi_session_seen: AtomicBool::new(false),
            }),
        }
    }

    pub fn shapes(&self) -> &ShapeTable {
        &self.shared.shapes
    }

    /// Canonical callable for a builtin descriptor. The first caller
    /// populates the cache; racing callers converge on whichever insert
    /// won under the write lock.
    pub fn builtin_callable(&self, descriptor: &'static BuiltinDescriptor) -> Arc<BuiltinCallable> {
        {
            let cache = self.shared.builtins.read().expect("builtin cache poisoned");
            if let Some(callable) = cache.get(descriptor.name) {
                return callable.clone();
            }
        }
        let mut cache = self.shared.builtins.write().expect("builtin cache poisoned");
        if let Some(callable) = cache.get(descriptor.name) {
            return callable.clone();
        }
        let callable = Arc::new(BuiltinCallable::new(descriptor));
        cache.insert(descriptor.name, callable.clone());
        callable
    }

    /// Canonical stub for an undefined function name, one per name.
    pub fn undefined_stub(&self, name: &str) -> Arc<UndefinedStub> {
        {
            let cache = self.shared.stubs.read().expect("stub cache poisoned");
            if let Some(stub) = cache.get(name) {
                return stub.clone();
            }
        }
        let mut cache = self.shared.stubs.write().expect("stub cache poisoned");
        if let Some(stub) = cache.get(name) {
            return stub.clone();
        }
        let name: Arc<str> = Arc::from(name);
        let stub = Arc::new(UndefinedStub { name: name.clone() });
        cache.insert(name, stub.clone());
        stub
    }

    /// True once two sessions have ever been live at the same time.
    pub fn multi_session_seen(&self) -> bool {
        self.shared.multi_session_seen.load(Ordering::Relaxed)
    }

    pub fn active_sessions(&self) -> usize {
        self.shared.active_sessions.load(Ordering::Relaxed)
    }

    pub(crate) fn session_started(&self) {
        let prev = self.shared.active_sessions.fetch_add(1, Ordering::Relaxed);
        if prev > 0 {
            self.shared.multi_session_seen.store(true, Ordering::Relaxed);
            self.shared.shapes.mark_contended();
        }
    }

    pub(crate) fn session_finished(&self) {
        self.shared.active_sessions.fetch_sub(1, Ordering::Relaxed);
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}
