//! Sona language runtime.

#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::new_without_default)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::too_many_arguments)]

pub mod core;
pub mod errors;
mod ast_exec;

mod engine;
mod runtime;
mod builtins;
pub mod builtins_registry;

// Re-exports from core/
pub use crate::core::env::{Env, Scope};
pub use crate::core::object::ScriptObject;
pub use crate::core::shape::{Shape, ShapeId, ShapeTable};
pub use crate::core::value::Value;

// Re-exports from engine/
pub use engine::{Engine, UndefinedStub};

// Re-exports from other modules
pub use builtins_registry::{
    BuiltinCallable, BuiltinDescriptor, BuiltinProvider, BuiltinRegistry, NativeFn,
    StdBuiltinProvider,
};

// Runtime structs and enums
pub use runtime::ExecResult;
pub use runtime::Flow;
pub use runtime::RuntimeConfig;
pub use runtime::Session;
pub use runtime::{CallSiteCache, IC_CAPACITY, PropertySiteCache};
pub use runtime::{Executable, Function, FunctionRegistry};
