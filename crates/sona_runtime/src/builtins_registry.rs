//! Builtin function registry.
//!
//! Builtins are described by static [`BuiltinDescriptor`]s. Providers
//! contribute descriptors to a [`BuiltinRegistry`]; each session turns
//! the collected descriptors into engine-canonical callables when it is
//! created, so two sessions on one engine share the same
//! [`BuiltinCallable`] for any given builtin.

use sona_syntax::{DiagnosticKind, DiagnosticsFormatter};

use crate::core::value::Value;
use crate::runtime::Session;

pub type NativeFn = fn(&mut Session, &[Value]) -> Result<Value, String>;

pub struct BuiltinDescriptor {
    pub name: &'static str,
    pub min_args: usize,
    /// `None` means variadic.
    pub max_args: Option<usize>,
    pub func: NativeFn,
}

/// A builtin bound to its descriptor. Cached per engine; compared by
/// pointer to tell one builtin target from another.
pub struct BuiltinCallable {
    descriptor: &'static BuiltinDescriptor,
}

impl BuiltinCallable {
    pub fn new(descriptor: &'static BuiltinDescriptor) -> Self {
        BuiltinCallable { descriptor }
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn invoke(&self, session: &mut Session, args: &[Value]) -> Result<Value, String> {
        let d = self.descriptor;
        let out_of_range = args.len() < d.min_args
            || d.max_args.is_some_and(|max| args.len() > max);
        if out_of_range {
            return Err(DiagnosticsFormatter::format(
                &DiagnosticKind::ArgumentCountMismatch {
                    name: d.name.to_string(),
                    expected: d.min_args,
                    actual: args.len(),
                },
            ));
        }
        (d.func)(session, args)
    }
}

pub trait BuiltinProvider {
    fn descriptors(&self) -> &[&'static BuiltinDescriptor];
}

/// Provider for the standard builtin set.
pub struct StdBuiltinProvider;

impl BuiltinProvider for StdBuiltinProvider {
    fn descriptors(&self) -> &[&'static BuiltinDescriptor] {
        crate::builtins::system::ALL
    }
}

/// Collects descriptors from providers before a session starts.
pub struct BuiltinRegistry {
    descriptors: Vec<&'static BuiltinDescriptor>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        BuiltinRegistry {
            descriptors: Vec::new(),
        }
    }

    pub fn with_std() -> Self {
        let mut registry = Self::new();
        registry.install(&StdBuiltinProvider);
        registry
    }

    pub fn install(&mut self, provider: &dyn BuiltinProvider) {
        for descriptor in provider.descriptors() {
            self.register(descriptor);
        }
    }

    pub fn register(&mut self, descriptor: &'static BuiltinDescriptor) {
        if !self.descriptors.iter().any(|d| d.name == descriptor.name) {
            self.descriptors.push(descriptor);
        }
    }

    pub fn descriptors(&self) -> &[&'static BuiltinDescriptor] {
        &self.descriptors
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}
