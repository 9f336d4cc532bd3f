//! Session configuration.

#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Assigning to an unbound name is an error instead of an implicit
    /// global definition.
    pub strict_vars: bool,
    pub max_call_depth: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            strict_vars: true,
            max_call_depth: 256,
        }
    }
}
