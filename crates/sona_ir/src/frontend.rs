use sona_syntax::Diagnostic;

use crate::Module;
use crate::hash::stable_hash64;

#[derive(Clone, Debug)]
pub struct CompiledUnit {
    pub text: String,
    pub module: Module,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompiledUnit {
    /// Content key of the unit's source text. Two units compiled from
    /// identical text share a key, whatever path they came from.
    pub fn source_hash(&self) -> u64 {
        stable_hash64(&self.text)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == sona_syntax::Severity::Error)
    }
}

pub trait Frontend: Send + Sync {
    fn compile_text(&self, path: &str, input: &str) -> Result<CompiledUnit, String>;
}
