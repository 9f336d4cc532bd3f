//! Spans and diagnostics shared by the front end seam and the runtime.

mod diagnostic;
mod kinds;
mod span;

pub use diagnostic::{Diagnostic, Severity};
pub use kinds::{DiagnosticKind, DiagnosticsFormatter};
pub use span::{BytePos, Span};
