//!
//!
//!
mod ast;
mod frontend;
mod hash;

pub use ast::*;
pub use frontend::*;
pub use hash::*;
