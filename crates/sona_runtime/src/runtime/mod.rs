pub(crate) mod binary;
pub mod cache;
mod config;
mod core;
mod registry;

pub use cache::{CallSiteCache, IC_CAPACITY, PropertySiteCache};
pub use config::RuntimeConfig;
pub use self::core::{ExecResult, Flow, Session};
pub use registry::{Executable, Function, FunctionRegistry};
