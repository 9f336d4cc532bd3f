pub mod env;
pub mod object;
pub mod shape;
pub mod value;

pub use value::Value;
pub use value::{FastHashMap, fast_map_new};
