//! Common error message constants used throughout the runtime.

pub mod messages {
    pub const NOT_AN_OBJECT: &str = "Not an object";
    pub const NOT_A_FUNCTION: &str = "Not a function";
    pub const NOT_A_NUMBER: &str = "Not a number";
    pub const NOT_A_STRING: &str = "Not a string";
    pub const DIVISION_BY_ZERO: &str = "Division by zero";
    pub const TYPE_MISMATCH: &str = "Type mismatch";
}
