//! Runtime value representation.
//!
//! Values are dynamically typed but strongly typed: operations never
//! coerce across unrelated types. Integers are `i64` and promote to a
//! big-integer representation on overflow; results are normalized back
//! to `i64` whenever they fit.

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use ahash::RandomState;
use hashbrown::HashMap;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

use super::object::ScriptObject;
use crate::runtime::Function;

pub type FastHashMap<K, V> = HashMap<K, V, RandomState>;

pub fn fast_map_new<K: Eq + Hash, V>() -> FastHashMap<K, V> {
    FastHashMap::with_hasher(RandomState::new())
}

#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Big(Rc<BigInt>),
    Float(f64),
    Str(Rc<str>),
    Object(Rc<ScriptObject>),
    Function(Rc<Function>),
}

impl Value {
    /// Wrap a big integer, normalizing back to `Int` when it fits.
    pub fn from_big(v: BigInt) -> Self {
        match v.to_i64() {
            Some(i) => Value::Int(i),
            None => Value::Big(Rc::new(v)),
        }
    }

    pub fn str(s: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(s.as_ref()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Big(_) | Value::Float(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Rc<ScriptObject>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Rc<Function>> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::Big(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "text",
            Value::Object(_) => "object",
            Value::Function(_) => "func",
        }
    }

    /// Language-level equality: structural for primitives, identity for
    /// objects and functions.
    pub fn eq_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Big(a), Value::Big(b)) => a == b,
            (Value::Int(a), Value::Big(b)) | (Value::Big(b), Value::Int(a)) => {
                **b == BigInt::from(*a)
            }
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.eq_value(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Int(i) => f.write_str(itoa::Buffer::new().format(*i)),
            Value::Big(b) => write!(f, "{}", b),
            Value::Float(x) => f.write_str(ryu::Buffer::new().format(*x)),
            Value::Str(s) => f.write_str(s),
            Value::Object(o) => {
                f.write_str("{")?;
                for (i, name) in o.property_names().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: ", name)?;
                    match o.get(name) {
                        Some(v) => write!(f, "{}", v)?,
                        None => f.write_str("null")?,
                    }
                }
                f.write_str("}")
            }
            Value::Function(func) => write!(f, "func {}", func.name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{:?}", s),
            other => write!(f, "{}", other),
        }
    }
}
