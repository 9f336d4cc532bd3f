//! Standard builtins.

use std::cmp::Ordering;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use num_bigint::BigInt;
use sona_syntax::{DiagnosticKind, DiagnosticsFormatter};

use crate::builtins_registry::BuiltinDescriptor;
use crate::core::object::ScriptObject;
use crate::core::value::Value;
use crate::errors::messages;
use crate::runtime::Session;
use crate::runtime::binary::compare_values;

pub static ALL: &[&BuiltinDescriptor] = &[
    &PRINT,
    &PRINTLN,
    &TO_TEXT,
    &TYPE_OF,
    &NEW,
    &HAS_PROPERTY,
    &REMOVE_PROPERTY,
    &NANO_TIME,
    &ABS,
    &MIN,
    &MAX,
    &IS_NULL,
];

pub static PRINT: BuiltinDescriptor = BuiltinDescriptor {
    name: "print",
    min_args: 0,
    max_args: None,
    func: print,
};

pub static PRINTLN: BuiltinDescriptor = BuiltinDescriptor {
    name: "println",
    min_args: 0,
    max_args: None,
    func: println,
};

pub static TO_TEXT: BuiltinDescriptor = BuiltinDescriptor {
    name: "to_text",
    min_args: 1,
    max_args: Some(1),
    func: to_text,
};

pub static TYPE_OF: BuiltinDescriptor = BuiltinDescriptor {
    name: "type_of",
    min_args: 1,
    max_args: Some(1),
    func: type_of,
};

pub static NEW: BuiltinDescriptor = BuiltinDescriptor {
    name: "new",
    min_args: 0,
    max_args: Some(0),
    func: new_object,
};

pub static HAS_PROPERTY: BuiltinDescriptor = BuiltinDescriptor {
    name: "has_property",
    min_args: 2,
    max_args: Some(2),
    func: has_property,
};

pub static REMOVE_PROPERTY: BuiltinDescriptor = BuiltinDescriptor {
    name: "remove_property",
    min_args: 2,
    max_args: Some(2),
    func: remove_property,
};

pub static NANO_TIME: BuiltinDescriptor = BuiltinDescriptor {
    name: "nano_time",
    min_args: 0,
    max_args: Some(0),
    func: nano_time,
};

pub static ABS: BuiltinDescriptor = BuiltinDescriptor {
    name: "abs",
    min_args: 1,
    max_args: Some(1),
    func: abs,
};

pub static MIN: BuiltinDescriptor = BuiltinDescriptor {
    name: "min",
    min_args: 2,
    max_args: None,
    func: min,
};

pub static MAX: BuiltinDescriptor = BuiltinDescriptor {
    name: "max",
    min_args: 2,
    max_args: None,
    func: max,
};

pub static IS_NULL: BuiltinDescriptor = BuiltinDescriptor {
    name: "is_null",
    min_args: 1,
    max_args: Some(1),
    func: is_null,
};

fn write_joined(session: &mut Session, args: &[Value]) {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            session.write_output(" ");
        }
        let text = arg.to_string();
        session.write_output(&text);
    }
}

fn print(session: &mut Session, args: &[Value]) -> Result<Value, String> {
    write_joined(session, args);
    Ok(Value::Null)
}

fn println(session: &mut Session, args: &[Value]) -> Result<Value, String> {
    write_joined(session, args);
    session.write_output("\n");
    Ok(Value::Null)
}

fn to_text(_session: &mut Session, args: &[Value]) -> Result<Value, String> {
    Ok(Value::str(args[0].to_string()))
}

fn type_of(_session: &mut Session, args: &[Value]) -> Result<Value, String> {
    Ok(Value::str(args[0].type_name()))
}

fn new_object(session: &mut Session, _args: &[Value]) -> Result<Value, String> {
    let object = ScriptObject::new(session.engine().shapes());
    Ok(Value::Object(Rc::new(object)))
}

fn object_and_name<'a>(args: &'a [Value]) -> Result<(&'a Rc<ScriptObject>, &'a str), String> {
    let object = match &args[0] {
        Value::Object(o) => o,
        other => {
            return Err(format!("{}: {}", messages::NOT_AN_OBJECT, other.type_name()));
        }
    };
    let name = match &args[1] {
        Value::Str(s) => s.as_ref(),
        other => {
            return Err(format!("{}: {}", messages::NOT_A_STRING, other.type_name()));
        }
    };
    Ok((object, name))
}

fn has_property(_session: &mut Session, args: &[Value]) -> Result<Value, String> {
    let (object, name) = object_and_name(args)?;
    Ok(Value::Bool(object.has_property(name)))
}

fn remove_property(_session: &mut Session, args: &[Value]) -> Result<Value, String> {
    let (object, name) = object_and_name(args)?;
    Ok(Value::Bool(object.remove(name)))
}

fn nano_time(_session: &mut Session, _args: &[Value]) -> Result<Value, String> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| e.to_string())?
        .as_nanos();
    Ok(Value::from_big(BigInt::from(nanos)))
}

fn abs(_session: &mut Session, args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::Int(i) => match i.checked_abs() {
            Some(v) => Ok(Value::Int(v)),
            None => Ok(Value::from_big(-BigInt::from(*i))),
        },
        Value::Big(b) => {
            let b: &BigInt = b;
            if b.sign() == num_bigint::Sign::Minus {
                Ok(Value::from_big(-b.clone()))
            } else {
                Ok(Value::from_big(b.clone()))
            }
        }
        Value::Float(x) => Ok(Value::Float(x.abs())),
        other => Err(format!("{}: {}", messages::NOT_A_NUMBER, other.type_name())),
    }
}

fn extreme(args: &[Value], want: Ordering) -> Result<Value, String> {
    let mut best = args[0].clone();
    for candidate in &args[1..] {
        let ord = compare_values(candidate, &best).ok_or_else(|| {
            DiagnosticsFormatter::format(&DiagnosticKind::TypeMismatch {
                op: if want == Ordering::Less { "min" } else { "max" },
                left: best.type_name().to_string(),
                right: candidate.type_name().to_string(),
            })
        })?;
        if ord == want {
            best = candidate.clone();
        }
    }
    Ok(best)
}

fn min(_session: &mut Session, args: &[Value]) -> Result<Value, String> {
    extreme(args, Ordering::Less)
}

fn max(_session: &mut Session, args: &[Value]) -> Result<Value, String> {
    extreme(args, Ordering::Greater)
}

fn is_null(_session: &mut Session, args: &[Value]) -> Result<Value, String> {
    Ok(Value::Bool(args[0].is_null()))
}
