//! Property access through the property inline cache.
//!
//! Both load and store sites key their cache on the object's shape id.
//! An object that has migrated to the generic representation has no
//! shape and bypasses the cache entirely.

use std::rc::Rc;

use sona_ir::MemberExpr;
use sona_syntax::{DiagnosticKind, DiagnosticsFormatter};

use crate::core::object::ScriptObject;
use crate::core::value::Value;
use crate::runtime::Session;

impl Session {
    pub(crate) fn load_member(&mut self, member: &MemberExpr) -> Result<Value, String> {
        let object = self.eval_object(&member.object)?;

        if let Some(shape) = object.shape() {
            if let Some((slot, _)) = self.prop_ic_mut(member).lookup(shape.id()) {
                return Ok(object.slot_value(slot));
            }
            return match shape.slot_of(&member.field) {
                Some(slot) => {
                    self.prop_ic_mut(member).record(shape.id(), slot, None);
                    Ok(object.slot_value(slot))
                }
                None => Err(undefined_property(&member.field)),
            };
        }

        object
            .get(&member.field)
            .ok_or_else(|| undefined_property(&member.field))
    }

    pub(crate) fn store_member(&mut self, member: &MemberExpr, value: Value) -> Result<(), String> {
        let object = self.eval_object(&member.object)?;

        if let Some(shape) = object.shape() {
            match self.prop_ic_mut(member).lookup(shape.id()) {
                Some((slot, None)) => {
                    object.slot_store(slot, value);
                    return Ok(());
                }
                Some((_, Some(child))) => {
                    let child = child.clone();
                    object.push_transition(&child, value);
                    return Ok(());
                }
                None => {}
            }
            match shape.slot_of(&member.field) {
                Some(slot) => {
                    object.slot_store(slot, value);
                    self.prop_ic_mut(member).record(shape.id(), slot, None);
                }
                None => {
                    let child = self.engine().shapes().transition(&shape, &member.field);
                    object.push_transition(&child, value);
                    self.prop_ic_mut(member)
                        .record(shape.id(), child.slot_count() - 1, Some(child));
                }
            }
            return Ok(());
        }

        object.set(self.engine().shapes(), &member.field, value);
        Ok(())
    }

    fn eval_object(&mut self, expr: &sona_ir::Expr) -> Result<Rc<ScriptObject>, String> {
        match self.eval_expr(expr)? {
            Value::Object(object) => Ok(object),
            other => Err(DiagnosticsFormatter::format(&DiagnosticKind::NotAnObject(
                other.type_name().to_string(),
            ))),
        }
    }
}

fn undefined_property(name: &str) -> String {
    DiagnosticsFormatter::format(&DiagnosticKind::UndefinedProperty(name.to_string()))
}
